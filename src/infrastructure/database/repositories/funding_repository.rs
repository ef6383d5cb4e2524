//! SeaORM implementation of FundingRepository

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, QuerySelect,
    Set,
};

use crate::domain::{DomainResult, Funding, FundingRepository};
use crate::infrastructure::database::entities::funding;
use crate::shared::{PaginatedResult, PaginationParams};

pub struct SeaOrmFundingRepository {
    db: DatabaseConnection,
}

impl SeaOrmFundingRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: funding::Model) -> Funding {
    Funding {
        id: m.id,
        funder_name: m.funder_name,
        funder_email: m.funder_email,
        amount: m.amount,
        created_at: m.created_at,
    }
}

#[async_trait]
impl FundingRepository for SeaOrmFundingRepository {
    async fn create(&self, f: Funding) -> DomainResult<()> {
        let model = funding::ActiveModel {
            id: Set(f.id),
            funder_name: Set(f.funder_name),
            funder_email: Set(f.funder_email),
            amount: Set(f.amount),
            created_at: Set(f.created_at),
        };
        model.insert(&self.db).await?;
        Ok(())
    }

    async fn find_page(&self, pagination: PaginationParams) -> DomainResult<PaginatedResult<Funding>> {
        let total = funding::Entity::find().count(&self.db).await?;

        let models = funding::Entity::find()
            .order_by_desc(funding::Column::CreatedAt)
            .order_by_desc(funding::Column::Id)
            .offset(pagination.offset())
            .limit(pagination.limit)
            .all(&self.db)
            .await?;

        let items = models.into_iter().map(model_to_domain).collect();
        Ok(PaginatedResult::new(items, total, pagination.page, pagination.limit))
    }

    async fn total_amount(&self) -> DomainResult<i64> {
        let total: Option<Option<i64>> = funding::Entity::find()
            .select_only()
            .column_as(Expr::col(funding::Column::Amount).sum(), "total")
            .into_tuple()
            .one(&self.db)
            .await?;

        Ok(total.flatten().unwrap_or(0))
    }
}
