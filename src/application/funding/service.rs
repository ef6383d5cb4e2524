use std::sync::Arc;

use tracing::info;

use crate::domain::{
    DomainError, DomainResult, Funding, NewFunding, RepositoryProvider, MAX_FUNDING_AMOUNT,
};
use crate::shared::{new_record_id, validate_pagination, PaginatedResult};

pub struct FundingService {
    repos: Arc<dyn RepositoryProvider>,
    default_page_size: u64,
    max_page_size: u64,
}

impl FundingService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, default_page_size: u64, max_page_size: u64) -> Self {
        Self {
            repos,
            default_page_size,
            max_page_size,
        }
    }

    pub async fn record(&self, input: NewFunding) -> DomainResult<Funding> {
        if input.amount <= 0 {
            return Err(DomainError::Validation(
                "Funding amount must be positive".into(),
            ));
        }
        if input.amount > MAX_FUNDING_AMOUNT {
            return Err(DomainError::Validation(format!(
                "Funding amount must not exceed {}",
                MAX_FUNDING_AMOUNT
            )));
        }

        let funding = Funding::record(new_record_id(), input);
        self.repos.fundings().create(funding.clone()).await?;

        info!(
            funding_id = %funding.id,
            funder = %funding.funder_email,
            amount = funding.amount,
            "Funding recorded"
        );
        Ok(funding)
    }

    pub async fn list(
        &self,
        page: Option<u64>,
        limit: Option<u64>,
    ) -> DomainResult<PaginatedResult<Funding>> {
        let pagination =
            validate_pagination(page, limit, self.default_page_size, self.max_page_size)?;
        self.repos.fundings().find_page(pagination).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::InMemoryStorage;

    fn service() -> FundingService {
        FundingService::new(Arc::new(InMemoryStorage::new()), 10, 100)
    }

    fn gift(amount: i64) -> NewFunding {
        NewFunding {
            funder_name: "Nadia".into(),
            funder_email: "nadia@example.com".into(),
            amount,
        }
    }

    #[tokio::test]
    async fn non_positive_amount_is_rejected() {
        let svc = service();
        for amount in [0, -500] {
            let err = svc.record(gift(amount)).await.unwrap_err();
            assert!(matches!(err, DomainError::Validation(_)));
        }
        assert_eq!(svc.list(None, None).await.unwrap().total, 0);
    }

    #[tokio::test]
    async fn amount_above_the_cap_is_rejected() {
        let svc = service();
        let err = svc.record(gift(MAX_FUNDING_AMOUNT + 1)).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        svc.record(gift(MAX_FUNDING_AMOUNT)).await.unwrap();
        assert_eq!(svc.list(None, None).await.unwrap().total, 1);
    }

    #[tokio::test]
    async fn recorded_funding_is_listed() {
        let svc = service();
        let recorded = svc.record(gift(5000)).await.unwrap();

        let page = svc.list(None, None).await.unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.limit, 10);
        assert_eq!(page.items, vec![recorded]);
    }
}
