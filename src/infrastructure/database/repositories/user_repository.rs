use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Select, Set,
};
use tracing::debug;

use super::changed_columns;
use crate::domain::{
    BloodGroup, DomainError, DomainResult, DonorSearch, ProfileUpdate, User, UserRepository,
    UserRole, UserStatus,
};
use crate::infrastructure::database::entities::user;
use crate::shared::UpdateSummary;

pub struct SeaOrmUserRepository {
    db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn entity_role_to_domain(role: user::UserRole) -> UserRole {
    match role {
        user::UserRole::Donor => UserRole::Donor,
        user::UserRole::Volunteer => UserRole::Volunteer,
        user::UserRole::Admin => UserRole::Admin,
    }
}

fn domain_role_to_entity(role: UserRole) -> user::UserRole {
    match role {
        UserRole::Donor => user::UserRole::Donor,
        UserRole::Volunteer => user::UserRole::Volunteer,
        UserRole::Admin => user::UserRole::Admin,
    }
}

fn entity_status_to_domain(status: user::UserStatus) -> UserStatus {
    match status {
        user::UserStatus::Active => UserStatus::Active,
        user::UserStatus::Blocked => UserStatus::Blocked,
    }
}

fn domain_status_to_entity(status: UserStatus) -> user::UserStatus {
    match status {
        UserStatus::Active => user::UserStatus::Active,
        UserStatus::Blocked => user::UserStatus::Blocked,
    }
}

fn parse_stored_blood_group(raw: Option<String>) -> DomainResult<Option<BloodGroup>> {
    raw.map(|g| {
        g.parse::<BloodGroup>()
            .map_err(|_| DomainError::Storage(format!("Corrupt blood group in users: '{}'", g)))
    })
    .transpose()
}

fn user_model_to_domain(model: user::Model) -> DomainResult<User> {
    Ok(User {
        id: model.id,
        name: model.name,
        email: model.email,
        avatar: model.avatar,
        blood_group: parse_stored_blood_group(model.blood_group)?,
        district: model.district,
        upazila: model.upazila,
        role: entity_role_to_domain(model.role),
        status: entity_status_to_domain(model.status),
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

fn user_domain_to_active(u: User) -> user::ActiveModel {
    user::ActiveModel {
        id: Set(u.id),
        name: Set(u.name),
        email: Set(u.email),
        avatar: Set(u.avatar),
        blood_group: Set(u.blood_group.map(|g| g.as_str().to_string())),
        district: Set(u.district),
        upazila: Set(u.upazila),
        role: Set(domain_role_to_entity(u.role)),
        status: Set(domain_status_to_entity(u.status)),
        created_at: Set(u.created_at),
        updated_at: Set(u.updated_at),
    }
}

fn newest_first(query: Select<user::Entity>) -> Select<user::Entity> {
    query
        .order_by_desc(user::Column::CreatedAt)
        .order_by_desc(user::Column::Id)
}

impl SeaOrmUserRepository {
    async fn all(&self, query: Select<user::Entity>) -> DomainResult<Vec<User>> {
        newest_first(query)
            .all(&self.db)
            .await?
            .into_iter()
            .map(user_model_to_domain)
            .collect()
    }

    /// Load, mutate through the domain model, and UPDATE only the columns
    /// the mutation touched.
    async fn modify(
        &self,
        query: Select<user::Entity>,
        f: impl FnOnce(&mut User) -> bool + Send,
    ) -> DomainResult<UpdateSummary> {
        let Some(existing) = query.one(&self.db).await? else {
            return Ok(UpdateSummary::unmatched());
        };

        let before = user_model_to_domain(existing)?;
        let mut after = before.clone();
        if !f(&mut after) {
            return Ok(UpdateSummary::matched(false));
        }

        let id = before.id.clone();
        let changes = changed_columns(&user_domain_to_active(before), &user_domain_to_active(after));
        let result = user::Entity::update_many()
            .set(changes)
            .filter(user::Column::Id.eq(id))
            .exec(&self.db)
            .await?;
        if result.rows_affected == 0 {
            return Ok(UpdateSummary::unmatched());
        }
        Ok(UpdateSummary::matched(true))
    }
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn create(&self, u: User) -> DomainResult<()> {
        debug!("Saving user: {}", u.email);
        let email = u.email.clone();

        user_domain_to_active(u)
            .insert(&self.db)
            .await
            .map_err(|e| match DomainError::from(e) {
                DomainError::Conflict(_) => {
                    DomainError::Conflict(format!("Email '{}' already registered", email))
                }
                other => other,
            })?;

        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await?
            .map(user_model_to_domain)
            .transpose()
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<User>> {
        user::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(user_model_to_domain)
            .transpose()
    }

    async fn list(&self, status: Option<UserStatus>) -> DomainResult<Vec<User>> {
        let mut query = user::Entity::find();
        if let Some(status) = status {
            query = query.filter(user::Column::Status.eq(domain_status_to_entity(status)));
        }
        self.all(query).await
    }

    async fn search_donors(&self, search: &DonorSearch) -> DomainResult<Vec<User>> {
        let mut query = user::Entity::find()
            .filter(user::Column::Role.eq(user::UserRole::Donor))
            .filter(user::Column::Status.eq(user::UserStatus::Active));

        if let Some(group) = search.blood_group {
            query = query.filter(user::Column::BloodGroup.eq(group.as_str()));
        }
        if let Some(ref district) = search.district {
            query = query.filter(user::Column::District.eq(district.as_str()));
        }
        if let Some(ref upazila) = search.upazila {
            query = query.filter(user::Column::Upazila.eq(upazila.as_str()));
        }

        self.all(query).await
    }

    async fn update_profile(
        &self,
        email: &str,
        update: &ProfileUpdate,
    ) -> DomainResult<UpdateSummary> {
        let query = user::Entity::find().filter(user::Column::Email.eq(email));
        self.modify(query, |u| u.apply_profile_update(update)).await
    }

    async fn set_status(&self, id: &str, status: UserStatus) -> DomainResult<UpdateSummary> {
        self.modify(user::Entity::find_by_id(id), |u| u.set_status(status))
            .await
    }

    async fn set_role(&self, id: &str, role: UserRole) -> DomainResult<UpdateSummary> {
        self.modify(user::Entity::find_by_id(id), |u| u.set_role(role))
            .await
    }

    async fn count(&self) -> DomainResult<u64> {
        Ok(user::Entity::find().count(&self.db).await?)
    }
}
