//! SeaORM implementation of RepositoryProvider

use async_trait::async_trait;
use sea_orm::{ConnectionTrait, DatabaseConnection, Statement};

use crate::domain::{
    DomainResult, DonationRequestRepository, FundingRepository, RepositoryProvider,
    UserRepository,
};

use super::donation_request_repository::SeaOrmDonationRequestRepository;
use super::funding_repository::SeaOrmFundingRepository;
use super::user_repository::SeaOrmUserRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let user = repos.users().find_by_email("a@b.c").await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    db: DatabaseConnection,
    users: SeaOrmUserRepository,
    donation_requests: SeaOrmDonationRequestRepository,
    fundings: SeaOrmFundingRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            users: SeaOrmUserRepository::new(db.clone()),
            donation_requests: SeaOrmDonationRequestRepository::new(db.clone()),
            fundings: SeaOrmFundingRepository::new(db.clone()),
            db,
        }
    }
}

#[async_trait]
impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn users(&self) -> &dyn UserRepository {
        &self.users
    }

    fn donation_requests(&self) -> &dyn DonationRequestRepository {
        &self.donation_requests
    }

    fn fundings(&self) -> &dyn FundingRepository {
        &self.fundings
    }

    async fn ping(&self) -> DomainResult<()> {
        self.db
            .execute(Statement::from_string(
                self.db.get_database_backend(),
                "SELECT 1".to_string(),
            ))
            .await?;
        Ok(())
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::*;
    use crate::domain::{
        BloodGroup, DomainError, DonationRequest, DonationRequestFilter, DonationRequestPatch,
        DonationStatus,
        DonorSearch, Funding, NewDonationRequest, NewFunding, NewUser, ProfileUpdate,
        StatusChange, User, UserStatus,
    };
    use crate::infrastructure::database::{init_database, run_migrations, DatabaseConfig};
    use crate::shared::{PaginationParams, UpdateSummary};

    async fn provider() -> SeaOrmRepositoryProvider {
        let db = init_database(&DatabaseConfig::in_memory()).await.unwrap();
        run_migrations(&db).await.unwrap();
        SeaOrmRepositoryProvider::new(db)
    }

    fn user(id: &str, email: &str, group: BloodGroup, district: &str) -> User {
        User::register(
            id,
            NewUser {
                name: format!("User {}", id),
                email: email.into(),
                avatar: None,
                blood_group: Some(group),
                district: Some(district.into()),
                upazila: None,
            },
        )
    }

    fn request(id: &str, owner: &str, minutes_ago: i64) -> DonationRequest {
        let mut r = DonationRequest::open(
            id,
            NewDonationRequest {
                requester_name: None,
                requester_email: owner.into(),
                recipient_name: "Recipient".into(),
                recipient_district: None,
                recipient_upazila: None,
                hospital_name: None,
                full_address: None,
                blood_group: BloodGroup::APositive,
                donation_date: None,
                donation_time: None,
                request_message: None,
            },
        );
        r.created_at = Utc::now() - Duration::minutes(minutes_ago);
        r
    }

    #[tokio::test]
    async fn ping_succeeds() {
        provider().await.ping().await.unwrap();
    }

    #[tokio::test]
    async fn unique_email_index_reports_conflict() {
        let repos = provider().await;
        let users = repos.users();
        users
            .create(user("1", "a@example.com", BloodGroup::OPositive, "Dhaka"))
            .await
            .unwrap();

        let err = users
            .create(user("2", "a@example.com", BloodGroup::OPositive, "Dhaka"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
        assert_eq!(users.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn user_round_trip_and_profile_update() {
        let repos = provider().await;
        let users = repos.users();
        users
            .create(user("1", "a@example.com", BloodGroup::AbNegative, "Dhaka"))
            .await
            .unwrap();

        let summary = users
            .update_profile(
                "a@example.com",
                &ProfileUpdate {
                    upazila: Some("Savar".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(summary, UpdateSummary::matched(true));

        let stored = users.find_by_email("a@example.com").await.unwrap().unwrap();
        assert_eq!(stored.id, "1");
        assert_eq!(stored.blood_group, Some(BloodGroup::AbNegative));
        assert_eq!(stored.upazila.as_deref(), Some("Savar"));

        let missing = users
            .update_profile("nobody@example.com", &ProfileUpdate::default())
            .await
            .unwrap();
        assert_eq!(missing, UpdateSummary::unmatched());
    }

    #[tokio::test]
    async fn donor_search_and_status_filter() {
        let repos = provider().await;
        let users = repos.users();
        users
            .create(user("1", "a@example.com", BloodGroup::OPositive, "Dhaka"))
            .await
            .unwrap();
        users
            .create(user("2", "b@example.com", BloodGroup::OPositive, "Khulna"))
            .await
            .unwrap();
        users
            .create(user("3", "c@example.com", BloodGroup::OPositive, "Dhaka"))
            .await
            .unwrap();
        users.set_status("3", UserStatus::Blocked).await.unwrap();

        let found = users
            .search_donors(&DonorSearch {
                blood_group: Some(BloodGroup::OPositive),
                district: Some("Dhaka".into()),
                upazila: None,
            })
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "1");

        let blocked = users.list(Some(UserStatus::Blocked)).await.unwrap();
        assert_eq!(blocked.len(), 1);
        assert_eq!(users.list(None).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn page_window_and_total() {
        let repos = provider().await;
        let requests = repos.donation_requests();
        for i in 0..25 {
            requests
                .create(request(&format!("r{:02}", i), "owner@example.com", i))
                .await
                .unwrap();
        }
        requests
            .create(request("other", "other@example.com", 0))
            .await
            .unwrap();

        let filter = DonationRequestFilter {
            requester_email: Some("owner@example.com".into()),
            status: None,
        };
        let page = requests
            .find_page(&filter, PaginationParams::new(2, 10))
            .await
            .unwrap();

        assert_eq!(page.total, 25);
        let ids: Vec<_> = page.items.iter().map(|r| r.id.as_str()).collect();
        let expected: Vec<String> = (10..20).map(|i| format!("r{:02}", i)).collect();
        assert_eq!(ids, expected);
    }

    #[tokio::test]
    async fn status_change_persists_donor() {
        let repos = provider().await;
        let requests = repos.donation_requests();
        requests.create(request("r1", "o@example.com", 0)).await.unwrap();

        let summary = requests
            .set_status(
                "r1",
                &StatusChange {
                    status: DonationStatus::InProgress,
                    donor_name: Some("D".into()),
                    donor_email: Some("d@example.com".into()),
                },
                None,
            )
            .await
            .unwrap();
        assert_eq!(summary, UpdateSummary::matched(true));

        let stored = requests.find_by_id("r1").await.unwrap().unwrap();
        assert_eq!(stored.status, DonationStatus::InProgress);
        assert_eq!(stored.donor_email.as_deref(), Some("d@example.com"));

        assert_eq!(requests.delete("r1").await.unwrap().deleted, 1);
        assert_eq!(requests.delete("r1").await.unwrap().deleted, 0);
    }

    #[tokio::test]
    async fn concurrent_detail_edit_and_status_change_both_land() {
        let repos = provider().await;
        let requests = repos.donation_requests();

        for i in 0..20 {
            let id = format!("c{:02}", i);
            requests.create(request(&id, "o@example.com", 0)).await.unwrap();

            let hospital = format!("Hospital {}", i);
            let patch = DonationRequestPatch {
                hospital_name: Some(hospital.clone()),
                ..Default::default()
            };
            let change = StatusChange {
                status: DonationStatus::InProgress,
                donor_name: Some("D".into()),
                donor_email: Some("d@example.com".into()),
            };

            let (edited, moved) = tokio::join!(
                requests.update(&id, &patch),
                requests.set_status(&id, &change, None)
            );
            assert_eq!(edited.unwrap(), UpdateSummary::matched(true));
            assert_eq!(moved.unwrap(), UpdateSummary::matched(true));

            let stored = requests.find_by_id(&id).await.unwrap().unwrap();
            assert_eq!(stored.hospital_name.as_deref(), Some(hospital.as_str()));
            assert_eq!(stored.status, DonationStatus::InProgress);
            assert_eq!(stored.donor_email.as_deref(), Some("d@example.com"));
        }
    }

    #[tokio::test]
    async fn concurrent_profile_edit_and_block_both_land() {
        let repos = provider().await;
        let users = repos.users();
        users
            .create(user("u1", "a@example.com", BloodGroup::ONegative, "Dhaka"))
            .await
            .unwrap();

        let update = ProfileUpdate {
            district: Some("Khulna".into()),
            ..Default::default()
        };
        let (edited, blocked) = tokio::join!(
            users.update_profile("a@example.com", &update),
            users.set_status("u1", UserStatus::Blocked)
        );
        assert_eq!(edited.unwrap(), UpdateSummary::matched(true));
        assert_eq!(blocked.unwrap(), UpdateSummary::matched(true));

        let stored = users.find_by_id("u1").await.unwrap().unwrap();
        assert_eq!(stored.district.as_deref(), Some("Khulna"));
        assert_eq!(stored.status, UserStatus::Blocked);
        assert_eq!(stored.email, "a@example.com");
    }

    #[tokio::test]
    async fn status_write_with_stale_expectation_matches_nothing() {
        let repos = provider().await;
        let requests = repos.donation_requests();
        requests.create(request("g1", "o@example.com", 0)).await.unwrap();

        let start = StatusChange::to(DonationStatus::InProgress);
        requests
            .set_status("g1", &start, Some(DonationStatus::Pending))
            .await
            .unwrap();

        let summary = requests
            .set_status(
                "g1",
                &StatusChange::to(DonationStatus::Canceled),
                Some(DonationStatus::Pending),
            )
            .await
            .unwrap();
        assert_eq!(summary, UpdateSummary::unmatched());

        let stored = requests.find_by_id("g1").await.unwrap().unwrap();
        assert_eq!(stored.status, DonationStatus::InProgress);
    }

    #[tokio::test]
    async fn funding_sum() {
        let repos = provider().await;
        let fundings = repos.fundings();
        assert_eq!(fundings.total_amount().await.unwrap(), 0);

        for (i, amount) in [1500_i64, 2500].into_iter().enumerate() {
            fundings
                .create(Funding::record(
                    format!("f{}", i),
                    NewFunding {
                        funder_name: "F".into(),
                        funder_email: "f@example.com".into(),
                        amount,
                    },
                ))
                .await
                .unwrap();
        }
        assert_eq!(fundings.total_amount().await.unwrap(), 4000);
    }
}
