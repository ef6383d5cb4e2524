use std::sync::Arc;

use crate::domain::{DomainResult, RepositoryProvider};

/// Platform-wide totals
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformStats {
    pub total_users: u64,
    pub total_requests: u64,
    /// Sum of every funding amount, minor units.
    pub total_funding: i64,
}

pub struct ReportingService {
    repos: Arc<dyn RepositoryProvider>,
}

impl ReportingService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn stats(&self) -> DomainResult<PlatformStats> {
        let (total_users, total_requests, total_funding) = tokio::try_join!(
            self.repos.users().count(),
            self.repos.donation_requests().count(),
            self.repos.fundings().total_amount(),
        )?;

        Ok(PlatformStats {
            total_users,
            total_requests,
            total_funding,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Funding, NewFunding, NewUser, User};
    use crate::infrastructure::InMemoryStorage;
    use crate::shared::new_record_id;

    #[tokio::test]
    async fn empty_store_reports_zeroes() {
        let svc = ReportingService::new(Arc::new(InMemoryStorage::new()));
        assert_eq!(
            svc.stats().await.unwrap(),
            PlatformStats {
                total_users: 0,
                total_requests: 0,
                total_funding: 0,
            }
        );
    }

    #[tokio::test]
    async fn totals_reflect_store() {
        let storage = Arc::new(InMemoryStorage::new());
        for email in ["a@example.com", "b@example.com"] {
            let user = User::register(
                new_record_id(),
                NewUser {
                    name: "U".into(),
                    email: email.into(),
                    avatar: None,
                    blood_group: None,
                    district: None,
                    upazila: None,
                },
            );
            storage.users().create(user).await.unwrap();
        }
        for amount in [1000, 250] {
            let funding = Funding::record(
                new_record_id(),
                NewFunding {
                    funder_name: "F".into(),
                    funder_email: "f@example.com".into(),
                    amount,
                },
            );
            storage.fundings().create(funding).await.unwrap();
        }

        let stats = ReportingService::new(storage).stats().await.unwrap();
        assert_eq!(stats.total_users, 2);
        assert_eq!(stats.total_requests, 0);
        assert_eq!(stats.total_funding, 1250);
    }
}
