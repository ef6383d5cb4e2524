//! Donation request entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Donation request lifecycle stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum DonationStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "inprogress")]
    InProgress,
    #[sea_orm(string_value = "done")]
    Done,
    #[sea_orm(string_value = "canceled")]
    Canceled,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "donation_requests")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    #[sea_orm(nullable)]
    pub requester_name: Option<String>,
    /// Owner reference by value (users.email); not a foreign key
    pub requester_email: String,

    pub recipient_name: String,
    #[sea_orm(nullable)]
    pub recipient_district: Option<String>,
    #[sea_orm(nullable)]
    pub recipient_upazila: Option<String>,
    #[sea_orm(nullable)]
    pub hospital_name: Option<String>,
    #[sea_orm(nullable)]
    pub full_address: Option<String>,

    pub blood_group: String,
    #[sea_orm(nullable)]
    pub donation_date: Option<Date>,
    #[sea_orm(nullable)]
    pub donation_time: Option<String>,
    #[sea_orm(nullable)]
    pub request_message: Option<String>,

    pub status: DonationStatus,
    #[sea_orm(nullable)]
    pub donor_name: Option<String>,
    #[sea_orm(nullable)]
    pub donor_email: Option<String>,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
