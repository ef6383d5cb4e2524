//! Create donation_requests table
//!
//! `requester_email` references users by value only; deleting a user does
//! not touch their requests.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(DonationRequests::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DonationRequests::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(DonationRequests::RequesterName).string_len(255).null())
                    .col(
                        ColumnDef::new(DonationRequests::RequesterEmail)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DonationRequests::RecipientName)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(ColumnDef::new(DonationRequests::RecipientDistrict).string_len(100).null())
                    .col(ColumnDef::new(DonationRequests::RecipientUpazila).string_len(100).null())
                    .col(ColumnDef::new(DonationRequests::HospitalName).string_len(255).null())
                    .col(ColumnDef::new(DonationRequests::FullAddress).text().null())
                    .col(
                        ColumnDef::new(DonationRequests::BloodGroup)
                            .string_len(3)
                            .not_null(),
                    )
                    .col(ColumnDef::new(DonationRequests::DonationDate).date().null())
                    .col(ColumnDef::new(DonationRequests::DonationTime).string_len(20).null())
                    .col(ColumnDef::new(DonationRequests::RequestMessage).text().null())
                    .col(
                        ColumnDef::new(DonationRequests::Status)
                            .string_len(20)
                            .not_null()
                            .default("pending"),
                    )
                    .col(ColumnDef::new(DonationRequests::DonorName).string_len(255).null())
                    .col(ColumnDef::new(DonationRequests::DonorEmail).string_len(255).null())
                    .col(
                        ColumnDef::new(DonationRequests::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DonationRequests::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_donation_requests_requester")
                    .table(DonationRequests::Table)
                    .col(DonationRequests::RequesterEmail)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_donation_requests_status")
                    .table(DonationRequests::Table)
                    .col(DonationRequests::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_donation_requests_created_at")
                    .table(DonationRequests::Table)
                    .col(DonationRequests::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(DonationRequests::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum DonationRequests {
    Table,
    Id,
    RequesterName,
    RequesterEmail,
    RecipientName,
    RecipientDistrict,
    RecipientUpazila,
    HospitalName,
    FullAddress,
    BloodGroup,
    DonationDate,
    DonationTime,
    RequestMessage,
    Status,
    DonorName,
    DonorEmail,
    CreatedAt,
    UpdatedAt,
}
