//! Database migrations for the claims service

use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250115_000001_create_claims::Migration),
            Box::new(m20250115_000002_create_participants_drivers::Migration),
            Box::new(m20250115_000003_create_claim_children::Migration),
            Box::new(m20250115_000004_create_documents_notes::Migration),
        ]
    }
}

mod m20250115_000001_create_claims {
    use super::*;

    pub struct Migration;

    // Inline migration modules share this file's stem, so the name must be
    // spelled out; a derived name would collide in seaql_migrations.
    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250115_000001_create_claims"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Claims::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Claims::Id).uuid().not_null().primary_key())
                        .col(ColumnDef::new(Claims::ClaimNumber).string())
                        .col(ColumnDef::new(Claims::Status).string().not_null())
                        .col(ColumnDef::new(Claims::IsDraft).boolean().not_null())
                        .col(ColumnDef::new(Claims::CaseHandlerId).big_integer())
                        .col(ColumnDef::new(Claims::RegisteredById).big_integer())
                        .col(ColumnDef::new(Claims::OwnerName).string())
                        .col(ColumnDef::new(Claims::CorrespondenceEmail).string())
                        .col(ColumnDef::new(Claims::PolicyNumber).string())
                        .col(ColumnDef::new(Claims::VehicleRegistration).string())
                        .col(ColumnDef::new(Claims::PlaceOfAccident).string())
                        .col(ColumnDef::new(Claims::Description).text())
                        .col(ColumnDef::new(Claims::DateOfAccident).date())
                        .col(ColumnDef::new(Claims::ReserveAmount).decimal())
                        .col(
                            ColumnDef::new(Claims::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Claims::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_claims_case_handler_id")
                        .table(Claims::Table)
                        .col(Claims::CaseHandlerId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_claims_registered_by_id")
                        .table(Claims::Table)
                        .col(Claims::RegisteredById)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_claims_claim_number")
                        .table(Claims::Table)
                        .col(Claims::ClaimNumber)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Claims::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Claims {
        Table,
        Id,
        ClaimNumber,
        Status,
        IsDraft,
        CaseHandlerId,
        RegisteredById,
        OwnerName,
        CorrespondenceEmail,
        PolicyNumber,
        VehicleRegistration,
        PlaceOfAccident,
        Description,
        DateOfAccident,
        ReserveAmount,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20250115_000002_create_participants_drivers {
    use super::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250115_000002_create_participants_drivers"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Participants::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Participants::Id)
                                .uuid()
                                .not_null()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Participants::ClaimId).uuid().not_null())
                        .col(ColumnDef::new(Participants::Role).string().not_null())
                        .col(ColumnDef::new(Participants::FirstName).string())
                        .col(ColumnDef::new(Participants::LastName).string())
                        .col(ColumnDef::new(Participants::Email).string())
                        .col(ColumnDef::new(Participants::Phone).string())
                        .col(ColumnDef::new(Participants::Address).string())
                        .col(ColumnDef::new(Participants::VehicleMake).string())
                        .col(ColumnDef::new(Participants::VehicleRegistration).string())
                        .col(ColumnDef::new(Participants::PolicyNumber).string())
                        .col(ColumnDef::new(Participants::PolicyDealDate).date())
                        .col(ColumnDef::new(Participants::PolicyStartDate).date())
                        .col(ColumnDef::new(Participants::PolicyEndDate).date())
                        .col(ColumnDef::new(Participants::PolicySumAmount).decimal())
                        .col(
                            ColumnDef::new(Participants::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Participants::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_participants_claim")
                                .from(Participants::Table, Participants::ClaimId)
                                .to(Claims::Table, Claims::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_participants_claim_id")
                        .table(Participants::Table)
                        .col(Participants::ClaimId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Drivers::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Drivers::Id).uuid().not_null().primary_key())
                        .col(ColumnDef::new(Drivers::ClaimId).uuid().not_null())
                        .col(ColumnDef::new(Drivers::ParticipantId).uuid().not_null())
                        .col(ColumnDef::new(Drivers::FirstName).string())
                        .col(ColumnDef::new(Drivers::LastName).string())
                        .col(ColumnDef::new(Drivers::Email).string())
                        .col(ColumnDef::new(Drivers::Phone).string())
                        .col(ColumnDef::new(Drivers::LicenseNumber).string())
                        .col(
                            ColumnDef::new(Drivers::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Drivers::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_drivers_claim")
                                .from(Drivers::Table, Drivers::ClaimId)
                                .to(Claims::Table, Claims::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_drivers_participant")
                                .from(Drivers::Table, Drivers::ParticipantId)
                                .to(Participants::Table, Participants::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_drivers_claim_id")
                        .table(Drivers::Table)
                        .col(Drivers::ClaimId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_drivers_participant_id")
                        .table(Drivers::Table)
                        .col(Drivers::ParticipantId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Drivers::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Participants::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Participants {
        Table,
        Id,
        ClaimId,
        Role,
        FirstName,
        LastName,
        Email,
        Phone,
        Address,
        VehicleMake,
        VehicleRegistration,
        PolicyNumber,
        PolicyDealDate,
        PolicyStartDate,
        PolicyEndDate,
        PolicySumAmount,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    enum Drivers {
        Table,
        Id,
        ClaimId,
        ParticipantId,
        FirstName,
        LastName,
        Email,
        Phone,
        LicenseNumber,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    enum Claims {
        Table,
        Id,
    }
}

mod m20250115_000003_create_claim_children {
    use super::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250115_000003_create_claim_children"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Damages::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Damages::Id).uuid().not_null().primary_key())
                        .col(ColumnDef::new(Damages::ClaimId).uuid().not_null())
                        .col(ColumnDef::new(Damages::Description).text())
                        .col(ColumnDef::new(Damages::Amount).decimal())
                        .col(ColumnDef::new(Damages::DocumentPath).string())
                        .col(ColumnDef::new(Damages::DocumentName).string())
                        .col(ColumnDef::new(Damages::DocumentDescription).string())
                        .col(
                            ColumnDef::new(Damages::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Damages::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_damages_claim")
                                .from(Damages::Table, Damages::ClaimId)
                                .to(Claims::Table, Claims::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_damages_claim_id")
                        .table(Damages::Table)
                        .col(Damages::ClaimId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Decisions::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Decisions::Id)
                                .uuid()
                                .not_null()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Decisions::ClaimId).uuid().not_null())
                        .col(ColumnDef::new(Decisions::DecisionNumber).string())
                        .col(ColumnDef::new(Decisions::DecisionDate).date())
                        .col(ColumnDef::new(Decisions::Amount).decimal())
                        .col(ColumnDef::new(Decisions::DocumentPath).string())
                        .col(ColumnDef::new(Decisions::DocumentName).string())
                        .col(ColumnDef::new(Decisions::DocumentDescription).string())
                        .col(
                            ColumnDef::new(Decisions::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Decisions::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_decisions_claim")
                                .from(Decisions::Table, Decisions::ClaimId)
                                .to(Claims::Table, Claims::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_decisions_claim_id")
                        .table(Decisions::Table)
                        .col(Decisions::ClaimId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Recourses::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Recourses::Id)
                                .uuid()
                                .not_null()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Recourses::ClaimId).uuid().not_null())
                        .col(ColumnDef::new(Recourses::RecourseDate).date())
                        .col(ColumnDef::new(Recourses::Amount).decimal())
                        .col(ColumnDef::new(Recourses::Basis).string())
                        .col(ColumnDef::new(Recourses::DocumentPath).string())
                        .col(ColumnDef::new(Recourses::DocumentName).string())
                        .col(ColumnDef::new(Recourses::DocumentDescription).string())
                        .col(
                            ColumnDef::new(Recourses::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Recourses::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_recourses_claim")
                                .from(Recourses::Table, Recourses::ClaimId)
                                .to(Claims::Table, Claims::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_recourses_claim_id")
                        .table(Recourses::Table)
                        .col(Recourses::ClaimId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Settlements::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Settlements::Id)
                                .uuid()
                                .not_null()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Settlements::ClaimId).uuid().not_null())
                        .col(ColumnDef::new(Settlements::Amount).decimal().not_null())
                        .col(ColumnDef::new(Settlements::Currency).string())
                        .col(ColumnDef::new(Settlements::SettlementDate).date())
                        // Weak reference to client_claims by value; no fk.
                        .col(ColumnDef::new(Settlements::ClientClaimId).uuid())
                        .col(ColumnDef::new(Settlements::DocumentPath).string())
                        .col(ColumnDef::new(Settlements::DocumentName).string())
                        .col(ColumnDef::new(Settlements::DocumentDescription).string())
                        .col(
                            ColumnDef::new(Settlements::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Settlements::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_settlements_claim")
                                .from(Settlements::Table, Settlements::ClaimId)
                                .to(Claims::Table, Claims::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_settlements_claim_id")
                        .table(Settlements::Table)
                        .col(Settlements::ClaimId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Appeals::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Appeals::Id).uuid().not_null().primary_key())
                        .col(ColumnDef::new(Appeals::ClaimId).uuid().not_null())
                        .col(ColumnDef::new(Appeals::AppealDate).date())
                        .col(ColumnDef::new(Appeals::CourtName).string())
                        .col(ColumnDef::new(Appeals::Notes).text())
                        .col(ColumnDef::new(Appeals::DocumentPath).string())
                        .col(ColumnDef::new(Appeals::DocumentName).string())
                        .col(ColumnDef::new(Appeals::DocumentDescription).string())
                        .col(
                            ColumnDef::new(Appeals::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Appeals::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_appeals_claim")
                                .from(Appeals::Table, Appeals::ClaimId)
                                .to(Claims::Table, Claims::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_appeals_claim_id")
                        .table(Appeals::Table)
                        .col(Appeals::ClaimId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(ClientClaims::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(ClientClaims::Id)
                                .uuid()
                                .not_null()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(ClientClaims::ClaimId).uuid().not_null())
                        .col(ColumnDef::new(ClientClaims::ClaimNumber).string())
                        .col(ColumnDef::new(ClientClaims::Amount).decimal())
                        .col(ColumnDef::new(ClientClaims::StatusNote).string())
                        .col(ColumnDef::new(ClientClaims::DocumentPath).string())
                        .col(ColumnDef::new(ClientClaims::DocumentName).string())
                        .col(ColumnDef::new(ClientClaims::DocumentDescription).string())
                        .col(
                            ColumnDef::new(ClientClaims::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ClientClaims::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_client_claims_claim")
                                .from(ClientClaims::Table, ClientClaims::ClaimId)
                                .to(Claims::Table, Claims::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_client_claims_claim_id")
                        .table(ClientClaims::Table)
                        .col(ClientClaims::ClaimId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(ClientClaims::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Appeals::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Settlements::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Recourses::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Decisions::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Damages::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Damages {
        Table,
        Id,
        ClaimId,
        Description,
        Amount,
        DocumentPath,
        DocumentName,
        DocumentDescription,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    enum Decisions {
        Table,
        Id,
        ClaimId,
        DecisionNumber,
        DecisionDate,
        Amount,
        DocumentPath,
        DocumentName,
        DocumentDescription,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    enum Recourses {
        Table,
        Id,
        ClaimId,
        RecourseDate,
        Amount,
        Basis,
        DocumentPath,
        DocumentName,
        DocumentDescription,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    enum Settlements {
        Table,
        Id,
        ClaimId,
        Amount,
        Currency,
        SettlementDate,
        ClientClaimId,
        DocumentPath,
        DocumentName,
        DocumentDescription,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    enum Appeals {
        Table,
        Id,
        ClaimId,
        AppealDate,
        CourtName,
        Notes,
        DocumentPath,
        DocumentName,
        DocumentDescription,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    enum ClientClaims {
        Table,
        Id,
        ClaimId,
        ClaimNumber,
        Amount,
        StatusNote,
        DocumentPath,
        DocumentName,
        DocumentDescription,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    enum Claims {
        Table,
        Id,
    }
}

mod m20250115_000004_create_documents_notes {
    use super::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250115_000004_create_documents_notes"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Documents::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Documents::Id)
                                .uuid()
                                .not_null()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Documents::ClaimId).uuid().not_null())
                        .col(ColumnDef::new(Documents::Path).string().not_null())
                        .col(ColumnDef::new(Documents::Name).string())
                        .col(ColumnDef::new(Documents::Description).string())
                        .col(
                            ColumnDef::new(Documents::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Documents::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_documents_claim")
                                .from(Documents::Table, Documents::ClaimId)
                                .to(Claims::Table, Claims::Id)
                                .on_delete(ForeignKeyAction::Restrict),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_documents_claim_id")
                        .table(Documents::Table)
                        .col(Documents::ClaimId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Notes::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Notes::Id).uuid().not_null().primary_key())
                        .col(ColumnDef::new(Notes::ClaimId).uuid().not_null())
                        .col(ColumnDef::new(Notes::Content).text().not_null())
                        .col(ColumnDef::new(Notes::Author).string())
                        .col(
                            ColumnDef::new(Notes::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Notes::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_notes_claim")
                                .from(Notes::Table, Notes::ClaimId)
                                .to(Claims::Table, Claims::Id)
                                .on_delete(ForeignKeyAction::Restrict),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_notes_claim_id")
                        .table(Notes::Table)
                        .col(Notes::ClaimId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Notes::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Documents::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Documents {
        Table,
        Id,
        ClaimId,
        Path,
        Name,
        Description,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    enum Notes {
        Table,
        Id,
        ClaimId,
        Content,
        Author,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    enum Claims {
        Table,
        Id,
    }
}
