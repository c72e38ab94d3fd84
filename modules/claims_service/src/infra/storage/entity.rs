//! SeaORM entities for database tables
//!
//! One table per child kind. Strongly-owned children cascade from the claim
//! root; documents and notes restrict the delete instead.

use sea_orm::entity::prelude::*;

/// Claims table entity (aggregate root)
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "claims")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub claim_number: Option<String>,
    /// Closed status set, stored as its string form
    pub status: String,
    pub is_draft: bool,
    pub case_handler_id: Option<i64>,
    pub registered_by_id: Option<i64>,
    pub owner_name: Option<String>,
    pub correspondence_email: Option<String>,
    pub policy_number: Option<String>,
    pub vehicle_registration: Option<String>,
    pub place_of_accident: Option<String>,
    pub description: Option<String>,
    pub date_of_accident: Option<Date>,
    pub reserve_amount: Option<Decimal>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "participant::Entity")]
    Participant,
    #[sea_orm(has_many = "driver::Entity")]
    Driver,
    #[sea_orm(has_many = "damage::Entity")]
    Damage,
    #[sea_orm(has_many = "decision::Entity")]
    Decision,
    #[sea_orm(has_many = "recourse::Entity")]
    Recourse,
    #[sea_orm(has_many = "settlement::Entity")]
    Settlement,
    #[sea_orm(has_many = "appeal::Entity")]
    Appeal,
    #[sea_orm(has_many = "client_claim::Entity")]
    ClientClaim,
    #[sea_orm(has_many = "document::Entity")]
    Document,
    #[sea_orm(has_many = "note::Entity")]
    Note,
}

impl Related<participant::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Participant.def()
    }
}

impl Related<damage::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Damage.def()
    }
}

impl Related<settlement::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Settlement.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Participants table
pub mod participant {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
    #[sea_orm(table_name = "participants")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub claim_id: Uuid,
        /// Closed role set, stored as its string form
        pub role: String,
        pub first_name: Option<String>,
        pub last_name: Option<String>,
        pub email: Option<String>,
        pub phone: Option<String>,
        pub address: Option<String>,
        pub vehicle_make: Option<String>,
        pub vehicle_registration: Option<String>,
        pub policy_number: Option<String>,
        pub policy_deal_date: Option<Date>,
        pub policy_start_date: Option<Date>,
        pub policy_end_date: Option<Date>,
        pub policy_sum_amount: Option<Decimal>,
        pub created_at: DateTimeUtc,
        pub updated_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::Entity",
            from = "Column::ClaimId",
            to = "super::Column::Id",
            on_delete = "Cascade"
        )]
        Claim,
        #[sea_orm(has_many = "super::driver::Entity")]
        Driver,
    }

    impl Related<super::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Claim.def()
        }
    }

    impl Related<super::driver::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Driver.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Drivers table; carries both the participant fk and the denormalized
/// claim id the reconciler keeps consistent
pub mod driver {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
    #[sea_orm(table_name = "drivers")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub claim_id: Uuid,
        pub participant_id: Uuid,
        pub first_name: Option<String>,
        pub last_name: Option<String>,
        pub email: Option<String>,
        pub phone: Option<String>,
        pub license_number: Option<String>,
        pub created_at: DateTimeUtc,
        pub updated_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::Entity",
            from = "Column::ClaimId",
            to = "super::Column::Id",
            on_delete = "Cascade"
        )]
        Claim,
        #[sea_orm(
            belongs_to = "super::participant::Entity",
            from = "Column::ParticipantId",
            to = "super::participant::Column::Id",
            on_delete = "Cascade"
        )]
        Participant,
    }

    impl Related<super::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Claim.def()
        }
    }

    impl Related<super::participant::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Participant.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Damages table
pub mod damage {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
    #[sea_orm(table_name = "damages")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub claim_id: Uuid,
        pub description: Option<String>,
        pub amount: Option<Decimal>,
        pub document_path: Option<String>,
        pub document_name: Option<String>,
        pub document_description: Option<String>,
        pub created_at: DateTimeUtc,
        pub updated_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::Entity",
            from = "Column::ClaimId",
            to = "super::Column::Id",
            on_delete = "Cascade"
        )]
        Claim,
    }

    impl Related<super::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Claim.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Decisions table
pub mod decision {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
    #[sea_orm(table_name = "decisions")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub claim_id: Uuid,
        pub decision_number: Option<String>,
        pub decision_date: Option<Date>,
        pub amount: Option<Decimal>,
        pub document_path: Option<String>,
        pub document_name: Option<String>,
        pub document_description: Option<String>,
        pub created_at: DateTimeUtc,
        pub updated_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::Entity",
            from = "Column::ClaimId",
            to = "super::Column::Id",
            on_delete = "Cascade"
        )]
        Claim,
    }

    impl Related<super::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Claim.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Recourses table
pub mod recourse {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
    #[sea_orm(table_name = "recourses")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub claim_id: Uuid,
        pub recourse_date: Option<Date>,
        pub amount: Option<Decimal>,
        pub basis: Option<String>,
        pub document_path: Option<String>,
        pub document_name: Option<String>,
        pub document_description: Option<String>,
        pub created_at: DateTimeUtc,
        pub updated_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::Entity",
            from = "Column::ClaimId",
            to = "super::Column::Id",
            on_delete = "Cascade"
        )]
        Claim,
    }

    impl Related<super::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Claim.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Settlements table. `client_claim_id` is a weak reference - deliberately
/// no foreign key to client_claims.
pub mod settlement {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
    #[sea_orm(table_name = "settlements")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub claim_id: Uuid,
        pub amount: Decimal,
        pub currency: Option<String>,
        pub settlement_date: Option<Date>,
        pub client_claim_id: Option<Uuid>,
        pub document_path: Option<String>,
        pub document_name: Option<String>,
        pub document_description: Option<String>,
        pub created_at: DateTimeUtc,
        pub updated_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::Entity",
            from = "Column::ClaimId",
            to = "super::Column::Id",
            on_delete = "Cascade"
        )]
        Claim,
    }

    impl Related<super::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Claim.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Appeals table
pub mod appeal {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
    #[sea_orm(table_name = "appeals")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub claim_id: Uuid,
        pub appeal_date: Option<Date>,
        pub court_name: Option<String>,
        pub notes: Option<String>,
        pub document_path: Option<String>,
        pub document_name: Option<String>,
        pub document_description: Option<String>,
        pub created_at: DateTimeUtc,
        pub updated_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::Entity",
            from = "Column::ClaimId",
            to = "super::Column::Id",
            on_delete = "Cascade"
        )]
        Claim,
    }

    impl Related<super::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Claim.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Client claims table
pub mod client_claim {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
    #[sea_orm(table_name = "client_claims")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub claim_id: Uuid,
        pub claim_number: Option<String>,
        pub amount: Option<Decimal>,
        pub status_note: Option<String>,
        pub document_path: Option<String>,
        pub document_name: Option<String>,
        pub document_description: Option<String>,
        pub created_at: DateTimeUtc,
        pub updated_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::Entity",
            from = "Column::ClaimId",
            to = "super::Column::Id",
            on_delete = "Cascade"
        )]
        Claim,
    }

    impl Related<super::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Claim.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Documents table - restricted child, blocks root deletion
pub mod document {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
    #[sea_orm(table_name = "documents")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub claim_id: Uuid,
        pub path: String,
        pub name: Option<String>,
        pub description: Option<String>,
        pub created_at: DateTimeUtc,
        pub updated_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::Entity",
            from = "Column::ClaimId",
            to = "super::Column::Id",
            on_delete = "Restrict"
        )]
        Claim,
    }

    impl Related<super::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Claim.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Notes table - restricted child, blocks root deletion
pub mod note {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
    #[sea_orm(table_name = "notes")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub claim_id: Uuid,
        pub content: String,
        pub author: Option<String>,
        pub created_at: DateTimeUtc,
        pub updated_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::Entity",
            from = "Column::ClaimId",
            to = "super::Column::Id",
            on_delete = "Restrict"
        )]
        Claim,
    }

    impl Related<super::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Claim.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}
