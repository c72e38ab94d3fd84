//! SeaORM repository implementation for the claim aggregate

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{bail, Result};
use async_trait::async_trait;
use sea_orm::sea_query::{Expr, Func, LikeExpr};
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, Order, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, TransactionTrait,
};
use uuid::Uuid;

use crate::contract::model::{Claim, Driver};
use crate::domain::filter::{ClaimFilter, ClaimSummary, Page, PageRequest, SortKey};
use crate::domain::reconcile::{Change, ClaimChangeSet};
use crate::domain::repository::ClaimsRepository;

use super::entity;

pub struct SeaOrmClaimsRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmClaimsRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

/// The search term is a literal substring, so LIKE metacharacters in user
/// input must not act as wildcards.
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

// Inserts and updates come out in patch order; unmatched rows are deleted
// in one statement per table.
macro_rules! apply_collection {
    ($txn:expr, $reconciled:expr, $module:ident) => {{
        for change in &$reconciled.changes {
            let active: entity::$module::ActiveModel = change.record().into();
            match change {
                Change::Insert(_) => {
                    entity::$module::Entity::insert(active).exec($txn).await?;
                }
                Change::Update(_) => {
                    entity::$module::Entity::update(active).exec($txn).await?;
                }
            }
        }
        if !$reconciled.stale_ids.is_empty() {
            entity::$module::Entity::delete_many()
                .filter(entity::$module::Column::Id.is_in($reconciled.stale_ids.iter().copied()))
                .exec($txn)
                .await?;
        }
    }};
}

#[async_trait]
impl ClaimsRepository for SeaOrmClaimsRepository {
    async fn load(&self, id: Uuid) -> Result<Option<Claim>> {
        let Some(root) = entity::Entity::find_by_id(id).one(&*self.db).await? else {
            return Ok(None);
        };
        let mut claim = Claim::try_from(root)?;

        let participant_rows = entity::participant::Entity::find()
            .filter(entity::participant::Column::ClaimId.eq(id))
            .order_by_asc(entity::participant::Column::CreatedAt)
            .order_by_asc(entity::participant::Column::Id)
            .all(&*self.db)
            .await?;
        claim.participants = participant_rows
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<_>>>()?;

        let driver_rows = entity::driver::Entity::find()
            .filter(entity::driver::Column::ClaimId.eq(id))
            .order_by_asc(entity::driver::Column::CreatedAt)
            .order_by_asc(entity::driver::Column::Id)
            .all(&*self.db)
            .await?;
        let mut drivers_by_participant: HashMap<Uuid, Vec<Driver>> = HashMap::new();
        for row in driver_rows {
            drivers_by_participant
                .entry(row.participant_id)
                .or_default()
                .push(row.into());
        }
        for participant in &mut claim.participants {
            participant.drivers = drivers_by_participant
                .remove(&participant.id)
                .unwrap_or_default();
        }

        claim.damages = entity::damage::Entity::find()
            .filter(entity::damage::Column::ClaimId.eq(id))
            .order_by_asc(entity::damage::Column::CreatedAt)
            .order_by_asc(entity::damage::Column::Id)
            .all(&*self.db)
            .await?
            .into_iter()
            .map(Into::into)
            .collect();

        claim.decisions = entity::decision::Entity::find()
            .filter(entity::decision::Column::ClaimId.eq(id))
            .order_by_asc(entity::decision::Column::CreatedAt)
            .order_by_asc(entity::decision::Column::Id)
            .all(&*self.db)
            .await?
            .into_iter()
            .map(Into::into)
            .collect();

        claim.recourses = entity::recourse::Entity::find()
            .filter(entity::recourse::Column::ClaimId.eq(id))
            .order_by_asc(entity::recourse::Column::CreatedAt)
            .order_by_asc(entity::recourse::Column::Id)
            .all(&*self.db)
            .await?
            .into_iter()
            .map(Into::into)
            .collect();

        claim.settlements = entity::settlement::Entity::find()
            .filter(entity::settlement::Column::ClaimId.eq(id))
            .order_by_asc(entity::settlement::Column::CreatedAt)
            .order_by_asc(entity::settlement::Column::Id)
            .all(&*self.db)
            .await?
            .into_iter()
            .map(Into::into)
            .collect();

        claim.appeals = entity::appeal::Entity::find()
            .filter(entity::appeal::Column::ClaimId.eq(id))
            .order_by_asc(entity::appeal::Column::CreatedAt)
            .order_by_asc(entity::appeal::Column::Id)
            .all(&*self.db)
            .await?
            .into_iter()
            .map(Into::into)
            .collect();

        claim.client_claims = entity::client_claim::Entity::find()
            .filter(entity::client_claim::Column::ClaimId.eq(id))
            .order_by_asc(entity::client_claim::Column::CreatedAt)
            .order_by_asc(entity::client_claim::Column::Id)
            .all(&*self.db)
            .await?
            .into_iter()
            .map(Into::into)
            .collect();

        claim.documents = entity::document::Entity::find()
            .filter(entity::document::Column::ClaimId.eq(id))
            .order_by_asc(entity::document::Column::CreatedAt)
            .order_by_asc(entity::document::Column::Id)
            .all(&*self.db)
            .await?
            .into_iter()
            .map(Into::into)
            .collect();

        claim.notes = entity::note::Entity::find()
            .filter(entity::note::Column::ClaimId.eq(id))
            .order_by_asc(entity::note::Column::CreatedAt)
            .order_by_asc(entity::note::Column::Id)
            .all(&*self.db)
            .await?
            .into_iter()
            .map(Into::into)
            .collect();

        Ok(Some(claim))
    }

    async fn apply(&self, change_set: ClaimChangeSet) -> Result<()> {
        let txn = self.db.begin().await?;

        let root_active: entity::ActiveModel = change_set.root.record().into();
        match &change_set.root {
            Change::Insert(_) => {
                entity::Entity::insert(root_active).exec(&txn).await?;
            }
            Change::Update(_) => {
                entity::Entity::update(root_active).exec(&txn).await?;
            }
        }

        // Participants before drivers so inserted drivers find their parent
        // row; stale participant deletes cascade to their drivers.
        apply_collection!(&txn, change_set.participants, participant);
        apply_collection!(&txn, change_set.drivers, driver);
        apply_collection!(&txn, change_set.damages, damage);
        apply_collection!(&txn, change_set.decisions, decision);
        apply_collection!(&txn, change_set.recourses, recourse);
        apply_collection!(&txn, change_set.settlements, settlement);
        apply_collection!(&txn, change_set.appeals, appeal);
        apply_collection!(&txn, change_set.client_claims, client_claim);

        txn.commit().await?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let documents = entity::document::Entity::find()
            .filter(entity::document::Column::ClaimId.eq(id))
            .count(&*self.db)
            .await?;
        let notes = entity::note::Entity::find()
            .filter(entity::note::Column::ClaimId.eq(id))
            .count(&*self.db)
            .await?;
        if documents > 0 || notes > 0 {
            bail!("claim {id} still has attached documents or notes");
        }

        let txn = self.db.begin().await?;

        entity::driver::Entity::delete_many()
            .filter(entity::driver::Column::ClaimId.eq(id))
            .exec(&txn)
            .await?;
        entity::participant::Entity::delete_many()
            .filter(entity::participant::Column::ClaimId.eq(id))
            .exec(&txn)
            .await?;
        entity::damage::Entity::delete_many()
            .filter(entity::damage::Column::ClaimId.eq(id))
            .exec(&txn)
            .await?;
        entity::decision::Entity::delete_many()
            .filter(entity::decision::Column::ClaimId.eq(id))
            .exec(&txn)
            .await?;
        entity::recourse::Entity::delete_many()
            .filter(entity::recourse::Column::ClaimId.eq(id))
            .exec(&txn)
            .await?;
        entity::settlement::Entity::delete_many()
            .filter(entity::settlement::Column::ClaimId.eq(id))
            .exec(&txn)
            .await?;
        entity::appeal::Entity::delete_many()
            .filter(entity::appeal::Column::ClaimId.eq(id))
            .exec(&txn)
            .await?;
        entity::client_claim::Entity::delete_many()
            .filter(entity::client_claim::Column::ClaimId.eq(id))
            .exec(&txn)
            .await?;
        entity::Entity::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;
        Ok(())
    }

    async fn list(&self, filter: &ClaimFilter, page: &PageRequest) -> Result<Page<ClaimSummary>> {
        let mut condition = Condition::all();
        if let Some(handler) = filter.case_handler_id {
            condition = condition.add(entity::Column::CaseHandlerId.eq(handler));
        }
        if let Some(registrar) = filter.registered_by_id {
            condition = condition.add(entity::Column::RegisteredById.eq(registrar));
        }
        if let Some(is_draft) = filter.is_draft {
            condition = condition.add(entity::Column::IsDraft.eq(is_draft));
        }
        if let Some(term) = filter.search.as_deref() {
            // Lowered LIKE instead of ILIKE, which sqlite does not have.
            let pattern = format!("%{}%", escape_like(&term.to_lowercase()));
            let mut any = Condition::any();
            for column in [
                entity::Column::ClaimNumber,
                entity::Column::OwnerName,
                entity::Column::CorrespondenceEmail,
                entity::Column::PolicyNumber,
                entity::Column::VehicleRegistration,
                entity::Column::PlaceOfAccident,
            ] {
                any = any.add(
                    Expr::expr(Func::lower(Expr::col(column)))
                        .like(LikeExpr::new(pattern.as_str()).escape('\\')),
                );
            }
            condition = condition.add(any);
        }

        let query = entity::Entity::find().filter(condition);
        let total = query.clone().count(&*self.db).await?;

        let sort_column = match page.sort.key {
            SortKey::CreatedAt => entity::Column::CreatedAt,
            SortKey::UpdatedAt => entity::Column::UpdatedAt,
            SortKey::ClaimNumber => entity::Column::ClaimNumber,
            SortKey::OwnerName => entity::Column::OwnerName,
        };
        let order = if page.sort.descending {
            Order::Desc
        } else {
            Order::Asc
        };

        let page_number = page.page.max(1);
        let rows = query
            .order_by(sort_column, order)
            .order_by_asc(entity::Column::Id)
            .limit(page.page_size)
            .offset((page_number - 1).saturating_mul(page.page_size))
            .all(&*self.db)
            .await?;

        let items = rows
            .into_iter()
            .map(|row| Claim::try_from(row).map(|claim| ClaimSummary::from(&claim)))
            .collect::<Result<Vec<_>>>()?;

        Ok(Page {
            items,
            total,
            page: page_number,
            page_size: page.page_size,
        })
    }
}
