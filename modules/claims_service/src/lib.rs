//! Claims Service Module
//!
//! Reconciliation and projection core for motor insurance claims. A claim is
//! an aggregate root with nested child collections; saves arrive as sparse
//! patches that are diffed against the persisted graph and applied in a
//! single transaction.

// Public exports
pub mod contract;
pub use contract::{
    client::ClaimsApi, error::ClaimsError, model::Claim, model::ClaimStatus,
    model::ParticipantRole, patch::ClaimPatch, patch::Patch,
};

// Internal modules (hidden from public API)
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod config;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;
