//! Contract layer - public API for inter-module communication
//!
//! This layer contains transport-agnostic models and the native client trait.
//! Graph models carry no serde derives; the patch types do, since they define
//! the inbound wire shape the excluded transport layer hands over.

pub mod client;
pub mod error;
pub mod model;
pub mod patch;

pub use client::ClaimsApi;
pub use error::ClaimsError;
pub use model::{
    Appeal, Claim, ClaimStatus, ClientClaim, Damage, Decision, Document, Driver, Note,
    Participant, ParticipantRole, Recourse, Settlement,
};
pub use patch::{ClaimPatch, Patch};
