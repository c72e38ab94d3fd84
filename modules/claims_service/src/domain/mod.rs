//! Domain layer - business logic and services

pub mod documents;
pub mod filter;
pub mod reconcile;
pub mod repository;
pub mod search;
pub mod service;
pub mod summary;

pub use documents::{DocumentStore, NoOpDocumentStore};
pub use filter::{ClaimFilter, ClaimSummary, Page, PageRequest, Sort, SortKey};
pub use reconcile::{reconcile_claim, Change, ClaimChangeSet, Reconciled};
pub use repository::ClaimsRepository;
pub use search::{NoOpSearchIndex, SearchIndex};
pub use service::ClaimsService;
pub use summary::{summarize, SettlementSummary};
