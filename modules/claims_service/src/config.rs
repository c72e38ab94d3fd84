//! Configuration for the claims service module

use serde::Deserialize;

/// Claims service configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Currency code applied to settlements stored without one
    #[serde(default = "default_currency")]
    pub default_currency: String,

    /// What to do with existing children a patch does not mention
    #[serde(default)]
    pub unmatched_children: UnmatchedPolicy,

    /// Page size used when the caller does not supply one
    #[serde(default = "default_page_size")]
    pub default_page_size: u64,

    /// Upper bound on requested page sizes
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u64,
}

/// Policy for existing children whose identity does not appear in an
/// incoming patch list. Clients submit only the form section they edited,
/// so leaving unmatched children untouched is the safe default; several
/// child kinds have their own dedicated delete operation instead.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnmatchedPolicy {
    #[default]
    LeaveUntouched,
    Delete,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_currency: default_currency(),
            unmatched_children: UnmatchedPolicy::LeaveUntouched,
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
        }
    }
}

fn default_currency() -> String {
    "EUR".to_string()
}

fn default_page_size() -> u64 {
    25
}

fn default_max_page_size() -> u64 {
    200
}
