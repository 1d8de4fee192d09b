//! Access-control types attached to entities.

use serde::{Deserialize, Serialize};

/// One access-control rule on an entity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TargetListEntry {
    pub granted: bool,
    /// Whether this rule overrides rules inherited from parent targets.
    #[serde(rename = "override")]
    pub override_rule: bool,
    pub privilege: String,
    pub who: String,
}

/// The access-control rule list granted on a `BaseEntity`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BaseEntitySecurity {
    pub rules: Vec<TargetListEntry>,
}
