//! Resource types shared across the API surface.
//!
//! # Design
//! These types mirror the server's wire documents: field names are camelCase
//! on the wire (serde renames), optional fields stay `Option`, and dates stay
//! strings — servers still in the field emit a legacy offset form that is
//! normalized by a transformer (see `collection::normalize_entity_dates`)
//! rather than parsed here. Guards are hand-written predicates over raw JSON
//! that the pipeline runs before deserialization.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::security::BaseEntitySecurity;

/// Server-side language strings keyed by locale.
pub type I18nStrings = HashMap<String, String>;

/// A repository user as embedded in other documents.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email_address: Option<String>,
}

/// An edit lock held on an entity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EntityLock {
    pub uuid: Uuid,
    pub owner: User,
    pub links: HashMap<String, String>,
}

/// Export metadata attached to an entity when an export is in flight.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BaseEntityExport {
    pub export_version: String,
    pub lock: EntityLock,
}

/// Read-only view details: the privileges granted to the caller.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BaseEntityReadOnly {
    pub granted: Vec<String>,
}

/// The common envelope of every named, owned, versionable server resource.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BaseEntity {
    pub uuid: Uuid,
    /// Dates stay strings here; the wire format varies by server age.
    pub modified_date: Option<String>,
    pub created_date: Option<String>,
    pub owner: Option<User>,
    pub name: String,
    pub name_strings: I18nStrings,
    pub description: Option<String>,
    pub description_strings: Option<I18nStrings>,
    pub security: Option<BaseEntitySecurity>,
    pub export_details: Option<BaseEntityExport>,
    pub readonly: Option<BaseEntityReadOnly>,
    pub links: HashMap<String, String>,
}

/// Lifecycle state of an item.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum ItemStatus {
    Draft,
    Live,
    Rejected,
    Moderating,
    Archived,
    Suspended,
    Deleted,
    Review,
    Personal,
}

/// One page of a paginated listing.
///
/// `results.len() == length` when the server is well behaved, and
/// `available >= length`. A present `resumption_token` signals more pages.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PagedResult<T> {
    pub start: u64,
    pub length: u64,
    pub available: u64,
    pub results: Vec<T>,
    pub resumption_token: Option<String>,
}

/// Structural check for a [`BaseEntity`] document.
pub fn is_base_entity(value: &Value) -> bool {
    let Some(obj) = value.as_object() else {
        return false;
    };
    obj.get("uuid")
        .and_then(Value::as_str)
        .is_some_and(|s| Uuid::parse_str(s).is_ok())
        && obj.get("name").is_some_and(Value::is_string)
        && obj.get("nameStrings").is_some_and(Value::is_object)
        && obj.get("links").is_some_and(Value::is_object)
}

/// Structural check for a [`PagedResult`] envelope whose elements each
/// individually satisfy `element`.
pub fn is_paged_result(value: &Value, element: impl Fn(&Value) -> bool) -> bool {
    let Some(obj) = value.as_object() else {
        return false;
    };
    ["start", "length", "available"]
        .iter()
        .all(|key| obj.get(*key).is_some_and(Value::is_u64))
        && obj.get("resumptionToken").is_none_or(Value::is_string)
        && obj
            .get("results")
            .and_then(Value::as_array)
            .is_some_and(|items| items.iter().all(element))
}

/// Guard for the standard paged listing of [`BaseEntity`] values. Every
/// element is checked, not just the envelope.
pub fn is_paged_base_entity(value: &Value) -> bool {
    is_paged_result(value, is_base_entity)
}
