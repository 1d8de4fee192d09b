//! DRM terms attached to an item: listing and acceptance.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::http::RequestDescriptor;
use crate::shape::Shape;

/// Parties holding rights over an item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DrmParties {
    /// Server-side language string for the party section.
    pub title: String,
    /// One entry per party: name and email.
    pub party_list: Vec<String>,
}

/// Free-form terms configured for an item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DrmCustomTerms {
    pub title: String,
    pub terms: String,
}

/// The permissions and conditions a user agrees to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DrmAgreements {
    pub regular_permission: Option<String>,
    pub additional_permission: Option<String>,
    /// Present when use is limited to the education sector.
    pub education_sector: Option<String>,
    pub parties: Option<DrmParties>,
    pub custom_terms: Option<DrmCustomTerms>,
}

/// Everything a user must accept before using an item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ItemDrmDetails {
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub agreements: DrmAgreements,
}

/// Structural check for an [`ItemDrmDetails`] document.
pub fn is_item_drm_details(value: &Value) -> bool {
    let Some(obj) = value.as_object() else {
        return false;
    };
    ["title", "subtitle", "description"]
        .iter()
        .all(|key| obj.get(*key).is_some_and(Value::is_string))
        && obj.get("agreements").is_some_and(Value::is_object)
}

fn drm_path(uuid: Uuid, version: u32) -> String {
    format!("item/{uuid}/{version}/drm")
}

impl ApiClient {
    /// List all of an item's DRM terms.
    pub fn list_drm_terms(&self, uuid: Uuid, version: u32) -> Result<ItemDrmDetails, ApiError> {
        self.request(
            &RequestDescriptor::get(drm_path(uuid, version)),
            &Shape::checked(is_item_drm_details),
        )
    }

    /// Accept an item's DRM terms. The server echoes the resulting HTTP
    /// status as a bare JSON number.
    pub fn accept_drm_terms(&self, uuid: Uuid, version: u32) -> Result<u16, ApiError> {
        self.request(
            &RequestDescriptor::post(drm_path(uuid, version)),
            &Shape::checked(Value::is_number),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn details() -> Value {
        json!({
            "title": "Terms of use",
            "subtitle": "Attribution required",
            "description": "Applies to all downloads of this item.",
            "agreements": {
                "regularPermission": "May be viewed and printed.",
                "parties": {
                    "title": "Rights holders",
                    "partyList": ["Archives Team <archives@example.edu>"]
                }
            }
        })
    }

    #[test]
    fn guard_accepts_complete_details() {
        assert!(is_item_drm_details(&details()));
    }

    #[test]
    fn guard_rejects_details_missing_description() {
        let mut degraded = details();
        degraded.as_object_mut().unwrap().remove("description");
        assert!(!is_item_drm_details(&degraded));
    }

    #[test]
    fn guard_rejects_non_object_agreements() {
        let mut degraded = details();
        degraded["agreements"] = json!("none");
        assert!(!is_item_drm_details(&degraded));
    }

    #[test]
    fn details_deserialize_from_wire_names() {
        let parsed: ItemDrmDetails = serde_json::from_value(details()).unwrap();
        assert_eq!(parsed.title, "Terms of use");
        let parties = parsed.agreements.parties.unwrap();
        assert_eq!(parties.party_list.len(), 1);
        assert!(parsed.agreements.custom_terms.is_none());
    }

    #[test]
    fn path_nests_uuid_then_version() {
        let uuid = Uuid::nil();
        assert_eq!(
            drm_path(uuid, 2),
            "item/00000000-0000-0000-0000-000000000000/2/drm"
        );
    }
}
