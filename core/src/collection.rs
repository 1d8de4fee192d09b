//! Collection listing: the paginated-entity pattern.
//!
//! # Design
//! The listing runs the full pipeline: array-valued and scalar query
//! parameters, a transformer that normalizes legacy date offsets on a
//! derived copy of the page, and a validator that checks every result
//! element rather than just the envelope.

use serde_json::Value;

use crate::client::ApiClient;
use crate::common::{is_paged_base_entity, BaseEntity, PagedResult};
use crate::error::ApiError;
use crate::http::RequestDescriptor;
use crate::shape::Shape;

/// Options for listing collections.
#[derive(Debug, Clone, Default)]
pub struct CollectionListParams {
    /// Restrict to collections granting all of these privileges.
    pub privilege: Vec<String>,
    /// Resumption token from a previous page.
    pub resumption: Option<String>,
    /// Ask for full entity documents rather than summaries.
    pub full: Option<bool>,
}

impl CollectionListParams {
    fn apply(&self, mut descriptor: RequestDescriptor) -> RequestDescriptor {
        if !self.privilege.is_empty() {
            descriptor = descriptor.query("privilege", self.privilege.clone());
        }
        if let Some(resumption) = &self.resumption {
            descriptor = descriptor.query("resumption", resumption.as_str());
        }
        if let Some(full) = self.full {
            descriptor = descriptor.query("full", full);
        }
        descriptor
    }
}

/// Rewrite legacy `+0000`-style UTC offsets in entity dates to the RFC 3339
/// `+00:00` form, so one date representation reaches calling code no matter
/// the server's age. Returns a derived copy; the input page is untouched.
pub fn normalize_entity_dates(raw: &Value) -> Value {
    let mut page = raw.clone();
    if let Some(results) = page.get_mut("results").and_then(Value::as_array_mut) {
        for entity in results {
            for field in ["modifiedDate", "createdDate"] {
                if let Some(Value::String(date)) = entity.get_mut(field) {
                    if let Some(fixed) = insert_offset_colon(date) {
                        *date = fixed;
                    }
                }
            }
        }
    }
    page
}

/// `2020-07-10T08:30:00.000+0000` → `2020-07-10T08:30:00.000+00:00`.
/// Dates already carrying a colon, a `Z` suffix, or anything else
/// unrecognized come back as `None` and are left alone.
fn insert_offset_colon(date: &str) -> Option<String> {
    if date.len() < 6 || !date.is_char_boundary(date.len() - 5) {
        return None;
    }
    let (head, tail) = date.split_at(date.len() - 5);
    let mut chars = tail.chars();
    let sign = chars.next()?;
    if (sign == '+' || sign == '-') && chars.all(|c| c.is_ascii_digit()) {
        Some(format!("{head}{}:{}", &tail[..3], &tail[3..]))
    } else {
        None
    }
}

impl ApiClient {
    /// List the collections visible to the current session, one page at a
    /// time. Present `params.resumption` from the previous page to continue.
    pub fn list_collections(
        &self,
        params: &CollectionListParams,
    ) -> Result<PagedResult<BaseEntity>, ApiError> {
        let descriptor = params.apply(RequestDescriptor::get("collection"));
        self.request(
            &descriptor,
            &Shape::checked(is_paged_base_entity).with_transformer(normalize_entity_dates),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn params_encode_in_declaration_order() {
        let params = CollectionListParams {
            privilege: vec!["SEARCH_COLLECTION".to_string(), "VIEW_ITEM".to_string()],
            resumption: Some("2:10".to_string()),
            full: Some(true),
        };
        let descriptor = params.apply(RequestDescriptor::get("collection"));
        assert_eq!(
            descriptor.url("http://localhost:8080/api"),
            "http://localhost:8080/api/collection?privilege=SEARCH_COLLECTION&privilege=VIEW_ITEM&resumption=2%3A10&full=true"
        );
    }

    #[test]
    fn default_params_add_no_query() {
        let descriptor = CollectionListParams::default().apply(RequestDescriptor::get("collection"));
        assert_eq!(
            descriptor.url("http://localhost:8080/api"),
            "http://localhost:8080/api/collection"
        );
    }

    #[test]
    fn legacy_offsets_gain_a_colon() {
        let raw = json!({
            "results": [
                {"modifiedDate": "2020-07-10T08:30:00.000+0000", "createdDate": "2019-01-15T09:00:00.000-0530"}
            ]
        });
        let page = normalize_entity_dates(&raw);
        assert_eq!(
            page["results"][0]["modifiedDate"],
            json!("2020-07-10T08:30:00.000+00:00")
        );
        assert_eq!(
            page["results"][0]["createdDate"],
            json!("2019-01-15T09:00:00.000-05:30")
        );
    }

    #[test]
    fn modern_dates_pass_through_unchanged() {
        let raw = json!({
            "results": [
                {"modifiedDate": "2020-07-10T08:30:00.000+00:00"},
                {"modifiedDate": "2020-07-10T08:30:00Z"}
            ]
        });
        let page = normalize_entity_dates(&raw);
        assert_eq!(page, raw);
    }

    #[test]
    fn transformer_leaves_the_input_untouched() {
        let raw = json!({
            "results": [{"modifiedDate": "2020-07-10T08:30:00.000+0000"}]
        });
        let before = raw.clone();
        let _page = normalize_entity_dates(&raw);
        assert_eq!(raw, before);
    }

    #[test]
    fn entities_without_dates_are_left_alone() {
        let raw = json!({"results": [{"name": "Reference Library"}], "length": 1});
        assert_eq!(normalize_entity_dates(&raw), raw);
    }
}
