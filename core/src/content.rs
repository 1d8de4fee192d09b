//! Details of the user behind the current session, as consumed by UI shells.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::http::RequestDescriptor;
use crate::shape::Shape;

/// Outstanding work counts shown in the UI.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ItemCounts {
    pub tasks: u32,
    pub notifications: u32,
}

/// One entry in the user's menu.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub title: String,
    pub href: Option<String>,
    pub system_icon: Option<String>,
    pub route: Option<String>,
    pub icon_url: Option<String>,
    pub new_window: bool,
}

/// The session's user, plus the UI scaffolding the server renders for them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUserDetails {
    pub id: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email_address: Option<String>,
    pub accessibility_mode: bool,
    pub auto_logged_in: bool,
    pub guest: bool,
    pub prefs_editable: bool,
    /// Menu entries grouped into sections, outermost to innermost.
    pub menu_groups: Vec<Vec<MenuItem>>,
    pub counts: Option<ItemCounts>,
}

/// Structural check for a [`CurrentUserDetails`] document.
pub fn is_current_user_details(value: &Value) -> bool {
    let Some(obj) = value.as_object() else {
        return false;
    };
    ["id", "username", "firstName", "lastName"]
        .iter()
        .all(|key| obj.get(*key).is_some_and(Value::is_string))
        && ["accessibilityMode", "autoLoggedIn", "guest", "prefsEditable"]
            .iter()
            .all(|key| obj.get(*key).is_some_and(Value::is_boolean))
        && obj.get("menuGroups").is_some_and(Value::is_array)
}

impl ApiClient {
    /// Retrieve details of the user behind this client's session cookie,
    /// including menu structure and work counts.
    pub fn current_user_details(&self) -> Result<CurrentUserDetails, ApiError> {
        self.request(
            &RequestDescriptor::get("content/currentuser"),
            &Shape::checked(is_current_user_details),
        )
    }
}
