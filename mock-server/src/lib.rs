//! In-memory mock of the repository server's REST surface.
//!
//! # Design
//! Serves just enough of the API for the client crate's integration tests:
//! cookie-based sessions backed by an `Arc<RwLock<HashMap>>`, and fixture
//! documents for the read-only resources. Fixtures are `json!` literals
//! rather than typed structs — the mock models a fixed institution snapshot,
//! not a mutable store, and the client crate's own DTOs are validated
//! against these bytes by its integration tests.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, RawQuery, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

/// The one account that can log in.
pub const VALID_USER: &str = "demo";
pub const VALID_PASSWORD: &str = "demo-pass";

/// Item that exists in no collection; DRM requests for it return 404.
pub const MISSING_ITEM: Uuid = Uuid::nil();

/// Item version whose DRM document predates the `description` field.
pub const LEGACY_VERSION: u32 = 0;

/// Token handed out with the first collection page.
pub const COLLECTION_RESUMPTION: &str = "2:3";

/// Live session tokens mapped to the username that owns them.
pub type Sessions = Arc<RwLock<HashMap<String, String>>>;

pub fn app() -> Router {
    let sessions: Sessions = Arc::new(RwLock::new(HashMap::new()));
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/logout", put(logout))
        .route("/content/currentuser", get(current_user))
        .route("/item/{uuid}/{version}/drm", get(drm_terms).post(accept_drm_terms))
        .route("/collection", get(list_collections))
        .with_state(sessions)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// Standard error document: `code`, `error`, `error_description`.
fn error_body(status: StatusCode, description: &str) -> Response {
    (
        status,
        Json(json!({
            "code": status.as_u16(),
            "error": status.canonical_reason().unwrap_or("error"),
            "error_description": description,
        })),
    )
        .into_response()
}

/// Pull the `JSESSIONID` value out of the Cookie header, if any.
fn session_token(headers: &HeaderMap) -> Option<String> {
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
    cookies.split(';').find_map(|part| {
        let (name, value) = part.trim().split_once('=')?;
        (name == "JSESSIONID").then(|| value.to_string())
    })
}

async fn authenticated(sessions: &Sessions, headers: &HeaderMap) -> Option<String> {
    let token = session_token(headers)?;
    sessions.read().await.get(&token).cloned()
}

#[derive(Deserialize)]
struct LoginParams {
    username: String,
    password: String,
}

async fn login(State(sessions): State<Sessions>, Query(params): Query<LoginParams>) -> Response {
    if params.username != VALID_USER || params.password != VALID_PASSWORD {
        return error_body(StatusCode::UNAUTHORIZED, "Bad username or password");
    }
    let token = Uuid::new_v4().to_string();
    sessions.write().await.insert(token.clone(), params.username);
    (
        StatusCode::OK,
        [(header::SET_COOKIE, format!("JSESSIONID={token}; Path=/"))],
        Json(json!(token)),
    )
        .into_response()
}

async fn logout(State(sessions): State<Sessions>, headers: HeaderMap) -> Response {
    if let Some(token) = session_token(&headers) {
        sessions.write().await.remove(&token);
    }
    StatusCode::OK.into_response()
}

async fn current_user(State(sessions): State<Sessions>, headers: HeaderMap) -> Response {
    let username = match authenticated(&sessions, &headers).await {
        Some(username) => username,
        None => return error_body(StatusCode::UNAUTHORIZED, "No session established"),
    };
    Json(json!({
        "id": "u1234",
        "username": username,
        "firstName": "Demo",
        "lastName": "User",
        "emailAddress": "demo.user@example.edu",
        "accessibilityMode": false,
        "autoLoggedIn": false,
        "guest": false,
        "prefsEditable": true,
        "menuGroups": [
            [
                {"title": "Dashboard", "route": "/home.do", "systemIcon": "home", "newWindow": false}
            ],
            [
                {"title": "Search", "href": "/search", "newWindow": false},
                {"title": "Help", "href": "https://help.example.edu", "newWindow": true}
            ]
        ],
        "counts": {"tasks": 3, "notifications": 1}
    }))
    .into_response()
}

async fn drm_terms(Path((uuid, version)): Path<(Uuid, u32)>) -> Response {
    if uuid == MISSING_ITEM {
        return error_body(
            StatusCode::NOT_FOUND,
            &format!("Failed to find item with ID: {uuid}"),
        );
    }
    let mut details = json!({
        "title": "Terms of use",
        "subtitle": "Attribution required",
        "description": format!("Terms applying to item {uuid} version {version}"),
        "agreements": {
            "regularPermission": "May be viewed and printed.",
            "educationSector": "Use is limited to the education sector.",
            "parties": {
                "title": "Rights holders",
                "partyList": ["Archives Team <archives@example.edu>"]
            },
            "customTerms": {"title": "Additional terms", "terms": "No redistribution."}
        }
    });
    if version == LEGACY_VERSION {
        if let Some(obj) = details.as_object_mut() {
            obj.remove("description");
        }
    }
    Json(details).into_response()
}

async fn accept_drm_terms(Path((uuid, _version)): Path<(Uuid, u32)>) -> Response {
    if uuid == MISSING_ITEM {
        return error_body(
            StatusCode::NOT_FOUND,
            &format!("Failed to find item with ID: {uuid}"),
        );
    }
    Json(json!(StatusCode::OK.as_u16())).into_response()
}

fn collection_entity(uuid: &str, name: &str, description: &str) -> Value {
    json!({
        "uuid": uuid,
        "modifiedDate": "2021-03-04T11:22:33.000+0000",
        "createdDate": "2019-01-15T09:00:00.000+0000",
        "owner": {"id": "u1234", "username": "demo"},
        "name": name,
        "nameStrings": {"en": name},
        "description": description,
        "descriptionStrings": {"en": description},
        "security": {
            "rules": [
                {"granted": true, "override": false, "privilege": "SEARCH_COLLECTION", "who": "*"}
            ]
        },
        "links": {"self": format!("http://localhost:8080/api/collection/{uuid}")}
    })
}

async fn list_collections(RawQuery(query): RawQuery) -> Response {
    let resumed = query
        .unwrap_or_default()
        .split('&')
        .any(|pair| pair.starts_with("resumption="));

    let page = if resumed {
        json!({
            "start": 2,
            "length": 1,
            "available": 3,
            "results": [
                collection_entity(
                    "0b1f7e12-72c9-47b4-8f27-1a73de4bd4a5",
                    "Theses",
                    "Postgraduate theses and dissertations"
                )
            ]
        })
    } else {
        json!({
            "start": 0,
            "length": 2,
            "available": 3,
            "results": [
                collection_entity(
                    "9b9bf5a9-c5af-4b71-9e73-02b0c4ace427",
                    "Reference Library",
                    "Curated reference material"
                ),
                collection_entity(
                    "6c4ac275-5d7f-4b72-ab1c-b33c871b4bf9",
                    "Course Readings",
                    "Digitized course reading lists"
                )
            ],
            "resumptionToken": COLLECTION_RESUMPTION
        })
    };
    Json(page).into_response()
}
