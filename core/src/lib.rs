//! Typed client for a shelf content-repository server.
//!
//! # Overview
//! Talks to the repository's REST API over HTTP and hands back strongly
//! typed values, enforcing at runtime that responses actually match their
//! declared shapes. One [`ApiClient`] owns one session: the server-issued
//! cookie is captured and replayed automatically for the life of the client.
//!
//! # Design
//! - `http` describes requests as plain data; query encoding is canonical
//!   and deterministic.
//! - `client` executes descriptors and is the only place I/O happens; it is
//!   also the single error boundary, so every failure is one [`ApiError`].
//! - `shape` is the transform → validate → deserialize pipeline; mis-shaped
//!   data never reaches calling code when a validator is declared.
//! - Resource modules (`auth`, `collection`, `content`, `drm`) are thin
//!   call-sites that declare a path and a shape and delegate to the
//!   pipeline; they add no I/O and no failure modes of their own.

pub mod auth;
pub mod client;
pub mod collection;
pub mod common;
pub mod content;
pub mod drm;
pub mod error;
pub mod http;
pub mod security;
pub mod shape;

pub use client::ApiClient;
pub use collection::CollectionListParams;
pub use common::{
    is_base_entity, is_paged_base_entity, BaseEntity, I18nStrings, ItemStatus, PagedResult, User,
};
pub use content::CurrentUserDetails;
pub use drm::ItemDrmDetails;
pub use error::ApiError;
pub use http::{Method, QueryParams, QueryValue, RequestDescriptor};
pub use shape::Shape;
