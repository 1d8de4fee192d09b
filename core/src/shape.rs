//! Typed response pipeline: optional transform, optional validation, then
//! deserialization.
//!
//! # Design
//! The server's bytes are untrusted. A [`Shape`] declares what a response
//! must look like before any of it reaches calling code: `resolve` applies
//! the transformer (if any) to produce a candidate derived from the raw
//! value, runs the validator (if any) against the candidate rather than the
//! raw input, and only then deserializes into `T`. A candidate that fails
//! validation is discarded; it is never handed to the caller.

use std::any::type_name;
use std::fmt;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiError;

/// Runtime check that an untyped value conforms to an expected shape.
/// Pure and total: must not panic and must not mutate the value.
pub type Validator = Box<dyn Fn(&Value) -> bool + Send + Sync>;

/// Pre-validation rewrite of the raw response. Returns a derived copy; the
/// input is never mutated in place.
pub type Transformer = Box<dyn Fn(&Value) -> Value + Send + Sync>;

/// Declared shape of a response body, resolved to a `T` by the pipeline.
pub struct Shape<T> {
    validator: Option<Validator>,
    transformer: Option<Transformer>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> fmt::Debug for Shape<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shape")
            .field("expected", &type_name::<T>())
            .field("has_validator", &self.validator.is_some())
            .field("has_transformer", &self.transformer.is_some())
            .finish()
    }
}

impl<T: DeserializeOwned> Shape<T> {
    /// Rely on deserialization into `T` alone to police the shape.
    pub fn inferred() -> Self {
        Self {
            validator: None,
            transformer: None,
            _marker: PhantomData,
        }
    }

    /// Guard with an explicit predicate, run on the candidate value before
    /// deserialization.
    pub fn checked(validator: impl Fn(&Value) -> bool + Send + Sync + 'static) -> Self {
        Self {
            validator: Some(Box::new(validator)),
            transformer: None,
            _marker: PhantomData,
        }
    }

    /// Rewrite the raw value before validation. The validator and the
    /// deserializer both see the transformer's output, never the raw input.
    pub fn with_transformer(
        mut self,
        transformer: impl Fn(&Value) -> Value + Send + Sync + 'static,
    ) -> Self {
        self.transformer = Some(Box::new(transformer));
        self
    }

    /// Run transform → validate → deserialize over a raw response value.
    pub(crate) fn resolve(&self, raw: Value) -> Result<T, ApiError> {
        let candidate = match &self.transformer {
            Some(transform) => transform(&raw),
            None => raw,
        };
        if let Some(validator) = &self.validator {
            if !validator(&candidate) {
                return Err(ApiError::ShapeMismatch(format!(
                    "response does not match the expected shape `{}`",
                    type_name::<T>()
                )));
            }
        }
        serde_json::from_value(candidate).map_err(|err| {
            ApiError::ShapeMismatch(format!(
                "response could not be read as `{}`: {err}",
                type_name::<T>()
            ))
        })
    }
}
