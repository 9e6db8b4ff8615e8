//! Request extractors that reject with [`ApiError`].
//!
//! Malformed bodies, queries, and paths become 400 `VALIDATION_ERROR`
//! responses in the same JSON shape as domain errors.

use axum::extract::{FromRequest, FromRequestParts, Path, Query};

use crate::error::ApiError;

/// JSON body extractor.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct AppJson<T>(pub T);

/// Query string extractor.
#[derive(Debug, FromRequestParts)]
#[from_request(via(Query), rejection(ApiError))]
pub struct AppQuery<T>(pub T);

/// Path parameter extractor.
#[derive(Debug, FromRequestParts)]
#[from_request(via(Path), rejection(ApiError))]
pub struct AppPath<T>(pub T);
