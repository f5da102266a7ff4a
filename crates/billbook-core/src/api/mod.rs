//! REST access to a record collection.

mod http;

use std::future::Future;

use thiserror::Error;

use crate::models::RecordId;
use crate::resource::Resource;

pub use http::HttpRecordsApi;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid API configuration: {0}")]
    InvalidConfiguration(String),
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// Non-success response; `message` is the server's own error text.
    #[error("{message}")]
    Status { status: u16, message: String },
    #[error("Invalid response payload: {0}")]
    InvalidPayload(String),
}

impl ApiError {
    /// HTTP status of a rejected request, if the server answered at all.
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// CRUD operations against one collection.
///
/// The controller is generic over this trait so tests can substitute an
/// in-memory double for the HTTP client.
pub trait RecordsApi<R: Resource>: Send + Sync {
    /// `GET {base}`; a `null` body is an empty collection.
    fn list(&self) -> impl Future<Output = ApiResult<Vec<R::Record>>> + Send;

    /// `POST {base}`; returns the created record when the body carries one.
    fn create(
        &self,
        payload: &R::Payload,
    ) -> impl Future<Output = ApiResult<Option<R::Record>>> + Send;

    /// `GET {base}/{id}`; `None` on 404.
    fn fetch(&self, id: &RecordId) -> impl Future<Output = ApiResult<Option<R::Record>>> + Send;

    /// `PUT {base}/{id}`.
    fn update(
        &self,
        id: &RecordId,
        payload: &R::Payload,
    ) -> impl Future<Output = ApiResult<()>> + Send;

    /// `DELETE {base}/{id}`.
    fn delete(&self, id: &RecordId) -> impl Future<Output = ApiResult<()>> + Send;
}
