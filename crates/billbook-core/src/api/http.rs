//! reqwest-backed [`RecordsApi`] implementation.

use std::fmt;
use std::marker::PhantomData;
use std::time::Duration;

use reqwest::header::ACCEPT;
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::{ApiError, ApiResult, RecordsApi};
use crate::config::ClientConfig;
use crate::models::RecordId;
use crate::resource::Resource;
use crate::util::{compact_text, is_http_url, normalize_text_option};

/// JSON-over-HTTP client for the collection `R` under a base URL.
pub struct HttpRecordsApi<R> {
    collection_url: Url,
    client: Client,
    resource: PhantomData<fn() -> R>,
}

impl<R: Resource> HttpRecordsApi<R> {
    pub fn new(base_url: impl AsRef<str>) -> ApiResult<Self> {
        Self::with_timeout(base_url, None)
    }

    /// Client whose requests give up after `timeout`; `None` waits indefinitely.
    pub fn with_timeout(base_url: impl AsRef<str>, timeout: Option<Duration>) -> ApiResult<Self> {
        let collection_url = collection_url(base_url.as_ref(), R::COLLECTION)?;
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            collection_url,
            client: builder.build()?,
            resource: PhantomData,
        })
    }

    pub fn from_config(config: &ClientConfig) -> ApiResult<Self> {
        Self::with_timeout(&config.base_url, config.timeout)
    }

    pub const fn collection_url(&self) -> &Url {
        &self.collection_url
    }

    /// `{collection}/{id}` with the id pushed as a single encoded segment.
    pub fn item_url(&self, id: &RecordId) -> ApiResult<Url> {
        let mut url = self.collection_url.clone();
        url.path_segments_mut()
            .map_err(|()| cannot_be_a_base(&self.collection_url))?
            .push(id.as_str());
        Ok(url)
    }

    async fn send(&self, request: RequestBuilder) -> ApiResult<Response> {
        let response = request.header(ACCEPT, "application/json").send().await?;
        ensure_success(response).await
    }
}

impl<R: Resource> RecordsApi<R> for HttpRecordsApi<R> {
    async fn list(&self) -> ApiResult<Vec<R::Record>> {
        tracing::debug!("GET {}", self.collection_url);
        let response = self
            .send(self.client.get(self.collection_url.clone()))
            .await?;
        let body = response.text().await?;
        decode_list(&body)
    }

    async fn create(&self, payload: &R::Payload) -> ApiResult<Option<R::Record>> {
        tracing::debug!("POST {}", self.collection_url);
        let response = self
            .send(self.client.post(self.collection_url.clone()).json(payload))
            .await?;
        let body = response.text().await?;
        Ok(decode_created(&body))
    }

    async fn fetch(&self, id: &RecordId) -> ApiResult<Option<R::Record>> {
        let url = self.item_url(id)?;
        tracing::debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let body = ensure_success(response).await?.text().await?;
        serde_json::from_str(&body)
            .map(Some)
            .map_err(|error| ApiError::InvalidPayload(format!("{} {id}: {error}", R::NOUN)))
    }

    async fn update(&self, id: &RecordId, payload: &R::Payload) -> ApiResult<()> {
        let url = self.item_url(id)?;
        tracing::debug!("PUT {}", url);
        self.send(self.client.put(url).json(payload)).await?;
        Ok(())
    }

    async fn delete(&self, id: &RecordId) -> ApiResult<()> {
        let url = self.item_url(id)?;
        tracing::debug!("DELETE {}", url);
        self.send(self.client.delete(url)).await?;
        Ok(())
    }
}

impl<R> Clone for HttpRecordsApi<R> {
    fn clone(&self) -> Self {
        Self {
            collection_url: self.collection_url.clone(),
            client: self.client.clone(),
            resource: PhantomData,
        }
    }
}

impl<R> fmt::Debug for HttpRecordsApi<R> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("HttpRecordsApi")
            .field("collection_url", &self.collection_url.as_str())
            .finish_non_exhaustive()
    }
}

fn collection_url(base_url: &str, collection: &str) -> ApiResult<Url> {
    let base_url = normalize_text_option(Some(base_url.to_string())).ok_or_else(|| {
        ApiError::InvalidConfiguration("base URL must not be empty".to_string())
    })?;
    if !is_http_url(&base_url) {
        return Err(ApiError::InvalidConfiguration(
            "base URL must include http:// or https://".to_string(),
        ));
    }

    let mut url = Url::parse(base_url.trim_end_matches('/')).map_err(|error| {
        ApiError::InvalidConfiguration(format!("invalid base URL '{base_url}': {error}"))
    })?;
    url.path_segments_mut()
        .map_err(|()| ApiError::InvalidConfiguration(format!("invalid base URL '{base_url}'")))?
        .pop_if_empty()
        .push(collection);
    Ok(url)
}

fn cannot_be_a_base(url: &Url) -> ApiError {
    ApiError::InvalidConfiguration(format!("'{url}' cannot carry path segments"))
}

async fn ensure_success(response: Response) -> ApiResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    tracing::debug!("Request failed with HTTP {}", status.as_u16());
    Err(ApiError::Status {
        status: status.as_u16(),
        message: parse_api_error(status, &body),
    })
}

/// A `null` or empty body is an empty collection.
fn decode_list<T: DeserializeOwned>(body: &str) -> ApiResult<Vec<T>> {
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }

    serde_json::from_str::<Option<Vec<T>>>(body)
        .map(Option::unwrap_or_default)
        .map_err(|error| ApiError::InvalidPayload(format!("record list: {error}")))
}

fn decode_created<T: DeserializeOwned>(body: &str) -> Option<T> {
    match serde_json::from_str(body) {
        Ok(record) => Some(record),
        Err(error) => {
            tracing::debug!("Ignoring create response body: {}", error);
            None
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
    message: Option<String>,
}

fn parse_api_error(status: StatusCode, body: &str) -> String {
    if let Ok(payload) = serde_json::from_str::<ErrorBody>(body) {
        if let Some(message) = payload.error.or(payload.message) {
            let message = message.trim();
            if !message.is_empty() {
                return message.to_string();
            }
        }
    }

    let trimmed = compact_text(body);
    if trimmed.is_empty() {
        format!("HTTP {}", status.as_u16())
    } else {
        trimmed
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::models::Item;
    use crate::resource::{Bills, Items};

    #[test]
    fn collection_url_appends_collection_segment() {
        let bills = HttpRecordsApi::<Bills>::new("http://localhost:8080").unwrap();
        assert_eq!(bills.collection_url().as_str(), "http://localhost:8080/bills");

        let items = HttpRecordsApi::<Items>::new(" https://api.example.com/v1/ ").unwrap();
        assert_eq!(
            items.collection_url().as_str(),
            "https://api.example.com/v1/itens"
        );
    }

    #[test]
    fn rejects_invalid_base_urls() {
        assert!(HttpRecordsApi::<Bills>::new("").is_err());
        assert!(HttpRecordsApi::<Bills>::new("localhost:8080").is_err());
    }

    #[test]
    fn item_url_encodes_id_as_one_segment() {
        let api = HttpRecordsApi::<Items>::new("http://localhost:8080").unwrap();
        let url = api.item_url(&RecordId::parse("a b/c").unwrap()).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/itens/a%20b%2Fc");
    }

    #[test]
    fn parse_api_error_prefers_json_error_text() {
        assert_eq!(
            parse_api_error(StatusCode::BAD_REQUEST, r#"{"error":"Invalid JSON"}"#),
            "Invalid JSON"
        );
        assert_eq!(
            parse_api_error(StatusCode::CONFLICT, r#"{"message":" taken "}"#),
            "taken"
        );
        assert_eq!(
            parse_api_error(StatusCode::INTERNAL_SERVER_ERROR, "  boom\n"),
            "boom"
        );
        assert_eq!(
            parse_api_error(StatusCode::BAD_GATEWAY, ""),
            "HTTP 502"
        );
    }

    #[test]
    fn decode_list_treats_null_as_empty() {
        assert!(decode_list::<Item>("null").unwrap().is_empty());
        assert!(decode_list::<Item>("").unwrap().is_empty());

        let items = decode_list::<Item>(r#"[{"id": 1, "nome": "Monitor", "preco": 850.5}]"#)
            .unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id.as_str(), "1");
    }

    #[test]
    fn decode_list_reports_malformed_bodies() {
        let error = decode_list::<Item>("{\"oops\": true}").unwrap_err();
        assert!(matches!(error, ApiError::InvalidPayload(_)));
    }

    #[test]
    fn decode_created_ignores_unexpected_bodies() {
        assert!(decode_created::<Item>("").is_none());
        assert!(decode_created::<Item>(r#"{"status":"ok"}"#).is_none());
        assert!(decode_created::<Item>(r#"{"id": 3, "nome": "Mouse", "preco": 10}"#).is_some());
    }

    #[test]
    fn status_errors_expose_their_code() {
        let error = ApiError::Status {
            status: 404,
            message: "Item not found".to_string(),
        };
        assert_eq!(error.status(), Some(404));
        assert_eq!(error.to_string(), "Item not found");
    }
}
