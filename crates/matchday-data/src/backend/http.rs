//! REST table backend.
//!
//! Speaks the PostgREST-style row API of the hosted backend:
//! `GET /rest/{table}?col=eq.value`, `POST /rest/{table}` with
//! `Prefer: return=representation`, `PATCH`/`DELETE` filtered by id.

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde_json::Value;
use tracing::debug;
use url::Url;

use super::{RetryConfig, RetryPolicy, SelectQuery, SortOrder, TableBackend};
use crate::config::BackendConfig;
use crate::error::{BackendError, BackendResult};

pub struct HttpBackend {
    client: Client,
    base_url: Url,
    api_key: Option<String>,
    retry: RetryPolicy,
}

impl HttpBackend {
    pub fn new(config: BackendConfig) -> BackendResult<Self> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| BackendError::new(format!("invalid backend url: {e}")))?;
        let client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| BackendError::new(format!("failed to build http client: {e}")))?;
        let retry = RetryPolicy::new(RetryConfig::new(
            config.retry_count.saturating_add(1),
            config.retry_delay,
        ));
        Ok(Self {
            client,
            base_url,
            api_key: config.api_key,
            retry,
        })
    }

    fn table_url(&self, table: &str) -> BackendResult<Url> {
        self.base_url
            .join(&format!("rest/{table}"))
            .map_err(|e| BackendError::new(format!("invalid table path {table}: {e}")))
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_key {
            Some(key) => request.header("apikey", key).bearer_auth(key),
            None => request,
        }
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.authorize(self.client.request(method, url))
    }

    async fn read_rows(response: Response) -> BackendResult<Vec<Value>> {
        let status = response.status();
        if !status.is_success() {
            return Err(status_error(status));
        }
        let rows: Vec<Value> = response.json().await.map_err(request_error)?;
        Ok(rows)
    }
}

fn status_error(status: StatusCode) -> BackendError {
    BackendError::with_code(
        format!("backend returned {status}"),
        status.as_u16().to_string(),
    )
}

fn request_error(err: reqwest::Error) -> BackendError {
    let code = if err.is_timeout() {
        "timeout"
    } else if err.is_connect() {
        "network"
    } else {
        "request"
    };
    BackendError::with_code(err.to_string(), code)
}

fn apply_query(url: &mut Url, query: &SelectQuery) {
    let mut pairs = url.query_pairs_mut();
    for (column, value) in &query.filters {
        pairs.append_pair(column, &format!("eq.{value}"));
    }
    if let Some((column, order)) = &query.order_by {
        let direction = match order {
            SortOrder::Ascending => "asc",
            SortOrder::Descending => "desc",
        };
        pairs.append_pair("order", &format!("{column}.{direction}"));
    }
    if let Some(limit) = query.limit {
        pairs.append_pair("limit", &limit.to_string());
    }
}

#[async_trait]
impl TableBackend for HttpBackend {
    async fn select(&self, table: &str, query: &SelectQuery) -> BackendResult<Vec<Value>> {
        let mut url = self.table_url(table)?;
        apply_query(&mut url, query);
        debug!(table, url = %url, "select");
        self.retry
            .execute(|| async {
                let response = self
                    .request(Method::GET, url.clone())
                    .send()
                    .await
                    .map_err(request_error)?;
                Self::read_rows(response).await
            })
            .await
    }

    // Mutations run exactly once: a retried insert could double-apply, and
    // the caller decides whether a failed write is worth resubmitting.
    async fn insert(&self, table: &str, row: Value) -> BackendResult<Value> {
        let url = self.table_url(table)?;
        debug!(table, "insert");
        let response = self
            .request(Method::POST, url)
            .header("Prefer", "return=representation")
            .json(&row)
            .send()
            .await
            .map_err(request_error)?;
        let rows = Self::read_rows(response).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| BackendError::new("insert returned no representation"))
    }

    async fn update_by_id(&self, table: &str, id: &str, patch: Value) -> BackendResult<Value> {
        let mut url = self.table_url(table)?;
        url.query_pairs_mut().append_pair("id", &format!("eq.{id}"));
        debug!(table, id, "update");
        let response = self
            .request(Method::PATCH, url)
            .header("Prefer", "return=representation")
            .json(&patch)
            .send()
            .await
            .map_err(request_error)?;
        let rows = Self::read_rows(response).await?;
        // An empty representation means the filter matched nothing.
        rows.into_iter()
            .next()
            .ok_or_else(|| BackendError::not_found(table, id))
    }

    async fn delete_by_id(&self, table: &str, id: &str) -> BackendResult<()> {
        let mut url = self.table_url(table)?;
        url.query_pairs_mut().append_pair("id", &format!("eq.{id}"));
        debug!(table, id, "delete");
        let response = self
            .request(Method::DELETE, url)
            .header("Prefer", "return=representation")
            .send()
            .await
            .map_err(request_error)?;
        let rows = Self::read_rows(response).await?;
        if rows.is_empty() {
            return Err(BackendError::not_found(table, id));
        }
        Ok(())
    }
}
