//! Forms API client: paginated listing, single-form lookup, submission.

use std::sync::Arc;

use aqsform_core::submission::SubmissionEnvelope;
use aqsform_core::value::FormValues;
use aqsform_core::{format_values, ApiEnvelope, AqsForm, FormsPage, Pagination};
use reqwest::{header, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use url::Url;

use crate::auth::{NoAuth, TokenProvider};
use crate::cache::ListCache;
use crate::config::ClientConfig;
use crate::error::{ClientError, Result};

/// Receipt returned on successful submission.
#[derive(Clone, Debug)]
pub struct SubmissionReceipt {
    pub submission_id: Option<String>,
    pub message: Option<String>,
}

#[derive(Deserialize)]
struct SubmissionData {
    #[serde(default, alias = "submissionId")]
    id: Option<String>,
}

/// Async client for the forms service. Cheap to clone; clones share the
/// HTTP pool and the list cache.
///
/// The client does not retry, deduplicate concurrent submissions, or
/// support cancellation; those stay with the caller.
#[derive(Clone)]
pub struct FormsClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    config: ClientConfig,
    http: reqwest::Client,
    cache: ListCache,
    tokens: Arc<dyn TokenProvider>,
}

impl FormsClient {
    /// Unauthenticated client.
    pub fn new(config: ClientConfig) -> Result<Self> {
        Self::with_token_provider(config, Arc::new(NoAuth))
    }

    pub fn with_token_provider(
        config: ClientConfig,
        tokens: Arc<dyn TokenProvider>,
    ) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout)
            .build()?;
        let cache = ListCache::new(config.cache_ttl);

        Ok(Self {
            inner: Arc::new(ClientInner {
                config,
                http,
                cache,
                tokens,
            }),
        })
    }

    /// One page of the form catalogue, served from the cache when a live
    /// entry exists for exactly `(page, limit)`.
    pub async fn list_forms(&self, page: u32, limit: u32) -> Result<FormsPage> {
        if let Some(cached) = self.inner.cache.get(page, limit) {
            tracing::debug!(page, limit, "form list served from cache");
            return Ok(cached);
        }

        tracing::debug!(page, limit, "fetching form list");
        let mut url = self.endpoint("/forms")?;
        url.query_pairs_mut()
            .append_pair("page", &page.to_string())
            .append_pair("limit", &limit.to_string());

        let envelope: ApiEnvelope<FormsPage> = self.get_json(url).await?;
        let mut data = unwrap_envelope(envelope)?;
        // Pagination is recomputed on every fetch so that
        // `total_pages = ceil(total / limit)` holds even when the server
        // misreports it.
        data.pagination = data
            .pagination
            .map(|p| Pagination::compute(p.page, p.limit, p.total));
        self.inner.cache.insert(page, limit, data.clone());
        Ok(data)
    }

    /// Looks a form up by id: first in any live cached list page (no
    /// network call), then via a dedicated single-form fetch. `Ok(None)`
    /// when the server does not know the id.
    pub async fn get_form(&self, id: &str) -> Result<Option<AqsForm>> {
        for page in self.inner.cache.live_pages() {
            if let Some(form) = page.forms.iter().find(|f| f.id == id) {
                tracing::debug!(form_id = id, "form served from cached list");
                return Ok(Some(form.clone()));
            }
        }

        tracing::debug!(form_id = id, "fetching single form");
        let url = self.endpoint(&format!("/forms/{id}"))?;
        match self.get_json::<ApiEnvelope<FormsPage>>(url).await {
            Ok(envelope) => {
                let data = unwrap_envelope(envelope)?;
                Ok(data.forms.into_iter().next())
            }
            Err(ClientError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Formats `values` (empty fields omitted), wraps them in the
    /// `{data, status: "submitted"}` envelope, and POSTs to the form's
    /// submission endpoint. A bearer header is attached when the token
    /// provider has one; its absence is not fatal.
    ///
    /// On success the entire list cache is cleared, since submission may
    /// change server-side analytics.
    pub async fn submit_form(
        &self,
        form_id: &str,
        values: &FormValues,
    ) -> Result<SubmissionReceipt> {
        let envelope = SubmissionEnvelope::new(format_values(values));
        self.submit_envelope(form_id, &envelope).await
    }

    /// Submission entry point for callers that already hold a formatted
    /// envelope (e.g. from a session's submit effect).
    pub async fn submit_envelope(
        &self,
        form_id: &str,
        envelope: &SubmissionEnvelope,
    ) -> Result<SubmissionReceipt> {
        let url = self.endpoint(&format!("/forms/{form_id}/submit"))?;
        let mut request = self.inner.http.post(url).json(envelope);
        if let Some(token) = self.inner.tokens.bearer_token() {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let body: ApiEnvelope<SubmissionData> = decode_response(response).await?;
        if !body.success {
            return Err(ClientError::Rejected(body.message.unwrap_or_else(|| {
                "Submission rejected by the server.".to_string()
            })));
        }

        self.inner.cache.clear();
        tracing::info!(form_id, "form submitted");
        Ok(SubmissionReceipt {
            submission_id: body.data.and_then(|d| d.id),
            message: body.message,
        })
    }

    /// The client's list cache, exposed for callers that need to inspect
    /// or pre-warm it.
    pub fn cache(&self) -> &ListCache {
        &self.inner.cache
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        let base = self.inner.config.base_url.trim_end_matches('/');
        let mut url = Url::parse(&format!("{base}{path}"))?;
        if let Some(locale) = self.inner.config.locale {
            url.query_pairs_mut().append_pair("lang", locale.as_str());
        }
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        let response = self.inner.http.get(url).send().await?;
        decode_response(response).await
    }
}

/// Reads a response body, mapping non-2xx statuses to the error taxonomy
/// and 2xx bodies through serde.
async fn decode_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();
    let bytes = response.bytes().await?;
    if !status.is_success() {
        return Err(status_error(status, &bytes));
    }
    Ok(serde_json::from_slice(&bytes)?)
}

fn status_error(status: StatusCode, body: &[u8]) -> ClientError {
    #[derive(Deserialize)]
    struct ErrorBody {
        #[serde(default)]
        message: Option<String>,
    }
    let message = serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message);
    ClientError::from_status(status.as_u16(), message)
}

fn unwrap_envelope<T>(envelope: ApiEnvelope<T>) -> Result<T> {
    if !envelope.success {
        return Err(ClientError::Rejected(envelope.message.unwrap_or_else(
            || "Request rejected by the server.".to_string(),
        )));
    }
    envelope
        .data
        .ok_or_else(|| ClientError::Rejected("Response envelope carried no data.".to_string()))
}
