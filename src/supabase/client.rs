use super::query::{Select, Selected, content_range_total};
use crate::config::Config;
use crate::error::DoctorError;
use backon::{ExponentialBuilder, Retryable};
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_RANGE};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Authenticated handle to a project's `/rest/v1/` endpoint.
#[derive(Debug, Clone)]
pub struct SupabaseClient {
    http: reqwest::Client,
    rest_url: Url,
    api_key: String,
}

impl SupabaseClient {
    /// Build a client for `base_url` using `api_key` for both the `apikey`
    /// header and bearer authorization.
    pub fn new(
        base_url: &str,
        api_key: impl Into<String>,
        cfg: &Config,
    ) -> Result<Self, DoctorError> {
        let rest_url = rest_url(base_url)?;

        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("chat-doctor/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(cfg.connect_timeout())
            .timeout(cfg.timeout());
        if let Some(proxy_url) = cfg.proxy.as_ref() {
            builder = builder.proxy(reqwest::Proxy::all(proxy_url.as_str())?);
        }
        let http = builder.build()?;

        Ok(Self {
            http,
            rest_url,
            api_key: api_key.into(),
        })
    }

    pub fn rest_url(&self) -> &Url {
        &self.rest_url
    }

    pub fn table_url(&self, table: &str, query: &Select) -> Result<Url, DoctorError> {
        let mut url = self.rest_url.join(table)?;
        query.apply(&mut url);
        Ok(url)
    }

    /// Run one `select` and decode the returned rows.
    pub async fn select<T>(&self, table: &str, query: &Select) -> Result<Selected<T>, DoctorError>
    where
        T: DeserializeOwned,
    {
        let url = self.table_url(table, query)?;
        debug!(table, url = %url, "PostgREST select");

        let mut req = self
            .http
            .get(url)
            .header("apikey", &self.api_key)
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .header(ACCEPT, "application/json");
        if query.wants_count() {
            req = req.header("Prefer", "count=exact");
        }

        let resp = req.send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(DoctorError::UpstreamStatus { status, body });
        }

        let total = resp
            .headers()
            .get(CONTENT_RANGE)
            .and_then(|v| v.to_str().ok())
            .and_then(content_range_total);
        let bytes = resp.bytes().await?;
        let rows: Vec<T> = serde_json::from_slice(&bytes)?;
        Ok(Selected { rows, total })
    }

    /// `select` with up to `retries` extra attempts on transient failures.
    pub async fn select_with_retry<T>(
        &self,
        table: &str,
        query: &Select,
        retries: usize,
    ) -> Result<Selected<T>, DoctorError>
    where
        T: DeserializeOwned,
    {
        if retries == 0 {
            return self.select(table, query).await;
        }
        let policy = ExponentialBuilder::default()
            .with_min_delay(Duration::from_millis(500))
            .with_max_delay(Duration::from_secs(3))
            .with_max_times(retries)
            .with_jitter();

        (move || async move { self.select(table, query).await })
            .retry(policy)
            .when(|e: &DoctorError| e.is_retryable())
            .notify(|err, dur: Duration| {
                warn!(table, error = %err, "select failed, retrying after {:?}", dur);
            })
            .await
    }
}

/// Resolve the PostgREST root for a project URL, keeping any path prefix.
fn rest_url(base_url: &str) -> Result<Url, DoctorError> {
    let mut base = Url::parse(base_url.trim())?;
    if !matches!(base.scheme(), "http" | "https") || base.cannot_be_a_base() {
        return Err(DoctorError::InvalidBaseUrl(base_url.to_string()));
    }
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.set_query(None);
    base.set_fragment(None);
    Ok(base.join("rest/v1/")?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rest_url_appends_rest_prefix() {
        let url = rest_url("https://demo.supabase.co").unwrap();
        assert_eq!(url.as_str(), "https://demo.supabase.co/rest/v1/");

        let url = rest_url("http://localhost:54321/proxy").unwrap();
        assert_eq!(url.as_str(), "http://localhost:54321/proxy/rest/v1/");
    }

    #[test]
    fn rest_url_rejects_non_http_schemes() {
        assert!(matches!(
            rest_url("ftp://demo.supabase.co"),
            Err(DoctorError::InvalidBaseUrl(_))
        ));
        assert!(matches!(
            rest_url("not a url"),
            Err(DoctorError::UrlParse(_))
        ));
    }

    #[test]
    fn table_url_carries_select_query() {
        let client =
            SupabaseClient::new("https://demo.supabase.co/", "service", &Config::default())
                .unwrap();
        let url = client
            .table_url("usuarios_permitidos", &Select::all().limit(1))
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://demo.supabase.co/rest/v1/usuarios_permitidos?select=*&limit=1"
        );
    }
}
