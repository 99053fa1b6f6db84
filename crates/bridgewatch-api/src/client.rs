// bridget HTTP client
//
// Wraps `reqwest::Client` with base-URL handling and the failure mapping
// the sync engine relies on: a gateway that cannot be reached becomes
// `Error::Offline`, client-side timeouts become `Error::Timeout`, and any
// answer that is not a 2xx JSON array is an application error.

use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::models::{Bridge, SerialPort};
use crate::transport::TransportConfig;

/// Async client for the bridget service.
///
/// All list endpoints return bare JSON arrays; there is no envelope to
/// unwrap. The client is cheap to share behind an `Arc`.
#[derive(Debug, Clone)]
pub struct BridgetClient {
    http: reqwest::Client,
    base_url: Url,
    timeout_ms: u64,
}

impl BridgetClient {
    /// Create a client from a `TransportConfig`.
    ///
    /// `base_url` is the service root including its version prefix, e.g.
    /// `http://blueos.local/bridget/v1.0`.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self {
            http,
            base_url,
            timeout_ms: transport.timeout_ms(),
        })
    }

    /// Create a client around a pre-built `reqwest::Client`.
    ///
    /// The caller owns the timeout configured on `http`; `timeout_ms` is
    /// only used when reporting `Error::Timeout`.
    pub fn with_client(http: reqwest::Client, base_url: Url, timeout_ms: u64) -> Self {
        Self {
            http,
            base_url,
            timeout_ms,
        }
    }

    /// The service base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── Endpoints ────────────────────────────────────────────────────

    /// `GET {base}/bridges`
    pub async fn list_bridges(&self) -> Result<Vec<Bridge>, Error> {
        self.get_list("bridges").await
    }

    /// `GET {base}/serial_ports`
    pub async fn list_serial_ports(&self) -> Result<Vec<SerialPort>, Error> {
        self.get_list("serial_ports").await
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Build `{base}/{path}` without letting `Url::join` swallow the last
    /// segment of a base that lacks a trailing slash.
    pub fn endpoint(&self, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        Ok(Url::parse(&format!("{base}/{path}"))?)
    }

    /// GET a JSON array from `{base}/{path}`.
    pub async fn get_list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, Error> {
        let url = self.endpoint(path)?;
        debug!("GET {url}");

        let resp = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|e| self.map_send_error(&url, e))?;

        self.handle_response(&url, resp).await
    }

    fn map_send_error(&self, url: &Url, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            Error::Timeout {
                timeout_ms: self.timeout_ms,
            }
        } else if err.is_connect() {
            Error::Offline {
                url: url.to_string(),
                reason: err.to_string(),
            }
        } else {
            Error::Transport(err)
        }
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        url: &Url,
        resp: reqwest::Response,
    ) -> Result<Vec<T>, Error> {
        let status = resp.status();

        // The gateway answered, so even 502/503/504 are not offline.
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Http {
                status: status.as_u16(),
                body: preview(&body).to_owned(),
            });
        }

        let body = resp
            .text()
            .await
            .map_err(|e| self.map_send_error(url, e))?;
        trace!(bytes = body.len(), "response body received");

        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: format!("{e} (body preview: {:?})", preview(&body)),
            body: body.clone(),
        })
    }
}

/// First 200 bytes of a body, cut on a char boundary.
fn preview(body: &str) -> &str {
    let mut end = body.len().min(200);
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}
