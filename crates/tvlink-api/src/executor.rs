// Command executor seam.
//
// The executor owns everything protocol-specific: opening the connection
// to the TV, the brand handshake, sending the key. Callers only see a
// request going in and a reply string coming out.

use async_trait::async_trait;
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::request::KeyRequest;
use crate::transport::TransportConfig;

/// Something that can deliver a keypress to a television.
///
/// The reply is either a plain acknowledgement or a serialized JSON
/// object; interpreting it is the caller's job.
#[async_trait]
pub trait CommandExecutor: Send + Sync {
    async fn execute(&self, request: &KeyRequest) -> Result<String, Error>;
}

/// Executor backed by a local command service reached over HTTP.
///
/// POSTs the [`KeyRequest`] as JSON to `{base_url}/send_key` and returns
/// the response body verbatim.
pub struct HttpExecutor {
    http: reqwest::Client,
    endpoint: Url,
}

impl HttpExecutor {
    /// Create an executor client from a `TransportConfig`.
    pub fn new(base_url: &Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Self::with_client(http, base_url)
    }

    /// Create an executor client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: &Url) -> Result<Self, Error> {
        let endpoint = send_key_url(base_url)?;
        Ok(Self { http, endpoint })
    }

    /// The full URL keypresses are posted to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl CommandExecutor for HttpExecutor {
    async fn execute(&self, request: &KeyRequest) -> Result<String, Error> {
        debug!(
            address = %request.address,
            key = %request.key,
            brand = %request.brand,
            "POST {}",
            self.endpoint
        );

        let resp = self
            .http
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            return Err(Error::Rejected {
                status: status.as_u16(),
                message: body,
            });
        }

        trace!(bytes = body.len(), "executor reply received");
        Ok(body)
    }
}

/// `{base}/send_key`, tolerating a trailing slash on the base.
fn send_key_url(base_url: &Url) -> Result<Url, Error> {
    let base = base_url.as_str().trim_end_matches('/');
    Ok(Url::parse(&format!("{base}/send_key"))?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_appends_send_key() {
        let base = Url::parse("http://127.0.0.1:8765").expect("url");
        assert_eq!(
            send_key_url(&base).expect("endpoint").as_str(),
            "http://127.0.0.1:8765/send_key"
        );
    }

    #[test]
    fn endpoint_keeps_base_path() {
        let base = Url::parse("http://backend.local/api/").expect("url");
        assert_eq!(
            send_key_url(&base).expect("endpoint").as_str(),
            "http://backend.local/api/send_key"
        );
    }
}
