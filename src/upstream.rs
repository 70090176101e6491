use std::time::Duration;

use anyhow::Result;
use reqwest::header::HeaderMap;
use reqwest::{Client, Response, StatusCode};

use crate::error::Error;

static APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

/// Shared HTTP client settings for the repository and the triplestore.
pub(crate) fn build_client(timeout: Option<Duration>) -> Result<Client> {
    // reqwest is built without a default rustls provider; a second install is a no-op
    let _ = tokio_rustls::rustls::crypto::aws_lc_rs::default_provider().install_default();
    let mut builder = Client::builder().user_agent(APP_USER_AGENT).gzip(true);
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    Ok(builder.build()?)
}

pub(crate) fn unreachable(url: &str, source: reqwest::Error) -> anyhow::Error {
    Error::Unreachable {
        url: url.to_string(),
        source,
    }
    .into()
}

/// Turn a non-2xx response into [`Error::Upstream`], keeping its body.
pub(crate) async fn check_status(url: &str, response: Response) -> Result<Response> {
    if response.error_for_status_ref().is_err() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(Error::Upstream {
            url: url.to_string(),
            status,
            body,
        }
        .into());
    }
    Ok(response)
}

/// Status, headers and body of a finished upstream exchange.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl UpstreamResponse {
    pub(crate) async fn read(url: &str, response: Response) -> Result<UpstreamResponse> {
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.text().await.map_err(|e| unreachable(url, e))?;
        Ok(UpstreamResponse {
            status,
            headers,
            body,
        })
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}
