use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use reqwest::{Client, Method, Url};
use tracing::debug;

use crate::config::FedoraConfig;
use crate::templates::Templates;
use crate::upstream::{UpstreamResponse, build_client, check_status, unreachable};

use super::{RequestOptions, Repository};

/// [`Repository`] backed by a live Fedora instance.
#[derive(Clone)]
pub struct FedoraClient {
    client: Client,
    base_uri: String,
    templates: Arc<Templates>,
}

impl FedoraClient {
    pub fn new(config: &FedoraConfig, templates: Arc<Templates>) -> Result<FedoraClient> {
        Ok(FedoraClient {
            client: build_client(config.timeout())?,
            base_uri: config.base_uri.trim_end_matches('/').to_string(),
            templates,
        })
    }

    /// Absolute URLs pass through, anything else hangs off the repository root.
    fn resolve(&self, url: &str) -> String {
        match Url::parse(url) {
            Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => url.to_string(),
            _ => format!("{}/{}", self.base_uri, url.trim_start_matches('/')),
        }
    }

    async fn send(
        &self,
        method: Method,
        url: &str,
        options: RequestOptions,
    ) -> Result<UpstreamResponse> {
        let url = self.resolve(url);
        debug!(target: "fedora", %method, %url, "request");
        let RequestOptions {
            headers,
            query,
            body,
        } = options;
        let mut request = self.client.request(method, &url);
        for (name, value) in headers {
            request = request.header(name, value);
        }
        if !query.is_empty() {
            request = request.query(&query);
        }
        if let Some(body) = body {
            request = request.body(body);
        }
        let response = request.send().await.map_err(|e| unreachable(&url, e))?;
        let response = check_status(&url, response).await?;
        UpstreamResponse::read(&url, response).await
    }
}

#[async_trait]
impl Repository for FedoraClient {
    fn base_uri(&self) -> &str {
        &self.base_uri
    }

    fn templates(&self) -> &Templates {
        &self.templates
    }

    async fn get(&self, url: &str, options: RequestOptions) -> Result<UpstreamResponse> {
        self.send(Method::GET, url, options).await
    }

    async fn post(&self, url: &str, options: RequestOptions) -> Result<UpstreamResponse> {
        self.send(Method::POST, url, options).await
    }

    async fn put(&self, url: &str, options: RequestOptions) -> Result<UpstreamResponse> {
        self.send(Method::PUT, url, options).await
    }

    async fn patch(&self, url: &str, options: RequestOptions) -> Result<UpstreamResponse> {
        self.send(Method::PATCH, url, options).await
    }

    async fn delete(&self, url: &str, options: RequestOptions) -> Result<UpstreamResponse> {
        self.send(Method::DELETE, url, options).await
    }
}
