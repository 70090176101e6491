mod client;
mod graph;

use anyhow::Result;
use async_trait::async_trait;
use oxrdf::Graph;
use reqwest::header::{self, HeaderName};
use serde_json::Value;

use crate::templates::Templates;
use crate::upstream::UpstreamResponse;

pub use client::FedoraClient;
pub use graph::{parse_turtle, to_ntriples};

pub const TEXT_TURTLE: &str = "text/turtle";
pub const SPARQL_UPDATE: &str = "application/sparql-update";

/// Headers, query parameters and body of an outgoing repository request.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub headers: Vec<(HeaderName, String)>,
    pub query: Vec<(String, String)>,
    pub body: Option<String>,
}

impl RequestOptions {
    pub fn new() -> RequestOptions {
        RequestOptions::default()
    }

    pub fn header(mut self, name: HeaderName, value: impl Into<String>) -> RequestOptions {
        self.headers.push((name, value.into()));
        self
    }

    pub fn accept(self, mimetype: &str) -> RequestOptions {
        self.header(header::ACCEPT, mimetype)
    }

    /// Send and expect the same media type.
    pub fn negotiate(self, mimetype: &str) -> RequestOptions {
        self.header(header::ACCEPT, mimetype)
            .header(header::CONTENT_TYPE, mimetype)
    }

    pub fn query(mut self, key: &str, value: impl Into<String>) -> RequestOptions {
        self.query.push((key.to_string(), value.into()));
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> RequestOptions {
        self.body = Some(body.into());
        self
    }

    pub fn header_value(&self, name: &HeaderName) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

/// The Fedora repository as seen by the services.
#[async_trait]
pub trait Repository: Send + Sync {
    /// Repository root, without a trailing slash.
    fn base_uri(&self) -> &str;

    fn templates(&self) -> &Templates;

    async fn get(&self, url: &str, options: RequestOptions) -> Result<UpstreamResponse>;
    async fn post(&self, url: &str, options: RequestOptions) -> Result<UpstreamResponse>;
    async fn put(&self, url: &str, options: RequestOptions) -> Result<UpstreamResponse>;
    async fn patch(&self, url: &str, options: RequestOptions) -> Result<UpstreamResponse>;
    async fn delete(&self, url: &str, options: RequestOptions) -> Result<UpstreamResponse>;

    async fn template_post(
        &self,
        url: &str,
        options: RequestOptions,
        template: &str,
        vars: Value,
    ) -> Result<UpstreamResponse> {
        let body = self.templates().render(template, vars)?;
        self.post(url, options.body(body)).await
    }

    async fn template_put(
        &self,
        url: &str,
        options: RequestOptions,
        template: &str,
        vars: Value,
    ) -> Result<UpstreamResponse> {
        let body = self.templates().render(template, vars)?;
        self.put(url, options.body(body)).await
    }

    async fn template_patch(
        &self,
        url: &str,
        options: RequestOptions,
        template: &str,
        vars: Value,
    ) -> Result<UpstreamResponse> {
        let body = self.templates().render(template, vars)?;
        self.patch(url, options.body(body)).await
    }

    /// Load a resource as turtle into an in-memory graph.
    async fn fetch_graph(&self, uri: &str) -> Result<Graph> {
        let response = self
            .get(uri, RequestOptions::new().accept(TEXT_TURTLE))
            .await?;
        parse_turtle(&response.body, Some(uri))
    }

    fn construct_uri(&self, resource_uri: &str, transaction_id: &str) -> String {
        construct_uri(self.base_uri(), resource_uri, transaction_id)
    }
}

/// Rewrite `resource_uri` so it lives under the transaction `transaction_id`.
///
/// Applying it to a URI that is already scoped to the transaction is a no-op, and
/// an empty transaction id leaves the URI as is. URIs outside the repository root
/// cannot be scoped and are returned unchanged.
pub fn construct_uri(base_uri: &str, resource_uri: &str, transaction_id: &str) -> String {
    let base = base_uri.trim_end_matches('/');
    let scoped_base = || {
        if transaction_id.is_empty() {
            base.to_string()
        } else {
            format!("{base}/{transaction_id}")
        }
    };

    if resource_uri.is_empty() {
        return scoped_base();
    }

    let resource = resource_uri.trim_end_matches('/');
    if resource == base {
        return scoped_base();
    }
    if transaction_id.is_empty() {
        return resource.to_string();
    }

    let Some(relative) = resource
        .strip_prefix(base)
        .and_then(|rest| rest.strip_prefix('/'))
    else {
        return resource.to_string();
    };
    let relative = relative.trim_start_matches('/');
    if relative.split('/').any(|segment| segment == transaction_id) {
        return resource.to_string();
    }
    format!("{base}/{transaction_id}/{relative}")
}
