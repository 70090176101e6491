//! In-memory stand-ins for the repository and the triplestore.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::{HeaderMap, HeaderValue};
use serde_json::Value;

use crate::error::Error;
use crate::fedora::{Repository, RequestOptions};
use crate::sparqlizer::TemplateSparqlizer;
use crate::templates::{self, Templates};
use crate::triplestore::{SelectResult, SelectRow, SelectValue, Triplestore};
use crate::upstream::UpstreamResponse;

pub(crate) const BASE: &str = "http://localhost:8080/fcrepo/rest";

#[derive(Debug, Clone)]
pub(crate) struct Call {
    pub(crate) method: &'static str,
    pub(crate) url: String,
    pub(crate) options: RequestOptions,
}

#[derive(Clone)]
struct Reply {
    status: StatusCode,
    headers: HeaderMap,
    body: String,
}

pub(crate) struct FakeRepository {
    templates: Templates,
    calls: Mutex<Vec<Call>>,
    replies: Mutex<HashMap<(&'static str, String), Reply>>,
}

impl FakeRepository {
    pub(crate) fn new() -> Arc<FakeRepository> {
        Arc::new(FakeRepository {
            templates: Templates::new().expect("built-in templates"),
            calls: Mutex::default(),
            replies: Mutex::default(),
        })
    }

    pub(crate) fn reply(&self, method: &'static str, url: &str, status: StatusCode, body: &str) {
        self.reply_with_headers(method, url, status, HeaderMap::new(), body);
    }

    pub(crate) fn reply_with_location(&self, method: &'static str, url: &str, location: &str) {
        let mut headers = HeaderMap::new();
        headers.insert("location", HeaderValue::from_str(location).expect("header value"));
        self.reply_with_headers(method, url, StatusCode::CREATED, headers, "");
    }

    pub(crate) fn reply_typed(&self, method: &'static str, url: &str, mimetype: &str, body: &str) {
        let mut headers = HeaderMap::new();
        headers.insert("content-type", HeaderValue::from_str(mimetype).expect("header value"));
        self.reply_with_headers(method, url, StatusCode::OK, headers, body);
    }

    fn reply_with_headers(
        &self,
        method: &'static str,
        url: &str,
        status: StatusCode,
        headers: HeaderMap,
        body: &str,
    ) {
        self.replies.lock().unwrap().insert(
            (method, url.to_string()),
            Reply {
                status,
                headers,
                body: body.to_string(),
            },
        );
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// `(method, url)` of every request, in order.
    pub(crate) fn requests(&self) -> Vec<(&'static str, String)> {
        self.calls()
            .into_iter()
            .map(|call| (call.method, call.url))
            .collect()
    }

    fn record(
        &self,
        method: &'static str,
        url: &str,
        options: RequestOptions,
    ) -> Result<UpstreamResponse> {
        self.calls.lock().unwrap().push(Call {
            method,
            url: url.to_string(),
            options,
        });
        let reply = self
            .replies
            .lock()
            .unwrap()
            .get(&(method, url.to_string()))
            .cloned()
            .unwrap_or(Reply {
                status: StatusCode::OK,
                headers: HeaderMap::new(),
                body: String::new(),
            });
        if !reply.status.is_success() {
            return Err(Error::Upstream {
                url: url.to_string(),
                status: reply.status,
                body: reply.body,
            }
            .into());
        }
        Ok(UpstreamResponse {
            status: reply.status,
            headers: reply.headers,
            body: reply.body,
        })
    }
}

#[async_trait]
impl Repository for FakeRepository {
    fn base_uri(&self) -> &str {
        BASE
    }

    fn templates(&self) -> &Templates {
        &self.templates
    }

    async fn get(&self, url: &str, options: RequestOptions) -> Result<UpstreamResponse> {
        self.record("GET", url, options)
    }

    async fn post(&self, url: &str, options: RequestOptions) -> Result<UpstreamResponse> {
        self.record("POST", url, options)
    }

    async fn put(&self, url: &str, options: RequestOptions) -> Result<UpstreamResponse> {
        self.record("PUT", url, options)
    }

    async fn patch(&self, url: &str, options: RequestOptions) -> Result<UpstreamResponse> {
        self.record("PATCH", url, options)
    }

    async fn delete(&self, url: &str, options: RequestOptions) -> Result<UpstreamResponse> {
        self.record("DELETE", url, options)
    }
}

/// Answers the lookup and proxy templates from fixed tables.
pub(crate) struct FakeTriplestore {
    templates: Templates,
    resources: Mutex<HashMap<String, String>>,
    proxies: Mutex<HashMap<String, Vec<String>>>,
    queries: Mutex<Vec<(String, Value)>>,
}

impl FakeTriplestore {
    pub(crate) fn new() -> Arc<FakeTriplestore> {
        Arc::new(FakeTriplestore {
            templates: Templates::new().expect("built-in templates"),
            resources: Mutex::default(),
            proxies: Mutex::default(),
            queries: Mutex::default(),
        })
    }

    pub(crate) fn index(&self, id: &str, uri: &str) {
        self.resources
            .lock()
            .unwrap()
            .insert(id.to_string(), uri.to_string());
    }

    pub(crate) fn index_proxies(&self, uri: &str, proxies: &[&str]) {
        self.proxies.lock().unwrap().insert(
            uri.to_string(),
            proxies.iter().map(|p| p.to_string()).collect(),
        );
    }

    pub(crate) fn queries(&self) -> Vec<(String, Value)> {
        self.queries.lock().unwrap().clone()
    }
}

fn rows(uris: impl IntoIterator<Item = String>) -> SelectResult {
    let rows = uris
        .into_iter()
        .map(|uri| SelectRow {
            bindings: [("s".to_string(), SelectValue::Uri(uri))].into(),
        })
        .collect();
    SelectResult {
        variables: vec!["s".to_string()],
        rows,
    }
}

#[async_trait]
impl Triplestore for FakeTriplestore {
    fn templates(&self) -> &Templates {
        &self.templates
    }

    async fn query(&self, _sparql: &str) -> Result<SelectResult> {
        Ok(SelectResult::default())
    }

    async fn template_query(&self, template: &str, vars: Value) -> Result<SelectResult> {
        // make sure the template still renders with these vars
        self.templates.render(template, &vars)?;
        self.queries
            .lock()
            .unwrap()
            .push((template.to_string(), vars.clone()));
        let key = vars["id"].as_str().unwrap_or_default();
        let result = match template {
            templates::GET_RESOURCE_URI => {
                rows(self.resources.lock().unwrap().get(key).cloned())
            }
            templates::GET_PROXIES_FOR => rows(
                self.proxies
                    .lock()
                    .unwrap()
                    .get(key)
                    .cloned()
                    .unwrap_or_default(),
            ),
            _ => SelectResult::default(),
        };
        Ok(result)
    }
}

pub(crate) fn sparqlizer() -> Arc<TemplateSparqlizer> {
    Arc::new(TemplateSparqlizer::new(Arc::new(
        Templates::new().expect("built-in templates"),
    )))
}
