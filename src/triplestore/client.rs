use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use reqwest::{Client, header};
use tracing::debug;

use crate::config::TriplestoreConfig;
use crate::templates::Templates;
use crate::upstream::{build_client, check_status, unreachable};

use super::{SPARQL_RESULTS_JSON, SelectResult, Triplestore};

/// [`Triplestore`] speaking the SPARQL protocol to a single endpoint.
#[derive(Clone)]
pub struct SparqlClient {
    client: Client,
    endpoint: String,
    templates: Arc<Templates>,
}

impl SparqlClient {
    pub fn new(config: &TriplestoreConfig, templates: Arc<Templates>) -> Result<SparqlClient> {
        Ok(SparqlClient {
            client: build_client(config.timeout())?,
            endpoint: config.endpoint.clone(),
            templates,
        })
    }
}

#[async_trait]
impl Triplestore for SparqlClient {
    fn templates(&self) -> &Templates {
        &self.templates
    }

    async fn query(&self, sparql: &str) -> Result<SelectResult> {
        debug!(target: "triplestore", endpoint = %self.endpoint, sparql, "query");
        let response = self
            .client
            .post(&self.endpoint)
            .header(header::ACCEPT, SPARQL_RESULTS_JSON)
            .query(&[("format", "json"), ("query", sparql)])
            .send()
            .await
            .map_err(|e| unreachable(&self.endpoint, e))?;
        let response = check_status(&self.endpoint, response).await?;
        let text = response
            .text()
            .await
            .map_err(|e| unreachable(&self.endpoint, e))?;
        SelectResult::from_json(&text)
    }
}
