mod client;
mod results;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

use crate::templates::Templates;

pub use client::SparqlClient;
pub use results::{SelectResult, SelectRow, SelectValue};

pub const SPARQL_RESULTS_JSON: &str = "application/sparql-results+json";

/// The SPARQL index over the repository.
#[async_trait]
pub trait Triplestore: Send + Sync {
    fn templates(&self) -> &Templates;

    async fn query(&self, sparql: &str) -> Result<SelectResult>;

    async fn template_query(&self, template: &str, vars: Value) -> Result<SelectResult> {
        let sparql = self.templates().render(template, vars)?;
        self.query(&sparql).await
    }
}
