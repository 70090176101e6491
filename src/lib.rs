pub mod config;
pub mod error;
pub mod fedora;
pub mod http;
pub mod service;
pub mod sparqlizer;
pub mod templates;
pub mod triplestore;
mod upstream;

#[cfg(test)]
mod testing;

use std::sync::Arc;

use anyhow::Result;

use crate::config::Config;
use crate::fedora::{FedoraClient, Repository};
use crate::service::{CollectionService, ResourceService, TransactionService};
use crate::sparqlizer::{Sparqlizer, TemplateSparqlizer};
use crate::templates::Templates;
use crate::triplestore::{SparqlClient, Triplestore};

pub use crate::upstream::UpstreamResponse;

/// Services shared by every request handler.
#[derive(Clone)]
pub struct AppState {
    pub resources: Arc<ResourceService>,
    pub collections: Arc<CollectionService>,
    pub transactions: Arc<TransactionService>,
}

impl AppState {
    pub fn new(
        fedora: Arc<dyn Repository>,
        triplestore: Arc<dyn Triplestore>,
        sparqlizer: Arc<dyn Sparqlizer>,
    ) -> AppState {
        let resources = Arc::new(ResourceService::new(
            fedora.clone(),
            triplestore,
            sparqlizer,
        ));
        let collections = Arc::new(CollectionService::new(resources.clone(), fedora.clone()));
        let transactions = Arc::new(TransactionService::new(fedora));
        AppState {
            resources,
            collections,
            transactions,
        }
    }

    /// Wire the live Fedora and triplestore clients.
    pub fn from_config(config: &Config) -> Result<AppState> {
        let templates = Arc::new(match &config.templates.dir {
            Some(dir) => Templates::with_overrides(dir)?,
            None => Templates::new()?,
        });
        let fedora = Arc::new(FedoraClient::new(&config.fedora, templates.clone())?);
        let triplestore = Arc::new(SparqlClient::new(&config.triplestore, templates.clone())?);
        let sparqlizer = Arc::new(TemplateSparqlizer::new(templates));
        Ok(AppState::new(fedora, triplestore, sparqlizer))
    }
}
