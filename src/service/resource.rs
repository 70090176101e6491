use std::sync::Arc;

use anyhow::Result;
use oxrdf::Graph;
use serde_json::{Value, json};
use tracing::{debug, info};

use crate::UpstreamResponse;
use crate::error::Error;
use crate::fedora::{RequestOptions, Repository, SPARQL_UPDATE, TEXT_TURTLE};
use crate::sparqlizer::{Node, Sparqlizer};
use crate::templates;
use crate::triplestore::Triplestore;

use super::uuidgen;

/// Create, read, update and delete of single resources addressed by Drupal id.
pub struct ResourceService {
    fedora: Arc<dyn Repository>,
    triplestore: Arc<dyn Triplestore>,
    sparqlizer: Arc<dyn Sparqlizer>,
}

impl ResourceService {
    pub fn new(
        fedora: Arc<dyn Repository>,
        triplestore: Arc<dyn Triplestore>,
        sparqlizer: Arc<dyn Sparqlizer>,
    ) -> ResourceService {
        ResourceService {
            fedora,
            triplestore,
            sparqlizer,
        }
    }

    /// Fetch the resource as `mimetype`, keeping Fedora's own headers.
    pub async fn find(&self, id: &str, mimetype: &str) -> Result<UpstreamResponse> {
        let resource_uri = self.require_resource_uri(id).await?;
        self.fedora
            .get(&resource_uri, RequestOptions::new().accept(mimetype))
            .await
    }

    pub async fn find_graph(&self, id: &str) -> Result<Graph> {
        let resource_uri = self.require_resource_uri(id).await?;
        self.fedora.fetch_graph(&resource_uri).await
    }

    /// Repository URI indexed for `id`, if any.
    pub async fn get_resource_uri(&self, id: &str) -> Result<Option<String>> {
        let result = self
            .triplestore
            .template_query(templates::GET_RESOURCE_URI, json!({ "id": id }))
            .await?;
        let uri = result.first().and_then(|row| row.get_str("s"));
        debug!(target: "resource", id, ?uri, "resolved");
        Ok(uri.map(str::to_string))
    }

    async fn require_resource_uri(&self, id: &str) -> Result<String> {
        match self.get_resource_uri(id).await? {
            Some(uri) => Ok(uri),
            None => Err(Error::not_found(id)),
        }
    }

    /// POST a new resource. An empty body gets the default turtle with a fresh id.
    pub async fn create(&self, rdf: &str, mimetype: &str, transaction_id: &str) -> Result<String> {
        if rdf.is_empty() {
            return self
                .template_create(
                    templates::DEFAULT_RESOURCE,
                    json!({ "id": uuidgen() }),
                    TEXT_TURTLE,
                    transaction_id,
                )
                .await;
        }
        let fedora_uri = self.fedora.construct_uri("", transaction_id);
        let response = self
            .fedora
            .post(
                &fedora_uri,
                RequestOptions::new().negotiate(mimetype).body(rdf),
            )
            .await?;
        info!(target: "resource", uri = %response.body, "created");
        Ok(response.body)
    }

    pub async fn template_create(
        &self,
        template: &str,
        data: Value,
        mimetype: &str,
        transaction_id: &str,
    ) -> Result<String> {
        let fedora_uri = self.fedora.construct_uri("", transaction_id);
        let response = self
            .fedora
            .template_post(
                &fedora_uri,
                RequestOptions::new().negotiate(mimetype),
                template,
                data,
            )
            .await?;
        info!(target: "resource", uri = %response.body, template, "created");
        Ok(response.body)
    }

    pub async fn node_create(&self, node: &Node, transaction_id: &str) -> Result<String> {
        let sparql = self.sparqlizer.node_to_sparql(node)?;
        self.create(&sparql, SPARQL_UPDATE, transaction_id).await
    }

    /// PUT over the indexed resource, or POST a new one when `id` is unknown.
    pub async fn upsert(
        &self,
        id: &str,
        rdf: &str,
        mimetype: &str,
        transaction_id: &str,
    ) -> Result<String> {
        let resource_uri = self.get_resource_uri(id).await?;
        let options = RequestOptions::new().negotiate(mimetype).body(rdf);
        let response = match resource_uri {
            None => {
                let fedora_uri = self.fedora.construct_uri("", transaction_id);
                self.fedora.post(&fedora_uri, options).await?
            }
            Some(uri) => {
                let fedora_uri = self.fedora.construct_uri(&uri, transaction_id);
                self.fedora.put(&fedora_uri, options).await?
            }
        };
        Ok(response.body)
    }

    pub async fn template_upsert(
        &self,
        id: &str,
        template: &str,
        data: Value,
        mimetype: &str,
        transaction_id: &str,
    ) -> Result<String> {
        let resource_uri = self.get_resource_uri(id).await?;
        let options = RequestOptions::new().negotiate(mimetype);
        let response = match resource_uri {
            None => {
                let fedora_uri = self.fedora.construct_uri("", transaction_id);
                self.fedora
                    .template_post(&fedora_uri, options, template, data)
                    .await?
            }
            Some(uri) => {
                let fedora_uri = self.fedora.construct_uri(&uri, transaction_id);
                self.fedora
                    .template_put(&fedora_uri, options, template, data)
                    .await?
            }
        };
        Ok(response.body)
    }

    pub async fn node_upsert(&self, id: &str, node: &Node, transaction_id: &str) -> Result<String> {
        let sparql = self.sparqlizer.node_to_sparql(node)?;
        self.upsert(id, &sparql, SPARQL_UPDATE, transaction_id).await
    }

    pub async fn sparql_update(&self, id: &str, sparql: &str, transaction_id: &str) -> Result<String> {
        let resource_uri = self.require_resource_uri(id).await?;
        let response = self
            .fedora
            .patch(
                &self.fedora.construct_uri(&resource_uri, transaction_id),
                RequestOptions::new().negotiate(SPARQL_UPDATE).body(sparql),
            )
            .await?;
        Ok(response.body)
    }

    pub async fn template_sparql_update(
        &self,
        id: &str,
        template: &str,
        data: Value,
        transaction_id: &str,
    ) -> Result<String> {
        let resource_uri = self.require_resource_uri(id).await?;
        let response = self
            .fedora
            .template_patch(
                &self.fedora.construct_uri(&resource_uri, transaction_id),
                RequestOptions::new().negotiate(SPARQL_UPDATE),
                template,
                data,
            )
            .await?;
        Ok(response.body)
    }

    pub async fn node_sparql_update(
        &self,
        id: &str,
        node: &Node,
        transaction_id: &str,
    ) -> Result<String> {
        let sparql = self.sparqlizer.node_to_sparql(node)?;
        self.sparql_update(id, &sparql, transaction_id).await
    }

    /// DELETE every proxy pointing at the resource, then the resource.
    ///
    /// Stops at the first failing request; whatever was deleted before stays deleted.
    pub async fn delete(&self, id: &str, transaction_id: &str) -> Result<String> {
        let resource_uri = self.require_resource_uri(id).await?;
        let proxies = self
            .triplestore
            .template_query(templates::GET_PROXIES_FOR, json!({ "id": resource_uri }))
            .await?;
        for proxy_uri in proxies.iter().filter_map(|row| row.get_str("s")) {
            debug!(target: "resource", proxy_uri, "deleting proxy");
            self.fedora
                .delete(
                    &self.fedora.construct_uri(proxy_uri, transaction_id),
                    RequestOptions::new(),
                )
                .await?;
        }
        let response = self
            .fedora
            .delete(
                &self.fedora.construct_uri(&resource_uri, transaction_id),
                RequestOptions::new(),
            )
            .await?;
        info!(target: "resource", id, %resource_uri, "deleted");
        Ok(response.body)
    }
}
