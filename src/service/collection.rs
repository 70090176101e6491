use std::sync::Arc;

use anyhow::Result;
use serde_json::{Value, json};
use tracing::info;

use crate::fedora::{RequestOptions, Repository, TEXT_TURTLE};
use crate::templates;

use super::{ResourceService, uuidgen};

/// Collections are resources with a `members` indirect container next to them.
pub struct CollectionService {
    resource: Arc<ResourceService>,
    fedora: Arc<dyn Repository>,
}

impl CollectionService {
    pub fn new(resource: Arc<ResourceService>, fedora: Arc<dyn Repository>) -> CollectionService {
        CollectionService { resource, fedora }
    }

    /// Listing collections is not supported yet; always empty.
    pub fn index(&self) -> Vec<String> {
        Vec::new()
    }

    pub async fn create(&self, rdf: &str, mimetype: &str, transaction_id: &str) -> Result<String> {
        let collection_uri = if rdf.is_empty() {
            self.resource
                .template_create(
                    templates::PCDM_COLLECTION,
                    json!({ "id": uuidgen() }),
                    TEXT_TURTLE,
                    transaction_id,
                )
                .await?
        } else {
            self.resource.create(rdf, mimetype, transaction_id).await?
        };
        self.add_members_container(collection_uri, transaction_id).await
    }

    pub async fn template_create(
        &self,
        template: &str,
        data: Value,
        mimetype: &str,
        transaction_id: &str,
    ) -> Result<String> {
        let collection_uri = self
            .resource
            .template_create(template, data, mimetype, transaction_id)
            .await?;
        self.add_members_container(collection_uri, transaction_id).await
    }

    /// PUT `{uri}/members`, maintaining `pcdm:hasMember` through `ore:proxyFor`.
    ///
    /// Nothing is undone if this fails; the caller rolls back the transaction.
    async fn add_members_container(
        &self,
        collection_uri: String,
        transaction_id: &str,
    ) -> Result<String> {
        let collection_uri = collection_uri.trim().to_string();
        let members_uri = self
            .fedora
            .construct_uri(&format!("{collection_uri}/members"), transaction_id);
        self.fedora
            .template_put(
                &members_uri,
                RequestOptions::new().negotiate(TEXT_TURTLE),
                templates::LDP_INDIRECT,
                json!({ "uri": collection_uri }),
            )
            .await?;
        info!(target: "collection", %collection_uri, %members_uri, "created");
        Ok(collection_uri)
    }
}
