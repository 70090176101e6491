use std::sync::Arc;

use anyhow::Result;
use reqwest::header;
use tracing::info;

use crate::error::Error;
use crate::fedora::{RequestOptions, Repository};

/// Fedora transactions: `create` opens one, `extend` keeps it alive, `commit` or
/// `rollback` ends it. Ended transactions are rejected by Fedora itself.
pub struct TransactionService {
    fedora: Arc<dyn Repository>,
}

impl TransactionService {
    pub fn new(fedora: Arc<dyn Repository>) -> TransactionService {
        TransactionService { fedora }
    }

    pub async fn status(&self, id: &str) -> Result<String> {
        let response = self.fedora.get(id, RequestOptions::new()).await?;
        Ok(response.body)
    }

    /// Open a transaction and return its id, the `Location` relative to the root.
    pub async fn create(&self) -> Result<String> {
        let base_uri = self.fedora.base_uri();
        let url = format!("{base_uri}/fcr:tx");
        let response = self.fedora.post(&url, RequestOptions::new()).await?;
        let Some(location) = response.header(header::LOCATION.as_str()) else {
            return Err(Error::MissingHeader {
                url,
                header: "Location",
            }
            .into());
        };
        let id = location
            .strip_prefix(&format!("{base_uri}/"))
            .unwrap_or(location)
            .to_string();
        info!(target: "transaction", id, "opened");
        Ok(id)
    }

    pub async fn extend(&self, id: &str) -> Result<String> {
        let base_uri = self.fedora.base_uri();
        self.fedora
            .post(&format!("{base_uri}/{id}"), RequestOptions::new())
            .await?;
        Ok(id.to_string())
    }

    pub async fn commit(&self, id: &str) -> Result<String> {
        let base_uri = self.fedora.base_uri();
        let response = self
            .fedora
            .post(
                &format!("{base_uri}/{id}/fcr:tx/fcr:commit"),
                RequestOptions::new(),
            )
            .await?;
        info!(target: "transaction", id, "committed");
        Ok(response.body)
    }

    pub async fn rollback(&self, id: &str) -> Result<String> {
        let base_uri = self.fedora.base_uri();
        let response = self
            .fedora
            .post(
                &format!("{base_uri}/{id}/fcr:tx/fcr:rollback"),
                RequestOptions::new(),
            )
            .await?;
        info!(target: "transaction", id, "rolled back");
        Ok(response.body)
    }
}
