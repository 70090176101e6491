use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::Result;
use oxrdf::NamedNode;
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::templates::{self, Templates};

/// A Drupal content record as posted by the CMS.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Node {
    /// Drupal id, the key the triplestore lookup runs on
    pub id: String,
    pub title: Option<String>,
    #[serde(rename = "type")]
    pub node_type: Option<String>,
    /// Predicate IRI to literal values
    pub properties: BTreeMap<String, Vec<String>>,
}

/// Translates content records into SPARQL updates against the resource itself (`<>`).
pub trait Sparqlizer: Send + Sync {
    fn node_to_sparql(&self, node: &Node) -> Result<String>;
}

pub struct TemplateSparqlizer {
    templates: Arc<Templates>,
}

impl TemplateSparqlizer {
    pub fn new(templates: Arc<Templates>) -> TemplateSparqlizer {
        TemplateSparqlizer { templates }
    }
}

impl Sparqlizer for TemplateSparqlizer {
    fn node_to_sparql(&self, node: &Node) -> Result<String> {
        if node.id.is_empty() {
            return Err(Error::Malformed("node record has no id".to_string()).into());
        }
        // The predicate lands between angle brackets unescaped
        for predicate in node.properties.keys() {
            NamedNode::new(predicate.as_str()).map_err(|e| {
                Error::Malformed(format!("node property {predicate:?} is not an IRI: {e}"))
            })?;
        }
        self.templates.render(templates::NODE, node)
    }
}
