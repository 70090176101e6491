use std::collections::HashMap;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Value from a SPARQL SELECT binding
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectValue {
    Uri(String),
    Literal {
        value: String,
        datatype: Option<String>,
        language: Option<String>,
    },
    BlankNode(String),
}

impl SelectValue {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Uri(s) | Self::BlankNode(s) => s,
            Self::Literal { value, .. } => value,
        }
    }
}

/// One solution of a SELECT query, keyed by variable name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectRow {
    pub bindings: HashMap<String, SelectValue>,
}

impl SelectRow {
    pub fn get(&self, var: &str) -> Option<&SelectValue> {
        self.bindings.get(var)
    }

    pub fn get_str(&self, var: &str) -> Option<&str> {
        self.bindings.get(var).map(SelectValue::as_str)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectResult {
    pub variables: Vec<String>,
    pub rows: Vec<SelectRow>,
}

impl SelectResult {
    pub fn first(&self) -> Option<&SelectRow> {
        self.rows.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SelectRow> {
        self.rows.iter()
    }

    /// Decode an `application/sparql-results+json` document.
    pub fn from_json(text: &str) -> Result<SelectResult> {
        let document: JsonResults =
            serde_json::from_str(text).context("malformed SPARQL JSON results")?;
        let rows = document
            .results
            .bindings
            .into_iter()
            .map(|solution| {
                let bindings = solution
                    .into_iter()
                    .map(|(var, term)| (var, term.into()))
                    .collect();
                SelectRow { bindings }
            })
            .collect();
        Ok(SelectResult {
            variables: document.head.vars,
            rows,
        })
    }
}

impl<'a> IntoIterator for &'a SelectResult {
    type Item = &'a SelectRow;
    type IntoIter = std::slice::Iter<'a, SelectRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

#[derive(Deserialize)]
struct JsonResults {
    #[serde(default)]
    head: JsonHead,
    results: JsonBindings,
}

#[derive(Deserialize, Default)]
struct JsonHead {
    #[serde(default)]
    vars: Vec<String>,
}

#[derive(Deserialize)]
struct JsonBindings {
    bindings: Vec<HashMap<String, JsonTerm>>,
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
enum JsonTerm {
    Uri {
        value: String,
    },
    Literal {
        value: String,
        datatype: Option<String>,
        #[serde(rename = "xml:lang")]
        language: Option<String>,
    },
    // Older endpoints (Blazegraph among them) still emit SPARQL 1.0's typed-literal
    TypedLiteral {
        value: String,
        datatype: Option<String>,
    },
    Bnode {
        value: String,
    },
}

impl From<JsonTerm> for SelectValue {
    fn from(term: JsonTerm) -> Self {
        match term {
            JsonTerm::Uri { value } => SelectValue::Uri(value),
            JsonTerm::Literal {
                value,
                datatype,
                language,
            } => SelectValue::Literal {
                value,
                datatype,
                language,
            },
            JsonTerm::TypedLiteral { value, datatype } => SelectValue::Literal {
                value,
                datatype,
                language: None,
            },
            JsonTerm::Bnode { value } => SelectValue::BlankNode(value),
        }
    }
}
