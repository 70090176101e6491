use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use minijinja::Environment;
use serde::Serialize;
use tracing::info;

pub const DEFAULT_RESOURCE: &str = "default-resource.ttl";
pub const PCDM_COLLECTION: &str = "pcdm-collection.ttl";
pub const LDP_INDIRECT: &str = "ldp-indirect.ttl";
pub const GET_RESOURCE_URI: &str = "get-resource-uri.sparql";
pub const GET_PROXIES_FOR: &str = "get-proxies-for.sparql";
pub const NODE: &str = "node.sparql";

static BUILTIN: &[(&str, &str)] = &[
    (DEFAULT_RESOURCE, include_str!("../templates/default-resource.ttl")),
    (PCDM_COLLECTION, include_str!("../templates/pcdm-collection.ttl")),
    (LDP_INDIRECT, include_str!("../templates/ldp-indirect.ttl")),
    (GET_RESOURCE_URI, include_str!("../templates/get-resource-uri.sparql")),
    (GET_PROXIES_FOR, include_str!("../templates/get-proxies-for.sparql")),
    (NODE, include_str!("../templates/node.sparql")),
];

/// Named RDF and SPARQL templates shared by the repository and triplestore clients.
pub struct Templates {
    env: Environment<'static>,
}

impl Templates {
    pub fn new() -> Result<Templates> {
        let mut env = Environment::new();
        env.add_filter("sparql_escape", sparql_escape);
        for &(name, source) in BUILTIN {
            env.add_template(name, source)
                .with_context(|| format!("built-in template {name} does not parse"))?;
        }
        Ok(Templates { env })
    }

    /// Built-in templates, overridden by any file of the same name in `dir`.
    pub fn with_overrides(dir: &Path) -> Result<Templates> {
        let mut templates = Templates::new()?;
        let entries = fs::read_dir(dir)
            .with_context(|| format!("unable to read template directory {}", dir.display()))?;
        for entry in entries {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            let source = fs::read_to_string(&path)
                .with_context(|| format!("unable to read template {}", path.display()))?;
            info!(target: "lifecycle", name, "loaded template override");
            templates
                .env
                .add_template_owned(name.to_string(), source)
                .with_context(|| format!("template {} does not parse", path.display()))?;
        }
        Ok(templates)
    }

    pub fn render<S: Serialize>(&self, name: &str, vars: S) -> Result<String> {
        let template = self
            .env
            .get_template(name)
            .with_context(|| format!("unknown template {name}"))?;
        template
            .render(vars)
            .with_context(|| format!("failed to render template {name}"))
    }
}

/// Escape a value for use inside a double-quoted SPARQL or Turtle string literal.
pub(crate) fn sparql_escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            c => escaped.push(c),
        }
    }
    escaped
}
