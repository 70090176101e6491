use anyhow::{Context, Result};
use oxrdf::Graph;
use oxttl::TurtleParser;

/// Parse a turtle document. Relative IRIs such as `<>` resolve against `base_iri`.
pub fn parse_turtle(text: &str, base_iri: Option<&str>) -> Result<Graph> {
    let mut parser = TurtleParser::new();
    if let Some(base_iri) = base_iri {
        parser = parser
            .with_base_iri(base_iri)
            .with_context(|| format!("invalid base IRI {base_iri}"))?;
    }
    let mut graph = Graph::new();
    for triple in parser.for_slice(text.as_bytes()) {
        graph.insert(&triple.context("malformed turtle")?);
    }
    Ok(graph)
}

pub fn to_ntriples(graph: &Graph) -> String {
    graph.to_string()
}
