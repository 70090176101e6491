use axum::http::{HeaderMap, HeaderValue, header};
use axum::response::{IntoResponse, Response};

use crate::UpstreamResponse;
use crate::fedora::TEXT_TURTLE;

pub(super) const APPLICATION_N_TRIPLES: &str = "application/n-triples";

/// A repository body relayed with the media type Fedora labelled it with.
pub(super) struct RdfBody {
    pub(super) mimetype: Option<String>,
    pub(super) body: String,
}

impl RdfBody {
    pub(super) fn relay(response: UpstreamResponse) -> RdfBody {
        RdfBody {
            mimetype: response
                .header(header::CONTENT_TYPE.as_str())
                .map(str::to_string),
            body: response.body,
        }
    }
}

impl IntoResponse for RdfBody {
    fn into_response(self) -> Response {
        let mut response = self.body.into_response();
        if let Some(value) = self
            .mimetype
            .and_then(|mimetype| HeaderValue::from_str(&mimetype).ok())
        {
            response.headers_mut().insert(header::CONTENT_TYPE, value);
        }
        response
    }
}

fn header_or_turtle(headers: &HeaderMap, name: header::HeaderName) -> String {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(TEXT_TURTLE)
        .to_string()
}

pub(super) fn accept(headers: &HeaderMap) -> String {
    header_or_turtle(headers, header::ACCEPT)
}

pub(super) fn content_type(headers: &HeaderMap) -> String {
    header_or_turtle(headers, header::CONTENT_TYPE)
}

/// Bodies typed `application/json` carry a content record rather than RDF.
pub(super) fn is_node_record(mimetype: &str) -> bool {
    mimetype
        .split(';')
        .next()
        .is_some_and(|essence| essence.trim().eq_ignore_ascii_case("application/json"))
}
