use reqwest::StatusCode;

/// Failures the HTTP layer needs to tell apart. Everything else travels as a plain
/// `anyhow::Error` and becomes a 500.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("No resource exists associated with id: {0}.")]
    NotFound(String),

    #[error("{url} responded with {status}")]
    Upstream {
        url: String,
        status: StatusCode,
        body: String,
    },

    #[error("{url} is unreachable: {source}")]
    Unreachable {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} response is missing the {header} header")]
    MissingHeader { url: String, header: &'static str },

    #[error("malformed request body: {0}")]
    Malformed(String),
}

impl Error {
    pub(crate) fn not_found(id: &str) -> anyhow::Error {
        Error::NotFound(id.to_string()).into()
    }

    /// Status code to hand back to the caller of the bridge.
    pub fn status(&self) -> StatusCode {
        match self {
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Malformed(_) => StatusCode::BAD_REQUEST,
            Error::Upstream { status, .. } => *status,
            Error::Unreachable { .. } | Error::MissingHeader { .. } => StatusCode::BAD_GATEWAY,
        }
    }
}
