use thiserror::Error;

pub type EnhanceResult<T> = Result<T, EnhanceError>;

#[derive(Debug, Error)]
pub enum EnhanceError {
    #[error("html parse error: {0}")]
    HtmlParse(String),

    #[error("unknown node: {0}")]
    UnknownNode(usize),

    #[error("node {0} is not an element")]
    NotAnElement(usize),

    #[error("missing attribute `{attribute}` on element `{element_id}`")]
    MissingAttribute {
        attribute: String,
        element_id: String,
    },

    #[error("failed to decode attribute `{attribute}` on element `{element_id}`: {source}")]
    AttributeDecode {
        attribute: String,
        element_id: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{backend} backend failed: {message}")]
    Backend {
        backend: &'static str,
        message: String,
    },

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("invalid date format: {0}")]
    InvalidDateFormat(String),

    #[error("page was already enhanced")]
    AlreadyLoaded,
}
