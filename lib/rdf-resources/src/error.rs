use rdf_resources_model::IriParseError;
use rdf_resources_sparql::EndpointError;
use std::sync::Arc;

/// An error in the declaration of a [`ResourceClass`](crate::ResourceClass).
///
/// Declaring a class never fails. The error is reported by the first operation that needs the
/// class to talk to its endpoint.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigurationError {
    /// The endpoint URI is not an HTTP(S) URL or the HTTP client cannot be built.
    #[error("Invalid endpoint for class {class}: {error}")]
    InvalidEndpoint {
        class: String,
        #[source]
        error: EndpointError,
    },
    /// The prefix is not an absolute IRI.
    #[error("Invalid prefix '{prefix}' for class {class}: {error}")]
    InvalidPrefix {
        class: String,
        prefix: String,
        #[source]
        error: IriParseError,
    },
    #[error("The label of class {class} is empty")]
    EmptyLabel { class: String },
    /// The concatenation of prefix and label is not a valid IRI.
    #[error("Invalid class IRI '{iri}': {error}")]
    InvalidClassIri {
        iri: String,
        #[source]
        error: IriParseError,
    },
    #[error("The page size of class {class} must be greater than zero")]
    InvalidPageSize { class: String },
    #[error("The timeout of class {class} must be greater than zero")]
    InvalidTimeout { class: String },
}

/// An error raised while enumerating resources or looking up their properties.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum LookupError {
    /// The class of the resource is misconfigured.
    #[error(transparent)]
    Configuration(Arc<ConfigurationError>),
    /// The URI bound to the resource is not a valid IRI.
    #[error("Invalid resource IRI '{iri}': {error}")]
    InvalidResourceIri {
        iri: String,
        #[source]
        error: IriParseError,
    },
    /// The property key is not a valid IRI.
    #[error("Invalid property IRI '{iri}': {error}")]
    InvalidPropertyIri {
        iri: String,
        #[source]
        error: IriParseError,
    },
    /// The endpoint is unreachable or failed to answer the query.
    #[error(transparent)]
    Endpoint(#[from] EndpointError),
}

impl From<Arc<ConfigurationError>> for LookupError {
    fn from(error: Arc<ConfigurationError>) -> Self {
        Self::Configuration(error)
    }
}
