use reqwest::StatusCode;
use sparesults::QueryResultsParseError;
use spargebra::SparqlSyntaxError;
use url::Url;

/// An error raised while building a [`SelectQuery`](crate::SelectQuery).
#[derive(Debug, thiserror::Error)]
pub enum QueryBuildError {
    /// The query has no triple pattern.
    #[error("The query has no where clause")]
    MissingWhereClause,
    /// The rendered query is not valid SPARQL.
    #[error(transparent)]
    Syntax(#[from] SparqlSyntaxError),
}

/// An error raised while talking to a [`SparqlEndpoint`](crate::SparqlEndpoint).
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum EndpointError {
    /// The endpoint URL cannot be parsed.
    #[error("Invalid SPARQL endpoint URL '{url}': {error}")]
    InvalidUrl {
        /// The URL itself.
        url: String,
        /// The parsing error.
        #[source]
        error: url::ParseError,
    },
    /// Only HTTP(S) endpoints are supported.
    #[error("Unsupported URL scheme '{0}', expected 'http' or 'https'")]
    UnsupportedScheme(String),
    /// The HTTP client could not be initialized.
    #[error("Could not create the HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    /// The request could not be sent or the response could not be read.
    #[error("The SPARQL endpoint {url} is unreachable: {error}")]
    Unreachable {
        url: Url,
        #[source]
        error: reqwest::Error,
    },
    /// The endpoint rejected the query with `400 Bad Request`.
    #[error("'{query}' is not a valid SPARQL query: {message}")]
    InvalidQuery { query: String, message: String },
    /// The endpoint answered with another non-success status.
    #[error("The SPARQL endpoint {url} answered with status {status}")]
    Status { url: Url, status: StatusCode },
    /// The response is not a valid SPARQL query results document.
    #[error(transparent)]
    ResultsParsing(#[from] QueryResultsParseError),
    /// The endpoint returned a boolean for a `SELECT` query or solutions for an `ASK` query.
    #[error("Expected {expected} results but the endpoint returned {actual} results")]
    UnexpectedResults {
        expected: &'static str,
        actual: &'static str,
    },
    /// The query could not be built.
    #[error(transparent)]
    Query(#[from] QueryBuildError),
}
