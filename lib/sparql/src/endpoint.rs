use crate::error::EndpointError;
use crate::query::{SelectQuery, A};
use crate::results::{bound_iris, results_format, QueryResults, ACCEPT_RESULTS};
use rdf_resources_model::{NamedNode, NamedNodeRef, VariableRef};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use sparesults::QuerySolution;
use std::fmt::{Debug, Display, Formatter};
use std::time::Duration;
use tracing::{debug, trace, warn};
use url::Url;

/// Credentials for HTTP Basic authentication.
#[derive(Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl Debug for Credentials {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// A client for a [SPARQL protocol](https://www.w3.org/TR/sparql11-protocol/) endpoint.
///
/// Queries are sent with `GET` and the results are parsed with `sparesults`. Each call is exactly
/// one HTTP round-trip; failures are not retried.
///
/// Cloning an endpoint is cheap and shares the underlying connection pool.
#[derive(Clone, Debug)]
pub struct SparqlEndpoint {
    url: Url,
    credentials: Option<Credentials>,
    client: Client,
}

impl SparqlEndpoint {
    /// Creates an endpoint for an already parsed URL.
    pub fn new(url: Url) -> Result<Self, EndpointError> {
        Self::with_client(url, Client::new())
    }

    /// Parses `url` and creates an endpoint for it.
    pub fn parse(url: &str) -> Result<Self, EndpointError> {
        let parsed = Url::parse(url).map_err(|error| EndpointError::InvalidUrl {
            url: url.to_owned(),
            error,
        })?;
        Self::new(parsed)
    }

    /// Creates an endpoint that sends its requests with `client`.
    pub fn with_client(url: Url, client: Client) -> Result<Self, EndpointError> {
        if !matches!(url.scheme(), "http" | "https") {
            return Err(EndpointError::UnsupportedScheme(url.scheme().to_owned()));
        }
        Ok(Self {
            url,
            credentials: None,
            client,
        })
    }

    /// Authenticates every request with HTTP Basic authentication.
    #[must_use]
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Replaces the HTTP client by one that aborts requests after `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, EndpointError> {
        self.client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(EndpointError::Client)?;
        Ok(self)
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Sends a SPARQL query and parses the results.
    pub async fn query(&self, query: &str) -> Result<QueryResults, EndpointError> {
        let mut url = self.url.clone();
        url.query_pairs_mut().append_pair("query", query);
        debug!(endpoint = %self.url, query, "Sending SPARQL query");

        let mut request = self.client.get(url).header(ACCEPT, ACCEPT_RESULTS);
        if let Some(credentials) = &self.credentials {
            request = request.basic_auth(&credentials.username, Some(&credentials.password));
        }

        let response = request.send().await.map_err(|error| self.unreachable(error))?;
        let status = response.status();
        if status == StatusCode::BAD_REQUEST {
            let message = response.text().await.unwrap_or_default();
            warn!(endpoint = %self.url, %status, "SPARQL endpoint rejected the query");
            return Err(EndpointError::InvalidQuery {
                query: query.to_owned(),
                message,
            });
        }
        if !status.is_success() {
            warn!(endpoint = %self.url, %status, "SPARQL endpoint returned an error status");
            return Err(EndpointError::Status {
                url: self.url.clone(),
                status,
            });
        }

        let format = results_format(
            response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|value| value.to_str().ok()),
        );
        let body = response
            .bytes()
            .await
            .map_err(|error| self.unreachable(error))?;
        let results = QueryResults::read(&body, format)?;
        trace!(endpoint = %self.url, kind = results.kind(), "Parsed SPARQL results");
        Ok(results)
    }

    /// Validates and runs a `SELECT` query.
    pub async fn select(&self, query: &SelectQuery) -> Result<Vec<QuerySolution>, EndpointError> {
        query.to_query()?;
        match self.query(&query.to_string()).await? {
            QueryResults::Solutions(solutions) => {
                trace!(endpoint = %self.url, count = solutions.len(), "Received solutions");
                Ok(solutions)
            }
            results @ QueryResults::Boolean(_) => Err(EndpointError::UnexpectedResults {
                expected: "solutions",
                actual: results.kind(),
            }),
        }
    }

    /// Runs an `ASK` query.
    pub async fn ask(&self, query: &str) -> Result<bool, EndpointError> {
        match self.query(query).await? {
            QueryResults::Boolean(value) => Ok(value),
            results @ QueryResults::Solutions(_) => Err(EndpointError::UnexpectedResults {
                expected: "boolean",
                actual: results.kind(),
            }),
        }
    }

    /// Runs a `SELECT` query and returns every IRI bound in the solutions.
    pub async fn select_iris(&self, query: &SelectQuery) -> Result<Vec<NamedNode>, EndpointError> {
        Ok(bound_iris(&self.select(query).await?))
    }

    /// Returns all the classes of things stored in the default graph of this endpoint.
    pub async fn classes(&self) -> Result<Vec<NamedNode>, EndpointError> {
        let query = SelectQuery::new()
            .select(VariableRef::new_unchecked("class"))
            .distinct()
            .where_triple("?a", A, "?class");
        self.select_iris(&query).await
    }

    /// Returns all predicates used by instances of `class_uri`.
    ///
    /// This can be a wide selection with predicates from many different namespaces.
    pub async fn properties(
        &self,
        class_uri: NamedNodeRef<'_>,
    ) -> Result<Vec<NamedNode>, EndpointError> {
        let query = SelectQuery::new()
            .select(VariableRef::new_unchecked("property"))
            .distinct()
            .where_triple("?object", A, class_uri)
            .where_triple("?object", "?property", "?x");
        self.select_iris(&query).await
    }

    /// Returns all resources whose `rdf:type` is `class_uri`.
    pub async fn resources(
        &self,
        class_uri: NamedNodeRef<'_>,
    ) -> Result<Vec<NamedNode>, EndpointError> {
        self.select_iris(&instances_query(class_uri)).await
    }

    fn unreachable(&self, error: reqwest::Error) -> EndpointError {
        EndpointError::Unreachable {
            url: self.url.clone(),
            error,
        }
    }
}

impl Display for SparqlEndpoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "<SparqlEndpoint: {}>", self.url)
    }
}

/// The query enumerating the instances of `class_uri`, bound to `?resource`.
pub fn instances_query(class_uri: NamedNodeRef<'_>) -> SelectQuery {
    SelectQuery::new()
        .select(VariableRef::new_unchecked("resource"))
        .distinct()
        .where_triple("?resource", A, class_uri)
}
