//! Building SPARQL `SELECT` queries and running them against remote SPARQL endpoints.

mod endpoint;
pub mod error;
mod query;
mod results;

pub use endpoint::{instances_query, Credentials, SparqlEndpoint};
pub use error::{EndpointError, QueryBuildError};
pub use query::{PatternTerm, SelectQuery, TriplePattern, A};
pub use results::{bound_iris, results_format, QueryResults};

// Re-export the results and query types of the oxigraph toolkit.
pub use sparesults::{QueryResultsFormat, QuerySolution};
pub use spargebra::{Query, SparqlSyntaxError};
pub use url::Url;
