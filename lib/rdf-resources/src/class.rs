//! Declaring classes of RDF resources.
//!
//! A [ResourceClass] is created from a [ResourceClassConfig] that names the SPARQL endpoint
//! serving the resources, the namespace of the class and its label. The IRI of the class is the
//! concatenation of prefix and label.
//!
//! Usage example:
//! ```
//! use rdf_resources::{ResourceClass, ResourceClassConfig};
//!
//! let band = ResourceClass::new(ResourceClassConfig::new(
//!     "Band",
//!     "http://dbpedia.org/sparql",
//!     "http://dbpedia.org/ontology/",
//! ));
//! assert_eq!(band.class_uri()?.as_str(), "http://dbpedia.org/ontology/Band");
//!
//! let kraftwerk = band.resource("http://dbpedia.org/resource/Kraftwerk");
//! assert_eq!(kraftwerk.to_string(), "<Band: http://dbpedia.org/resource/Kraftwerk>");
//! # Result::<_, Box<dyn std::error::Error>>::Ok(())
//! ```

use crate::error::{ConfigurationError, LookupError};
use crate::resource::Resource;
use crate::stream::ResourceStream;
use rdf_resources_model::{NamedNode, NamedNodeRef, Namespace, VariableRef};
use rdf_resources_sparql::{instances_query, Credentials, SelectQuery, SparqlEndpoint};
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Formatter};
use std::sync::Arc;
use std::time::Duration;

/// The declaration of a class of RDF resources.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct ResourceClassConfig {
    /// The name of the class, used as label if no label is given.
    pub name: String,
    /// The URL of the SPARQL endpoint serving the resources.
    pub endpoint_uri: String,
    /// The namespace of the class IRI and its properties.
    pub prefix: String,
    /// The local name of the class IRI in the namespace, defaulting to the name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// HTTP Basic authentication for the endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credentials: Option<Credentials>,
    /// Enumerate resources in pages of this size instead of with a single query.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<usize>,
    /// Abort requests to the endpoint after this many milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
}

impl ResourceClassConfig {
    pub fn new(
        name: impl Into<String>,
        endpoint_uri: impl Into<String>,
        prefix: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            endpoint_uri: endpoint_uri.into(),
            prefix: prefix.into(),
            label: None,
            credentials: None,
            page_size: None,
            timeout_ms: None,
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[must_use]
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    #[must_use]
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = Some(page_size);
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = Some(u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX));
        self
    }

    /// Returns the label, defaulting to the name of the class.
    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }
}

/// The resolved parts of a valid [ResourceClassConfig].
#[derive(Debug)]
struct ClassBinding {
    endpoint: SparqlEndpoint,
    namespace: Namespace,
    class_uri: NamedNode,
}

impl ClassBinding {
    fn try_new(config: &ResourceClassConfig) -> Result<Self, ConfigurationError> {
        let class = || config.name.clone();

        let mut endpoint = SparqlEndpoint::parse(&config.endpoint_uri)
            .map_err(|error| ConfigurationError::InvalidEndpoint {
                class: class(),
                error,
            })?;
        if let Some(credentials) = &config.credentials {
            endpoint = endpoint.with_credentials(credentials.clone());
        }
        if let Some(timeout) = config.timeout_ms {
            if timeout == 0 {
                return Err(ConfigurationError::InvalidTimeout { class: class() });
            }
            endpoint = endpoint
                .with_timeout(Duration::from_millis(timeout))
                .map_err(|error| ConfigurationError::InvalidEndpoint {
                    class: class(),
                    error,
                })?;
        }

        let namespace =
            Namespace::new(config.prefix.as_str()).map_err(|error| {
                ConfigurationError::InvalidPrefix {
                    class: class(),
                    prefix: config.prefix.clone(),
                    error,
                }
            })?;

        let label = config.label();
        if label.is_empty() {
            return Err(ConfigurationError::EmptyLabel { class: class() });
        }
        let class_uri = namespace
            .term(label)
            .map_err(|error| ConfigurationError::InvalidClassIri {
                iri: format!("{}{label}", config.prefix),
                error,
            })?;

        if config.page_size == Some(0) {
            return Err(ConfigurationError::InvalidPageSize { class: class() });
        }

        Ok(Self {
            endpoint,
            namespace,
            class_uri,
        })
    }
}

struct ClassInner {
    config: ResourceClassConfig,
    binding: Result<ClassBinding, Arc<ConfigurationError>>,
}

/// A class of RDF resources served by a SPARQL endpoint.
///
/// Cloning a [ResourceClass] is cheap; all clones and all [Resource]s created from them share the
/// same configuration, which never changes after [ResourceClass::new].
#[derive(Clone)]
pub struct ResourceClass {
    inner: Arc<ClassInner>,
}

impl ResourceClass {
    /// Declares a class.
    ///
    /// This never fails. A misconfigured class reports a [ConfigurationError] on first use.
    pub fn new(config: ResourceClassConfig) -> Self {
        let binding = ClassBinding::try_new(&config).map_err(Arc::new);
        if let Err(error) = &binding {
            tracing::debug!(class = %config.name, %error, "Declared a misconfigured resource class");
        }
        Self {
            inner: Arc::new(ClassInner { config, binding }),
        }
    }

    pub fn config(&self) -> &ResourceClassConfig {
        &self.inner.config
    }

    pub fn name(&self) -> &str {
        &self.inner.config.name
    }

    pub fn label(&self) -> &str {
        self.inner.config.label()
    }

    /// Checks the configuration without contacting the endpoint.
    pub fn validate(&self) -> Result<(), LookupError> {
        self.binding().map(|_| ())
    }

    /// Returns the IRI of the class, i.e. prefix followed by label.
    pub fn class_uri(&self) -> Result<NamedNodeRef<'_>, LookupError> {
        Ok(self.binding()?.class_uri.as_ref())
    }

    /// Returns the namespace of the class.
    pub fn namespace(&self) -> Result<&Namespace, LookupError> {
        Ok(&self.binding()?.namespace)
    }

    pub fn endpoint(&self) -> Result<&SparqlEndpoint, LookupError> {
        Ok(&self.binding()?.endpoint)
    }

    /// Binds `uri` to this class.
    ///
    /// The endpoint is not contacted and the URI is not validated until the first lookup.
    pub fn resource(&self, uri: impl Into<String>) -> Resource {
        Resource::new(self.clone(), uri.into())
    }

    /// Enumerates the resources whose `rdf:type` is the IRI of this class.
    ///
    /// No request is sent before the stream is polled. Every call starts a new enumeration.
    pub fn resources(&self) -> ResourceStream {
        self.query().resources()
    }

    /// Starts a refined enumeration of the resources of this class.
    pub fn query(&self) -> ResourceQuery {
        ResourceQuery {
            class: self.clone(),
            refinements: SelectQuery::new(),
        }
    }

    /// Enumerates the resources satisfying `expression`, e.g. `strstarts(str(?resource), "http://")`.
    pub fn filter(&self, expression: impl Into<String>) -> ResourceQuery {
        self.query().filter(expression)
    }

    /// Returns all predicates used by resources of this class.
    pub async fn properties(&self) -> Result<Vec<NamedNode>, LookupError> {
        let binding = self.binding()?;
        Ok(binding
            .endpoint
            .properties(binding.class_uri.as_ref())
            .await?)
    }

    fn binding(&self) -> Result<&ClassBinding, LookupError> {
        self.inner
            .binding
            .as_ref()
            .map_err(|error| LookupError::Configuration(Arc::clone(error)))
    }
}

impl Debug for ResourceClass {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceClass")
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}

const RESOURCE: VariableRef<'static> = VariableRef::new_unchecked("resource");

/// A refined enumeration of the resources of a [ResourceClass].
///
/// The enumerated resources are bound to `?resource`. Additional patterns can bind properties of
/// the resource to variables that are then used in filters and ordering conditions.
#[derive(Clone, Debug)]
pub struct ResourceQuery {
    class: ResourceClass,
    refinements: SelectQuery,
}

impl ResourceQuery {
    /// Binds the values of `property` to `variable`.
    #[must_use]
    pub fn bind_property(mut self, property: NamedNodeRef<'_>, variable: VariableRef<'_>) -> Self {
        self.refinements = self
            .refinements
            .where_triple(RESOURCE, property, variable);
        self
    }

    /// Adds a `FILTER` constraint.
    #[must_use]
    pub fn filter(mut self, expression: impl Into<String>) -> Self {
        self.refinements = self.refinements.filter(expression);
        self
    }

    #[must_use]
    pub fn order_by(mut self, condition: impl Into<String>) -> Self {
        self.refinements = self.refinements.order_by(condition);
        self
    }

    #[must_use]
    pub fn limit(mut self, limit: usize) -> Self {
        self.refinements = self.refinements.limit(limit);
        self
    }

    #[must_use]
    pub fn offset(mut self, offset: usize) -> Self {
        self.refinements = self.refinements.offset(offset);
        self
    }

    /// Returns the `SELECT` query without paging.
    pub fn to_select(&self) -> Result<SelectQuery, LookupError> {
        let mut query = instances_query(self.class.class_uri()?);
        for pattern in self.refinements.patterns() {
            query = query.where_triple(
                pattern.subject.clone(),
                pattern.predicate.clone(),
                pattern.object.clone(),
            );
        }
        for filter in self.refinements.filters() {
            query = query.filter(filter.as_str());
        }
        for condition in self.refinements.order_conditions() {
            query = query.order_by(condition.as_str());
        }
        Ok(query)
    }

    /// Enumerates the matching resources.
    pub fn resources(&self) -> ResourceStream {
        ResourceStream::new(
            self.class.clone(),
            self.to_select(),
            self.refinements.get_offset().unwrap_or_default(),
            self.refinements.get_limit(),
        )
    }
}
