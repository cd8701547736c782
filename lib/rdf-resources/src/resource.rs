use crate::class::ResourceClass;
use crate::error::LookupError;
use crate::values::{PropertyValues, ResourceDescription};
use rdf_resources_model::{NamedNode, NamedNodeRef, Term, VariableRef};
use rdf_resources_sparql::SelectQuery;
use std::fmt::{Display, Formatter};
use tracing::debug;

/// A handle on an RDF resource of a [ResourceClass].
///
/// A [Resource] only holds its URI and its class. Every lookup is a new query against the
/// endpoint of the class; values are never cached.
#[derive(Clone, Debug)]
pub struct Resource {
    class: ResourceClass,
    uri: String,
}

impl Resource {
    pub(crate) fn new(class: ResourceClass, uri: String) -> Self {
        Self { class, uri }
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn class(&self) -> &ResourceClass {
        &self.class
    }

    /// Returns the URI as an IRI, failing if it is not a valid IRI.
    pub fn iri(&self) -> Result<NamedNode, LookupError> {
        NamedNode::new(self.uri.as_str()).map_err(|error| LookupError::InvalidResourceIri {
            iri: self.uri.clone(),
            error,
        })
    }

    /// Looks up the values of `property`.
    ///
    /// A property the resource does not have yields [PropertyValues::Empty].
    pub async fn get(&self, property: NamedNodeRef<'_>) -> Result<PropertyValues, LookupError> {
        let endpoint = self.class.endpoint()?;
        let value = VariableRef::new_unchecked("value");
        let query = SelectQuery::new()
            .select(value)
            .where_triple(self.iri()?, property, value);
        debug!(resource = %self.uri, %property, "Looking up property");

        let solutions = endpoint.select(&query).await?;
        Ok(solutions
            .iter()
            .filter_map(|solution| solution.get("value").cloned())
            .collect())
    }

    /// Looks up the values of the property with the IRI `property`.
    pub async fn get_iri(&self, property: &str) -> Result<PropertyValues, LookupError> {
        let property =
            NamedNode::new(property).map_err(|error| LookupError::InvalidPropertyIri {
                iri: property.to_owned(),
                error,
            })?;
        self.get(property.as_ref()).await
    }

    /// Looks up the values of the property `local_name` in the namespace of the class.
    pub async fn get_in(&self, local_name: &str) -> Result<PropertyValues, LookupError> {
        let namespace = self.class.namespace()?;
        let property =
            namespace
                .term(local_name)
                .map_err(|error| LookupError::InvalidPropertyIri {
                    iri: format!("{namespace}{local_name}"),
                    error,
                })?;
        self.get(property.as_ref()).await
    }

    /// Fetches all properties of this resource with a single query.
    pub async fn describe(&self) -> Result<ResourceDescription, LookupError> {
        let endpoint = self.class.endpoint()?;
        let property = VariableRef::new_unchecked("property");
        let value = VariableRef::new_unchecked("value");
        let query = SelectQuery::new()
            .select(property)
            .select(value)
            .where_triple(self.iri()?, property, value);
        debug!(resource = %self.uri, "Describing resource");

        let solutions = endpoint.select(&query).await?;
        Ok(solutions
            .iter()
            .filter_map(|solution| match (solution.get("property"), solution.get("value")) {
                (Some(Term::NamedNode(property)), Some(value)) => {
                    Some((property.clone(), value.clone()))
                }
                _ => None,
            })
            .collect())
    }

    /// Returns whether the endpoint knows any triple with this resource as subject.
    pub async fn exists(&self) -> Result<bool, LookupError> {
        let endpoint = self.class.endpoint()?;
        let query = format!("ASK {{ {} ?p ?o }}", self.iri()?);
        Ok(endpoint.ask(&query).await?)
    }
}

impl Display for Resource {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "<{}: {}>", self.class.label(), self.uri)
    }
}

impl PartialEq for Resource {
    fn eq(&self, other: &Self) -> bool {
        self.uri == other.uri && self.class.config() == other.class.config()
    }
}

impl Eq for Resource {}
