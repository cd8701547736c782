use oxiri::Iri;
use oxrdf::{IriParseError, NamedNode};
use std::fmt::{Display, Formatter};

/// An IRI prefix used to mint the IRIs of a vocabulary.
///
/// ```
/// use rdf_resources_model::Namespace;
///
/// let dbo = Namespace::new("http://dbpedia.org/ontology/")?;
/// assert_eq!(dbo.term("Band")?.as_str(), "http://dbpedia.org/ontology/Band");
/// # Result::<_, Box<dyn std::error::Error>>::Ok(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Namespace {
    prefix: String,
}

impl Namespace {
    /// Creates a [Namespace], checking that `prefix` is an absolute IRI.
    pub fn new(prefix: impl Into<String>) -> Result<Self, IriParseError> {
        let prefix = prefix.into();
        Iri::parse(prefix.as_str())?;
        Ok(Self { prefix })
    }

    /// Returns the IRI of `local_name` inside this namespace.
    pub fn term(&self, local_name: &str) -> Result<NamedNode, IriParseError> {
        NamedNode::new(format!("{}{local_name}", self.prefix))
    }

    /// Returns whether `iri` starts with the prefix of this namespace.
    pub fn contains(&self, iri: &str) -> bool {
        iri.starts_with(&self.prefix)
    }

    pub fn as_str(&self) -> &str {
        &self.prefix
    }
}

impl Display for Namespace {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.prefix)
    }
}
