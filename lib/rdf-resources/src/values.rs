use rdf_resources_model::{Literal, NamedNode, NativeValue, Term};
use std::collections::BTreeMap;

/// The values of a property of a resource.
///
/// RDF properties are multi-valued, so a lookup yields no value, one value or several values.
/// An absent property is [PropertyValues::Empty], not an error.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum PropertyValues {
    #[default]
    Empty,
    Single(Term),
    Multiple(Vec<Term>),
}

impl PropertyValues {
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    /// Returns the value if there is exactly one.
    pub fn single(&self) -> Option<&Term> {
        match self {
            Self::Single(term) => Some(term),
            _ => None,
        }
    }

    /// Returns the first value in the order reported by the endpoint.
    pub fn first(&self) -> Option<&Term> {
        self.as_slice().first()
    }

    pub fn as_slice(&self) -> &[Term] {
        match self {
            Self::Empty => &[],
            Self::Single(term) => std::slice::from_ref(term),
            Self::Multiple(terms) => terms,
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Term> {
        self.as_slice().iter()
    }

    pub fn into_vec(self) -> Vec<Term> {
        match self {
            Self::Empty => Vec::new(),
            Self::Single(term) => vec![term],
            Self::Multiple(terms) => terms,
        }
    }

    /// Returns the literal values.
    pub fn literals(&self) -> impl Iterator<Item = &Literal> {
        self.iter().filter_map(|term| match term {
            Term::Literal(literal) => Some(literal),
            _ => None,
        })
    }

    /// Returns the IRI values.
    pub fn iris(&self) -> impl Iterator<Item = &NamedNode> {
        self.iter().filter_map(|term| match term {
            Term::NamedNode(node) => Some(node),
            _ => None,
        })
    }

    /// Returns the literal whose language tag is `language`.
    pub fn with_language(&self, language: &str) -> Option<&Literal> {
        self.literals().find(|literal| {
            literal
                .language()
                .is_some_and(|tag| tag.eq_ignore_ascii_case(language))
        })
    }

    /// Converts every value into its [NativeValue].
    pub fn native_values(&self) -> Vec<NativeValue> {
        self.iter().filter_map(NativeValue::from_term).collect()
    }
}

impl From<Vec<Term>> for PropertyValues {
    fn from(mut terms: Vec<Term>) -> Self {
        match terms.len() {
            0 => Self::Empty,
            1 => terms.pop().map_or(Self::Empty, Self::Single),
            _ => Self::Multiple(terms),
        }
    }
}

impl FromIterator<Term> for PropertyValues {
    fn from_iter<T: IntoIterator<Item = Term>>(iter: T) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl IntoIterator for PropertyValues {
    type Item = Term;
    type IntoIter = std::vec::IntoIter<Term>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_vec().into_iter()
    }
}

impl<'a> IntoIterator for &'a PropertyValues {
    type Item = &'a Term;
    type IntoIter = std::slice::Iter<'a, Term>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// All properties of a resource, as reported by the endpoint in a single query.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResourceDescription {
    properties: BTreeMap<NamedNode, PropertyValues>,
}

impl ResourceDescription {
    /// Returns the values of `property`, which are empty if the resource does not have it.
    pub fn get(&self, property: &NamedNode) -> PropertyValues {
        self.properties.get(property).cloned().unwrap_or_default()
    }

    pub fn contains(&self, property: &NamedNode) -> bool {
        self.properties.contains_key(property)
    }

    /// Returns the properties, ordered by IRI.
    pub fn properties(&self) -> impl Iterator<Item = &NamedNode> {
        self.properties.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&NamedNode, &PropertyValues)> {
        self.properties.iter()
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

impl FromIterator<(NamedNode, Term)> for ResourceDescription {
    fn from_iter<T: IntoIterator<Item = (NamedNode, Term)>>(iter: T) -> Self {
        let mut grouped = BTreeMap::<NamedNode, Vec<Term>>::new();
        for (property, value) in iter {
            grouped.entry(property).or_default().push(value);
        }
        Self {
            properties: grouped
                .into_iter()
                .map(|(property, values)| (property, PropertyValues::from(values)))
                .collect(),
        }
    }
}
