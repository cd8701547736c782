//! An incremental builder for flat SPARQL `SELECT` queries.
//!
//! Usage example:
//! ```
//! use rdf_resources_model::{NamedNode, VariableRef};
//! use rdf_resources_sparql::{SelectQuery, A};
//!
//! let band = NamedNode::new("http://dbpedia.org/ontology/Band")?;
//! let query = SelectQuery::new()
//!     .select(VariableRef::new_unchecked("resource"))
//!     .where_triple("?resource", A, band);
//! assert_eq!(
//!     query.to_string(),
//!     "select ?resource where { ?resource a <http://dbpedia.org/ontology/Band> }"
//! );
//! # Result::<_, Box<dyn std::error::Error>>::Ok(())
//! ```

use crate::error::QueryBuildError;
use rdf_resources_model::{Literal, NamedNode, NamedNodeRef, Variable, VariableRef};
use spargebra::Query;
use std::fmt::{Display, Formatter};
use std::ops::{Bound, RangeBounds};

/// The `a` keyword, i.e. `rdf:type`, in predicate position.
pub const A: PatternTerm = PatternTerm::RdfType;

/// A term in a [TriplePattern].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PatternTerm {
    Variable(Variable),
    /// Rendered as the `a` keyword.
    RdfType,
    NamedNode(NamedNode),
    Literal(Literal),
}

impl Display for PatternTerm {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Variable(variable) => write!(f, "{variable}"),
            Self::RdfType => f.write_str("a"),
            Self::NamedNode(node) => write!(f, "{node}"),
            Self::Literal(literal) => write!(f, "{literal}"),
        }
    }
}

impl From<Variable> for PatternTerm {
    fn from(variable: Variable) -> Self {
        Self::Variable(variable)
    }
}

impl From<VariableRef<'_>> for PatternTerm {
    fn from(variable: VariableRef<'_>) -> Self {
        Self::Variable(variable.into_owned())
    }
}

impl From<NamedNode> for PatternTerm {
    fn from(node: NamedNode) -> Self {
        Self::NamedNode(node)
    }
}

impl From<NamedNodeRef<'_>> for PatternTerm {
    fn from(node: NamedNodeRef<'_>) -> Self {
        Self::NamedNode(node.into_owned())
    }
}

impl From<&NamedNode> for PatternTerm {
    fn from(node: &NamedNode) -> Self {
        Self::NamedNode(node.clone())
    }
}

impl From<Literal> for PatternTerm {
    fn from(literal: Literal) -> Self {
        Self::Literal(literal)
    }
}

/// Strings starting with `?` that form a valid variable name are variables. Every other string is
/// a simple literal.
impl From<&str> for PatternTerm {
    fn from(value: &str) -> Self {
        value
            .strip_prefix('?')
            .and_then(|name| Variable::new(name).ok())
            .map_or_else(
                || Self::Literal(Literal::new_simple_literal(value)),
                Self::Variable,
            )
    }
}

/// A `subject predicate object` pattern of a where clause.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TriplePattern {
    pub subject: PatternTerm,
    pub predicate: PatternTerm,
    pub object: PatternTerm,
}

impl TriplePattern {
    pub fn new(
        subject: impl Into<PatternTerm>,
        predicate: impl Into<PatternTerm>,
        object: impl Into<PatternTerm>,
    ) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
        }
    }
}

impl Display for TriplePattern {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.subject, self.predicate, self.object)
    }
}

/// A flat `SELECT` query that is built incrementally.
///
/// Every builder method consumes the query and returns the extended query. As [SelectQuery] is
/// [Clone], a partially built query can be reused as the base of several queries.
///
/// Only "flat" queries can be represented: one group of required patterns, one optional group,
/// filters, ordering and slicing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectQuery {
    projection: Vec<Variable>,
    distinct: bool,
    patterns: Vec<TriplePattern>,
    optional: Vec<TriplePattern>,
    filters: Vec<String>,
    order_by: Vec<String>,
    limit: Option<usize>,
    offset: Option<usize>,
}

impl SelectQuery {
    /// Creates a query without projection, which renders as `select *`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a variable to the projection.
    #[must_use]
    pub fn select(mut self, variable: impl Into<Variable>) -> Self {
        self.projection.push(variable.into());
        self
    }

    /// Adds several variables to the projection.
    #[must_use]
    pub fn select_all<V: Into<Variable>>(mut self, variables: impl IntoIterator<Item = V>) -> Self {
        self.projection.extend(variables.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    /// Adds a required triple pattern to the where clause.
    #[must_use]
    pub fn where_triple(
        mut self,
        subject: impl Into<PatternTerm>,
        predicate: impl Into<PatternTerm>,
        object: impl Into<PatternTerm>,
    ) -> Self {
        self.patterns
            .push(TriplePattern::new(subject, predicate, object));
        self
    }

    /// Adds a triple pattern to the optional group of the where clause.
    #[must_use]
    pub fn optional(
        mut self,
        subject: impl Into<PatternTerm>,
        predicate: impl Into<PatternTerm>,
        object: impl Into<PatternTerm>,
    ) -> Self {
        self.optional
            .push(TriplePattern::new(subject, predicate, object));
        self
    }

    /// Adds a `FILTER` constraint. The expression is used as is, e.g. `?size > 100`.
    #[must_use]
    pub fn filter(mut self, expression: impl Into<String>) -> Self {
        self.filters.push(expression.into());
        self
    }

    /// Adds an ordering condition, e.g. `?name` or `desc(?size)`.
    #[must_use]
    pub fn order_by(mut self, condition: impl Into<String>) -> Self {
        self.order_by.push(condition.into());
        self
    }

    #[must_use]
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    #[must_use]
    pub fn offset(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Restricts the results to the solution at `index`.
    #[must_use]
    pub fn nth(self, index: usize) -> Self {
        self.slice(index..=index)
    }

    /// Restricts the results to a range of solutions.
    ///
    /// A zero start does not emit an `offset` and an unbounded end does not emit a `limit`.
    #[must_use]
    pub fn slice(mut self, range: impl RangeBounds<usize>) -> Self {
        let start = match range.start_bound() {
            Bound::Included(start) => *start,
            Bound::Excluded(start) => start.saturating_add(1),
            Bound::Unbounded => 0,
        };
        let end = match range.end_bound() {
            Bound::Included(end) => Some(end.saturating_add(1)),
            Bound::Excluded(end) => Some(*end),
            Bound::Unbounded => None,
        };

        self.offset = (start > 0).then_some(start);
        self.limit = end.map(|end| end.saturating_sub(start));
        self
    }

    pub fn projection(&self) -> &[Variable] {
        &self.projection
    }

    /// Returns the required patterns of the where clause.
    pub fn patterns(&self) -> &[TriplePattern] {
        &self.patterns
    }

    pub fn filters(&self) -> &[String] {
        &self.filters
    }

    pub fn order_conditions(&self) -> &[String] {
        &self.order_by
    }

    pub fn get_limit(&self) -> Option<usize> {
        self.limit
    }

    pub fn get_offset(&self) -> Option<usize> {
        self.offset
    }

    /// Validates the query and parses it into its algebra representation.
    pub fn to_query(&self) -> Result<Query, QueryBuildError> {
        if self.patterns.is_empty() {
            return Err(QueryBuildError::MissingWhereClause);
        }
        Ok(Query::parse(&self.to_string(), None)?)
    }
}

impl Display for SelectQuery {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("select")?;
        if self.distinct {
            f.write_str(" distinct")?;
        }
        if self.projection.is_empty() {
            f.write_str(" *")?;
        }
        for variable in &self.projection {
            write!(f, " {variable}")?;
        }

        f.write_str(" where {")?;
        write_patterns(f, &self.patterns)?;
        if !self.optional.is_empty() {
            f.write_str(" optional {")?;
            write_patterns(f, &self.optional)?;
            f.write_str(" }")?;
        }
        for filter in &self.filters {
            write!(f, " filter ({filter})")?;
        }
        f.write_str(" }")?;

        if !self.order_by.is_empty() {
            write!(f, " order by {}", self.order_by.join(" "))?;
        }
        if let Some(limit) = self.limit {
            write!(f, " limit {limit}")?;
        }
        if let Some(offset) = self.offset {
            write!(f, " offset {offset}")?;
        }
        Ok(())
    }
}

fn write_patterns(f: &mut Formatter<'_>, patterns: &[TriplePattern]) -> std::fmt::Result {
    for (i, pattern) in patterns.iter().enumerate() {
        if i > 0 {
            f.write_str(" .")?;
        }
        write!(f, " {pattern}")?;
    }
    Ok(())
}
