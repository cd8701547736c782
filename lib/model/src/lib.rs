mod namespace;
mod native;

pub use namespace::Namespace;
pub use native::NativeValue;

// Re-export some oxrdf types.
pub use oxiri::Iri;
pub use oxrdf::vocab;
pub use oxrdf::{
    BlankNode, BlankNodeRef, IriParseError, Literal, LiteralRef, NamedNode, NamedNodeRef,
    NamedOrBlankNode, Subject, Term, TermRef, Triple, Variable, VariableNameParseError,
    VariableRef,
};
pub use oxsdatatypes::{Boolean, Date, DateTime, Decimal, Double, Float, Integer};
