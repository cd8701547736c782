use oxrdf::vocab::xsd;
use oxrdf::{BlankNode, Literal, NamedNode, NamedNodeRef, Term};
use oxsdatatypes::{Boolean, Date, DateTime, Decimal, Double, Float, Integer};
use std::str::FromStr;

/// A property value converted into a native representation.
///
/// Literals with a supported XSD datatype are parsed into the corresponding `oxsdatatypes` value.
/// Literals whose lexical form is invalid for their datatype, or whose datatype is unknown, are
/// kept verbatim in [NativeValue::Typed].
#[derive(Clone, Debug, PartialEq)]
pub enum NativeValue {
    Iri(NamedNode),
    BlankNode(BlankNode),
    String(String),
    LanguageString { value: String, language: String },
    Boolean(Boolean),
    Integer(Integer),
    Decimal(Decimal),
    Float(Float),
    Double(Double),
    Date(Date),
    DateTime(DateTime),
    Typed(Literal),
}

impl NativeValue {
    /// Converts a term. Returns [None] for quoted triples.
    pub fn from_term(term: &Term) -> Option<Self> {
        if let Term::Literal(literal) = term {
            Some(Self::from_literal(literal))
        } else if let Term::NamedNode(node) = term {
            Some(Self::Iri(node.clone()))
        } else if let Term::BlankNode(node) = term {
            Some(Self::BlankNode(node.clone()))
        } else {
            None
        }
    }

    /// Converts a literal based on its datatype.
    pub fn from_literal(literal: &Literal) -> Self {
        if let Some(language) = literal.language() {
            return Self::LanguageString {
                value: literal.value().to_owned(),
                language: language.to_owned(),
            };
        }

        let datatype = literal.datatype();
        let value = literal.value();
        let parsed = if datatype == xsd::STRING {
            Some(Self::String(value.to_owned()))
        } else if datatype == xsd::BOOLEAN {
            parse(value).map(Self::Boolean)
        } else if is_integer_datatype(datatype) {
            parse(value).map(Self::Integer)
        } else if datatype == xsd::DECIMAL {
            parse(value).map(Self::Decimal)
        } else if datatype == xsd::FLOAT {
            parse(value).map(Self::Float)
        } else if datatype == xsd::DOUBLE {
            parse(value).map(Self::Double)
        } else if datatype == xsd::DATE {
            parse(value).map(Self::Date)
        } else if datatype == xsd::DATE_TIME {
            parse(value).map(Self::DateTime)
        } else {
            None
        };
        parsed.unwrap_or_else(|| Self::Typed(literal.clone()))
    }

    /// Returns the string content for plain and language-tagged strings.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) | Self::LanguageString { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Returns the value as an [i64] if it is an integer in range.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(value) => value.to_string().parse().ok(),
            _ => None,
        }
    }

    /// Returns whether the value was produced from a language-tagged literal.
    pub fn is_language_string(&self) -> bool {
        matches!(self, Self::LanguageString { .. })
    }
}

impl From<&Literal> for NativeValue {
    fn from(literal: &Literal) -> Self {
        Self::from_literal(literal)
    }
}

fn parse<T: FromStr>(value: &str) -> Option<T> {
    value.parse().ok()
}

/// Checks if the datatype is derived from `xsd:integer`.
fn is_integer_datatype(datatype: NamedNodeRef<'_>) -> bool {
    static INTEGER_DATATYPES: &[NamedNodeRef<'_>; 13] = &[
        xsd::INTEGER,
        xsd::BYTE,
        xsd::SHORT,
        xsd::INT,
        xsd::LONG,
        xsd::UNSIGNED_BYTE,
        xsd::UNSIGNED_SHORT,
        xsd::UNSIGNED_INT,
        xsd::UNSIGNED_LONG,
        xsd::POSITIVE_INTEGER,
        xsd::NEGATIVE_INTEGER,
        xsd::NON_POSITIVE_INTEGER,
        xsd::NON_NEGATIVE_INTEGER,
    ];
    INTEGER_DATATYPES.contains(&datatype)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_literal_is_string() {
        let value = NativeValue::from_literal(&Literal::new_simple_literal("Kensworth VC Lower School"));
        assert_eq!(value.as_str(), Some("Kensworth VC Lower School"));
    }

    #[test]
    fn language_tag_is_kept() {
        let literal = Literal::new_language_tagged_literal_unchecked("Kraftwerk", "de");
        let value = NativeValue::from_literal(&literal);
        assert_eq!(
            value,
            NativeValue::LanguageString {
                value: "Kraftwerk".to_owned(),
                language: "de".to_owned()
            }
        );
        assert!(value.is_language_string());
    }

    #[test]
    fn derived_integer_types_are_integers() {
        let literal = Literal::new_typed_literal("75", xsd::INT);
        assert_eq!(NativeValue::from_literal(&literal).as_i64(), Some(75));
    }

    #[test]
    fn date_is_parsed() {
        let literal = Literal::new_typed_literal("2009-04-01", xsd::DATE);
        assert_eq!(
            NativeValue::from_literal(&literal),
            NativeValue::Date(Date::from_str("2009-04-01").unwrap())
        );
    }

    #[test]
    fn invalid_lexical_form_is_kept_verbatim() {
        let literal = Literal::new_typed_literal("seventy-five", xsd::INTEGER);
        assert_eq!(
            NativeValue::from_literal(&literal),
            NativeValue::Typed(literal.clone())
        );
    }

    #[test]
    fn unknown_datatype_is_kept_verbatim() {
        let literal = Literal::new_typed_literal(
            "POINT(1 2)",
            NamedNode::new_unchecked("http://www.opengis.net/ont/geosparql#wktLiteral"),
        );
        assert_eq!(
            NativeValue::from_literal(&literal),
            NativeValue::Typed(literal.clone())
        );
    }

    #[test]
    fn iri_term_is_converted() {
        let iri = NamedNode::new_unchecked("http://dbpedia.org/resource/Germany");
        assert_eq!(
            NativeValue::from_term(&iri.clone().into()),
            Some(NativeValue::Iri(iri))
        );
    }

    #[test]
    fn blank_node_and_literal_terms_are_converted() {
        let node = BlankNode::new_unchecked("b0");
        assert_eq!(
            NativeValue::from_term(&node.clone().into()),
            Some(NativeValue::BlankNode(node))
        );
        assert_eq!(
            NativeValue::from_term(&Literal::new_simple_literal("Kraftwerk").into()),
            Some(NativeValue::String("Kraftwerk".to_owned()))
        );
    }
}
