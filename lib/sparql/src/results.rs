use rdf_resources_model::NamedNode;
use sparesults::{
    QueryResultsFormat, QueryResultsParseError, QueryResultsParser, QuerySolution,
    ReaderQueryResultsParserOutput,
};

/// The `Accept` header sent with every query. XML is the format every SPARQL 1.0 endpoint speaks.
pub(crate) const ACCEPT_RESULTS: &str =
    "application/sparql-results+xml, application/sparql-results+json;q=0.9";

/// Parsed results of a `SELECT` or `ASK` query.
#[derive(Debug)]
pub enum QueryResults {
    Solutions(Vec<QuerySolution>),
    Boolean(bool),
}

impl QueryResults {
    /// Parses a complete results document.
    pub fn read(body: &[u8], format: QueryResultsFormat) -> Result<Self, QueryResultsParseError> {
        match QueryResultsParser::from_format(format).for_reader(body)? {
            ReaderQueryResultsParserOutput::Solutions(solutions) => {
                Ok(Self::Solutions(solutions.collect::<Result<Vec<_>, _>>()?))
            }
            ReaderQueryResultsParserOutput::Boolean(value) => Ok(Self::Boolean(value)),
        }
    }

    pub(crate) fn kind(&self) -> &'static str {
        match self {
            Self::Solutions(_) => "solutions",
            Self::Boolean(_) => "boolean",
        }
    }
}

/// Picks the results format from a `Content-Type` header, falling back to XML.
pub fn results_format(content_type: Option<&str>) -> QueryResultsFormat {
    content_type
        .and_then(|content_type| content_type.split(';').next())
        .and_then(|media_type| QueryResultsFormat::from_media_type(media_type.trim()))
        .unwrap_or(QueryResultsFormat::Xml)
}

/// Returns every IRI bound in `solutions`, solution by solution, in projection order.
pub fn bound_iris(solutions: &[QuerySolution]) -> Vec<NamedNode> {
    solutions
        .iter()
        .flat_map(|solution| solution.values().iter().flatten())
        .filter_map(|term| match term {
            rdf_resources_model::Term::NamedNode(node) => Some(node.clone()),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rdf_resources_model::{Literal, Term};

    const XML_RESULTS: &str = r#"<?xml version="1.0"?>
<sparql xmlns="http://www.w3.org/2005/sparql-results#">
  <head><variable name="resource"/></head>
  <results>
    <result><binding name="resource"><uri>http://dbpedia.org/resource/Kraftwerk</uri></binding></result>
    <result><binding name="resource"><bnode>b0</bnode></binding></result>
    <result><binding name="resource"><literal>not a resource</literal></binding></result>
    <result><binding name="resource"><uri>http://dbpedia.org/resource/Can_(band)</uri></binding></result>
  </results>
</sparql>"#;

    #[test]
    fn reads_xml_solutions() {
        let QueryResults::Solutions(solutions) =
            QueryResults::read(XML_RESULTS.as_bytes(), QueryResultsFormat::Xml).unwrap()
        else {
            panic!("expected solutions")
        };
        assert_eq!(solutions.len(), 4);
        assert_eq!(
            solutions[2].get("resource"),
            Some(&Term::from(Literal::new_simple_literal("not a resource")))
        );
    }

    #[test]
    fn bound_iris_skips_blank_nodes_and_literals() {
        let QueryResults::Solutions(solutions) =
            QueryResults::read(XML_RESULTS.as_bytes(), QueryResultsFormat::Xml).unwrap()
        else {
            panic!("expected solutions")
        };
        let iris = bound_iris(&solutions);
        assert_eq!(
            iris,
            vec![
                NamedNode::new_unchecked("http://dbpedia.org/resource/Kraftwerk"),
                NamedNode::new_unchecked("http://dbpedia.org/resource/Can_(band)"),
            ]
        );
    }

    #[test]
    fn reads_json_boolean() {
        let results = QueryResults::read(
            br#"{"head":{},"boolean":true}"#,
            QueryResultsFormat::Json,
        )
        .unwrap();
        assert!(matches!(results, QueryResults::Boolean(true)));
    }

    #[test]
    fn format_is_taken_from_content_type() {
        assert_eq!(
            results_format(Some("application/sparql-results+json; charset=utf-8")),
            QueryResultsFormat::Json
        );
        assert_eq!(
            results_format(Some("application/sparql-results+xml")),
            QueryResultsFormat::Xml
        );
        assert_eq!(results_format(Some("text/html")), QueryResultsFormat::Xml);
        assert_eq!(results_format(None), QueryResultsFormat::Xml);
    }

    #[test]
    fn malformed_document_is_an_error() {
        assert!(QueryResults::read(b"<html></html>", QueryResultsFormat::Xml).is_err());
    }
}
