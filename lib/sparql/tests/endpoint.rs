#![allow(clippy::panic_in_result_fn)]

use rdf_resources_model::{NamedNodeRef, VariableRef};
use rdf_resources_sparql::{Credentials, EndpointError, SelectQuery, SparqlEndpoint, A};
use std::net::TcpListener;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const XML: &str = "application/sparql-results+xml";

fn uri_results(variable: &str, iris: &[&str]) -> String {
    let results = iris
        .iter()
        .map(|iri| format!(r#"<result><binding name="{variable}"><uri>{iri}</uri></binding></result>"#))
        .collect::<String>();
    format!(
        r#"<?xml version="1.0"?><sparql xmlns="http://www.w3.org/2005/sparql-results#"><head><variable name="{variable}"/></head><results>{results}</results></sparql>"#
    )
}

async fn endpoint(server: &MockServer) -> SparqlEndpoint {
    SparqlEndpoint::parse(&format!("{}/sparql", server.uri())).unwrap()
}

#[tokio::test]
async fn select_sends_query_parameter_and_parses_xml() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sparql"))
        .and(query_param(
            "query",
            "select distinct ?class where { ?a a ?class }",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            uri_results(
                "class",
                &["http://dbpedia.org/ontology/Band", "http://xmlns.com/foaf/0.1/Person"],
            ),
            XML,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let classes = endpoint(&server).await.classes().await.unwrap();
    assert_eq!(
        classes
            .iter()
            .map(|class| class.as_str())
            .collect::<Vec<_>>(),
        vec!["http://dbpedia.org/ontology/Band", "http://xmlns.com/foaf/0.1/Person"]
    );
}

#[tokio::test]
async fn properties_constrain_the_class() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param(
            "query",
            "select distinct ?property where { ?object a <http://dbpedia.org/ontology/Band> . ?object ?property ?x }",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            uri_results("property", &["http://www.w3.org/2000/01/rdf-schema#label"]),
            XML,
        ))
        .mount(&server)
        .await;

    let properties = endpoint(&server)
        .await
        .properties(NamedNodeRef::new_unchecked("http://dbpedia.org/ontology/Band"))
        .await
        .unwrap();
    assert_eq!(properties.len(), 1);
}

#[tokio::test]
async fn json_results_are_accepted() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"head":{"vars":["resource"]},"results":{"bindings":[{"resource":{"type":"uri","value":"http://dbpedia.org/resource/Kraftwerk"}}]}}"#,
            "application/sparql-results+json",
        ))
        .mount(&server)
        .await;

    let resources = endpoint(&server)
        .await
        .resources(NamedNodeRef::new_unchecked("http://dbpedia.org/ontology/Band"))
        .await
        .unwrap();
    assert_eq!(resources[0].as_str(), "http://dbpedia.org/resource/Kraftwerk");
}

#[tokio::test]
async fn ask_returns_boolean() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"<?xml version="1.0"?><sparql xmlns="http://www.w3.org/2005/sparql-results#"><head/><boolean>false</boolean></sparql>"#,
            XML,
        ))
        .mount(&server)
        .await;

    let exists = endpoint(&server)
        .await
        .ask("ASK { <http://dbpedia.org/resource/Kraftwerk> ?p ?o }")
        .await
        .unwrap();
    assert!(!exists);
}

#[tokio::test]
async fn credentials_are_sent_as_basic_auth() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(header("authorization", "Basic dXNlcjpwYXNz"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(uri_results("class", &[]), XML))
        .expect(1)
        .mount(&server)
        .await;

    let classes = endpoint(&server)
        .await
        .with_credentials(Credentials::new("user", "pass"))
        .classes()
        .await
        .unwrap();
    assert!(classes.is_empty());
}

#[tokio::test]
async fn bad_request_is_an_invalid_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(400).set_body_string("Parse error"))
        .mount(&server)
        .await;

    let error = endpoint(&server)
        .await
        .ask("ASK { ?s ?p ?o }")
        .await
        .unwrap_err();
    assert!(matches!(
        error,
        EndpointError::InvalidQuery { ref message, .. } if message == "Parse error"
    ));
}

#[tokio::test]
async fn server_error_is_a_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let error = endpoint(&server).await.classes().await.unwrap_err();
    assert!(matches!(error, EndpointError::Status { status, .. } if status.as_u16() == 503));
}

#[tokio::test]
async fn closed_port_is_unreachable() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    let endpoint = SparqlEndpoint::parse(&format!("http://127.0.0.1:{port}/sparql")).unwrap();

    let error = endpoint.classes().await.unwrap_err();
    assert!(matches!(error, EndpointError::Unreachable { .. }));
}

#[tokio::test]
async fn invalid_select_is_not_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let query = SelectQuery::new()
        .select(VariableRef::new_unchecked("resource"))
        .where_triple("?resource", A, "?class")
        .filter("?class >");
    let error = endpoint(&server).await.select(&query).await.unwrap_err();
    assert!(matches!(error, EndpointError::Query(_)));
}

#[tokio::test]
async fn boolean_for_select_is_unexpected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"head":{},"boolean":true}"#,
            "application/sparql-results+json",
        ))
        .mount(&server)
        .await;

    let error = endpoint(&server).await.classes().await.unwrap_err();
    assert!(matches!(
        error,
        EndpointError::UnexpectedResults {
            expected: "solutions",
            actual: "boolean"
        }
    ));
}
