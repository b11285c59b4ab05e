//! Integration tests for the QuickGO client against a mock server

mod common;

use common::*;
use gofn_cli::config::QuickGoConfig;
use gofn_cli::QuickGoClient;
use gofn_core::resolver::{AnnotationLookup, PathLookup, TermLookup};
use gofn_core::{Advisory, Ontology, OntologyError};
use std::sync::Arc;
use wiremock::{
    matchers::{method, path_regex, query_param},
    Mock, MockServer, ResponseTemplate,
};

fn client(server: &MockServer) -> QuickGoClient {
    client_with(server, QuickGoConfig::builder())
}

fn client_with(server: &MockServer, builder: gofn_cli::config::QuickGoConfigBuilder) -> QuickGoClient {
    let config = builder.base_url(server.uri()).retry_backoff_ms(1).build();
    QuickGoClient::new(config).unwrap()
}

#[tokio::test]
async fn test_lookup_term() {
    let server = MockServer::start().await;
    mount_term(&server, KINASE, "kinase activity").await;

    let term = client(&server).lookup_term(KINASE).await.unwrap();
    assert_eq!(term.id, KINASE);
    assert_eq!(term.name, "kinase activity");
    assert_eq!(term.definition, "Definition of kinase activity.");
}

#[tokio::test]
async fn test_obsolete_term_is_flagged() {
    let server = MockServer::start().await;
    mount_obsolete_term(&server, SIGNAL_TRANSDUCER, "signal transducer activity").await;

    let term = client(&server).lookup_term(SIGNAL_TRANSDUCER).await.unwrap();
    assert!(term.obsolete);
}

#[tokio::test]
async fn test_renamed_term_answers_with_new_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path_regex(term_path("GO:0048365")))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(term_json("GO:0005096", "GTPase activator activity")),
        )
        .mount(&server)
        .await;

    let term = client(&server).lookup_term("GO:0048365").await.unwrap();
    assert_eq!(term.id, "GO:0005096");
}

#[tokio::test]
async fn test_status_mapping() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path_regex(term_path("GO:0000001")))
        .respond_with(ResponseTemplate::new(400))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path_regex(term_path("GO:0000002")))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let client = client(&server);
    assert_eq!(
        client.lookup_term("GO:0000001").await,
        Err(OntologyError::InvalidIdentifier("GO:0000001".to_string()))
    );
    assert!(matches!(
        client.lookup_term("GO:0000002").await,
        Err(OntologyError::MalformedResponse(_))
    ));
    // Nothing mounted: the mock server answers 404
    assert_eq!(
        client.lookup_term("GO:0000003").await,
        Err(OntologyError::NotFound("GO:0000003".to_string()))
    );
}

#[tokio::test]
async fn test_empty_and_ambiguous_results() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path_regex(term_path("GO:0000004")))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "numberOfHits": 0,
            "results": []
        })))
        .mount(&server)
        .await;

    let mut twice = term_json(KINASE, "kinase activity");
    let first = twice["results"][0].clone();
    twice["results"] = serde_json::json!([first.clone(), first]);
    Mock::given(method("GET"))
        .and(path_regex(term_path(KINASE)))
        .respond_with(ResponseTemplate::new(200).set_body_json(twice))
        .mount(&server)
        .await;

    let client = client(&server);
    assert_eq!(
        client.lookup_term("GO:0000004").await,
        Err(OntologyError::NotFound("GO:0000004".to_string()))
    );
    assert!(matches!(
        client.lookup_term(KINASE).await,
        Err(OntologyError::Ambiguous { hits: 2, .. })
    ));
}

#[tokio::test]
async fn test_retries_server_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path_regex(term_path(KINASE)))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;
    mount_term(&server, KINASE, "kinase activity").await;

    let term = client(&server).lookup_term(KINASE).await.unwrap();
    assert_eq!(term.id, KINASE);
}

#[tokio::test]
async fn test_gives_up_after_max_retries() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path_regex(term_path(KINASE)))
        .respond_with(ResponseTemplate::new(500))
        .expect(2)
        .mount(&server)
        .await;

    let client = client_with(&server, QuickGoConfig::builder().max_retries(2));
    assert!(matches!(
        client.lookup_term(KINASE).await,
        Err(OntologyError::Network(_))
    ));
}

#[tokio::test]
async fn test_undecodable_body_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path_regex(term_path(KINASE)))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    assert!(matches!(
        client(&server).lookup_term(KINASE).await,
        Err(OntologyError::MalformedResponse(_))
    ));
}

#[tokio::test]
async fn test_lookup_paths() {
    let server = MockServer::start().await;
    mount_paths(&server, KINASE, &[&[(KINASE, CATALYTIC), (CATALYTIC, ROOT)]]).await;

    let chains = client(&server).lookup_paths(KINASE, ROOT).await.unwrap();
    assert_eq!(chains.len(), 1);
    assert_eq!(chains[0].len(), 2);
    assert_eq!(chains[0][0].child, KINASE);
    assert_eq!(chains[0][0].parent, CATALYTIC);
    assert!(chains[0].iter().all(|edge| edge.is_a()));
}

#[tokio::test]
async fn test_paginated_paths_are_rejected() {
    let server = MockServer::start().await;
    let mut body = paths_json(&[&[(KINASE, ROOT)]]);
    body["pageInfo"] = serde_json::json!({"resultsPerPage": 1, "current": 1, "total": 3});
    Mock::given(method("GET"))
        .and(path_regex(paths_path(KINASE, ROOT)))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    assert!(matches!(
        client(&server).lookup_paths(KINASE, ROOT).await,
        Err(OntologyError::Paginated { pages: 3, .. })
    ));
}

#[tokio::test]
async fn test_annotation_pages_are_concatenated() {
    let server = MockServer::start().await;
    for (page, go_id) in [(1u32, KINASE), (2u32, TRANSPORTER)] {
        Mock::given(method("GET"))
            .and(path_regex(r"^/annotation/search$"))
            .and(query_param("geneProductId", "P30085"))
            .and(query_param("page", page.to_string()))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(annotations_json("P30085", &[go_id], 2, page, 2)),
            )
            .expect(1)
            .mount(&server)
            .await;
    }

    let records = client(&server).lookup_annotations("P30085").await.unwrap();
    let go_ids: Vec<_> = records.iter().map(|r| r.go_id.as_str()).collect();
    assert_eq!(go_ids, vec![KINASE, TRANSPORTER]);
    assert!(records.iter().all(|r| r.belongs_to("P30085")));
}

#[tokio::test]
async fn test_annotation_page_limit() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path_regex(r"^/annotation/search$"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(annotations_json("P30085", &[KINASE], 5, 1, 5)),
        )
        .mount(&server)
        .await;

    let client = client_with(&server, QuickGoConfig::builder().max_pages(2));
    assert!(matches!(
        client.lookup_annotations("P30085").await,
        Err(OntologyError::PageLimitExceeded { limit: 2, .. })
    ));
}

#[tokio::test]
async fn test_protein_without_annotations() {
    let server = MockServer::start().await;
    mount_annotations(&server, "Q00000", &[]).await;

    let records = client(&server).lookup_annotations("Q00000").await.unwrap();
    assert!(records.is_empty());
}

#[tokio::test]
async fn test_ontology_grows_through_quickgo() {
    let server = MockServer::start().await;
    mount_hierarchy(&server).await;

    let ontology = Ontology::new(Arc::new(client(&server)));
    let added = ontology.add_function(KINASE).await.unwrap();
    assert!(added.advisories.is_empty());

    let ancestors = ontology.ancestor_ids(KINASE).await.unwrap();
    assert!(ancestors.contains(CATALYTIC));
    assert!(ancestors.contains(ROOT));
    assert_eq!(ontology.len().await, 3);
}

#[tokio::test]
async fn test_ontology_reports_orphans() {
    let server = MockServer::start().await;
    mount_term(&server, "GO:0060089", "molecular transducer activity").await;
    mount_paths(&server, "GO:0060089", &[]).await;

    let ontology = Ontology::new(Arc::new(client(&server)));
    let added = ontology.add_function("GO:0060089").await.unwrap();
    assert_eq!(
        added.advisories,
        vec![Advisory::NoPathToRoot {
            id: "GO:0060089".to_string()
        }]
    );
}

#[tokio::test]
async fn test_ontology_reports_obsolete_terms() {
    let server = MockServer::start().await;
    mount_term(&server, ROOT, "molecular_function").await;
    mount_obsolete_term(&server, SIGNAL_TRANSDUCER, "signal transducer activity").await;
    mount_paths(&server, SIGNAL_TRANSDUCER, &[&[(SIGNAL_TRANSDUCER, ROOT)]]).await;

    let ontology = Ontology::new(Arc::new(client(&server)));
    let added = ontology.add_function(SIGNAL_TRANSDUCER).await.unwrap();
    assert_eq!(
        added.advisories,
        vec![Advisory::Obsolete {
            id: SIGNAL_TRANSDUCER.to_string()
        }]
    );
    assert!(ontology.ancestor_ids(SIGNAL_TRANSDUCER).await.unwrap().contains(ROOT));
}
