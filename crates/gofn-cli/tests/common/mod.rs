//! QuickGO mock fixtures shared by the integration tests
//!
//! The mocked hierarchy:
//!
//! ```text
//! GO:0003674 molecular_function
//! ├── GO:0003824 catalytic activity
//! │   └── GO:0016301 kinase activity
//! └── GO:0005215 transporter activity
//! ```

#![allow(dead_code)]

use serde_json::{json, Value};
use wiremock::{
    matchers::{method, path_regex, query_param},
    Mock, MockServer, ResponseTemplate,
};

pub const ROOT: &str = "GO:0003674";
pub const CATALYTIC: &str = "GO:0003824";
pub const KINASE: &str = "GO:0016301";
pub const TRANSPORTER: &str = "GO:0005215";
/// Obsolete, but still answered with an is_a path to the root.
pub const SIGNAL_TRANSDUCER: &str = "GO:0004871";

/// Path of `GO:nnnnnnn`, whether or not the client escaped the colon.
pub fn term_path(go_id: &str) -> String {
    format!(r"^/ontology/go/terms/GO(%3A|:){}$", digits(go_id))
}

pub fn paths_path(start: &str, end: &str) -> String {
    format!(
        r"^/ontology/go/terms/GO(%3A|:){}/paths/GO(%3A|:){}$",
        digits(start),
        digits(end)
    )
}

fn digits(go_id: &str) -> &str {
    go_id.trim_start_matches("GO:")
}

pub fn term_json(go_id: &str, name: &str) -> Value {
    term_json_with(go_id, name, false)
}

pub fn term_json_with(go_id: &str, name: &str, obsolete: bool) -> Value {
    json!({
        "numberOfHits": 1,
        "results": [{
            "id": go_id,
            "isObsolete": obsolete,
            "name": name,
            "definition": {"text": format!("Definition of {}.", name)},
            "aspect": "molecular_function"
        }],
        "pageInfo": null
    })
}

/// One chain per entry, each a list of `(child, parent)` is_a steps.
pub fn paths_json(chains: &[&[(&str, &str)]]) -> Value {
    let results: Vec<Value> = chains
        .iter()
        .map(|chain| {
            Value::Array(
                chain
                    .iter()
                    .map(|(child, parent)| json!({"child": child, "parent": parent, "relationship": "is_a"}))
                    .collect(),
            )
        })
        .collect();

    json!({
        "numberOfHits": results.len(),
        "results": results,
        "pageInfo": null
    })
}

pub fn annotations_json(protein_id: &str, go_ids: &[&str], hits: usize, page: u32, total_pages: u32) -> Value {
    let results: Vec<Value> = go_ids
        .iter()
        .map(|go_id| {
            json!({
                "id": format!("UniProtKB:{}!{}", protein_id, go_id),
                "geneProductId": format!("UniProtKB:{}", protein_id),
                "qualifier": "enables",
                "goId": go_id,
                "goAspect": "molecular_function"
            })
        })
        .collect();

    json!({
        "numberOfHits": hits,
        "results": results,
        "pageInfo": {"resultsPerPage": 100, "current": page, "total": total_pages}
    })
}

pub async fn mount_term(server: &MockServer, go_id: &str, name: &str) {
    Mock::given(method("GET"))
        .and(path_regex(term_path(go_id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(term_json(go_id, name)))
        .mount(server)
        .await;
}

pub async fn mount_obsolete_term(server: &MockServer, go_id: &str, name: &str) {
    Mock::given(method("GET"))
        .and(path_regex(term_path(go_id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(term_json_with(go_id, name, true)))
        .mount(server)
        .await;
}

pub async fn mount_paths(server: &MockServer, start: &str, chains: &[&[(&str, &str)]]) {
    Mock::given(method("GET"))
        .and(path_regex(paths_path(start, ROOT)))
        .and(query_param("relations", "is_a"))
        .respond_with(ResponseTemplate::new(200).set_body_json(paths_json(chains)))
        .mount(server)
        .await;
}

/// Single-page annotation response for `protein_id`.
pub async fn mount_annotations(server: &MockServer, protein_id: &str, go_ids: &[&str]) {
    let body = if go_ids.is_empty() {
        json!({"numberOfHits": 0, "results": [], "pageInfo": {"resultsPerPage": 100, "current": 1, "total": 0}})
    } else {
        annotations_json(protein_id, go_ids, go_ids.len(), 1, 1)
    };

    Mock::given(method("GET"))
        .and(path_regex(r"^/annotation/search$"))
        .and(query_param("geneProductId", protein_id))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Mount the whole mocked hierarchy.
pub async fn mount_hierarchy(server: &MockServer) {
    mount_term(server, ROOT, "molecular_function").await;
    mount_term(server, CATALYTIC, "catalytic activity").await;
    mount_term(server, KINASE, "kinase activity").await;
    mount_term(server, TRANSPORTER, "transporter activity").await;

    mount_paths(server, CATALYTIC, &[&[(CATALYTIC, ROOT)]]).await;
    mount_paths(server, KINASE, &[&[(KINASE, CATALYTIC), (CATALYTIC, ROOT)]]).await;
    mount_paths(server, TRANSPORTER, &[&[(TRANSPORTER, ROOT)]]).await;
}
