//! QuickGO endpoint URL builders

/// `GO:0016301` -> `GO%3A0016301`
fn encode_go_id(go_id: &str) -> String {
    format!("GO%3A{}", go_id.strip_prefix("GO:").unwrap_or(go_id))
}

/// Build term lookup URL
pub fn term_url(base_url: &str, go_id: &str) -> String {
    format!("{}/ontology/go/terms/{}", base_url, encode_go_id(go_id))
}

/// Build is_a path URL between two terms
pub fn paths_url(base_url: &str, start: &str, end: &str) -> String {
    format!(
        "{}/ontology/go/terms/{}/paths/{}?relations=is_a",
        base_url,
        encode_go_id(start),
        encode_go_id(end)
    )
}

/// Build annotation search URL for one page of a gene product's functions
pub fn annotation_search_url(base_url: &str, protein_id: &str, page_size: u32, page: u32) -> String {
    format!(
        "{}/annotation/search?selectedFields=geneProductId&geneProductId={}&aspect=molecular_function&qualifier=enables&limit={}&page={}",
        base_url,
        urlencoding::encode(protein_id),
        page_size,
        page
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://www.ebi.ac.uk/QuickGO/services";

    #[test]
    fn test_term_url() {
        assert_eq!(
            term_url(BASE, "GO:0016301"),
            "https://www.ebi.ac.uk/QuickGO/services/ontology/go/terms/GO%3A0016301"
        );
    }

    #[test]
    fn test_paths_url() {
        assert_eq!(
            paths_url(BASE, "GO:0016301", "GO:0003674"),
            "https://www.ebi.ac.uk/QuickGO/services/ontology/go/terms/GO%3A0016301/paths/GO%3A0003674?relations=is_a"
        );
    }

    #[test]
    fn test_annotation_search_url_encodes_id() {
        let url = annotation_search_url(BASE, "P30085 ", 100, 2);
        assert!(url.contains("geneProductId=P30085%20&"));
        assert!(url.ends_with("&limit=100&page=2"));
    }
}
