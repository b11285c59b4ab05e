//! HTTP client for the QuickGO REST services
//!
//! Implements the engine's lookup traits. Every request goes through
//! [`QuickGoClient::get_json`], which retries transient failures (network
//! errors, timeouts, HTTP 5xx and 429) with exponential backoff and maps
//! HTTP statuses onto [`OntologyError`] variants.

use crate::config::QuickGoConfig;
use crate::error::{CliError, Result};
use crate::quickgo::endpoints;
use crate::quickgo::types::{AnnotationResponse, PathEdgeResult, PathResponse, TermResponse};
use async_trait::async_trait;
use gofn_core::resolver::{AnnotationLookup, AnnotationRecord, PathEdge, PathLookup, TermLookup};
use gofn_core::term::require_go_id;
use gofn_core::{OntologyError, Term};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info, warn};

pub struct QuickGoClient {
    client: Client,
    config: QuickGoConfig,
}

impl QuickGoClient {
    pub fn new(config: QuickGoConfig) -> Result<Self> {
        config.validate().map_err(CliError::config)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("gofn/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &QuickGoConfig {
        &self.config
    }

    /// GET `url` and decode the JSON body, with retries.
    ///
    /// `subject` names what was asked for (a GO id or protein id) and ends
    /// up in `InvalidIdentifier`/`NotFound` errors.
    async fn get_json<T: DeserializeOwned>(&self, url: &str, subject: &str) -> gofn_core::Result<T> {
        let attempts = self.config.max_retries;
        let mut attempt = 1;

        loop {
            match self.get_json_once(url, subject).await {
                Ok(body) => return Ok(body),
                Err(err) if err.is_retryable() && attempt < attempts => {
                    let backoff = self.config.backoff_ms(attempt);
                    warn!(
                        url = %url,
                        attempt,
                        attempts,
                        backoff_ms = backoff,
                        error = %err,
                        "QuickGO request failed, retrying"
                    );
                    tokio::time::sleep(Duration::from_millis(backoff)).await;
                    attempt += 1;
                },
                Err(err) => return Err(err),
            }
        }
    }

    async fn get_json_once<T: DeserializeOwned>(&self, url: &str, subject: &str) -> gofn_core::Result<T> {
        debug!(url = %url, "GET");
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|err| transport_error(url, err))?;

        let status = response.status();
        match status {
            StatusCode::BAD_REQUEST => return Err(OntologyError::InvalidIdentifier(subject.to_string())),
            StatusCode::NOT_FOUND => return Err(OntologyError::NotFound(subject.to_string())),
            StatusCode::TOO_MANY_REQUESTS => {
                return Err(OntologyError::Network(format!("rate limited by {}", url)))
            },
            s if s.is_server_error() => {
                return Err(OntologyError::Network(format!("HTTP {} from {}", s, url)))
            },
            s if !s.is_success() => {
                return Err(OntologyError::MalformedResponse(format!(
                    "unexpected HTTP {} from {}",
                    s, url
                )))
            },
            _ => {},
        }

        response.json::<T>().await.map_err(|err| {
            if err.is_decode() {
                OntologyError::MalformedResponse(format!("{}: {}", url, err))
            } else {
                transport_error(url, err)
            }
        })
    }
}

fn transport_error(url: &str, err: reqwest::Error) -> OntologyError {
    if err.is_timeout() {
        OntologyError::Timeout(url.to_string())
    } else {
        OntologyError::Network(format!("{}: {}", url, err))
    }
}

#[async_trait]
impl TermLookup for QuickGoClient {
    async fn lookup_term(&self, go_id: &str) -> gofn_core::Result<Term> {
        require_go_id(go_id)?;
        let url = endpoints::term_url(&self.config.base_url, go_id);
        let response: TermResponse = self.get_json(&url, go_id).await?;

        let mut results = response.results;
        match results.len() {
            0 => Err(OntologyError::NotFound(go_id.to_string())),
            1 => match results.pop() {
                Some(result) => Term::try_from(result),
                None => Err(OntologyError::NotFound(go_id.to_string())),
            },
            hits => Err(OntologyError::Ambiguous {
                id: go_id.to_string(),
                hits,
            }),
        }
    }
}

#[async_trait]
impl PathLookup for QuickGoClient {
    async fn lookup_paths(&self, start: &str, end: &str) -> gofn_core::Result<Vec<Vec<PathEdge>>> {
        require_go_id(start)?;
        require_go_id(end)?;
        let url = endpoints::paths_url(&self.config.base_url, start, end);
        let response: PathResponse = self.get_json(&url, start).await?;

        if let Some(page_info) = &response.page_info {
            if page_info.total > 1 {
                return Err(OntologyError::Paginated {
                    start: start.to_string(),
                    end: end.to_string(),
                    pages: page_info.total,
                });
            }
        }

        if !response.results.is_array() {
            return Err(OntologyError::MalformedResponse(format!(
                "path results from {} to {} are not a list",
                start, end
            )));
        }
        let chains: Vec<Vec<PathEdgeResult>> = serde_json::from_value(response.results)
            .map_err(|err| OntologyError::MalformedResponse(format!("{}: {}", url, err)))?;

        Ok(chains
            .into_iter()
            .map(|chain| chain.into_iter().map(PathEdge::from).collect())
            .collect())
    }
}

#[async_trait]
impl AnnotationLookup for QuickGoClient {
    async fn lookup_annotations(&self, protein_id: &str) -> gofn_core::Result<Vec<AnnotationRecord>> {
        let mut records = Vec::new();
        let mut expected_hits = None;
        let mut page = 1;

        loop {
            let url = endpoints::annotation_search_url(
                &self.config.base_url,
                protein_id,
                self.config.page_size,
                page,
            );
            let response: AnnotationResponse = self.get_json(&url, protein_id).await?;

            if response.number_of_hits == 0 {
                break;
            }
            expected_hits.get_or_insert(response.number_of_hits);

            let total = match &response.page_info {
                Some(info) if info.current != page => {
                    return Err(OntologyError::MalformedResponse(format!(
                        "asked for annotation page {} of {} but got page {}",
                        page, protein_id, info.current
                    )))
                },
                Some(info) => info.total,
                None => 1,
            };
            if total > self.config.max_pages {
                return Err(OntologyError::PageLimitExceeded {
                    what: format!("annotations of {}", protein_id),
                    limit: self.config.max_pages,
                });
            }

            records.extend(response.results.into_iter().map(AnnotationRecord::from));
            if page >= total {
                break;
            }
            page += 1;
        }

        if let Some(expected) = expected_hits {
            if records.len() as u64 != expected {
                warn!(
                    protein_id = %protein_id,
                    expected,
                    received = records.len(),
                    "Annotation count differs from the reported number of hits"
                );
            }
        }

        info!(protein_id = %protein_id, records = records.len(), pages = page, "Fetched annotations");
        Ok(records)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = QuickGoConfig::builder().max_retries(0).build();
        assert!(matches!(QuickGoClient::new(config), Err(CliError::Config(_))));
    }

    #[tokio::test]
    async fn test_malformed_id_fails_without_request() {
        // Unroutable base URL: any request would fail with a network error.
        let config = QuickGoConfig::builder().base_url("http://127.0.0.1:1").build();
        let client = QuickGoClient::new(config).unwrap();

        assert_eq!(
            client.lookup_term("GO:12").await,
            Err(OntologyError::InvalidIdentifier("GO:12".to_string()))
        );
    }
}
