// Record Locator: resolves a query string to record identifiers via esearch

use reqwest::Client;
use serde_json::Value;
use tracing::{debug, info};

use crate::error::DigestError;

pub struct RecordLocator {
    http: Client,
    base_url: String,
}

impl RecordLocator {
    pub fn new(http: Client, base_url: String) -> Self {
        Self { http, base_url }
    }

    /// Returns identifiers in the order the service provides them.
    /// Zero matches is an empty list, not an error. Single attempt.
    pub async fn find_ids(
        &self,
        query: &str,
        max_results: u32,
    ) -> Result<Vec<String>, DigestError> {
        info!("Locating records for query: {}", query);

        let params = [
            ("db", "pubmed".to_string()),
            ("term", query.to_string()),
            ("retmode", "json".to_string()),
            ("retmax", max_results.to_string()),
        ];

        let response = self
            .http
            .get(format!("{}/esearch.fcgi", self.base_url))
            .query(&params)
            .send()
            .await
            .map_err(DigestError::Network)?;

        if !response.status().is_success() {
            return Err(DigestError::Service(format!(
                "search endpoint returned {}",
                response.status()
            )));
        }

        let body = response.text().await.map_err(DigestError::Network)?;
        let data: Value = serde_json::from_str(&body).map_err(|e| {
            DigestError::Service(format!("search response is not valid JSON: {e}"))
        })?;

        let result = data.get("esearchresult").ok_or_else(|| {
            DigestError::Service("search response missing esearchresult".to_string())
        })?;

        let ids: Vec<String> = result
            .get("idlist")
            .and_then(Value::as_array)
            .map(|list| {
                list.iter()
                    .filter_map(|v| v.as_str().map(String::from))
                    .collect()
            })
            .unwrap_or_default();

        debug!(count = ids.len(), "Search returned record ids");
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn locator(server: &MockServer) -> RecordLocator {
        RecordLocator::new(Client::new(), server.uri())
    }

    #[tokio::test]
    async fn returns_ids_in_service_order() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/esearch.fcgi"))
            .and(query_param("db", "pubmed"))
            .and(query_param("retmode", "json"))
            .and(query_param("retmax", "3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "esearchresult": {"idlist": ["12345", "67890"]}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let ids = locator(&server).find_ids("(ACL[Title/Abstract])", 3).await.unwrap();
        assert_eq!(ids, vec!["12345", "67890"]);
    }

    #[tokio::test]
    async fn zero_matches_is_an_empty_list() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/esearch.fcgi"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "esearchresult": {"idlist": []}
            })))
            .mount(&server)
            .await;

        let ids = locator(&server).find_ids("(ACL[Title/Abstract])", 5).await.unwrap();
        assert!(ids.is_empty());
    }

    #[tokio::test]
    async fn missing_idlist_is_an_empty_list() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/esearch.fcgi"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"esearchresult": {}})),
            )
            .mount(&server)
            .await;

        let ids = locator(&server).find_ids("(ACL[Title/Abstract])", 5).await.unwrap();
        assert!(ids.is_empty());
    }

    #[tokio::test]
    async fn missing_result_object_is_a_service_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/esearch.fcgi"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;

        let err = locator(&server)
            .find_ids("(ACL[Title/Abstract])", 5)
            .await
            .unwrap_err();
        assert!(matches!(err, DigestError::Service(_)));
    }

    #[tokio::test]
    async fn non_json_body_is_a_service_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/esearch.fcgi"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>down</html>"))
            .mount(&server)
            .await;

        let err = locator(&server)
            .find_ids("(ACL[Title/Abstract])", 5)
            .await
            .unwrap_err();
        assert!(matches!(err, DigestError::Service(_)));
    }

    #[tokio::test]
    async fn error_status_is_a_service_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/esearch.fcgi"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let err = locator(&server)
            .find_ids("(ACL[Title/Abstract])", 5)
            .await
            .unwrap_err();
        assert!(matches!(err, DigestError::Service(_)));
    }
}
