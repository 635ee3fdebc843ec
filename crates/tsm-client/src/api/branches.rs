//! Branch list endpoint.

use crate::CatalogClient;
use tsm_core::{BranchList, Result, TsmError};

/// Branch list endpoint
pub struct BranchesApi<'a> {
    client: &'a CatalogClient,
}

impl<'a> BranchesApi<'a> {
    pub(crate) const fn new(client: &'a CatalogClient) -> Self {
        Self { client }
    }

    /// Get the names of all branches that publish builds
    pub async fn list(&self) -> Result<Vec<String>> {
        let url = &self.client.config().branches_url;
        let value: serde_json::Value = self.client.get_json(url).await?;

        if value.get("branches").map_or(true, serde_json::Value::is_null) {
            return Err(TsmError::MalformedResponse {
                url: url.clone(),
                reason: "missing `branches` list".to_string(),
            });
        }

        let list: BranchList = serde_json::from_value(value).map_err(|source| TsmError::Json {
            url: url.clone(),
            source,
        })?;

        Ok(list.branches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tsm_core::ErrorKind;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn client_for(server: &MockServer) -> CatalogClient {
        CatalogClient::builder()
            .base_url(format!("{}/mobile/", server.uri()))
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_list_branches() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/mobile/branches.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"branches": ["master", "1_8_X", "2_0_X", "2_1_X"]}"#,
            ))
            .expect(1)
            .mount(&server)
            .await;

        let branches = client_for(&server).await.branches().list().await.unwrap();
        assert!(branches.contains(&"master".to_string()));
        assert!(branches.contains(&"2_0_X".to_string()));
        assert_eq!(branches.len(), 4);
    }

    #[tokio::test]
    async fn test_list_branches_404() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/mobile/branches.json"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = client_for(&server).await.branches().list().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Fetch);
        assert_eq!(err.status_code(), Some(404));
    }

    #[tokio::test]
    async fn test_list_branches_missing_field() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/mobile/branches.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"tags": []}"#))
            .mount(&server)
            .await;

        let err = client_for(&server).await.branches().list().await.unwrap_err();
        assert!(matches!(err, TsmError::MalformedResponse { .. }));
        assert_eq!(err.kind(), ErrorKind::Parse);
    }

    #[tokio::test]
    async fn test_list_branches_invalid_json() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/mobile/branches.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string("}}}[[[["))
            .mount(&server)
            .await;

        let err = client_for(&server).await.branches().list().await.unwrap_err();
        assert!(matches!(err, TsmError::Json { .. }));
    }
}
