//! Branch index endpoint.

use crate::CatalogClient;
use tsm_core::{BuildRecord, Result};

/// Per-branch build index endpoint
pub struct BuildsApi<'a> {
    client: &'a CatalogClient,
}

impl<'a> BuildsApi<'a> {
    pub(crate) const fn new(client: &'a CatalogClient) -> Self {
        Self { client }
    }

    /// Get every build record published for `branch`, in index order
    pub async fn for_branch(&self, branch: &str) -> Result<Vec<BuildRecord>> {
        let url = self.client.config().index_url(branch);
        self.client.get_json(&url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tsm_core::{ErrorKind, TsmError};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const MASTER_INDEX: &str = r#"[
        {
            "sha1": "2a60ec1e0b693047e6fa9112fe93944c5432a3c3",
            "build_url": "http://jenkins.appcelerator.org/job/titanium_mobile_master/1277/",
            "git_revision": "c63b0d947da94e2cdfb3fb06e95106cb803c3f22",
            "filename": "mobilesdk-2.1.0.v20120827132447-win32.zip",
            "git_branch": "master",
            "build_type": "mobile",
            "size": 26961576
        },
        {
            "sha1": "7be939ed222691536b8b32ad0782e4729a9d447c",
            "build_url": "http://jenkins.appcelerator.org/job/titanium_mobile_master/1278/",
            "git_revision": "79e9c73d5070fc4306d37bc1cf8cbabb2ad67ae8",
            "filename": "mobilesdk-2.2.0.v20120827143312-osx.zip",
            "git_branch": "master",
            "build_type": "mobile",
            "size": 80186079
        }
    ]"#;

    async fn client_for(server: &MockServer) -> CatalogClient {
        CatalogClient::builder()
            .base_url(format!("{}/mobile/", server.uri()))
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_branch_index() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/mobile/master/index.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string(MASTER_INDEX))
            .mount(&server)
            .await;

        let records = client_for(&server).await.builds().for_branch("master").await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].sha1, "2a60ec1e0b693047e6fa9112fe93944c5432a3c3");
        assert_eq!(records[1].size, 80_186_079);
    }

    #[tokio::test]
    async fn test_branch_index_404() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/mobile/master/index.json"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = client_for(&server).await.builds().for_branch("master").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Fetch);
    }

    #[tokio::test]
    async fn test_branch_index_malformed_json() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/mobile/master/index.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string("}}}[[[["))
            .mount(&server)
            .await;

        let err = client_for(&server).await.builds().for_branch("master").await.unwrap_err();
        assert!(matches!(err, TsmError::Json { .. }));
        assert_eq!(err.kind(), ErrorKind::Parse);
    }
}
