use crate::domain::model::RawPayload;
use crate::domain::ports::{ConfigProvider, Target, Transport};
use crate::utils::error::{Result, TransportError};
use async_trait::async_trait;
use reqwest::Client;
use url::Url;

/// 以 reqwest 實作的傳輸層，不做重試
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    pub fn from_config(config: &dyn ConfigProvider) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(TransportError::Request)?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn fetch(&self, target: &Target) -> std::result::Result<RawPayload, TransportError> {
        let url = Url::parse(&target.url())?;
        tracing::debug!("Making API request to: {}", url);

        let mut request = self.client.get(url.clone());
        for (name, value) in &target.headers {
            request = request.header(name.as_str(), value.as_str());
        }

        let response = request.send().await?;
        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let bytes = response.bytes().await?;
        tracing::debug!("Received {} bytes from {}", bytes.len(), url);
        Ok(RawPayload::new(bytes.to_vec()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn target(base_url: String) -> Target {
        Target {
            base_url,
            path: "/users".to_string(),
            headers: vec![("X-Api-Key".to_string(), "secret".to_string())],
        }
    }

    #[tokio::test]
    async fn test_fetch_returns_raw_body() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/users").header("X-Api-Key", "secret");
            then.status(200)
                .header("Content-Type", "application/json")
                .body(r#"[{"name":"x"}]"#);
        });

        let transport = HttpTransport::new();
        let payload = transport.fetch(&target(server.base_url())).await.unwrap();

        api_mock.assert();
        assert_eq!(payload.as_bytes(), br#"[{"name":"x"}]"#);
    }

    #[tokio::test]
    async fn test_fetch_non_success_status_is_transport_error() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/users");
            then.status(500);
        });

        let transport = HttpTransport::new();
        let result = transport.fetch(&target(server.base_url())).await;

        api_mock.assert();
        assert!(matches!(
            result,
            Err(TransportError::Status { status: 500, .. })
        ));
    }

    #[tokio::test]
    async fn test_fetch_invalid_target() {
        let transport = HttpTransport::new();
        let result = transport.fetch(&target("not a url".to_string())).await;
        assert!(matches!(result, Err(TransportError::InvalidTarget(_))));
    }
}
