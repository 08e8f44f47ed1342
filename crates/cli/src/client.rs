//! API client for communicating with the estimator server

use anyhow::{Context, Result};
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::collections::HashMap;
use url::Url;

/// API client for the estimator server
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a new API client
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;

        let base_url = Url::parse(base_url).context("Invalid API URL")?;

        Ok(Self { client, base_url })
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.base_url.join(path).context("Invalid path")?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("Failed to send request")?;

        Self::decode(response).await
    }

    /// Make a POST request with JSON body
    pub async fn post<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> Result<T> {
        let url = self.base_url.join(path).context("Invalid path")?;

        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .context("Failed to send request")?;

        Self::decode(response).await
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiError>(&body)
                .map(|e| e.message)
                .unwrap_or(body);
            anyhow::bail!("API error ({}): {}", status, message);
        }

        response.json().await.context("Failed to parse response")
    }

    /// Request an estimate; omitted attributes take the server defaults
    pub async fn estimate(&self, request: &EstimateRequest) -> Result<EstimateResponse> {
        self.post("api/v1/estimate", request).await
    }

    pub async fn schema(&self) -> Result<SchemaResponse> {
        self.get("api/v1/schema").await
    }

    pub async fn health(&self) -> Result<HealthResponse> {
        self.get("healthz").await
    }

    pub async fn readiness(&self) -> Result<ReadinessResponse> {
        self.get("readyz").await
    }
}

// API request and response types

/// Attribute name to raw value
pub type EstimateRequest = HashMap<String, serde_json::Value>;

#[derive(Debug, Clone, Deserialize)]
struct ApiError {
    message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum EstimateResponse {
    Ok {
        price: f64,
        formatted: String,
        note: String,
        model_version: String,
    },
    Failed {
        message: String,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaResponse {
    pub schema_version: String,
    pub model_version: String,
    pub attributes: Vec<AttributeInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttributeInfo {
    pub name: String,
    pub label: String,
    pub domain: DomainInfo,
    pub default: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DomainInfo {
    Integer { min: u32, max: u32 },
    Enum { options: Vec<String> },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub components: HashMap<String, ComponentInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentInfo {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    #[serde(default)]
    pub model_version: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_estimate_ok() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/v1/estimate")
            .match_body(mockito::Matcher::Json(json!({ "area": 7420 })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "status": "ok",
                    "price": 8500000.0,
                    "formatted": "₹8,500,000.00",
                    "note": "Based on your input and our trained ML model.",
                    "model_version": "1.0.0"
                })
                .to_string(),
            )
            .create_async()
            .await;

        let client = ApiClient::new(&server.url()).unwrap();
        let mut request = EstimateRequest::new();
        request.insert("area".to_string(), json!(7420));

        match client.estimate(&request).await.unwrap() {
            EstimateResponse::Ok { formatted, .. } => assert_eq!(formatted, "₹8,500,000.00"),
            other => panic!("expected estimate, got {:?}", other),
        }
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_estimate_failed() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/v1/estimate")
            .with_status(200)
            .with_body(r#"{"status":"failed","message":"Prediction failed: shape mismatch"}"#)
            .create_async()
            .await;

        let client = ApiClient::new(&server.url()).unwrap();
        match client.estimate(&EstimateRequest::new()).await.unwrap() {
            EstimateResponse::Failed { message } => assert!(message.contains("shape mismatch")),
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_rejection_surfaces_server_message() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/v1/estimate")
            .with_status(422)
            .with_body(r#"{"status":"rejected","message":"stories must be between 1 and 4, got 9"}"#)
            .create_async()
            .await;

        let client = ApiClient::new(&server.url()).unwrap();
        let err = client.estimate(&EstimateRequest::new()).await.unwrap_err();
        let text = err.to_string();
        assert!(text.contains("422"));
        assert!(text.contains("stories must be between 1 and 4, got 9"));
    }

    #[tokio::test]
    async fn test_schema() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/v1/schema")
            .with_status(200)
            .with_body(
                json!({
                    "schema_version": "house-features/v1",
                    "model_version": "1.0.0",
                    "attributes": [
                        { "name": "area", "label": "Area (sq ft)", "domain": { "kind": "integer", "min": 500, "max": 100000 }, "default": 2500 },
                        { "name": "mainroad", "label": "Main Road", "domain": { "kind": "enum", "options": ["yes", "no"] }, "default": "yes" }
                    ]
                })
                .to_string(),
            )
            .create_async()
            .await;

        let client = ApiClient::new(&server.url()).unwrap();
        let schema = client.schema().await.unwrap();
        assert_eq!(schema.attributes.len(), 2);
        assert!(matches!(schema.attributes[0].domain, DomainInfo::Integer { min: 500, max: 100000 }));
    }

    #[tokio::test]
    async fn test_readiness_not_ready_is_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/readyz")
            .with_status(503)
            .with_body(r#"{"ready":false,"reason":"Model not yet loaded"}"#)
            .create_async()
            .await;

        let client = ApiClient::new(&server.url()).unwrap();
        let err = client.readiness().await.unwrap_err();
        assert!(err.to_string().contains("503"));
    }

    #[tokio::test]
    async fn test_health() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/healthz")
            .with_status(200)
            .with_body(
                r#"{"status":"healthy","components":{"api":{"status":"healthy","last_check_timestamp":1700000000}}}"#,
            )
            .create_async()
            .await;

        let client = ApiClient::new(&server.url()).unwrap();
        let health = client.health().await.unwrap();
        assert_eq!(health.status, "healthy");
        assert_eq!(health.components["api"].status, "healthy");
        assert!(health.components["api"].message.is_none());
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(ApiClient::new("not a url").is_err());
    }
}
