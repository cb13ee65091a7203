// src/client/api.rs

use reqwest::{header, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(8);

/// Endereço e tempo limite, passados explicitamente a cada cliente.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim().trim_end_matches('/').to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn from_host_port(host: &str, port: u16) -> Self {
        Self::new(format!("http://{}:{}", host.trim(), port))
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Defina a conexão primeiro.")]
    NotConfigured,

    #[error("Tempo esgotado após {}s", .0.as_secs_f32())]
    Timeout(Duration),

    // A mensagem já vem normalizada (do servidor ou do status)
    #[error("{message}")]
    Http { status: u16, message: String },

    #[error("Falha de rede: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Resposta inesperada: {0}")]
    Decode(String),
}

/// Mensagem de erro da resposta: `error`, depois `message`, senão o status.
pub fn error_message(status: StatusCode, body: Option<&Value>) -> String {
    body.and_then(|data| {
        ["error", "message"]
            .iter()
            .filter_map(|key| data.get(key).and_then(Value::as_str))
            .find(|msg| !msg.trim().is_empty())
    })
    .map(String::from)
    .unwrap_or_else(|| format!("Erro HTTP {}", status.as_u16()))
}

#[derive(Clone)]
pub struct ApiClient {
    config: ClientConfig,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Único ponto de saída: toda chamada passa por aqui.
    /// O tempo limite cobre envio e leitura do corpo; ao estourar, o futuro
    /// é descartado e a conexão abortada.
    pub async fn request(&self, method: Method, path: &str, body: Option<&Value>) -> Result<Value, ClientError> {
        if self.config.base_url.is_empty() {
            return Err(ClientError::NotConfigured);
        }
        let url = format!("{}{}", self.config.base_url, path);

        let call = async {
            let mut builder = self
                .http
                .request(method.clone(), &url)
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::ACCEPT, "application/json");
            if let Some(body) = body {
                builder = builder.json(body);
            }
            let response = builder.send().await?;
            let status = response.status();
            let bytes = response.bytes().await?;
            Ok::<_, ClientError>((status, bytes))
        };

        let (status, bytes) = tokio::time::timeout(self.config.timeout, call)
            .await
            .map_err(|_| {
                tracing::warn!(%method, %url, "Tempo esgotado");
                ClientError::Timeout(self.config.timeout)
            })??;

        // Corpo vazio ou que não é JSON não é erro por si só.
        let data: Option<Value> = serde_json::from_slice(&bytes).ok();

        if !status.is_success() {
            return Err(ClientError::Http {
                status: status.as_u16(),
                message: error_message(status, data.as_ref()),
            });
        }
        Ok(data.unwrap_or(Value::Null))
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let data = self.request(Method::GET, path, None).await?;
        serde_json::from_value(data).map_err(|e| ClientError::Decode(format!("{}: {}", path, e)))
    }

    pub async fn post(&self, path: &str, body: &Value) -> Result<Value, ClientError> {
        self.request(Method::POST, path, Some(body)).await
    }

    pub async fn put(&self, path: &str, body: &Value) -> Result<Value, ClientError> {
        self.request(Method::PUT, path, Some(body)).await
    }

    pub async fn delete(&self, path: &str) -> Result<Value, ClientError> {
        self.request(Method::DELETE, path, None).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn config_builds_base_url() {
        let config = ClientConfig::from_host_port("localhost", 3001);
        assert_eq!(config.base_url, "http://localhost:3001");
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
        assert_eq!(ClientConfig::new("http://x:1/").base_url, "http://x:1");
    }

    #[test]
    fn error_message_prefers_server_text() {
        let body = json!({ "error": "Produto inválido", "message": "ignorada" });
        assert_eq!(error_message(StatusCode::BAD_REQUEST, Some(&body)), "Produto inválido");

        let body = json!({ "message": "Só message" });
        assert_eq!(error_message(StatusCode::BAD_REQUEST, Some(&body)), "Só message");

        let body = json!({ "error": "" });
        assert_eq!(error_message(StatusCode::BAD_GATEWAY, Some(&body)), "Erro HTTP 502");
        assert_eq!(error_message(StatusCode::INTERNAL_SERVER_ERROR, None), "Erro HTTP 500");
    }

    #[tokio::test]
    async fn empty_base_url_fails_without_network() {
        let client = ApiClient::new(ClientConfig::new("")).unwrap();
        let err = client.request(Method::GET, "/test-connection", None).await.unwrap_err();
        assert!(matches!(err, ClientError::NotConfigured));
        assert_eq!(err.to_string(), "Defina a conexão primeiro.");
    }
}
