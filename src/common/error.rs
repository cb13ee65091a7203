use axum::{
    extract::rejection::JsonRejection,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::collections::BTreeMap;
use thiserror::Error;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("JSON inválido: {0}")]
    InvalidJson(#[from] JsonRejection),

    #[error("ID inválido")]
    InvalidId,

    #[error("Produto inválido")]
    InvalidProduct,

    #[error("Rota não encontrada")]
    RouteNotFound,

    #[error("Origem não permitida pelo CORS: {0}")]
    CorsRejected(String),

    #[error("Muitas requisições. Tente novamente em instantes.")]
    TooManyRequests { retry_after: u64 },

    #[error("Erro de banco de dados: {0}")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor: {0}")]
    InternalServerError(#[from] anyhow::Error),
}

impl AppError {
    /// Código SQLSTATE do banco, quando o erro veio de lá.
    fn db_code(&self) -> Option<String> {
        match self {
            AppError::DatabaseError(sqlx::Error::Database(db_err)) => {
                db_err.code().map(|c| c.into_owned())
            }
            _ => None,
        }
    }

    /// Nomes dos campos que falharam em `required` ou `length`, em ordem.
    fn missing_fields(errors: &validator::ValidationErrors) -> Vec<String> {
        let mut fields: Vec<String> = errors
            .field_errors()
            .into_iter()
            .filter(|(_, errs)| {
                errs.iter()
                    .any(|e| e.code == "required" || e.code == "length")
            })
            .map(|(field, _)| field.to_string())
            .collect();
        fields.sort();
        fields
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Qualquer erro que fale de CORS é uma recusa de origem.
        let full_message = self.to_string();
        if full_message.contains("CORS") {
            tracing::warn!("🚫 {}", full_message);
            return (StatusCode::FORBIDDEN, Json(json!({ "error": full_message }))).into_response();
        }

        let (status, error_message, code) = match &self {
            // Devolve todos os detalhes da validação, com a lista de campos faltantes.
            AppError::ValidationError(errors) => {
                let mut details = BTreeMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .map(|e| {
                            e.message
                                .as_ref()
                                .map(|m| m.to_string())
                                .unwrap_or_else(|| e.code.to_string())
                        })
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let missing = Self::missing_fields(errors);
                let error = if missing.is_empty() {
                    "Um ou mais campos são inválidos.".to_string()
                } else {
                    format!("Campos obrigatórios: {}", missing.join(", "))
                };
                let body = Json(json!({ "error": error, "details": details }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::InvalidJson(rejection) => (
                StatusCode::BAD_REQUEST,
                format!("JSON inválido: {}", rejection.body_text()),
                None,
            ),
            AppError::InvalidId => (StatusCode::BAD_REQUEST, self.to_string(), None),
            AppError::InvalidProduct => (StatusCode::BAD_REQUEST, self.to_string(), None),
            AppError::RouteNotFound => (StatusCode::NOT_FOUND, self.to_string(), None),
            AppError::CorsRejected(_) => (StatusCode::FORBIDDEN, full_message, None),
            AppError::TooManyRequests { retry_after } => {
                let body = Json(json!({ "error": self.to_string() }));
                let mut response = (StatusCode::TOO_MANY_REQUESTS, body).into_response();
                if let Ok(value) = HeaderValue::from_str(&retry_after.to_string()) {
                    response.headers_mut().insert(header::RETRY_AFTER, value);
                }
                return response;
            }

            // Violações de integridade são erro do cliente, não do servidor.
            AppError::DatabaseError(sqlx::Error::Database(db_err))
                if db_err.is_foreign_key_violation() =>
            {
                (
                    StatusCode::BAD_REQUEST,
                    "Referência inválida: turno, setor, família ou produto inexistente.".to_string(),
                    self.db_code(),
                )
            }
            AppError::DatabaseError(sqlx::Error::Database(db_err))
                if db_err.is_check_violation() =>
            {
                (
                    StatusCode::BAD_REQUEST,
                    "Valor fora do intervalo permitido.".to_string(),
                    self.db_code(),
                )
            }

            // Todos os outros erros viram 500, com o código do banco quando existir.
            AppError::DatabaseError(e) => {
                tracing::error!(code = ?self.db_code(), "[DB_ERR] {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Erro ao acessar o banco de dados.".to_string(),
                    Some(self.db_code().unwrap_or_else(|| "ERR".to_string())),
                )
            }
            AppError::InternalServerError(e) => {
                tracing::error!("💥 Erro Interno do Servidor: {:#}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Erro inesperado".to_string(),
                    Some("ERR".to_string()),
                )
            }
        };

        let body = match code {
            Some(code) => Json(json!({ "error": error_message, "code": code })),
            None => Json(json!({ "error": error_message })),
        };
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::{ValidationError, ValidationErrors};

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn validation_error_lists_missing_fields() {
        let mut errors = ValidationErrors::new();
        errors.add("Descricao", ValidationError::new("required"));
        errors.add("Codigo", ValidationError::new("length"));

        let response = AppError::ValidationError(errors).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["error"], "Campos obrigatórios: Codigo, Descricao");
        assert!(body["details"]["Codigo"].is_array());
    }

    #[tokio::test]
    async fn range_only_errors_are_reported_as_invalid() {
        let mut errors = ValidationErrors::new();
        errors.add("Quantidade_Chapas", ValidationError::new("range"));

        let body = body_json(AppError::ValidationError(errors).into_response()).await;
        assert_eq!(body["error"], "Um ou mais campos são inválidos.");
    }

    #[tokio::test]
    async fn cors_rejection_is_forbidden() {
        let response = AppError::CorsRejected("https://evil.example".into()).into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        let body = body_json(response).await;
        assert!(body["error"].as_str().unwrap().contains("CORS"));
    }

    #[tokio::test]
    async fn any_error_mentioning_cors_is_forced_to_403() {
        let err = AppError::InternalServerError(anyhow::anyhow!("bloqueado pelo CORS"));
        assert_eq!(err.into_response().status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn too_many_requests_sets_retry_after() {
        let response = AppError::TooManyRequests { retry_after: 42 }.into_response();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(response.headers()[header::RETRY_AFTER], "42");
    }

    #[tokio::test]
    async fn pool_errors_default_to_500_with_code() {
        let response = AppError::DatabaseError(sqlx::Error::PoolTimedOut).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["code"], "ERR");
    }
}
