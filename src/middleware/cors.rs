// src/middleware/cors.rs

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, HeaderValue, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::{common::error::AppError, config::AppState};

/// Origens sempre liberadas (front local).
pub const BUILTIN_ORIGINS: &[&str] = &["http://localhost:3000", "http://127.0.0.1:3000"];

const ALLOW_METHODS: &str = "GET,HEAD,PUT,PATCH,POST,DELETE,OPTIONS";
const ALLOW_HEADERS: &str = "Origin, X-Requested-With, Content-Type, Accept, Authorization, Cache-Control";
const MAX_AGE: &str = "3600";

#[derive(Debug, Clone)]
pub struct CorsPolicy {
    allowed: Vec<String>,
}

impl CorsPolicy {
    /// Lista embutida mais as origens extras da configuração, sem repetição.
    pub fn new(extra: &[String]) -> Self {
        let mut allowed: Vec<String> = BUILTIN_ORIGINS.iter().map(|o| o.to_string()).collect();
        for origin in extra {
            let origin = origin.trim().trim_end_matches('/');
            if !origin.is_empty() && !allowed.iter().any(|o| o == origin) {
                allowed.push(origin.to_string());
            }
        }
        Self { allowed }
    }

    /// Sem `Origin` (curl, servidor a servidor) a requisição passa.
    pub fn is_allowed(&self, origin: Option<&str>) -> bool {
        match origin {
            None => true,
            Some(origin) => self.allowed.iter().any(|o| o == origin),
        }
    }

    pub fn origins(&self) -> &[String] {
        &self.allowed
    }

    /// Devolve a origem literal (nunca `*`), já que há credenciais.
    fn apply(&self, headers: &mut HeaderMap, origin: Option<&HeaderValue>) {
        headers.append(header::VARY, HeaderValue::from_static("Origin"));
        let Some(origin) = origin else { return };

        headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, origin.clone());
        headers.insert(header::ACCESS_CONTROL_ALLOW_CREDENTIALS, HeaderValue::from_static("true"));
        headers.insert(header::ACCESS_CONTROL_ALLOW_METHODS, HeaderValue::from_static(ALLOW_METHODS));
        headers.insert(header::ACCESS_CONTROL_ALLOW_HEADERS, HeaderValue::from_static(ALLOW_HEADERS));
        headers.insert(header::ACCESS_CONTROL_MAX_AGE, HeaderValue::from_static(MAX_AGE));
    }
}

/// Primeira camada da pilha: o preflight responde aqui mesmo, antes de
/// limite de taxa, rotas ou banco.
pub async fn cors_guard(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let origin_header = request.headers().get(header::ORIGIN).cloned();
    let origin = origin_header.as_ref().and_then(|v| v.to_str().ok());
    let allowed = state.cors.is_allowed(origin)
        && (origin_header.is_none() || origin.is_some());

    if request.method() == Method::OPTIONS {
        let mut response = StatusCode::OK.into_response();
        if allowed {
            state.cors.apply(response.headers_mut(), origin_header.as_ref());
        }
        return response;
    }

    if !allowed {
        let origin = origin.unwrap_or("<inválida>").to_string();
        tracing::warn!(origin = %origin, "Origem bloqueada");
        return AppError::CorsRejected(origin).into_response();
    }

    let mut response = next.run(request).await;
    state.cors.apply(response.headers_mut(), origin_header.as_ref());
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_and_extra_origins_are_allowed() {
        let policy = CorsPolicy::new(&["https://nm.example/".to_string(), "http://localhost:3000".to_string()]);
        assert!(policy.is_allowed(Some("http://localhost:3000")));
        assert!(policy.is_allowed(Some("http://127.0.0.1:3000")));
        assert!(policy.is_allowed(Some("https://nm.example")));
        assert_eq!(policy.origins().len(), 3);
    }

    #[test]
    fn missing_origin_is_allowed_and_unknown_is_not() {
        let policy = CorsPolicy::new(&[]);
        assert!(policy.is_allowed(None));
        assert!(!policy.is_allowed(Some("https://evil.example")));
        assert!(!policy.is_allowed(Some("http://localhost:3001")));
    }

    #[test]
    fn apply_reflects_literal_origin() {
        let policy = CorsPolicy::new(&[]);
        let mut headers = HeaderMap::new();
        let origin = HeaderValue::from_static("http://localhost:3000");
        policy.apply(&mut headers, Some(&origin));

        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "http://localhost:3000");
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
        assert_eq!(headers[header::ACCESS_CONTROL_MAX_AGE], "3600");
        assert_eq!(headers[header::VARY], "Origin");
    }

    #[test]
    fn apply_without_origin_only_sets_vary() {
        let policy = CorsPolicy::new(&[]);
        let mut headers = HeaderMap::new();
        policy.apply(&mut headers, None);
        assert!(!headers.contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
        assert_eq!(headers[header::VARY], "Origin");
    }
}
