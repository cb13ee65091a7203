// src/middleware/rate_limit.rs

use axum::{
    extract::{ConnectInfo, Request, State},
    http::{HeaderMap, HeaderName, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::{
    collections::HashMap,
    net::SocketAddr,
    sync::Mutex,
    time::{Duration, Instant},
};

use crate::{common::error::AppError, config::AppState};

const WINDOW: Duration = Duration::from_secs(60);
// Acima disso, janelas vencidas são descartadas antes de contar,
// no máximo uma vez por `PRUNE_INTERVAL`.
const PRUNE_THRESHOLD: usize = 10_000;
const PRUNE_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy)]
struct Window {
    started: Instant,
    count: u32,
}

#[derive(Debug, Default)]
struct Hits {
    windows: HashMap<String, Window>,
    last_prune: Option<Instant>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allowed { remaining: u32, reset_secs: u64 },
    Limited { reset_secs: u64 },
}

/// Janela fixa de um minuto por IP, em memória.
#[derive(Debug)]
pub struct RateLimiter {
    max: u32,
    window: Duration,
    trust_proxy: bool,
    hits: Mutex<Hits>,
}

impl RateLimiter {
    /// `max == 0` desliga o limite.
    pub fn per_minute(max: u32) -> Self {
        Self {
            max,
            window: WINDOW,
            trust_proxy: false,
            hits: Mutex::new(Hits::default()),
        }
    }

    /// Liga a leitura de `X-Forwarded-For`/`X-Real-IP`.
    pub fn trusting_proxy(mut self, trust_proxy: bool) -> Self {
        self.trust_proxy = trust_proxy;
        self
    }

    pub fn enabled(&self) -> bool {
        self.max > 0
    }

    pub fn limit(&self) -> u32 {
        self.max
    }

    pub fn check(&self, key: &str, now: Instant) -> Decision {
        // Um lock envenenado só perde contagens; seguimos com o mapa.
        let mut hits = self.hits.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

        let Hits { windows, last_prune } = &mut *hits;

        let prune_due = last_prune.map_or(true, |at| now.duration_since(at) >= PRUNE_INTERVAL);
        if windows.len() > PRUNE_THRESHOLD && prune_due {
            let window = self.window;
            windows.retain(|_, w| now.duration_since(w.started) < window);
            *last_prune = Some(now);
        }

        let entry = windows.entry(key.to_string()).or_insert(Window { started: now, count: 0 });
        if now.duration_since(entry.started) >= self.window {
            *entry = Window { started: now, count: 0 };
        }

        let elapsed = now.duration_since(entry.started);
        let reset_secs = self.window.saturating_sub(elapsed).as_secs().max(1);

        if entry.count >= self.max {
            return Decision::Limited { reset_secs };
        }
        entry.count += 1;
        Decision::Allowed { remaining: self.max - entry.count, reset_secs }
    }

    /// Chave do cliente: o IP do socket. Os cabeçalhos de proxy só valem
    /// com `trust_proxy`, senão qualquer um troca de janela a cada pedido.
    pub fn client_key(&self, headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
        if self.trust_proxy {
            if let Some(ip) = forwarded_ip(headers) {
                return ip.to_string();
            }
        }
        peer.map(|addr| addr.ip().to_string())
            .unwrap_or_else(|| "unknown".to_string())
    }
}

/// Primeiro IP de `X-Forwarded-For`, senão `X-Real-IP`.
fn forwarded_ip(headers: &HeaderMap) -> Option<&str> {
    let forwarded = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty());
    let real_ip = headers
        .get("x-real-ip")
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty());

    forwarded.or(real_ip)
}

fn set_number(headers: &mut HeaderMap, name: &'static str, value: u64) {
    headers.insert(HeaderName::from_static(name), HeaderValue::from(value));
}

pub async fn rate_limit(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let limiter = &state.rate_limiter;
    if !limiter.enabled() {
        return next.run(request).await;
    }

    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);
    let ip = limiter.client_key(request.headers(), peer);

    match limiter.check(&ip, Instant::now()) {
        Decision::Allowed { remaining, reset_secs } => {
            let mut response = next.run(request).await;
            let headers = response.headers_mut();
            set_number(headers, "ratelimit-limit", u64::from(limiter.limit()));
            set_number(headers, "ratelimit-remaining", u64::from(remaining));
            set_number(headers, "ratelimit-reset", reset_secs);
            response
        }
        Decision::Limited { reset_secs } => {
            tracing::warn!(ip = %ip, path = %request.uri().path(), "Limite de requisições excedido");
            let mut response = AppError::TooManyRequests { retry_after: reset_secs }.into_response();
            let headers = response.headers_mut();
            set_number(headers, "ratelimit-limit", u64::from(limiter.limit()));
            set_number(headers, "ratelimit-remaining", 0);
            set_number(headers, "ratelimit-reset", reset_secs);
            response
        }
    }
}
