// src/config.rs

use sqlx::PgPool;
use std::{env, sync::Arc};
use thiserror::Error;

use crate::{
    db::{DashboardRepository, LookupRepository, ProductRepository, ProductionRepository, ScrapRepository},
    middleware::{cors::CorsPolicy, rate_limit::RateLimiter},
    services::{DashboardService, ProductService, ProductionService, ScrapService},
};

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_APP_NAME: &str = "nm-comp-api";
pub const DEFAULT_POOL_MAX: u32 = 10;
pub const DEFAULT_RATE_LIMIT_MAX: u32 = 200;

const DATABASE_URL_VARS: &[&str] = &[
    "DATABASE_URL",
    "URL_DO_BANCO_DE_DADOS",
    "URL_PUBLICO_DO_BANCO_DE_DADOS",
    "URL_PÚBLICO_DO_BANCO_DE_DADOS",
];
const PORT_VARS: &[&str] = &["PORT", "PORTA"];
const CORS_VARS: &[&str] = &["CORS_ORIGINS", "CORS_ORIGENS"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Nenhuma variável de banco encontrada (DATABASE_URL/URL_DO_BANCO_DE_DADOS).")]
    MissingDatabaseUrl,

    #[error("Valor inválido para {var}: '{value}'")]
    InvalidNumber { var: String, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

impl LogFormat {
    fn parse(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
            Some("json") => LogFormat::Json,
            Some("pretty") | Some("dev") => LogFormat::Pretty,
            _ => LogFormat::Compact,
        }
    }
}

/// Configuração efetiva, lida do ambiente. Só a URL do banco é obrigatória.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub port: u16,
    pub cors_origins: Vec<String>,
    pub app_name: String,
    pub pool_max: u32,
    pub rate_limit_max: u32,
    /// Só atrás de um proxy conhecido: o limite de taxa passa a usar `X-Forwarded-For`.
    pub trust_proxy: bool,
    pub log_format: LogFormat,
}

/// Primeiro valor não vazio entre os nomes informados, junto do nome que o forneceu.
fn pick_named<'n, F>(lookup: &F, names: &[&'n str]) -> Option<(&'n str, String)>
where
    F: Fn(&str) -> Option<String>,
{
    names
        .iter()
        .filter_map(|&name| lookup(name).map(|v| (name, v)))
        .find(|(_, v)| !v.trim().is_empty())
}

fn pick<F>(lookup: &F, names: &[&str]) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    pick_named(lookup, names).map(|(_, v)| v)
}

fn pick_number<F, T>(lookup: &F, names: &[&str], default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match pick_named(lookup, names) {
        None => Ok(default),
        Some((var, raw)) => raw.trim().parse().map_err(|_| ConfigError::InvalidNumber {
            var: var.to_string(),
            value: raw,
        }),
    }
}

fn pick_flag<F>(lookup: &F, var: &str) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    matches!(
        pick(lookup, &[var]).map(|v| v.trim().to_ascii_lowercase()).as_deref(),
        Some("1" | "true" | "yes" | "sim")
    )
}

/// Remove aspas que alguns painéis de deploy deixam em volta da URL.
fn strip_quotes(raw: &str) -> String {
    let trimmed = raw.trim();
    for quote in ['"', '\''] {
        if let Some(inner) = trimmed
            .strip_prefix(quote)
            .and_then(|s| s.strip_suffix(quote))
        {
            return inner.to_string();
        }
    }
    trimmed.to_string()
}

impl AppConfig {
    /// Carrega `.env` (se existir) e lê o ambiente do processo.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = pick(&lookup, DATABASE_URL_VARS)
            .map(|raw| strip_quotes(&raw))
            .ok_or(ConfigError::MissingDatabaseUrl)?;

        let port = pick_number(&lookup, PORT_VARS, DEFAULT_PORT)?;

        let cors_origins = pick(&lookup, CORS_VARS)
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            database_url,
            port,
            cors_origins,
            app_name: pick(&lookup, &["APP_NAME"]).unwrap_or_else(|| DEFAULT_APP_NAME.to_string()),
            pool_max: pick_number(&lookup, &["PG_POOL_MAX"], DEFAULT_POOL_MAX)?,
            rate_limit_max: pick_number(&lookup, &["RATE_LIMIT_MAX"], DEFAULT_RATE_LIMIT_MAX)?,
            trust_proxy: pick_flag(&lookup, "TRUST_PROXY"),
            log_format: LogFormat::parse(pick(&lookup, &["LOG_FORMAT"]).as_deref()),
        })
    }

    pub fn cors_configured(&self) -> bool {
        !self.cors_origins.is_empty()
    }
}

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub config: Arc<AppConfig>,
    pub cors: Arc<CorsPolicy>,
    pub rate_limiter: Arc<RateLimiter>,

    pub lookup_repo: LookupRepository,
    pub scrap_service: ScrapService,
    pub product_service: ProductService,
    pub production_service: ProductionService,
    pub dashboard_service: DashboardService,
}

impl AppState {
    /// Monta o gráfico de dependências em cima de uma pool já criada.
    pub fn new(config: AppConfig, db_pool: PgPool) -> Self {
        let product_repo = ProductRepository::new();

        Self {
            cors: Arc::new(CorsPolicy::new(&config.cors_origins)),
            rate_limiter: Arc::new(
                RateLimiter::per_minute(config.rate_limit_max).trusting_proxy(config.trust_proxy),
            ),
            lookup_repo: LookupRepository::new(),
            scrap_service: ScrapService::new(ScrapRepository::new()),
            production_service: ProductionService::new(ProductionRepository::new(), product_repo.clone()),
            product_service: ProductService::new(product_repo),
            dashboard_service: DashboardService::new(DashboardRepository::new()),
            config: Arc::new(config),
            db_pool,
        }
    }
}
