// src/common/params.rs

use axum::{extract::Query, http::Uri};
use chrono::{DateTime, NaiveDate};
use serde::{de, Deserialize, Deserializer};
use serde_json::Value;
use std::str::FromStr;

use crate::common::error::AppError;

pub const DEFAULT_PAGE_SIZE: i64 = 50;
pub const MAX_PRODUCT_PAGE_SIZE: i64 = 100;
pub const MAX_FACT_PAGE_SIZE: i64 = 200;

// ---
// Paginação
// ---

/// Página já normalizada: `page >= 1` e `1 <= page_size <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: i64,
    pub page_size: i64,
}

impl Pagination {
    /// Valores ausentes ou não numéricos caem no padrão, em vez de virar erro.
    pub fn from_query(page: Option<&str>, page_size: Option<&str>, max_page_size: i64) -> Self {
        let page = parse_int_or(page, 1).max(1);
        let page_size = parse_int_or(page_size, DEFAULT_PAGE_SIZE).clamp(1, max_page_size);
        Self { page, page_size }
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.page_size)
    }
}

fn parse_int_or(raw: Option<&str>, default: i64) -> i64 {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
        .unwrap_or(default)
}

/// Id de rota: inteiro positivo, senão `InvalidId` (antes de tocar no banco).
pub fn parse_id(raw: &str) -> Result<i32, AppError> {
    match raw.trim().parse::<i32>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(AppError::InvalidId),
    }
}

// ---
// Query string tolerante
// ---

/// Pares `chave=valor` da query string, na ordem em que chegaram.
/// Nunca rejeita: chave repetida vale a primeira ocorrência.
#[derive(Debug, Default, Clone)]
pub struct QueryPairs(Vec<(String, String)>);

impl QueryPairs {
    pub fn from_uri(uri: &Uri) -> Self {
        Query::<Vec<(String, String)>>::try_from_uri(uri)
            .map(|Query(pairs)| Self(pairs))
            .unwrap_or_default()
    }

    /// Primeiro valor cujo nome está em `names` (nome oficial e apelidos).
    pub fn first(&self, names: &[&str]) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| names.contains(&key.as_str()))
            .map(|(_, value)| value.as_str())
    }
}

// ---
// Filtro de datas
// ---

/// Intervalo inclusivo. Cada ponta é opcional.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    /// Datas malformadas são ignoradas (o filtro daquela ponta some).
    pub fn from_query(from: Option<&str>, to: Option<&str>) -> Self {
        Self {
            from: from.and_then(parse_date),
            to: to.and_then(parse_date),
        }
    }
}

/// Aceita `YYYY-MM-DD` ou um timestamp RFC 3339 (usa só a parte da data).
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            tracing::debug!(valor = raw, "filtro de data ignorado (formato inválido)");
            None
        })
}

/// Campo de data do payload: mesmos formatos do filtro, mas aqui data
/// ilegível é erro. Vazio ou `null` conta como ausente.
pub fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => parse_date(text)
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("data inválida: '{}'", text))),
    }
}

/// Escapa os curingas do ILIKE para que a busca seja literal.
pub fn like_pattern(search: &str) -> String {
    let mut escaped = String::with_capacity(search.len() + 2);
    escaped.push('%');
    for c in search.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

// ---
// Números vindos de formulário
// ---
// O front manda números tanto como JSON number quanto como string.

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(serde_json::Number),
    Text(String),
}

/// `null`, ausente ou `""` viram `None`; texto não numérico é erro de payload.
pub fn lenient_number<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
{
    let raw: Option<NumberOrText> = Option::deserialize(deserializer)?;
    let text = match raw {
        None => return Ok(None),
        Some(NumberOrText::Number(n)) => n.to_string(),
        Some(NumberOrText::Text(s)) => s.trim().to_string(),
    };
    if text.is_empty() {
        return Ok(None);
    }
    text.parse::<T>()
        .map(Some)
        .map_err(|_| de::Error::custom(format!("valor numérico inválido: '{}'", text)))
}

/// Como `lenient_number`, mas nunca falha: texto ilegível vira `NaN`,
/// que a sanitização de cubagem transforma em zero.
pub fn lossy_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(match raw {
        None | Some(Value::Null) => None,
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) if s.trim().is_empty() => None,
        Some(Value::String(s)) => Some(s.trim().parse::<f64>().unwrap_or(f64::NAN)),
        Some(_) => Some(f64::NAN),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[test]
    fn pagination_defaults_and_bounds() {
        assert_eq!(
            Pagination::from_query(None, None, MAX_PRODUCT_PAGE_SIZE),
            Pagination { page: 1, page_size: 50 }
        );
        assert_eq!(
            Pagination::from_query(Some("0"), Some("1000"), MAX_PRODUCT_PAGE_SIZE),
            Pagination { page: 1, page_size: 100 }
        );
        assert_eq!(
            Pagination::from_query(Some("-3"), Some("0"), MAX_FACT_PAGE_SIZE),
            Pagination { page: 1, page_size: 1 }
        );
        assert_eq!(
            Pagination::from_query(Some("abc"), Some("xyz"), MAX_FACT_PAGE_SIZE),
            Pagination { page: 1, page_size: 50 }
        );
        assert_eq!(
            Pagination::from_query(Some("3"), Some("500"), MAX_FACT_PAGE_SIZE),
            Pagination { page: 3, page_size: 200 }
        );
    }

    #[test]
    fn offset_follows_page() {
        let p = Pagination::from_query(Some("3"), Some("20"), MAX_FACT_PAGE_SIZE);
        assert_eq!(p.offset(), 40);
    }

    #[test]
    fn ids_must_be_positive_integers() {
        assert_eq!(parse_id("42").unwrap(), 42);
        assert!(matches!(parse_id("0"), Err(AppError::InvalidId)));
        assert!(matches!(parse_id("-1"), Err(AppError::InvalidId)));
        assert!(matches!(parse_id("abc"), Err(AppError::InvalidId)));
        assert!(matches!(parse_id("12abc"), Err(AppError::InvalidId)));
        assert!(matches!(parse_id("99999999999"), Err(AppError::InvalidId)));
    }

    fn pairs(uri: &str) -> QueryPairs {
        QueryPairs::from_uri(&uri.parse().unwrap())
    }

    #[test]
    fn query_pairs_keep_the_first_occurrence() {
        let q = pairs("/producao?from=2024-01-01&de=2024-01-02&page=1&page=2");
        assert_eq!(q.first(&["from", "de"]), Some("2024-01-01"));
        assert_eq!(q.first(&["page"]), Some("1"));
        assert_eq!(q.first(&["to", "ate"]), None);

        let q = pairs("/producao?de=2024-03-01&from=2024-04-01");
        assert_eq!(q.first(&["from", "de"]), Some("2024-03-01"));
    }

    #[test]
    fn query_pairs_without_query_string_are_empty() {
        assert_eq!(pairs("/produtos").first(&["page"]), None);
        assert_eq!(pairs("/produtos?search=MDF%2018").first(&["search"]), Some("MDF 18"));
    }

    #[test]
    fn malformed_dates_are_dropped() {
        let range = DateRange::from_query(Some("2024-02-30"), Some("ontem"));
        assert_eq!(range, DateRange::default());
    }

    #[test]
    fn dates_accept_plain_and_rfc3339() {
        let range = DateRange::from_query(Some("2024-03-01"), Some("2024-03-31T23:00:00Z"));
        assert_eq!(range.from, NaiveDate::from_ymd_opt(2024, 3, 1));
        assert_eq!(range.to, NaiveDate::from_ymd_opt(2024, 3, 31));
    }

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("MDF"), "%MDF%");
        assert_eq!(like_pattern("50%_a\\b"), "%50\\%\\_a\\\\b%");
    }

    #[derive(Deserialize)]
    struct Form {
        #[serde(default, deserialize_with = "lenient_number")]
        qtd: Option<i32>,
        #[serde(default, deserialize_with = "lossy_f64")]
        cub: Option<f64>,
    }

    #[derive(Deserialize)]
    struct Dated {
        #[serde(default, deserialize_with = "lenient_date")]
        data: Option<NaiveDate>,
    }

    #[test]
    fn payload_dates_accept_both_formats_and_reject_garbage() {
        let d: Dated = serde_json::from_str(r#"{"data": "2024-05-10"}"#).unwrap();
        assert_eq!(d.data, NaiveDate::from_ymd_opt(2024, 5, 10));
        let d: Dated = serde_json::from_str(r#"{"data": "2024-05-10T08:00:00-03:00"}"#).unwrap();
        assert_eq!(d.data, NaiveDate::from_ymd_opt(2024, 5, 10));
        let d: Dated = serde_json::from_str(r#"{"data": ""}"#).unwrap();
        assert_eq!(d.data, None);
        assert!(serde_json::from_str::<Dated>(r#"{"data": "10/05/2024"}"#).is_err());
    }

    #[test]
    fn lenient_number_accepts_numbers_and_strings() {
        let f: Form = serde_json::from_str(r#"{"qtd": "12"}"#).unwrap();
        assert_eq!(f.qtd, Some(12));
        let f: Form = serde_json::from_str(r#"{"qtd": 7}"#).unwrap();
        assert_eq!(f.qtd, Some(7));
        let f: Form = serde_json::from_str(r#"{"qtd": ""}"#).unwrap();
        assert_eq!(f.qtd, None);
        let f: Form = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(f.qtd, None);
        assert!(serde_json::from_str::<Form>(r#"{"qtd": "doze"}"#).is_err());
    }

    #[test]
    fn lossy_f64_never_fails() {
        let f: Form = serde_json::from_str(r#"{"cub": "abc"}"#).unwrap();
        assert!(f.cub.unwrap().is_nan());
        let f: Form = serde_json::from_str(r#"{"cub": "0.5"}"#).unwrap();
        assert_eq!(f.cub, Some(0.5));
        let f: Form = serde_json::from_str(r#"{"cub": null}"#).unwrap();
        assert_eq!(f.cub, None);
        let f: Form = serde_json::from_str(r#"{"cub": true}"#).unwrap();
        assert!(f.cub.unwrap().is_nan());
    }
}
