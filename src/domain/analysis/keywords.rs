//! Business keyword extraction.

use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Single-word business vocabulary recognized in free text.
static BUSINESS_KEYWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "tráfico",
        "visitas",
        "seo",
        "conversión",
        "ventas",
        "clientes",
        "competencia",
        "precios",
        "marketing",
        "publicidad",
        "email",
        "contenido",
        "blog",
        "landing",
        "website",
        "móvil",
        "retención",
        "churn",
        "satisfacción",
        "experiencia",
        "soporte",
        "producto",
        "servicio",
        "calidad",
        "innovación",
        "tecnología",
        "costos",
        "ingresos",
        "rentabilidad",
        "crecimiento",
        "escalabilidad",
    ]
    .into_iter()
    .collect()
});

/// Returns every token of `text` that is a business keyword, in text order.
///
/// Tokens are lowercased, split on whitespace, and stripped of surrounding
/// punctuation. Repeated keywords are counted each time they occur.
pub fn extract_keywords(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(|token| token.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|token| BUSINESS_KEYWORDS.contains(token))
        .map(str::to_string)
        .collect()
}

pub fn is_business_keyword(word: &str) -> bool {
    BUSINESS_KEYWORDS.contains(word)
}
