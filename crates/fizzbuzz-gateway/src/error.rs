use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use fizzbuzz_core::{InvalidParameter, ParamField, StorageError};
use serde::Serialize;
use tracing::error;

pub type Result<T> = std::result::Result<T, AppError>;

/// Message language negotiated from `Accept-Language`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    English,
    French,
}

impl Language {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        match headers
            .get(header::ACCEPT_LANGUAGE)
            .and_then(|value| value.to_str().ok())
        {
            Some(lang) if lang.starts_with("fr") => Language::French,
            _ => Language::English,
        }
    }

    fn pick(self, en: &'static str, fr: &'static str) -> &'static str {
        match self {
            Language::English => en,
            Language::French => fr,
        }
    }
}

/// Error payload returned to clients.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub message: String,
}

/// Errors surfaced by the HTTP layer.
#[derive(Debug)]
pub enum AppError {
    /// The request body could not be parsed at all.
    InvalidBody {
        detail: String,
        language: Language,
    },
    /// One of the five parameters failed its bound.
    InvalidParameter {
        source: InvalidParameter,
        language: Language,
    },
    /// The statistics backend failed a synchronous query.
    Stats {
        source: StorageError,
        language: Language,
    },
}

impl AppError {
    pub fn invalid_body(detail: impl Into<String>, language: Language) -> Self {
        Self::InvalidBody {
            detail: detail.into(),
            language,
        }
    }

    pub fn invalid_parameter(source: InvalidParameter, language: Language) -> Self {
        Self::InvalidParameter { source, language }
    }

    pub fn stats(source: StorageError, language: Language) -> Self {
        Self::Stats { source, language }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, name, message) = match &self {
            AppError::InvalidBody { detail, language } => {
                error!(detail = %detail, "failed to parse request body");
                (
                    StatusCode::BAD_REQUEST,
                    "invalid_request",
                    language
                        .pick(
                            "Failed to parse request body.",
                            "Impossible de parser le corps de la requête.",
                        )
                        .to_string(),
                )
            }
            AppError::InvalidParameter { source, language } => (
                StatusCode::BAD_REQUEST,
                "invalid_parameter",
                validation_message(source.field, *language),
            ),
            AppError::Stats { source, language } => {
                error!(error = %source, "failed to retrieve statistics");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "stats_unavailable",
                    language
                        .pick(
                            "Failed to retrieve statistics.",
                            "Erreur lors de la récupération des statistiques.",
                        )
                        .to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: name, message })).into_response()
    }
}

fn validation_message(field: ParamField, language: Language) -> String {
    match (field, language) {
        (ParamField::DivisorA | ParamField::DivisorB, Language::English) => {
            format!("Parameter {field} must be greater than 0.")
        }
        (ParamField::DivisorA | ParamField::DivisorB, Language::French) => {
            format!("Le paramètre {field} doit être supérieur à 0.")
        }
        (ParamField::Limit, Language::English) => {
            "Parameter limit must be between 1 and 10000.".to_string()
        }
        (ParamField::Limit, Language::French) => {
            "Le paramètre limit doit être entre 1 et 10000.".to_string()
        }
        (ParamField::TokenA | ParamField::TokenB, Language::English) => {
            format!("Parameter {field} must be between 1 and 100 characters.")
        }
        (ParamField::TokenA | ParamField::TokenB, Language::French) => {
            format!("Le paramètre {field} doit contenir entre 1 et 100 caractères.")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT_LANGUAGE, value.parse().unwrap());
        headers
    }

    #[test]
    fn defaults_to_english() {
        assert_eq!(Language::from_headers(&HeaderMap::new()), Language::English);
        assert_eq!(
            Language::from_headers(&headers_with("en-US,en;q=0.9")),
            Language::English
        );
    }

    #[test]
    fn picks_french_variants() {
        assert_eq!(Language::from_headers(&headers_with("fr")), Language::French);
        assert_eq!(
            Language::from_headers(&headers_with("fr-FR")),
            Language::French
        );
    }

    #[test]
    fn validation_messages_name_the_field() {
        let en = validation_message(ParamField::DivisorA, Language::English);
        assert!(en.contains("divisor_a"));

        let fr = validation_message(ParamField::TokenB, Language::French);
        assert!(fr.contains("token_b"));
    }
}
