//! Type-safe error codes for API responses.
//!
//! Single source of truth for the error kinds exposed at the HTTP boundary.
//! Each code carries:
//! - a machine-readable tag for client branching (e.g., "VALIDATION_ERROR")
//! - an integer code for logging and monitoring (e.g., 1001)
//! - a default human-readable message (French, the API's display language)

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Standardized error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Client errors (1000-1999)
    /// Request validation failed (missing/invalid fields)
    ValidationError,

    /// Invalid UUID format in a path parameter
    InvalidUuid,

    /// JSON extraction from the request body failed
    JsonExtraction,

    /// Requested resource was not found
    NotFound,

    /// Request conflicts with current state (e.g., duplicate unique field)
    Conflict,

    /// A handler-level business rule was violated
    BusinessRule,

    // Server errors (1100s)
    /// An unexpected internal server error occurred
    InternalError,

    /// Service is temporarily unavailable
    ServiceUnavailable,

    // Document store errors (2000s)
    /// Document store connectivity or query failure
    StoreError,
}

impl ErrorCode {
    /// Machine-readable tag, stable across releases.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationError => "VALIDATION_ERROR",
            Self::InvalidUuid => "INVALID_UUID",
            Self::JsonExtraction => "JSON_EXTRACTION",
            Self::NotFound => "NOT_FOUND",
            Self::Conflict => "CONFLICT",
            Self::BusinessRule => "BUSINESS_RULE",
            Self::InternalError => "INTERNAL_ERROR",
            Self::ServiceUnavailable => "SERVICE_UNAVAILABLE",
            Self::StoreError => "STORE_ERROR",
        }
    }

    /// Integer code for monitoring dashboards.
    pub fn code(&self) -> i32 {
        match self {
            Self::ValidationError => 1001,
            Self::InvalidUuid => 1002,
            Self::JsonExtraction => 1003,
            Self::NotFound => 1004,
            Self::Conflict => 1008,
            Self::BusinessRule => 1010,
            Self::InternalError => 1100,
            Self::ServiceUnavailable => 1103,
            Self::StoreError => 2000,
        }
    }

    /// Default display message (French).
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::ValidationError => "Échec de la validation de la requête",
            Self::InvalidUuid => "Identifiant invalide",
            Self::JsonExtraction => "Corps de requête JSON invalide",
            Self::NotFound => "Ressource introuvable",
            Self::Conflict => "La ressource existe déjà",
            Self::BusinessRule => "Règle métier non respectée",
            Self::InternalError => "Une erreur interne est survenue",
            Self::ServiceUnavailable => "Service temporairement indisponible",
            Self::StoreError => "Erreur du magasin de documents",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_are_screaming_snake_case() {
        let codes = [
            ErrorCode::ValidationError,
            ErrorCode::InvalidUuid,
            ErrorCode::JsonExtraction,
            ErrorCode::NotFound,
            ErrorCode::Conflict,
            ErrorCode::BusinessRule,
            ErrorCode::InternalError,
            ErrorCode::ServiceUnavailable,
            ErrorCode::StoreError,
        ];
        for code in codes {
            assert!(code
                .as_str()
                .chars()
                .all(|c| c.is_ascii_uppercase() || c == '_'));
        }
    }

    #[test]
    fn test_serde_matches_as_str() {
        let json = serde_json::to_string(&ErrorCode::ValidationError).unwrap();
        assert_eq!(json, "\"VALIDATION_ERROR\"");
        assert_eq!(ErrorCode::ValidationError.as_str(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_codes_are_unique() {
        let codes = [
            ErrorCode::ValidationError.code(),
            ErrorCode::InvalidUuid.code(),
            ErrorCode::JsonExtraction.code(),
            ErrorCode::NotFound.code(),
            ErrorCode::Conflict.code(),
            ErrorCode::BusinessRule.code(),
            ErrorCode::InternalError.code(),
            ErrorCode::ServiceUnavailable.code(),
            ErrorCode::StoreError.code(),
        ];
        let mut deduped = codes.to_vec();
        deduped.sort_unstable();
        deduped.dedup();
        assert_eq!(deduped.len(), codes.len());
    }
}
