use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use validator::ValidationErrors;

/// Domain error taxonomy, one variant per failure kind so the HTTP boundary
/// can tag responses while rendering a single display string (French, like
/// every user-visible message of this API).
#[derive(Debug, Error)]
pub enum MarketplaceError {
    #[error("Champs invalides ou manquants: {0}")]
    Validation(String),

    #[error("Le prix doit être supérieur à zéro")]
    PriceNotPositive,

    #[error("Un utilisateur avec l'email '{0}' existe déjà")]
    DuplicateEmail(String),

    #[error("Erreur du magasin de documents: {0}")]
    Store(String),
}

pub type MarketplaceResult<T> = Result<T, MarketplaceError>;

impl MarketplaceError {
    /// Collapse validator output to the offending field names.
    pub(crate) fn validation(errors: &ValidationErrors) -> Self {
        let mut fields: Vec<String> = errors
            .field_errors()
            .keys()
            .map(|field| field.to_string())
            .collect();
        fields.sort_unstable();
        Self::Validation(fields.join(", "))
    }
}

/// Convert MarketplaceError to AppError for standardized error responses
impl From<MarketplaceError> for AppError {
    fn from(err: MarketplaceError) -> Self {
        match err {
            MarketplaceError::Validation(_) => AppError::BadRequest(err.to_string()),
            MarketplaceError::PriceNotPositive => AppError::BusinessRule(err.to_string()),
            MarketplaceError::DuplicateEmail(_) => AppError::Conflict(err.to_string()),
            MarketplaceError::Store(msg) => AppError::Store(msg),
        }
    }
}

impl IntoResponse for MarketplaceError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for MarketplaceError {
    fn from(err: mongodb::error::Error) -> Self {
        MarketplaceError::Store(err.to_string())
    }
}

impl From<mongodb::bson::de::Error> for MarketplaceError {
    fn from(err: mongodb::bson::de::Error) -> Self {
        MarketplaceError::Store(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CreateProduct;
    use validator::Validate;

    #[test]
    fn test_validation_error_names_offending_fields() {
        let invalid = CreateProduct {
            name: String::new(),
            price: -1.0,
            stock: 0,
            category: None,
        };
        let errors = invalid.validate().unwrap_err();
        let err = MarketplaceError::validation(&errors);

        let message = err.to_string();
        assert!(message.contains("name"), "message was: {message}");
        assert!(message.contains("price"), "message was: {message}");
    }
}
