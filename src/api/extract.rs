use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// Field-level checks a request body runs after deserialization
pub trait Validate {
    fn validate(&self) -> Result<(), ApiError>;
}

/// JSON body that has been deserialized and passed `Validate`.
///
/// Both JSON rejections and validation failures surface as `ApiError`, so
/// malformed or incomplete bodies always render as 400.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        value.validate()?;
        Ok(Self(value))
    }
}

/// Basic email format validation
pub fn validate_email_format(field: &str, email: &str) -> Result<(), ApiError> {
    let email = email.trim();
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    };

    if valid {
        Ok(())
    } else {
        Err(ApiError::field_error(field, "must be an email"))
    }
}

pub fn require_non_empty(field: &str, value: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::field_error(field, "should not be empty"));
    }
    Ok(())
}

/// Optional fields may be omitted, but not sent as blank strings
pub fn reject_blank(field: &str, value: Option<&str>) -> Result<(), ApiError> {
    match value {
        Some(value) => require_non_empty(field, value),
        None => Ok(()),
    }
}
