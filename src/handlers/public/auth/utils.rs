use serde::Deserialize;

use crate::api::{require_non_empty, validate_email_format, Validate};
use crate::error::ApiError;

/// Request body shared by signup and signin
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuthDto {
    pub email: String,
    pub password: String,
}

impl Validate for AuthDto {
    fn validate(&self) -> Result<(), ApiError> {
        require_non_empty("email", &self.email)?;
        validate_email_format("email", &self.email)?;
        require_non_empty("password", &self.password)?;
        Ok(())
    }
}
