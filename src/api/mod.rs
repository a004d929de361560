pub mod extract;

pub use extract::{reject_blank, require_non_empty, validate_email_format, Validate, ValidatedJson};
