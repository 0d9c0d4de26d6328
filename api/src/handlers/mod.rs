//! Request handling helpers shared by the routes

pub mod error;

pub use error::{json_error_handler, path_error_handler, ApiError};

use validator::Validate;

/// Run the `validator` rules of a request body
pub fn validated<T: Validate>(body: T) -> Result<T, ApiError> {
    body.validate()?;
    Ok(body)
}
