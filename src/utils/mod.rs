pub mod mime;
pub mod parameter_error_handler;
pub mod validate;

pub use mime::{content_disposition_value, guess_mime_type, original_file_name};
pub use parameter_error_handler::json_error_handler;
pub use parameter_error_handler::query_error_handler;
