pub mod documents;

pub use documents::{configure_document_routes, configure_storage_routes};
