//! Discovery document model for the mock API server
//!
//! Discovery Documents describe REST APIs: top-level metadata, common
//! query parameters, named schemas, and resources exposing methods.
//! Format is based on JSON Schema Draft 3 with Google-specific extensions.
//!
//! This crate models the document so fixtures can be written as typed
//! values, and ships the synthetic `test:v1` document served by the
//! mock API server.
//!
//! ## Usage
//! ```rust
//! use mock_api_server_discovery::{test_api_document, TEST_DOCUMENT_PATH};
//!
//! let doc = test_api_document();
//! assert_eq!(doc.id.as_deref(), Some("test:v1"));
//! assert_eq!(TEST_DOCUMENT_PATH, "test-v1.json");
//! ```

mod fixture;
mod types;

pub use fixture::{test_api_document, TEST_DOCUMENT_PATH};
pub use types::*;
