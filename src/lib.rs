//! Schema Condense
//!
//! Condenses JSON Schema documents into compact maps of property name to
//! description, suitable for embedding tool schemas in a language-model prompt.
//!
//! ## Features
//!
//! - **Keyword Stripping**: Validation keywords (`type`, `required`, `minLength`, ...) are dropped
//! - **Local `$ref` Resolution**: `#/...` pointers are replaced by their condensed target
//! - **Structural Echo**: `properties` nesting is kept; array `items` become `_items`
//! - **Extension Passthrough**: Non-reserved keys (`example`, `x-*`) are copied verbatim
//! - **Cycle Guard**: Self-referential `$ref` chains fail fast or are truncated
//!
//! ## Example
//!
//! ```text
//! {                                          {
//!   "type": "object",                          "query": { "description": "Search text" },
//!   "properties": {                            "filters": {
//!     "query": {                                 "_items": { "description": "A filter" }
//!       "type": "string",              =>      }
//!       "description": "Search text"         }
//!     },
//!     "filters": {
//!       "type": "array",
//!       "items": { "$ref": "#/definitions/Filter" }
//!     }
//!   },
//!   "definitions": { "Filter": { "description": "A filter" } }
//! }
//! ```

pub mod batch;
pub mod checksum;
pub mod condense;
pub mod config;
pub mod error;
pub mod loader;
pub mod pointer;
pub mod schema;

pub use checksum::Checksum;
pub use condense::{condense_schema, CondenseOptions, CondensedNode, Condenser, CyclePolicy};
pub use config::{CondenseConfig, OutputFormat};
pub use error::{CondenseError, Result};
pub use pointer::resolve_ref;
pub use schema::{SchemaNode, ITEMS_KEY, RESERVED_KEYWORDS};
