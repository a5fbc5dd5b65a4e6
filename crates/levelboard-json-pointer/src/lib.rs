//! JSON Pointer (RFC 6901) helpers used to navigate dashboard documents.
//!
//! Pointers are parsed once into a [`Path`] and then resolved against
//! `serde_json::Value` trees, either read-only ([`get`]), for in-place edits
//! ([`get_mut`]) or to make sure an object exists at a location
//! ([`ensure_object`]).
//!
//! # Example
//!
//! ```
//! use levelboard_json_pointer::{ensure_object, get, parse_json_pointer};
//! use serde_json::json;
//!
//! let mut doc = json!({"spec": null});
//! let elements = parse_json_pointer("/spec/elements");
//!
//! ensure_object(&mut doc, &elements).unwrap();
//! assert_eq!(get(&doc, &elements), Some(&json!({})));
//! ```

use thiserror::Error;

mod get;
mod util;
pub mod validate;

pub use get::{ensure_object, get, get_mut};
pub use util::{escape_component, format_json_pointer, parse_json_pointer, unescape_component};
pub use validate::{parse_validated, validate_json_pointer};

/// A step in a JSON Pointer path: an object key or a decimal array index.
pub type PathStep = String;

/// A parsed JSON Pointer.
pub type Path = Vec<PathStep>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum JsonPointerError {
    #[error("POINTER_INVALID: {0:?}")]
    PointerInvalid(String),
    #[error("POINTER_TOO_LONG")]
    PointerTooLong,
    #[error("expected an object at {0:?}")]
    NotObject(String),
}
