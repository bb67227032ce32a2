// Allow manual modulo checks since .is_multiple_of() is nightly-only
#![allow(clippy::manual_is_multiple_of)]

//! impress-isbn: ISBN parsing, validation, and normalization (ISO 2108).
//!
//! Accepts ISBN-10 and ISBN-13 in free form: with or without an `ISBN`,
//! `ISBN-10` or `ISBN-13` label, with hyphens, spaces, or no separators.
//!
//! - Grouped input (`0-393-04002-X`) is split as written.
//! - Solid input (`039304002X`) is split using the registration group and
//!   registrant range tables.
//!
//! Parsing never fails outright; malformed input produces a record carrying
//! an [`IsbnError`] that reports itself invalid and renders as empty.
//!
//! ```
//! use impress_isbn::{Isbn, Version};
//!
//! let mut isbn = Isbn::parse("ISBN-10 039304002X");
//! assert!(isbn.is_valid());
//! assert_eq!(isbn.version(), Version::Ten);
//!
//! isbn.normalize();
//! assert_eq!(isbn.to_string(), "ISBN 978-0-393-04002-9");
//! assert_eq!(isbn.barcode(), "9780393040029");
//! ```

#[cfg(feature = "uniffi")]
uniffi::setup_scaffolding!();

pub mod checksum;
pub mod config;
pub mod error;
pub mod isbn;
pub mod parse;
pub mod report;
pub mod tokenize;

pub use checksum::*;
pub use config::*;
pub use error::*;
pub use isbn::*;
pub use parse::*;
pub use report::*;
pub use tokenize::*;
