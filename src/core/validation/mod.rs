//! Validation layer
//!
//! Payloads arrive as untyped JSON. Each record type implements
//! [`FromPayload`] with an explicit function that reads its fields through a
//! [`FieldReader`], and the [`Validated`] extractor runs it before the
//! handler body, so invalid input never reaches storage.

pub mod extractor;
pub mod reader;
pub mod validators;

pub use extractor::{FromPayload, Validated};
pub use reader::FieldReader;
