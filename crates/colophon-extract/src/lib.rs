//! Copyright-page field extraction.
//!
//! Turns the ordered text lines recognised on a book's copyright page into a
//! [`CopyrightFields`] record. Every field is filled by an independent,
//! best-effort pattern rule; a rule that finds nothing leaves its field unset.

mod extract;
mod fields;
mod rules;

pub use extract::{PublicationLine, extract, parse_publication_line};
pub use fields::{CopyrightFields, Field, RESULT_HEADER, render};
