//! HTML output plumbing: escaping, URL encoding, and a streaming writer.
//!
//! Everything rendered by the page crates flows through this crate. Output
//! is streamed directly to an `io::Write` sink; no page is ever buffered in
//! full. Commit metadata arrives as byte strings (`bstr`) because git does
//! not guarantee UTF-8 anywhere.

pub mod escape;
pub mod query;
pub mod writer;

pub use escape::{escape_attr, escape_text};
pub use query::{url_arg, QueryString};
pub use writer::Html;
