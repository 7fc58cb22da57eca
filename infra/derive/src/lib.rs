#![allow(unreachable_pub)]

//! # Macros
//!
//! Procedural macros used across the portal workspace.
//!
//! Consumers must also depend on `thiserror`, since the generated code derives
//! `thiserror::Error`.

mod error;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Turns an enum into a portal error type.
///
/// # Generated Items
///
/// * `#[derive(Debug, thiserror::Error)]` unless the enum already derives them.
/// * A private `format_context` helper for use inside `#[error(...)]` strings. It renders
///   `" (context)"` when a context is attached and nothing otherwise.
/// * `<Name>Ext`, a trait adding `.context(...)` to `Result<T, Name>` and to
///   `Result<T, Source>` for every variant with a source field.
/// * `From<Source>` for every variant with a source field, so `?` works on upstream errors.
///
/// # Requirements
///
/// * Only enums with named-field variants are accepted.
/// * A `context` field, when present, must be `Option<Cow<'static, str>>`.
/// * A variant with a `source` field (or a field marked `#[source]`/`#[from]`) must also
///   carry a `context` field.
///
/// # Example
///
/// ```rust,ignore
/// use std::borrow::Cow;
///
/// #[cec_derive::portal_error]
/// pub enum LoadError {
///     #[error("Read failed{}: {source}", format_context(.context))]
///     Io { source: std::io::Error, context: Option<Cow<'static, str>> },
///
///     #[error("Rejected{}: {message}", format_context(.context))]
///     Rejected { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn read(path: &str) -> Result<String, LoadError> {
///     std::fs::read_to_string(path).context("Reading portal file")
/// }
/// ```
#[proc_macro_attribute]
pub fn portal_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    error::expand(input).into()
}
