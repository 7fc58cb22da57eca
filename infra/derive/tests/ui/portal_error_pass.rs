use cec_derive::portal_error;
use std::borrow::Cow;

#[portal_error]
pub enum LoadError {
    #[error("Read failed{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("Rejected{}: {message}", format_context(.context))]
    Rejected { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn read(path: &str) -> Result<String, LoadError> {
    std::fs::read_to_string(path).context("Reading portal file")
}

fn reject() -> Result<(), LoadError> {
    Err(LoadError::Rejected { message: "nope".into(), context: None })
}

fn main() {
    let err = read("/definitely/not/here").unwrap_err();
    assert!(err.to_string().starts_with("Read failed (Reading portal file): "));

    let err = reject().context("while testing").unwrap_err();
    assert_eq!(err.to_string(), "Rejected (while testing): nope");

    let io = std::io::Error::other("boom");
    let converted: LoadError = io.into();
    assert_eq!(converted.to_string(), "Read failed: boom");
}
