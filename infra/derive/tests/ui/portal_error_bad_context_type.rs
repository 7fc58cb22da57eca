use cec_derive::portal_error;

#[portal_error]
pub enum LoadError {
    #[error("Read failed: {source}")]
    Io { source: std::io::Error, context: Option<String> },
}

fn main() {}
