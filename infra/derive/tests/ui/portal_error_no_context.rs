use cec_derive::portal_error;

#[portal_error]
pub enum LoadError {
    #[error("Read failed: {source}")]
    Io {
        #[source]
        source: std::io::Error,
    },
}

fn main() {}
