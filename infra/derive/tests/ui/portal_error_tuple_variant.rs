use cec_derive::portal_error;

#[portal_error]
pub enum LoadError {
    #[error("Read failed: {0}")]
    Io(std::io::Error),
}

fn main() {}
