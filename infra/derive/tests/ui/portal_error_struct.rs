use cec_derive::portal_error;

#[portal_error]
pub struct LoadError {
    message: String,
}

fn main() {}
