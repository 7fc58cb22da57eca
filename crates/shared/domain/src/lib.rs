//! # Domain Models
//!
//! Pure portal types with minimal dependencies (`serde`, `strum`).
//! Keep it lean: no I/O or networking, just data and simple helpers.

pub mod config;
pub mod constants;
pub mod endpoints;
pub mod modules;
