//! API route handlers.

pub mod orders;
