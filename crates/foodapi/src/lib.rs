//! Top-level facade crate for foodapi.
//!
//! Re-exports core types and the gateway library so users can depend on a single crate.

pub mod core {
    pub use foodapi_core::*;
}

pub mod gateway {
    pub use foodapi_gateway::*;
}
