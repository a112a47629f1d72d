//! External-directory adapter building blocks

pub mod endpoints;

pub use endpoints::{RegistryEndpoints, SearchTarget};
