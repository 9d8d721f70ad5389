// Infrastructure wiring: stores, providers and the service built on them
pub mod deps;

pub use deps::*;
