//! Core trait abstractions

pub mod ai;
pub mod cache;
pub mod store;
