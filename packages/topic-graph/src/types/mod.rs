pub mod config;
pub mod document;
pub mod edge;
pub mod graph;
pub mod ids;
pub mod node;
