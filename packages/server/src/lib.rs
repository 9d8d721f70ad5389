// Mind Map - API Core
//
// HTTP surface, configuration and dependency wiring for the topic graph
// engine. The graph logic itself lives in the `topic_graph` crate.

pub mod config;
pub mod kernel;
pub mod server;

pub use config::*;
