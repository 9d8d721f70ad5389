//! Provider implementations for topic extraction and embeddings.

mod openai;
mod schema;

pub use openai::OpenAI;
pub use schema::strict_schema;
