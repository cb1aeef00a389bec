//! HTTP surface of the banking backend
//!
//! - Request pipeline (auth injection, status classification, decoding)
//! - Wire request/response types

mod pipeline;
pub mod types;

pub use pipeline::RequestPipeline;
