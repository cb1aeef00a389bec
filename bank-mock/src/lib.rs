/// Banking Backend Mock Server Library
///
/// This crate provides both a standalone binary and library components
/// for mocking the demo banking backend. Integration tests embed the
/// router in-process on an ephemeral port.

pub mod handlers;
pub mod server;
pub mod state;
pub mod types;

pub use server::{create_router, serve, run_server};
pub use state::BankState;
pub use types::*;
