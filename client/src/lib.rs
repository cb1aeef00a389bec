//! Banking demo client library
//!
//! Core building blocks:
//! - `api`: authenticated request pipeline over the bank's HTTP surface
//! - `client`: typed `BankingClient` facade (production and test impls)
//! - `session`: login/logout and dashboard state
//! - `transfer`: the multi-step transfer wizard state machine

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod session;
pub mod token;
pub mod transfer;
