//! HTTP adapter for the task backend.

mod client;
pub mod models;

pub use client::HttpTaskGateway;
