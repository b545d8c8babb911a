//! HTTP request handlers for the mock server.

pub mod libraries;

pub use libraries::*;
