//! HTTP gateway for the FizzBuzz API.
//!
//! Exposes sequence generation and request statistics over axum. Storage
//! backend selection happens once at startup in the binary and is fixed
//! for the process lifetime.

pub mod app;
pub mod error;
pub mod handlers;
pub mod model;
pub mod state;
