//! Client for the .fi domain registry's EPP interface: mutually
//! authenticated TLS, length-prefixed XML framing, and typed operations
//! over the domain/contact/host/poll object families.
//!
//! [`client::connect`] opens a connection and completes the greeting
//! handshake; [`client::Client::login`] authenticates; the `ops::*` impl
//! blocks on [`client::Client`] then expose one method per registry
//! operation, each returning a typed response record from `model::*`.

pub mod client;
pub mod command;
pub mod error;
pub mod greeting;
pub mod model;
pub mod namespaces;
pub mod net;
mod ops;
pub mod result;
pub mod state;
pub mod transaction;
pub mod validate;
pub mod xml;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use client::{connect, Client, Credentials};
pub use error::{Error, Result};
pub use greeting::Greeting;
pub use state::State;
