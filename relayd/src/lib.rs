//! relayd: HTTP control daemon for an eight-channel USB relay board.
//!
//! The daemon owns a single relay board (opened once at startup) and exposes
//! `POST /control-relay/{relay_id}` to switch individual channels. The command
//! protocol lives in [`relay`], device acquisition in [`usb`], and the HTTP
//! surface in [`api`].

pub mod api;
pub mod config;
pub mod error;
pub mod hw_trait;
pub mod relay;
pub mod tracing;
pub mod usb;

pub use error::{Error, Result};
