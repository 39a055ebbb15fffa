//! Common error types for relayd.
//!
//! This module provides a centralized Error enum using thiserror,
//! with conversions from underlying error types used throughout the crate.

use thiserror::Error;

/// Main error type for relayd operations.
#[derive(Error, Debug)]
pub enum Error {
    /// The relay board was not attached when the daemon started. Fatal:
    /// the daemon refuses to serve requests without a device handle.
    #[error(
        "USB relay board {vendor_id:04x}:{product_id:04x} not found, check the connection"
    )]
    DeviceNotFound { vendor_id: u16, product_id: u16 },

    /// A request named a channel the board does not have.
    #[error("relay channel must be between 1 and 8, got {0}")]
    InvalidChannel(u8),

    /// The device rejected a transfer or disappeared from the bus.
    #[error("USB I/O error: {0}")]
    DeviceIo(#[from] rusb::Error),

    /// I/O errors from tokio or std
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),
}

/// Convenience type alias for Results using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
