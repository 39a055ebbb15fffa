//! Hardware abstraction layer traits.
//!
//! The relay controller talks to the board through the [`ControlTransfer`]
//! trait so the command protocol can be exercised against either the real
//! rusb device handle or an in-memory transport in tests.

use crate::error::Result;

/// Exclusive access to a device's control endpoint.
///
/// Implementors are expected to have already claimed the device (kernel
/// driver detached, interface claimed), so a transfer either reaches the
/// hardware or fails with a transport error.
pub trait ControlTransfer {
    /// Issue a host-to-device control transfer carrying `data`.
    ///
    /// Blocks until the device accepts the transfer or the transport
    /// errors. Returns the number of bytes transferred.
    fn write_control(
        &mut self,
        request_type: u8,
        request: u8,
        value: u16,
        index: u16,
        data: &[u8],
    ) -> Result<usize>;
}
