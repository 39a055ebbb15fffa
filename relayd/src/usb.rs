//! USB relay board acquisition over rusb.
//!
//! The daemon drives exactly one board, opened once at startup: find it by
//! vendor/product id, detach the kernel driver from interface 0 when one is
//! bound, apply the default configuration and claim the interface. There is
//! no reconnect path; if the board disappears after startup every transfer
//! fails until the daemon is restarted.

use std::time::Duration;

use rusb::{Context, DeviceHandle, UsbContext};

use crate::error::{Error, Result};
use crate::hw_trait::ControlTransfer;
use crate::tracing::prelude::*;

/// Interface the board exposes its HID endpoint on.
const INTERFACE: u8 = 0;

/// Zero means no timeout: a transfer blocks until the device answers.
const NO_TIMEOUT: Duration = Duration::ZERO;

/// Exclusive handle to the relay board, held for the process lifetime.
pub struct UsbRelayBoard {
    handle: DeviceHandle<Context>,
}

impl UsbRelayBoard {
    /// Locate and claim the relay board.
    ///
    /// Returns [`Error::DeviceNotFound`] when no device matches the given
    /// vendor/product id; callers treat that as fatal.
    pub fn open(vendor_id: u16, product_id: u16) -> Result<Self> {
        let context = Context::new()?;

        for device in context.devices()?.iter() {
            let descriptor = match device.device_descriptor() {
                Ok(d) => d,
                Err(e) => {
                    debug!("skipping device with unreadable descriptor: {e}");
                    continue;
                }
            };
            if descriptor.vendor_id() != vendor_id || descriptor.product_id() != product_id {
                continue;
            }

            debug!(
                bus = device.bus_number(),
                address = device.address(),
                "found relay board"
            );

            let handle = device.open()?;

            // The kernel's hidraw driver binds the board by default and
            // would block our control transfers.
            match handle.kernel_driver_active(INTERFACE) {
                Ok(true) => {
                    debug!("detaching kernel driver from interface {INTERFACE}");
                    handle.detach_kernel_driver(INTERFACE)?;
                }
                Ok(false) => {}
                Err(e) => debug!("could not query kernel driver state: {e}"),
            }

            let config = device.config_descriptor(0)?;
            handle.set_active_configuration(config.number())?;
            handle.claim_interface(INTERFACE)?;

            info!(
                "relay board {vendor_id:04x}:{product_id:04x} claimed on bus {} address {}",
                device.bus_number(),
                device.address()
            );
            return Ok(Self { handle });
        }

        Err(Error::DeviceNotFound {
            vendor_id,
            product_id,
        })
    }
}

impl ControlTransfer for UsbRelayBoard {
    fn write_control(
        &mut self,
        request_type: u8,
        request: u8,
        value: u16,
        index: u16,
        data: &[u8],
    ) -> Result<usize> {
        let written = self
            .handle
            .write_control(request_type, request, value, index, data, NO_TIMEOUT)?;
        Ok(written)
    }
}

impl Drop for UsbRelayBoard {
    fn drop(&mut self) {
        // The kernel driver stays detached; the board is dedicated to this
        // daemon.
        if let Err(e) = self.handle.release_interface(INTERFACE) {
            warn!("failed to release interface {INTERFACE}: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_without_matching_device_is_device_not_found() {
        // No vendor was ever assigned id 0xdead, so enumeration cannot match.
        match UsbRelayBoard::open(0xdead, 0xbeef) {
            Err(Error::DeviceNotFound {
                vendor_id,
                product_id,
            }) => {
                assert_eq!(vendor_id, 0xdead);
                assert_eq!(product_id, 0xbeef);
            }
            Err(e) => panic!("unexpected error: {e}"),
            Ok(_) => panic!("found a device that cannot exist"),
        }
    }
}
