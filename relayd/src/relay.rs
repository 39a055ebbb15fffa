//! Relay board command protocol and controller.
//!
//! The board is an HID-class USB device with eight relay channels. Its
//! documented command set is an 8-byte report sent over the control endpoint:
//! byte 0 carries the op-code (distinct values for on and off, not a flag
//! bit), byte 1 the channel number, and the remaining bytes are zero padding.

use crate::error::{Error, Result};
use crate::hw_trait::ControlTransfer;
use crate::tracing::prelude::*;

/// USB vendor id of the relay board.
pub const VENDOR_ID: u16 = 0x16c0;
/// USB product id of the relay board.
pub const PRODUCT_ID: u16 = 0x05df;

/// Lowest addressable relay channel.
pub const MIN_CHANNEL: u8 = 1;
/// Highest addressable relay channel.
pub const MAX_CHANNEL: u8 = 8;

/// Command buffer length expected by the board.
const CMD_LEN: usize = 8;

const OPCODE_ON: u8 = 0xFF;
const OPCODE_OFF: u8 = 0xFD;

// HID SET_REPORT over the control endpoint.
const REQUEST_TYPE: u8 = 0x21; // host-to-device, class, interface
const REQUEST_SET_REPORT: u8 = 0x09;
const REPORT_VALUE: u16 = 0x0200;
const REPORT_INDEX: u16 = 0;

/// Build the 8-byte command the board expects.
fn encode_command(channel: u8, state: bool) -> [u8; CMD_LEN] {
    let mut cmd = [0u8; CMD_LEN];
    cmd[0] = if state { OPCODE_ON } else { OPCODE_OFF };
    cmd[1] = channel;
    cmd
}

/// Drives one relay board through a [`ControlTransfer`] transport.
///
/// Stateless beyond holding the transport: every call encodes a fresh
/// command and sends it, with no deduplication against the previous state.
pub struct RelayController<T> {
    transport: T,
}

impl<T: ControlTransfer> RelayController<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Switch `channel` on or off.
    ///
    /// Rejects channels outside 1..=8 before touching the device. The
    /// transfer itself is a single blocking call with no retry; transport
    /// failures come back as [`Error::DeviceIo`].
    pub fn set_relay(&mut self, channel: u8, state: bool) -> Result<()> {
        if !(MIN_CHANNEL..=MAX_CHANNEL).contains(&channel) {
            return Err(Error::InvalidChannel(channel));
        }

        let cmd = encode_command(channel, state);
        self.transport.write_control(
            REQUEST_TYPE,
            REQUEST_SET_REPORT,
            REPORT_VALUE,
            REPORT_INDEX,
            &cmd,
        )?;
        debug!(channel, state, "relay command sent");
        Ok(())
    }

    /// Access the underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hw_trait::mock::MockTransport;
    use test_case::test_case;

    #[test_case(1, true, 0xFF; "channel 1 on")]
    #[test_case(1, false, 0xFD; "channel 1 off")]
    #[test_case(8, true, 0xFF; "channel 8 on")]
    #[test_case(8, false, 0xFD; "channel 8 off")]
    #[test_case(5, true, 0xFF; "mid channel on")]
    fn encodes_opcode_channel_and_padding(channel: u8, state: bool, opcode: u8) {
        let cmd = encode_command(channel, state);
        assert_eq!(cmd, [opcode, channel, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn sends_one_transfer_per_valid_channel_and_state() {
        let mut controller = RelayController::new(MockTransport::new());

        for channel in MIN_CHANNEL..=MAX_CHANNEL {
            for state in [true, false] {
                controller.set_relay(channel, state).unwrap();
                let sent = controller.transport().transfers.last().unwrap();
                let opcode = if state { 0xFF } else { 0xFD };
                assert_eq!(sent.data, vec![opcode, channel, 0, 0, 0, 0, 0, 0]);
            }
        }
        assert_eq!(controller.transport().transfers.len(), 16);
    }

    #[test]
    fn uses_hid_set_report_parameters() {
        let mut controller = RelayController::new(MockTransport::new());
        controller.set_relay(1, true).unwrap();

        let sent = &controller.transport().transfers[0];
        assert_eq!(sent.request_type, 0x21);
        assert_eq!(sent.request, 0x09);
        assert_eq!(sent.value, 0x0200);
        assert_eq!(sent.index, 0);
        assert_eq!(sent.data, vec![0xFF, 1, 0, 0, 0, 0, 0, 0]);
    }

    #[test_case(0; "below range")]
    #[test_case(9; "just above range")]
    #[test_case(255; "far above range")]
    fn rejects_out_of_range_channel_without_transfer(channel: u8) {
        let mut controller = RelayController::new(MockTransport::new());

        let err = controller.set_relay(channel, true).unwrap_err();
        assert!(matches!(err, Error::InvalidChannel(c) if c == channel));
        assert!(controller.transport().transfers.is_empty());
    }

    #[test]
    fn repeated_commands_are_sent_every_time() {
        let mut controller = RelayController::new(MockTransport::new());

        controller.set_relay(3, true).unwrap();
        controller.set_relay(3, true).unwrap();

        let transfers = &controller.transport().transfers;
        assert_eq!(transfers.len(), 2);
        assert_eq!(transfers[0], transfers[1]);
    }

    #[test]
    fn transport_failures_surface_as_device_io() {
        let mut controller =
            RelayController::new(MockTransport::failing(rusb::Error::NoDevice));

        let err = controller.set_relay(2, false).unwrap_err();
        assert!(matches!(err, Error::DeviceIo(rusb::Error::NoDevice)));
    }
}
