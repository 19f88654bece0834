//! USB HID output: report sink over an embassy-usb HID writer.

use crate::config;
use dpad_core::{OutputError, Registration, ReportSink};
use embassy_usb::class::hid::{Config as HidConfig, HidBootProtocol, HidSubclass, HidWriter, State};
use embassy_usb::driver::EndpointError;
use embassy_usb::Builder;

/// USB driver type for the RP2040.
pub type UsbDriver<'d> = embassy_rp::usb::Driver<'d, embassy_rp::peripherals::USB>;

/// Largest input report any variant sends (boot keyboard).
pub const MAX_REPORT_SIZE: usize = 8;

/// HID writer sized for [`MAX_REPORT_SIZE`].
pub type UsbHidWriter<'d> = HidWriter<'d, UsbDriver<'d>, MAX_REPORT_SIZE>;

/// Guards the single HID interface this device exposes.
static HID_REGISTRATION: Registration = Registration::new();

/// Which report layout the HID interface announces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, defmt::Format)]
pub enum HidKind {
    /// Generic joystick/gamepad report (stick or hat switch).
    Joystick,
    /// Boot-protocol keyboard.
    Keyboard,
}

/// USB HID output.
///
/// Wraps an embassy-usb HID writer to send raw reports.
pub struct UsbHidOutput<'d> {
    writer: UsbHidWriter<'d>,
    ready: bool,
}

impl<'d> UsbHidOutput<'d> {
    /// Create a new USB HID output from the given HID writer.
    pub fn new(writer: UsbHidWriter<'d>) -> Self {
        Self {
            writer,
            ready: false,
        }
    }

    /// Wait until the device is ready (USB enumerated).
    pub async fn wait_ready(&mut self) {
        self.writer.ready().await;
        self.ready = true;
    }
}

impl ReportSink for UsbHidOutput<'_> {
    async fn send(&mut self, report: &[u8]) -> Result<(), OutputError> {
        match self.writer.write(report).await {
            Ok(()) => Ok(()),
            Err(EndpointError::Disabled) => Err(OutputError::NotReady),
            Err(_) => Err(OutputError::Io),
        }
    }

    fn is_ready(&self) -> bool {
        self.ready
    }
}

/// Configure the USB HID class in the USB builder.
///
/// Registers the interface on the first call only; later calls return
/// `None` because the descriptor is already part of the configuration.
pub fn configure_usb_hid<'d>(
    builder: &mut Builder<'d, UsbDriver<'d>>,
    state: &'d mut State<'d>,
    report_descriptor: &'d [u8],
    kind: HidKind,
) -> Option<UsbHidWriter<'d>> {
    HID_REGISTRATION.register_with(|| {
        let (hid_subclass, hid_boot_protocol) = match kind {
            HidKind::Joystick => (HidSubclass::No, HidBootProtocol::None),
            HidKind::Keyboard => (HidSubclass::Boot, HidBootProtocol::Keyboard),
        };
        let config = HidConfig {
            report_descriptor,
            request_handler: None,
            poll_ms: config::USB_HID_POLL_MS,
            max_packet_size: MAX_REPORT_SIZE as u16,
            hid_subclass,
            hid_boot_protocol,
        };
        defmt::info!("Registering {} HID interface", kind);
        HidWriter::new(builder, state, config)
    })
}
