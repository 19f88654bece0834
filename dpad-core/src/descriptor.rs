//! HID report descriptors for the stick and hat-switch reports.
//!
//! See <https://www.usb.org/sites/default/files/documents/hut1_12v2.pdf>.

/// Joystick with two signed 8-bit axes (X/Y), logical range -1..1.
///
/// Host drivers match on this exact layout; do not edit.
pub const STICK_REPORT_DESCRIPTOR: [u8; 26] = [
    0x05, 0x01, // Usage Page (Generic Desktop)
    0x09, 0x04, // Usage (Joystick)
    0xA1, 0x01, // Collection (Application)
    0xA1, 0x00, //   Collection (Physical)
    0x05, 0x01, //     Usage Page (Generic Desktop)
    0x09, 0x30, //     Usage (X)
    0x09, 0x31, //     Usage (Y)
    0x15, 0xFF, //     Logical Minimum (-1)
    0x25, 0x01, //     Logical Maximum (1)
    0x75, 0x08, //     Report Size (8)
    0x95, 0x02, //     Report Count (2)
    0x81, 0x02, //     Input (Data, Variable, Absolute)
    0xC0, //   End Collection
    0xC0, // End Collection
];

/// Joystick with a single 8-bit hat switch.
///
/// The logical range covers every code in
/// [`HAT_CODES`](crate::encoder::HAT_CODES) (1..=10). Code 0 is outside the
/// range and the input item carries the Null State flag, so the host reads
/// it as "centered".
pub const HAT_REPORT_DESCRIPTOR: [u8; 24] = [
    0x05, 0x01, // Usage Page (Generic Desktop)
    0x09, 0x04, // Usage (Joystick)
    0xA1, 0x01, // Collection (Application)
    0xA1, 0x00, //   Collection (Physical)
    0x05, 0x01, //     Usage Page (Generic Desktop)
    0x09, 0x39, //     Usage (Hat switch)
    0x15, 0x01, //     Logical Minimum (1)
    0x25, 0x0A, //     Logical Maximum (10)
    0x75, 0x08, //     Report Size (8)
    0x95, 0x01, //     Report Count (1)
    0x81, 0x42, //     Input (Data, Variable, Absolute, Null State)
    0xC0, //   End Collection
    0xC0, // End Collection
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::{AxisReport, HatReport, HidReport, HAT_CODES};

    /// Sum of Report Size * Report Count for a descriptor, in bytes.
    fn input_report_bytes(desc: &[u8]) -> usize {
        let mut size = 0usize;
        let mut bits = 0usize;
        let mut i = 0;
        while i < desc.len() {
            let prefix = desc[i];
            let len = match prefix & 0x03 {
                3 => 4,
                n => n as usize,
            };
            let value = desc.get(i + 1).copied().unwrap_or(0) as usize;
            match prefix & 0xFC {
                0x74 => size = value,
                0x94 => bits += size * value,
                _ => {}
            }
            i += 1 + len;
        }
        bits / 8
    }

    #[test]
    fn test_stick_descriptor_layout() {
        assert_eq!(STICK_REPORT_DESCRIPTOR.len(), 26);
        // Logical minimum is -1 as a signed byte.
        assert_eq!(&STICK_REPORT_DESCRIPTOR[14..16], &[0x15, 0xFF]);
        assert_eq!(input_report_bytes(&STICK_REPORT_DESCRIPTOR), AxisReport::SIZE);
    }

    #[test]
    fn test_hat_descriptor_covers_codes() {
        assert_eq!(HAT_REPORT_DESCRIPTOR.len(), 24);
        assert_eq!(input_report_bytes(&HAT_REPORT_DESCRIPTOR), HatReport::SIZE);

        let min = HAT_REPORT_DESCRIPTOR[13];
        let max = HAT_REPORT_DESCRIPTOR[15];
        for &code in &HAT_CODES[1..] {
            assert!((min..=max).contains(&code), "code {code} outside {min}..={max}");
        }
        // Center is reported as the null value.
        assert!(HAT_CODES[0] < min);
        assert_eq!(HAT_REPORT_DESCRIPTOR[21] & 0x40, 0x40);
    }
}
