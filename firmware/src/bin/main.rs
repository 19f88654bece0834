#![no_std]
#![no_main]

use defmt::info;
use defmt_rtt as _;
use dpad_hid::config;
use dpad_hid::{RunFlag, StickConfig};
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Pull};
use embassy_rp::peripherals::{UART1, USB};

#[cfg(not(feature = "serial"))]
use dpad_hid::{configure_usb_hid, HidKind, UsbHidOutput};
#[cfg(not(feature = "serial"))]
use embassy_rp::usb::Driver;
#[cfg(not(feature = "serial"))]
use embassy_usb::class::hid::State;
#[cfg(not(feature = "serial"))]
use embassy_usb::{Builder, Config as UsbConfig};
#[cfg(not(feature = "serial"))]
use static_cell::StaticCell;

#[cfg(feature = "dev-panic")]
use panic_probe as _;
#[cfg(feature = "prod-panic")]
use panic_reset as _;

bind_interrupts!(struct Irqs {
    UART1_IRQ => embassy_rp::uart::InterruptHandler<UART1>;
    USBCTRL_IRQ => embassy_rp::usb::InterruptHandler<USB>;
});

/// The four stick switches, already configured as pull-up inputs.
type Pins = StickConfig<Input<'static>>;

/// Cleared to stop the poll loop. Nothing clears it on this board.
static RUN_FLAG: RunFlag = RunFlag::new();

/// USB device configuration buffer.
#[cfg(not(feature = "serial"))]
static CONFIG_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
#[cfg(not(feature = "serial"))]
static BOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
#[cfg(not(feature = "serial"))]
static MSOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
#[cfg(not(feature = "serial"))]
static CONTROL_BUF: StaticCell<[u8; 64]> = StaticCell::new();

/// HID state.
#[cfg(not(feature = "serial"))]
static HID_STATE: StaticCell<State> = StaticCell::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Digital stick starting...");

    let p = embassy_rp::init(embassy_rp::config::Config::default());

    // --- Stick pins (active low) ---
    let pins: Pins = StickConfig::new(
        Input::new(p.PIN_2, Pull::Up),
        Input::new(p.PIN_3, Pull::Up),
        Input::new(p.PIN_4, Pull::Up),
        Input::new(p.PIN_5, Pull::Up),
    );

    #[cfg(feature = "serial")]
    {
        use embassy_rp::uart::{Config as UartConfig, Uart};

        let mut uart_config = UartConfig::default();
        uart_config.baudrate = config::UART_BAUDRATE;

        let uart = Uart::new(
            p.UART1,
            p.PIN_8, // TX
            p.PIN_9, // RX
            Irqs,
            p.DMA_CH0,
            p.DMA_CH1,
            uart_config,
        );
        let (tx, _rx) = uart.split();

        spawner.spawn(serial_task(dpad_hid::SerialStick::new(pins), tx).unwrap());
        info!("Serial stick initialized");
    }

    #[cfg(not(feature = "serial"))]
    {
        // --- USB Setup ---
        let usb_driver = Driver::new(p.USB, Irqs);

        let mut usb_config = UsbConfig::new(config::USB_VID, config::USB_PID);
        usb_config.manufacturer = Some(config::USB_MANUFACTURER);
        usb_config.product = Some(config::USB_PRODUCT);
        usb_config.serial_number = Some(config::USB_SERIAL_NUMBER);
        usb_config.max_power = 100;
        usb_config.max_packet_size_0 = 64;

        let config_descriptor = CONFIG_DESCRIPTOR.init([0; 256]);
        let bos_descriptor = BOS_DESCRIPTOR.init([0; 256]);
        let msos_descriptor = MSOS_DESCRIPTOR.init([0; 256]);
        let control_buf = CONTROL_BUF.init([0; 64]);

        let mut builder = Builder::new(
            usb_driver,
            usb_config,
            config_descriptor,
            bos_descriptor,
            msos_descriptor,
            control_buf,
        );

        #[cfg(feature = "stick")]
        let (report_descriptor, kind): (&'static [u8], HidKind) =
            (&dpad_hid::STICK_REPORT_DESCRIPTOR, HidKind::Joystick);
        #[cfg(feature = "hat")]
        let (report_descriptor, kind): (&'static [u8], HidKind) =
            (&dpad_hid::HAT_REPORT_DESCRIPTOR, HidKind::Joystick);
        #[cfg(feature = "keyboard")]
        let (report_descriptor, kind): (&'static [u8], HidKind) = {
            use usbd_hid::descriptor::{KeyboardReport, SerializedDescriptor};
            (KeyboardReport::desc(), HidKind::Keyboard)
        };

        // Configure HID class
        let hid_state = HID_STATE.init(State::new());
        let Some(hid_writer) = configure_usb_hid(&mut builder, hid_state, report_descriptor, kind)
        else {
            defmt::panic!("HID interface registered twice");
        };

        // Build the USB device
        let usb_device = builder.build();

        // Create output
        let usb_output = UsbHidOutput::new(hid_writer);

        // Spawn tasks (unwrap the SpawnToken, then spawn)
        spawner.spawn(usb_task(usb_device).unwrap());
        spawner.spawn(stick_task(pins, usb_output).unwrap());

        info!("Digital stick initialized, waiting for USB host...");
    }
}

/// USB device task - runs the USB stack.
#[cfg(not(feature = "serial"))]
#[embassy_executor::task]
async fn usb_task(mut device: embassy_usb::UsbDevice<'static, Driver<'static, USB>>) {
    device.run().await;
}

/// Stick task - samples the pins and sends the X/Y report on change.
#[cfg(feature = "stick")]
#[embassy_executor::task]
async fn stick_task(pins: Pins, mut output: UsbHidOutput<'static>) {
    output.wait_ready().await;
    info!("USB HID ready, forwarding stick axes...");

    let mut bridge =
        dpad_hid::StickBridge::new(pins, output).with_poll_interval(config::STICK_POLL_MS);
    bridge.run(&RUN_FLAG, &mut embassy_time::Delay).await;
}

/// Stick task - samples the pins and sends the hat-switch report on change.
#[cfg(feature = "hat")]
#[embassy_executor::task]
async fn stick_task(pins: Pins, mut output: UsbHidOutput<'static>) {
    output.wait_ready().await;
    info!("USB HID ready, forwarding hat switch...");

    let mut bridge =
        dpad_hid::HatBridge::new(pins, output).with_poll_interval(config::HAT_POLL_MS);
    bridge.run(&RUN_FLAG, &mut embassy_time::Delay).await;
}

/// Stick task - presses and releases arrow keys as the switches change.
#[cfg(feature = "keyboard")]
#[embassy_executor::task]
async fn stick_task(pins: Pins, mut output: UsbHidOutput<'static>) {
    output.wait_ready().await;
    info!("USB HID ready, forwarding arrow keys...");

    let keys = dpad_hid::KeyboardOutput::new(output);
    let mut bridge = dpad_hid::KeyboardBridge::with_keymap(pins, keys, config::KEYBOARD_KEYS)
        .with_poll_interval(config::KEYBOARD_POLL_MS);
    bridge.run(&RUN_FLAG, &mut embassy_time::Delay).await;
}

/// Serial task - writes the 4-way direction name whenever it changes.
#[cfg(feature = "serial")]
#[embassy_executor::task]
async fn serial_task(
    mut stick: dpad_hid::SerialStick<Pins>,
    mut tx: embassy_rp::uart::UartTx<'static, embassy_rp::uart::Async>,
) {
    use core::fmt::Write as _;
    use dpad_hid::{ChangeGate, Direction};
    use embassy_time::Timer;

    let mut gate = ChangeGate::new(Direction::Center);
    RUN_FLAG.start();

    while RUN_FLAG.is_running() {
        let direction = stick.read();
        if gate.is_changed(&direction) {
            let mut line: heapless::String<16> = heapless::String::new();
            // Longest name is "CENTER", always fits
            let _ = writeln!(line, "{}", direction.name());
            match tx.write(line.as_bytes()).await {
                Ok(()) => gate.commit(direction),
                Err(e) => defmt::warn!("UART write failed: {:?}", e),
            }
        }
        Timer::after_millis(u64::from(config::SERIAL_POLL_MS)).await;
    }
}
