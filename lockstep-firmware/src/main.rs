//! Lockstep - EEG Headset Bridge Firmware
//!
//! Reads a ThinkGear headset over UART, flashes an RGB LED once per
//! 64-sample cycle, and every 32 cycles plots the averaged response on an
//! OLED and streams it to the host.
//!
//! Everything runs in one cooperative loop: read a byte, feed it to the
//! bridge, service the flicker timer and any due report, yield.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::i2c::I2c;
use embassy_rp::peripherals::{UART0, UART1};
use embassy_rp::pwm::{self, Pwm};
use embassy_rp::uart::{BufferedInterruptHandler, Uart};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use lockstep_core::Bridge;
use lockstep_drivers::{Controller, GpioIndicator, HostLink, Oled, RgbLed};
use lockstep_hal::{Clock, UartRx};
use lockstep_hal_rp2040::pwm::PWM_TOP;
use lockstep_hal_rp2040::{i2c, uart};
use lockstep_hal_rp2040::{BlockingI2c, DutyChannel, EmbassyClock, GpioOutput, IoRx, IoTx};

mod board;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
    UART1_IRQ => BufferedInterruptHandler<UART1>;
});

// UART queues (must live forever)
static HEADSET_TX_BUF: StaticCell<[u8; 16]> = StaticCell::new();
static HEADSET_RX_BUF: StaticCell<[u8; board::HEADSET_RX_BUF]> = StaticCell::new();
static HOST_TX_BUF: StaticCell<[u8; board::HOST_TX_BUF]> = StaticCell::new();
static HOST_RX_BUF: StaticCell<[u8; 16]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Lockstep firmware starting...");

    let p = embassy_rp::init(Default::default());
    let clock = EmbassyClock;
    info!("Peripherals initialized");

    // Headset link: only the receive half is used
    let headset = Uart::new_blocking(
        p.UART0,
        p.PIN_0,
        p.PIN_1,
        uart::to_rp_config(&board::HEADSET_UART),
    )
    .into_buffered(
        Irqs,
        HEADSET_TX_BUF.init([0u8; 16]),
        HEADSET_RX_BUF.init([0u8; board::HEADSET_RX_BUF]),
    );
    let (_, headset_rx) = headset.split();
    let mut headset = IoRx::new(headset_rx);
    info!(
        "Headset UART at {} baud, {} ms of RX headroom",
        board::HEADSET_UART.baudrate,
        board::HEADSET_RX_HEADROOM_MS
    );

    // Host link: only the transmit half is used
    let host = Uart::new_blocking(
        p.UART1,
        p.PIN_4,
        p.PIN_5,
        uart::to_rp_config(&board::HOST_UART),
    )
    .into_buffered(
        Irqs,
        HOST_TX_BUF.init([0u8; board::HOST_TX_BUF]),
        HOST_RX_BUF.init([0u8; 16]),
    );
    let (host_tx, _) = host.split();
    let mut host = HostLink::new(IoTx::new(host_tx));
    info!("Host UART at {} baud", board::HOST_UART.baudrate);

    // OLED
    let bus = I2c::new_blocking(
        p.I2C1,
        p.PIN_7,
        p.PIN_6,
        i2c::to_rp_config(&board::OLED_I2C),
    );
    let mut oled = Oled::with_controller(
        BlockingI2c::new(bus),
        board::OLED_ADDRESS,
        Controller::Ssd1306,
    );
    match oled.init() {
        Ok(()) => info!("OLED initialized"),
        // Acquisition and stimulus keep running without a display
        Err(e) => error!("OLED init failed: {}", e),
    }

    // RGB stimulus on three PWM outputs
    let mut pwm_config = pwm::Config::default();
    pwm_config.top = PWM_TOP;
    let (red, green) =
        Pwm::new_output_ab(p.PWM_SLICE5, p.PIN_10, p.PIN_11, pwm_config.clone()).split();
    let (blue, _) = Pwm::new_output_a(p.PWM_SLICE6, p.PIN_12, pwm_config).split();
    let rgb = RgbLed::new(
        DutyChannel::new(unwrap!(red)),
        DutyChannel::new(unwrap!(green)),
        DutyChannel::new(unwrap!(blue)),
    );

    // Quality LED
    let quality_led = GpioIndicator::new(
        GpioOutput::new(Output::new(p.PIN_25, Level::Low)),
        board::QUALITY_LED_INVERTED,
    );

    let mut bridge = Bridge::new(quality_led, rgb, clock.now_ms());
    info!("Entering poll loop");

    loop {
        let now = clock.now_ms();

        match headset.try_read_byte() {
            Ok(Some(byte)) => bridge.feed_byte(byte, now),
            Ok(None) => {}
            Err(e) => warn!("Headset UART error: {}", e),
        }

        match bridge.poll(now, &mut oled, &mut host) {
            Ok(Some(summary)) => {
                info!(
                    "Report #{}: {} range {}..{}",
                    summary.sequence, summary.header, summary.min, summary.max
                );
                debug!("Decoder: {}", bridge.decoder_stats());
                let packet = bridge.packet();
                debug!(
                    "Blink {} EEG power {}",
                    packet.blink_strength,
                    packet.eeg_power.bands()
                );
            }
            Ok(None) => {}
            Err(e) => warn!("Report failed: {}", e),
        }

        embassy_futures::yield_now().await;
    }
}
