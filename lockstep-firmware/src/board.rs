//! Board wiring for a Raspberry Pi Pico
//!
//! | Function          | GPIO | Peripheral  |
//! |-------------------|------|-------------|
//! | Headset TX (idle) | 0    | UART0 TX    |
//! | Headset RX        | 1    | UART0 RX    |
//! | Host TX           | 4    | UART1 TX    |
//! | Host RX (idle)    | 5    | UART1 RX    |
//! | OLED SDA          | 6    | I2C1 SDA    |
//! | OLED SCL          | 7    | I2C1 SCL    |
//! | RGB red           | 10   | PWM5 A      |
//! | RGB green         | 11   | PWM5 B      |
//! | RGB blue          | 12   | PWM6 A      |
//! | Quality LED       | 25   | on-board    |
//!
//! The pin numbers are only used for the checks below; `main` takes the
//! matching `PIN_n` peripherals by name.

use lockstep_hal::i2c::I2cConfig;
use lockstep_hal::uart::UartConfig;
use lockstep_hal_rp2040::gpio::GPIO_COUNT;
use lockstep_hal_rp2040::pwm::gpio_to_slice;
use lockstep_hal_rp2040::uart::{gpio_to_uart, is_rx_pin, is_tx_pin, UartId};

pub const HEADSET_TX: u8 = 0;
pub const HEADSET_RX: u8 = 1;
pub const HOST_TX: u8 = 4;
pub const HOST_RX: u8 = 5;
pub const OLED_SDA: u8 = 6;
pub const OLED_SCL: u8 = 7;
pub const RGB_RED: u8 = 10;
pub const RGB_GREEN: u8 = 11;
pub const RGB_BLUE: u8 = 12;
pub const QUALITY_LED: u8 = 25;

/// The on-board LED is wired active-high
pub const QUALITY_LED_INVERTED: bool = false;

/// ThinkGear default link
pub const HEADSET_UART: UartConfig = UartConfig::HEADSET;

/// Diagnostic stream to the host computer
pub const HOST_UART: UartConfig = UartConfig::HOST;

/// OLED bus; the panel accepts fast mode
pub const OLED_I2C: I2cConfig = I2cConfig::FAST;

/// OLED I2C address
pub const OLED_ADDRESS: u8 = 0x3C;

/// Receive queue for the headset
pub const HEADSET_RX_BUF: usize = 512;

/// Longest poll-loop stall the headset queue absorbs without overrun
pub const HEADSET_RX_HEADROOM_MS: u32 =
    HEADSET_RX_BUF as u32 * HEADSET_UART.frame_time_us() / 1_000;

/// Transmit queue for the host link, sized for one report
pub const HOST_TX_BUF: usize = 512;

const fn same_uart(a: Option<UartId>, b: UartId) -> bool {
    matches!(
        (a, b),
        (Some(UartId::Uart0), UartId::Uart0) | (Some(UartId::Uart1), UartId::Uart1)
    )
}

const _: () = {
    assert!(same_uart(gpio_to_uart(HEADSET_TX), UartId::Uart0));
    assert!(same_uart(gpio_to_uart(HEADSET_RX), UartId::Uart0));
    assert!(is_tx_pin(HEADSET_TX) && is_rx_pin(HEADSET_RX));
    assert!(same_uart(gpio_to_uart(HOST_TX), UartId::Uart1));
    assert!(same_uart(gpio_to_uart(HOST_RX), UartId::Uart1));
    assert!(is_tx_pin(HOST_TX) && is_rx_pin(HOST_RX));
    // Red and green share a slice, blue has its own A output
    assert!(gpio_to_slice(RGB_RED).0 == 5 && !gpio_to_slice(RGB_RED).1);
    assert!(gpio_to_slice(RGB_GREEN).0 == 5 && gpio_to_slice(RGB_GREEN).1);
    assert!(gpio_to_slice(RGB_BLUE).0 == 6 && !gpio_to_slice(RGB_BLUE).1);
    assert!(QUALITY_LED < GPIO_COUNT);
};
