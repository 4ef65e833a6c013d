//! airpointer - motion-controlled BLE mouse on the nRF52840.
//!
//! Orientation from an MPU-6050 moves the pointer, two buttons click and
//! hold, a rotary encoder scrolls and its push switch sends a key. The
//! board shows up to the host as a BLE HID mouse + keyboard.
//!
//! Task layout:
//!
//! - `softdevice_task` runs the SoftDevice event loop.
//! - `ble_task` advertises, serves the GATT server and forwards reports.
//! - `input_task` runs the input cycle every [`TICK_PERIOD_MS`].
//! - `heartbeat_task` blinks the status LED and logs the die temperature.
//!
//! The input cycle and the BLE side share only [`ble::REPORTS`] and
//! [`ble::LINK`].

#![no_std]
#![no_main]

mod ble;
mod imu;

use core::mem;

use airpointer::config::{
    BLE_DEVICE_NAME, HEARTBEAT_PERIOD_MS, TEMPERATURE_LOG_EVERY, TICK_PERIOD_MS,
};
use airpointer::error::Error;
use airpointer::input::ButtonConfig;
use airpointer::{
    ConnectionGate, CycleConfig, InputCycle, InputPins, OrientationDeltaTracker, OrientationSource,
    PointerConfig,
};
use defmt::{debug, error, info, unwrap, warn};
use embassy_executor::Spawner;
use embassy_nrf::gpio::{Input, Level, Output, OutputDrive, Pull};
use embassy_nrf::interrupt::{InterruptExt, Priority};
use embassy_nrf::peripherals::TWISPI0;
use embassy_nrf::twim::{self, Twim};
use embassy_nrf::{bind_interrupts, interrupt};
use embassy_time::{Delay, Duration, Instant, Timer};
use nrf_softdevice::{raw, Softdevice};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use crate::ble::server::Server;
use crate::ble::transport::ChannelTransport;
use crate::imu::DmpOrientation;

bind_interrupts!(struct Irqs {
    TWISPI0 => twim::InterruptHandler<TWISPI0>;
});

type Imu = DmpOrientation<Twim<'static, TWISPI0>>;
type Cycle = InputCycle<'static, Input<'static>, Imu, ChannelTransport>;

static SERVER: StaticCell<Server> = StaticCell::new();
static TWIM_TX_BUF: StaticCell<[u8; 32]> = StaticCell::new();

#[embassy_executor::task]
async fn softdevice_task(sd: &'static Softdevice) -> ! {
    sd.run().await
}

#[embassy_executor::task]
async fn ble_task(sd: &'static Softdevice, server: &'static Server) -> ! {
    ble::peripheral::peripheral_task(sd, server).await
}

#[embassy_executor::task]
async fn input_task(mut cycle: Cycle) -> ! {
    loop {
        if let Some(tick) = cycle.poll(Instant::now().as_millis()) {
            if let Some(key) = tick.key {
                debug!("key report: {}", key);
            }
        }
        // Finer than the period so ticks land close to it.
        Timer::after(Duration::from_millis(1)).await;
    }
}

#[embassy_executor::task]
async fn heartbeat_task(sd: &'static Softdevice, mut led: Output<'static>) -> ! {
    let mut beats: u32 = 0;
    loop {
        led.toggle();
        beats = beats.wrapping_add(1);
        if beats % TEMPERATURE_LOG_EVERY == 0 {
            match nrf_softdevice::temperature_celsius(sd) {
                Ok(t) => info!("die temperature: {} C", t.to_num::<f32>()),
                Err(e) => warn!("temperature read failed: {}", e),
            }
        }
        Timer::after(Duration::from_millis(HEARTBEAT_PERIOD_MS)).await;
    }
}

fn softdevice_config() -> nrf_softdevice::Config {
    nrf_softdevice::Config {
        clock: Some(raw::nrf_clock_lf_cfg_t {
            source: raw::NRF_CLOCK_LF_SRC_RC as u8,
            rc_ctiv: 16,
            rc_temp_ctiv: 2,
            accuracy: raw::NRF_CLOCK_LF_ACCURACY_500_PPM as u8,
        }),
        conn_gap: Some(raw::ble_gap_conn_cfg_t {
            conn_count: 1,
            event_length: 24,
        }),
        conn_gatt: Some(raw::ble_gatt_conn_cfg_t { att_mtu: 128 }),
        gatts_attr_tab_size: Some(raw::ble_gatts_cfg_attr_tab_size_t {
            attr_tab_size: raw::BLE_GATTS_ATTR_TAB_SIZE_DEFAULT,
        }),
        gap_role_count: Some(raw::ble_gap_cfg_role_count_t {
            adv_set_count: 1,
            periph_role_count: 1,
            central_role_count: 0,
            central_sec_count: 0,
            _bitfield_1: raw::ble_gap_cfg_role_count_t::new_bitfield_1(0),
        }),
        gap_device_name: Some(raw::ble_gap_cfg_device_name_t {
            p_value: BLE_DEVICE_NAME.as_ptr() as _,
            current_len: BLE_DEVICE_NAME.len() as u16,
            max_len: BLE_DEVICE_NAME.len() as u16,
            // SAFETY: all-zero is "no write access", a valid security mode.
            write_perm: unsafe { mem::zeroed() },
            _bitfield_1: raw::ble_gap_cfg_device_name_t::new_bitfield_1(
                raw::BLE_GATTS_VLOC_STACK as u8,
            ),
        }),
        ..Default::default()
    }
}

/// Startup failures are not recoverable: without the sensor or the GATT
/// server there is nothing to do.
fn halt(e: Error) -> ! {
    error!("startup failed: {}", e);
    defmt::panic!("airpointer halted");
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("airpointer starting");

    // Priorities 0, 1 and 4 belong to the SoftDevice.
    let mut config = embassy_nrf::config::Config::default();
    config.gpiote_interrupt_priority = Priority::P2;
    config.time_interrupt_priority = Priority::P2;
    let p = embassy_nrf::init(config);
    interrupt::TWISPI0.set_priority(Priority::P3);

    let led = Output::new(p.P0_13, Level::High, OutputDrive::Standard);

    // IMU first: DMP upload and calibration block for a few seconds.
    let mut twim_config = twim::Config::default();
    twim_config.frequency = twim::Frequency::K400;
    let i2c = Twim::new(
        p.TWISPI0,
        Irqs,
        p.P0_26,
        p.P0_27,
        twim_config,
        TWIM_TX_BUF.init([0; 32]),
    );
    let mut imu = DmpOrientation::init(i2c, &mut Delay).unwrap_or_else(|e| halt(e.into()));

    let sd = Softdevice::enable(&softdevice_config());
    let server = SERVER.init(Server::new(sd).unwrap_or_else(|e| halt(e.into())));
    let sd: &'static Softdevice = sd;
    if let Err(e) = ble::peripheral::set_appearance() {
        warn!("appearance not set: {}", e);
    }

    unwrap!(spawner.spawn(softdevice_task(sd)));
    unwrap!(spawner.spawn(ble_task(sd, server)));
    unwrap!(spawner.spawn(heartbeat_task(sd, led)));

    // Seed the tracker with a real sample before the first tick.
    let seed = loop {
        if let Some(sample) = imu.poll() {
            break sample;
        }
        Timer::after(Duration::from_millis(5)).await;
    };
    info!("orientation seed: {}", seed);

    let pins = InputPins {
        left: Input::new(p.P0_11, Pull::Up),
        right: Input::new(p.P0_12, Pull::Up),
        wheel_a: Input::new(p.P0_24, Pull::Up),
        wheel_b: Input::new(p.P0_25, Pull::Up),
        key: Some(Input::new(p.P0_02, Pull::Up)),
    };
    let cycle = InputCycle::new(
        pins,
        CycleConfig::default(),
        ButtonConfig::default(),
        OrientationDeltaTracker::new(seed, PointerConfig::default()),
        imu,
        ConnectionGate::new(&ble::LINK, ChannelTransport::new(&ble::REPORTS)),
    );

    info!("input cycle every {} ms", TICK_PERIOD_MS);
    unwrap!(spawner.spawn(input_task(cycle)));
}
