//! knobtimer firmware for nRF52840 + SSD1306 + KY-040 encoder.
//!
//! Boot: SoftDevice up, OLED up, one BLE time sync (or fallback), radio
//! link dropped. Then a single cooperative loop polls the encoder every
//! `POLL_INTERVAL_MS`, steps the state machine and redraws on change.

#![no_std]
#![no_main]

use defmt::{info, unwrap, warn};
use embassy_executor::Spawner;
use embassy_nrf::gpio::Pin;
use embassy_nrf::interrupt::{self, InterruptExt, Priority};
use embassy_nrf::twim::{self, Twim};
use embassy_nrf::{bind_interrupts, peripherals};
use embassy_time::{Delay, Duration, Ticker};
use nrf_softdevice::{raw, Softdevice};
use {defmt_rtt as _, panic_probe as _};

use knobtimer::ble::link::{bonder, BleTimeLink};
use knobtimer::config::{BootConfig, TimerConfig, POLL_INTERVAL_MS};
use knobtimer::device::Device;
use knobtimer::time::sync::{bootstrap, BootOutcome, TimeSyncCoordinator};
use knobtimer::time::wall_clock::WallClock;
use knobtimer::time::{EmbassyClock, MonotonicClock};
use knobtimer::ui::display::OledSurface;
use knobtimer::ui::encoder::EncoderPins;
use knobtimer::ui::input_logic::RawSample;

bind_interrupts!(struct Irqs {
    SPIM0_SPIS0_TWIM0_TWIS0_SPI0_TWI0 => twim::InterruptHandler<peripherals::TWISPI0>;
});

#[embassy_executor::task]
async fn softdevice_task(sd: &'static Softdevice) -> ! {
    sd.run().await
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
        conn_gatt: Some(raw::ble_gatt_conn_cfg_t { att_mtu: 64 }),
        gap_role_count: Some(raw::ble_gap_cfg_role_count_t {
            adv_set_count: 1,
            periph_role_count: 0,
            central_role_count: 1,
            central_sec_count: 1,
            _bitfield_1: raw::ble_gap_cfg_role_count_t::new_bitfield_1(0),
        }),
        ..Default::default()
    }
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("knobtimer starting");

    // The SoftDevice reserves priorities 0, 1 and 4.
    let mut nrf_config = embassy_nrf::config::Config::default();
    nrf_config.gpiote_interrupt_priority = Priority::P2;
    nrf_config.time_interrupt_priority = Priority::P2;
    let p = embassy_nrf::init(nrf_config);

    let sd: &'static Softdevice = Softdevice::enable(&softdevice_config());
    unwrap!(spawner.spawn(softdevice_task(sd)));

    interrupt::SPIM0_SPIS0_TWIM0_TWIS0_SPI0_TWI0.set_priority(Priority::P3);
    let i2c = Twim::new(p.TWISPI0, Irqs, p.P0_26, p.P0_27, twim::Config::default());
    let mut surface = OledSurface::new(i2c);

    let mut encoder = EncoderPins::new(p.P0_11.degrade(), p.P0_12.degrade(), p.P0_24.degrade());
    let initial = RawSample::read(&mut encoder);

    let mut clock = WallClock::default();
    let sync = TimeSyncCoordinator::new(EmbassyClock);
    let mut link = BleTimeLink::new(sd, bonder());
    let outcome = bootstrap(
        &mut link,
        &sync,
        &mut clock,
        &mut Delay,
        &mut surface,
        &BootConfig::default(),
    )
    .await;
    match outcome {
        BootOutcome::Synced(dst) => {
            info!("Time synced (summer time: {})", dst.is_summer_time)
        }
        other => warn!("Running on fallback time: {}", other),
    }
    link.disconnect();

    let mut device = Device::new(&TimerConfig::default(), clock, initial);
    let mut ticker = Ticker::every(Duration::from_millis(POLL_INTERVAL_MS));
    info!("Entering poll loop");

    loop {
        let report = device.run_cycle(&mut encoder, &mut surface, EmbassyClock.now());
        for t in report.transitions.iter() {
            info!("Mode: {} -> {} ({})", t.from, t.to, t.event);
        }
        ticker.next().await;
    }
}
