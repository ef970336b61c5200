//! One-shot authoritative time sync and the boot sequence around it.
//!
//! A sync asks the network for one UTC sample, applies the EU summer
//! time rule and re-anchors the [`WallClock`]. A failed sync leaves the
//! previous anchor alone. The boot sequence is the only caller that
//! replaces a failure with the fallback time, so the device always
//! comes up with a running clock.
//!
//! There is no periodic resync here; retry policy belongs to whatever
//! owns the link.

use embedded_hal_async::delay::DelayNs;

use crate::config::BootConfig;
use crate::error::{ConnectError, Error, SyncError};
use crate::time::dst::{dst_state, DstState};
use crate::time::wall_clock::{WallClock, WallTime};
use crate::time::{Instant, MonotonicClock, UtcInstant};
use crate::ui::render::{self, RenderRequest};
use crate::ui::DisplaySurface;

/// One-shot request for the current UTC time.
#[allow(async_fn_in_trait)]
pub trait NetworkTimeSource {
    async fn fetch(&mut self) -> Result<UtcInstant, SyncError>;
}

/// Link to whatever serves the time. Used once at boot.
#[allow(async_fn_in_trait)]
pub trait ConnectivityProvider {
    fn is_up(&self) -> bool;
    async fn connect(&mut self) -> Result<(), ConnectError>;
}

/// Anchor `clock` to the local time of `sample`, taken at `at`.
pub fn apply_sample(sample: UtcInstant, clock: &mut WallClock, at: Instant) -> DstState {
    let dst = dst_state(sample);
    let local = sample.offset_by(dst.utc_offset_secs());
    clock.anchor_time(WallTime::from_seconds_of_day(local.seconds_of_day()), at);
    dst
}

/// Fetches a sample and anchors the clock at the instant it arrived.
pub struct TimeSyncCoordinator<M> {
    monotonic: M,
}

impl<M: MonotonicClock> TimeSyncCoordinator<M> {
    pub fn new(monotonic: M) -> Self {
        Self { monotonic }
    }

    pub async fn sync<N: NetworkTimeSource>(
        &self,
        network: &mut N,
        clock: &mut WallClock,
    ) -> Result<DstState, SyncError> {
        let sample = network.fetch().await?;
        Ok(apply_sample(sample, clock, self.monotonic.now()))
    }

    pub fn now(&self) -> Instant {
        self.monotonic.now()
    }
}

/// Progress shown on the display while booting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BootStatus {
    Connecting,
    Connected,
    LinkFailed,
    Syncing,
    Synced(DstState),
    SyncFailed,
}

impl BootStatus {
    pub fn message(self) -> &'static str {
        match self {
            BootStatus::Connecting => "Connecting...",
            BootStatus::Connected => "Connected",
            BootStatus::LinkFailed => "Link failed",
            BootStatus::Syncing => "Syncing time...",
            BootStatus::Synced(DstState {
                is_summer_time: true,
            }) => "Summer time",
            BootStatus::Synced(DstState {
                is_summer_time: false,
            }) => "Standard time",
            BootStatus::SyncFailed => "Time sync failed",
        }
    }
}

/// How the boot sequence ended. Either way the clock is running.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BootOutcome {
    Synced(DstState),
    /// No link; running on the fallback time.
    Offline(ConnectError),
    /// Link came up but no usable sample; running on the fallback time.
    SyncFailed(SyncError),
}

impl BootOutcome {
    pub fn error(self) -> Option<Error> {
        match self {
            BootOutcome::Synced(_) => None,
            BootOutcome::Offline(e) => Some(e.into()),
            BootOutcome::SyncFailed(e) => Some(e.into()),
        }
    }
}

/// Bring the link up, sync once, and fall back to a fixed time on any failure.
pub async fn bootstrap<L, M, D, S>(
    link: &mut L,
    sync: &TimeSyncCoordinator<M>,
    clock: &mut WallClock,
    delay: &mut D,
    surface: &mut S,
    config: &BootConfig,
) -> BootOutcome
where
    L: ConnectivityProvider + NetworkTimeSource,
    M: MonotonicClock,
    D: DelayNs,
    S: DisplaySurface,
{
    if !link.is_up() {
        show(surface, BootStatus::Connecting);
        if let Err(e) = connect_with_retry(link, delay, config).await {
            hold(surface, delay, BootStatus::LinkFailed, config).await;
            clock.anchor_time(config.fallback_time, sync.now());
            return BootOutcome::Offline(e);
        }
        hold(surface, delay, BootStatus::Connected, config).await;
    }

    show(surface, BootStatus::Syncing);
    match sync.sync(link, clock).await {
        Ok(dst) => {
            hold(surface, delay, BootStatus::Synced(dst), config).await;
            BootOutcome::Synced(dst)
        }
        Err(e) => {
            hold(surface, delay, BootStatus::SyncFailed, config).await;
            clock.anchor_time(config.fallback_time, sync.now());
            BootOutcome::SyncFailed(e)
        }
    }
}

async fn connect_with_retry<L, D>(
    link: &mut L,
    delay: &mut D,
    config: &BootConfig,
) -> Result<(), ConnectError>
where
    L: ConnectivityProvider,
    D: DelayNs,
{
    let mut last = ConnectError::Timeout;
    for attempt in 0..config.connect_attempts {
        match link.connect().await {
            Ok(()) => return Ok(()),
            Err(e) => last = e,
        }
        if attempt + 1 < config.connect_attempts {
            delay.delay_ms(config.connect_retry_ms).await;
        }
    }
    Err(last)
}

fn show<S: DisplaySurface>(surface: &mut S, status: BootStatus) {
    render::draw(surface, &RenderRequest::Status(status));
}

async fn hold<S: DisplaySurface, D: DelayNs>(
    surface: &mut S,
    delay: &mut D,
    status: BootStatus,
    config: &BootConfig,
) {
    show(surface, status);
    delay.delay_ms(config.status_hold_ms).await;
}
