//! Unified error types for knobtimer.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! Every error here originates outside the timer core and is absorbed
//! by the boot sequence; the state machine has no error paths.

/// Network time could not be obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SyncError {
    /// No sample came back, or the sample was not a usable UTC time.
    Unreachable,
}

/// The link to the time server could not be brought up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConnectError {
    /// Scan finished without finding a Current Time Service peer.
    NoPeer,
    /// GAP connection attempt failed.
    LinkFailed,
    /// The link could not be encrypted (time characteristics need it).
    Insecure,
    /// The attempt did not complete in time.
    Timeout,
}

/// Top-level error type used at the firmware boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    Sync(SyncError),
    Connect(ConnectError),
}

// Convenience conversions

impl From<SyncError> for Error {
    fn from(e: SyncError) -> Self {
        Error::Sync(e)
    }
}

impl From<ConnectError> for Error {
    fn from(e: ConnectError) -> Self {
        Error::Connect(e)
    }
}
