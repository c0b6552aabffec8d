//! Error types for the EMAC interface glue
//!
//! Errors are organized by domain for better diagnostics:
//! - [`ConfigError`]: Bring-up failures detected before the interface goes live
//! - [`IoError`]: Driver refusals on the transmit and power-up paths
//! - [`FilterError`]: Bad requests on the multicast filter hooks
//!
//! The unified [`Error`] enum wraps all domain errors and is returned
//! by the adapter entry points.
//!
//! [`InputRejected`] is separate: it is how the stack's input dispatch hands a
//! refused frame back to its caller, so the caller can release it.

// =============================================================================
// Configuration Errors
// =============================================================================

/// Bring-up errors
///
/// These errors occur while copying the driver's static properties into the
/// interface handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Driver hardware address does not fit the interface's address field
    HwAddrTooLong,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ConfigError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ConfigError::HwAddrTooLong => "hardware address too long",
        }
    }
}

// =============================================================================
// I/O Errors
// =============================================================================

/// Interface-level driver errors
///
/// All variants correspond to the stack's generic "interface error" code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IoError {
    /// Driver refused the outbound frame
    TxRejected,
    /// Driver failed to power up the MAC
    PowerUpFailed,
    /// No output hook bound on the interface
    NotBound,
}

impl core::fmt::Display for IoError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl IoError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            IoError::TxRejected => "driver rejected frame",
            IoError::PowerUpFailed => "driver power-up failed",
            IoError::NotBound => "output hook not bound",
        }
    }
}

// =============================================================================
// Filter Errors
// =============================================================================

/// Multicast filter hook errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FilterError {
    /// Action code is neither add nor delete
    InvalidAction,
}

impl core::fmt::Display for FilterError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FilterError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            FilterError::InvalidAction => "invalid filter action",
        }
    }
}

// =============================================================================
// Unified Error Type
// =============================================================================

/// This enum wraps all domain-specific errors for unified error handling.
///
/// Match on the inner domain error for specific handling:
/// ```ignore
/// match result {
///     Err(Error::Config(ConfigError::HwAddrTooLong)) => { /* ... */ }
///     Err(Error::Io(IoError::PowerUpFailed)) => { /* ... */ }
///     Err(Error::Filter(FilterError::InvalidAction)) => { /* ... */ }
///     _ => {}
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Configuration error
    Config(ConfigError),
    /// I/O error
    Io(IoError),
    /// Filter error
    Filter(FilterError),
}

impl Error {
    /// True for the errors the stack treats as a generic interface error.
    pub const fn is_interface_error(&self) -> bool {
        matches!(self, Error::Io(_))
    }

    /// True for the errors the stack treats as an invalid argument.
    pub const fn is_invalid_argument(&self) -> bool {
        matches!(self, Error::Filter(_))
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Config(e) => write!(f, "config: {}", e.as_str()),
            Error::Io(e) => write!(f, "io: {}", e.as_str()),
            Error::Filter(e) => write!(f, "filter: {}", e.as_str()),
        }
    }
}

// From impls for automatic conversion
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<IoError> for Error {
    fn from(e: IoError) -> Self {
        Error::Io(e)
    }
}

impl From<FilterError> for Error {
    fn from(e: FilterError) -> Self {
        Error::Filter(e)
    }
}

/// Result type alias for adapter operations
pub type Result<T> = core::result::Result<T, Error>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = core::result::Result<T, ConfigError>;

// =============================================================================
// Input Rejection
// =============================================================================

/// Why the stack's input dispatch refused a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RejectReason {
    /// No handler for the frame's EtherType
    UnsupportedProtocol,
    /// Stack could not allocate what it needed to queue the frame
    OutOfMemory,
    /// Interface is administratively down
    InterfaceDown,
}

impl RejectReason {
    /// Returns a human-readable description of the reason
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            RejectReason::UnsupportedProtocol => "unsupported protocol",
            RejectReason::OutOfMemory => "out of memory",
            RejectReason::InterfaceDown => "interface down",
        }
    }
}

impl core::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A frame handed back by the stack's input dispatch.
///
/// Dispatch takes ownership of the buffer on success. On failure ownership
/// comes back in here and the caller is responsible for releasing it.
#[derive(Debug)]
pub struct InputRejected<B> {
    /// Why dispatch refused the frame
    pub reason: RejectReason,
    /// The refused frame
    pub buffer: B,
}

impl<B> InputRejected<B> {
    /// Create a rejection carrying the refused buffer
    pub const fn new(reason: RejectReason, buffer: B) -> Self {
        Self { reason, buffer }
    }

    /// Take the buffer back out of the rejection
    pub fn into_buffer(self) -> B {
        self.buffer
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
