//! Host identity and clock capabilities.
//!
//! Handlers never call the OS directly for the hostname or the current time.
//! They go through these traits, held in `AppState`, so tests can substitute
//! fixed values and the hostname failure policy lives in one place.

use std::io;

use chrono::{Local, NaiveDateTime};

use crate::config::TIMESTAMP_FORMAT;

/// Source of the machine's network hostname.
pub trait HostIdentity: Send + Sync {
    fn hostname(&self) -> io::Result<String>;
}

/// Source of the current local wall-clock time.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// Reads the hostname from the operating system on every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemHostIdentity;

impl HostIdentity for SystemHostIdentity {
    fn hostname(&self) -> io::Result<String> {
        let name = hostname::get()?;
        Ok(name.to_string_lossy().into_owned())
    }
}

/// Local time without offset.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Always reports the same hostname.
#[derive(Debug, Clone)]
pub struct FixedHostIdentity(pub String);

impl HostIdentity for FixedHostIdentity {
    fn hostname(&self) -> io::Result<String> {
        Ok(self.0.clone())
    }
}

/// Always fails, as in a sandbox without access to the host name.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableHostIdentity;

impl HostIdentity for UnavailableHostIdentity {
    fn hostname(&self) -> io::Result<String> {
        Err(io::Error::new(
            io::ErrorKind::PermissionDenied,
            "hostname unavailable",
        ))
    }
}

/// Stopped clock.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// Render a timestamp as ISO-8601 with microsecond precision and no offset,
/// e.g. `2024-05-01T12:30:45.000123`.
pub fn format_timestamp(ts: NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}
