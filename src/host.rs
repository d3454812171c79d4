//! # Host Capabilities
//!
//! Services the platform provides to the face: wall-clock time with minute
//! tick registration, and the companion-app message channel. The face gets
//! them injected at construction, which keeps it testable with fakes.
//!
//! The concrete types here back the desktop host binary. They only track
//! registration state; the binary's event loop checks that state before
//! delivering ticks or messages.

use crate::format::HourMode;
use chrono::{Local, NaiveDateTime};
use thiserror::Error;
use tracing::debug;

/// Errors opening the configuration channel.
#[derive(Error, Debug)]
pub enum TransportError {
    /// The channel was already opened by someone else
    #[error("message channel already open")]
    AlreadyOpen,
}

/// Wall clock and minute tick registration.
pub trait ClockService {
    /// Current local time.
    fn now(&self) -> NaiveDateTime;

    /// Whether the user prefers a 24-hour clock.
    fn is_24h_style(&self) -> bool;

    /// Start delivering a tick at every minute boundary.
    fn subscribe_minutes(&mut self);

    /// Stop delivering ticks.
    fn unsubscribe(&mut self);
}

/// Companion-app configuration channel.
pub trait MessageChannel {
    fn open(&mut self) -> Result<(), TransportError>;

    fn close(&mut self);
}

impl<T: ClockService + ?Sized> ClockService for &mut T {
    fn now(&self) -> NaiveDateTime {
        (**self).now()
    }

    fn is_24h_style(&self) -> bool {
        (**self).is_24h_style()
    }

    fn subscribe_minutes(&mut self) {
        (**self).subscribe_minutes()
    }

    fn unsubscribe(&mut self) {
        (**self).unsubscribe()
    }
}

impl<T: MessageChannel + ?Sized> MessageChannel for &mut T {
    fn open(&mut self) -> Result<(), TransportError> {
        (**self).open()
    }

    fn close(&mut self) {
        (**self).close()
    }
}

/// Local system time with a configured hour style.
#[derive(Debug)]
pub struct SystemClock {
    mode: HourMode,
    subscribed: bool,
}

impl SystemClock {
    pub fn new(mode: HourMode) -> Self {
        Self {
            mode,
            subscribed: false,
        }
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscribed
    }
}

impl ClockService for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }

    fn is_24h_style(&self) -> bool {
        self.mode == HourMode::TwentyFourHour
    }

    fn subscribe_minutes(&mut self) {
        debug!("Minute ticks subscribed");
        self.subscribed = true;
    }

    fn unsubscribe(&mut self) {
        debug!("Minute ticks unsubscribed");
        self.subscribed = false;
    }
}

/// Line-oriented channel: one payload per line of input.
#[derive(Debug, Default)]
pub struct LineChannel {
    open: bool,
}

impl LineChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }
}

impl MessageChannel for LineChannel {
    fn open(&mut self) -> Result<(), TransportError> {
        if self.open {
            return Err(TransportError::AlreadyOpen);
        }
        self.open = true;
        debug!("Message channel open");
        Ok(())
    }

    fn close(&mut self) {
        self.open = false;
        debug!("Message channel closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_subscription() {
        let mut clock = SystemClock::new(HourMode::TwelveHour);
        assert!(!clock.is_24h_style());
        assert!(!clock.is_subscribed());
        clock.subscribe_minutes();
        assert!(clock.is_subscribed());
        clock.unsubscribe();
        assert!(!clock.is_subscribed());
    }

    #[test]
    fn test_line_channel_open_once() {
        let mut channel = LineChannel::new();
        channel.open().unwrap();
        assert!(channel.is_open());
        assert!(matches!(channel.open(), Err(TransportError::AlreadyOpen)));
        channel.close();
        assert!(!channel.is_open());
    }
}
