//! # Clock Face Controller
//!
//! [`ClockFace`] owns everything the watch face needs between callbacks:
//! the text regions, the active [`DateOrder`] and the last formatted time.
//! The host delivers callbacks one at a time on a single thread:
//!
//! - [`ClockFace::on_tick`] once per minute,
//! - [`ClockFace::on_config_message`] whenever the companion app sends
//!   settings,
//! - [`ClockFace::render`] whenever the window needs repainting.
//!
//! ## Lifecycle
//!
//! [`ClockFace::start`] reads the stored preference, builds the window,
//! shows the current time, subscribes to minute ticks and opens the message
//! channel, in that order. [`ClockFace::shutdown`] consumes the face and
//! undoes those steps in reverse, persisting the preference on the way out.
//! Consuming `self` makes a double shutdown impossible.

use crate::{
    date_order::DateOrder,
    format::{DisplayTime, HourMode},
    host::{ClockService, MessageChannel, TransportError},
    layout::{date_layout, DateLayout},
    message::{decode, ConfigUpdate, DATE_FORMAT_KEY},
    region::{FaceWindow, Field},
    renderer::{draw_ascii, draw_face},
    store::{SettingsStore, StoreError},
};
use chrono::NaiveDateTime;
use embedded_graphics::{pixelcolor::BinaryColor, prelude::DrawTarget, primitives::Rectangle};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors starting or stopping the face.
#[derive(Error, Debug)]
pub enum FaceError {
    /// The configuration channel could not be opened
    #[error("message channel: {0}")]
    Transport(#[from] TransportError),

    /// The preference could not be persisted
    #[error("settings store: {0}")]
    Store(#[from] StoreError),
}

/// The watch face controller.
pub struct ClockFace<C, S, M>
where
    C: ClockService,
    S: SettingsStore,
    M: MessageChannel,
{
    clock: C,
    store: S,
    channel: M,
    window: FaceWindow,
    order: DateOrder,
    mode: HourMode,
    shown: DisplayTime,
}

impl<C, S, M> ClockFace<C, S, M>
where
    C: ClockService,
    S: SettingsStore,
    M: MessageChannel,
{
    /// Bring the face up and show the current time.
    pub fn start(mut clock: C, store: S, mut channel: M) -> Result<Self, FaceError> {
        let order = stored_order(&store);
        let window = FaceWindow::new(&date_layout(order));
        let mode = HourMode::from_24h_style(clock.is_24h_style());
        let shown = DisplayTime::new(&clock.now(), mode);

        clock.subscribe_minutes();
        if let Err(e) = channel.open() {
            clock.unsubscribe();
            return Err(e.into());
        }

        let mut face = Self {
            clock,
            store,
            channel,
            window,
            order,
            mode,
            shown,
        };
        face.push_time();

        info!(order = %face.order, mode = ?face.mode, "Clock face started");
        Ok(face)
    }

    /// Minute tick: reformat `now` and update every region.
    ///
    /// The hour style is re-read from the clock service so a change in the
    /// system preference shows up on the next tick.
    pub fn on_tick(&mut self, now: NaiveDateTime) {
        self.mode = HourMode::from_24h_style(self.clock.is_24h_style());
        self.shown = DisplayTime::new(&now, self.mode);
        debug!(hour = %self.shown.hour, minute = %self.shown.minute, "Tick");
        self.push_time();
    }

    /// Apply a raw payload from the configuration channel.
    ///
    /// Malformed payloads are logged and dropped. Returns `true` if the
    /// layout changed.
    pub fn on_config_message(&mut self, payload: &str) -> bool {
        match decode(payload) {
            Ok(ConfigUpdate::Settings {
                date_format: Some(value),
            }) => self.set_date_order_value(value),
            Ok(ConfigUpdate::Settings { date_format: None }) | Ok(ConfigUpdate::Ignored) => {
                debug!("Configuration message carried no date format");
                false
            }
            Err(e) => {
                warn!(error = %e, "Ignoring configuration message");
                false
            }
        }
    }

    /// Switch the date order from an external integer.
    ///
    /// Values outside `0..3` and the current value are no-ops. Returns
    /// `true` if the order changed.
    pub fn set_date_order_value(&mut self, value: i64) -> bool {
        match DateOrder::from_persisted(value) {
            Some(order) => self.set_date_order(order),
            None => {
                debug!(value, "Rejected out-of-range date format");
                false
            }
        }
    }

    /// Switch the date order, relayout and redisplay.
    pub fn set_date_order(&mut self, order: DateOrder) -> bool {
        if order == self.order {
            return false;
        }
        info!(from = %self.order, to = %order, "Date order changed");
        self.order = order;
        self.window.apply_date_layout(&date_layout(order));
        self.push_time();
        true
    }

    /// Paint the whole face onto `target`.
    pub fn render<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        draw_face(target, &self.window, self.order)
    }

    /// Whether anything changed since the last call.
    pub fn take_redraw(&mut self) -> bool {
        self.window.take_dirty()
    }

    /// Release every host resource and persist the preference.
    ///
    /// The channel and tick subscription are released even if persisting
    /// fails.
    pub fn shutdown(mut self) -> Result<(), FaceError> {
        self.channel.close();
        self.clock.unsubscribe();
        self.store
            .write_int(DATE_FORMAT_KEY, self.order.as_persisted())?;
        info!(order = %self.order, "Clock face stopped");
        Ok(())
    }

    /// Active date order.
    pub fn date_order(&self) -> DateOrder {
        self.order
    }

    /// Hour style used for the last formatted time.
    pub fn hour_mode(&self) -> HourMode {
        self.mode
    }

    /// Date row rectangles for the active order.
    pub fn date_layout(&self) -> DateLayout {
        date_layout(self.order)
    }

    /// Text currently shown in `field`.
    pub fn text(&self, field: Field) -> &str {
        &self.window.region(field).text
    }

    /// Screen rectangle of `field`'s text region.
    pub fn frame(&self, field: Field) -> Rectangle {
        self.window.region(field).frame
    }

    /// Render the face as half-block text for a terminal.
    pub fn preview(&self) -> String {
        draw_ascii(&self.window, self.order)
    }

    /// The injected clock service.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// The injected message channel.
    pub fn channel(&self) -> &M {
        &self.channel
    }

    fn push_time(&mut self) {
        let shown = &self.shown;
        let window = &mut self.window;
        window.set_text(Field::Hour, &shown.hour);
        window.set_text(Field::Minute, &shown.minute);
        window.set_text(Field::Weekday, &shown.weekday);
        window.set_text(Field::Day, &shown.day);
        window.set_text(Field::Month, &shown.month);
        window.set_text(Field::Year, &shown.year);
        window.set_text(Field::Meridiem, &shown.meridiem);
    }
}

fn stored_order<S: SettingsStore>(store: &S) -> DateOrder {
    match store.read_int(DATE_FORMAT_KEY) {
        None => DateOrder::default(),
        Some(value) => DateOrder::from_persisted(i64::from(value)).unwrap_or_else(|| {
            warn!(value, "Stored date format out of range, using default");
            DateOrder::default()
        }),
    }
}
