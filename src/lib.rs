//! # Retro Clock Core Library
//!
//! A tile-style digital watch face for a 144 x 168 monochrome wearable
//! display. The face shows hour and minute in two large tiles, the weekday
//! in a wide tile, and the date as three small tiles whose order the user
//! picks from a companion app.
//!
//! ## Design Philosophy
//!
//! ### One controller, injected host services
//! Everything mutable lives in a single [`ClockFace`]. The platform's clock,
//! key-value storage and message channel are generic capabilities
//! ([`ClockService`], [`SettingsStore`], [`MessageChannel`]) handed to the
//! face at construction, so it runs the same against a device, the desktop
//! host binary or test fakes.
//!
//! ### Pure formatting and layout
//! - [`format`] turns a timestamp into fresh owned strings each minute
//! - [`layout`] maps a [`DateOrder`] to a fixed table of rectangles
//! - [`renderer`] draws tiles and text through `embedded-graphics`
//!
//! ### Event flow
//! 1. **Minute tick**: reformat the time and push strings into the regions
//! 2. **Companion message**: decode, validate, relayout and redisplay
//! 3. **Redraw**: paint background tiles, separators, then text
//!
//! There are no threads, queues or caches. Every callback completes
//! synchronously.

pub mod config;
pub mod date_order;
pub mod face;
pub mod format;
pub mod framebuffer;
pub mod host;
pub mod layout;
pub mod message;
pub mod region;
pub mod renderer;
pub mod store;

pub use date_order::DateOrder;
pub use face::{ClockFace, FaceError};
pub use format::{strip, DisplayTime, HourMode};
pub use framebuffer::FrameBuffer;
pub use host::{ClockService, LineChannel, MessageChannel, SystemClock, TransportError};
pub use layout::{date_layout, DateLayout, SCREEN_HEIGHT, SCREEN_WIDTH};
pub use message::{ConfigUpdate, MessageError, DATE_FORMAT_KEY};
pub use region::Field;
pub use store::{FileStore, MemoryStore, SettingsStore, StoreError};
