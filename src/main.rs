//! # Retro Clock Desktop Host
//!
//! Plays the role of the watch platform on a desktop: it delivers minute
//! ticks, feeds companion-app payloads read line by line from stdin to the
//! face, persists the date-order preference to a TOML settings file, and
//! shows the rendered face.
//!
//! ```text
//! retro-clock [--stdout] [--once] [--config PATH] [--init-config]
//! ```
//!
//! - `--stdout`: print the rendered face to the terminal on every redraw
//!   (otherwise redraws are logged)
//! - `--once`: render a single frame and exit, leaving the settings file
//!   untouched
//! - `--config PATH`: read configuration from `PATH` instead of
//!   `retro-clock.toml`
//! - `--init-config`: write a default configuration file and exit
//!
//! Try `echo '{"0": 2}' | retro-clock --stdout` to see the year-first
//! layout.


use anyhow::{bail, Context};
use chrono::{NaiveDate, NaiveDateTime, Timelike};
use retro_clock_lib::{
    config::{Config, CONFIG_FILE},
    ClockFace, ClockService, Field, FileStore, LineChannel, MemoryStore, SettingsStore,
    SystemClock, DATE_FORMAT_KEY,
};
use std::{env, future::Future, io, path::PathBuf, time::Duration};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{debug, info, warn};
use tracing_subscriber::{
    fmt::format::{DefaultFields, Format},
    EnvFilter, FmtSubscriber,
};

type HostFace<S> = ClockFace<SystemClock, S, LineChannel>;

/// Command line options
#[derive(Debug, Default, PartialEq)]
struct Options {
    stdout: bool,
    once: bool,
    init_config: bool,
    config: Option<PathBuf>,
}

fn parse_args<I>(args: I) -> anyhow::Result<Options>
where
    I: IntoIterator<Item = String>,
{
    let mut options = Options::default();
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--stdout" => options.stdout = true,
            "--once" => options.once = true,
            "--init-config" => options.init_config = true,
            "--config" => {
                let path = args.next().context("--config needs a path")?;
                options.config = Some(PathBuf::from(path));
            }
            other => bail!("unknown argument: {other}"),
        }
    }
    Ok(options)
}

fn env_filter(fallback: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
}

/// Log subscriber writing to stderr, keeping stdout for the face preview.
type LogSubscriber = FmtSubscriber<DefaultFields, Format, EnvFilter, fn() -> io::Stderr>;

fn log_subscriber(filter: EnvFilter) -> LogSubscriber {
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr as fn() -> io::Stderr)
        .with_target(false)
        .finish()
}

/// Time left until the next whole minute.
fn until_next_minute(now: NaiveDateTime) -> Duration {
    // Leap seconds report nanoseconds past 1e9
    let into_minute = Duration::new(
        u64::from(now.second()),
        now.nanosecond().min(999_999_999),
    );
    Duration::from_secs(60).saturating_sub(into_minute)
}

/// The calendar minute `now` falls in.
fn minute_of(now: NaiveDateTime) -> (NaiveDate, u32, u32) {
    (now.date(), now.hour(), now.minute())
}

/// Copy the stored preference into memory so a preview never writes the
/// settings file.
fn preview_store<S: SettingsStore>(source: &S) -> MemoryStore {
    source
        .read_int(DATE_FORMAT_KEY)
        .map(|value| MemoryStore::with_value(DATE_FORMAT_KEY, value))
        .unwrap_or_default()
}

/// Drive `future` on a current-thread runtime.
///
/// The runtime is shut down without waiting for blocking-pool work, since a
/// pending stdin read only finishes when a line arrives.
fn block_on_current_thread<F: Future>(future: F) -> anyhow::Result<F::Output> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("building runtime")?;
    let output = runtime.block_on(future);
    runtime.shutdown_background();
    Ok(output)
}

/// Repaint if anything changed since the last repaint.
fn present<S: SettingsStore>(face: &mut HostFace<S>, stdout: bool) {
    if !face.take_redraw() {
        return;
    }

    if stdout {
        println!("{}", face.preview());
    } else {
        info!(
            hour = face.text(Field::Hour),
            minute = face.text(Field::Minute),
            meridiem = face.text(Field::Meridiem),
            weekday = face.text(Field::Weekday),
            day = face.text(Field::Day),
            month = face.text(Field::Month),
            year = face.text(Field::Year),
            order = %face.date_order(),
            "Face redrawn"
        );
    }
}

/// Host event loop: one callback at a time until `interrupt` resolves.
///
/// Each line of `input` is one companion payload.
async fn run<S, R, F>(
    face: &mut HostFace<S>,
    input: R,
    interrupt: F,
    stdout: bool,
) -> anyhow::Result<()>
where
    S: SettingsStore,
    R: AsyncBufRead + Unpin,
    F: Future<Output = io::Result<()>>,
{
    let mut lines = input.lines();
    let mut input_open = true;
    let mut last_minute = None;
    tokio::pin!(interrupt);

    present(face, stdout);
    loop {
        let wait = until_next_minute(face.clock().now());
        let ticking = face.clock().is_subscribed();
        let listening = input_open && face.channel().is_open();

        tokio::select! {
            _ = tokio::time::sleep(wait), if ticking => {
                let now = face.clock().now();
                // The sleep is monotonic but the deadline came from the wall clock
                if last_minute == Some(minute_of(now)) {
                    debug!("Woke before the minute boundary");
                } else {
                    last_minute = Some(minute_of(now));
                    face.on_tick(now);
                }
            }
            line = lines.next_line(), if listening => match line {
                Ok(Some(payload)) => {
                    debug!(payload = %payload, "Companion message");
                    face.on_config_message(&payload);
                }
                Ok(None) => {
                    info!("Companion input closed");
                    input_open = false;
                }
                Err(e) => {
                    warn!(error = %e, "Reading companion input failed");
                    input_open = false;
                }
            },
            result = &mut interrupt => {
                result.context("waiting for Ctrl-C")?;
                info!("Interrupted, shutting down");
                break;
            }
        }

        present(face, stdout);
    }
    Ok(())
}

/// Main application entry point.
fn main() -> anyhow::Result<()> {
    let options = parse_args(env::args().skip(1))?;
    let config_path = options
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE));

    // Log config loading at the default level, then switch to the configured filter
    let config = tracing::subscriber::with_default(log_subscriber(env_filter("info")), || {
        Config::load_from_path(&config_path)
    });
    tracing::subscriber::set_global_default(log_subscriber(env_filter(&config.logging.filter)))
        .context("installing log subscriber")?;

    if options.init_config {
        return config.save_to_path(&config_path);
    }

    let clock = SystemClock::new(config.display.clock_style);
    let store = FileStore::open(&config.storage.path);

    if options.once {
        let mut face = ClockFace::start(clock, preview_store(&store), LineChannel::new())
            .context("starting clock face")?;
        present(&mut face, options.stdout);
        return face.shutdown().context("shutting down clock face");
    }

    let mut face = ClockFace::start(clock, store, LineChannel::new())
        .context("starting clock face")?;
    let input = BufReader::new(tokio::io::stdin());
    let outcome = block_on_current_thread(run(
        &mut face,
        input,
        tokio::signal::ctrl_c(),
        options.stdout,
    ))
    .and_then(|result| result);

    // Release host resources even if the event loop failed
    face.shutdown().context("shutting down clock face")?;
    outcome
}
