//! Interactive terminal session hosting the controller and the map view.

use std::io::Write;
use std::sync::Arc;

use anyhow::{Context, Result};
use log::{debug, info, warn};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::UnboundedReceiver;

use crate::app::command::{parse_command, Command, HELP};
use crate::app::render::{render_card, render_history, render_map, render_notification};
use crate::config::Config;
use crate::controller::{ControllerEvent, LookupStats, QueryController};
use crate::geolocation::{init_provider, GeoProvider};
use crate::initialization::init_client;
use crate::map::{MapProps, MapView};
use crate::storage::{JsonFileStore, KeyValueStore};

/// How the session gets its queries.
#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    /// Submitted in order right after the initial self lookup.
    pub queries: Vec<String>,
    /// Skip stdin and exit once every lookup has resolved.
    pub once: bool,
}

/// Summary of a finished session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionReport {
    /// Lookups dispatched, including the initial self lookup
    pub lookups_issued: usize,
    /// Lookups whose record was shown
    pub lookups_succeeded: usize,
    /// Lookups that produced an error toast
    pub lookups_failed: usize,
    /// Successful lookups dropped as stale
    pub lookups_discarded: usize,
    /// Submissions rejected before any lookup
    pub validation_rejections: usize,
}

impl From<LookupStats> for SessionReport {
    fn from(stats: LookupStats) -> Self {
        Self {
            lookups_issued: stats.issued,
            lookups_succeeded: stats.succeeded,
            lookups_failed: stats.failed,
            lookups_discarded: stats.discarded,
            validation_rejections: stats.rejected,
        }
    }
}

/// Runs a session against stdin/stdout.
///
/// Builds the HTTP client, provider and file store from `config`, resolves
/// the caller's own address, submits `options.queries` and then reads
/// commands until `:quit` or end of input.
///
/// # Errors
///
/// Returns an error if the HTTP client or provider cannot be built, or if
/// writing to stdout or reading stdin fails. Lookup failures are reported as
/// toasts and counted in the report, never returned.
pub async fn run_session(config: Config, options: SessionOptions) -> Result<SessionReport> {
    let client = init_client(&config).context("Failed to initialize HTTP client")?;
    let provider =
        init_provider(&config, client).context("Failed to initialize geolocation provider")?;

    let store: Arc<dyn KeyValueStore> = match JsonFileStore::open(&config.store_path) {
        Ok(store) => Arc::new(store),
        Err(e) => {
            warn!(
                "Ignoring unreadable store {}: {e}",
                config.store_path.display()
            );
            Arc::new(JsonFileStore::empty(&config.store_path))
        }
    };
    info!("Using store at {}", config.store_path.display());

    let (controller, mut events) = QueryController::new(provider, store, &config);
    let input = if options.once {
        None
    } else {
        Some(BufReader::new(tokio::io::stdin()))
    };

    let mut stdout = std::io::stdout();
    drive(&controller, &mut events, input, &options.queries, &mut stdout).await?;

    Ok(SessionReport::from(controller.stats()))
}

/// Runs the event loop until the input is exhausted and no lookup is pending,
/// or until `:quit`.
///
/// With `input` set to `None` the loop ends as soon as the initial lookup and
/// every query in `queries` have resolved.
pub async fn drive<P, R, W>(
    controller: &QueryController<P>,
    events: &mut UnboundedReceiver<ControllerEvent>,
    input: Option<R>,
    queries: &[String],
    out: &mut W,
) -> Result<()>
where
    P: GeoProvider,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut view = MapView::new();
    let mut lines = input;
    let mut pending = Vec::new();

    controller.initial_load();
    for query in queries {
        controller.submit(query);
    }

    loop {
        tokio::select! {
            line = next_line(&mut lines, &mut pending) => {
                match line.context("Failed to read input")? {
                    Some(line) => {
                        if !handle_command(controller, &line, out)? {
                            debug!("Quit requested");
                            break;
                        }
                    }
                    None => {
                        debug!("End of input");
                        lines = None;
                        if !controller.is_loading() {
                            break;
                        }
                    }
                }
            }
            event = events.recv() => {
                let Some(event) = event else { break };
                let settled = matches!(event, ControllerEvent::LoadingChanged(false));
                handle_event(controller, &mut view, event, out)?;
                if settled && lines.is_none() && !controller.is_loading() {
                    break;
                }
            }
        }
    }

    // Toasts and records queued alongside the final loading change
    while let Ok(event) = events.try_recv() {
        handle_event(controller, &mut view, event, out)?;
    }
    out.flush()?;
    Ok(())
}

/// Reads one line, replacing invalid UTF-8 so it reaches validation as text.
///
/// Bytes read before a cancellation stay in `pending` and are completed by
/// the next call.
async fn next_line<R>(
    reader: &mut Option<R>,
    pending: &mut Vec<u8>,
) -> std::io::Result<Option<String>>
where
    R: AsyncBufRead + Unpin,
{
    let Some(reader) = reader else {
        return std::future::pending().await;
    };
    reader.read_until(b'\n', pending).await?;
    if pending.is_empty() {
        return Ok(None);
    }
    let line = match std::str::from_utf8(pending) {
        Ok(text) => text.to_string(),
        Err(e) => {
            warn!("Input line is not valid UTF-8: {e}");
            String::from_utf8_lossy(pending).into_owned()
        }
    };
    pending.clear();
    Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
}

/// Returns `false` when the session should end.
fn handle_command<P, W>(controller: &QueryController<P>, line: &str, out: &mut W) -> Result<bool>
where
    P: GeoProvider,
    W: Write,
{
    match parse_command(line) {
        Command::Submit(query) => {
            controller.set_input(&query);
            controller.submit(&query);
        }
        Command::ToggleTheme => {
            controller.toggle_theme();
        }
        Command::ClearHistory => controller.clear_history(),
        Command::ShowHistory => writeln!(out, "{}", render_history(&controller.history()))?,
        Command::Help => writeln!(out, "{HELP}")?,
        Command::Quit => return Ok(false),
    }
    Ok(true)
}

fn handle_event<P, W>(
    controller: &QueryController<P>,
    view: &mut MapView,
    event: ControllerEvent,
    out: &mut W,
) -> Result<()>
where
    P: GeoProvider,
    W: Write,
{
    match event {
        ControllerEvent::Notify(notification) => {
            writeln!(out, "{}", render_notification(&notification))?;
        }
        ControllerEvent::LocationChanged(record) => {
            // Render the record this event carries even if a newer one landed since
            let mut snapshot = controller.snapshot();
            snapshot.record = record;
            writeln!(out, "{}", render_card(&snapshot))?;
            if let Some(frame) = view.render(&MapProps::from_snapshot(&snapshot)) {
                writeln!(out, "{}", render_map(&frame, snapshot.theme))?;
            }
        }
        ControllerEvent::ThemeChanged(theme) => {
            writeln!(out, "Theme: {theme}")?;
            let snapshot = controller.snapshot();
            if let Some(frame) = view.render(&MapProps::from_snapshot(&snapshot)) {
                writeln!(out, "{}", render_map(&frame, theme))?;
            }
        }
        ControllerEvent::HistoryChanged(entries) => {
            debug!("History now holds {} entries", entries.len());
        }
        ControllerEvent::LoadingChanged(loading) => debug!("Loading: {loading}"),
        ControllerEvent::PulseEnded => {}
    }
    Ok(())
}
