//! Event hub: terminal input, data-directory changes, the clock tick and
//! day rollover, all funnelled into one async channel.

use std::path::PathBuf;
use std::time::Duration;

use chrono::NaiveDate;
use crossterm::event::{Event as CrosstermEvent, EventStream, KeyEvent, KeyEventKind, MouseEvent};
use futures::StreamExt;
use notify_debouncer_mini::DebounceEventResult;
use tokio::sync::mpsc;

use training_calendar::model::{classify_changes, ReloadScope};

const WATCH_DEBOUNCE: Duration = Duration::from_millis(300);

#[derive(Debug)]
pub enum Event {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize,
    /// items or phases were rewritten on disk
    ScheduleChanged(ReloadScope),
    /// The local calendar date moved on (midnight passed).
    DateChanged(NaiveDate),
    /// Once a second, for the clock.
    Tick,
}

pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<Event>,
}

impl EventHandler {
    pub fn new(data_dir: PathBuf, watch_enabled: bool) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        tokio::spawn(forward_terminal(tx.clone()));
        tokio::spawn(run_clock(tx.clone()));

        if watch_enabled {
            let tx_watch = tx.clone();
            tokio::spawn(async move {
                if let Err(e) = run_file_watcher(data_dir, tx_watch).await {
                    tracing::error!(error = %e, "file watcher failed");
                }
            });
        }

        EventHandler { rx }
    }

    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }
}

async fn forward_terminal(tx: mpsc::UnboundedSender<Event>) {
    let mut reader = EventStream::new();
    while let Some(Ok(evt)) = reader.next().await {
        let forwarded = match evt {
            CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Event::Key(key),
            CrosstermEvent::Mouse(mouse) => Event::Mouse(mouse),
            CrosstermEvent::Resize(_, _) => Event::Resize,
            _ => continue,
        };
        if tx.send(forwarded).is_err() {
            break;
        }
    }
}

/// Tick every second; also announce a new local date when it changes.
async fn run_clock(tx: mpsc::UnboundedSender<Event>) {
    let mut interval = tokio::time::interval(Duration::from_secs(1));
    let mut today = chrono::Local::now().date_naive();
    loop {
        interval.tick().await;
        let now = chrono::Local::now().date_naive();
        if now != today {
            today = now;
            if tx.send(Event::DateChanged(now)).is_err() {
                break;
            }
        }
        if tx.send(Event::Tick).is_err() {
            break;
        }
    }
}

async fn run_file_watcher(
    data_dir: PathBuf,
    tx: mpsc::UnboundedSender<Event>,
) -> color_eyre::Result<()> {
    let (wtx, mut wrx) = mpsc::channel::<ReloadScope>(16);

    let mut debouncer = notify_debouncer_mini::new_debouncer(
        WATCH_DEBOUNCE,
        move |result: DebounceEventResult| match result {
            Ok(events) => {
                let paths: Vec<PathBuf> = events.into_iter().map(|e| e.path).collect();
                let scope = classify_changes(&paths);
                if scope != ReloadScope::Nothing {
                    let _ = wtx.blocking_send(scope);
                }
            }
            Err(e) => tracing::warn!(error = %e, "watch error"),
        },
    )?;

    // Only the top level holds schedule files.
    debouncer
        .watcher()
        .watch(&data_dir, notify::RecursiveMode::NonRecursive)?;
    tracing::info!(dir = %data_dir.display(), "watching data directory");

    while let Some(scope) = wrx.recv().await {
        if tx.send(Event::ScheduleChanged(scope)).is_err() {
            break;
        }
    }

    Ok(())
}
