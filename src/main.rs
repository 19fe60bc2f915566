mod app;
mod event;
mod theme;

use std::io::stdout;
use std::path::PathBuf;

use clap::Parser;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};

use training_calendar::calendar::{DateGridBuilder, MultiMonthComposer, NavigationState};
use training_calendar::model::{CalendarMonth, MonthsToShow, WeekStart};
use training_calendar::store::FileStore;

/// Training Calendar: month grids with training phases and scheduled sessions.
#[derive(Parser, Debug)]
#[command(name = "training-calendar", version, about)]
struct Cli {
    /// Directory holding items.json and phases.json
    #[arg(long, default_value = "./training-data")]
    data_dir: PathBuf,

    /// First month to show (YYYY-MM); defaults to the current month
    #[arg(long)]
    month: Option<String>,

    /// Number of months shown side by side (clamped to 1..=3)
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    months: i64,

    /// First column of each week
    #[arg(long, value_enum, default_value_t = WeekStart::Sunday)]
    week_start: WeekStart,

    /// Disable file watching (static mode)
    #[arg(long)]
    no_watch: bool,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    // Set up logging to file (we own the terminal)
    let log_dir = std::env::var("TRAINING_CALENDAR_LOG_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| std::env::temp_dir().join("training-calendar"));
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = tracing_appender::rolling::daily(&log_dir, "calendar.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("training_calendar=info".parse()?),
        )
        .init();

    let store = FileStore::create(&cli.data_dir)?;

    let reference_month = match cli.month.as_deref() {
        Some(text) => CalendarMonth::parse(text)?,
        None => CalendarMonth::containing(chrono::Local::now().date_naive()),
    };
    let months_to_show = MonthsToShow::clamped(cli.months);
    if months_to_show.count() as i64 != cli.months {
        tracing::warn!(requested = cli.months, showing = months_to_show.count(), "month count clamped");
    }

    tracing::info!(
        data_dir = %cli.data_dir.display(),
        month = %reference_month,
        months = months_to_show.count(),
        "starting training calendar"
    );

    let nav = NavigationState::new(reference_month, months_to_show);
    let composer = MultiMonthComposer::new(DateGridBuilder::new(cli.week_start));

    // Install panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = execute!(stdout(), LeaveAlternateScreen, DisableMouseCapture);
        ratatui::restore();
        original_hook(panic_info);
    }));

    execute!(stdout(), EnterAlternateScreen, EnableMouseCapture)?;
    let mut terminal = ratatui::init();

    let mut app = app::App::new(store, nav, composer, cli.no_watch);
    let result = app.run(&mut terminal, cli.data_dir).await;

    execute!(stdout(), LeaveAlternateScreen, DisableMouseCapture)?;
    ratatui::restore();

    result
}
