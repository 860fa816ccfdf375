use std::fs::File;
use std::io::stdout;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, enable_raw_mode},
};
use log::{error, info};
use ratatui::{Terminal, backend::CrosstermBackend};
use simplelog::{Config, LevelFilter, WriteLogger};

use pagebar::demo_app::{App, run_app};
use pagebar::demo_doc::DemoDocument;
use pagebar::event_source::KeyboardEventSource;
use pagebar::panic_handler;
use pagebar::settings::Settings;
use pagebar::theme::palette_by_name;

#[derive(Parser, Debug)]
#[command(
    name = "pagebar",
    about = "Page-number indicator demo over a synthetic document"
)]
struct Args {
    /// Total number of pages in the synthetic document
    #[arg(long, default_value_t = 48)]
    pages: usize,

    /// Pages of roman-numeral front matter
    #[arg(long = "front-matter", default_value_t = 4)]
    front_matter: usize,

    /// Log file path
    #[arg(long, default_value = "pagebar.log")]
    log_file: PathBuf,

    /// Alternate config file (default: the platform config directory)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    panic_handler::initialize_panic_handler();
    WriteLogger::init(
        LevelFilter::Debug,
        Config::default(),
        File::create(&args.log_file)?,
    )?;
    info!("starting pagebar demo");

    let settings = match &args.config {
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    };
    let palette = palette_by_name(&settings.theme);

    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;

    let doc = DemoDocument::new("The Synthetic Folio", args.pages, args.front_matter);
    let mut app = App::new(doc, palette);
    let mut events = KeyboardEventSource;
    let res = run_app(
        &mut terminal,
        &mut app,
        &mut events,
        Duration::from_millis(settings.tick_rate_ms),
    );

    panic_handler::restore_terminal();

    if let Err(err) = res {
        error!("application error: {err:?}");
        return Err(err);
    }

    info!("shutting down");
    Ok(())
}
