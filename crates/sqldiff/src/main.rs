//! sqldiff CLI - side-by-side SQL dialect diff viewer

mod app;
mod catalog;
mod clipboard;
mod color;
mod config;
mod editor;
mod print;
mod syntax;
mod ui;
mod views;

use anyhow::{Context, Result};
use app::App;
use catalog::Catalog;
use clap::Parser;
use config::{Config, State, ThemeMode};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use print::PrintOptions;
use ratatui::prelude::*;
use sqldiff_core::{align, is_equivalent, Comparison, DiffEngine};
use std::fs::File;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter
const LOG_ENV: &str = "SQLDIFF_LOG";

#[derive(Parser, Debug)]
#[command(name = "sqldiff")]
#[command(author, version, about = "Side-by-side diff viewer for SQL dialect translations")]
struct Args {
    /// SQL files to compare: source_file target_file
    #[arg(num_args = 0..)]
    paths: Vec<PathBuf>,

    /// Comparison catalog (TOML) for the table view
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Print the side-by-side diff to stdout instead of opening the TUI
    #[arg(long)]
    print: bool,

    /// Print the aligned rows and stats as JSON
    #[arg(long, conflicts_with = "print")]
    json: bool,

    /// Output width for --print (default: terminal width or 120)
    #[arg(long)]
    width: Option<usize>,

    /// With --print/--json, exit with status 1 when the inputs differ
    #[arg(long)]
    exit_code: bool,

    /// Theme mode: dark or light
    #[arg(long, value_enum)]
    theme_mode: Option<CliThemeMode>,

    /// Write logs to this file (TUI mode); filter with SQLDIFF_LOG
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum CliThemeMode {
    Dark,
    Light,
}

impl From<CliThemeMode> for ThemeMode {
    fn from(mode: CliThemeMode) -> Self {
        match mode {
            CliThemeMode::Dark => ThemeMode::Dark,
            CliThemeMode::Light => ThemeMode::Light,
        }
    }
}

/// Input mode detected from arguments
enum InputMode {
    /// Two SQL files
    Pair { source: PathBuf, target: PathBuf },
    /// Table of comparisons from a catalog
    Catalog,
}

impl InputMode {
    fn from_args(args: &Args) -> Result<Self> {
        match args.paths.as_slice() {
            [] => Ok(InputMode::Catalog),
            [source, target] => Ok(InputMode::Pair {
                source: source.clone(),
                target: target.clone(),
            }),
            _ => anyhow::bail!(
                "Usage: sqldiff <source_file> <target_file>\n\
                 \n\
                 Or run without arguments to browse the comparison catalog."
            ),
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let batch = args.print || args.json;
    init_logging(&args, batch)?;

    let config = Config::load();
    let mode = InputMode::from_args(&args)?;

    let (catalog, paths) = match mode {
        InputMode::Pair { source, target } => {
            let source_text = read_sql(&source)?;
            let target_text = read_sql(&target)?;
            let name = format!("{} vs {}", display_name(&source), display_name(&target));
            (
                Catalog::from_pair(name, source_text, target_text),
                Some((source, target)),
            )
        }
        InputMode::Catalog => {
            let catalog = match args.catalog.as_ref().or(config.catalog.as_ref()) {
                Some(path) => Catalog::load(path)
                    .with_context(|| format!("Failed to load catalog: {}", path.display()))?,
                None => Catalog::builtin(),
            };
            (catalog, None)
        }
    };

    if batch {
        let differs = run_batch(&args, &config, &catalog)?;
        if args.exit_code && differs {
            std::process::exit(1);
        }
        return Ok(());
    }

    run_tui(args, config, catalog, paths)
}

fn init_logging(args: &Args, batch: bool) -> Result<()> {
    let default_level = if batch { "warn" } else { "info" };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));

    match &args.log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file: {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .init();
        }
        // stderr would corrupt the alternate screen
        None if !batch => {}
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::stderr)
                .init();
        }
    }
    Ok(())
}

fn read_sql(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read: {}", path.display()))
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// `--print` / `--json`; returns whether any comparison has line changes
fn run_batch(args: &Args, config: &Config, catalog: &Catalog) -> Result<bool> {
    let stdout = io::stdout();
    let is_tty = stdout.is_terminal();
    let width = args
        .width
        .or_else(|| {
            is_tty
                .then(crossterm::terminal::size)
                .and_then(|size| size.ok())
                .map(|(cols, _)| cols as usize)
        })
        .unwrap_or(print::DEFAULT_WIDTH);
    let opts = PrintOptions {
        width,
        color: is_tty,
        line_numbers: config.ui.line_numbers,
    };

    let engine = DiffEngine::new();
    let single = catalog.len() == 1;
    let mut differs = false;

    for comparison in catalog.comparisons() {
        let diff = engine.diff_strings(&comparison.source, &comparison.target);
        let alignment = align(&diff.segments);
        let equivalent = is_equivalent(&comparison.source, &comparison.target);
        differs |= diff.has_changes();
        tracing::debug!(id = comparison.id, rows = alignment.len(), "rendering comparison");

        if args.json {
            let json = print::render_json(&alignment, &diff.stats, equivalent)
                .context("Failed to serialize diff")?;
            println!("{json}");
        } else {
            if !single {
                println!("{}", heading(comparison, equivalent));
            }
            print!("{}", print::render(&alignment, &diff.stats, &opts));
            if !single {
                println!();
            }
        }
    }

    Ok(differs)
}

fn heading(comparison: &Comparison, equivalent: bool) -> String {
    let status = if equivalent { "match" } else { "differs" };
    format!("#{} {} ({})", comparison.id, comparison.name, status)
}

fn run_tui(
    args: Args,
    config: Config,
    catalog: Catalog,
    paths: Option<(PathBuf, PathBuf)>,
) -> Result<()> {
    let open_diff = paths.is_some();

    let mut app = App::new(catalog);
    app.line_numbers = config.ui.line_numbers;
    app.source_label = config.ui.source_label.clone();
    app.target_label = config.ui.target_label.clone();
    app.export = config.export.clone();
    if let Some((source, target)) = paths {
        app.source_path = Some(source);
        app.target_path = Some(target);
    }
    app.persist_theme = true;
    app.set_syntax_enabled(config.ui.syntax);

    // CLI flag > persisted toggle > config > dark
    let theme_mode = args
        .theme_mode
        .map(ThemeMode::from)
        .or(State::load().theme_mode)
        .or(config.ui.theme_mode)
        .unwrap_or(ThemeMode::Dark);
    app.set_theme(config.ui.theme, theme_mode);

    if open_diff {
        app.open_selected();
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("Error: {}", err);
        return Err(err);
    }

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    let tick_rate = Duration::from_millis(250);

    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(tick_rate)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                Event::Mouse(me) => app.handle_mouse(me),
                _ => {}
            }
        }

        app.tick();

        if app.should_quit {
            return Ok(());
        }
    }
}
