mod app;
mod config;
mod ui;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use app::{App, Popup};
use choices_picker::picker::FormFactor;
use config::HostConfig;

#[derive(Parser, Debug)]
#[command(name = "choices-picker")]
#[command(version)]
#[command(about = "Pick one option from a choice group or dropdown")]
struct Args {
    /// Config file to load instead of the default location
    #[arg(short = 'c', long)]
    config_file: Option<PathBuf>,

    /// Control label
    #[arg(short, long)]
    label: Option<String>,

    /// Initially selected option value
    #[arg(long, allow_hyphen_values = true)]
    value: Option<i64>,

    /// Render as dropdown (small) or choice group (large)
    #[arg(short, long, value_enum)]
    form_factor: Option<FormFactor>,

    /// Icon mapping JSON, e.g. '{"1":"Mail","2":"Phone"}'
    #[arg(short, long)]
    icons: Option<String>,

    /// Show the mask instead of the selector
    #[arg(short, long)]
    masked: bool,

    /// Render the selector disabled
    #[arg(short, long)]
    disabled: bool,

    /// Print the rendered view as JSON and exit
    #[arg(long)]
    dump: bool,
}

impl Args {
    /// Command-line flags win over the config file
    fn apply(&self, config: &mut HostConfig) {
        if let Some(label) = &self.label {
            config.label = label.clone();
        }
        if self.value.is_some() {
            config.value = self.value;
        }
        if let Some(form_factor) = self.form_factor {
            config.form_factor = form_factor;
        }
        if let Some(icons) = &self.icons {
            config.configuration = Some(icons.clone());
        }
        config.masked |= self.masked;
        config.disabled |= self.disabled;
    }
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let mut config = match &args.config_file {
        Some(path) => HostConfig::load_from(path)?,
        None => HostConfig::load()?,
    };
    args.apply(&mut config);

    let mut app = App::new(&config);

    if args.dump {
        return print_view(&mut app);
    }

    run_tui(&mut app)
}

fn print_view(app: &mut App) -> Result<()> {
    let view = app.view();
    println!("{}", serde_json::to_string_pretty(&view)?);
    Ok(())
}

fn run_tui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Some(value) = app.props.value {
        println!("{}", value);
    }

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') if app.popup == Popup::None => return Ok(()),
                        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(())
                        }
                        _ => app.handle_key(key),
                    }
                }
            }
        }

        app.tick();
    }
}
