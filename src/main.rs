//! InternMatch - terminal front end for internship recommendations
//!
//! Without a subcommand this opens the interactive form. `recommend` sends a
//! single request from flags and prints the cards.

use anyhow::Context;
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::Rect,
    Terminal,
};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use internmatch::application::{log_command_error, App, Command, ErrorSurface};
use internmatch::infrastructure::logging::{init_cli_logger, init_file_logger};
use internmatch::infrastructure::{AppConfig, Cli, CliCommand, FileRepository, HttpRecommendationClient};
use internmatch::presentation::{html, render_ui, InputHandler};

/// How often the screen is redrawn while idle, so cards keep revealing.
const TICK: Duration = Duration::from_millis(50);

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let config = AppConfig::resolve(&cli).context("failed to load configuration")?;
    let client = HttpRecommendationClient::new(config.server.base_url.clone())
        .context("failed to build HTTP client")?;

    match cli.command.clone() {
        Some(CliCommand::Recommend {
            education,
            sector,
            location,
            skills,
            html: export,
        }) => {
            init_cli_logger(&config.logging.level, cli.verbose);
            let form = FormInput {
                education,
                sector,
                location,
                skills,
            };
            run_headless(&config, &client, form, export)
        }
        None => {
            init_file_logger(&config.logging.file, &config.logging.level, cli.verbose).with_context(|| {
                format!("cannot open log file {}", config.logging.file.display())
            })?;
            run_terminal(&config, &client)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

struct FormInput {
    education: String,
    sector: String,
    location: String,
    skills: Vec<String>,
}

/// Drives the same form controller from flags. A failed submit has already
/// been reported through the alert fallback, so it only sets the exit code.
fn run_headless(
    config: &AppConfig,
    client: &HttpRecommendationClient,
    form: FormInput,
    export: Option<PathBuf>,
) -> anyhow::Result<ExitCode> {
    let mut app = App::new(&config.form, ErrorSurface::alert_only());

    let fields = [
        Command::SetEducation(form.education),
        Command::SetSector(form.sector),
        Command::SetLocation(form.location),
    ];
    for command in fields.into_iter().chain(form.skills.into_iter().map(Command::AddSkill)) {
        app.dispatch(command, client)?;
    }

    if app.submit(client).is_err() {
        return Ok(ExitCode::FAILURE);
    }

    println!("{}", app.results.subtitle);
    for card in &app.results.cards {
        println!();
        println!("{}. {} ({}% Match)", card.index + 1, card.title, card.match_percentage);
        println!("   {}", card.company);
        println!(
            "   {} | {} | {} | {}",
            card.sector, card.location, card.duration, card.stipend
        );
        if !card.description.is_empty() {
            println!("   {}", card.description);
        }
        println!("   Skills Required: {}", card.skills_required.join(", "));
        println!(
            "   {} {}   {}",
            card.stars, card.rating_label, card.opportunities_label
        );
    }

    if let Some(path) = export {
        let document = html::results_document(&app.results, app.selection.skills());
        let written = FileRepository::save_results_html(&document, &path).map_err(anyhow::Error::msg)?;
        println!();
        println!("Exported to {}", written);
    }

    Ok(ExitCode::SUCCESS)
}

fn run_terminal(config: &AppConfig, client: &HttpRecommendationClient) -> anyhow::Result<()> {
    let mut app = App::new(&config.form, ErrorSurface::with_modal());
    if config.server.load_catalog {
        app.load_catalog(client);
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    tracing::info!(base_url = client.base_url(), "form opened");
    let res = run_app(&mut terminal, &mut app, client);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res.context("terminal error")
}

/// Main event loop. Runs until Ctrl+Q or Ctrl+C.
fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    client: &HttpRecommendationClient,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| render_ui(f, app))?;

        if !event::poll(TICK)? {
            continue;
        }

        let commands = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if key.modifiers.contains(KeyModifiers::CONTROL)
                    && matches!(key.code, KeyCode::Char('q') | KeyCode::Char('c'))
                {
                    return Ok(());
                }
                InputHandler::handle_key_event(app, key.code, key.modifiers)
            }
            Event::Mouse(mouse) => {
                let size = terminal.size()?;
                let screen = Rect::new(0, 0, size.width, size.height);
                InputHandler::handle_mouse_event(app, mouse, screen)
            }
            _ => Vec::new(),
        };

        for command in commands {
            let outcome = match command {
                // paint the spinner before the blocking request goes out
                Command::Submit => app
                    .submit_observed(client, |during| {
                        let _ = terminal.draw(|f| render_ui(f, during));
                    })
                    .map(|_| ()),
                other => app.dispatch(other, client),
            };
            if let Err(err) = outcome {
                log_command_error(&err);
            }
        }
    }
}
