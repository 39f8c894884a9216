//! Terminal frontend for the omendeck draw session.

mod actions;
mod app;
mod input;
mod view;

pub use app::App;

use anyhow::{bail, Context, Result};
use crossterm::event::{self, Event as TermEvent, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::time::{Duration, Instant};

#[derive(Debug, Default, Clone)]
pub struct LaunchOptions {
    pub seed: Option<u64>,
    pub cards: Option<PathBuf>,
}

pub fn run_with_args(args: &[String]) -> Result<()> {
    let options = parse_options(args)?;
    run(options)
}

pub fn run(options: LaunchOptions) -> Result<()> {
    let cards_path = options
        .cards
        .unwrap_or_else(omendeck_data::default_cards_path);
    let mut app = App::bootstrap(cards_path, options.seed)?;

    ensure_interactive_terminal()?;
    enable_raw_mode().context("enable raw mode (omendeck-cui needs a real terminal)")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, &mut app);
    restore_terminal(&mut terminal)?;
    result
}

fn parse_options(args: &[String]) -> Result<LaunchOptions> {
    let mut options = LaunchOptions::default();
    let mut idx = 0;
    while idx < args.len() {
        match args[idx].as_str() {
            "--seed" => {
                idx += 1;
                let value = args.get(idx).context("--seed requires a number")?;
                let seed = value
                    .parse::<u64>()
                    .with_context(|| format!("invalid --seed value {value:?}"))?;
                options.seed = Some(seed);
            }
            "--cards" => {
                idx += 1;
                let value = args.get(idx).context("--cards requires a path")?;
                options.cards = Some(PathBuf::from(value));
            }
            other => bail!("unknown option {other}"),
        }
        idx += 1;
    }
    Ok(options)
}

fn run_loop(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    let tick_rate = Duration::from_millis(120);
    let mut last_tick = Instant::now();
    loop {
        terminal.draw(|frame| view::draw(frame, app))?;

        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            if let TermEvent::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    let action = input::map_key(key);
                    actions::dispatch(app, action);
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.on_tick();
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn ensure_interactive_terminal() -> Result<()> {
    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        bail!("omendeck-cui requires an interactive TTY (run directly in a terminal, not a piped/headless shell)");
    }
    Ok(())
}
