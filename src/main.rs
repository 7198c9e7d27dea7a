use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use connect_four::config::AppConfig;
use connect_four::game::Game;
use connect_four::logging;
use connect_four::persist::{self, SaveStore};
use connect_four::ui::{console, App};

/// Two-player Connect Four in the terminal.
#[derive(Parser)]
#[command(name = "connect-four", about = "Play Connect Four in the terminal")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "connect-four.toml")]
    config: PathBuf,

    /// Resume the saved game with this name
    #[arg(long, conflicts_with_all = ["list", "remove"], value_parser = parse_game_name)]
    load: Option<String>,

    /// Name to save a new game under
    #[arg(long, default_value = "game", value_parser = parse_game_name)]
    name: String,

    /// Print the names of saved games and exit
    #[arg(long)]
    list: bool,

    /// Delete the saved game with this name and exit
    #[arg(long, value_parser = parse_game_name)]
    remove: Option<String>,

    /// Play in the plain console instead of the full-screen UI
    #[arg(long)]
    text: bool,
}

fn parse_game_name(name: &str) -> std::result::Result<String, String> {
    persist::validate_name(name)
        .map(|()| name.to_string())
        .map_err(|e| e.to_string())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;
    logging::init(&config.log).context("opening log file")?;

    let store = config.store();
    let roster = config.roster();

    if cli.list {
        for name in store.list().context("listing saved games")? {
            println!("{name}");
        }
        return Ok(());
    }
    if let Some(name) = &cli.remove {
        store
            .remove(name)
            .with_context(|| format!("removing saved game '{name}'"))?;
        println!("Removed '{name}'");
        return Ok(());
    }

    let mut game = match &cli.load {
        Some(name) => {
            let saved = store
                .load(name, &roster)
                .with_context(|| format!("loading saved game '{name}'"))?;
            Game::from_saved(roster, saved)
        }
        None => {
            let mut game = Game::new(roster);
            game.set_name(cli.name.clone());
            game
        }
    };

    if cli.text {
        let stdin = io::stdin();
        console::run(&mut game, &store, &cli.name, stdin.lock(), io::stdout())?;
        return Ok(());
    }

    let mut app = App::new(game, Box::new(store), cli.name);
    run_tui(&mut app)?;
    Ok(())
}

fn run_tui(app: &mut App) -> io::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = app.run(&mut terminal);

    // Restore terminal, even on error
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    res
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_rejects_unloadable_game_names() {
        for flag in ["--name", "--load", "--remove"] {
            for name in ["", " padded", "two\nlines"] {
                assert!(
                    Cli::try_parse_from(["connect-four", flag, name]).is_err(),
                    "{flag} {name:?} was accepted"
                );
            }
        }
        let cli = Cli::try_parse_from(["connect-four", "--name", "friday night"]).unwrap();
        assert_eq!(cli.name, "friday night");
    }
}
