use crate::error::MoveError;
use crate::game::{Game, Outcome, Phase, COLS};
use crate::persist::SaveStore;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use tracing::warn;

pub struct App {
    game: Game,
    store: Box<dyn SaveStore>,
    save_name: String,
    selected_column: usize,
    should_quit: bool,
    message: Option<String>,
}

impl App {
    pub fn new(game: Game, store: Box<dyn SaveStore>, save_name: impl Into<String>) -> Self {
        App {
            game,
            store,
            save_name: save_name.into(),
            selected_column: COLS / 2, // Start in middle
            should_quit: false,
            message: None,
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Main application loop
    pub fn run(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> io::Result<()> {
        loop {
            terminal
                .draw(|f| self.render(f))
                .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;

            if self.should_quit {
                break;
            }

            self.handle_events()?;
        }
        Ok(())
    }

    /// Handle keyboard events
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key);
                }
            }
        }
        Ok(())
    }

    /// Handle key press
    fn handle_key(&mut self, key: KeyEvent) {
        // Clear message on any key press
        self.message = None;

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Left => {
                self.selected_column = self.selected_column.saturating_sub(1);
            }
            KeyCode::Right => {
                if self.selected_column + 1 < COLS {
                    self.selected_column += 1;
                }
            }
            KeyCode::Char(c @ '1'..='7') => {
                self.selected_column = c as usize - '1' as usize;
                self.drop_piece();
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.drop_piece();
            }
            KeyCode::Char('s') => {
                self.save();
            }
            KeyCode::Char('r') => {
                self.game.restart();
                self.selected_column = COLS / 2;
                self.message = Some("New game started!".to_string());
            }
            _ => {}
        }
    }

    /// Drop piece in selected column
    fn drop_piece(&mut self) {
        match self.game.play(self.selected_column) {
            Ok(turn) => {
                let roster = self.game.roster();
                self.message = match turn.phase {
                    Phase::Finished(Outcome::Winner(player)) => {
                        Some(format!("{} wins! Press 'r' to restart.", roster.name(player)))
                    }
                    Phase::Finished(Outcome::Draw) => {
                        Some("It's a draw! Press 'r' to restart.".to_string())
                    }
                    Phase::AwaitingMove => None,
                };
            }
            Err(MoveError::ColumnFull(_)) => {
                self.message = Some("Column is full!".to_string());
            }
            Err(MoveError::InvalidColumn(_)) => {
                self.message = Some("Invalid column!".to_string());
            }
            Err(MoveError::GameOver) => {
                self.message = Some("Game over! Press 'r' to restart.".to_string());
            }
        }
    }

    fn save(&mut self) {
        let name = self.game.name().unwrap_or(&self.save_name).to_string();
        let saved = self.game.snapshot();
        self.message = Some(match self.store.save(&name, &saved, self.game.roster()) {
            Ok(()) => {
                self.game.set_name(name.clone());
                format!("Saved as '{name}'")
            }
            Err(e) => {
                warn!(error = %e, "save failed");
                format!("Save failed: {e}")
            }
        });
    }

    /// Render the UI
    fn render(&self, frame: &mut ratatui::Frame) {
        super::game_view::render(frame, &self.game, self.selected_column, &self.message);
    }
}
