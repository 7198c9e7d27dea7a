//! Front ends: a Ratatui terminal UI and a plain line-oriented console mode.

mod app;
pub mod console;
mod game_view;

pub use app::App;
pub use game_view::player_color;
