//! # Connect Four
//!
//! A two-player Connect Four game: coins drop to the lowest free cell of a
//! 6x7 grid and four in a row (horizontal, vertical or diagonal) wins.
//! Games can be saved to and resumed from plain-text files, and are played
//! in a terminal UI built with Ratatui or a line-oriented console mode.
//!
//! ## Modules
//!
//! - [`game`]: Board, players and the turn controller
//! - [`persist`]: Save file codec and file-backed save store
//! - [`ui`]: Terminal UI and console front ends
//! - [`config`]: TOML configuration loading and validation
//! - [`logging`]: Tracing subscriber setup
//! - [`error`]: Structured error types

pub mod config;
pub mod error;
pub mod game;
pub mod logging;
pub mod persist;
pub mod ui;
