//! Terminal dashboard pairing a workspace folder tree with a drag-and-drop
//! task board.
//!
//! The board applies every move and creation immediately and rolls it back
//! if the simulated persistence call rejects it.

pub mod api;
pub mod app;
pub mod board;
pub mod config;
pub mod error;
pub mod events;
pub mod logger;
pub mod sidebar;
pub mod state;
pub mod ui;
pub mod utils;
