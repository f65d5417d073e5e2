//! Event handling module.
//!
//! This module contains handlers for different types of events:
//! - Network events: workspace API calls and mutation confirmations
//! - Terminal events: keyboard, mouse and tick events

pub mod network;
pub mod terminal;
