//! Application state management module.
//!
//! This module contains the core state management for the application, including:
//! - Main `State` struct that holds all application data
//! - Navigation types (View, Focus, Notice)
//! - Dialog form types
//! - State error handling

mod error;
mod form;
mod navigation;

pub use error::StateError;
pub use form::{
    FolderForm, ProjectDraft, ProjectField, ProjectForm, TaskField, TaskForm, DESCRIPTION_LIMIT,
};
pub use navigation::{Focus, Notice, NoticeKind, View};

// State struct, methods and Default impl are in state_impl.rs
#[path = "state_impl.rs"]
mod state_impl;

pub use state_impl::State;
