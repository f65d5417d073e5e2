//! Helper utilities.

pub mod assignees;
pub mod ids;
