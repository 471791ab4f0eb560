//! Application services for the developer roster.

mod roster;

pub use roster::{DeveloperRosterError, DeveloperRosterResult, DeveloperRosterService};
