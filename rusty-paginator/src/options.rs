//! Per-session options and cleanup actions.

use std::{fmt, str::FromStr, time::Duration};

use twilight_model::id::{Id, marker::UserMarker};

use crate::{controls::Controls, error::PaginationError};

/// What happens to the message when a session ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CleanupAction {
    /// Delete the paginated message.
    #[default]
    DeleteMessage,
    /// Keep the message but remove every reaction from it.
    ClearReactions,
    /// Leave the message untouched and stop listening.
    StopListening,
}

impl FromStr for CleanupAction {
    type Err = PaginationError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "delete" | "delete-message" => Ok(Self::DeleteMessage),
            "clear" | "clear-reactions" => Ok(Self::ClearReactions),
            "none" | "stop-listening" => Ok(Self::StopListening),
            _ => Err(PaginationError::UnknownCleanupAction(raw.to_owned())),
        }
    }
}

impl fmt::Display for CleanupAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::DeleteMessage => "delete",
            Self::ClearReactions => "clear",
            Self::StopListening => "none",
        })
    }
}

/// Options for a single paginated message.
///
/// A zero `timeout` disables expiry.
#[derive(Debug, Clone, Default)]
pub struct PaginationOptions {
    pub controls: Controls,
    pub stop_action: CleanupAction,
    pub timeout_action: CleanupAction,
    pub timeout: Duration,
    /// Only this user may operate the controls when set.
    pub owner: Option<Id<UserMarker>>,
    /// Re-arm the expiry timer whenever the page changes.
    pub reset_timeout_on_input: bool,
}

impl PaginationOptions {
    pub fn owner(mut self, owner: Id<UserMarker>) -> Self {
        self.owner = Some(owner);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn stop_action(mut self, action: CleanupAction) -> Self {
        self.stop_action = action;
        self
    }

    pub fn timeout_action(mut self, action: CleanupAction) -> Self {
        self.timeout_action = action;
        self
    }

    pub fn controls(mut self, controls: Controls) -> Self {
        self.controls = controls;
        self
    }

    pub fn reset_timeout_on_input(mut self, reset: bool) -> Self {
        self.reset_timeout_on_input = reset;
        self
    }
}
