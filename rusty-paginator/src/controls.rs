//! Reaction buttons and their mapping to navigation controls.

use std::fmt;

use twilight_http::request::channel::reaction::RequestReactionType;
use twilight_model::{
    channel::message::EmojiReactionType,
    id::{Id, marker::EmojiMarker},
};

const VARIATION_SELECTOR: char = '\u{fe0f}';

/// Emoji identity of a reaction button.
///
/// Unicode buttons compare equal with or without a trailing variation
/// selector, since Discord may echo either form. Custom emoji compare by id.
#[derive(Debug, Clone)]
pub enum ReactionButton {
    Unicode(String),
    Custom {
        id: Id<EmojiMarker>,
        name: Option<String>,
    },
}

impl ReactionButton {
    pub fn unicode(name: impl Into<String>) -> Self {
        Self::Unicode(name.into())
    }

    pub fn custom(id: Id<EmojiMarker>, name: Option<String>) -> Self {
        Self::Custom { id, name }
    }

    /// Borrow this button as an HTTP reaction request value.
    pub fn as_request(&self) -> RequestReactionType<'_> {
        match self {
            Self::Unicode(name) => RequestReactionType::Unicode { name },
            Self::Custom { id, name } => RequestReactionType::Custom {
                id: *id,
                name: name.as_deref(),
            },
        }
    }
}

impl PartialEq for ReactionButton {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Unicode(left), Self::Unicode(right)) => {
                left.trim_end_matches(VARIATION_SELECTOR)
                    == right.trim_end_matches(VARIATION_SELECTOR)
            }
            (Self::Custom { id: left, .. }, Self::Custom { id: right, .. }) => left == right,
            _ => false,
        }
    }
}

impl Eq for ReactionButton {}

impl From<&EmojiReactionType> for ReactionButton {
    fn from(emoji: &EmojiReactionType) -> Self {
        match emoji {
            EmojiReactionType::Unicode { name } => Self::Unicode(name.clone()),
            EmojiReactionType::Custom { id, name, .. } => Self::Custom {
                id: *id,
                name: name.clone(),
            },
        }
    }
}

impl fmt::Display for ReactionButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unicode(name) => f.write_str(name),
            Self::Custom { id, name } => {
                write!(f, "<:{}:{}>", name.as_deref().unwrap_or("_"), id)
            }
        }
    }
}

/// Logical navigation controls of a paginated message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    First,
    Previous,
    Next,
    Last,
    Stop,
}

impl Control {
    /// Seeding order of the buttons under a paginated message.
    pub const ALL: [Control; 5] = [
        Control::First,
        Control::Previous,
        Control::Next,
        Control::Last,
        Control::Stop,
    ];
}

/// Concrete buttons bound to each control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Controls {
    pub first: ReactionButton,
    pub previous: ReactionButton,
    pub next: ReactionButton,
    pub last: ReactionButton,
    pub stop: ReactionButton,
}

impl Default for Controls {
    fn default() -> Self {
        Self {
            first: ReactionButton::unicode("⏮"),
            previous: ReactionButton::unicode("◀"),
            next: ReactionButton::unicode("▶"),
            last: ReactionButton::unicode("⏭"),
            stop: ReactionButton::unicode("⏹"),
        }
    }
}

impl Controls {
    pub fn button(&self, control: Control) -> &ReactionButton {
        match control {
            Control::First => &self.first,
            Control::Previous => &self.previous,
            Control::Next => &self.next,
            Control::Last => &self.last,
            Control::Stop => &self.stop,
        }
    }

    /// Map a pressed button to its control; unknown buttons yield `None`.
    pub fn resolve(&self, button: &ReactionButton) -> Option<Control> {
        Control::ALL
            .into_iter()
            .find(|control| self.button(*control) == button)
    }

    /// Buttons in the order they are added under the message.
    pub fn buttons(&self) -> impl Iterator<Item = &ReactionButton> {
        Control::ALL.into_iter().map(|control| self.button(control))
    }
}
