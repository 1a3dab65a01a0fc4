//! Pure page-navigation transitions.

use crate::controls::Control;

/// What the dispatcher must do after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// The cursor moved; edit the message with the new page.
    Render,
    /// Tear the session down with its stop action.
    Terminate,
    /// Nothing changed; no edit is issued.
    Unchanged,
}

/// Result of applying a control to a cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub cursor: usize,
    pub effect: Effect,
}

impl Transition {
    /// A transition that keeps the cursor where it is.
    pub fn unchanged(cursor: usize) -> Self {
        Self {
            cursor,
            effect: Effect::Unchanged,
        }
    }
}

/// Apply `control` to a 1-based `cursor` over `total` pages.
///
/// The returned cursor is always within `[1, total]`.
pub fn transition(cursor: usize, total: usize, control: Control) -> Transition {
    let total = total.max(1);
    let cursor = cursor.clamp(1, total);

    let target = match control {
        Control::Stop => {
            return Transition {
                cursor,
                effect: Effect::Terminate,
            };
        }
        Control::First => 1,
        Control::Previous => cursor.saturating_sub(1).max(1),
        Control::Next => (cursor + 1).min(total),
        Control::Last => total,
    };

    if target == cursor {
        Transition::unchanged(cursor)
    } else {
        Transition {
            cursor: target,
            effect: Effect::Render,
        }
    }
}
