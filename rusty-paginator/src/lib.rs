//! Reaction-driven pagination for twilight bots.
//!
//! A [`Paginator`] sends a multi-page embed, seeds it with navigation
//! reactions and keeps one [`Session`] per message in a [`SessionRegistry`].
//! The bot's gateway loop feeds every reaction-added event to
//! [`Paginator::handle_reaction`], which checks ownership, moves the cursor
//! and edits, deletes or clears the message.

/// Reaction buttons and the controls they map to.
pub mod controls;
/// Reaction-event routing.
pub mod dispatch;
/// Library error type.
pub mod error;
mod expiry;
/// Pure cursor transitions.
pub mod navigation;
/// Per-session options and cleanup actions.
pub mod options;
/// Page contents and the page store.
pub mod page;
mod paginator;
/// Active session registry.
pub mod registry;
/// Session state.
pub mod session;
/// Outbound chat operations.
pub mod transport;

pub use controls::{Control, Controls, ReactionButton};
pub use dispatch::{DispatchOutcome, DropReason, ReactionEvent};
pub use error::PaginationError;
pub use navigation::{Effect, Transition, transition};
pub use options::{CleanupAction, PaginationOptions};
pub use page::{Page, PageField, PageStore, pages_from_items};
pub use paginator::Paginator;
pub use registry::SessionRegistry;
pub use session::{Session, SessionView};
pub use transport::{MessageHandle, PaginationTransport};
