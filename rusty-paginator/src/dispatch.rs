//! Reaction-event handling for paginated messages.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, warn};
use twilight_model::{
    channel::message::embed::Embed,
    gateway::GatewayReaction,
    id::{Id, marker::UserMarker},
};

use crate::{
    controls::ReactionButton,
    navigation::{Effect, Transition, transition},
    paginator::Paginator,
    session::Session,
    transport::{MessageHandle, PaginationTransport},
};

/// A reaction-added notification, reduced to what navigation needs.
#[derive(Debug, Clone)]
pub struct ReactionEvent {
    /// Target message; `None` when the transport could not resolve it.
    pub message: Option<MessageHandle>,
    pub button: ReactionButton,
    /// Acting user; `None` when the transport could not resolve it.
    pub user_id: Option<Id<UserMarker>>,
}

impl From<&GatewayReaction> for ReactionEvent {
    fn from(reaction: &GatewayReaction) -> Self {
        Self {
            message: Some(MessageHandle::new(
                reaction.channel_id,
                reaction.message_id,
            )),
            button: ReactionButton::from(&reaction.emoji),
            user_id: Some(reaction.user_id),
        }
    }
}

/// Why a reaction event was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    UnresolvedMessage,
    UnknownUser,
    NotPaginated,
    OwnReaction,
}

/// Outcome of dispatching one reaction event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The event did not concern an active session.
    Dropped(DropReason),
    /// A non-owner reacted; their reaction is being removed.
    Denied,
    /// The cursor moved and the message is re-rendered.
    Navigated { page: usize },
    /// The button had no effect on the cursor (edge of range or unknown button).
    Unchanged { page: usize },
    /// The session was ended by its stop button.
    Stopped,
}

enum Decision {
    OwnReaction,
    Denied,
    Render {
        page: usize,
        render_lock: Arc<Mutex<()>>,
    },
    Unchanged {
        page: usize,
    },
    Terminate,
}

impl<T: PaginationTransport> Paginator<T> {
    /// Route one reaction-added event.
    ///
    /// Never fails: transport errors during navigation are logged and
    /// swallowed because the session state is already committed.
    pub async fn handle_reaction(&self, event: ReactionEvent) -> DispatchOutcome {
        let Some(message) = event.message else {
            debug!("dumped reaction (message not resolved)");
            return DispatchOutcome::Dropped(DropReason::UnresolvedMessage);
        };

        let Some(user_id) = event.user_id else {
            debug!(
                message_id = message.message_id.get(),
                "dumped reaction (user not resolved)"
            );
            return DispatchOutcome::Dropped(DropReason::UnknownUser);
        };

        let decided = self
            .registry
            .update_or_remove(message.message_id, |session| {
                let decision = self.decide(session, message, &event.button, user_id);
                let terminate = matches!(decision, Decision::Terminate);
                (decision, terminate)
            })
            .await;

        let Some((decision, removed)) = decided else {
            return DispatchOutcome::Dropped(DropReason::NotPaginated);
        };

        match decision {
            Decision::OwnReaction => DispatchOutcome::Dropped(DropReason::OwnReaction),
            Decision::Denied => {
                debug!(
                    message_id = message.message_id.get(),
                    user_id = user_id.get(),
                    "ignoring reaction from non-owner"
                );
                self.spawn_strip(message, event.button, user_id);
                DispatchOutcome::Denied
            }
            Decision::Render { page, render_lock } => {
                let ((), ()) = tokio::join!(
                    self.strip(message, &event.button, user_id),
                    self.render_latest(message, render_lock),
                );
                DispatchOutcome::Navigated { page }
            }
            Decision::Unchanged { page } => {
                self.strip(message, &event.button, user_id).await;
                DispatchOutcome::Unchanged { page }
            }
            Decision::Terminate => {
                let Some(session) = removed else {
                    return DispatchOutcome::Dropped(DropReason::NotPaginated);
                };
                let action = session.stop_action();
                let ((), ()) = tokio::join!(
                    self.strip(message, &event.button, user_id),
                    self.teardown(session, action, "stopped"),
                );
                DispatchOutcome::Stopped
            }
        }
    }

    /// Apply one press to `session`; runs under the registry lock.
    fn decide(
        &self,
        session: &mut Session,
        message: MessageHandle,
        button: &ReactionButton,
        user_id: Id<UserMarker>,
    ) -> Decision {
        if user_id == self.bot_user_id {
            return Decision::OwnReaction;
        }

        if !session.is_operable_by(user_id) {
            return Decision::Denied;
        }

        let Transition { cursor, effect } = session
            .controls()
            .resolve(button)
            .map_or(Transition::unchanged(session.cursor()), |control| {
                transition(session.cursor(), session.total_pages(), control)
            });
        session.cursor = cursor;

        match effect {
            Effect::Render => {
                if session.resets_timeout_on_input()
                    && let Some(timeout) = session.timeout()
                {
                    // Replacing the timer aborts the previous one.
                    session.expiry = Some(self.arm_expiry(message.message_id, timeout));
                }
                Decision::Render {
                    page: cursor,
                    render_lock: session.render_lock(),
                }
            }
            Effect::Unchanged => Decision::Unchanged { page: cursor },
            Effect::Terminate => Decision::Terminate,
        }
    }

    /// Bring the message up to the committed cursor.
    ///
    /// Edits for one message run one at a time and render the page committed
    /// when they start. Nothing is sent when the message already shows it.
    async fn render_latest(&self, message: MessageHandle, render_lock: Arc<Mutex<()>>) {
        let _guard = render_lock.lock().await;

        let pending = self
            .registry
            .update(message.message_id, |session| session.pending_render())
            .await
            .flatten();
        let Some((page, embed)) = pending else {
            return;
        };

        if self.edit(message, embed).await {
            self.registry
                .update(message.message_id, |session| session.mark_rendered(page))
                .await;
        }
    }

    /// Remove the pressed reaction so the button stays clickable.
    async fn strip(
        &self,
        message: MessageHandle,
        button: &ReactionButton,
        user_id: Id<UserMarker>,
    ) {
        if let Err(source) = self
            .transport
            .remove_reaction(message, button, user_id)
            .await
        {
            debug!(
                ?source,
                message_id = message.message_id.get(),
                "failed to remove navigation reaction"
            );
        }
    }

    /// Fire-and-forget variant of [`Self::strip`].
    fn spawn_strip(
        &self,
        message: MessageHandle,
        button: ReactionButton,
        user_id: Id<UserMarker>,
    ) {
        let transport = Arc::clone(&self.transport);
        tokio::spawn(async move {
            if let Err(source) = transport.remove_reaction(message, &button, user_id).await {
                debug!(
                    ?source,
                    message_id = message.message_id.get(),
                    "failed to remove non-owner reaction"
                );
            }
        });
    }

    async fn edit(&self, message: MessageHandle, embed: Embed) -> bool {
        match self.transport.edit_embed(message, embed).await {
            Ok(()) => true,
            Err(source) => {
                warn!(
                    ?source,
                    message_id = message.message_id.get(),
                    "failed to render paginated page"
                );
                false
            }
        }
    }
}
