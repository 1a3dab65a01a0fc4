//! Session lifecycle: creation, expiry and teardown.

use std::{
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};

use tracing::{debug, info};
use twilight_model::id::{
    Id,
    marker::{ChannelMarker, MessageMarker, UserMarker},
};

use crate::{
    expiry::ExpiryTimer,
    options::{CleanupAction, PaginationOptions},
    page::PageStore,
    registry::SessionRegistry,
    session::Session,
    transport::{MessageHandle, PaginationTransport},
};

/// Entry point for sending paginated messages and routing their reactions.
///
/// Cheap to clone; clones share the same registry and transport.
pub struct Paginator<T> {
    pub(crate) transport: Arc<T>,
    pub(crate) registry: Arc<SessionRegistry>,
    pub(crate) bot_user_id: Id<UserMarker>,
    epochs: Arc<AtomicU64>,
}

impl<T> Clone for Paginator<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            registry: Arc::clone(&self.registry),
            bot_user_id: self.bot_user_id,
            epochs: Arc::clone(&self.epochs),
        }
    }
}

impl<T: PaginationTransport> Paginator<T> {
    /// Create a paginator acting as `bot_user_id`.
    ///
    /// Reactions from `bot_user_id` are never treated as navigation.
    pub fn new(transport: Arc<T>, bot_user_id: Id<UserMarker>) -> Self {
        Self {
            transport,
            registry: Arc::new(SessionRegistry::new()),
            bot_user_id,
            epochs: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Active sessions, keyed by message id.
    pub fn sessions(&self) -> &SessionRegistry {
        &self.registry
    }

    pub fn bot_user_id(&self) -> Id<UserMarker> {
        self.bot_user_id
    }

    /// Send page 1 of `pages` to `channel_id`, seed the control reactions and
    /// start listening for them.
    ///
    /// Send and seeding failures are returned to the caller. When seeding
    /// fails the session is dropped again before the error is returned.
    pub async fn send_paginated(
        &self,
        channel_id: Id<ChannelMarker>,
        pages: PageStore,
        options: PaginationOptions,
    ) -> anyhow::Result<MessageHandle> {
        info!(
            channel_id = channel_id.get(),
            pages = pages.len(),
            "sending paginated message"
        );

        let handle = self.transport.send_embed(channel_id, pages.render(1)).await?;
        let message_id = handle.message_id;
        let controls = options.controls.clone();

        self.registry
            .put(message_id, Session::new(handle, pages, options))
            .await?;

        for button in controls.buttons() {
            if let Err(source) = self.transport.add_reaction(handle, button).await {
                if self.registry.remove(message_id).await.is_none() {
                    // Stopped by a user before seeding finished; the failure is expected.
                    debug!(
                        ?source,
                        message_id = message_id.get(),
                        "session ended while seeding controls"
                    );
                    return Ok(handle);
                }
                return Err(source.context(format!("failed to add the {button} control")));
            }
        }

        let armed = self
            .registry
            .update(message_id, |session| {
                if let Some(timeout) = session.timeout() {
                    session.expiry = Some(self.arm_expiry(message_id, timeout));
                }
            })
            .await;

        if armed.is_none() {
            debug!(
                message_id = message_id.get(),
                "session ended while seeding controls"
            );
        } else {
            debug!(message_id = message_id.get(), "listening to paginated message");
        }

        Ok(handle)
    }

    /// End a session with its stop action, as if its stop button was pressed.
    ///
    /// Returns `false` when the message is not paginated.
    pub async fn stop(&self, message_id: Id<MessageMarker>) -> bool {
        let Some(session) = self.registry.remove(message_id).await else {
            return false;
        };

        let action = session.stop_action();
        self.teardown(session, action, "stopped").await;
        true
    }

    /// Forget the session of a message that was deleted by someone else.
    ///
    /// No transport calls are made; the message is already gone.
    pub async fn handle_message_deleted(&self, message_id: Id<MessageMarker>) -> bool {
        let Some(session) = self.registry.remove(message_id).await else {
            return false;
        };

        self.teardown(session, CleanupAction::StopListening, "message deleted")
            .await;
        true
    }

    /// Spawn the expiry task for `message_id`.
    pub(crate) fn arm_expiry(
        &self,
        message_id: Id<MessageMarker>,
        timeout: Duration,
    ) -> ExpiryTimer {
        let epoch = self.epochs.fetch_add(1, Ordering::Relaxed);
        let paginator = self.clone();

        ExpiryTimer::arm(epoch, timeout, async move {
            paginator.expire(message_id, epoch).await;
        })
    }

    async fn expire(&self, message_id: Id<MessageMarker>, epoch: u64) {
        let Some(mut session) = self
            .registry
            .remove_if(message_id, |session| session.expiry_epoch() == Some(epoch))
            .await
        else {
            debug!(message_id = message_id.get(), epoch, "stale expiry ignored");
            return;
        };

        // This code runs inside the timer task; aborting it would cut the cleanup short.
        if let Some(timer) = session.expiry.take() {
            timer.disarm();
        }

        let action = session.timeout_action();
        self.teardown(session, action, "timed out").await;
    }

    /// Single exit path for every removed session.
    pub(crate) async fn teardown(&self, mut session: Session, action: CleanupAction, reason: &str) {
        session.cancel_expiry();
        let handle = session.handle();

        info!(
            message_id = handle.message_id.get(),
            %action,
            reason,
            "pagination session ended"
        );

        let result = match action {
            CleanupAction::DeleteMessage => self.transport.delete_message(handle).await,
            CleanupAction::ClearReactions => self.transport.clear_reactions(handle).await,
            CleanupAction::StopListening => Ok(()),
        };

        if let Err(source) = result {
            debug!(
                ?source,
                message_id = handle.message_id.get(),
                %action,
                "cleanup failed after session end"
            );
        }
    }
}
