//! State of one paginated message.

use std::{sync::Arc, time::Duration};

use tokio::sync::Mutex;

use twilight_model::{
    channel::message::embed::Embed,
    id::{Id, marker::UserMarker},
};

use crate::{
    controls::Controls,
    expiry::ExpiryTimer,
    options::{CleanupAction, PaginationOptions},
    page::PageStore,
    transport::MessageHandle,
};

/// A live pagination session bound to one message.
#[derive(Debug)]
pub struct Session {
    handle: MessageHandle,
    pages: PageStore,
    pub(crate) cursor: usize,
    /// Page the message currently shows.
    rendered: usize,
    /// Serializes message edits so they land in cursor order.
    render_lock: Arc<Mutex<()>>,
    owner: Option<Id<UserMarker>>,
    controls: Controls,
    stop_action: CleanupAction,
    timeout_action: CleanupAction,
    timeout: Duration,
    reset_timeout_on_input: bool,
    pub(crate) expiry: Option<ExpiryTimer>,
}

impl Session {
    /// Create a session on page 1. No timer is armed yet.
    pub fn new(handle: MessageHandle, pages: PageStore, options: PaginationOptions) -> Self {
        Self {
            handle,
            pages,
            cursor: 1,
            rendered: 1,
            render_lock: Arc::new(Mutex::new(())),
            owner: options.owner,
            controls: options.controls,
            stop_action: options.stop_action,
            timeout_action: options.timeout_action,
            timeout: options.timeout,
            reset_timeout_on_input: options.reset_timeout_on_input,
            expiry: None,
        }
    }

    pub fn handle(&self) -> MessageHandle {
        self.handle
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn total_pages(&self) -> usize {
        self.pages.len()
    }

    pub fn owner(&self) -> Option<Id<UserMarker>> {
        self.owner
    }

    pub fn controls(&self) -> &Controls {
        &self.controls
    }

    pub fn stop_action(&self) -> CleanupAction {
        self.stop_action
    }

    pub fn timeout_action(&self) -> CleanupAction {
        self.timeout_action
    }

    /// Expiry delay, or `None` when the session never expires.
    pub fn timeout(&self) -> Option<Duration> {
        (!self.timeout.is_zero()).then_some(self.timeout)
    }

    pub fn resets_timeout_on_input(&self) -> bool {
        self.reset_timeout_on_input
    }

    /// Whether `user_id` may operate the controls.
    pub fn is_operable_by(&self, user_id: Id<UserMarker>) -> bool {
        self.owner.is_none_or(|owner| owner == user_id)
    }

    /// Render the page under the cursor.
    pub fn render(&self) -> Embed {
        self.pages.render(self.cursor)
    }

    pub(crate) fn render_lock(&self) -> Arc<Mutex<()>> {
        Arc::clone(&self.render_lock)
    }

    /// The committed page and its embed, unless the message already shows it.
    pub(crate) fn pending_render(&self) -> Option<(usize, Embed)> {
        (self.cursor != self.rendered).then(|| (self.cursor, self.render()))
    }

    pub(crate) fn mark_rendered(&mut self, page: usize) {
        self.rendered = page;
    }

    pub(crate) fn expiry_epoch(&self) -> Option<u64> {
        self.expiry.as_ref().map(ExpiryTimer::epoch)
    }

    /// Cancel the pending expiry timer, if any.
    pub(crate) fn cancel_expiry(&mut self) {
        if let Some(timer) = self.expiry.take() {
            timer.cancel();
        }
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            handle: self.handle,
            cursor: self.cursor,
            total_pages: self.total_pages(),
            owner: self.owner,
        }
    }
}

/// Point-in-time copy of a session's observable state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionView {
    pub handle: MessageHandle,
    pub cursor: usize,
    pub total_pages: usize,
    pub owner: Option<Id<UserMarker>>,
}
