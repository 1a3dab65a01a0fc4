#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, AtomicU64, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use rusty_paginator::{
    MessageHandle, PageStore, PaginationOptions, PaginationTransport, Paginator, ReactionButton,
    ReactionEvent,
};
use twilight_model::{
    channel::message::embed::Embed,
    id::{
        Id,
        marker::{ChannelMarker, UserMarker},
    },
};

pub const BOT: Id<UserMarker> = Id::new(1);
pub const OWNER: Id<UserMarker> = Id::new(11);
pub const STRANGER: Id<UserMarker> = Id::new(12);
pub const CHANNEL: Id<ChannelMarker> = Id::new(500);

pub const FIRST: &str = "⏮";
pub const PREVIOUS: &str = "◀";
pub const NEXT: &str = "▶";
pub const LAST: &str = "⏭";
pub const STOP: &str = "⏹";

/// One outbound call observed by [`RecordingTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Send { channel_id: u64, footer: String },
    Edit { message_id: u64, footer: String },
    Delete { message_id: u64 },
    AddReaction { message_id: u64, button: String },
    RemoveReaction { message_id: u64, button: String, user_id: u64 },
    ClearReactions { message_id: u64 },
}

/// In-memory transport that records every call and can be told to fail.
#[derive(Debug, Default)]
pub struct RecordingTransport {
    calls: Mutex<Vec<Call>>,
    next_message_id: AtomicU64,
    pub fail_sends: AtomicBool,
    pub fail_reactions: AtomicBool,
    pub fail_edits: AtomicBool,
    pub fail_deletes: AtomicBool,
    /// Extra latency for edits rendering a given footer.
    edit_delays: Mutex<HashMap<String, Duration>>,
}

impl RecordingTransport {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, predicate: impl Fn(&Call) -> bool) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|&call| predicate(call))
            .count()
    }

    pub fn edits(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Edit { footer, .. } => Some(footer),
                _ => None,
            })
            .collect()
    }

    /// Make edits that render `footer` take `delay` before they land.
    pub fn delay_edit(&self, footer: &str, delay: Duration) {
        self.edit_delays
            .lock()
            .unwrap()
            .insert(footer.to_owned(), delay);
    }

    /// Footer of the most recent edit that landed.
    pub fn shown_footer(&self) -> Option<String> {
        self.edits().pop()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

fn footer(embed: &Embed) -> String {
    embed
        .footer
        .as_ref()
        .map(|footer| footer.text.clone())
        .unwrap_or_default()
}

#[async_trait]
impl PaginationTransport for RecordingTransport {
    async fn send_embed(
        &self,
        channel_id: Id<ChannelMarker>,
        embed: Embed,
    ) -> anyhow::Result<MessageHandle> {
        if self.fail_sends.load(Ordering::SeqCst) {
            anyhow::bail!("missing permission: send messages");
        }

        self.record(Call::Send {
            channel_id: channel_id.get(),
            footer: footer(&embed),
        });
        let message_id = 1000 + self.next_message_id.fetch_add(1, Ordering::SeqCst);
        Ok(MessageHandle::new(channel_id, Id::new(message_id)))
    }

    async fn edit_embed(&self, message: MessageHandle, embed: Embed) -> anyhow::Result<()> {
        let footer = footer(&embed);
        let delay = self.edit_delays.lock().unwrap().get(&footer).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        self.record(Call::Edit {
            message_id: message.message_id.get(),
            footer,
        });
        if self.fail_edits.load(Ordering::SeqCst) {
            anyhow::bail!("unknown message");
        }
        Ok(())
    }

    async fn delete_message(&self, message: MessageHandle) -> anyhow::Result<()> {
        self.record(Call::Delete {
            message_id: message.message_id.get(),
        });
        if self.fail_deletes.load(Ordering::SeqCst) {
            anyhow::bail!("unknown message");
        }
        Ok(())
    }

    async fn add_reaction(
        &self,
        message: MessageHandle,
        button: &ReactionButton,
    ) -> anyhow::Result<()> {
        if self.fail_reactions.load(Ordering::SeqCst) {
            anyhow::bail!("missing permission: add reactions");
        }
        self.record(Call::AddReaction {
            message_id: message.message_id.get(),
            button: button.to_string(),
        });
        Ok(())
    }

    async fn remove_reaction(
        &self,
        message: MessageHandle,
        button: &ReactionButton,
        user_id: Id<UserMarker>,
    ) -> anyhow::Result<()> {
        self.record(Call::RemoveReaction {
            message_id: message.message_id.get(),
            button: button.to_string(),
            user_id: user_id.get(),
        });
        Ok(())
    }

    async fn clear_reactions(&self, message: MessageHandle) -> anyhow::Result<()> {
        self.record(Call::ClearReactions {
            message_id: message.message_id.get(),
        });
        Ok(())
    }
}

pub fn paginator() -> (Paginator<RecordingTransport>, Arc<RecordingTransport>) {
    let transport = Arc::new(RecordingTransport::default());
    (Paginator::new(Arc::clone(&transport), BOT), transport)
}

pub fn pages(count: usize) -> PageStore {
    PageStore::new("Lorem Ipsum", None, (1..=count).map(|i| format!("page body {i}")))
        .expect("test pages are valid")
}

pub async fn send(
    paginator: &Paginator<RecordingTransport>,
    count: usize,
    options: PaginationOptions,
) -> MessageHandle {
    paginator
        .send_paginated(CHANNEL, pages(count), options)
        .await
        .expect("send succeeds")
}

pub fn press(message: MessageHandle, button: &str, user_id: Id<UserMarker>) -> ReactionEvent {
    ReactionEvent {
        message: Some(message),
        button: ReactionButton::unicode(button),
        user_id: Some(user_id),
    }
}

/// Let spawned fire-and-forget tasks run.
pub async fn settle() {
    for _ in 0..8 {
        tokio::task::yield_now().await;
    }
}
