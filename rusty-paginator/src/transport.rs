//! Outbound chat operations used by the paginator.

use async_trait::async_trait;
use twilight_http::Client;
use twilight_model::{
    channel::message::embed::Embed,
    id::{
        Id,
        marker::{ChannelMarker, MessageMarker, UserMarker},
    },
};

use crate::controls::ReactionButton;

/// Channel and message id of a paginated message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageHandle {
    pub channel_id: Id<ChannelMarker>,
    pub message_id: Id<MessageMarker>,
}

impl MessageHandle {
    pub const fn new(channel_id: Id<ChannelMarker>, message_id: Id<MessageMarker>) -> Self {
        Self {
            channel_id,
            message_id,
        }
    }
}

/// Chat operations the paginator needs from the outside world.
///
/// Implemented for the twilight HTTP [`Client`]; tests plug in a recorder.
#[async_trait]
pub trait PaginationTransport: Send + Sync + 'static {
    /// Send a new message carrying `embed` and return its handle.
    async fn send_embed(&self, channel_id: Id<ChannelMarker>, embed: Embed)
    -> anyhow::Result<MessageHandle>;

    /// Replace the embed of an existing message.
    async fn edit_embed(&self, message: MessageHandle, embed: Embed) -> anyhow::Result<()>;

    async fn delete_message(&self, message: MessageHandle) -> anyhow::Result<()>;

    /// React to `message` as the bot.
    async fn add_reaction(
        &self,
        message: MessageHandle,
        button: &ReactionButton,
    ) -> anyhow::Result<()>;

    /// Remove one user's reaction from `message`.
    async fn remove_reaction(
        &self,
        message: MessageHandle,
        button: &ReactionButton,
        user_id: Id<UserMarker>,
    ) -> anyhow::Result<()>;

    /// Remove every reaction from `message`.
    async fn clear_reactions(&self, message: MessageHandle) -> anyhow::Result<()>;
}

#[async_trait]
impl PaginationTransport for Client {
    async fn send_embed(
        &self,
        channel_id: Id<ChannelMarker>,
        embed: Embed,
    ) -> anyhow::Result<MessageHandle> {
        let created_message = self
            .create_message(channel_id)
            .embeds(&[embed])
            .await?
            .model()
            .await?;

        Ok(MessageHandle::new(
            created_message.channel_id,
            created_message.id,
        ))
    }

    async fn edit_embed(&self, message: MessageHandle, embed: Embed) -> anyhow::Result<()> {
        self.update_message(message.channel_id, message.message_id)
            .embeds(Some(&[embed]))
            .await?;

        Ok(())
    }

    async fn delete_message(&self, message: MessageHandle) -> anyhow::Result<()> {
        Client::delete_message(self, message.channel_id, message.message_id).await?;

        Ok(())
    }

    async fn add_reaction(
        &self,
        message: MessageHandle,
        button: &ReactionButton,
    ) -> anyhow::Result<()> {
        let emoji = button.as_request();
        self.create_reaction(message.channel_id, message.message_id, &emoji)
            .await?;

        Ok(())
    }

    async fn remove_reaction(
        &self,
        message: MessageHandle,
        button: &ReactionButton,
        user_id: Id<UserMarker>,
    ) -> anyhow::Result<()> {
        let emoji = button.as_request();
        self.delete_reaction(message.channel_id, message.message_id, &emoji, user_id)
            .await?;

        Ok(())
    }

    async fn clear_reactions(&self, message: MessageHandle) -> anyhow::Result<()> {
        self.delete_all_reactions(message.channel_id, message.message_id)
            .await?;

        Ok(())
    }
}
