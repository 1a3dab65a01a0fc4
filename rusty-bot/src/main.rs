use std::sync::Arc;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use twilight_gateway::{EventTypeFlags, Intents, Shard, ShardId, StreamExt as _};
use twilight_http::Client;
use twilight_model::gateway::event::Event;

use rustls::crypto::ring::default_provider;

use rusty_commands::{
    handle_message, handle_message_delete, handle_message_delete_bulk, handle_reaction,
};
use rusty_core::{Config, Context};
use rusty_paginator::Paginator;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    default_provider()
        .install_default()
        .map_err(|_| anyhow::anyhow!("failed to install rustls ring provider"))?;

    // Load the .env file
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;
    let token = config.discord_token.clone();

    // Create a single shared HTTP Client
    let http = Arc::new(Client::new(token.clone()));

    // The paginator needs our own id to ignore the control reactions it adds
    let bot_user = http.current_user().await?.model().await?;
    info!(
        user = %bot_user.name,
        timeout_secs = config.pagination_timeout.as_secs(),
        "resolved bot user"
    );

    let paginator = Paginator::new(Arc::clone(&http), bot_user.id);
    let ctx = Context::new(Arc::clone(&http), paginator, config);

    // Declare which intents the bot has
    let intents = Intents::GUILDS
        | Intents::GUILD_MESSAGES
        | Intents::GUILD_MESSAGE_REACTIONS
        | Intents::DIRECT_MESSAGES
        | Intents::DIRECT_MESSAGE_REACTIONS
        | Intents::MESSAGE_CONTENT;

    // A shard is one Gateway WebSocket connection to Discord
    let mut shard = Shard::new(ShardId::new(0, 1), token, intents);

    info!("Rusty is connecting...");

    while let Some(item) = shard.next_event(EventTypeFlags::all()).await {
        let event = match item {
            Ok(event) => event,
            Err(source) => {
                warn!(?source, "gateway event stream error");
                continue;
            }
        };

        match event {
            Event::Ready(_) => {
                info!("Rusty has successfully awoken!");
            }
            Event::MessageCreate(msg) => {
                let ctx = ctx.clone();
                tokio::spawn(async move {
                    if let Err(source) = handle_message(ctx, msg).await {
                        error!(?source, "command failed");
                    }
                });
            }
            Event::ReactionAdd(reaction) => {
                tokio::spawn(handle_reaction(ctx.clone(), reaction));
            }
            Event::MessageDelete(event) => {
                handle_message_delete(ctx.clone(), event).await;
            }
            Event::MessageDeleteBulk(event) => {
                handle_message_delete_bulk(ctx.clone(), event).await;
            }
            _ => {} // Ignore unused events
        }
    }

    Ok(())
}
