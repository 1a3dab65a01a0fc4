pub mod utility;

use tracing::debug;
use twilight_model::gateway::payload::incoming::{
    MessageCreate, MessageDelete, MessageDeleteBulk, ReactionAdd,
};

use rusty_core::Context;
use rusty_paginator::{DispatchOutcome, ReactionEvent};

pub const COMMAND_PREFIX: char = '!';

// Global command meta data
pub struct CommandMeta {
    pub name: &'static str,
    pub desc: &'static str,
    pub category: &'static str,
    pub usage: &'static str,
}

pub const COMMANDS: &[CommandMeta] = &[
    utility::ping::META,
    utility::help::META,
    utility::paginate::META,
    // Add new commands here
];

/// Split `!command rest` into a lowercase command name and its first argument.
fn parse_command(content: &str) -> Option<(String, Option<&str>)> {
    let content = content.trim().strip_prefix(COMMAND_PREFIX)?.trim();
    let mut command_and_rest = content.splitn(2, char::is_whitespace);
    let cmd = command_and_rest.next().unwrap_or("").to_ascii_lowercase();
    if cmd.is_empty() {
        return None;
    }

    let arg1 = command_and_rest
        .next()
        .map(str::trim)
        .and_then(|rest| rest.split_whitespace().next());

    Some((cmd, arg1))
}

pub async fn handle_message(ctx: Context, msg: Box<MessageCreate>) -> anyhow::Result<()> {
    if msg.author.bot {
        return Ok(());
    }

    let content = msg.content.clone();
    let Some((cmd, arg1)) = parse_command(&content) else {
        return Ok(());
    };

    match cmd.as_str() {
        "ping" => utility::ping::run(ctx.clone(), msg).await?,
        "help" => utility::help::run(ctx.clone(), msg, arg1).await?,
        "paginate" => utility::paginate::run(ctx.clone(), msg).await?,
        // Add new commands here
        _ => {}
    }

    Ok(())
}

/// Feed a reaction-added event to the paginator.
pub async fn handle_reaction(ctx: Context, reaction: Box<ReactionAdd>) -> DispatchOutcome {
    let outcome = ctx
        .paginator
        .handle_reaction(ReactionEvent::from(&reaction.0))
        .await;
    debug!(
        message_id = reaction.0.message_id.get(),
        ?outcome,
        "reaction dispatched"
    );
    outcome
}

/// Drop the session of a paginated message that was deleted by someone else.
pub async fn handle_message_delete(ctx: Context, event: MessageDelete) {
    ctx.paginator.handle_message_deleted(event.id).await;
}

pub async fn handle_message_delete_bulk(ctx: Context, event: MessageDeleteBulk) {
    for id in event.ids {
        ctx.paginator.handle_message_deleted(id).await;
    }
}
