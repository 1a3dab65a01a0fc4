use twilight_model::gateway::payload::incoming::MessageCreate;

use crate::CommandMeta;
use rusty_core::Context;

pub const META: CommandMeta = CommandMeta {
    name: "ping",
    desc: "Replies with Pong!",
    category: "utility",
    usage: "!ping",
};

/// Reply to the invoking message to show the bot is alive.
pub async fn run(ctx: Context, msg: Box<MessageCreate>) -> anyhow::Result<()> {
    ctx.http
        .create_message(msg.channel_id)
        .reply(msg.id)
        .content("Pong!")
        .await?;

    Ok(())
}
