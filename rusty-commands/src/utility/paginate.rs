use twilight_model::gateway::payload::incoming::MessageCreate;

use crate::CommandMeta;
use rusty_core::Context;
use rusty_paginator::{Page, PageStore};

pub const META: CommandMeta = CommandMeta {
    name: "paginate",
    desc: "Sends a paginated message you can flip through with reactions.",
    category: "utility",
    usage: "!paginate",
};

const TITLE: &str = "Lorem Ipsum";
const COLOR: u32 = 0xb1_00_c1;

const LOREM: [&str; 5] = [
    "Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod tempor incididunt ut labore et dolore magna aliqua.",
    "Ut enim ad minim veniam, quis nostrud exercitation ullamco laboris nisi ut aliquip ex ea commodo consequat.",
    "Duis aute irure dolor in reprehenderit in voluptate velit esse cillum dolore eu fugiat nulla pariatur.",
    "Excepteur sint occaecat cupidatat non proident, sunt in culpa qui officia deserunt mollit anim id est laborum.",
    "Sed ut perspiciatis unde omnis iste natus error sit voluptatem accusantium doloremque laudantium.",
];

fn demo_pages() -> Vec<Page> {
    LOREM.iter().map(|text| Page::new(*text)).collect()
}

/// Send a five-page demo message owned by the author.
pub async fn run(ctx: Context, msg: Box<MessageCreate>) -> anyhow::Result<()> {
    let pages = PageStore::new(TITLE, Some(COLOR), demo_pages())?;
    let options = ctx.config.pagination_options(msg.author.id);

    ctx.paginator
        .send_paginated(msg.channel_id, pages, options)
        .await?;

    Ok(())
}
