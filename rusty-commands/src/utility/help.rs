use twilight_model::gateway::payload::incoming::MessageCreate;

use crate::{COMMAND_PREFIX, COMMANDS, CommandMeta};
use rusty_core::Context;
use rusty_paginator::{Page, PageStore, page::page_window, page::total_pages};

pub const META: CommandMeta = CommandMeta {
    name: "help",
    desc: "Lists out all available commands.",
    category: "utility",
    usage: "!help [category]",
};

const HELP_COMMANDS_PER_PAGE: usize = 8;

/// Send the command catalog as a paginated message, optionally filtered by category.
pub async fn run(ctx: Context, msg: Box<MessageCreate>, arg1: Option<&str>) -> anyhow::Result<()> {
    let http = &ctx.http;
    let category = arg1.map(str::to_ascii_lowercase);

    let mut categories: Vec<&str> = COMMANDS.iter().map(|c| c.category).collect();
    categories.sort_unstable();
    categories.dedup();

    if let Some(wanted_category) = category.as_deref()
        && !categories.contains(&wanted_category)
    {
        let out = format!(
            "Unknown category `{wanted_category}`. Available: {}",
            categories.join(", ")
        );
        http.create_message(msg.channel_id).content(&out).await?;
        return Ok(());
    }

    let commands = sorted_commands(category.as_deref());
    let pages = PageStore::new("Commands", None, help_pages(&commands))?;
    let options = ctx.config.pagination_options(msg.author.id);

    ctx.paginator
        .send_paginated(msg.channel_id, pages, options)
        .await?;

    Ok(())
}

fn sorted_commands(category: Option<&str>) -> Vec<&'static CommandMeta> {
    let mut filtered: Vec<&'static CommandMeta> = COMMANDS
        .iter()
        .filter(|cmd| match category {
            Some(wanted) => cmd.category == wanted,
            None => true,
        })
        .collect();

    filtered.sort_unstable_by(|left, right| {
        left.category
            .cmp(right.category)
            .then_with(|| left.name.cmp(right.name))
    });

    filtered
}

fn help_pages(commands: &[&CommandMeta]) -> Vec<Page> {
    let total = total_pages(commands.len(), HELP_COMMANDS_PER_PAGE);
    (1..=total)
        .map(|page| {
            let (start, end) = page_window(commands.len(), HELP_COMMANDS_PER_PAGE, page);
            Page::new(grouped_help_description(&commands[start..end]))
        })
        .collect()
}

fn grouped_help_description(commands: &[&CommandMeta]) -> String {
    let mut out = String::new();
    let mut current_category: Option<&str> = None;

    for command in commands {
        if current_category != Some(command.category) {
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str(&format!("**{}**\n", display_category(command.category)));
            current_category = Some(command.category);
        }

        out.push_str(&format!(
            "• {COMMAND_PREFIX}{} - {}\n  `{}`\n",
            command.name, command.desc, command.usage
        ));
    }

    out.trim_end().to_owned()
}

fn display_category(category: &str) -> String {
    let mut chars = category.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
