use std::{env, time::Duration};

use anyhow::{Context as _, anyhow};
use rusty_paginator::{CleanupAction, PaginationOptions};
use twilight_model::id::{Id, marker::UserMarker};

/// Default timeout for reaction pagination sessions.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Bot settings read from the environment (and `.env`).
#[derive(Debug, Clone)]
pub struct Config {
    pub discord_token: String,
    /// Inactivity timeout of paginated messages; zero disables expiry.
    pub pagination_timeout: Duration,
    pub stop_action: CleanupAction,
    pub timeout_action: CleanupAction,
    pub reset_timeout_on_input: bool,
}

impl Config {
    /// Read the configuration from process environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read the configuration through `lookup`, which maps a variable name to its value.
    ///
    /// - `DISCORD_TOKEN` (required)
    /// - `PAGINATION_TIMEOUT`: `30s`, `10m`, `2h`, plain seconds, or `0`/`off` (default `120s`)
    /// - `PAGINATION_STOP_ACTION`: `delete`, `clear` or `none` (default `delete`)
    /// - `PAGINATION_TIMEOUT_ACTION`: `delete`, `clear` or `none` (default `clear`)
    /// - `PAGINATION_RESET_ON_INPUT`: `true` or `false` (default `false`)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let discord_token = lookup("DISCORD_TOKEN")
            .filter(|token| !token.trim().is_empty())
            .ok_or_else(|| anyhow!("DISCORD_TOKEN is not set"))?;

        let pagination_timeout = match lookup("PAGINATION_TIMEOUT") {
            Some(raw) => parse_timeout(&raw)
                .ok_or_else(|| anyhow!("PAGINATION_TIMEOUT has an invalid duration `{raw}`"))?,
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        let stop_action = match lookup("PAGINATION_STOP_ACTION") {
            Some(raw) => raw.parse().context("PAGINATION_STOP_ACTION")?,
            None => CleanupAction::DeleteMessage,
        };

        let timeout_action = match lookup("PAGINATION_TIMEOUT_ACTION") {
            Some(raw) => raw.parse().context("PAGINATION_TIMEOUT_ACTION")?,
            None => CleanupAction::ClearReactions,
        };

        let reset_timeout_on_input = match lookup("PAGINATION_RESET_ON_INPUT") {
            Some(raw) => raw
                .trim()
                .parse::<bool>()
                .with_context(|| format!("PAGINATION_RESET_ON_INPUT must be true or false, got `{raw}`"))?,
            None => false,
        };

        Ok(Self {
            discord_token,
            pagination_timeout,
            stop_action,
            timeout_action,
            reset_timeout_on_input,
        })
    }

    /// Pagination options for a message only `owner` may operate.
    pub fn pagination_options(&self, owner: Id<UserMarker>) -> PaginationOptions {
        PaginationOptions::default()
            .owner(owner)
            .timeout(self.pagination_timeout)
            .stop_action(self.stop_action)
            .timeout_action(self.timeout_action)
            .reset_timeout_on_input(self.reset_timeout_on_input)
    }
}

fn parse_timeout(raw: &str) -> Option<Duration> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "0" | "off" | "never" => Some(Duration::ZERO),
        value => parse_duration_seconds(value).map(Duration::from_secs),
    }
}

/// Parse a compact duration token like `30s`, `10m`, `2h`, `1d`, or plain seconds.
pub fn parse_duration_seconds(raw: &str) -> Option<u64> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }

    let mut chars = value.chars();
    let unit = chars.next_back();

    let (number_raw, multiplier) = match unit {
        Some('s') | Some('S') => (chars.as_str(), 1_u64),
        Some('m') | Some('M') => (chars.as_str(), 60_u64),
        Some('h') | Some('H') => (chars.as_str(), 60_u64 * 60),
        Some('d') | Some('D') => (chars.as_str(), 60_u64 * 60 * 24),
        Some(last) if last.is_ascii_digit() => (value, 1_u64),
        _ => return None,
    };

    let number = number_raw.parse::<u64>().ok()?;
    if number == 0 {
        return None;
    }

    number.checked_mul(multiplier)
}
