//! Page contents and the immutable page store backing a session.

use twilight_model::channel::message::embed::Embed;
use twilight_util::builder::embed::{
    EmbedBuilder, EmbedFieldBuilder, EmbedFooterBuilder, ImageSource,
};

use crate::error::PaginationError;

/// Default embed color used for paginated messages.
pub const DEFAULT_EMBED_COLOR: u32 = 0x90_54_30;

/// A single embed field shown on a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

impl PageField {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            inline: false,
        }
    }

    pub fn inline(mut self) -> Self {
        self.inline = true;
        self
    }
}

/// Raw input for one page of a paginated message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    pub description: String,
    pub image_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub fields: Vec<PageField>,
}

impl Page {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..Self::default()
        }
    }

    pub fn image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    pub fn thumbnail_url(mut self, url: impl Into<String>) -> Self {
        self.thumbnail_url = Some(url.into());
        self
    }

    pub fn field(mut self, field: PageField) -> Self {
        self.fields.push(field);
        self
    }
}

impl From<String> for Page {
    fn from(description: String) -> Self {
        Self::new(description)
    }
}

impl From<&str> for Page {
    fn from(description: &str) -> Self {
        Self::new(description)
    }
}

/// Ordered, pre-rendered pages of one paginated message.
///
/// Embeds are built and validated once; [`PageStore::render`] only attaches
/// the `Page X/N` footer for the requested cursor.
#[derive(Debug, Clone)]
pub struct PageStore {
    embeds: Vec<Embed>,
}

impl PageStore {
    /// Build and validate every page.
    ///
    /// Fails with [`PaginationError::NoPages`] for an empty input and with
    /// [`PaginationError::InvalidPage`] when a page breaks Discord's embed
    /// limits or carries a malformed image URL.
    pub fn new<I, P>(title: &str, color: Option<u32>, pages: I) -> Result<Self, PaginationError>
    where
        I: IntoIterator<Item = P>,
        P: Into<Page>,
    {
        let pages: Vec<Page> = pages.into_iter().map(Into::into).collect();
        if pages.is_empty() {
            return Err(PaginationError::NoPages);
        }

        let total = pages.len();
        let color = color.unwrap_or(DEFAULT_EMBED_COLOR);
        let embeds = pages
            .into_iter()
            .enumerate()
            .map(|(index, page)| build_page_embed(title, color, page, index + 1, total))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { embeds })
    }

    /// Number of pages, always at least one.
    pub fn len(&self) -> usize {
        self.embeds.len()
    }

    /// Always `false`; a store cannot be built without pages.
    pub fn is_empty(&self) -> bool {
        self.embeds.is_empty()
    }

    /// Render the page at a 1-based cursor with its `Page X/N` footer.
    pub fn render(&self, cursor: usize) -> Embed {
        let total = self.len();
        let cursor = clamp_page(cursor, total);
        let mut embed = self.embeds[cursor - 1].clone();
        embed.footer = Some(EmbedFooterBuilder::new(page_footer(cursor, total)).build());
        embed
    }
}

fn build_page_embed(
    title: &str,
    color: u32,
    page: Page,
    number: usize,
    total: usize,
) -> Result<Embed, PaginationError> {
    let invalid = |source: Box<dyn std::error::Error + Send + Sync>| PaginationError::InvalidPage {
        page: number,
        source,
    };

    let mut builder = EmbedBuilder::new().color(color).description(page.description);

    if !title.is_empty() {
        builder = builder.title(title);
    }

    if let Some(url) = page.image_url {
        let image = ImageSource::url(url).map_err(|source| invalid(Box::new(source)))?;
        builder = builder.image(image);
    }

    if let Some(url) = page.thumbnail_url {
        let thumbnail = ImageSource::url(url).map_err(|source| invalid(Box::new(source)))?;
        builder = builder.thumbnail(thumbnail);
    }

    for field in page.fields {
        let field_builder = EmbedFieldBuilder::new(field.name, field.value);
        let field_builder = if field.inline {
            field_builder.inline()
        } else {
            field_builder
        };
        builder = builder.field(field_builder);
    }

    // Validate with the widest footer this store will ever attach.
    let mut embed = builder
        .footer(EmbedFooterBuilder::new(page_footer(total, total)))
        .validate()
        .map_err(|source| invalid(Box::new(source)))?
        .build();
    embed.footer = None;

    Ok(embed)
}

fn page_footer(page: usize, total_pages: usize) -> String {
    format!("Page {page}/{total_pages}")
}

/// Compute the number of pages for a paginated list.
pub fn total_pages(item_count: usize, per_page: usize) -> usize {
    item_count.div_ceil(per_page.max(1))
}

/// Clamp a requested page into a valid range.
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// Return start/end indices for a page window.
pub fn page_window(total_items: usize, per_page: usize, page: usize) -> (usize, usize) {
    let safe_per_page = per_page.max(1);
    let start = page.saturating_sub(1).saturating_mul(safe_per_page);
    let end = (start + safe_per_page).min(total_items);
    (start.min(total_items), end)
}

/// Chunk a list into bullet-list pages of `per_page` items each.
pub fn pages_from_items(items: &[String], per_page: usize) -> Vec<Page> {
    let total = total_pages(items.len(), per_page);
    (1..=total)
        .map(|page| {
            let (start, end) = page_window(items.len(), per_page, page);
            Page::new(format!("- {}", items[start..end].join("\n- ")))
        })
        .collect()
}
