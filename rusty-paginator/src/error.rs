use twilight_model::id::{Id, marker::MessageMarker};

/// Typed failures raised by the pagination library itself.
///
/// Transport failures are not represented here; they surface as
/// `anyhow::Error` from [`PaginationTransport`](crate::PaginationTransport).
#[derive(Debug, thiserror::Error)]
pub enum PaginationError {
    /// A paginated message needs at least one page.
    #[error("a paginated message needs at least one page")]
    NoPages,
    /// A page could not be turned into a valid embed.
    #[error("page {page} is not a valid embed")]
    InvalidPage {
        page: usize,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// The registry already tracks a session for this message.
    #[error("message {0} already has an active pagination session")]
    SessionExists(Id<MessageMarker>),
    /// A cleanup action name could not be parsed.
    #[error("unknown cleanup action `{0}` (expected delete, clear or none)")]
    UnknownCleanupAction(String),
}
