//! Error types for the scrape pipeline and the navigation layer.
//!
//! Two families with very different lifecycles: [`BotError`] is fatal at
//! startup — the process must not begin accepting updates with a
//! partially built catalog — while [`NavError`] is scoped to a single
//! incoming event and is logged and absorbed at the webhook boundary.

/// Errors raised while building the catalog at startup.
///
/// All of these abort startup. A missing node means the site's markup
/// changed incompatibly with the extraction rules; serving stale partial
/// data is worse than refusing to start.
#[derive(thiserror::Error, Debug)]
pub enum BotError {
    #[error("GET {url} failed: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("GET {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("{page}: required node '{selector}' not found")]
    MissingNode {
        page: &'static str,
        selector: &'static str,
    },
}

pub type BotResult<T> = Result<T, BotError>;

/// Errors raised while handling a single interaction event.
///
/// Never fatal: the handler logs the error, acknowledges the callback so
/// the client stops its spinner, and leaves the screen where it was.
#[derive(thiserror::Error, Debug)]
pub enum NavError {
    #[error("unrecognized event tag {0:?}")]
    UnknownTag(String),

    #[error("category index {index} out of range ({len} categories)")]
    IndexOutOfRange { index: usize, len: usize },
}
