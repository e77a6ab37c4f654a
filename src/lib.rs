//! # readit
//!
//! Reads reddit pages (comment threads, single posts, user profiles) into
//! typed records, and enriches profile activity into display cards.
//!
//! ## Architecture
//!
//! ```text
//! PageLoader → MarkupDocument → Scraper (+ LinkNormalizer) → records
//! records → ParallelEnricher (+ EnrichmentCache) → Aggregator → cards
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! # Read a thread, newest comments first
//! readit thread /r/rust/comments/abc123/title/ --sort new
//!
//! # A user's recent activity
//! readit profile some_user --filter comments
//!
//! # The same activity as one card per post
//! readit cards some_user --concurrency 4
//! ```

/// Application context and error handling.
///
/// [`AppContext`](app::AppContext) wires the page loader, the scraper and
/// the enricher together from a [`Config`](config::Config).
pub mod app;

/// Folds enrichment results into cards, one per resource.
pub mod aggregator;

/// Command-line interface using clap.
///
/// - `thread <url> [--sort]` - Show a comment thread
/// - `post <url>` - Show a single post
/// - `profile <user> [--filter] [--after]` - Show a user's activity
/// - `cards <user>` - Show a user's activity as enriched cards
pub mod cli;

/// Configuration loaded from `~/.config/readit/config.toml`.
pub mod config;

/// Core domain models.
///
/// - [`Comment`](domain::Comment), [`Post`](domain::Post) and
///   [`MixedItem`](domain::MixedItem): records read from pages
/// - [`Card`](domain::Card): an enriched record ready for display
/// - [`Record`](domain::Record): what the enrichment stage needs from a record
pub mod domain;

/// Page loading and post-info enrichment.
///
/// - [`PageLoader`](fetcher::PageLoader): Async trait for loading page markup
/// - [`HttpPageLoader`](fetcher::http_fetcher::HttpPageLoader): reqwest-based implementation
/// - [`ParallelEnricher`](fetcher::ParallelEnricher): bounded concurrent fetching with retry
pub mod fetcher;

/// Markup parsing, element queries and markdown conversion.
pub mod markup;

/// Rewrites links inside comment and post bodies to the internal scheme.
pub mod normalizer;

/// Extraction of comments, posts and profile feeds from parsed pages.
pub mod scraper;
