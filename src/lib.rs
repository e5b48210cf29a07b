//! # quakewatch
//!
//! A terminal client for the USGS earthquake feed.
//!
//! ## Architecture
//!
//! quakewatch follows a small pipeline architecture:
//!
//! ```text
//! Fetcher → Decoder → Normalizer → Store → CLI / TUI
//! ```
//!
//! - [`fetcher`]: HTTP client for the GeoJSON feed
//! - [`decoder`]: Parses the payload into raw feature records
//! - [`normalizer`]: Maps raw records to domain earthquakes
//! - [`store`]: In-memory collection with sort, search and change snapshots
//! - [`tui`]: Terminal user interface built with ratatui
//!
//! ## Quick Start
//!
//! ```bash
//! # Strongest earthquakes of the last day
//! quakewatch list --sort magnitude --limit 10
//!
//! # Everything in Alaska, most recent first
//! quakewatch list --search alaska --sort date
//!
//! # Launch TUI
//! quakewatch tui
//! ```

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires the feed client and the
/// store together for one session.
pub mod app;

/// Command-line interface using clap.
///
/// - `list` - Fetch and print earthquakes
/// - `show <index>` - Print details for one earthquake
/// - `legend` - Print the magnitude legend
/// - `tui` - Launch the TUI
pub mod cli;

/// Configuration loaded from `~/.config/quakewatch/config.toml`.
pub mod config;

/// GeoJSON decoding with field-level error context.
pub mod decoder;

/// Core domain models.
///
/// - [`Earthquake`](domain::Earthquake): A normalized seismic event
/// - [`ErrorKind`](domain::ErrorKind): Classified fetch failures
/// - [`MagnitudeClass`](domain::MagnitudeClass): Legend buckets
pub mod domain;

/// HTTP fetching.
///
/// - [`FeedClient`](fetcher::FeedClient): Async trait for feed sources
/// - [`HttpFeedClient`](fetcher::HttpFeedClient): reqwest-based implementation
pub mod fetcher;

/// Maps decoded feed records into [`Earthquake`](domain::Earthquake)s.
pub mod normalizer;

/// User-facing wording for errors, details and the legend.
pub mod presentation;

/// The in-memory earthquake store.
///
/// - [`EarthquakeStore`](store::EarthquakeStore): Owns the fetched feed and the visible view
/// - [`StoreSnapshot`](store::StoreSnapshot): What observers receive on every change
pub mod store;

/// Terminal user interface.
///
/// List pane, detail pane (or legend), status bar.
///
/// Keybindings: j/k navigate, m/d sort, / searches, c clears,
/// l toggles the legend, R refreshes, q quits.
pub mod tui;
