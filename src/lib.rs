//! # Akshar
//!
//! Client core for the Akshar writing platform: typed access to the
//! blogging backend, a persisted sign-in session, and view fetchers that
//! keep public pages readable when the backend cannot be reached.
//!
//! ## Architecture
//!
//! ```text
//! SessionStore ─┐
//!               ├→ ApiClient → Transport → backend
//! View fetchers ┘      ↓
//!                   Resource<T> ← fallback (demo articles)
//! ```
//!
//! - [`api`]: HTTP client, response envelopes, bearer propagation
//! - [`session`]: The single authenticated-session store
//! - [`fetcher`]: Per-view load/fallback/mutation logic
//! - [`fallback`]: Bundled demo articles
//! - [`store`]: SQLite-backed key/value persistence
//!
//! ## Quick Start
//!
//! ```bash
//! # Browse stories (demo content if the backend is down)
//! akshar blogs --search "deep work"
//!
//! # Sign in and read your feed
//! AKSHAR_PASSWORD=... akshar login me@example.com
//! akshar feed
//!
//! # Write
//! akshar create "My first story" --content "<p>Hello</p>" --tag writing --publish
//! ```

/// HTTP access to the backend.
///
/// - [`ApiClient`](api::ApiClient): resolves paths, attaches the bearer
///   token, classifies error statuses
/// - [`Transport`](api::Transport): async trait over the wire
/// - [`HttpTransport`](api::HttpTransport): reqwest-based implementation
pub mod api;

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires together the store,
/// session, theme and API client, and constructs views.
pub mod app;

/// Command-line interface using clap.
pub mod cli;

/// Configuration loaded from `~/.config/akshar/config.toml`.
pub mod config;

/// Core domain models.
///
/// - [`Article`](domain::Article), [`Comment`](domain::Comment),
///   [`User`](domain::User), [`Notification`](domain::Notification)
/// - [`Session`](domain::Session): token plus user, or anonymous
/// - [`Draft`](domain::Draft): editable article fields with tag rules
pub mod domain;

/// Bundled demo articles used when public views cannot reach the backend.
pub mod fallback;

/// View fetchers.
///
/// - [`BlogList`](fetcher::BlogList), [`BlogDetail`](fetcher::BlogDetail):
///   public, may degrade to demo content
/// - [`Profile`](fetcher::Profile), [`Feed`](fetcher::Feed),
///   [`Notifications`](fetcher::Notifications), [`Editor`](fetcher::Editor):
///   strict
/// - [`ViewScope`](fetcher::ViewScope): cancels in-flight requests when a
///   view goes away
pub mod fetcher;

/// Authenticated session store with change notification.
pub mod session;

/// Key/value persistence.
///
/// - [`Store`](store::Store): Trait defining storage operations
/// - [`SqliteStore`](store::SqliteStore): SQLite implementation
pub mod store;

/// Light/dark preference.
pub mod theme;
