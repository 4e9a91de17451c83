//! RecMusic Core
//!
//! Platform-agnostic domain types, session handling and configuration shared
//! by the RecMusic client libraries.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Track`, `User`, `Playlist`, `ActivityEntry`, `DisplayMode`
//! - **Session Store**: the `SessionStore` trait and a cookie-jar implementation
//! - **Configuration**: layered `RecMusicConfig` (file + `RECMUSIC_*` env)
//! - **Error Handling**: `CoreError` and `Result`
//!
//! # Example
//!
//! ```rust
//! use recmusic_core::{CookieSessionStore, SessionStore, User};
//!
//! let session = CookieSessionStore::new();
//! session.login("access", "refresh", &User::new(7, "alice"));
//!
//! assert_eq!(session.access_token().as_deref(), Some("access"));
//! assert_eq!(session.user().map(|u| u.id), Some(7));
//! ```

#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod session;
pub mod types;

pub use config::{ActivitySettings, ApiSettings, PlaybackSettings, RecMusicConfig};
pub use error::{CoreError, Result};
pub use session::{CookieSessionStore, SessionStore};
pub use types::{ActivityEntry, ActivityKind, DisplayMode, Playlist, Track, User};
