//! # Voice Agent Admin
//!
//! Administrative client for a voice-agent booking backend. A business
//! owner signs in, then manages the business profile, the knowledge base the
//! agent answers from, the services catalogue and the booking rules, and
//! reviews call logs and headline counts.
//!
//! ## Modules
//!
//! - [`api`]: typed REST client with bearer auth and retries
//! - [`session`]: token + business id, persisted through a [`SessionStore`]
//! - [`router`]: routes and the route guard
//! - [`views`]: one controller per page
//! - [`shell`]: navigation, guard enforcement and page chrome
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use voiceagent_admin::{ApiClient, Config, MemorySessionStore, SessionContext, Shell};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();
//!     let session = SessionContext::new(Arc::new(MemorySessionStore::default()));
//!     session.init()?;
//!
//!     let client = ApiClient::new(&config.api, session)?;
//!     let mut shell = Shell::new(client);
//!
//!     // Without a session every protected page lands on the login form
//!     shell.navigate("/services").await?;
//!     println!("{}", shell.render());
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod router;
pub mod session;
pub mod shell;
pub mod views;

// Re-export top-level types for convenience
pub use api::{
    ApiClient, ApiError, ApiResult, BookingRules, Business, BusinessUpdate, CallLog,
    KnowledgeDoc, NewKnowledgeDoc, NewService, RetryPolicy, Service, ServiceUpdate,
};

pub use config::{ApiConfig, Config, ConfigError, LoadReport, LoggingConfig, SessionConfig};

pub use router::{evaluate, Route, RouteDecision};

pub use session::{
    FileSessionStore, MemorySessionStore, Session, SessionContext, SessionError, SessionStore,
    TokenClaims, TokenError,
};

pub use shell::{ActiveView, Navigation, Shell};

pub use views::{Notice, NoticeKind, View, ViewError, ViewResult, ViewScope};
