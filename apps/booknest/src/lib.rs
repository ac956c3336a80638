//! # BookNest Application Library
//!
//! Composition root and screen state for the BookNest book store.
//!
//! ## Module Organization
//! ```text
//! booknest_app/
//! ├── lib.rs          ◄─── You are here
//! ├── config.rs       ◄─── AppConfig from BOOKNEST_* env vars
//! ├── telemetry.rs    ◄─── tracing subscriber setup
//! ├── context.rs      ◄─── AppContext: opens storage once, builds state
//! ├── error.rs        ◄─── AppError { code, message } for the screens
//! └── state/
//!     ├── auth.rs     ◄─── login / registration form
//!     ├── catalog.rs  ◄─── book listing (SQLite backed)
//!     ├── wishlist.rs ◄─── saved books (in memory)
//!     ├── review.rs   ◄─── reader reviews (in memory)
//!     └── order.rs    ◄─── pending order (in memory)
//! ```
//!
//! ## Usage
//! ```rust,ignore
//! use booknest_app::{AppConfig, AppContext};
//!
//! let ctx = AppContext::bootstrap(AppConfig::load()?).await?;
//!
//! let catalog = ctx.catalog_state();
//! catalog.refresh().await?;
//!
//! let auth = ctx.auth_state();
//! auth.set_email("ann@x.com");
//! auth.set_password("pw1");
//! auth.login().await?;
//! ```

pub mod config;
pub mod context;
pub mod error;
pub mod state;
pub mod telemetry;

pub use config::{AppConfig, ConfigError};
pub use context::AppContext;
pub use error::{AppError, AppResult, ErrorCode};
