//! # Configuration
//!
//! Layered settings: built-in defaults, `config/default.toml`,
//! `config/{RUN_ENV}.toml`, then `APP__SECTION__KEY` environment variables.
//! A handful of conventional variables (`DATABASE_URL`, `JWT_SECRET`,
//! `SERVER_HOST`, `SERVER_PORT`) win over everything. A `.env` file is read
//! first when present.
//!
//! ```rust,ignore
//! use social_server::config::Settings;
//!
//! let settings = Settings::load()?;
//! assert!(settings.jwt.secret.len() >= 32);
//! ```

mod settings;

pub use settings::*;
