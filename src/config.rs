// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Adipotech

//! # Runtime Configuration
//!
//! Configuration is loaded from the environment at startup.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `DATA_DIR` | Root directory for JSON storage | `./data` |
//! | `JWT_SECRET` | HS256 signing secret for bearer tokens | `devsecret` (rotate!) |
//! | `ADMIN_PASSWORD` | Password for the seeded admin account | `adminpass` (rotate!) |
//! | `PUBLIC_CONTENTS` | Allow anonymous content listing (`true`/`1`) | `false` |
//! | `PUBLIC_COMMENTS` | Allow anonymous comment posting | `false` |
//! | `PUBLIC_AI` | Allow anonymous completion requests | `false` |
//! | `FRONTEND_URL` | Base URL for checkout redirect targets | `http://localhost:3000` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |
//!
//! Provider credentials (`STRIPE_SECRET_KEY`, `OPENAI_API_KEY`,
//! `MAIL_API_URL` and friends) are read by the provider constructors in
//! [`crate::providers`]; a missing credential disables that provider
//! rather than failing startup.

use std::env;
use std::path::PathBuf;

use crate::auth::{AccessPolicy, Visibility};

/// Environment variable name for the storage root.
pub const DATA_DIR_ENV: &str = "DATA_DIR";

/// Environment variable name for the token signing secret.
pub const JWT_SECRET_ENV: &str = "JWT_SECRET";

/// Environment variable name for the seeded admin password.
pub const ADMIN_PASSWORD_ENV: &str = "ADMIN_PASSWORD";

const DEFAULT_JWT_SECRET: &str = "devsecret";
const DEFAULT_ADMIN_PASSWORD: &str = "adminpass";
const DEFAULT_FRONTEND_URL: &str = "http://localhost:3000";

/// Application configuration resolved from the environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub data_dir: PathBuf,
    pub jwt_secret: String,
    pub admin_password: String,
    pub frontend_url: String,
    pub public_contents: bool,
    pub public_comments: bool,
    pub public_ai: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            data_dir: PathBuf::from("./data"),
            jwt_secret: DEFAULT_JWT_SECRET.to_string(),
            admin_password: DEFAULT_ADMIN_PASSWORD.to_string(),
            frontend_url: DEFAULT_FRONTEND_URL.to_string(),
            public_contents: false,
            public_comments: false,
            public_ai: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from the environment, falling back to defaults.
    ///
    /// Warns loudly when the signing secret or admin password is left at
    /// its development default.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let config = Self {
            host: env_or("HOST", defaults.host),
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.port),
            data_dir: env::var(DATA_DIR_ENV)
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            jwt_secret: env_or(JWT_SECRET_ENV, defaults.jwt_secret),
            admin_password: env_or(ADMIN_PASSWORD_ENV, defaults.admin_password),
            frontend_url: env_or("FRONTEND_URL", defaults.frontend_url),
            public_contents: env_flag("PUBLIC_CONTENTS"),
            public_comments: env_flag("PUBLIC_COMMENTS"),
            public_ai: env_flag("PUBLIC_AI"),
        };

        if config.jwt_secret == DEFAULT_JWT_SECRET {
            tracing::warn!("JWT_SECRET is not set; using the development default. Set JWT_SECRET before exposing this server.");
        }
        if config.admin_password == DEFAULT_ADMIN_PASSWORD {
            tracing::warn!("ADMIN_PASSWORD is not set; the seeded admin uses the well-known default password.");
        }

        config
    }

    /// Visibility policy derived from the public-access toggles.
    pub fn access_policy(&self) -> AccessPolicy {
        AccessPolicy {
            contents: Visibility::from_public_toggle(self.public_contents),
            comments: Visibility::from_public_toggle(self.public_comments),
            ai: Visibility::from_public_toggle(self.public_ai),
        }
    }
}

fn env_or(name: &str, default: String) -> String {
    match env::var(name) {
        Ok(value) if !value.is_empty() => value,
        _ => default,
    }
}

/// `true` and `1` enable a toggle; anything else (or unset) leaves it off.
fn env_flag(name: &str) -> bool {
    matches!(
        env::var(name).as_deref(),
        Ok("true") | Ok("TRUE") | Ok("1")
    )
}
