//! GitHub repository tracking service
//!
//! - REST API endpoints in `endpoints/`
//! - PostgreSQL models and queries in `db/`
//! - Environment configuration in `config` (DATABASE_URL required,
//!   GITHUB_TOKEN optional)

pub mod config;
pub mod db;
pub mod endpoints;
