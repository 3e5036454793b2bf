//! # Assetsync Core Library
//!
//! This crate copies the public asset directories that Composer dependencies declare
//! into the consuming project, right after the package manager has installed them.
//!
//! A dependency publishes assets through `extra.assets-dir` in its own `composer.json`,
//! either as a single directory (the `public` namespace) or as a map of namespaces
//! to directories. The project declares, under the same key, where each namespace
//! lands. Every matching namespace is copied to `<destination>/<vendor>/<name>`,
//! replacing whatever a previous run left there.
//!
//! ## Modules Overview
//! - [`manifest`] – Parsing of the project's `composer.json` and of dependency manifests
//! - [`config`] – Namespace maps and the `assets-dir` normalization rules
//! - [`installer`] – The synchronization engine that walks dependencies and copies assets
//! - [`directory`] – Recursive directory delete and copy
//! - [`status`] – Per-dependency outcome records
//! - [`logger`] – Leveled log sinks (console and in-memory)
//! - [`error`] – Error type shared by all of the above


pub mod config;
pub mod directory;
pub mod error;
pub mod installer;
pub mod logger;
pub mod manifest;
pub mod status;

pub use config::*;
pub use directory::*;
pub use error::{AssetsError, Result};
pub use installer::*;
pub use logger::*;
pub use manifest::*;
pub use status::*;
