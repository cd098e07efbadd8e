//! Command line interface for Docshelf.
//!
//! Loads configuration, builds a [`DocLibrary`](docshelf_content::DocLibrary)
//! over the configured documentation root, and runs one of the commands:
//! list, show, menu, build, version or config.
//!
//! # Key Abstractions
//!
//! - `DocshelfCli<C>`: CLI application parameterized over config provider
//! - `SiteWriter`: a `PageRegistrar` that writes the menu as static HTML

#![doc = include_str!("../README.md")]

pub mod app;
pub mod cli;
pub mod config;
pub mod config_handlers;
pub mod site;

pub use app::DocshelfCli;
pub use cli::{CliArgs, Command, ConfigAction, ConfigCommand};
pub use config::DocshelfConfig;
pub use site::SiteWriter;
