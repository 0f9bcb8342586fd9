//! RagDesk console: terminal front end for the knowledge base
//!
//! Screens mirror the knowledge-base surfaces: chat, document library,
//! upload queue, search, analytics, and settings. All of them run
//! against the service traits, so the console works the same over the
//! simulated backends and over real ones.

pub mod analytics;
pub mod chat;
pub mod command;
pub mod console;
pub mod documents;
pub mod search;
pub mod settings;
pub mod ui;
pub mod upload;

pub use command::{parse, Command, DocsCommand, SearchCommand, SettingsCommand, UploadCommand};
pub use console::{Backends, Console};
