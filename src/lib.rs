//! Relay composer core - Elm-style selection toolbar and AI feedback panel
//!
//! This crate provides the state, messages and update logic for a draft
//! surface with a selection-anchored floating layer: a format toolbar
//! (bold, italic, AI revise) and a feedback panel collecting revision
//! instructions. It also carries the SSE pass-through used to stream AI
//! output from the backend.

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod editable;
pub mod measure;
pub mod messages;
pub mod model;
pub mod overlay;
pub mod pointer;
pub mod proxy;
pub mod telemetry;
pub mod tracing;
pub mod update;

// Re-export commonly used types
pub use commands::Cmd;
pub use config::ComposerConfig;
pub use messages::Msg;
pub use model::ComposerModel;
