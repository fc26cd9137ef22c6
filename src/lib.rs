//! Kwebbel is a terminal chat client for a conversational backend.
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`api`] defines the backend payloads and the HTTP client.
//! - [`core`] owns the session controller, view state and the reducer that
//!   turns user gestures and backend completions into state changes.
//! - [`ui`] renders the terminal interface and runs the interactive event loop.
//! - [`cli`] parses arguments and dispatches into the chat view or one of the
//!   one-shot commands.
//!
//! The binary (`src/main.rs`) routes through [`crate::cli::main`].

pub mod api;
pub mod cli;
pub mod core;
pub mod ui;
pub mod utils;
