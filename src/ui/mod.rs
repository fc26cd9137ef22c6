//! Terminal UI layer for the chat view.
//!
//! - [`chat_loop`]: the interaction loop that routes keys into actions and
//!   spawns backend work.
//! - [`renderer`] and [`transcript`]: frame composition and message layout.
//! - [`theme`]: colors and styles.
//! - [`picker`]: the model dropdown.

pub mod chat_loop;
pub mod picker;
pub mod renderer;
pub mod theme;
pub mod transcript;
