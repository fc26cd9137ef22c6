//! TUI-less "say" command

use std::error::Error;
use std::io::{self, Write};

use crate::core::session::ChatBackend;

pub async fn run_say(backend: &dyn ChatBackend, text: &str) -> Result<(), Box<dyn Error>> {
    if text.trim().is_empty() {
        return Err("Usage: kwebbel say <text>".into());
    }

    let opening = backend.start_new_conversation().await;
    let reply = backend.send_message(text).await;

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", opening.value())?;
    writeln!(stdout)?;
    writeln!(stdout, "> {text}")?;
    writeln!(stdout)?;
    writeln!(stdout, "{}", reply.value())?;
    stdout.flush()?;
    Ok(())
}
