//! TUI-less "clear-memory" command

use std::error::Error;
use std::io::{self, Write};

use crate::core::session::ChatBackend;

/// The backend gives no usable outcome for this call, so the notice only
/// says the request went out. Failures end up in the debug log.
pub const CLEAR_MEMORY_NOTICE: &str = "Verzoek om het geheugen te wissen is verstuurd.";

pub async fn run_clear_memory(backend: &dyn ChatBackend) -> Result<(), Box<dyn Error>> {
    let mut out = Vec::new();
    clear_memory_to(backend, &mut out).await?;
    io::stdout().write_all(&out)?;
    Ok(())
}

async fn clear_memory_to<W: Write>(backend: &dyn ChatBackend, out: &mut W) -> io::Result<()> {
    backend.clear_memory().await;
    writeln!(out, "{CLEAR_MEMORY_NOTICE}")
}
