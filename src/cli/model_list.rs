//! Model listing functionality

use std::error::Error;
use std::io::{self, Write};

use crate::core::session::ChatBackend;

pub async fn list_models(backend: &dyn ChatBackend) -> Result<(), Box<dyn Error>> {
    let models = backend.get_available_models().await;
    let mut stdout = io::stdout().lock();
    write_model_list(&mut stdout, models.value())?;
    Ok(())
}

fn write_model_list<W: Write>(out: &mut W, models: &[String]) -> io::Result<()> {
    if models.is_empty() {
        writeln!(out, "Geen modellen beschikbaar.")?;
        return Ok(());
    }
    writeln!(out, "Beschikbare modellen:")?;
    for model in models {
        writeln!(out, "  {model}")?;
    }
    Ok(())
}
