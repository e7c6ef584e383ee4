use crate::Context;
use crate::commands::load_kiosk;
use crate::error::AppError;
use crate::ui;
use anyhow::Result;
use std::path::Path;

/// Split `name=value`; the value may itself contain `=`.
pub fn parse_assignment(text: &str) -> Result<(&str, &str)> {
    let (name, value) = text.split_once('=').ok_or_else(|| {
        AppError::Usage(format!(
            "kioskforge set FILE NAME=VALUE... (got '{text}')"
        ))
    })?;
    Ok((name.trim(), value.trim()))
}

pub fn run(ctx: &Context, path: &Path, assignments: &[String]) -> Result<()> {
    let mut kiosk = load_kiosk(ctx, path)?;

    for text in assignments {
        let (name, value) = parse_assignment(text)?;
        if !kiosk.fields().contains(name) {
            return Err(AppError::Kiosk(format!("Unknown field: {name}")).into());
        }
        kiosk.assign(name, value)?;
        log::debug!("{name} = {value}");
    }

    kiosk.save(path)?;
    if !ctx.quiet {
        ui::success(&format!(
            "Updated {} setting(s) in {}",
            assignments.len(),
            path.display()
        ));
    }
    Ok(())
}
