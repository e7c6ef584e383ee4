use crate::Context;
use crate::error::AppError;
use crate::kiosk::{self, Kiosk, Setting};
use crate::ui;
use anyhow::Result;
use std::path::Path;

/// Whether `path` carries the kiosk file extension.
pub fn has_kiosk_extension(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(kiosk::EXTENSION))
}

pub fn run(ctx: &Context, path: &Path, force: bool) -> Result<()> {
    if !has_kiosk_extension(path) {
        return Err(AppError::Usage(format!(
            "kioskforge create FILE.{}",
            kiosk::EXTENSION
        ))
        .into());
    }
    if path.exists() && !force {
        return Err(AppError::Kiosk(format!(
            "File already exists: {} (use --force to overwrite)",
            path.display()
        ))
        .into());
    }

    let mut kiosk = Kiosk::new(ctx.version.clone())?;
    kiosk.assign(Setting::Hostname.name(), &kiosk::hostname_create("kiosk"))?;
    kiosk.save(path)?;

    log::info!("Created kiosk file {}", path.display());
    if !ctx.quiet {
        ui::success(&format!("Created {}", path.display()));
        ui::hint("Edit the file with any text editor or 'kioskforge edit'.");
    }
    Ok(())
}
