use crate::Context;
use crate::commands::load_kiosk;
use crate::ui;
use anyhow::Result;
use std::path::Path;

pub fn run(ctx: &Context, path: &Path) -> Result<()> {
    let kiosk = load_kiosk(ctx, path)?;
    let warnings = kiosk.check()?;

    for warning in &warnings {
        ui::warn(warning);
    }
    if !ctx.quiet {
        if warnings.is_empty() {
            ui::success(&format!("{} is valid", path.display()));
        } else {
            ui::success(&format!(
                "{} is valid ({} warning(s))",
                path.display(),
                warnings.len()
            ));
        }
    }
    Ok(())
}
