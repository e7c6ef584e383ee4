use crate::Context;
use crate::commands::load_kiosk;
use crate::error::AppError;
use crate::kiosk::RedactProfile;
use crate::ui;
use anyhow::Result;
use std::path::Path;

pub fn run(ctx: &Context, path: &Path, output: &Path, profile: RedactProfile) -> Result<()> {
    if path == output {
        return Err(AppError::Kiosk(
            "Refusing to overwrite the kiosk file with a redacted copy".into(),
        )
        .into());
    }

    let mut kiosk = load_kiosk(ctx, path)?;
    kiosk.redact(profile)?;
    kiosk.save(output)?;

    if !ctx.quiet {
        let names: Vec<&str> = profile.settings().iter().map(|s| s.name()).collect();
        ui::success(&format!(
            "Wrote {} with {} hidden",
            output.display(),
            names.join(", ")
        ));
    }
    Ok(())
}
