use crate::Context;
use crate::commands::load_kiosk;
use crate::kiosk::{self, Kiosk};
use crate::ui;
use anyhow::Result;
use serde::Serialize;
use std::path::Path;

/// Machine-readable view of a kiosk file.
#[derive(Serialize)]
struct KioskReport {
    file: String,
    version: String,
    settings: serde_json::Value,
    warnings: Vec<String>,
}

pub fn run(ctx: &Context, path: &Path, json: bool, reveal: bool) -> Result<()> {
    let kiosk = load_kiosk(ctx, path)?;

    if json {
        let report = KioskReport {
            file: path.display().to_string(),
            version: ctx.version.version.clone(),
            settings: kiosk.to_json(reveal),
            warnings: kiosk.check()?,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if !ctx.quiet {
        ui::banner(&ctx.version);
    }
    ui::header(&path.display().to_string());
    print_settings(ctx, &kiosk, reveal);
    Ok(())
}

fn print_settings(ctx: &Context, kiosk: &Kiosk, reveal: bool) {
    for field in kiosk.fields().iter() {
        let value = if !reveal && kiosk::is_secret(field) {
            fields::REDACTED.to_string()
        } else {
            field.text()
        };
        ui::setting(field.name(), &value);
        if ctx.verbose > 0 {
            ui::hint(&format!("({})", field.description()));
        }
    }
}
