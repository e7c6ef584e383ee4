pub mod check;
pub mod create;
pub mod edit;
pub mod redact;
pub mod set;
pub mod setup;
pub mod show;
pub mod steps;

use crate::Context;
use crate::kiosk::Kiosk;
use anyhow::Result;
use forge::Logger;
use std::path::Path;

/// Load a kiosk file, printing every problem found before failing.
pub fn load_kiosk(ctx: &Context, path: &Path) -> Result<Kiosk> {
    let mut kiosk = Kiosk::new(ctx.version.clone())?;
    kiosk.load(path, |problem| ctx.logger.error(&problem.to_string()))?;
    Ok(kiosk)
}
