use crate::Context;
use crate::commands::load_kiosk;
use crate::recipe;
use crate::ui;
use anyhow::Result;
use forge::NoLog;
use std::path::Path;

pub fn run(ctx: &Context, path: &Path, home: &Path) -> Result<()> {
    let kiosk = load_kiosk(ctx, path)?;
    let layout = recipe::layout_for(home, path);
    let log = NoLog;
    let script = recipe::build(&kiosk, &layout, &log, 1)?;

    ui::header(&format!("{} steps for {}", script.len(), path.display()));
    let total = script.len();
    for (index, title) in script.titles().enumerate() {
        ui::step(index + 1, total, title);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_context;

    #[test]
    fn test_steps_lists_default_kiosk() {
        let ctx = test_context();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("steps.kiosk");
        crate::commands::create::run(&ctx, &path, false).unwrap();
        run(&ctx, &path, Path::new("/home/kiosk")).unwrap();
    }
}
