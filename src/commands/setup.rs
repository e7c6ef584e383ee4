use crate::Context;
use crate::commands::load_kiosk;
use crate::error::AppError;
use crate::kiosk::Setting;
use crate::{network, recipe};
use anyhow::{Context as _, Result};
use forge::actions;
use forge::{Action, ActionContext, Logger, users};
use std::path::Path;

/// Reject resume steps outside the script before anything runs.
pub fn check_resume(resume: usize, count: usize) -> Result<()> {
    if resume == 0 || resume > count {
        return Err(AppError::Usage(format!(
            "kioskforge setup FILE [STEP] (STEP must be between 1 and {count})"
        ))
        .into());
    }
    Ok(())
}

fn report_offline(logger: &dyn Logger) {
    let rule = "*".repeat(79);
    logger.error(&rule);
    logger.error("*** FATAL ERROR: NO INTERNET CONNECTION AVAILABLE!");
    logger.error("*** (Please check the Wi-Fi name and password - both are case-sensitive.)");
    logger.error(&rule);
}

pub fn run(ctx: &Context, path: &Path, resume: Option<usize>, reboot: bool) -> Result<()> {
    let logger: &dyn Logger = &ctx.logger;
    logger.write(&ctx.version.banner());
    logger.write("");

    if !cfg!(target_os = "linux") {
        return Err(
            AppError::Kiosk("This command can only be run on a Linux kiosk machine".into()).into(),
        );
    }
    if users::effective_uid() != 0 {
        return Err(
            AppError::Kiosk("You must be root (use 'sudo') to run this command".into()).into(),
        );
    }

    if !network::wait_online(logger) {
        report_offline(logger);
        return Err(AppError::Kiosk("No active network connections detected".into()).into());
    }
    match network::lan_ip_address() {
        Ok(ip) => logger.write(&format!("*** LAN IP: {ip}")),
        Err(e) => log::warn!("Unable to determine LAN IP address: {e}"),
    }
    logger.write("");

    let kiosk = load_kiosk(ctx, path)?;
    let user_name = kiosk.text(Setting::UserName)?;
    let user = users::lookup(&user_name)
        .with_context(|| format!("The kiosk user '{user_name}' must exist before setup"))?;
    let layout = recipe::layout_for(&user.home, path);

    // SAFETY: no other threads exist yet; every child process inherits this
    unsafe {
        std::env::set_var("DEBIAN_FRONTEND", "noninteractive");
    }

    let resume = resume.unwrap_or(1);
    let script = recipe::build(&kiosk, &layout, logger, resume)?;
    check_resume(resume, script.len())?;

    logger.write("Forging kiosk (takes between 10 and 30 minutes):");
    logger.write("");
    let result = script.execute()?;
    if !result.is_success() {
        return Err(AppError::Kiosk(format!(
            "Setup failed; fix the problem above, then run 'kioskforge setup {} STEP' \
             with the step number shown to resume",
            path.display()
        ))
        .into());
    }

    if !reboot {
        logger.write("*** SUCCESS - REBOOT THE SYSTEM TO START THE KIOSK");
        return Ok(());
    }

    logger.write("*** SUCCESS - REBOOTING SYSTEM INTO KIOSK MODE");
    let result = actions::reboot().execute(&ActionContext::new(logger))?;
    if !result.is_success() {
        return Err(AppError::Kiosk(format!("Unable to reboot: {}", result.output)).into());
    }
    Ok(())
}
