mod cli;
mod commands;
mod error;
mod kiosk;
mod logger;
mod network;
mod recipe;
mod ui;
mod version;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::generate;
use cli::{Cli, Command};
use fields::Version;
use forge::Logger;
use logger::SystemLogger;
use std::io;
use std::process::ExitCode;

/// Global context for the application
pub struct Context {
    pub verbose: u8,
    pub quiet: bool,
    pub version: Version,
    pub logger: SystemLogger,
}

fn main() -> ExitCode {
    // Release builds abort on panic, so report here and exit like any other failure
    std::panic::set_hook(Box::new(|info| {
        let location = info
            .location()
            .map(|l| format!(" at {}:{}", l.file(), l.line()))
            .unwrap_or_default();
        log::debug!("panic{location}");
        ui::error(&error::describe_panic(info.payload()));
        std::process::exit(1);
    }));

    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let log_level = match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(if cli.quiet {
            log::LevelFilter::Error
        } else {
            log_level
        })
        .format_timestamp(None)
        .init();

    // Only provisioning runs unattended, so only it goes to the system log
    let logger = if matches!(cli.command, Command::Setup { .. }) && !cli.no_syslog {
        SystemLogger::with_syslog("kioskforge")
    } else {
        SystemLogger::console()
    };

    let ctx = Context {
        verbose: cli.verbose,
        quiet: cli.quiet,
        version: version::current(),
        logger,
    };

    match dispatch(&ctx, cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::debug!("{e:?}");
            ctx.logger.error(&error::describe(&e));
            ExitCode::FAILURE
        }
    }
}

fn dispatch(ctx: &Context, command: Command) -> Result<()> {
    match command {
        Command::Create { path, force } => commands::create::run(ctx, &path, force),
        Command::Check { path } => commands::check::run(ctx, &path),
        Command::Show { path, json, reveal } => commands::show::run(ctx, &path, json, reveal),
        Command::Set { path, assignments } => commands::set::run(ctx, &path, &assignments),
        Command::Edit { path } => commands::edit::run(ctx, &path),
        Command::Redact {
            path,
            output,
            profile,
        } => commands::redact::run(ctx, &path, &output, profile),
        Command::Steps { path, home } => commands::steps::run(ctx, &path, &home),
        Command::Setup {
            path,
            resume,
            no_reboot,
        } => commands::setup::run(ctx, &path, resume, !no_reboot),
        Command::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "kioskforge", &mut io::stdout());
            Ok(())
        }
    }
}

#[cfg(test)]
pub fn test_context() -> Context {
    Context {
        verbose: 0,
        quiet: true,
        version: version::current(),
        logger: SystemLogger::console(),
    }
}
