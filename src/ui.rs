//! Terminal output for the interactive commands.
//!
//! Provisioning output goes through [`crate::logger`] instead, since it must
//! also reach the system log.

use colored::Colorize;
use fields::Version;

/// Width of the setting name column.
const NAME_WIDTH: usize = 18;

pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

pub fn warn(msg: &str) {
    println!("{} {}", "⚠".yellow(), msg);
}

/// Errors go to stderr so they survive `show --json > file`.
pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

/// Indented, muted text such as field hints.
pub fn hint(msg: &str) {
    println!("  {}", msg.dimmed());
}

/// Program banner followed by the copyright line.
pub fn banner(version: &Version) {
    println!("{}", version.banner().bold());
    println!("{}", version.copyright().dimmed());
}

/// Underlined title.
pub fn header(title: &str) {
    println!();
    println!("{}", title.bold());
    println!("{}", "─".repeat(title.chars().count()).dimmed());
}

pub fn section(title: &str) {
    println!();
    println!("{}", title.cyan().bold());
}

/// One `name  value` row of a kiosk listing; empty values show as a dash.
pub fn setting(name: &str, value: &str) {
    let value = if value.is_empty() {
        "-".dimmed().to_string()
    } else {
        value.to_string()
    };
    println!("  {:<NAME_WIDTH$} {value}", name.cyan());
}

/// One numbered provisioning step, right-aligned to the widest number.
pub fn step(num: usize, total: usize, title: &str) {
    let width = total.to_string().len();
    println!("{} {title}", format!("{num:>width$}").blue().bold());
}
