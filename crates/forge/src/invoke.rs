//! Subprocess invocation with merged output

use crate::types::ActionResult;
use std::ffi::OsStr;
use std::io::Read;
use std::process::{Command, Stdio};

/// Run a program and wait for it to exit.
///
/// Standard output and standard error share one pipe, so the captured text
/// keeps the order the program wrote it in. The exit code becomes the
/// result status; a program killed by a signal reports -1.
pub fn invoke<I, S>(program: &str, args: I) -> std::io::Result<ActionResult>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let (mut reader, writer) = std::io::pipe()?;

    let mut command = Command::new(program);
    command
        .args(args)
        .stdin(Stdio::null())
        .stdout(writer.try_clone()?)
        .stderr(writer);

    log::debug!("Running {command:?}");
    let mut child = command.spawn()?;

    // The command holds the write ends; reading would never see EOF otherwise
    drop(command);

    let mut output = Vec::new();
    reader.read_to_end(&mut output)?;
    let status = child.wait()?;

    Ok(ActionResult::new(
        status.code().unwrap_or(-1),
        String::from_utf8_lossy(&output).trim(),
    ))
}
