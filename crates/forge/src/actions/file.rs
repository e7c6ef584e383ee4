//! Actions that change local files and folders.
//!
//! Filesystem failures are reported as failing results carrying the OS
//! error text, never as errors, so the script can log them and stop.

use crate::action::Action;
use crate::context::ActionContext;
use crate::types::ActionResult;
use crate::users;
use anyhow::Result;
use std::fs::{self, DirBuilder, OpenOptions};
use std::io::Write;
use std::os::unix::fs::{DirBuilderExt, PermissionsExt, chown};
use std::path::{Path, PathBuf};

/// Turn the outcome of a filesystem operation on `path` into a result.
fn complete(path: &Path, outcome: std::io::Result<()>) -> ActionResult {
    match outcome {
        Ok(()) => ActionResult::success(),
        Err(e) => ActionResult::new(
            e.raw_os_error().unwrap_or(1),
            format!("{}: {e}", path.display()),
        ),
    }
}

/// Create (or truncate) a file with the given text.
#[derive(Debug, Clone)]
pub struct CreateText {
    title: String,
    path: PathBuf,
    text: String,
}

impl CreateText {
    /// Create the action.
    pub fn new(title: impl Into<String>, path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            path: path.into(),
            text: text.into(),
        }
    }
}

impl Action for CreateText {
    fn title(&self) -> &str {
        &self.title
    }

    fn execute(&self, _ctx: &ActionContext) -> Result<ActionResult> {
        Ok(complete(&self.path, fs::write(&self.path, &self.text)))
    }
}

/// Append text to a file, creating it if needed.
#[derive(Debug, Clone)]
pub struct AppendText {
    title: String,
    path: PathBuf,
    text: String,
}

impl AppendText {
    /// Create the action.
    pub fn new(title: impl Into<String>, path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            path: path.into(),
            text: text.into(),
        }
    }
}

impl Action for AppendText {
    fn title(&self) -> &str {
        &self.title
    }

    fn execute(&self, _ctx: &ActionContext) -> Result<ActionResult> {
        let outcome = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .and_then(|mut file| file.write_all(self.text.as_bytes()));
        Ok(complete(&self.path, outcome))
    }
}

/// Replace every occurrence of a substring in an existing file.
///
/// Fails when the substring is absent, so that an edit against a file whose
/// format changed is noticed instead of silently doing nothing.
#[derive(Debug, Clone)]
pub struct ReplaceText {
    title: String,
    path: PathBuf,
    source: String,
    target: String,
}

impl ReplaceText {
    /// Create the action.
    pub fn new(
        title: impl Into<String>,
        path: impl Into<PathBuf>,
        source: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            path: path.into(),
            source: source.into(),
            target: target.into(),
        }
    }
}

impl Action for ReplaceText {
    fn title(&self) -> &str {
        &self.title
    }

    fn execute(&self, _ctx: &ActionContext) -> Result<ActionResult> {
        if self.source == self.target {
            anyhow::bail!(
                "Replacement text is identical to the text it replaces in {}",
                self.path.display()
            );
        }

        match fs::metadata(&self.path) {
            Ok(meta) if meta.is_file() => {}
            Ok(_) => {
                return Ok(ActionResult::failure(format!(
                    "Not a regular file: {}",
                    self.path.display()
                )));
            }
            Err(e) => return Ok(complete(&self.path, Err(e))),
        }

        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) => return Ok(complete(&self.path, Err(e))),
        };
        if !text.contains(&self.source) {
            return Ok(ActionResult::failure(format!(
                "Text not found in {}: {}",
                self.path.display(),
                self.source
            )));
        }

        let text = text.replace(&self.source, &self.target);
        Ok(complete(&self.path, fs::write(&self.path, text)))
    }
}

/// Delete a file that must exist.
#[derive(Debug, Clone)]
pub struct DeleteFile {
    title: String,
    path: PathBuf,
}

impl DeleteFile {
    /// Create the action.
    pub fn new(title: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            title: title.into(),
            path: path.into(),
        }
    }
}

impl Action for DeleteFile {
    fn title(&self) -> &str {
        &self.title
    }

    fn execute(&self, _ctx: &ActionContext) -> Result<ActionResult> {
        Ok(complete(&self.path, fs::remove_file(&self.path)))
    }
}

/// Delete a file if it exists.
#[derive(Debug, Clone)]
pub struct TryDeleteFile {
    title: String,
    path: PathBuf,
}

impl TryDeleteFile {
    /// Create the action.
    pub fn new(title: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            title: title.into(),
            path: path.into(),
        }
    }
}

impl Action for TryDeleteFile {
    fn title(&self) -> &str {
        &self.title
    }

    fn execute(&self, _ctx: &ActionContext) -> Result<ActionResult> {
        if fs::symlink_metadata(&self.path).is_err() {
            return Ok(ActionResult::success());
        }
        Ok(complete(&self.path, fs::remove_file(&self.path)))
    }
}

/// Remove a folder and everything in it.
#[derive(Debug, Clone)]
pub struct RemoveFolder {
    title: String,
    path: PathBuf,
}

impl RemoveFolder {
    /// Create the action.
    pub fn new(title: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            title: title.into(),
            path: path.into(),
        }
    }
}

impl Action for RemoveFolder {
    fn title(&self) -> &str {
        &self.title
    }

    fn execute(&self, _ctx: &ActionContext) -> Result<ActionResult> {
        Ok(complete(&self.path, fs::remove_dir_all(&self.path)))
    }
}

/// Create a file owned by a user, with a specific mode.
///
/// A missing parent folder is created with the same mode plus owner
/// execute permission and handed to the same user.
#[derive(Debug, Clone)]
pub struct CreateOwnedText {
    title: String,
    path: PathBuf,
    user: String,
    mode: u32,
    text: String,
}

impl CreateOwnedText {
    /// Create the action.
    pub fn new(
        title: impl Into<String>,
        path: impl Into<PathBuf>,
        user: impl Into<String>,
        mode: u32,
        text: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            path: path.into(),
            user: user.into(),
            mode,
            text: text.into(),
        }
    }

    fn apply(&self, owner: &users::User) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            let created = missing_folders(parent);
            if !created.is_empty() {
                let folder_mode = self.mode | 0o100;
                DirBuilder::new()
                    .recursive(true)
                    .mode(folder_mode)
                    .create(parent)?;
                for folder in &created {
                    chown(folder, Some(owner.uid), Some(owner.gid))?;
                    fs::set_permissions(folder, fs::Permissions::from_mode(folder_mode))?;
                }
            }
        }

        fs::write(&self.path, &self.text)?;
        chown(&self.path, Some(owner.uid), Some(owner.gid))?;
        fs::set_permissions(&self.path, fs::Permissions::from_mode(self.mode))
    }
}

/// Folders from the outermost missing ancestor of `folder` down to `folder`.
fn missing_folders(folder: &Path) -> Vec<PathBuf> {
    let mut missing: Vec<PathBuf> = folder
        .ancestors()
        .filter(|p| !p.as_os_str().is_empty())
        .take_while(|p| !p.exists())
        .map(Path::to_path_buf)
        .collect();
    missing.reverse();
    missing
}

impl Action for CreateOwnedText {
    fn title(&self) -> &str {
        &self.title
    }

    fn execute(&self, _ctx: &ActionContext) -> Result<ActionResult> {
        let owner = match users::lookup(&self.user) {
            Ok(owner) => owner,
            Err(e) => return Ok(ActionResult::failure(format!("{e:#}"))),
        };
        Ok(complete(&self.path, self.apply(&owner)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::NoLog;

    fn run(action: &dyn Action) -> ActionResult {
        action.execute(&ActionContext::new(&NoLog)).unwrap()
    }

    #[test]
    fn test_create_and_append() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("env");

        assert!(run(&CreateText::new("Create", &path, "A=1\n")).is_success());
        assert!(run(&AppendText::new("Append", &path, "B=2\n")).is_success());
        assert_eq!(fs::read_to_string(&path).unwrap(), "A=1\nB=2\n");

        assert!(run(&CreateText::new("Truncate", &path, "C=3\n")).is_success());
        assert_eq!(fs::read_to_string(&path).unwrap(), "C=3\n");
    }

    #[test]
    fn test_append_creates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("new.txt");
        assert!(run(&AppendText::new("Append", &path, "x")).is_success());
        assert_eq!(fs::read_to_string(&path).unwrap(), "x");
    }

    #[test]
    fn test_replace_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sshd_config");
        fs::write(&path, "#PasswordAuthentication yes\nX11Forwarding yes\n").unwrap();

        let action = ReplaceText::new(
            "Disable passwords",
            &path,
            "#PasswordAuthentication yes",
            "PasswordAuthentication no",
        );
        assert!(run(&action).is_success());
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "PasswordAuthentication no\nX11Forwarding yes\n"
        );

        // Second run finds nothing to replace
        let result = run(&action);
        assert!(!result.is_success());
        assert!(result.output.starts_with("Text not found in"));
    }

    #[test]
    fn test_replace_identical_text_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("file");
        fs::write(&path, "abc").unwrap();
        let action = ReplaceText::new("Noop", &path, "abc", "abc");
        assert!(action.execute(&ActionContext::new(&NoLog)).is_err());
    }

    #[test]
    fn test_replace_requires_regular_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = run(&ReplaceText::new("Folder", dir.path(), "a", "b"));
        assert!(result.output.starts_with("Not a regular file"));

        let missing = run(&ReplaceText::new("Missing", dir.path().join("x"), "a", "b"));
        assert_eq!(missing.status, libc::ENOENT);
    }

    #[test]
    fn test_delete_variants() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doomed");
        fs::write(&path, "").unwrap();

        assert!(run(&DeleteFile::new("Delete", &path)).is_success());
        assert!(!path.exists());
        assert!(!run(&DeleteFile::new("Delete again", &path)).is_success());
        assert!(run(&TryDeleteFile::new("Try delete", &path)).is_success());
    }

    #[test]
    fn test_remove_folder() {
        let dir = tempfile::tempdir().unwrap();
        let folder = dir.path().join("snap");
        fs::create_dir_all(folder.join("deep/er")).unwrap();
        fs::write(folder.join("deep/file"), "x").unwrap();

        assert!(run(&RemoveFolder::new("Remove", &folder)).is_success());
        assert!(!folder.exists());
        assert!(!run(&RemoveFolder::new("Remove again", &folder)).is_success());
    }

    #[test]
    fn test_create_owned_text_for_current_user() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config/autostart");
        let me = users::lookup(&current_user_name()).unwrap();

        let action = CreateOwnedText::new("Autostart", &path, &me.name, 0o600, "#!/bin/sh\n");
        let result = run(&action);
        assert!(result.is_success(), "{result}");

        let file_mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        let folder_mode = fs::metadata(path.parent().unwrap())
            .unwrap()
            .permissions()
            .mode()
            & 0o777;
        assert_eq!(file_mode, 0o600);
        assert_eq!(folder_mode, 0o700);
    }

    #[test]
    fn test_missing_folders_lists_every_level() {
        let dir = tempfile::tempdir().unwrap();
        let deep = dir.path().join("a/b/c");
        assert_eq!(
            missing_folders(&deep),
            vec![dir.path().join("a"), dir.path().join("a/b"), deep.clone()]
        );
        assert!(missing_folders(dir.path()).is_empty());
    }

    #[test]
    fn test_create_owned_text_sets_up_every_new_folder() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("home/.config/openbox/autostart");
        let me = users::lookup(&current_user_name()).unwrap();

        let action = CreateOwnedText::new("Autostart", &path, &me.name, 0o640, "x\n");
        assert!(run(&action).is_success());

        for folder in ["home", "home/.config", "home/.config/openbox"] {
            let meta = fs::metadata(dir.path().join(folder)).unwrap();
            assert_eq!(meta.permissions().mode() & 0o777, 0o740, "{folder}");
            assert_eq!(std::os::unix::fs::MetadataExt::uid(&meta), me.uid, "{folder}");
        }
        let root_mode = fs::metadata(dir.path()).unwrap().permissions().mode() & 0o777;
        assert_eq!(root_mode, 0o700);
    }

    #[test]
    fn test_create_owned_text_unknown_user() {
        let dir = tempfile::tempdir().unwrap();
        let action = CreateOwnedText::new("X", dir.path().join("f"), "no-such-user-kf", 0o644, "");
        let result = run(&action);
        assert!(!result.is_success());
        assert!(result.output.contains("no-such-user-kf"));
    }

    fn current_user_name() -> String {
        let uid = users::effective_uid().to_string();
        fs::read_to_string("/etc/passwd")
            .unwrap()
            .lines()
            .find_map(|line| {
                let mut parts = line.split(':');
                let name = parts.next()?;
                let id = parts.nth(1)?;
                (id == uid).then(|| name.to_string())
            })
            .unwrap()
    }
}
