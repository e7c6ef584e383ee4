//! Local user database lookups.

use anyhow::{Context, Result};
use std::ffi::{CStr, CString};
use std::mem::MaybeUninit;
use std::path::PathBuf;

/// Account details needed to hand files over to a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Login name
    pub name: String,
    /// User id
    pub uid: u32,
    /// Primary group id
    pub gid: u32,
    /// Home directory
    pub home: PathBuf,
}

/// Look up a user by login name.
pub fn lookup(name: &str) -> Result<User> {
    let c_name = CString::new(name).context("Invalid user name")?;
    let mut buffer = vec![0 as libc::c_char; 16 * 1024];
    let mut result: *mut libc::passwd = std::ptr::null_mut();

    unsafe {
        let mut passwd: MaybeUninit<libc::passwd> = MaybeUninit::uninit();
        let rc = libc::getpwnam_r(
            c_name.as_ptr(),
            passwd.as_mut_ptr(),
            buffer.as_mut_ptr(),
            buffer.len(),
            &raw mut result,
        );
        if rc != 0 {
            return Err(std::io::Error::from_raw_os_error(rc))
                .with_context(|| format!("Unable to look up user '{name}'"));
        }
        if result.is_null() {
            anyhow::bail!("Unknown user: {name}");
        }
        let passwd = passwd.assume_init();

        Ok(User {
            name: name.to_string(),
            uid: passwd.pw_uid,
            gid: passwd.pw_gid,
            home: PathBuf::from(CStr::from_ptr(passwd.pw_dir).to_string_lossy().into_owned()),
        })
    }
}

/// Effective user id of this process.
pub fn effective_uid() -> u32 {
    unsafe { libc::geteuid() }
}
