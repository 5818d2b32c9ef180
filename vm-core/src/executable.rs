//! Executable lookup on a search path.

use std::env;
use std::ffi::{OsStr, OsString};
use std::path::PathBuf;

/// Looks for `name` in the directories of `search_path`, falling back to the
/// process `PATH` when none is given. Only exact file-name matches count.
pub fn find_executable(name: &str, search_path: Option<&OsStr>) -> Option<PathBuf> {
    let paths: OsString = match search_path {
        Some(paths) => paths.to_os_string(),
        None => env::var_os("PATH")?,
    };
    let cwd = env::current_dir().ok()?;

    which::which_in(name, Some(paths), cwd).ok()
}
