use crate::logging::LogSink;
use regex::{Captures, Regex};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const USER_DIRS_FILE: &str = ".config/user-dirs.dirs";

/// Desktop folder of the user owning `home`, read from `user-dirs.dirs`.
pub fn desktop_folder(home: &Path, sink: &dyn LogSink) -> Option<PathBuf> {
    let path = home.join(USER_DIRS_FILE);
    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) => {
            sink.warn(&format!("cannot read {:?}: {}", path, e));
            return None;
        }
    };

    let lookup = |var: &str| match env::var(var) {
        Ok(value) => Some(value),
        Err(_) if var == "HOME" => Some(home.to_string_lossy().into_owned()),
        Err(_) => None,
    };
    let folder = desktop_dir_from(&content, home, lookup);
    match &folder {
        Some(dir) => sink.debug(&format!("desktop folder is {:?}", dir)),
        None => sink.warn(&format!("no usable XDG_DESKTOP_DIR in {:?}", path)),
    }
    folder
}

/// Parses the `XDG_DESKTOP_DIR=` assignment of a `user-dirs.dirs` file,
/// expanding `$VAR` and `${VAR}` through `lookup`. Relative results are taken
/// relative to `home`.
pub fn desktop_dir_from<F>(content: &str, home: &Path, lookup: F) -> Option<PathBuf>
where
    F: Fn(&str) -> Option<String>,
{
    let assignment = Regex::new(r"^\s*XDG_DESKTOP_DIR=(?P<folder>.+)$").ok()?;
    let variable = Regex::new(r"\$(?:\{(?P<braced>\w+)\}|(?P<bare>\w+))").ok()?;

    let raw = content
        .lines()
        .filter(|line| !line.trim_start().starts_with('#'))
        .find_map(|line| assignment.captures(line))
        .map(|caps| caps["folder"].trim().trim_matches('"').to_string())?;

    let mut unresolved = false;
    let expanded = variable.replace_all(&raw, |caps: &Captures| {
        let name = caps
            .name("braced")
            .or_else(|| caps.name("bare"))
            .map(|m| m.as_str())
            .unwrap_or_default();
        lookup(name).unwrap_or_else(|| {
            unresolved = true;
            String::new()
        })
    });
    if unresolved || expanded.is_empty() {
        return None;
    }

    let dir = PathBuf::from(expanded.trim_end_matches('/'));
    if dir.is_absolute() {
        Some(dir)
    } else {
        Some(home.join(dir))
    }
}
