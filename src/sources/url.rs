use crate::error::ResolveError;
use crate::logging::LogSink;
use crate::model::{IconClass, ShortcutRecord};
use crate::sources::Resolver;
use std::fs;
use std::path::Path;

const URL_MARKER: &str = "URL";

/// Internet shortcuts (`*.url`), plain INI-like text.
pub struct UrlSource<'a> {
    locale: String,
    sink: &'a dyn LogSink,
}

impl<'a> UrlSource<'a> {
    pub fn new(locale: &str, sink: &'a dyn LogSink) -> Self {
        Self {
            locale: locale.to_string(),
            sink,
        }
    }
}

impl Resolver for UrlSource<'_> {
    fn resolve(&self, path: &Path) -> Result<ShortcutRecord, ResolveError> {
        let bytes = fs::read(path).map_err(|source| ResolveError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let content = String::from_utf8_lossy(&bytes);

        let record = content
            .lines()
            .find_map(|line| resolve_text(line, path))
            .ok_or_else(|| ResolveError::NoUrl(path.to_path_buf()))?;

        self.sink.debug(&format!("{:?}: URL {}", path, record.target));
        Ok(record.with_locale(&self.locale))
    }
}

/// Record for `line` if it is a `URL=<value>` line. Lines with more than one
/// `=` are rejected as they are, not repaired.
pub fn resolve_text(line: &str, origin: &Path) -> Option<ShortcutRecord> {
    let line = line.trim();
    if !line.contains(URL_MARKER) {
        return None;
    }

    let parts: Vec<&str> = line.split('=').collect();
    let address = match parts.as_slice() {
        [_, value] => *value,
        _ => "",
    };
    let name = origin
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    ShortcutRecord::build(address, &name, IconClass::WebLink)
}
