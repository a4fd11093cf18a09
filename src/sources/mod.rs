use crate::error::ResolveError;
use crate::model::ShortcutRecord;
use std::path::Path;

pub mod lnk;
pub mod url;

/// Produces the record for one shortcut file of a given format.
pub trait Resolver {
    fn resolve(&self, path: &Path) -> Result<ShortcutRecord, ResolveError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutFormat {
    Url,
    Lnk,
}

impl ShortcutFormat {
    pub const ALL: [ShortcutFormat; 2] = [ShortcutFormat::Url, ShortcutFormat::Lnk];

    pub fn extension(self) -> &'static str {
        match self {
            ShortcutFormat::Url => "url",
            ShortcutFormat::Lnk => "lnk",
        }
    }

    pub fn matches(self, path: &Path) -> bool {
        path.extension()
            .and_then(|s| s.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(self.extension()))
    }
}

/// Last `delimiter`-separated part of `line`, trimmed. Empty when `line` does
/// not contain `delimiter` at all.
pub fn extract(line: &str, delimiter: &str) -> String {
    if delimiter.is_empty() {
        return String::new();
    }
    match line.rsplit_once(delimiter) {
        Some((_, last)) => last.trim().to_string(),
        None => String::new(),
    }
}
