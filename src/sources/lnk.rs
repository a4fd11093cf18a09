use crate::decoder::Decoder;
use crate::error::{DecodeError, LnkError, ResolveError};
use crate::finder::find_by_name;
use crate::logging::LogSink;
use crate::model::{IconClass, ShortcutRecord};
use crate::sources::{Resolver, extract};
use std::path::{Path, PathBuf};

const LOCAL_PATH: &str = "Local path";
const NETWORK_PATH: &str = "Network path";

/// Path field picked out of a decoder report.
#[derive(Debug, Clone, PartialEq, Eq)]
enum PathField {
    /// UNC path or URL, used verbatim.
    Network { target: String, name: String },
    /// Trailing component of a Windows path, to be looked up locally.
    Local { name: String },
}

/// Windows shell links (`*.lnk`), decoded through an external tool.
pub struct LnkSource<'a> {
    decoder: &'a dyn Decoder,
    codepage: String,
    search_root: PathBuf,
    locale: String,
    sink: &'a dyn LogSink,
}

impl<'a> LnkSource<'a> {
    pub fn new(
        decoder: &'a dyn Decoder,
        codepage: &str,
        search_root: PathBuf,
        locale: &str,
        sink: &'a dyn LogSink,
    ) -> Self {
        Self {
            decoder,
            codepage: codepage.to_string(),
            search_root,
            locale: locale.to_string(),
            sink,
        }
    }

    pub fn resolve_binary(&self, path: &Path) -> Result<ShortcutRecord, LnkError> {
        if !path.exists() {
            return Err(LnkError::Missing(path.to_path_buf()));
        }

        let report = self
            .decoder
            .decode(path, &self.codepage)
            .map_err(|e| match e {
                DecodeError::ToolMissing(program) => LnkError::ToolMissing(program),
                other => LnkError::DecodeFailed {
                    path: path.to_path_buf(),
                    reason: other.to_string(),
                },
            })?;

        let record = self.parse_report(path, &report)?;
        Ok(record.with_locale(&self.locale))
    }

    fn parse_report(&self, path: &Path, report: &str) -> Result<ShortcutRecord, LnkError> {
        let field = find_path_field(report, self.sink)
            .ok_or_else(|| LnkError::NoPathField(path.to_path_buf()))?;

        match field {
            PathField::Network { target, name } => {
                self.sink
                    .debug(&format!("{:?}: network path {}", path, target));
                ShortcutRecord::build(&target, &name, IconClass::WebLink)
                    .ok_or_else(|| LnkError::NoPathField(path.to_path_buf()))
            }
            PathField::Local { name } => {
                self.sink.debug(&format!(
                    "{:?}: searching {:?} for {}",
                    path, self.search_root, name
                ));
                let (found, icon) = find_by_name(&self.search_root, &name);
                if found.as_os_str().is_empty() {
                    return Err(LnkError::TargetNotFound(name));
                }
                self.sink.info(&format!("{:?}: {} found at {:?}", path, name, found));
                ShortcutRecord::build(&found.to_string_lossy(), &name, icon)
                    .ok_or(LnkError::TargetNotFound(name))
            }
        }
    }
}

impl Resolver for LnkSource<'_> {
    fn resolve(&self, path: &Path) -> Result<ShortcutRecord, ResolveError> {
        Ok(self.resolve_binary(path)?)
    }
}

/// First `Network path` or `Local path` line of the report, whichever comes
/// first. Labelled lines whose value cannot be split are skipped.
fn find_path_field(report: &str, sink: &dyn LogSink) -> Option<PathField> {
    for line in report.lines() {
        if line.contains(NETWORK_PATH) {
            let target = extract(line, ":");
            let name = extract(&target, "\\");
            if !target.is_empty() && !name.is_empty() {
                return Some(PathField::Network { target, name });
            }
        } else if line.contains(LOCAL_PATH) {
            let name = extract(&extract(line, ":"), "\\");
            if !name.is_empty() {
                return Some(PathField::Local { name });
            }
        } else {
            continue;
        }
        sink.warn(&format!("malformed path field: {}", line.trim()));
    }
    None
}
