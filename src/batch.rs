use crate::backup::relocate;
use crate::config::Config;
use crate::decoder::Decoder;
use crate::error::ResolveError;
use crate::logging::LogSink;
use crate::sources::lnk::LnkSource;
use crate::sources::url::UrlSource;
use crate::sources::{Resolver, ShortcutFormat};
use crate::writer::write_entry;
use std::cell::Cell;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const OFFSET_OUTPUT: usize = 4;
const OFFSET_RESULT: usize = 10;

enum Outcome {
    Converted,
    Skipped,
    Abort,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderReport {
    pub folder: PathBuf,
    pub counts: Vec<(ShortcutFormat, usize)>,
}

impl FolderReport {
    pub fn count(&self, format: ShortcutFormat) -> usize {
        self.counts
            .iter()
            .find(|(f, _)| *f == format)
            .map(|(_, n)| *n)
            .unwrap_or(0)
    }
}

#[derive(Debug, Default)]
pub struct BatchReport {
    pub folders: Vec<FolderReport>,
    pub decoder_missing: bool,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.folders
            .iter()
            .flat_map(|folder| ShortcutFormat::ALL.map(|format| folder.count(format)))
            .sum()
    }
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Results:")?;
        for folder in &self.folders {
            writeln!(f, "{:indent$}Folder {:?}:", "", folder.folder, indent = OFFSET_OUTPUT)?;
            for (format, count) in &folder.counts {
                writeln!(
                    f,
                    "{:indent$}*.{} files converted:{:>width$}",
                    "",
                    format.extension(),
                    count,
                    indent = OFFSET_OUTPUT * 2,
                    width = OFFSET_RESULT
                )?;
            }
        }
        Ok(())
    }
}

/// Converts every shortcut found directly inside a set of folders.
pub struct Converter<'a> {
    url: UrlSource<'a>,
    lnk: LnkSource<'a>,
    backup_dir: PathBuf,
    sink: &'a dyn LogSink,
    decoder_missing: Cell<bool>,
}

impl<'a> Converter<'a> {
    pub fn new(
        config: &Config,
        decoder: &'a dyn Decoder,
        search_root: PathBuf,
        backup_dir: PathBuf,
        sink: &'a dyn LogSink,
    ) -> Self {
        Self {
            url: UrlSource::new(&config.locale, sink),
            lnk: LnkSource::new(decoder, &config.codepage, search_root, &config.locale, sink),
            backup_dir,
            sink,
            decoder_missing: Cell::new(false),
        }
    }

    pub fn run(&self, folders: &[PathBuf]) -> BatchReport {
        let mut seen: Vec<PathBuf> = Vec::new();
        let mut report = BatchReport::default();

        for folder in folders {
            let key = folder.canonicalize().unwrap_or_else(|_| folder.clone());
            if seen.contains(&key) {
                self.sink.debug(&format!("{:?} already processed", folder));
                continue;
            }
            seen.push(key);
            report.folders.push(self.convert_folder(folder));
        }

        report.decoder_missing = self.decoder_missing.get();
        report
    }

    pub fn convert_folder(&self, folder: &Path) -> FolderReport {
        self.sink.info(&format!("processing folder {:?}", folder));
        let counts = ShortcutFormat::ALL
            .iter()
            .map(|&format| (format, self.convert_format(folder, format)))
            .collect();
        FolderReport {
            folder: folder.to_path_buf(),
            counts,
        }
    }

    fn resolver(&self, format: ShortcutFormat) -> &dyn Resolver {
        match format {
            ShortcutFormat::Url => &self.url,
            ShortcutFormat::Lnk => &self.lnk,
        }
    }

    fn convert_format(&self, folder: &Path, format: ShortcutFormat) -> usize {
        let files = match list_shortcuts(folder, format) {
            Ok(files) => files,
            Err(e) => {
                self.sink.error(&format!("cannot list {:?}: {}", folder, e));
                return 0;
            }
        };

        let mut converted = 0;
        for file in files {
            match self.convert_file(&file, self.resolver(format)) {
                Outcome::Converted => converted += 1,
                Outcome::Skipped => {}
                Outcome::Abort => break,
            }
        }
        self.sink.info(&format!(
            "{:?}: {} *.{} file(s) converted",
            folder,
            converted,
            format.extension()
        ));
        converted
    }

    fn convert_file(&self, path: &Path, resolver: &dyn Resolver) -> Outcome {
        let record = match resolver.resolve(path) {
            Ok(record) => record,
            Err(ResolveError::Lnk(e)) if e.is_fatal() => {
                self.sink.error(&format!("{:?}: {}", path, e));
                self.decoder_missing.set(true);
                return Outcome::Abort;
            }
            Err(e) => {
                self.sink.warn(&format!("skipping {:?}: {}", path, e));
                return Outcome::Skipped;
            }
        };

        let written = match write_entry(&record, path) {
            Ok(written) => written,
            Err(e) => {
                self.sink.error(&format!("{:?}: {}", path, e));
                return Outcome::Skipped;
            }
        };

        match relocate(path, &self.backup_dir) {
            Ok(moved) => {
                self.sink
                    .info(&format!("{:?} converted to {:?}, original moved to {:?}", path, written, moved));
                Outcome::Converted
            }
            Err(e) => {
                // `written` was created by this run, so removing it restores the folder.
                self.sink.error(&format!("{:?}: {}", path, e));
                if let Err(e) = fs::remove_file(&written) {
                    self.sink
                        .error(&format!("cannot remove {:?} after failed move: {}", written, e));
                }
                Outcome::Skipped
            }
        }
    }
}

/// Regular files of `format` directly inside `folder`, sorted by name.
pub fn list_shortcuts(folder: &Path, format: ShortcutFormat) -> io::Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = fs::read_dir(folder)?
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && format.matches(path))
        .collect();
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DecodeError;
    use crate::logging::testing::RecordingSink;
    use log::Level;
    use tempfile::TempDir;

    struct FakeDecoder {
        report: Option<&'static str>,
        calls: Cell<usize>,
    }

    impl FakeDecoder {
        fn missing() -> Self {
            Self { report: None, calls: Cell::new(0) }
        }

        fn with(report: &'static str) -> Self {
            Self { report: Some(report), calls: Cell::new(0) }
        }
    }

    impl Decoder for FakeDecoder {
        fn decode(&self, _path: &Path, _codepage: &str) -> Result<String, DecodeError> {
            self.calls.set(self.calls.get() + 1);
            self.report
                .map(str::to_string)
                .ok_or_else(|| DecodeError::ToolMissing("lnkinfo".to_string()))
        }
    }

    struct Workspace {
        _dir: TempDir,
        home: PathBuf,
        folder: PathBuf,
        backup: PathBuf,
    }

    fn workspace() -> Workspace {
        let dir = TempDir::new().unwrap();
        let home = dir.path().join("home");
        let folder = dir.path().join("links");
        fs::create_dir_all(&home).unwrap();
        fs::create_dir_all(&folder).unwrap();
        let backup = home.join("backups_link");
        Workspace { _dir: dir, home, folder, backup }
    }

    fn converter<'a>(ws: &Workspace, decoder: &'a dyn Decoder, sink: &'a RecordingSink, config: &Config) -> Converter<'a> {
        Converter::new(config, decoder, ws.home.clone(), ws.backup.clone(), sink)
    }

    #[test]
    fn missing_decoder_only_stops_lnk_files() {
        let ws = workspace();
        fs::write(ws.folder.join("a.lnk"), b"L").unwrap();
        fs::write(ws.folder.join("b.lnk"), b"L").unwrap();
        fs::write(ws.folder.join("site.url"), "[InternetShortcut]\nURL=https://example.com\n").unwrap();

        let decoder = FakeDecoder::missing();
        let sink = RecordingSink::default();
        let config = Config::default();
        let report = converter(&ws, &decoder, &sink, &config).run(&[ws.folder.clone()]);

        assert!(report.decoder_missing);
        assert_eq!(decoder.calls.get(), 1);
        assert_eq!(report.folders[0].count(ShortcutFormat::Url), 1);
        assert_eq!(report.folders[0].count(ShortcutFormat::Lnk), 0);
        assert!(ws.folder.join("a.lnk").exists());
        assert!(!ws.folder.join("a.desktop").exists());
        assert!(ws.folder.join("site.desktop").exists());
        assert!(ws.backup.join("site.url").exists());
        assert!(sink.contains(Level::Error, "not installed"));
    }

    #[test]
    fn converts_lnk_and_backs_up_original() {
        let ws = workspace();
        let target = ws.home.join("work/report.docx");
        fs::create_dir_all(target.parent().unwrap()).unwrap();
        fs::write(&target, b"").unwrap();
        fs::write(ws.folder.join("Report.LNK"), b"L").unwrap();

        let decoder = FakeDecoder::with("\tLocal path : C:\\Users\\bob\\Documents\\report.docx\n");
        let sink = RecordingSink::default();
        let config = Config::default();
        let report = converter(&ws, &decoder, &sink, &config).run(&[ws.folder.clone()]);

        assert_eq!(report.folders[0].count(ShortcutFormat::Lnk), 1);
        let entry = fs::read_to_string(ws.folder.join("Report.desktop")).unwrap();
        assert!(entry.contains(&format!("URL={}\n", target.display())));
        assert!(entry.contains("Name=report.docx\n"));
        assert!(ws.backup.join("Report.LNK").exists());
    }

    #[test]
    fn unresolved_files_stay_in_place() {
        let ws = workspace();
        fs::write(ws.folder.join("old.lnk"), b"L").unwrap();
        fs::write(ws.folder.join("bad.url"), "URL=a=b\n").unwrap();

        let decoder = FakeDecoder::with("\tLocal path : C:\\gone.txt\n");
        let sink = RecordingSink::default();
        let config = Config::default();
        let report = converter(&ws, &decoder, &sink, &config).run(&[ws.folder.clone()]);

        assert_eq!(report.folders[0].count(ShortcutFormat::Lnk), 0);
        assert_eq!(report.folders[0].count(ShortcutFormat::Url), 0);
        assert!(!report.decoder_missing);
        assert!(ws.folder.join("old.lnk").exists());
        assert!(ws.folder.join("bad.url").exists());
        assert!(!ws.backup.exists());
    }

    #[test]
    fn failed_move_removes_written_entry() {
        let ws = workspace();
        fs::write(ws.folder.join("site.url"), "URL=https://example.com\n").unwrap();
        // A plain file where the backup folder should go.
        fs::write(&ws.backup, b"").unwrap();

        let decoder = FakeDecoder::missing();
        let sink = RecordingSink::default();
        let config = Config::default();
        let report = converter(&ws, &decoder, &sink, &config).run(&[ws.folder.clone()]);

        assert_eq!(report.folders[0].count(ShortcutFormat::Url), 0);
        assert!(ws.folder.join("site.url").exists());
        assert!(!ws.folder.join("site.desktop").exists());
    }

    #[test]
    fn failed_move_keeps_existing_entry() {
        let ws = workspace();
        fs::write(ws.folder.join("Report.lnk"), b"L").unwrap();
        fs::write(ws.folder.join("Report.desktop"), "[Desktop Entry]\nName=mine\n").unwrap();
        fs::write(&ws.backup, b"").unwrap();

        let decoder = FakeDecoder::with("\tNetwork path : \\\\nas\\share\\Report\n");
        let sink = RecordingSink::default();
        let config = Config::default();
        let report = converter(&ws, &decoder, &sink, &config).run(&[ws.folder.clone()]);

        assert_eq!(report.folders[0].count(ShortcutFormat::Lnk), 0);
        assert!(ws.folder.join("Report.lnk").exists());
        assert_eq!(
            fs::read_to_string(ws.folder.join("Report.desktop")).unwrap(),
            "[Desktop Entry]\nName=mine\n"
        );
    }

    #[test]
    fn same_stem_converts_once() {
        let ws = workspace();
        fs::write(ws.folder.join("Report.url"), "URL=https://example.com\n").unwrap();
        fs::write(ws.folder.join("Report.lnk"), b"L").unwrap();

        let decoder = FakeDecoder::with("\tNetwork path : \\\\nas\\share\\Report\n");
        let sink = RecordingSink::default();
        let config = Config::default();
        let report = converter(&ws, &decoder, &sink, &config).run(&[ws.folder.clone()]);

        assert_eq!(report.total(), 1);
        assert_eq!(report.folders[0].count(ShortcutFormat::Url), 1);
        assert!(ws.folder.join("Report.lnk").exists());
        let entry = fs::read_to_string(ws.folder.join("Report.desktop")).unwrap();
        assert!(entry.contains("URL=https://example.com\n"));
        assert!(sink.contains(Level::Error, "already exists"));
    }

    #[test]
    fn duplicate_folders_are_processed_once() {
        let ws = workspace();
        let decoder = FakeDecoder::missing();
        let sink = RecordingSink::default();
        let config = Config::default();
        let report = converter(&ws, &decoder, &sink, &config)
            .run(&[ws.folder.clone(), ws.folder.join(".")]);

        assert_eq!(report.folders.len(), 1);
    }

    #[test]
    fn unreadable_folder_counts_zero() {
        let ws = workspace();
        let decoder = FakeDecoder::missing();
        let sink = RecordingSink::default();
        let config = Config::default();
        let report = converter(&ws, &decoder, &sink, &config).run(&[ws.folder.join("missing")]);

        assert_eq!(report.folders[0].count(ShortcutFormat::Url), 0);
        assert!(sink.contains(Level::Error, "cannot list"));
    }

    #[test]
    fn summary_lists_every_format() {
        let report = BatchReport {
            folders: vec![FolderReport {
                folder: PathBuf::from("/tmp/links"),
                counts: vec![(ShortcutFormat::Url, 3), (ShortcutFormat::Lnk, 0)],
            }],
            decoder_missing: false,
        };
        assert_eq!(report.total(), 3);
        let text = report.to_string();
        assert!(text.contains("Folder \"/tmp/links\":"));
        assert!(text.contains(&format!("*.url files converted:{:>10}", 3)));
        assert!(text.contains(&format!("*.lnk files converted:{:>10}", 0)));
    }
}
