use anyhow::Result;
use env_logger::{Builder, Env, Target, WriteStyle};
use log::Level;
use std::fmt;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

/// Receives leveled messages from the conversion components.
pub trait LogSink {
    fn log(&self, level: Level, message: &str);

    fn debug(&self, message: &str) {
        self.log(Level::Debug, message);
    }

    fn info(&self, message: &str) {
        self.log(Level::Info, message);
    }

    fn warn(&self, message: &str) {
        self.log(Level::Warn, message);
    }

    fn error(&self, message: &str) {
        self.log(Level::Error, message);
    }
}

/// Forwards to the `log` facade set up by [`init`].
pub struct LogFacade;

impl LogSink for LogFacade {
    fn log(&self, level: Level, message: &str) {
        log::log!(level, "{}", message);
    }
}

/// Routes the `log` facade into `path`, truncating it. `RUST_LOG` overrides
/// the default `info` filter.
pub fn init(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(path)?;

    Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .write_style(WriteStyle::Never)
        .format(|buf, record| {
            let line = render_line(buf.timestamp(), record.level(), record.args());
            writeln!(buf, "{}", line)
        })
        .try_init()?;
    Ok(())
}

/// One log file line. Every record is emitted by [`LogFacade`], so the `log`
/// target carries nothing and is not written.
fn render_line(timestamp: impl fmt::Display, level: Level, message: impl fmt::Display) -> String {
    format!("{} {} {}", timestamp, level, message)
}
