use crate::error::DecodeError;
use std::io;
use std::path::Path;
use std::process::{Command, Stdio};

/// Turns a binary shortcut into the decoder's line-oriented text report.
pub trait Decoder {
    fn decode(&self, path: &Path, codepage: &str) -> Result<String, DecodeError>;
}

/// `lnkinfo` from liblnk-utils.
pub struct LnkInfo {
    program: String,
}

impl LnkInfo {
    pub fn new(program: &str) -> Self {
        Self {
            program: program.to_string(),
        }
    }
}

impl Decoder for LnkInfo {
    fn decode(&self, path: &Path, codepage: &str) -> Result<String, DecodeError> {
        let output = Command::new(&self.program)
            .args(["-c", codepage])
            .arg(path)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| match e.kind() {
                io::ErrorKind::NotFound => DecodeError::ToolMissing(self.program.clone()),
                _ => DecodeError::Io(e),
            })?;

        if !output.status.success() {
            return Err(DecodeError::Failed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

pub const INSTALL_HINT: &str = "\
The liblnk-utils package providing `lnkinfo` seems to be missing.
    Debian / Ubuntu:
        sudo apt install liblnk-utils
    Astra Linux (install the packages manually, liblnk1 first):
        sudo dpkg -i liblnk1_*.deb
        sudo dpkg -i liblnk-utils_*.deb";
