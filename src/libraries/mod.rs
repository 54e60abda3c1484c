//! Shared library extraction module
//!
//! Handles:
//! - Running the linker-inspection utility (`ldd`) against an executable
//! - Parsing its report into library base names
//! - Treating every invocation failure as an empty result
//!
//! The discovery code only sees the [`LibraryInspector`] trait, so a direct
//! binary-format reader can replace `ldd` without touching it.

use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result};
use log::debug;
use regex::Regex;

use crate::models::LibraryName;

/// One dependency line: `<soname> => <resolved-path> <address>`
const LDD_LINE_PATTERN: &str = r"(?m)^.+ => (.+) .+$";

/// Resolved-path token printed by ldd for `not found` dependencies
const UNRESOLVED_TOKEN: &str = "not";

/// Reports the shared libraries an executable links against
pub trait LibraryInspector {
    /// Library base names reported for `executable`, or an empty list if
    /// the executable could not be inspected for any reason.
    fn linked_libraries(&self, executable: &Path) -> Vec<LibraryName>;
}

/// Inspector backed by an external `ldd`-compatible program
#[derive(Debug, Clone)]
pub struct LddInspector {
    program: PathBuf,
    line_pattern: Regex,
}

impl LddInspector {
    pub fn new(program: impl Into<PathBuf>) -> Result<Self> {
        let line_pattern =
            Regex::new(LDD_LINE_PATTERN).context("Failed to compile ldd line pattern")?;
        Ok(Self {
            program: program.into(),
            line_pattern,
        })
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Run the utility and return its stdout if it exited successfully
    fn run(&self, executable: &Path) -> Result<String> {
        let output = Command::new(&self.program)
            .arg(executable)
            .output()
            .with_context(|| format!("Failed to execute {}", self.program.display()))?;

        if !output.status.success() {
            // Static binaries, scripts and vanished files all land here
            anyhow::bail!(
                "{} exited with {}: {}",
                self.program.display(),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Parse an ldd report into library base names.
    ///
    /// Lines without a `=>` mapping (vdso, the loader itself) contribute
    /// nothing, and neither do `not found` dependencies.
    pub fn parse_output(&self, report: &str) -> Vec<LibraryName> {
        self.line_pattern
            .captures_iter(report)
            .filter_map(|captures| captures.get(1))
            .map(|resolved| resolved.as_str())
            .filter(|resolved| *resolved != UNRESOLVED_TOKEN)
            .filter_map(|resolved| {
                Path::new(resolved)
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
            })
            .collect()
    }
}

impl LibraryInspector for LddInspector {
    fn linked_libraries(&self, executable: &Path) -> Vec<LibraryName> {
        match self.run(executable) {
            Ok(report) => self.parse_output(&report),
            Err(err) => {
                debug!("No libraries for {}: {:#}", executable.display(), err);
                Vec::new()
            }
        }
    }
}
