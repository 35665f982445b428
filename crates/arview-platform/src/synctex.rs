//! `synctex` command-line runner and output parsers.
//!
//! Inverse search maps a PDF click to a source line (`synctex edit`);
//! forward search maps a source line to a PDF position (`synctex view`).

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use arview_common::PlatformError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tokio::process::Command;
use tracing::debug;

static INPUT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^Input:(.+)$").unwrap());
static LINE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^Line:(\d+)").unwrap());
static COLUMN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^Column:(-?\d+)").unwrap());
static PAGE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^Page:(\d+)").unwrap());
static X_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^x:([\d.]+)").unwrap());
static Y_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^y:([\d.]+)").unwrap());

/// A position in a TeX source file. `column` is 0 when unknown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocation {
    pub file: PathBuf,
    pub line: u32,
    pub column: u32,
}

/// A position on a PDF page, in PDF points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PdfLocation {
    pub page: u32,
    pub x: f64,
    pub y: f64,
}

/// Parse the first record of `synctex edit` output.
pub fn parse_edit_output(output: &str) -> Option<SourceLocation> {
    let file = INPUT_RE.captures(output)?.get(1)?.as_str().trim();
    let line = LINE_RE.captures(output)?.get(1)?.as_str().parse().ok()?;
    let column = COLUMN_RE
        .captures(output)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse::<i64>().ok())
        .map(|c| u32::try_from(c.max(0)).unwrap_or(0))
        .unwrap_or(0);
    Some(SourceLocation {
        file: PathBuf::from(file),
        line,
        column,
    })
}

/// Parse the first record of `synctex view` output.
pub fn parse_view_output(output: &str) -> Option<PdfLocation> {
    let page = PAGE_RE.captures(output)?.get(1)?.as_str().parse().ok()?;
    let x = X_RE.captures(output)?.get(1)?.as_str().parse().ok()?;
    let y = Y_RE.captures(output)?.get(1)?.as_str().parse().ok()?;
    Some(PdfLocation { page, x, y })
}

/// Runs the `synctex` binary.
#[derive(Debug, Clone)]
pub struct SyncTex {
    program: PathBuf,
}

impl Default for SyncTex {
    fn default() -> Self {
        Self {
            program: PathBuf::from("synctex"),
        }
    }
}

impl SyncTex {
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// PDF position to source location. `Ok(None)` when synctex has no record.
    pub async fn edit(
        &self,
        pdf: &Path,
        page: u32,
        x: f64,
        y: f64,
    ) -> Result<Option<SourceLocation>, PlatformError> {
        let query = format!("{page}:{x}:{y}:{}", pdf.display());
        let output = self.run(&["edit", "-o", &query]).await?;
        Ok(parse_edit_output(&output))
    }

    /// Source line to PDF position. `Ok(None)` when synctex has no record.
    pub async fn view(
        &self,
        pdf: &Path,
        source: &Path,
        line: u32,
        column: u32,
    ) -> Result<Option<PdfLocation>, PlatformError> {
        let input = format!("{line}:{column}:{}", source.display());
        let pdf = pdf.display().to_string();
        let output = self.run(&["view", "-i", &input, "-o", &pdf]).await?;
        Ok(parse_view_output(&output))
    }

    async fn run(&self, args: &[&str]) -> Result<String, PlatformError> {
        debug!(program = %self.program.display(), ?args, "running synctex");
        let output = Command::new(&self.program)
            .args(args)
            .output()
            .await
            .map_err(|e| {
                PlatformError::ProcessError(format!("failed to run {}: {e}", self.program.display()))
            })?;
        if !output.status.success() {
            return Err(PlatformError::ProcessError(format!(
                "synctex exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
