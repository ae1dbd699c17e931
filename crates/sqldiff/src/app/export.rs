use super::{App, StatusKind};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Write a statement to `path`, creating parent directories as needed
pub fn write_statement(path: &Path, text: &str) -> Result<(), ExportError> {
    let io_err = |source: std::io::Error| ExportError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    let mut content = text.to_string();
    if !content.is_empty() && !content.ends_with('\n') {
        content.push('\n');
    }
    fs::write(path, content).map_err(io_err)?;
    tracing::info!(path = %path.display(), bytes = text.len(), "statement exported");
    Ok(())
}

impl App {
    /// Ctrl+S: write the edited target, back to its file when one was opened
    pub fn export_target(&mut self) {
        let path = self
            .target_path
            .clone()
            .unwrap_or_else(|| self.export.target_path());
        let text = self.target_editor.text();
        self.report_export(&path, &text);
    }

    /// Ctrl+O: write the source statement, back to its file when one was opened
    pub fn export_source(&mut self) {
        let path = self
            .source_path
            .clone()
            .unwrap_or_else(|| self.export.source_path());
        let text = self.source_editor.text();
        self.report_export(&path, &text);
    }

    fn report_export(&mut self, path: &Path, text: &str) {
        match write_statement(path, text) {
            Ok(()) => self.set_status(format!("Saved {}", path.display()), StatusKind::Info),
            Err(err) => {
                tracing::warn!("{}", err);
                self.set_status(err.to_string(), StatusKind::Error);
            }
        }
    }
}
