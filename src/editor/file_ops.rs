//! File operations: open, save, search.

use super::Editor;
use crate::buffer::{split_lines, Document};
use crate::input::{ByteSource, Key};
use crate::syntax::select;
use crate::terminal::Terminal;
use crate::types::Pos;
use anyhow::Result;
use std::fs;
use std::io;
use std::path::PathBuf;

impl<S: ByteSource, T: Terminal> Editor<S, T> {
    /// Open a file. A path that does not exist yet starts an empty document with that name.
    pub fn open(&mut self, path: PathBuf) -> Result<()> {
        let lines = match fs::read(&path) {
            Ok(bytes) => split_lines(&bytes),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Vec::new(),
            Err(e) => {
                let msg = format!("Failed to read {}", path.display());
                return Err(anyhow::Error::new(e).context(msg));
            }
        };
        tracing::info!(path = %path.display(), lines = lines.len(), "open");

        self.doc = Document::from_lines(lines, self.config.tab_stop);
        self.cursor = Pos::default();
        self.viewport.rowoff = 0;
        self.viewport.coloff = 0;
        self.filename = Some(path);
        self.select_syntax();
        Ok(())
    }

    /// Pick the syntax profile for the current filename and re-highlight.
    pub fn select_syntax(&mut self) {
        let name = self
            .filename
            .as_ref()
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_default();
        let profile = select(&self.profiles, &name).cloned();
        let filetype = profile.as_ref().map_or("none", |p| p.name.as_str());
        tracing::debug!(filetype, "syntax selected");
        self.doc.set_syntax(profile);
    }

    /// Write the document to its file, asking for a name first if it has none.
    ///
    /// Returns whether the file was written. Write failures are reported in the message bar.
    pub fn save(&mut self) -> Result<bool> {
        if self.filename.is_none() {
            let Some(name) = self.prompt("Save as: ", None)? else {
                self.set_status("Save Aborted");
                return Ok(false);
            };
            self.filename = Some(PathBuf::from(name));
            self.select_syntax();
        }
        let Some(path) = self.filename.clone() else {
            return Ok(false);
        };

        let bytes = self.doc.to_bytes();
        match fs::write(&path, &bytes) {
            Ok(()) => {
                self.doc.clear_dirty();
                tracing::info!(path = %path.display(), bytes = bytes.len(), "save");
                self.set_status(format!("{} bytes written to disk", bytes.len()));
                Ok(true)
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), "save failed: {e}");
                self.set_status(format!("Can't save! I/O error: {e}"));
                Ok(false)
            }
        }
    }

    /// Incremental search. Escape puts the cursor and view back where they were.
    pub fn find(&mut self) -> Result<()> {
        let saved_cursor = self.cursor;
        let (saved_rowoff, saved_coloff) = (self.viewport.rowoff, self.viewport.coloff);

        let query = self.prompt("Search: ", Some(Self::on_search_update))?;
        if query.is_none() {
            self.cursor = saved_cursor;
            self.viewport.rowoff = saved_rowoff;
            self.viewport.coloff = saved_coloff;
        }
        Ok(())
    }

    fn on_search_update(&mut self, query: &str, key: Key) {
        let Some(hit) = self.search.update(&mut self.doc, query.as_bytes(), key) else {
            return;
        };
        let Some(line) = self.doc.line(hit.row) else {
            return;
        };
        self.cursor = Pos {
            y: hit.row,
            x: line.render_to_logical(hit.render_col, self.doc.tab_stop()),
        };
        // Past the end, so the next scroll puts the match on the top row.
        self.viewport.rowoff = self.doc.line_count();
    }
}
