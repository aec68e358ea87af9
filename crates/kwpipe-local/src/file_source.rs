//! JSONL-backed document source for offline runs and hermetic tests.
//!
//! One document per line: `{"text": "...", "tier": "important" | "normal"}`.
//! Blank lines and `#` comments are ignored.

use kwpipe_core::{DocumentSource, Error, RawDocument, ResearchOptions, Result};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait::async_trait]
impl DocumentSource for FileSource {
    fn name(&self) -> &'static str {
        "file"
    }

    async fn fetch_documents(
        &self,
        _query: &str,
        _opts: &ResearchOptions,
    ) -> Result<Vec<RawDocument>> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| Error::Fetch(format!("{}: {e}", self.path.display())))?;

        let mut docs = Vec::new();
        for (idx, line) in raw.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let doc: RawDocument = serde_json::from_str(line).map_err(|e| {
                Error::Parse(format!("{} line {}: {e}", self.path.display(), idx + 1))
            })?;
            docs.push(doc);
        }
        Ok(docs)
    }
}
