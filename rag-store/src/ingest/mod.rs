//! Document ingestion: fetch the source page and cut it into records.

pub mod html_text;
pub mod splitter;
pub mod web_loader;

use tracing::info;

use crate::{
    config::RagConfig,
    errors::RagError,
    ingest::{splitter::ChunkSplitter, web_loader::LoadedDocument},
    record::RagRecord,
};

/// Splits a loaded document into records `chunk-0`, `chunk-1`, ...
///
/// # Errors
/// `RagError::Config` for invalid splitter sizes.
pub fn chunk_document(cfg: &RagConfig, doc: &LoadedDocument) -> Result<Vec<RagRecord>, RagError> {
    let splitter = ChunkSplitter::new(cfg.chunk_size, cfg.chunk_overlap)?;
    let records: Vec<RagRecord> = splitter
        .split_text(&doc.text)
        .into_iter()
        .enumerate()
        .map(|(i, text)| RagRecord::new(format!("chunk-{i}"), text, Some(doc.source.clone())))
        .collect();

    info!(
        source = %doc.source,
        chunks = records.len(),
        chunk_size = cfg.chunk_size,
        chunk_overlap = cfg.chunk_overlap,
        "document chunked"
    );
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_are_numbered_and_sourced() {
        let cfg = RagConfig {
            chunk_size: 8,
            ..RagConfig::default()
        };
        let doc = LoadedDocument {
            source: "https://example.test/cv".into(),
            title: None,
            text: "alpha beta gamma".into(),
        };
        let records = chunk_document(&cfg, &doc).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].id, "chunk-0");
        assert_eq!(records[0].text, "alpha");
        assert_eq!(records[2].id, "chunk-2");
        assert!(records.iter().all(|r| r.source.as_deref() == Some("https://example.test/cv")));
        assert!(records.iter().all(|r| r.embedding.is_none()));
    }
}
