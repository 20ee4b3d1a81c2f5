//! Document I/O
//!
//! Reads and writes go through tokio's fs; parsing and serialization are
//! CPU-bound and run on blocking threads. Output bytes are assembled in
//! full before anything touches the destination path, so a failed run
//! leaves no partial booklet behind.

use crate::types::*;
use lopdf::Document;
use std::path::Path;

/// Load a source PDF document
pub async fn load_document(path: impl AsRef<Path>) -> Result<Document> {
    let path = path.as_ref().to_owned();
    let bytes = tokio::fs::read(&path).await?;
    let doc = tokio::task::spawn_blocking(move || Document::load_mem(&bytes)).await??;
    Ok(doc)
}

/// Save the imposed booklet
pub async fn save_document(mut doc: Document, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref().to_owned();
    let bytes = tokio::task::spawn_blocking(move || {
        let mut writer = Vec::new();
        doc.save_to(&mut writer)?;
        Ok::<_, BookletError>(writer)
    })
    .await??;
    tokio::fs::write(&path, bytes).await?;
    Ok(())
}
