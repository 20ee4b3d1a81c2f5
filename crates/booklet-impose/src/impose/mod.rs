//! Booklet assembly
//!
//! This module orchestrates a run:
//! 1. Plan the slot order for the source page count
//! 2. Walk the sheets, applying creep as the layouter goes
//! 3. Render each face into the output document
//! 4. Finalize the page tree and catalog
//!
//! The core is synchronous and strictly sequential; [`make_booklet`]
//! only moves it off the async runtime's worker threads.

mod io;
mod sheet;
mod xobject;

pub use io::{load_document, save_document};

use crate::layout::SheetLayouter;
use crate::options::BookletOptions;
use crate::plan::plan;
use crate::types::*;
use lopdf::{Dictionary, Document, Object, ObjectId};
use sheet::render_face;
use std::collections::HashMap;

/// Impose `source` into a new booklet document.
///
/// The source is untouched; every drawn page goes into the output as a
/// Form XObject. A source with no pages yields an output with no pages.
pub async fn make_booklet(source: &Document, options: &BookletOptions) -> Result<Document> {
    options.validate()?;

    let source = source.clone();
    let options = options.clone();

    tokio::task::spawn_blocking(move || make_booklet_sync(&source, &options)).await?
}

fn make_booklet_sync(source: &Document, options: &BookletOptions) -> Result<Document> {
    let source_pages = source.get_pages();
    let slots = plan(source_pages.len() as u32);
    let sheet_bounds = options.sheet_size.bounds();

    // Build output document
    let mut output = Document::with_version("1.7");
    let pages_tree_id = output.new_object_id();
    let mut page_refs = Vec::new();

    // One import cache for the whole run, so resources shared between
    // source pages land in the output once.
    let mut cache = HashMap::new();

    for sheet in SheetLayouter::new(slots, sheet_bounds, options.creep_pt) {
        for face in &sheet.faces {
            let page_id = render_face(
                &mut output,
                source,
                &source_pages,
                face,
                sheet_bounds,
                pages_tree_id,
                options,
                &mut cache,
            )?;
            page_refs.push(Object::Reference(page_id));
        }
    }

    finalize_document(&mut output, pages_tree_id, page_refs);
    Ok(output)
}

/// Create pages tree and catalog, finalize document structure
fn finalize_document(output: &mut Document, pages_tree_id: ObjectId, page_refs: Vec<Object>) {
    let count = page_refs.len() as i64;
    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(page_refs)),
        ("Count", Object::Integer(count)),
    ]);
    output
        .objects
        .insert(pages_tree_id, Object::Dictionary(pages_dict));

    let catalog_id = output.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_tree_id)),
    ]));

    output.trailer.set("Root", catalog_id);
}
