//! Form XObjects built from source pages
//!
//! Every placed page becomes a Form XObject in the output document: BBox
//! taken from the page's media box, resources imported alongside, content
//! streams decompressed and concatenated. Where on the sheet the form is
//! drawn is the caller's business; this module only packages the page.

use crate::constants::DEFAULT_PAGE_DIMENSIONS;
use crate::layout::Rect;
use crate::types::Result;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::collections::HashMap;

// =============================================================================
// XObject Creation
// =============================================================================

/// Build a Form XObject in `output` from the source page `page_id`.
///
/// Returns the new object's id together with the source media box, which
/// the caller needs to work out the placement transform. `cache` maps
/// source object ids to their copies, so resources shared between pages
/// are imported once per run.
pub(crate) fn page_xobject(
    output: &mut Document,
    source: &Document,
    page_id: ObjectId,
    cache: &mut HashMap<ObjectId, ObjectId>,
) -> Result<(ObjectId, Rect)> {
    let page_dict = source.get_dictionary(page_id)?;
    let media_box = media_box_rect(page_dict);
    let content = page_content(source, page_dict)?;

    let mut xobject_dict = Dictionary::new();
    xobject_dict.set("Type", Object::Name(b"XObject".to_vec()));
    xobject_dict.set("Subtype", Object::Name(b"Form".to_vec()));
    xobject_dict.set(
        "BBox",
        Object::Array(vec![
            Object::Real(media_box.x),
            Object::Real(media_box.y),
            Object::Real(media_box.right()),
            Object::Real(media_box.top()),
        ]),
    );
    xobject_dict.set("FormType", Object::Integer(1));

    if let Ok(resources) = page_dict.get(b"Resources") {
        xobject_dict.set("Resources", import_object(output, source, resources, cache)?);
    }

    Ok((output.add_object(Stream::new(xobject_dict, content)), media_box))
}

/// Media box of a page as a rectangle. Pages without a usable media box
/// fall back to US Letter at the origin.
fn media_box_rect(page_dict: &Dictionary) -> Rect {
    let coords: Vec<f32> = page_dict
        .get(b"MediaBox")
        .and_then(|obj| obj.as_array())
        .map(|arr| arr.iter().filter_map(extract_number).collect())
        .unwrap_or_default();

    match coords.as_slice() {
        [x0, y0, x1, y1] if x1 > x0 && y1 > y0 => Rect::new(*x0, *y0, x1 - x0, y1 - y0),
        _ => {
            let (width, height) = DEFAULT_PAGE_DIMENSIONS;
            Rect::new(0.0, 0.0, width, height)
        }
    }
}

/// Extract numeric value from a PDF object
fn extract_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

// =============================================================================
// Page Content Extraction
// =============================================================================

/// Concatenated, decompressed content of a page. A page with no content
/// renders as blank.
fn page_content(doc: &Document, page_dict: &Dictionary) -> Result<Vec<u8>> {
    let contents = match page_dict.get(b"Contents") {
        Ok(c) => c,
        Err(_) => return Ok(Vec::new()),
    };

    match contents {
        Object::Reference(id) => stream_bytes(doc, *id),
        Object::Array(refs) => {
            let mut joined = Vec::new();
            for obj in refs {
                if let Object::Reference(id) = obj {
                    let bytes = stream_bytes(doc, *id)?;
                    joined.extend_from_slice(&bytes);
                    joined.push(b'\n');
                }
            }
            Ok(joined)
        }
        _ => Ok(Vec::new()),
    }
}

fn stream_bytes(doc: &Document, id: ObjectId) -> Result<Vec<u8>> {
    match doc.get_object(id)?.as_stream() {
        Ok(stream) => Ok(stream
            .decompressed_content()
            .unwrap_or_else(|_| stream.content.clone())),
        Err(_) => Ok(Vec::new()),
    }
}

// =============================================================================
// Object Import
// =============================================================================

/// Recursively import an object graph from `source` into `output`,
/// rewriting references as it goes. `cache` keeps each source object to
/// a single copy.
pub(crate) fn import_object(
    output: &mut Document,
    source: &Document,
    obj: &Object,
    cache: &mut HashMap<ObjectId, ObjectId>,
) -> Result<Object> {
    match obj {
        Object::Reference(id) => {
            if let Some(&copied) = cache.get(id) {
                return Ok(Object::Reference(copied));
            }

            let referenced = source.get_object(*id)?;
            let imported = import_object(output, source, referenced, cache)?;
            let new_id = output.add_object(imported);
            cache.insert(*id, new_id);

            Ok(Object::Reference(new_id))
        }
        Object::Dictionary(dict) => Ok(Object::Dictionary(import_dictionary(
            output, source, dict, cache,
        )?)),
        Object::Array(items) => {
            let imported: Result<Vec<_>> = items
                .iter()
                .map(|item| import_object(output, source, item, cache))
                .collect();
            Ok(Object::Array(imported?))
        }
        Object::Stream(stream) => Ok(Object::Stream(Stream {
            dict: import_dictionary(output, source, &stream.dict, cache)?,
            content: stream.content.clone(),
            allows_compression: stream.allows_compression,
            start_position: None,
        })),
        // Primitive types: just clone
        other => Ok(other.clone()),
    }
}

fn import_dictionary(
    output: &mut Document,
    source: &Document,
    dict: &Dictionary,
    cache: &mut HashMap<ObjectId, ObjectId>,
) -> Result<Dictionary> {
    let mut imported = Dictionary::new();
    for (key, value) in dict.iter() {
        imported.set(key.clone(), import_object(output, source, value, cache)?);
    }
    Ok(imported)
}
