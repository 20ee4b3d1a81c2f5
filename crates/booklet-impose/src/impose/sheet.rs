//! Face rendering
//!
//! One face of a sheet becomes one page of the output document. Blank
//! slots draw nothing, but the page itself is always created so the
//! duplex order stays intact.

use super::xobject::page_xobject;
use crate::constants::OUTLINE_LINE_WIDTH;
use crate::layout::{FaceLayout, Rect};
use crate::options::BookletOptions;
use crate::types::Result;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::collections::{BTreeMap, HashMap};

/// Render one face of a sheet to the output document.
#[allow(clippy::too_many_arguments)]
pub(crate) fn render_face(
    output: &mut Document,
    source: &Document,
    source_pages: &BTreeMap<u32, ObjectId>,
    face: &FaceLayout,
    sheet: Rect,
    parent_pages_id: ObjectId,
    options: &BookletOptions,
    cache: &mut HashMap<ObjectId, ObjectId>,
) -> Result<ObjectId> {
    // Create page dictionary
    let mut page_dict = Dictionary::new();
    page_dict.set("Type", Object::Name(b"Page".to_vec()));
    page_dict.set("Parent", Object::Reference(parent_pages_id));
    page_dict.set(
        "MediaBox",
        Object::Array(vec![
            Object::Real(sheet.x),
            Object::Real(sheet.y),
            Object::Real(sheet.right()),
            Object::Real(sheet.top()),
        ]),
    );

    let mut content_ops = Vec::new();
    let mut xobjects = Dictionary::new();

    // Draw each placement, left leaf then right leaf
    for (idx, placement) in face.placements.iter().enumerate() {
        if let Some(page_no) = placement.page {
            if let Some(&page_id) = source_pages.get(&page_no) {
                let xobject_name = format!("P{}", idx);
                let (xobject_id, media_box) = page_xobject(output, source, page_id, cache)?;
                xobjects.set(xobject_name.as_bytes(), Object::Reference(xobject_id));

                let (scale, tx, ty) = fit_transform(&media_box, &placement.target);
                content_ops.push(format!(
                    "q {} 0 0 {} {} {} cm /{} Do Q\n",
                    scale, scale, tx, ty, xobject_name
                ));

                if options.outline {
                    content_ops.push(outline_frame(&placement.target));
                }
            }
        }
    }

    // Build resources
    let mut resources = Dictionary::new();
    resources.set("XObject", Object::Dictionary(xobjects));

    // Create content stream
    let content = content_ops.join("");
    let content_id = output.add_object(Stream::new(Dictionary::new(), content.into_bytes()));

    page_dict.set("Contents", Object::Reference(content_id));
    page_dict.set("Resources", Object::Dictionary(resources));

    Ok(output.add_object(page_dict))
}

/// Transform placing a source page inside a target rectangle.
///
/// Centres the page both ways and scales it down to fit when it is too
/// large. Pages that already fit keep their natural size; nothing is
/// scaled up or rotated.
pub(crate) fn fit_transform(media_box: &Rect, target: &Rect) -> (f32, f32, f32) {
    let scale = (target.width / media_box.width)
        .min(target.height / media_box.height)
        .min(1.0);
    let tx = target.x + (target.width - media_box.width * scale) / 2.0 - media_box.x * scale;
    let ty = target.y + (target.height - media_box.height * scale) / 2.0 - media_box.y * scale;
    (scale, tx, ty)
}

/// Stroke a frame around a placed page, for checking the layout by eye.
fn outline_frame(rect: &Rect) -> String {
    format!(
        "q {} w 0 0 0 RG {} {} {} {} re S Q\n",
        OUTLINE_LINE_WIDTH, rect.x, rect.y, rect.width, rect.height
    )
}
