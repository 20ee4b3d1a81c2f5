use booklet_impose::*;
use lopdf::{Dictionary, Document, Object, Stream};

fn create_numbered_pdf(num_pages: usize) -> Document {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();
    let mut kids = Vec::new();

    for page_num in 1..=num_pages {
        // Create a content stream that draws the page number
        let content = format!("BT /F1 200 Tf 200 350 Td ({}) Tj ET", page_num);
        let content_id = doc.add_object(Stream::new(Dictionary::new(), content.into_bytes()));

        // Create font resources
        let mut font_dict = Dictionary::new();
        font_dict.set("Type", Object::Name(b"Font".to_vec()));
        font_dict.set("Subtype", Object::Name(b"Type1".to_vec()));
        font_dict.set("BaseFont", Object::Name(b"Helvetica".to_vec()));
        let font_id = doc.add_object(font_dict);

        let mut font_resources = Dictionary::new();
        font_resources.set("F1", Object::Reference(font_id));

        let mut resources = Dictionary::new();
        resources.set("Font", Object::Dictionary(font_resources));

        // Create page
        let page_id = doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_id)),
            (
                "MediaBox",
                Object::Array(vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Integer(612),
                    Object::Integer(792),
                ]),
            ),
            ("Resources", Object::Dictionary(resources)),
            ("Contents", Object::Reference(content_id)),
        ]));
        kids.push(Object::Reference(page_id));
    }

    // Create pages dict
    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(kids)),
        ("Count", Object::Integer(num_pages as i64)),
    ]);
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    // Create catalog
    let catalog_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));

    doc.trailer.set("Root", catalog_id);
    doc
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Create a test PDF with 5 pages, an awkward count that needs padding
    let source_doc = create_numbered_pdf(5);

    // Save the source for reference
    let mut source_bytes = Vec::new();
    source_doc.clone().save_to(&mut source_bytes).unwrap();
    tokio::fs::write("booklet_source.pdf", source_bytes).await?;
    println!("Created booklet_source.pdf with 5 numbered pages");

    // Tabloid sheets fit two Letter pages at natural size; the outline
    // frames make the slot boundaries visible.
    let options = BookletOptions {
        sheet_size: SheetSize::Tabloid,
        outline: true,
        ..Default::default()
    };

    let stats = calculate_statistics(&source_doc);
    println!(
        "{} source pages on {} sheets, {} slots left blank",
        stats.source_pages, stats.sheets, stats.blank_slots
    );

    let booklet = make_booklet(&source_doc, &options).await?;
    save_document(booklet, "booklet_imposed.pdf").await?;
    println!("Created booklet_imposed.pdf");
    println!("\nExpected layout:");
    println!("  Sheet 1 front: blank, 1    back: 2, blank");
    println!("  Sheet 2 front: blank, 3    back: 4, 5");
    println!("\nFold the printed stack in half and the pages read 1 to 5.");

    Ok(())
}
