use booklet_impose::*;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

fn create_test_pdf(num_pages: usize) -> Document {
    let mut doc = Document::with_version("1.7");

    // Create page tree root ID
    let pages_id = doc.new_object_id();

    // Create pages array
    let mut kids = Vec::new();
    for _ in 0..num_pages {
        let content_id = doc.add_object(Stream::new(Dictionary::new(), b"q Q".to_vec()));

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
            ("Resources", Object::Dictionary(Dictionary::new())),
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

/// Number of XObjects drawn on an output page, i.e. non-blank slots.
fn xobject_count(doc: &Document, page_id: ObjectId) -> usize {
    let page = doc.get_dictionary(page_id).unwrap();
    let resources = page.get(b"Resources").unwrap().as_dict().unwrap();
    let xobjects = resources.get(b"XObject").unwrap().as_dict().unwrap();
    xobjects.len()
}

/// Content stream of an output page as text.
fn page_content(doc: &Document, page_id: ObjectId) -> String {
    let page = doc.get_dictionary(page_id).unwrap();
    let content_id = match page.get(b"Contents").unwrap() {
        Object::Reference(id) => *id,
        other => panic!("Expected content reference, got {:?}", other),
    };
    let stream = doc.get_object(content_id).unwrap().as_stream().unwrap();
    String::from_utf8(stream.content.clone()).unwrap()
}

fn media_box(doc: &Document, page_id: ObjectId) -> Vec<f32> {
    let page = doc.get_dictionary(page_id).unwrap();
    page.get(b"MediaBox")
        .and_then(|obj| obj.as_array())
        .unwrap()
        .iter()
        .map(|obj| match obj {
            Object::Integer(i) => *i as f32,
            Object::Real(r) => *r,
            other => panic!("Non-numeric media box entry: {:?}", other),
        })
        .collect()
}

#[tokio::test]
async fn test_load_document() {
    use tempfile::NamedTempFile;

    let mut doc = create_test_pdf(5);
    let temp = NamedTempFile::new().unwrap();
    let path = temp.path();

    // Save test PDF
    let mut writer = Vec::new();
    doc.save_to(&mut writer).unwrap();
    std::fs::write(path, writer).unwrap();

    // Load it back
    let loaded = load_document(path).await.unwrap();
    assert_eq!(loaded.get_pages().len(), 5);
}

#[tokio::test]
async fn test_load_document_rejects_garbage() {
    use tempfile::NamedTempFile;

    let temp = NamedTempFile::new().unwrap();
    std::fs::write(temp.path(), b"not a pdf").unwrap();

    let result = load_document(temp.path()).await;
    match result {
        Err(BookletError::Pdf(_)) => {}
        _ => panic!("Expected Pdf error"),
    }
}

#[tokio::test]
async fn test_save_document() {
    use tempfile::NamedTempFile;

    let doc = create_test_pdf(2);
    let temp = NamedTempFile::new().unwrap();

    save_document(doc, temp.path()).await.unwrap();

    // Verify file was created and can be loaded
    assert!(temp.path().exists());
    let loaded = Document::load(temp.path()).unwrap();
    assert_eq!(loaded.get_pages().len(), 2);
}

#[tokio::test]
async fn test_empty_source_yields_empty_booklet() {
    let doc = create_test_pdf(0);
    let options = BookletOptions::default();

    let booklet = make_booklet(&doc, &options).await.unwrap();
    assert_eq!(booklet.get_pages().len(), 0);
}

#[tokio::test]
async fn test_single_page_still_fills_one_sheet() {
    let doc = create_test_pdf(1);
    let options = BookletOptions::default();

    let booklet = make_booklet(&doc, &options).await.unwrap();
    // 1 sheet = front and back, even though three slots stay blank
    assert_eq!(booklet.get_pages().len(), 2);

    let counts: Vec<usize> = booklet
        .get_pages()
        .values()
        .map(|&id| xobject_count(&booklet, id))
        .collect();
    assert_eq!(counts, vec![1, 0]);
}

#[tokio::test]
async fn test_eight_pages_make_two_full_sheets() {
    let doc = create_test_pdf(8);
    let options = BookletOptions::default();

    let booklet = make_booklet(&doc, &options).await.unwrap();
    // 2 sheets x 2 faces
    assert_eq!(booklet.get_pages().len(), 4);

    // A full booklet has no blank slots anywhere.
    for (_, page_id) in booklet.get_pages() {
        assert_eq!(xobject_count(&booklet, page_id), 2);
    }
}

#[tokio::test]
async fn test_five_pages_pad_to_two_sheets() {
    let doc = create_test_pdf(5);
    let options = BookletOptions::default();

    let booklet = make_booklet(&doc, &options).await.unwrap();
    assert_eq!(booklet.get_pages().len(), 4);

    // Slot order is [blank, 1, 2, blank, blank, 3, 4, 5], so the faces
    // carry 1, 1, 1 and 2 real pages.
    let counts: Vec<usize> = booklet
        .get_pages()
        .values()
        .map(|&id| xobject_count(&booklet, id))
        .collect();
    assert_eq!(counts, vec![1, 1, 1, 2]);

    // A blank slot draws nothing: one XObject means one Do operator.
    let first = *booklet.get_pages().get(&1).unwrap();
    assert_eq!(page_content(&booklet, first).matches(" Do ").count(), 1);
}

#[tokio::test]
async fn test_output_pages_use_the_sheet_media_box() {
    let doc = create_test_pdf(4);
    let options = BookletOptions {
        sheet_size: SheetSize::Letter,
        ..Default::default()
    };

    let booklet = make_booklet(&doc, &options).await.unwrap();
    for (_, page_id) in booklet.get_pages() {
        assert_eq!(media_box(&booklet, page_id), vec![0.0, 0.0, 792.0, 612.0]);
    }
}

#[tokio::test]
async fn test_custom_sheet_size() {
    let doc = create_test_pdf(4);
    let options = BookletOptions {
        sheet_size: SheetSize::Custom {
            width_pt: 500.0,
            height_pt: 400.0,
        },
        ..Default::default()
    };

    let booklet = make_booklet(&doc, &options).await.unwrap();
    let first = *booklet.get_pages().get(&1).unwrap();
    assert_eq!(media_box(&booklet, first), vec![0.0, 0.0, 500.0, 400.0]);
}

#[tokio::test]
async fn test_creep_shifts_later_sheets_inward() {
    // Two Letter leaves side by side, so source pages place at scale 1
    // and the cm operands are exact.
    let doc = create_test_pdf(8);
    let options = BookletOptions {
        sheet_size: SheetSize::Custom {
            width_pt: 1224.0,
            height_pt: 792.0,
        },
        creep_pt: 8.0,
        ..Default::default()
    };

    let booklet = make_booklet(&doc, &options).await.unwrap();
    let pages = booklet.get_pages();

    // Sheet 0 draws at the plain leaf origins.
    let sheet0_front = page_content(&booklet, *pages.get(&1).unwrap());
    assert!(sheet0_front.contains("q 1 0 0 1 0 0 cm /P0 Do Q"));
    assert!(sheet0_front.contains("q 1 0 0 1 612 0 cm /P1 Do Q"));

    // Sheet 1 has crept: left leaf right by 8pt, right leaf left by 8pt.
    let sheet1_front = page_content(&booklet, *pages.get(&3).unwrap());
    assert!(sheet1_front.contains("q 1 0 0 1 8 0 cm /P0 Do Q"));
    assert!(sheet1_front.contains("q 1 0 0 1 604 0 cm /P1 Do Q"));

    // The back of a sheet shares its front's drift.
    let sheet1_back = page_content(&booklet, *pages.get(&4).unwrap());
    assert!(sheet1_back.contains("q 1 0 0 1 8 0 cm /P0 Do Q"));
}

#[tokio::test]
async fn test_outline_strokes_a_frame_per_placed_page() {
    let doc = create_test_pdf(4);

    let plain = make_booklet(&doc, &BookletOptions::default())
        .await
        .unwrap();
    let first = *plain.get_pages().get(&1).unwrap();
    assert!(!page_content(&plain, first).contains(" re S "));

    let options = BookletOptions {
        outline: true,
        ..Default::default()
    };
    let framed = make_booklet(&doc, &options).await.unwrap();
    let first = *framed.get_pages().get(&1).unwrap();
    let content = page_content(&framed, first);
    assert_eq!(content.matches(" re S ").count(), 2);
    assert!(content.contains("q 2 w 0 0 0 RG"));
}

#[tokio::test]
async fn test_validation_rejects_unsupported_pages_per_sheet() {
    let doc = create_test_pdf(4);
    let mut options = BookletOptions::default();
    options.pages_per_sheet = 8;

    let result = make_booklet(&doc, &options).await;
    match result {
        Err(BookletError::Config(_)) => {}
        _ => panic!("Expected Config error"),
    }
}

#[tokio::test]
async fn test_signature_option_is_inert() {
    let doc = create_test_pdf(16);

    let plain = make_booklet(&doc, &BookletOptions::default())
        .await
        .unwrap();

    let mut options = BookletOptions::default();
    options.signature = 3;
    let with_signature = make_booklet(&doc, &options).await.unwrap();

    // Still one booklet of 4 sheets either way.
    assert_eq!(plain.get_pages().len(), 8);
    assert_eq!(with_signature.get_pages().len(), 8);
}

#[tokio::test]
async fn test_full_workflow() {
    use tempfile::TempDir;

    let temp_dir = TempDir::new().unwrap();
    let input_path = temp_dir.path().join("input.pdf");

    // Create and save input PDF
    let mut doc = create_test_pdf(10);
    let mut writer = Vec::new();
    doc.save_to(&mut writer).unwrap();
    std::fs::write(&input_path, writer).unwrap();

    // Load the PDF
    let loaded = load_document(&input_path).await.unwrap();
    assert_eq!(loaded.get_pages().len(), 10);

    // Impose with the temp dir as destination
    let options = BookletOptions {
        destination: temp_dir.path().to_path_buf(),
        sheet_size: SheetSize::Letter,
        ..Default::default()
    };
    let stats = calculate_statistics(&loaded);
    let booklet = make_booklet(&loaded, &options).await.unwrap();

    // Save under the title-derived name
    let output_path = options.output_path("input.pdf");
    assert!(output_path.ends_with("input booklet.pdf"));
    save_document(booklet, &output_path).await.unwrap();

    // Verify the result round-trips with the predicted page count
    let reloaded = Document::load(&output_path).unwrap();
    assert_eq!(reloaded.get_pages().len(), stats.output_pages);
    assert_eq!(reloaded.get_pages().len(), 6);
}
