//! Extraction tests against small PDFs built in memory with `lopdf`.

use fincheck_extract::{extract_pdf_text, extract_pdf_text_blocking, ExtractError, StagedUpload};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

/// Build a PDF with one page per entry in `pages`, each showing that text.
fn build_pdf(pages: &[&str]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for text in pages {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 12.into()]),
                Operation::new("Td", vec![72.into(), 720.into()]),
                Operation::new("Tj", vec![Object::string_literal(*text)]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().expect("encode content"),
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = i64::try_from(kids.len()).expect("page count");
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).expect("save pdf");
    bytes
}

#[test]
fn extracts_single_page_text() {
    let dir = tempfile::tempdir().expect("temp dir");
    let bytes = build_pdf(&["Acme Corp reported record profits this quarter."]);
    let staged = StagedUpload::stage(dir.path(), "acme.pdf", &bytes).expect("stage");

    let text = extract_pdf_text(staged.path()).expect("extract");
    assert!(
        text.contains("Acme Corp reported record profits this quarter."),
        "got: {text:?}"
    );
}

#[test]
fn pages_are_concatenated_in_document_order() {
    let dir = tempfile::tempdir().expect("temp dir");
    let bytes = build_pdf(&["First page revenue", "Second page costs", "Third page outlook"]);
    let staged = StagedUpload::stage(dir.path(), "multi.pdf", &bytes).expect("stage");

    let text = extract_pdf_text(staged.path()).expect("extract");
    let first = text.find("First page revenue").expect("first page present");
    let second = text.find("Second page costs").expect("second page present");
    let third = text.find("Third page outlook").expect("third page present");
    assert!(first < second && second < third, "got: {text:?}");
}

#[test]
fn garbage_bytes_are_an_error_not_a_panic() {
    let dir = tempfile::tempdir().expect("temp dir");
    let staged =
        StagedUpload::stage(dir.path(), "notes.pdf", b"this is not a pdf at all").expect("stage");

    let err = extract_pdf_text(staged.path()).unwrap_err();
    assert!(matches!(err, ExtractError::Pdf(_)), "got {err:?}");
}

#[test]
fn empty_file_is_an_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let staged = StagedUpload::stage(dir.path(), "empty.pdf", b"").expect("stage");

    assert!(extract_pdf_text(staged.path()).is_err());
}

#[tokio::test]
async fn blocking_wrapper_returns_text() {
    let dir = tempfile::tempdir().expect("temp dir");
    let bytes = build_pdf(&["Quarterly dividend maintained"]);
    let staged = StagedUpload::stage(dir.path(), "dividend.pdf", &bytes).expect("stage");

    let text = extract_pdf_text_blocking(staged.path_buf())
        .await
        .expect("extract");
    assert!(text.contains("Quarterly dividend maintained"), "got: {text:?}");
}

#[tokio::test]
async fn blocking_wrapper_reports_missing_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let staged = StagedUpload::stage(dir.path(), "gone.pdf", b"x").expect("stage");
    let path = staged.path_buf();
    drop(staged);

    let err = extract_pdf_text_blocking(path).await.unwrap_err();
    assert!(
        matches!(err, ExtractError::Pdf(_) | ExtractError::Io(_)),
        "got {err:?}"
    );
}
