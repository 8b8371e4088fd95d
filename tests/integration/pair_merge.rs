//! Merging exactly two named PDFs.

use pdffold::error::PdfFoldError;
use pdffold::merge::merge_pair;
use pdffold::output::OutputFormatter;
use pdffold::utils::base_name;
use tempfile::TempDir;

use crate::common::{page_count, page_widths, write_pdf, write_pdf_with_width};

#[tokio::test]
async fn test_pair_concatenates_in_argument_order() {
    let dir = TempDir::new().unwrap();
    let first = dir.path().join("first.pdf");
    let second = dir.path().join("second.pdf");
    write_pdf_with_width(&first, 1, 100.0);
    write_pdf_with_width(&second, 2, 200.0);

    let outcome = merge_pair(&first, &second, &OutputFormatter::quiet())
        .await
        .unwrap();

    let output = outcome.output.expect("output should have been written");
    assert_eq!(outcome.files, 2);
    assert_eq!(outcome.pages, 3);
    assert_eq!(page_widths(&output), vec![100.0, 200.0, 200.0]);
}

#[tokio::test]
async fn test_pair_output_named_after_first_files_parent() {
    let root = TempDir::new().unwrap();
    let invoices = root.path().join("invoices");
    let archive = root.path().join("archive");
    std::fs::create_dir(&invoices).unwrap();
    std::fs::create_dir(&archive).unwrap();

    let first = invoices.join("jan.pdf");
    let second = archive.join("feb.pdf");
    write_pdf(&first, 1);
    write_pdf(&second, 1);

    let outcome = merge_pair(&first, &second, &OutputFormatter::quiet())
        .await
        .unwrap();

    // Lands next to the first file even though the second lives elsewhere.
    let expected = invoices.join("merge_invoices.pdf");
    assert_eq!(outcome.output.as_deref(), Some(expected.as_path()));
    assert_eq!(page_count(&expected), 2);
    assert!(!archive.join("merge_archive.pdf").exists());
}

#[tokio::test]
async fn test_pair_order_is_not_alphabetical() {
    let dir = TempDir::new().unwrap();
    // "z" is given first; argument order wins over filename order.
    let first = dir.path().join("z.pdf");
    let second = dir.path().join("a.pdf");
    write_pdf_with_width(&first, 1, 300.0);
    write_pdf_with_width(&second, 1, 400.0);

    let outcome = merge_pair(&first, &second, &OutputFormatter::quiet())
        .await
        .unwrap();

    let output = outcome.output.unwrap();
    assert_eq!(page_widths(&output), vec![300.0, 400.0]);
}

#[tokio::test]
async fn test_pair_aborts_before_reading_when_second_is_missing() {
    let dir = TempDir::new().unwrap();
    let first = dir.path().join("first.pdf");
    write_pdf(&first, 1);

    let result = merge_pair(
        &first,
        &dir.path().join("missing.pdf"),
        &OutputFormatter::quiet(),
    )
    .await;

    assert!(matches!(result, Err(PdfFoldError::FileNotFound { .. })));
    let expected = dir
        .path()
        .join(format!("merge_{}.pdf", base_name(dir.path())));
    assert!(!expected.exists());
}
