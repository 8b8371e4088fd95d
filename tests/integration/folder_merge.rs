//! Merging a single folder of PDFs.

use pdffold::merge::merge_folder;
use pdffold::output::OutputFormatter;
use pdffold::scan::FolderTask;
use tempfile::TempDir;

use crate::common::{page_count, page_widths, write_pdf, write_pdf_with_width};

#[tokio::test]
async fn test_folder_merge_concatenates_in_name_order() {
    let dir = TempDir::new().unwrap();
    // Written out of order on purpose; the scan sorts by filename.
    write_pdf_with_width(&dir.path().join("b-report.pdf"), 2, 200.0);
    write_pdf_with_width(&dir.path().join("a-cover.pdf"), 3, 100.0);

    let task = FolderTask::for_dir(dir.path());
    let outcome = merge_folder(&task, &OutputFormatter::quiet())
        .await
        .unwrap();

    let output = outcome.output.expect("output should have been written");
    assert_eq!(output, task.output_path());
    assert_eq!(outcome.files, 2);
    assert_eq!(outcome.pages, 5);
    assert_eq!(page_count(&output), 5);
    // All of a-cover's pages precede all of b-report's.
    assert_eq!(
        page_widths(&output),
        vec![100.0, 100.0, 100.0, 200.0, 200.0]
    );
}

#[tokio::test]
async fn test_empty_folder_is_a_noop() {
    let dir = TempDir::new().unwrap();

    let task = FolderTask::for_dir(dir.path());
    let outcome = merge_folder(&task, &OutputFormatter::quiet())
        .await
        .unwrap();

    assert!(outcome.output.is_none());
    assert_eq!(outcome.files, 0);
    assert!(!task.output_path().exists());
}

#[tokio::test]
async fn test_folder_with_only_prior_outputs_is_a_noop() {
    let dir = TempDir::new().unwrap();
    write_pdf(&dir.path().join("merge_old.pdf"), 4);

    let task = FolderTask::for_dir(dir.path());
    let outcome = merge_folder(&task, &OutputFormatter::quiet())
        .await
        .unwrap();

    assert!(outcome.output.is_none());
    // The stale output is left alone, not rewritten.
    assert_eq!(page_count(&dir.path().join("merge_old.pdf")), 4);
}

#[tokio::test]
async fn test_extension_match_is_case_insensitive() {
    let dir = TempDir::new().unwrap();
    write_pdf(&dir.path().join("SCAN.PDF"), 1);
    write_pdf(&dir.path().join("notes.pdf"), 1);

    let task = FolderTask::for_dir(dir.path());
    let outcome = merge_folder(&task, &OutputFormatter::quiet())
        .await
        .unwrap();

    assert_eq!(outcome.files, 2);
    assert_eq!(outcome.pages, 2);
}

#[tokio::test]
async fn test_non_pdf_files_and_subdirectories_are_ignored() {
    let dir = TempDir::new().unwrap();
    write_pdf(&dir.path().join("doc.pdf"), 2);
    std::fs::write(dir.path().join("readme.txt"), b"not a pdf").unwrap();
    std::fs::create_dir(dir.path().join("nested")).unwrap();
    write_pdf(&dir.path().join("nested").join("deep.pdf"), 5);

    let task = FolderTask::for_dir(dir.path());
    let outcome = merge_folder(&task, &OutputFormatter::quiet())
        .await
        .unwrap();

    // Only the top-level PDF counts; the scan does not recurse.
    assert_eq!(outcome.files, 1);
    assert_eq!(outcome.pages, 2);
}

#[tokio::test]
async fn test_rerun_is_idempotent() {
    let dir = TempDir::new().unwrap();
    write_pdf(&dir.path().join("a.pdf"), 1);
    write_pdf(&dir.path().join("b.pdf"), 2);

    let task = FolderTask::for_dir(dir.path());
    let formatter = OutputFormatter::quiet();

    let first = merge_folder(&task, &formatter).await.unwrap();
    let second = merge_folder(&task, &formatter).await.unwrap();

    // The first run's output is excluded as an input to the second, so the
    // rewritten document is identical in shape.
    assert_eq!(first.files, second.files);
    assert_eq!(first.pages, second.pages);
    assert_eq!(page_count(&task.output_path()), 3);
}

#[tokio::test]
async fn test_existing_output_is_overwritten() {
    let dir = TempDir::new().unwrap();
    write_pdf(&dir.path().join("a.pdf"), 2);

    let task = FolderTask::for_dir(dir.path());
    // Stale output from a previous layout of the folder.
    write_pdf(&task.output_path(), 9);

    let outcome = merge_folder(&task, &OutputFormatter::quiet())
        .await
        .unwrap();

    assert_eq!(outcome.pages, 2);
    assert_eq!(page_count(&task.output_path()), 2);
}
