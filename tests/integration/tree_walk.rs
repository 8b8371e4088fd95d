//! Walking a top-level folder and merging each subfolder.

use pdffold::config::Config;
use pdffold::error::PdfFoldError;
use pdffold::merge::merge_tree;
use pdffold::output::OutputFormatter;
use pdffold::utils::base_name;
use tempfile::TempDir;

use crate::common::{page_count, write_pdf};

fn sequential_config() -> Config {
    Config {
        jobs: Some(1),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_each_subfolder_gets_its_own_output() {
    let root = TempDir::new().unwrap();
    let invoices = root.path().join("invoices");
    let receipts = root.path().join("receipts");
    std::fs::create_dir(&invoices).unwrap();
    std::fs::create_dir(&receipts).unwrap();

    write_pdf(&invoices.join("jan.pdf"), 1);
    write_pdf(&invoices.join("feb.pdf"), 2);
    write_pdf(&receipts.join("lunch.pdf"), 1);

    let outcomes = merge_tree(root.path(), &sequential_config(), &OutputFormatter::quiet())
        .await
        .unwrap();

    assert_eq!(outcomes.len(), 2);
    assert_eq!(page_count(&invoices.join("merge_invoices.pdf")), 3);
    assert_eq!(page_count(&receipts.join("merge_receipts.pdf")), 1);

    // PDFs sitting directly in the root are not part of any subfolder task.
    let root_output = root
        .path()
        .join(format!("merge_{}.pdf", base_name(root.path())));
    assert!(!root_output.exists());
}

#[tokio::test]
async fn test_root_without_subfolders_is_merged_itself() {
    let root = TempDir::new().unwrap();
    write_pdf(&root.path().join("a.pdf"), 1);
    write_pdf(&root.path().join("b.pdf"), 1);

    let outcomes = merge_tree(root.path(), &sequential_config(), &OutputFormatter::quiet())
        .await
        .unwrap();

    assert_eq!(outcomes.len(), 1);
    let output = root
        .path()
        .join(format!("merge_{}.pdf", base_name(root.path())));
    assert_eq!(page_count(&output), 2);
}

#[tokio::test]
async fn test_empty_subfolder_does_not_fail_the_run() {
    let root = TempDir::new().unwrap();
    let full = root.path().join("full");
    let empty = root.path().join("empty");
    std::fs::create_dir(&full).unwrap();
    std::fs::create_dir(&empty).unwrap();
    write_pdf(&full.join("doc.pdf"), 2);

    let outcomes = merge_tree(root.path(), &sequential_config(), &OutputFormatter::quiet())
        .await
        .unwrap();

    assert_eq!(outcomes.len(), 2);
    assert!(full.join("merge_full.pdf").exists());
    assert!(!empty.join("merge_empty.pdf").exists());
}

#[tokio::test]
async fn test_failing_folder_does_not_stop_siblings() {
    let root = TempDir::new().unwrap();
    let good = root.path().join("good");
    let bad = root.path().join("bad");
    std::fs::create_dir(&good).unwrap();
    std::fs::create_dir(&bad).unwrap();

    write_pdf(&good.join("doc.pdf"), 1);
    std::fs::write(bad.join("broken.pdf"), b"not a real pdf").unwrap();

    let outcomes = merge_tree(root.path(), &sequential_config(), &OutputFormatter::quiet())
        .await
        .unwrap();

    // The bad folder is reported and dropped; the good one still merged.
    assert_eq!(outcomes.len(), 1);
    assert!(good.join("merge_good.pdf").exists());
    assert!(!bad.join("merge_bad.pdf").exists());
}

#[tokio::test]
async fn test_write_failure_aborts_the_run() {
    let root = TempDir::new().unwrap();
    let blocked = root.path().join("blocked");
    let good = root.path().join("good");
    std::fs::create_dir(&blocked).unwrap();
    std::fs::create_dir(&good).unwrap();

    write_pdf(&blocked.join("a.pdf"), 1);
    write_pdf(&good.join("doc.pdf"), 1);
    // A directory squatting on the temp path makes the write fail; that is
    // not a per-source problem, so the whole run must fail rather than
    // silently dropping the folder.
    std::fs::create_dir(blocked.join("merge_blocked.pdf.tmp")).unwrap();

    let result = merge_tree(root.path(), &sequential_config(), &OutputFormatter::quiet()).await;

    assert!(matches!(
        result,
        Err(PdfFoldError::FailedToCreateOutput { .. })
    ));
    assert!(!blocked.join("merge_blocked.pdf").exists());
}

#[tokio::test]
async fn test_fail_fast_aborts_on_first_failure() {
    let root = TempDir::new().unwrap();
    let bad = root.path().join("bad");
    std::fs::create_dir(&bad).unwrap();
    std::fs::write(bad.join("broken.pdf"), b"not a real pdf").unwrap();

    let config = Config {
        fail_fast: true,
        ..Default::default()
    };
    let result = merge_tree(root.path(), &config, &OutputFormatter::quiet()).await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_all_folders_failing_is_an_error() {
    let root = TempDir::new().unwrap();
    let bad = root.path().join("bad");
    std::fs::create_dir(&bad).unwrap();
    std::fs::write(bad.join("broken.pdf"), b"not a real pdf").unwrap();

    let result = merge_tree(root.path(), &sequential_config(), &OutputFormatter::quiet()).await;

    assert!(matches!(
        result,
        Err(PdfFoldError::TasksFailed { failed: 1, total: 1 })
    ));
}

#[tokio::test]
async fn test_parallel_run_matches_sequential_results() {
    let root = TempDir::new().unwrap();
    for name in ["a", "b", "c", "d"] {
        let sub = root.path().join(name);
        std::fs::create_dir(&sub).unwrap();
        write_pdf(&sub.join("doc.pdf"), 1);
    }

    let config = Config {
        jobs: Some(4),
        ..Default::default()
    };
    let outcomes = merge_tree(root.path(), &config, &OutputFormatter::quiet())
        .await
        .unwrap();

    // Deterministic order regardless of completion order.
    let labels: Vec<&str> = outcomes.iter().map(|o| o.label.as_str()).collect();
    assert_eq!(labels, vec!["a", "b", "c", "d"]);
}
