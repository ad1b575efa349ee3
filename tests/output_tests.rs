use std::collections::BTreeMap;
use std::path::Path;
use txdb_stats::aggregator::DatabaseStats;
use txdb_stats::commands::{execute_stats, StatsArgs};
use txdb_stats::output::{validate_path, write_report};
use txdb_stats::store::TransactionStore;
use tempfile::NamedTempFile;

#[test]
fn test_write_report_two_lines() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("out.txt");

    let mapping: BTreeMap<u32, u32> = [(1, 10), (2, 20)].into_iter().collect();
    write_report(mapping, &path).unwrap();

    assert_eq!(std::fs::read_to_string(&path).unwrap(), "1\t10\n2\t20\n");
}

#[test]
fn test_write_report_keeps_iteration_order() {
    let temp_file = NamedTempFile::new().unwrap();
    let store = TransactionStore::from_transactions(vec![vec!["z", "y"], vec!["y"]]);

    write_report(DatabaseStats::new(&store).item_frequencies(), temp_file.path()).unwrap();

    let written = std::fs::read_to_string(temp_file.path()).unwrap();
    assert_eq!(written, "y\t2\nz\t1\n");
}

#[test]
fn test_validate_output_path_directory() {
    let temp_dir = tempfile::tempdir().unwrap();
    assert!(validate_path(temp_dir.path()).is_err());
    assert!(validate_path(Path::new("")).is_err());
}

#[test]
fn test_execute_stats_writes_reports_and_graphs() {
    let temp_dir = tempfile::tempdir().unwrap();
    let input = temp_dir.path().join("db.txt");
    std::fs::write(&input, "a\tb\nb\tc\nb\n").unwrap();

    let args = StatsArgs {
        source: input.to_str().unwrap().to_string(),
        print_summary: false,
        item_frequencies: Some(temp_dir.path().join("freq.tsv")),
        length_distribution: Some(temp_dir.path().join("lengths.tsv")),
        frequency_ranges: Some(temp_dir.path().join("ranges.tsv")),
        plot_dir: Some(temp_dir.path().join("plots")),
        ..Default::default()
    };

    execute_stats(args).unwrap();

    assert_eq!(
        std::fs::read_to_string(temp_dir.path().join("freq.tsv")).unwrap(),
        "b\t3\na\t1\nc\t1\n"
    );
    assert_eq!(
        std::fs::read_to_string(temp_dir.path().join("lengths.tsv")).unwrap(),
        "1\t1\n2\t2\n"
    );
    assert!(temp_dir.path().join("ranges.tsv").exists());
    assert!(temp_dir.path().join("plots/frequency.svg").exists());
    assert!(temp_dir.path().join("plots/transaction_length.svg").exists());
}

#[test]
fn test_execute_stats_missing_source_fails() {
    let temp_dir = tempfile::tempdir().unwrap();
    let report = temp_dir.path().join("freq.tsv");

    let args = StatsArgs {
        source: temp_dir.path().join("missing.txt").to_str().unwrap().to_string(),
        print_summary: false,
        item_frequencies: Some(report.clone()),
        ..Default::default()
    };

    assert!(execute_stats(args).is_err());
    assert!(!report.exists());
}
