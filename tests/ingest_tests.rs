use serde_json::json;
use std::io::Write;
use txdb_stats::aggregator::DatabaseStats;
use txdb_stats::ingest::{Source, Table};
use txdb_stats::store::TransactionId;
use txdb_stats::utils::error::{IngestError, StatsError};
use tempfile::NamedTempFile;

#[test]
fn test_empty_file_gives_empty_store() {
    let file = NamedTempFile::new().unwrap();

    let store = Source::resolve(file.path().to_str().unwrap(), "\t")
        .load()
        .unwrap();
    let stats = DatabaseStats::new(&store);

    assert_eq!(stats.size(), 0);
    assert_eq!(stats.min_length(), Err(StatsError::EmptyDatabase));
}

#[test]
fn test_missing_file_is_not_found() {
    let temp_dir = tempfile::tempdir().unwrap();
    let missing = temp_dir.path().join("missing.txt");

    let result = Source::resolve(missing.to_str().unwrap(), "\t").load();

    assert!(matches!(result, Err(IngestError::NotFound(path)) if path == missing));
}

#[test]
fn test_tab_separated_file() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "a\td\te\nb\ta\tf\t\n\n  \tc  \n").unwrap();

    let store = Source::resolve(file.path().to_str().unwrap(), "\t")
        .load()
        .unwrap();

    assert_eq!(store.size(), 4);
    assert_eq!(store.lengths(), &[3, 3, 0, 1]);
    assert_eq!(
        store.get(&TransactionId::Number(4)),
        Some(&["c".to_string()][..])
    );
}

#[test]
fn test_temporal_file() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "1 a b\n1 c\n3 a\n").unwrap();

    let store = Source::resolve(file.path().to_str().unwrap(), " ")
        .temporal()
        .load()
        .unwrap();
    let stats = DatabaseStats::new(&store);

    let periods = stats.period_stats().unwrap();
    assert_eq!((periods.min, periods.max), (0, 2));
    assert_eq!(
        stats.transactions_per_timestamp().unwrap(),
        vec![(1, 2), (2, 0), (3, 1)]
    );
}

#[test]
fn test_table_source_matches_line_source() {
    let table = Table::new()
        .with_column("tid", vec![json!(1), json!(2), json!(3)])
        .with_column(
            "Transactions",
            vec![json!(["a", "d", "e"]), json!(["b", "a"]), json!(["d"])],
        );

    let mut file = NamedTempFile::new().unwrap();
    write!(file, "a,d,e\nb,a\nd\n").unwrap();

    let from_table = Source::Table(table).load().unwrap();
    let from_file = Source::resolve(file.path().to_str().unwrap(), ",")
        .load()
        .unwrap();

    assert_eq!(from_table.transactions(), from_file.transactions());
    assert_eq!(
        DatabaseStats::new(&from_table).item_frequencies(),
        DatabaseStats::new(&from_file).item_frequencies()
    );
}

#[test]
fn test_malformed_table_is_error() {
    let table = Table::new().with_column("id", vec![json!(1)]);

    assert!(matches!(
        Source::Table(table).load(),
        Err(IngestError::MalformedTable(_))
    ));
}
