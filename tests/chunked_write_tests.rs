//! Tests for splitting a dataset into chunk files

use std::path::Path;

use pqchunk_core::{Dataset, NullProgress, ProgressEvent, ReadOptions, RowIndex, WriteOptions};
use pqchunk_io::{chunk_path, load_parquet, read_parquets, write_parquets, Error};

use test_data_gen::{
    assert_same_rows, create_temp_dir, ids, people, people_batch, remove_temp_dir, write_file,
};

fn chunk_rows(dir: &str, prefix: &str, chunks: usize) -> Vec<usize> {
    (0..chunks)
        .map(|i| load_parquet(chunk_path(dir, prefix, i)).unwrap().num_rows())
        .collect()
}

#[test]
fn test_single_chunk_holds_everything() {
    let dir = create_temp_dir("one-chunk");
    let data = people(0, 17);

    let report = write_parquets(&data, &dir, &WriteOptions::default(), &mut NullProgress).unwrap();

    assert_eq!(report.chunks.len(), 1);
    assert_eq!(report.chunks[0].path, Path::new(&format!("{}data_1.parquet", dir)));
    assert_eq!(report.chunks[0].rows, 17);
    assert!(report.chunks[0].bytes > 0);
    assert!(!Path::new(&format!("{}data_2.parquet", dir)).exists());

    let back = load_parquet(&report.chunks[0].path).unwrap();
    assert_same_rows(
        &back.to_record_batch().unwrap(),
        &data.to_record_batch().unwrap(),
    );

    remove_temp_dir(&dir);
}

#[test]
fn test_ten_rows_three_chunks() {
    let dir = create_temp_dir("ten-three");
    let data = people(0, 10);

    let mut events: Vec<ProgressEvent> = Vec::new();
    let options = WriteOptions::default().with_chunks(3);
    let report = write_parquets(&data, &dir, &options, &mut events).unwrap();

    assert_eq!(report.chunks.len(), 3);
    assert_eq!(chunk_rows(&dir, "data", 3), vec![3, 3, 4]);
    assert_eq!(report.total_rows(), 10);
    assert!(!Path::new(&format!("{}data_4.parquet", dir)).exists());

    assert_eq!(
        events.first(),
        Some(&ProgressEvent::Exporting { rows: 10, columns: 3 })
    );
    let written: Vec<(usize, usize, usize, u64)> = events
        .iter()
        .filter_map(|e| match e {
            ProgressEvent::ChunkWritten {
                position,
                total,
                rows,
                bytes,
                ..
            } => Some((*position, *total, *rows, *bytes)),
            _ => None,
        })
        .collect();
    assert_eq!(written.len(), 3);
    for (i, (position, total, rows, bytes)) in written.into_iter().enumerate() {
        assert_eq!(position, i + 1);
        assert_eq!(total, 3);
        assert_eq!(rows, report.chunks[i].rows);
        assert_eq!(bytes, std::fs::metadata(&report.chunks[i].path).unwrap().len());
    }

    remove_temp_dir(&dir);
}

#[test]
fn test_custom_prefix_and_name_stem_path() {
    let dir = create_temp_dir("prefix");
    let data = people(0, 6);

    let options = WriteOptions::default().with_chunks(2).with_prefix("part");
    let stem = format!("{}train-", dir);
    write_parquets(&data, &stem, &options, &mut NullProgress).unwrap();

    assert!(Path::new(&format!("{}train-part_1.parquet", dir)).exists());
    assert!(Path::new(&format!("{}train-part_2.parquet", dir)).exists());

    remove_temp_dir(&dir);
}

#[test]
fn test_zero_chunks_rejected_before_writing() {
    let dir = create_temp_dir("zero-chunks");
    let data = people(0, 5);

    let err = write_parquets(
        &data,
        &dir,
        &WriteOptions::default().with_chunks(0),
        &mut NullProgress,
    )
    .unwrap_err();

    assert!(matches!(
        err,
        Error::Core(pqchunk_core::Error::InvalidArgument(_))
    ));
    assert_eq!(std::fs::read_dir(&dir).unwrap().count(), 0);

    remove_temp_dir(&dir);
}

#[test]
fn test_zero_column_dataset_rejected() {
    let source = create_temp_dir("no-columns-src");
    write_file(&format!("{}a.parquet", source), &people_batch(0, 3));
    write_file(&format!("{}b.parquet", source), &people_batch(3, 3));
    let empty =
        read_parquets(&source, &ReadOptions::default().with_limit(0), &mut NullProgress).unwrap();
    assert_eq!(empty.shape(), (0, 0));

    let dir = create_temp_dir("no-columns");
    let mut events: Vec<ProgressEvent> = Vec::new();
    let err = write_parquets(&empty, &dir, &WriteOptions::default(), &mut events).unwrap_err();

    assert!(matches!(
        err,
        Error::Core(pqchunk_core::Error::InvalidArgument(_))
    ));
    assert_eq!(std::fs::read_dir(&dir).unwrap().count(), 0);
    assert!(events.is_empty());

    remove_temp_dir(&dir);
    remove_temp_dir(&source);
}

#[test]
fn test_more_chunks_than_rows_writes_empty_files() {
    let dir = create_temp_dir("sparse");
    let data = people(0, 2);

    let report = write_parquets(
        &data,
        &dir,
        &WriteOptions::default().with_chunks(5),
        &mut NullProgress,
    )
    .unwrap();

    assert_eq!(report.chunks.len(), 5);
    assert_eq!(report.total_rows(), 2);
    let empty = load_parquet(chunk_path(&dir, "data", 0)).unwrap();
    assert_eq!(empty.shape(), (0, 3));

    let back = read_parquets(&dir, &ReadOptions::default(), &mut NullProgress).unwrap();
    assert_eq!(ids(&back), vec![0, 1]);

    remove_temp_dir(&dir);
}

#[test]
fn test_round_trip_for_every_chunk_count() {
    let rows = 13;
    let data = people(0, rows);
    let expected = data.to_record_batch().unwrap();

    for chunks in 1..=rows {
        let dir = create_temp_dir("round-trip");
        write_parquets(
            &data,
            &dir,
            &WriteOptions::default().with_chunks(chunks),
            &mut NullProgress,
        )
        .unwrap();

        let back = read_parquets(&dir, &ReadOptions::default(), &mut NullProgress).unwrap();
        assert_same_rows(&back.to_record_batch().unwrap(), &expected);
        assert_eq!(back.index(), &RowIndex::Range(0..rows));
        assert!(chunk_rows(&dir, "data", chunks).iter().all(|&n| n > 0));

        remove_temp_dir(&dir);
    }
}

#[test]
fn test_round_trip_of_sliced_and_concatenated_input() {
    let dir = create_temp_dir("multi-batch");
    let data = Dataset::concat(vec![people(0, 4), people(4, 7), people(11, 1)], true).unwrap();

    write_parquets(
        &data,
        &dir,
        &WriteOptions::default().with_chunks(5),
        &mut NullProgress,
    )
    .unwrap();

    let back = read_parquets(&dir, &ReadOptions::default(), &mut NullProgress).unwrap();
    assert_eq!(ids(&back), (0..12).collect::<Vec<i64>>());
    assert_eq!(chunk_rows(&dir, "data", 5), vec![2, 2, 3, 2, 3]);

    remove_temp_dir(&dir);
}

#[test]
fn test_unwritable_destination() {
    let data = people(0, 3);
    let err = write_parquets(
        &data,
        "/nonexistent-pqchunk-dir/sub/",
        &WriteOptions::default(),
        &mut NullProgress,
    )
    .unwrap_err();

    match err {
        Error::Io { path, .. } => assert!(path.ends_with("data_1.parquet")),
        other => panic!("Expected Io error, got {:?}", other),
    }
}

#[test]
fn test_report_serializes() {
    let dir = create_temp_dir("report");
    let report = write_parquets(
        &people(0, 4),
        &dir,
        &WriteOptions::default().with_chunks(2),
        &mut NullProgress,
    )
    .unwrap();

    let json = serde_json::to_value(&report).unwrap();
    let chunks = json["chunks"].as_array().unwrap();
    assert_eq!(chunks.len(), 2);
    assert_eq!(chunks[0]["rows"], 2);

    remove_temp_dir(&dir);
}
