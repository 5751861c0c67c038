//! End-to-end tests: source → encoder → uploader
//!
//! Payloads are decoded with the `csv` crate to check that every field
//! survives the trip byte-for-byte.

mod common;

use calllog_core::config::UploadConfig;
use calllog_core::encode::{encode, encode_in, format_timestamp, HEADER};
use calllog_core::source::{JsonLinesCallLog, RecordSource, SqliteCallLog};
use calllog_core::upload::{UploadOutcome, Uploader};
use calllog_core::{CallRecord, CallType, Error, Exporter};
use chrono::{Local, TimeZone, Utc};
use common::{read_csv, unused_url, MockCollector};
use tempfile::TempDir;

fn tricky_records() -> Vec<CallRecord> {
    let names = [
        "",
        "Plain Name",
        "Jane \"J\" Doe",
        "\"",
        "\"\"\"",
        "comma, inside",
        "line\nbreak",
        "crlf\r\nbreak",
        "Zoë Ångström 王小明",
        "trailing quote\"",
    ];
    names
        .iter()
        .enumerate()
        .map(|(i, name)| CallRecord {
            number: if i % 3 == 0 {
                String::new()
            } else {
                format!("+1 (555) 01{:02}", i)
            },
            call_type: CallType::from_code(i as i32),
            timestamp: 1_700_000_000_000 - (i as i64) * 86_400_000,
            duration_secs: (i as u64) * 37,
            name: name.to_string(),
        })
        .collect()
}

// ============================================
// Encoding Round Trips
// ============================================

#[test]
fn test_encoded_rows_decode_to_record_fields() {
    let records = tricky_records();
    let payload = encode_in(&records, &Utc).unwrap();

    let (header, rows) = read_csv(payload.as_str());
    assert_eq!(header.join(","), HEADER);
    assert_eq!(rows.len(), records.len());

    for (record, row) in records.iter().zip(&rows) {
        assert_eq!(
            row,
            &vec![
                record.number.clone(),
                record.call_type.as_str().to_string(),
                format_timestamp(record.timestamp, &Utc).unwrap(),
                record.duration_secs.to_string(),
                record.name.clone(),
            ]
        );
    }
}

#[test]
fn test_row_count_for_various_sizes() {
    for n in [0usize, 1, 2, 17, 250] {
        let records: Vec<_> = (0..n)
            .map(|i| CallRecord {
                number: i.to_string(),
                call_type: CallType::Outgoing,
                timestamp: i as i64 * 1000,
                duration_secs: 1,
                name: format!("Caller \"{}\"", i),
            })
            .collect();

        let payload = encode_in(&records, &Utc).unwrap();
        assert_eq!(payload.as_str().lines().count(), n + 1);
        let (header, rows) = read_csv(payload.as_str());
        assert_eq!(header.len(), 5);
        assert_eq!(rows.len(), n);
    }
}

#[test]
fn test_known_scenario_in_local_time() {
    let timestamp = Local
        .with_ymd_and_hms(2024, 1, 1, 10, 0, 0)
        .single()
        .expect("10:00 local is unambiguous")
        .timestamp_millis();

    let record = CallRecord {
        number: "555-1234".to_string(),
        call_type: CallType::Incoming,
        timestamp,
        duration_secs: 42,
        name: "Jane \"J\" Doe".to_string(),
    };

    let payload = encode(&[record]).unwrap();
    assert_eq!(
        payload.as_str(),
        "number,type,date,duration,name\n\
         \"555-1234\",\"INCOMING\",\"2024-01-01 10:00:00\",\"42\",\"Jane \"\"J\"\" Doe\"\n"
    );
}

// ============================================
// Sources Through the Exporter
// ============================================

fn write_jsonl(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("calls.jsonl");
    std::fs::write(
        &path,
        concat!(
            r#"{"number": "555-0001", "type": 2, "date": 1000, "duration": 5, "name": "Older"}"#,
            "\n",
            r#"{"number": "555-0002", "type": 6, "date": 2000, "duration": 0, "name": "Newer \"N\""}"#,
            "\n",
        ),
    )
    .unwrap();
    path
}

#[test]
fn test_jsonl_source_payload_is_newest_first() {
    let dir = TempDir::new().unwrap();
    let source = JsonLinesCallLog::new(write_jsonl(&dir));

    let records = source.read_records().unwrap();
    let payload = encode_in(&records, &Utc).unwrap();
    let (_, rows) = read_csv(payload.as_str());

    assert_eq!(rows[0][0], "555-0002");
    assert_eq!(rows[0][1], "BLOCKED");
    assert_eq!(rows[0][4], "Newer \"N\"");
    assert_eq!(rows[1][0], "555-0001");
    assert_eq!(rows[1][1], "OUTGOING");
}

#[tokio::test]
async fn test_exporter_delivers_sqlite_call_log() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("calllog.db");
    let conn = rusqlite::Connection::open(&path).unwrap();
    conn.execute_batch(
        "CREATE TABLE calls (number TEXT, type INTEGER, date INTEGER, duration INTEGER, name TEXT);
         INSERT INTO calls VALUES ('555-1111', 1, 1000, 12, 'A');
         INSERT INTO calls VALUES ('555-2222', 3, 3000, 0, NULL);",
    )
    .unwrap();
    drop(conn);

    let mock = MockCollector::respond_with(200);
    let exporter = Exporter::new(Uploader::new(UploadConfig::for_endpoint(mock.url())).unwrap());

    let outcome = exporter
        .run(&SqliteCallLog::new(&path))
        .unwrap()
        .wait()
        .await;
    assert_eq!(outcome, UploadOutcome::Delivered(200));

    let (_, rows) = read_csv(&mock.request().body);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0][0], "555-2222");
    assert_eq!(rows[0][1], "MISSED");
    assert_eq!(rows[0][4], "");
    assert_eq!(rows[1][3], "12");
}

#[tokio::test]
async fn test_exporter_reports_transport_error_without_collector() {
    let dir = TempDir::new().unwrap();
    let exporter = Exporter::new(Uploader::new(UploadConfig::for_endpoint(unused_url())).unwrap());

    let pending = exporter
        .run(&JsonLinesCallLog::new(write_jsonl(&dir)))
        .unwrap();
    assert!(matches!(
        pending.wait().await,
        UploadOutcome::TransportError(_)
    ));
}

#[test]
fn test_exporter_surfaces_source_failure() {
    let dir = TempDir::new().unwrap();
    let exporter = Exporter::new(Uploader::new(UploadConfig::for_endpoint(unused_url())).unwrap());

    let err = exporter
        .run(&SqliteCallLog::new(dir.path().join("missing.db")))
        .unwrap_err();
    assert!(matches!(err, Error::SourceRead(_)));
}
