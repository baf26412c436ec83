//! Import, persist and query through the JSON log store

mod common;

use common::{eligible_history, ts};
use skillradar_core::{
    get_user_stats, ingest, CalibrationLog, JsonLogStore, LogStore, RadarError,
};
use tempfile::TempDir;

#[test]
fn test_loose_json_import_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("logs.json");

    let raw = r#"{
        "logs": [
            {
                "id": "a",
                "timestamp": "2024-05-01T08:00:00Z",
                "originalText": "孩子们比较磁铁",
                "aiInitialEvidence": ["比较磁铁"],
                "calibratedEvidence": ["比较磁铁", "主动记录"],
                "domain": "科学领域",
                "confidence": 0.7
            },
            {
                "timestamp": 1714636800000,
                "original_text": "跳绳比赛",
                "calibrated_evidence": ["跳绳"]
            },
            "not a log"
        ]
    }"#;
    let logs = ingest::parse_logs(raw).unwrap();
    assert_eq!(logs.len(), 2);

    {
        let mut store = JsonLogStore::open(&path).unwrap();
        assert_eq!(store.import(logs).unwrap(), 2);
    }

    let store = JsonLogStore::open(&path).unwrap();
    let recent = store.list_recent(None).unwrap();
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0].timestamp, "2024-05-02T08:00:00.000Z");
    assert_eq!(recent[1].id, "a");
    assert!(!recent[0].id.is_empty());

    let stats = get_user_stats(&recent);
    assert_eq!(stats.total_observations, 2);
    assert_eq!(stats.total_calibrations, 2);
}

#[test]
fn test_append_duplicate_is_rejected_and_not_persisted() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("logs.json");

    let mut store = JsonLogStore::open(&path).unwrap();
    store
        .append(CalibrationLog::new("x", ts(0, 0), "first"))
        .unwrap();
    let err = store
        .append(CalibrationLog::new("x", ts(1, 0), "second"))
        .unwrap_err();
    assert!(matches!(err, RadarError::AlreadyExists(_)));

    let reopened = JsonLogStore::open(&path).unwrap();
    let logs = reopened.list_recent(None).unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].original_text, "first");
}

#[test]
fn test_clear_then_stats_are_empty() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("logs.json");

    let mut store = JsonLogStore::open(&path).unwrap();
    store.import(eligible_history(3)).unwrap();
    assert_eq!(store.len().unwrap(), 3);

    store.clear().unwrap();
    let reopened = JsonLogStore::open(&path).unwrap();
    assert!(reopened.is_empty().unwrap());
    assert_eq!(get_user_stats(&reopened.list_recent(None).unwrap()).level.current_xp, 0);
}

#[test]
fn test_list_recent_limit() {
    let dir = TempDir::new().unwrap();
    let mut store = JsonLogStore::open(dir.path().join("logs.json")).unwrap();
    store.import(eligible_history(5)).unwrap();

    let ids: Vec<String> = store
        .list_recent(Some(2))
        .unwrap()
        .into_iter()
        .map(|log| log.id)
        .collect();
    assert_eq!(ids, vec!["log-4", "log-3"]);
}

#[test]
fn test_corrupt_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("logs.json");
    std::fs::write(&path, "{ not json").unwrap();

    assert!(matches!(
        JsonLogStore::open(&path).unwrap_err(),
        RadarError::Serialization(_)
    ));
}
