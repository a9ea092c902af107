//! Stress tests for concurrent enrichment
//!
//! These tests verify:
//! - Every entry written from many threads carries its labels object
//! - Per-call labels never leak between threads or into later entries
//! - Concurrent derivation never mutates the parent logger
//! - JSON lines written concurrently never interleave

use rust_logdriver::core::keys::{ERROR_CONTEXT_KEY, LABELS_KEY, SOURCE_LOCATION_KEY};
use rust_logdriver::prelude::*;
use serde_json::Value;
use std::sync::Arc;
use std::thread;
use tempfile::TempDir;

const THREADS: usize = 8;
const ENTRIES: usize = 10_000;

fn observed_logger() -> (Logger, ObservedLogs) {
    let (sink, logs) = ObservedSink::new(LogLevel::Debug);
    let logger = Logger::builder()
        .sink(sink)
        .report_all_errors(true)
        .fields(vec![label("app", "stress")])
        .build()
        .expect("Failed to build logger");
    (logger, logs)
}

/// Shared logger hammered from several threads; every entry must be enriched
#[test]
fn test_concurrent_writes_all_enriched() {
    let (logger, logs) = observed_logger();
    let logger = Arc::new(logger);

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                for i in 0..ENTRIES / THREADS {
                    logger.info(
                        "tick",
                        vec![
                            label("thread", t.to_string()),
                            Field::int("writer", t as i64),
                            Field::int("seq", i as i64),
                        ],
                    );
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("Thread panicked");
    }

    let all = logs.take_all();
    assert_eq!(all.len(), ENTRIES);

    let mut seen = vec![Vec::new(); THREADS];
    for logged in &all {
        let context = logged.context_map();
        let labels = context[LABELS_KEY]
            .as_object()
            .expect("labels should be an object");
        let writer = context["writer"].as_i64().expect("writer should be an int");

        // The label must come from the same call that wrote the entry
        assert_eq!(labels.len(), 2);
        assert_eq!(labels["app"], "stress");
        assert_eq!(labels["thread"], writer.to_string());
        assert!(context.contains_key(SOURCE_LOCATION_KEY));
        assert!(!context.contains_key(ERROR_CONTEXT_KEY));

        seen[writer as usize].push(context["seq"].as_i64().expect("seq should be an int"));
    }

    // Each thread's entries arrive complete and in order
    for seqs in seen {
        let expected: Vec<i64> = (0..(ENTRIES / THREADS) as i64).collect();
        assert_eq!(seqs, expected);
    }
    assert_eq!(logger.metrics().written_count(), ENTRIES as u64);
}

/// Each thread derives its own child; children never see each other's labels
#[test]
fn test_concurrent_derivation_isolated() {
    let (logger, logs) = observed_logger();

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let parent = logger.clone();
            thread::spawn(move || {
                let child = parent.with(vec![
                    label("worker", t.to_string()),
                    Field::int("worker_id", t as i64),
                ]);
                for _ in 0..100 {
                    child.warn("child entry", vec![]);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("Thread panicked");
    }

    logger.info("parent entry", vec![]);

    let children = logs.filter_message("child entry");
    assert_eq!(children.len(), THREADS * 100);
    for logged in &children {
        let context = logged.context_map();
        let labels = context[LABELS_KEY].as_object().unwrap();
        assert_eq!(labels.len(), 2);
        assert_eq!(labels["worker"], context["worker_id"].to_string());
    }

    let parent = logs.filter_message("parent entry");
    assert_eq!(parent.len(), 1);
    let context = parent[0].context_map();
    let labels = context[LABELS_KEY].as_object().unwrap();
    assert_eq!(labels.len(), 1);
    assert!(!labels.contains_key("worker"));
}

/// Error reports injected concurrently all point at a call site
#[test]
fn test_concurrent_error_reports() {
    let (logger, logs) = observed_logger();
    let logger = Arc::new(logger);

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                for _ in 0..500 {
                    logger.error("failure", vec![]);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("Thread panicked");
    }

    let reported = logs.filter_field_key(ERROR_CONTEXT_KEY);
    assert_eq!(reported.len(), THREADS * 500);
    for logged in &reported {
        let context = logged.context_map();
        assert_eq!(context["serviceContext"]["service"], "unknown");
        assert!(context[ERROR_CONTEXT_KEY]["reportLocation"]["filePath"]
            .as_str()
            .unwrap()
            .ends_with("stress_tests.rs"));
    }
}

/// Lines written concurrently to one file stay intact
#[test]
fn test_concurrent_file_writes() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("stress.jsonl");

    let sink = JsonSink::file(&log_file).expect("Failed to create sink");
    let logger = Logger::builder()
        .sink(sink)
        .fields(vec![label("app", "stress")])
        .build()
        .expect("Failed to build logger");

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let logger = logger.with(vec![label("thread", t.to_string())]);
            thread::spawn(move || {
                for i in 0..1000 {
                    logger.info(format!("entry {}", i), vec![]);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("Thread panicked");
    }
    logger.flush().expect("Failed to flush");

    let content = std::fs::read_to_string(&log_file).expect("Failed to read log file");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), THREADS * 1000);

    for line in lines {
        let value: Value = serde_json::from_str(line).expect("Line should be valid JSON");
        assert_eq!(value[LABELS_KEY]["app"], "stress");
        assert!(value[LABELS_KEY]["thread"].is_string());
    }
}
