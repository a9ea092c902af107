//! Criterion benchmarks for rust_logdriver

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use rust_logdriver::fields::StackFrame;
use rust_logdriver::prelude::*;
use std::io;
use std::sync::Arc;

fn json_logger() -> Logger {
    Logger::builder()
        .min_level(LogLevel::Trace)
        .sink(JsonSink::new(io::sink()))
        .fields(vec![label("app", "bench"), label("env", "test")])
        .build()
        .expect("Failed to build logger")
}

// ============================================================================
// Enrichment Benchmarks
// ============================================================================

fn bench_driver_write(c: &mut Criterion) {
    let mut group = c.benchmark_group("driver_write");
    group.throughput(Throughput::Elements(1));

    let caller = EntryCaller::new("src/handler.rs", 42, "app::handler");

    let plain = DriverCore::wrap(NopSink::new());
    group.bench_function("nop_sink", |b| {
        b.iter(|| {
            let entry = Entry::new(LogLevel::Info, "request").with_caller(caller.clone());
            plain.write(black_box(&entry), vec![Field::int("status", 200)])
        });
    });

    let labelled = DriverCore::wrap(NopSink::new()).derive(vec![
        label("app", "bench"),
        label("env", "test"),
        label("region", "eu"),
    ]);
    group.bench_function("nop_sink_with_labels", |b| {
        b.iter(|| {
            let entry = Entry::new(LogLevel::Info, "request").with_caller(caller.clone());
            labelled.write(
                black_box(&entry),
                vec![label("request_id", "r-1"), Field::int("status", 200)],
            )
        });
    });

    let reporting = DriverCore::new(
        Arc::new(NopSink::new()),
        DriverConfig::default()
            .report_all_errors(true)
            .service_context("bench", "v1"),
    );
    group.bench_function("error_report", |b| {
        b.iter(|| {
            let entry = Entry::new(LogLevel::Error, "failed").with_caller(caller.clone());
            reporting.write(black_box(&entry), vec![])
        });
    });

    group.finish();
}

fn bench_derive(c: &mut Criterion) {
    let mut group = c.benchmark_group("derive");
    group.throughput(Throughput::Elements(1));

    let logger = json_logger();

    group.bench_function("labels_only", |b| {
        b.iter(|| black_box(logger.with(vec![label("request_id", "r-1")])));
    });

    group.bench_function("mixed_fields", |b| {
        b.iter(|| {
            black_box(logger.with(vec![
                label("request_id", "r-1"),
                Field::string("user", "alice"),
            ]))
        });
    });

    group.bench_function("named", |b| {
        b.iter(|| black_box(logger.named("worker")));
    });

    group.finish();
}

// ============================================================================
// End To End Benchmarks
// ============================================================================

fn bench_json_logging(c: &mut Criterion) {
    let mut group = c.benchmark_group("json_logging");
    group.throughput(Throughput::Elements(1));

    let logger = json_logger();

    group.bench_function("info", |b| {
        b.iter(|| logger.info(black_box("Info message"), vec![]));
    });

    group.bench_function("info_with_fields", |b| {
        b.iter(|| {
            logger.info(
                black_box("Info message"),
                vec![Field::int("status", 200), label("tenant", "acme")],
            )
        });
    });

    let err = TracedError::new("timeout")
        .with_frame(StackFrame::new("app::client::call", "src/client.rs", 88))
        .with_frame(StackFrame::new("app::main", "src/main.rs", 12));
    group.bench_function("error_with_stack", |b| {
        b.iter(|| logger.error(black_box("Call failed"), vec![Field::error(&err)]));
    });

    group.bench_function("filtered_out", |b| {
        let filtered = Logger::builder()
            .min_level(LogLevel::Error)
            .sink(JsonSink::new(io::sink()))
            .build()
            .expect("Failed to build logger");
        b.iter(|| filtered.debug(black_box("Debug message"), vec![]));
    });

    group.finish();
}

fn bench_concurrent_logging(c: &mut Criterion) {
    let mut group = c.benchmark_group("concurrent_logging");
    group.throughput(Throughput::Elements(400));

    let logger = json_logger();

    group.bench_function("4_threads_100_each", |b| {
        b.iter(|| {
            std::thread::scope(|s| {
                for t in 0..4 {
                    let logger = &logger;
                    s.spawn(move || {
                        let child = logger.with(vec![label("thread", t.to_string())]);
                        for _ in 0..100 {
                            child.info("tick", vec![]);
                        }
                    });
                }
            });
        });
    });

    group.finish();
}

// ============================================================================
// Field Builder Benchmarks
// ============================================================================

fn bench_trace_context(c: &mut Criterion) {
    let mut group = c.benchmark_group("trace_context");
    group.throughput(Throughput::Elements(1));

    group.bench_function("valid_header", |b| {
        b.iter(|| {
            trace_context(
                black_box("105445aa7843bc8bf206b12000100000/1;o=1"),
                "my-project",
            )
        });
    });

    group.bench_function("malformed_header", |b| {
        b.iter(|| trace_context(black_box("not a trace header"), "my-project"));
    });

    group.finish();
}

// ============================================================================
// Criterion Configuration
// ============================================================================

criterion_group!(
    benches,
    bench_driver_write,
    bench_derive,
    bench_json_logging,
    bench_concurrent_logging,
    bench_trace_context
);

criterion_main!(benches);
