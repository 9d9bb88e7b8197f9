//! Benchmarks for parsing, serialization and release walks
//!
//! Copyright (c) 2025 Corefile Migration Team
//! Licensed under the Apache-2.0 license

use corefile_core::{Analyzer, Corefile, DefaultDetector, Migrator};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

const PROXY_ERA: &str = ".:53 {
    errors
    health
    kubernetes cluster.local in-addr.arpa ip6.arpa {
        pods insecure
        upstream
        fallthrough in-addr.arpa ip6.arpa
    }
    prometheus :9153
    proxy mystub-1.example.org 1.2.3.4
    proxy mystub-2.example.org 5.6.7.8
    proxy . /etc/resolv.conf
    cache 30
    reload
    loadbalance
}
";

/// A Corefile with `blocks` server blocks of the proxy-era shape
fn large_corefile(blocks: usize) -> String {
    (0..blocks)
        .map(|i| {
            if i == 0 {
                PROXY_ERA.to_string()
            } else {
                format!(
                    "zone{}.example.org:53 {{\n    errors\n    cache 30 {{\n        success 9984\n    }}\n    proxy . 10.0.{}.1 10.0.{}.2\n}}\n",
                    i,
                    i % 256,
                    i % 256
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    for blocks in [1, 10, 100] {
        let text = large_corefile(blocks);
        group.bench_with_input(BenchmarkId::from_parameter(blocks), &text, |b, text| {
            b.iter(|| Corefile::parse(black_box(text)))
        });
    }
    group.finish();
}

fn bench_serialize(c: &mut Criterion) {
    let corefile = Corefile::parse(&large_corefile(100)).unwrap();
    c.bench_function("serialize_100_blocks", |b| b.iter(|| black_box(&corefile).to_text()));
}

fn bench_migrate(c: &mut Criterion) {
    let migrator = Migrator::builtin();
    let mut group = c.benchmark_group("migrate");

    for (from, to) in [("1.6.2", "1.6.6"), ("1.3.1", "1.5.0"), ("1.1.3", "1.8.4")] {
        group.bench_function(format!("{}_to_{}", from, to), |b| {
            b.iter(|| migrator.migrate(from, to, black_box(PROXY_ERA), false))
        });
    }

    let large = large_corefile(50);
    group.bench_function("1.1.3_to_1.8.4_50_blocks", |b| {
        b.iter(|| migrator.migrate("1.1.3", "1.8.4", black_box(&large), false))
    });
    group.bench_function("report_1.1.3_to_1.8.4", |b| {
        b.iter(|| migrator.migrate_with_report("1.1.3", "1.8.4", black_box(PROXY_ERA)))
    });
    group.finish();
}

fn bench_analysis(c: &mut Criterion) {
    let analyzer = Analyzer::builtin();
    c.bench_function("deprecated_1.1.3_to_1.8.4", |b| {
        b.iter(|| analyzer.deprecated("1.1.3", "1.8.4", black_box(PROXY_ERA)))
    });

    let detector = DefaultDetector::builtin();
    let default = detector
        .render_default("1.8.4", "cluster.local", "/etc/resolv.conf")
        .unwrap();
    c.bench_function("is_default_all_releases", |b| {
        b.iter(|| detector.is_default("", black_box(&default)))
    });
}

criterion_group!(
    benches,
    bench_parse,
    bench_serialize,
    bench_migrate,
    bench_analysis
);
criterion_main!(benches);
