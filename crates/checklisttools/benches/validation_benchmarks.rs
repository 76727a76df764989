//! Validation performance benchmarks.
//!
//! Measures checklist parsing, constraint compilation, and table validation.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use checklisttools::{compile, parse_checklist, validate, DataTable};

const CHECKLIST_XML: &str = include_str!("../tests/fixtures/checklist.xml");

const HEADERS: &[&str] = &[
    "tax_id",
    "scientific_name",
    "sample_alias",
    "sample_title",
    "sample_description",
    "collection date",
    "geographic location (country and/or sea)",
    "geographic location (altitude)",
    "host sex",
    "host body temperature",
];

/// Build a samples table where every tenth row carries violations.
fn samples_table(rows: usize) -> DataTable {
    let data = (0..rows)
        .map(|i| {
            let bad = i % 10 == 0;
            vec![
                Some(if bad { "human".to_string() } else { "9606".to_string() }),
                Some("Homo sapiens".to_string()),
                Some(format!("S{}", i / if bad { 2 } else { 1 })),
                Some("title".to_string()),
                Some("description".to_string()),
                Some("2021-05-03".to_string()),
                Some(if bad { "Atlantis" } else { "Norway" }.to_string()),
                None,
                Some("female".to_string()),
                Some("37".to_string()),
            ]
        })
        .collect();
    DataTable::new(HEADERS.iter().map(|h| h.to_string()).collect(), data)
}

fn bench_parse(c: &mut Criterion) {
    c.bench_function("parse_checklist", |b| {
        b.iter(|| parse_checklist(black_box(CHECKLIST_XML)))
    });
}

fn bench_compile(c: &mut Criterion) {
    let checklist = parse_checklist(CHECKLIST_XML).unwrap();
    c.bench_function("compile", |b| b.iter(|| compile(black_box(&checklist))));
}

fn bench_validate(c: &mut Criterion) {
    let schemas = compile(&parse_checklist(CHECKLIST_XML).unwrap());
    let mut group = c.benchmark_group("validate_samples");

    for rows in [100, 1_000, 10_000] {
        let table = samples_table(rows);
        group.bench_with_input(BenchmarkId::from_parameter(rows), &table, |b, table| {
            b.iter(|| validate(black_box(&schemas.samples), black_box(table)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_parse, bench_compile, bench_validate);
criterion_main!(benches);
