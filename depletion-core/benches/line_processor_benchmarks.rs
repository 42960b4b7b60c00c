//! Benchmarks for line processing throughput

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use depletion_core::{eta_for_line, LineOutcome, LineProcessor};
use std::hint::black_box;
use std::io::{self, Cursor};

/// Generate `lines` scenario lines with a varying number of rates
fn generate_scenarios(lines: usize) -> String {
    let mut text = String::new();
    for i in 0..lines {
        let rates = 1 + i % 6;
        text.push_str(&format!("{}", 100 + i));
        for r in 0..rates {
            text.push_str(&format!(" {}.5", r + 1));
        }
        text.push('\n');
    }
    text
}

fn benchmark_single_line(c: &mut Criterion) {
    c.bench_function("eta_for_line", |b| {
        b.iter(|| eta_for_line(black_box("1000 3 7.5 12 40")).unwrap());
    });
}

fn benchmark_stream(c: &mut Criterion) {
    let mut group = c.benchmark_group("stream");

    for lines in [1_000, 100_000] {
        let text = generate_scenarios(lines);
        let processor = LineProcessor::new();

        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_function(format!("{lines}_lines"), |b| {
            b.iter(|| {
                let mut sum = 0.0;
                let mut sink = |outcome: &LineOutcome| -> io::Result<()> {
                    sum += outcome.eta.value();
                    Ok(())
                };
                processor
                    .process_reader(Cursor::new(black_box(text.as_bytes())), &mut sink)
                    .unwrap();
                sum
            });
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_single_line, benchmark_stream);
criterion_main!(benches);
