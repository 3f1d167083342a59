use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use symdel::test::*;
use symdel::*;

pub fn benchmarks(c: &mut Criterion) {
    let pairs: &[(&str, &str)] = &[
        ("rat", "cat"),
        ("houses", "horses"),
        ("benchmarking", "benchmarknig"),
        ("extraordinarily", "extroardinarily"),
    ];

    let mut group = c.benchmark_group("distance");
    for (a, b) in pairs {
        let a_chars: Vec<char> = a.chars().collect();
        let b_chars: Vec<char> = b.chars().collect();
        group.throughput(Throughput::Bytes(a.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("damerau_levenshtein", format!("input {} chars", a.chars().count())),
            &(a_chars, b_chars),
            |bench, (a_chars, b_chars)| {
                bench.iter(|| damerau_levenshtein(black_box(a_chars), black_box(b_chars), 2))
            },
        );
    }
    group.finish();

    let inputs: &[&str] = &["a", "rat", "houses", "benchmarking"];

    let mut group = c.benchmark_group("deletes");
    for input in inputs {
        group.throughput(Throughput::Bytes(input.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("delete_variants", format!("input {} chars", input.chars().count())),
            &input,
            |bench, input| bench.iter(|| input.delete_variants(7, 2)),
        );
    }
    group.finish();

    let model = english_compound_model();

    let mut group = c.benchmark_group("lookup");
    for input in &["whre", "th", "readthis", "forimuch"] {
        group.throughput(Throughput::Bytes(input.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("top", format!("input {} chars", input.chars().count())),
            &input,
            |bench, input| {
                bench.iter(|| {
                    model
                        .lookup(black_box(input), Verbosity::Top, 2)
                        .expect("within the configured distance")
                })
            },
        );
    }
    group.finish();

    c.bench_function("lookup_compound", |bench| {
        bench.iter(|| {
            model
                .lookup_compound(black_box("whereis th elove hehad dated"), 2)
                .expect("within the configured distance")
        })
    });

    c.bench_function("model_build", |bench| {
        bench.iter(|| {
            let options = SymspellOptions::default();
            let mut model = SymSpell::new(&options).expect("valid options");
            for (term, count) in black_box(ENGLISH_LEXICON) {
                model.create_dictionary_entry(term, *count);
            }
            model
        })
    });
}

criterion_group!(benches, benchmarks);
criterion_main!(benches);
