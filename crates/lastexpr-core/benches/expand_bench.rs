use criterion::{Criterion, black_box, criterion_group, criterion_main};
use lastexpr_core::config::Config;
use lastexpr_core::parser;
use lastexpr_core::pipeline::Pipeline;
use lastexpr_core::transform::Strategy;

const FORTUNE: &str = r#"
@ImplicitReturn
func fortune(_ number: Int) -> String {
    print("Requesting fortune for \(number)")
    let fortune = switch number {
        case 1, 3, 5:
            print("Warning: Support for odd numbers is unstable")
            if number == 3 {
                "You have a long and prosperous future"
            } else {
                "Your future looks bleak"
            }
        case 2, 4, 6:
            if number == 6 {
                "You must watch your back tomorrow (good luck...)"
            } else {
                "Your shoes will develop an untimely hole"
            }
        default:
            print("Warning: I've never encountered \(number) before")
            "Spaghetti will fall, meatballs will rise"
    }

    print("Processing...")

    if Int.random(in: 0..<10) == 0 {
        print("Warning: Quantum interference detected in RAM")
        "Fortune got corrupted, please try again"
    } else {
        fortune
    }
}
"#;

/// `count` attributed functions with an if/else-if chain each
fn many_functions(count: usize) -> String {
    (0..count)
        .map(|i| {
            format!(
                "@ImplicitReturn\nfunc clamp{i}(_ value: Int, min: Int, max: Int) -> Int {{\n    if value > max {{\n        max\n    }} else if value < min {{\n        min\n    }} else {{\n        value\n    }}\n}}\n"
            )
        })
        .collect()
}

fn bench_parse_fortune(c: &mut Criterion) {
    c.bench_function("parse fortune", |b| {
        b.iter(|| parser::parse(black_box(FORTUNE), "bench.swift"))
    });
}

fn bench_expand_direct(c: &mut Criterion) {
    let pipeline = Pipeline::new(FORTUNE.to_string(), "bench.swift".to_string());
    let file = pipeline.parse().unwrap();
    c.bench_function("expand fortune (direct)", |b| {
        b.iter(|| pipeline.expand(black_box(file.clone())))
    });
}

fn bench_expand_closure_wrap(c: &mut Criterion) {
    let pipeline = Pipeline::new(FORTUNE.to_string(), "bench.swift".to_string())
        .with_config(Config::default().with_strategy_override(Strategy::ClosureWrap));
    let file = pipeline.parse().unwrap();
    c.bench_function("expand fortune (closure wrap)", |b| {
        b.iter(|| pipeline.expand(black_box(file.clone())))
    });
}

fn bench_run_many_functions(c: &mut Criterion) {
    let source = many_functions(100);
    c.bench_function("run 100 functions", |b| {
        b.iter(|| Pipeline::new(black_box(source.clone()), "bench.swift".to_string()).run_all())
    });
}

criterion_group!(
    benches,
    bench_parse_fortune,
    bench_expand_direct,
    bench_expand_closure_wrap,
    bench_run_many_functions
);
criterion_main!(benches);
