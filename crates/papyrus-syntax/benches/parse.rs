use criterion::{black_box, criterion_group, criterion_main, Criterion};
use papyrus_syntax::{parse, DiagnosticLog, ParseOptions, SourceFile};

const SAMPLE: &str = "ScriptName ExampleScript extends Quest\r\n\r\n\
Int Property MaxCount = 10 Auto\r\n\r\n\
Int Function Add(Int a, Int b)\r\n\treturn a + b\r\nEndFunction\r\n\r\n\
Event OnInit()\r\n\tInt i = 0\r\n\twhile i < MaxCount\r\n\t\ti = i + 1\r\n\tEndWhile\r\nEndEvent\r\n";

fn bench_parse(c: &mut Criterion) {
    let file = SourceFile::new("bench.psc", SAMPLE.as_bytes().to_vec());
    c.bench_function("parse_sample_script", |b| {
        b.iter(|| {
            let mut log = DiagnosticLog::new();
            let (script, _ok) = parse(black_box(&file), &mut log, ParseOptions::default());
            black_box(script);
        });
    });
}

criterion_group!(benches, bench_parse);
criterion_main!(benches);
