use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use papyrus_fmt::{format_script, OutputOptions};
use papyrus_syntax::{parse, DiagnosticLog, ParseOptions, SourceFile};

const SAMPLE: &str = "ScriptName BenchQuest extends Quest\r\n\r\n\
Int Property Stage = 0 Auto\r\n\r\n\
Event OnInit()\r\n\
\tInt i = 0\r\n\
\tWhile i < 10\r\n\
\t\tIf i == 5\r\n\
\t\t\tStage = i\r\n\
\t\tEndIf\r\n\
\t\ti += 1\r\n\
\tEndWhile\r\n\
EndEvent\r\n\r\n\
Int Function Add(Int a, Int b)\r\n\
\treturn a + b\r\n\
EndFunction\r\n";

fn criterion_benchmark(c: &mut Criterion) {
    let file = SourceFile::new("bench.psc", SAMPLE.as_bytes().to_vec());
    let mut log = DiagnosticLog::new();
    let (script, _ok) = parse(&file, &mut log, ParseOptions::default());
    let options = OutputOptions::default();

    let mut group = c.benchmark_group("fmt-throughput");
    group.throughput(Throughput::Bytes(SAMPLE.len() as u64));
    group.bench_function("format_script", |b| {
        b.iter(|| format_script(black_box(&script), black_box(&options)))
    });
    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
