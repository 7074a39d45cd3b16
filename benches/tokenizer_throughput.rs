use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::io::Write;
use svtable::{ParserConfig, TableLoader, TablePipeline, Tokenizer};
use tempfile::NamedTempFile;
use tokio::runtime::Runtime;

fn create_table_text(size_kb: usize) -> String {
    let target_size = size_kb * 1024;
    let mut text = String::from("ts,level,user,message\n");
    let mut row = 0;

    while text.len() < target_size {
        text.push_str(&format!(
            "2024-09-02T10:{:02}:{:02},INFO,user_{},\"Request {}, status \"\"ok\"\"\"\n",
            (row / 60) % 60,
            row % 60,
            row % 1000,
            row
        ));
        row += 1;
    }
    text
}

fn create_test_file(size_kb: usize) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
    temp_file
        .write_all(create_table_text(size_kb).as_bytes())
        .unwrap();
    temp_file.flush().unwrap();
    temp_file
}

fn bench_in_memory_tokenizer(c: &mut Criterion) {
    let mut group = c.benchmark_group("tokenizer_in_memory");
    group.sample_size(20);

    for &size_kb in &[50, 500, 5000] {
        let text = create_table_text(size_kb);
        group.bench_with_input(BenchmarkId::from_parameter(size_kb), &text, |b, text| {
            b.iter(|| {
                let mut tokenizer = Tokenizer::for_text(text.as_str(), &ParserConfig::default());
                black_box(tokenizer.collect_remaining().unwrap())
            })
        });
    }
    group.finish();
}

fn bench_file_pipeline(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let mut group = c.benchmark_group("pipeline_file");
    group.sample_size(10);
    group.measurement_time(std::time::Duration::from_secs(5));

    for &size_kb in &[50, 500, 5000] {
        let temp_file = create_test_file(size_kb);
        let path = temp_file.path().to_path_buf();
        group.bench_with_input(BenchmarkId::from_parameter(size_kb), &path, |b, path| {
            b.to_async(&rt).iter(|| {
                let path = path.clone();
                async move {
                    let mut pipeline =
                        TablePipeline::new(path, ParserConfig::default(), None).unwrap();
                    let mut total = 0;
                    while !pipeline.end_of_data() {
                        total += pipeline.load().await.unwrap().len();
                    }
                    black_box(total)
                }
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_in_memory_tokenizer, bench_file_pipeline);
criterion_main!(benches);
