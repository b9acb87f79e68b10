// Parse throughput benchmark
//
// Generates a mixed quoted/unquoted data set once, then measures full
// file-to-table parses at two chunking thresholds.

use std::fs;
use std::path::PathBuf;

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use csvtable::CsvParser;
use tempfile::TempDir;

const ROWS: usize = 20_000;

fn generate(dir: &TempDir) -> (PathBuf, u64) {
    let meta = "PropertyType,Key,Value\n\
                ChunkSize,,1024\n\
                ColumnType,id,int\n\
                ColumnType,value,double\n\
                ColumnType,label,string\n";

    let mut data = String::with_capacity(ROWS * 32);
    for i in 0..ROWS {
        if i % 10 == 0 {
            data.push_str(&format!("{i},{}.25,\"label, \"\"{i}\"\"\"\n", i % 97));
        } else {
            data.push_str(&format!("{i},{}.25,label-{i}\n", i % 97));
        }
    }

    let path = dir.path().join("bench.csv");
    fs::write(&path, &data).unwrap();
    let mut meta_path = path.clone().into_os_string();
    meta_path.push(".meta");
    fs::write(meta_path, meta).unwrap();
    (path, data.len() as u64)
}

fn bench_parse(c: &mut Criterion) {
    let dir = TempDir::new().unwrap();
    let (path, bytes) = generate(&dir);

    let mut group = c.benchmark_group("parse");
    group.throughput(Throughput::Bytes(bytes));

    group.bench_function("buffer_64k", |b| {
        let parser = CsvParser::new(64 * 1024);
        b.iter(|| parser.parse(&path).unwrap());
    });

    group.bench_function("buffer_4k", |b| {
        let parser = CsvParser::new(4 * 1024);
        b.iter(|| parser.parse(&path).unwrap());
    });

    group.finish();
}

criterion_group!(benches, bench_parse);
criterion_main!(benches);
