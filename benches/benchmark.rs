//! パフォーマンスベンチマーク
//!
//! スライドの組み立てとPPTXパッケージの書き出しにかかる時間を測定します。
//! ワークブックの読み込み時間は入力ファイルに大きく依存するため対象外です。

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::io::Cursor;
use xlsxdeck::{compose, write_presentation_to, DataTable, PresentationSettings, RgbColor};

fn settings(slide_count: u32) -> PresentationSettings {
    PresentationSettings {
        slide_count,
        title_font_size: 32.0,
        title_color: RgbColor::new(0x1F, 0x4E, 0x79),
        body_font_size: 18.0,
    }
}

/// `rows`行×`cols`列の表を生成
fn table(rows: usize, cols: usize) -> DataTable {
    let header: Vec<String> = (0..cols).map(|c| format!("Column {}", c + 1)).collect();
    let body = (1..rows).map(|r| (0..cols).map(|c| format!("R{}C{} & more", r, c)).collect::<Vec<_>>());
    DataTable::from_rows(std::iter::once(header).chain(body).collect())
}

fn bench_compose(c: &mut Criterion) {
    let mut group = c.benchmark_group("compose");
    let data = table(500, 8);

    for slide_count in [1u32, 20, 200] {
        group.bench_with_input(
            BenchmarkId::from_parameter(slide_count),
            &slide_count,
            |b, &count| {
                let settings = settings(count);
                b.iter(|| compose(black_box(&settings), black_box(&data)));
            },
        );
    }
    group.finish();
}

fn bench_write(c: &mut Criterion) {
    let mut group = c.benchmark_group("write_presentation");

    for rows in [10usize, 100, 1000] {
        let document = compose(&settings(5), &table(rows, 6));
        group.throughput(Throughput::Elements(rows as u64));
        group.bench_with_input(BenchmarkId::from_parameter(rows), &document, |b, document| {
            b.iter(|| {
                let mut buffer = Cursor::new(Vec::with_capacity(64 * 1024));
                write_presentation_to(black_box(document), &mut buffer).unwrap();
                buffer.into_inner().len()
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_compose, bench_write);
criterion_main!(benches);
