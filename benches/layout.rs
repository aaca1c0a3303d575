use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use wordcloud_layout::config::{LayoutConfig, TokenizerConfig};
use wordcloud_layout::layout::compute_layout;
use wordcloud_layout::render::render_svg;
use wordcloud_layout::theme::Theme;
use wordcloud_layout::tokenizer::analyze;

fn word_soup(vocabulary: usize) -> String {
    let mut out = String::new();
    for i in 0..vocabulary {
        let len = 3 + (i % 7);
        let word: String = (0..len)
            .map(|j| (b'a' + ((i * 7 + j * 3) % 26) as u8) as char)
            .collect();
        // roughly zipfian: early words repeat much more often
        let count = 1 + vocabulary / (i + 1).min(64);
        for _ in 0..count {
            out.push_str(&word);
            out.push(' ');
        }
        if i % 12 == 0 {
            out.push('\n');
        }
    }
    out
}

fn bench_tokenize(c: &mut Criterion) {
    let mut group = c.benchmark_group("tokenize");
    let options = TokenizerConfig::default();
    for vocabulary in [100usize, 400, 1600] {
        let input = word_soup(vocabulary);
        group.bench_with_input(
            BenchmarkId::from_parameter(vocabulary),
            &input,
            |b, data| {
                b.iter(|| {
                    let words = analyze(black_box(data), &options);
                    black_box(words.len());
                });
            },
        );
    }
    group.finish();
}

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout");
    let theme = Theme::modern();
    let input = word_soup(400);
    for max_words in [50usize, 100, 200] {
        let options = TokenizerConfig {
            max_words,
            ..TokenizerConfig::default()
        };
        let words = analyze(&input, &options);
        let config = LayoutConfig::default();
        group.bench_with_input(BenchmarkId::from_parameter(max_words), &words, |b, data| {
            b.iter(|| {
                let result = compute_layout(black_box(data), &theme, &config).expect("layout failed");
                black_box(result.placed.len());
            });
        });
    }
    group.finish();
}

fn bench_layout_cell_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout_cell_sizes");
    let theme = Theme::modern();
    let words = analyze(&word_soup(400), &TokenizerConfig::default());
    for cell_size in [1.0f32, 2.0, 4.0] {
        let config = LayoutConfig {
            cell_size,
            ..LayoutConfig::default()
        };
        let name = format!("cell_{cell_size}");
        group.bench_with_input(BenchmarkId::from_parameter(name), &words, |b, data| {
            b.iter(|| {
                let result = compute_layout(black_box(data), &theme, &config).expect("layout failed");
                black_box(result.placed.len());
            });
        });
    }
    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_svg");
    let theme = Theme::modern();
    let config = LayoutConfig::default();
    for vocabulary in [100usize, 400] {
        let words = analyze(&word_soup(vocabulary), &TokenizerConfig::default());
        let result = compute_layout(&words, &theme, &config).expect("layout failed");
        group.bench_with_input(
            BenchmarkId::from_parameter(vocabulary),
            &result,
            |b, data| {
                b.iter(|| {
                    let svg = render_svg(black_box(data), &theme, &config);
                    black_box(svg.len());
                });
            },
        );
    }
    group.finish();
}

fn bench_end_to_end(c: &mut Criterion) {
    let mut group = c.benchmark_group("end_to_end");
    let theme = Theme::modern();
    let options = TokenizerConfig::default();
    let config = LayoutConfig::default();
    for vocabulary in [100usize, 400] {
        let input = word_soup(vocabulary);
        group.bench_with_input(
            BenchmarkId::from_parameter(vocabulary),
            &input,
            |b, data| {
                b.iter(|| {
                    let words = analyze(black_box(data), &options);
                    let result = compute_layout(&words, &theme, &config).expect("layout failed");
                    let svg = render_svg(&result, &theme, &config);
                    black_box(svg.len());
                });
            },
        );
    }
    group.finish();
}

criterion_group!(
    name = benches;
    config = Criterion::default();
    targets = bench_tokenize, bench_layout, bench_layout_cell_sizes, bench_render, bench_end_to_end
);
criterion_main!(benches);
