use criterion::{Criterion, criterion_group, criterion_main};
use page_enhancer::api::{EnhancerConfig, PageEnhancer};
use page_enhancer::core::Document;
use page_enhancer::render::{NullChartBackend, NullPickerBackend};
use std::fmt::Write as _;
use std::hint::black_box;

fn generated_page(rows: usize) -> String {
    let mut html = String::from("<!DOCTYPE html><html><body><table>");
    for i in 0..rows {
        let _ = write!(
            html,
            r#"<tr><td><input name="date_{i}" data-dtpicker data-dtpicker-enable-time value="2022-01-01 10:00"></td><td><a href="/fillup/{i}/delete/" data-confirm>Delete</a></td></tr>"#
        );
        if i % 10 == 0 {
            let _ = write!(
                html,
                r#"<tr><td><canvas data-chartjs data-type="line" data-labels='["Jan","Feb","Mar"]' data-sets='[{{"label":"row {i}","data":[1,2,3]}}]' data-options='{{"responsive":true}}'></canvas></td></tr>"#
            );
        }
    }
    html.push_str("</table></body></html>");
    html
}

fn bench_parse_1k_rows(c: &mut Criterion) {
    let html = generated_page(1_000);
    c.bench_function("parse_1k_rows", |b| {
        b.iter(|| Document::parse(black_box(&html)).expect("parse"))
    });
}

fn bench_enhance_1k_rows(c: &mut Criterion) {
    let html = generated_page(1_000);
    c.bench_function("enhance_1k_rows", |b| {
        b.iter(|| {
            let mut document = Document::parse(&html).expect("parse");
            let mut enhancer = PageEnhancer::new(
                EnhancerConfig::default(),
                NullPickerBackend::default(),
                NullChartBackend::default(),
            )
            .expect("enhancer init");
            let report = enhancer.on_load(&mut document).expect("load");
            black_box(report)
        })
    });
}

criterion_group!(benches, bench_parse_1k_rows, bench_enhance_1k_rows);
criterion_main!(benches);
