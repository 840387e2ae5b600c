use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use std::sync::Arc;
use xhast_core::{ParseOptions, parse_markdown};
use xhast_passes::{GrammarRegistry, PipelineConfig, standard_pipeline};

fn sample_document(sections: usize) -> String {
    let mut doc = String::new();
    for i in 0..sections {
        doc.push_str(&format!("## Section {}\n\n", i));
        doc.push_str("Text with `foo`, [a link](https://example.com) and ![img](./a/b.jpg).\n\n");
        doc.push_str("> [!TIP]\n>\n> Body\n\n");
        doc.push_str("```text\nplain\n```\n\n");
        doc.push_str("| a | b |\n| - | - |\n| 1 | 2 |\n\n");
    }
    doc
}

fn bench_standard_pipeline(c: &mut Criterion) {
    let mut config = PipelineConfig::default();
    config
        .inline_code
        .references
        .insert("foo".to_string(), "/docs/foo".to_string());
    let pipeline =
        standard_pipeline(&config, Arc::new(GrammarRegistry::new())).expect("pipeline");
    let tree = parse_markdown(&sample_document(200), &ParseOptions::default()).expect("parse");

    c.bench_function("standard_pipeline_200_sections", |b| {
        b.iter(|| {
            let mut tree = tree.clone();
            pipeline.run(black_box(&mut tree)).expect("run");
            tree
        })
    });
}

criterion_group!(benches, bench_standard_pipeline);
criterion_main!(benches);
