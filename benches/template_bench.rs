//! Benchmark for template compilation and rendering.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use lowbar::prelude::*;
use std::hint::black_box;

const LIST: &str = "<ul><% for person, index in people %><li class=\"<%= index % 2 == 0 ? 'even' : 'odd' %>\"><%- person.name %> (<%= person.age %>)</li><% end %></ul>";

fn people(size: usize) -> Value {
    (0..size)
        .map(|index| record! { "name" => format!("<person {index}>"), "age" => index % 70 })
        .collect()
}

fn benchmark_compile(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("template_compile");
    let settings = TemplateSettings::default();

    group.bench_function("interpolation", |bencher| {
        bencher.iter(|| black_box(Template::compile(black_box("Hello <%= name %>!"), &settings)));
    });
    group.bench_function("loop", |bencher| {
        bencher.iter(|| black_box(Template::compile(black_box(LIST), &settings)));
    });

    group.finish();
}

fn benchmark_render(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("template_render");
    let settings = TemplateSettings::default();

    let Ok(greeting) = Template::compile("Hello <%= name %>!", &settings) else {
        return;
    };
    let data = record! { "name" => "World" };
    group.bench_function("interpolation", |bencher| {
        bencher.iter(|| black_box(greeting.render(black_box(&data))));
    });

    let Ok(list) = Template::compile(LIST, &settings) else {
        return;
    };
    for size in [10, 100, 1_000] {
        let data = record! { "people" => people(size) };
        group.bench_with_input(BenchmarkId::new("loop", size), &data, |bencher, data| {
            bencher.iter(|| black_box(list.render(black_box(data))));
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_compile, benchmark_render);
criterion_main!(benches);
