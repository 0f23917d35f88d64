//! Benchmarks for the render cycle
//!
//! Run with: cargo bench

use authshell::browser::{Document, MemoryBrowser, MemoryDocument};
use authshell::render::sync_active_links;
use authshell::views::view_fn;
use authshell::{RouteTable, Router, ShellConfig};
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use std::rc::Rc;
use url::Url;

fn nav_markup(count: usize) -> String {
    (0..count)
        .map(|i| format!(r#"<li><a href="/page/{}" data-link class="nav">Page {}</a></li>"#, i, i))
        .collect()
}

fn bench_link_sync(c: &mut Criterion) {
    let mut group = c.benchmark_group("link_sync");

    for size in [10, 100, 1000] {
        let doc = MemoryDocument::new("app");
        doc.replace_mount("app", &nav_markup(size)).unwrap();
        let anchors = doc.anchors("data-link");
        let current = Url::parse(&format!("http://localhost/page/{}", size / 2)).unwrap();

        group.throughput(Throughput::Elements(size as u64));

        group.bench_function(format!("sync_{}", size), |b| {
            b.iter(|| sync_active_links(black_box(&current), black_box(&anchors), "active"))
        });

        group.bench_function(format!("scan_{}", size), |b| {
            let markup = nav_markup(size);
            b.iter(|| doc.replace_mount("app", black_box(&markup)).unwrap())
        });
    }

    group.finish();
}

fn bench_render_cycle(c: &mut Criterion) {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap();

    let nav = nav_markup(20);
    let mut builder = RouteTable::builder(view_fn(|| async { Ok("<h1>404</h1>".to_string()) }));
    for i in 0..20 {
        let markup = nav.clone();
        builder = builder.route(format!("/page/{}", i), view_fn(move || {
            let markup = markup.clone();
            async move { Ok(markup) }
        }));
    }
    let routes = builder.build().unwrap();

    let browser = Rc::new(MemoryBrowser::new("http://localhost/page/7").unwrap());
    let document = Rc::new(MemoryDocument::new("app"));
    let router = Router::new(&ShellConfig::default(), browser, document, routes);

    c.bench_function("render_registered", |b| {
        b.iter(|| runtime.block_on(router.render()).unwrap())
    });
}

criterion_group!(benches, bench_link_sync, bench_render_cycle);
criterion_main!(benches);
