// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Stategrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use stategrid::filter::filter_options;
use stategrid::model::{catalog_from_pairs, us_states, Catalog};

// Benchmark identity (keep stable):
// - Group name: `filter.filter_options`
// - Case IDs: `states/<query_id>`, `synthetic_5k/<query_id>`
fn synthetic_catalog(len: usize) -> Catalog {
    let pairs: Vec<(String, String)> = (0..len)
        .map(|index| (format!("Region {index:05} Territory"), format!("R{index:05}")))
        .collect();
    catalog_from_pairs(pairs.iter().map(|(label, value)| (label.as_str(), value.as_str())))
}

fn benches_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter.filter_options");

    for (catalog_id, catalog) in [("states", us_states()), ("synthetic_5k", synthetic_catalog(5_000))] {
        group.throughput(Throughput::Elements(catalog.len() as u64));
        for (query_id, query) in [("all", ""), ("new", "new"), ("territory", "TERRITORY"), ("zzz", "zzz")] {
            let case_id = format!("{catalog_id}/{query_id}");
            let catalog = catalog.clone();
            group.bench_function(case_id, move |b| {
                b.iter(|| black_box(filter_options(black_box(query), black_box(&catalog)).len()))
            });
        }
    }

    group.finish();
}

criterion_group!(benches, benches_filter);
criterion_main!(benches);
