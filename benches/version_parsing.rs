// Copyright 2025 dentsusoken
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use criterion::{BenchmarkId, Criterion, black_box};
use flexver::version::{FlexibleVersionParser, NumericCapabilities, VersionComponents};
use std::str::FromStr;

pub fn bench_version_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("version_parsing");

    let parser = FlexibleVersionParser::default();

    // Fast path: strict conversion succeeds
    group.bench_function("well_formed", |b| {
        b.iter(|| parser.parse(black_box("10.0.19041.1")))
    });

    group.bench_function("excess_only", |b| {
        b.iter(|| parser.parse(black_box("1.2.3.4.5.6")))
    });

    group.bench_function("revision_suffix", |b| {
        b.iter(|| parser.parse(black_box("1.2.3.4-beta3")))
    });

    group.bench_function("int64_overflow", |b| {
        b.iter(|| parser.parse(black_box("1.2.2147483700-beta5.4")))
    });

    let huge = format!("1.{}", "9".repeat(64));
    let tiers = [
        ("big_integer", NumericCapabilities::full()),
        ("double", NumericCapabilities::without_big_integer()),
    ];
    for (name, capabilities) in tiers {
        let parser = FlexibleVersionParser::new(capabilities);
        group.bench_with_input(BenchmarkId::new("wide_overflow", name), &huge, |b, v| {
            b.iter(|| parser.parse(black_box(v)))
        });
    }

    group.bench_function("strict_from_str", |b| {
        b.iter(|| VersionComponents::from_str(black_box("6.1.7601.24545")))
    });

    group.finish();
}
