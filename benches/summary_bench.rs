//! Presentation-derivation throughput: unit summaries over a synthetic roster.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use muster::data::settings::AppSettings;
use muster::data::unit::{Stat, Unit, Weapon};
use muster::summary::{representative_weapons, summarize_unit};

fn settings() -> AppSettings {
    AppSettings {
        summary_ignore_abilities: vec!["leader".to_string()],
        summary_keywords: vec!["smoke".to_string(), "grenades".to_string()],
        ranged_summary_abilities: vec!["assault".to_string(), "heavy".to_string(), "pistol".to_string()],
        melee_summary_abilities: vec!["lethal hits".to_string(), "sustained hits".to_string()],
    }
}

/// Weapons in runs of three alternate profiles separated by plain weapons.
fn arsenal(count: usize) -> Vec<Weapon> {
    (0..count)
        .map(|i| Weapon {
            name: format!("Weapon {i}"),
            range: Some(Stat::from("24\"")),
            abilities: vec!["assault".to_string(), "heavy".to_string(), "lance".to_string()],
            profile: i % 4 != 0,
            ..Weapon::default()
        })
        .collect()
}

fn unit(weapons: usize) -> Unit {
    let yaml = "name: Bench Unit\nkeywords: [Vehicle, Smoke, Grenades]\nabilities:\n  core: [Leader, Deadly Demise D3, Deep Strike]\n";
    let mut unit: Unit = serde_yaml::from_str(yaml).expect("bench unit should parse");
    unit.ranged = Some(arsenal(weapons));
    unit.melee = Some(arsenal(weapons / 2));
    unit
}

fn bench_summary(c: &mut Criterion) {
    let settings = settings();
    let mut group = c.benchmark_group("summary");

    for weapons in [4usize, 32, 256] {
        let unit = unit(weapons);
        group.throughput(Throughput::Elements(weapons as u64));
        group.bench_with_input(BenchmarkId::new("summarize_unit", weapons), &unit, |b, unit| {
            b.iter(|| summarize_unit(black_box(unit), black_box(&settings)))
        });
        group.bench_with_input(
            BenchmarkId::new("representative_weapons", weapons),
            &unit,
            |b, unit| b.iter(|| representative_weapons(black_box(unit.ranged_weapons())).len()),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_summary);
criterion_main!(benches);
