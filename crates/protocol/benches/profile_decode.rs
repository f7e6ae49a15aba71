//! Benchmark for the profile walk and the catalog field lookup.
//!
//! Run with: cargo bench --package seq-protocol --bench profile_decode

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use seq_protocol::catalog::layout;
use seq_protocol::profile::{Bandolier, BeltItem, BindPoint};
use seq_core::Direction;
use seq_protocol::{
    decode_profile, encode_profile, MessageKind, NewSpawn, PlayerProfile, ProfileLayout,
    WireRecord,
};

fn create_test_profile() -> PlayerProfile {
    PlayerProfile {
        name: "Benchmarker".into(),
        level: 65,
        binds: vec![BindPoint::default(); 5],
        spell_book: (0..480).collect(),
        mem_spells: vec![-1; 9],
        skills: vec![200; 100],
        bandoliers: vec![
            Bandolier {
                name: "Set".into(),
                main_hand: BeltItem {
                    item_name: "Blade of Carnage".into(),
                    item_id: 10908,
                    icon: 1000,
                },
                ..Default::default()
            };
            4
        ],
        languages: vec![100; 25],
        zone_id: 202,
        ..Default::default()
    }
}

fn benchmark_profile_decode(c: &mut Criterion) {
    let layout = ProfileLayout::CURRENT;
    let bytes = encode_profile(&create_test_profile(), &layout);

    let mut group = c.benchmark_group("profile");
    group.throughput(Throughput::Bytes(bytes.len() as u64));
    group.bench_function("decode", |b| {
        b.iter(|| decode_profile(black_box(&bytes), &layout))
    });
    group.finish();
}

fn benchmark_catalog_field(c: &mut Criterion) {
    let bytes = NewSpawn::default().encode();
    let record = layout(MessageKind::NewSpawn.opcode(), Direction::Server)
        .expect("new spawn layout");

    c.bench_function("catalog_field_lookup", |b| {
        b.iter(|| {
            let view = record.view(black_box(&bytes)).ok()?;
            view.field("name")
        })
    });
}

criterion_group!(benches, benchmark_profile_decode, benchmark_catalog_field);
criterion_main!(benches);
