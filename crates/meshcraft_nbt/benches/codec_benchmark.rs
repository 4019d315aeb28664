//! Benchmark for tagged value encoding and decoding.
//!
//! Run with: cargo bench --package meshcraft_nbt --bench codec_benchmark

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use meshcraft_nbt::{from_bytes, to_bytes, List, NamedTag, Payload, TagId};

/// A schematic-shaped tree with 128^3 block bytes.
fn schematic_like() -> NamedTag {
    let cells = 128 * 128 * 128;
    NamedTag::compound(
        "Schematic",
        vec![
            NamedTag::new("Width", Payload::Short(128)),
            NamedTag::new("Length", Payload::Short(128)),
            NamedTag::new("Height", Payload::Short(128)),
            NamedTag::new("Materials", Payload::String("Alpha".into())),
            NamedTag::new("Blocks", Payload::ByteArray(vec![35; cells])),
            NamedTag::new("Data", Payload::ByteArray(vec![7; cells])),
            NamedTag::new("Entities", Payload::List(List::empty(TagId::Compound))),
            NamedTag::new("TileEntities", Payload::List(List::empty(TagId::Compound))),
        ],
    )
}

/// Many small nested compounds.
fn entity_heavy() -> NamedTag {
    let entities = (0..2_000)
        .map(|i| {
            Payload::Compound(vec![
                NamedTag::new("id", Payload::String(format!("entity_{i}"))),
                NamedTag::new("Pos", Payload::IntArray(vec![i, i * 2, i * 3])),
                NamedTag::new("Health", Payload::Float(20.0)),
            ])
        })
        .collect();
    NamedTag::new(
        "Entities",
        Payload::List(List {
            tag: TagId::Compound,
            items: entities,
        }),
    )
}

fn benchmark_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");
    for (name, tag) in [("schematic", schematic_like()), ("entities", entity_heavy())] {
        let size = to_bytes(&tag).map_or(0, |b| b.len());
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_function(name, |b| b.iter(|| black_box(to_bytes(&tag))));
    }
    group.finish();
}

fn benchmark_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");
    for (name, tag) in [("schematic", schematic_like()), ("entities", entity_heavy())] {
        let bytes = to_bytes(&tag).unwrap_or_default();
        group.throughput(Throughput::Bytes(bytes.len() as u64));
        group.bench_function(name, |b| b.iter(|| black_box(from_bytes(&bytes))));
    }
    group.finish();
}

criterion_group!(benches, benchmark_encode, benchmark_decode);
criterion_main!(benches);
