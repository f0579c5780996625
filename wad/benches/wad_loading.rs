use criterion::*;
use wad::lumps::{WadLumpRecord, WadSegment, WadVertex};
use wad::{MapLump, WadBuilder, WadData};

/// A map-shaped archive with enough records to make the decode loops count
fn synthetic_wad(records: usize) -> Vec<u8> {
    let mut vertexes = Vec::with_capacity(records * WadVertex::SIZE);
    let mut segs = Vec::with_capacity(records * WadSegment::SIZE);
    for i in 0..records {
        WadVertex::new(i as i16, -(i as i16)).write_le(&mut vertexes);
        WadSegment::new(i as u16, (i + 1) as u16, 0, i as u16, 0, 0).write_le(&mut segs);
    }

    let mut b = WadBuilder::new();
    b.add_lump("PLAYPAL", vec![0; 10752]);
    b.add_marker("E1M1");
    for lump in MapLump::ALL {
        let data = match lump {
            MapLump::Vertexes => vertexes.clone(),
            MapLump::Segs => segs.clone(),
            _ => Vec::new(),
        };
        b.add_lump(lump.tag(), data);
    }
    b.build()
}

fn bench(c: &mut Criterion) {
    let bytes = synthetic_wad(4096);

    let mut group = c.benchmark_group("WAD Loading");
    group.bench_function("Read header and directory", |b| {
        b.iter(|| WadData::from_bytes(black_box(bytes.clone())))
    });

    let wad = WadData::from_bytes(bytes.clone()).unwrap();
    group.bench_function("Decode vertexes and segs", |b| {
        b.iter(|| {
            let v = wad.vertex_iter("E1M1").unwrap().filter_map(Result::ok).count();
            let s = wad.segment_iter("E1M1").unwrap().filter_map(Result::ok).count();
            black_box(v + s)
        })
    });
    group.finish();
}

criterion_group!(benches, bench);
criterion_main!(benches);
