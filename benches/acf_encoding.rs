//! Benchmarks for ACF encoding and decoding.
//!
//! Uses the synthetic face, so no font files are needed, plus the bundled
//! test font for the outline rasterizer path.

use acfconv::{encode_to_vec, test_support::SyntheticFace, AcfFont, PixelSize, Rasterizer};
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use std::path::PathBuf;

fn test_font_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data/test-mono.ttf")
}

fn bench_acf(c: &mut Criterion) {
    for px in [16u32, 48] {
        let size = PixelSize::new(px).expect("valid size");
        c.bench_function(&format!("encode_synthetic_{px}px"), |b| {
            b.iter(|| {
                let mut face = SyntheticFace::new("Bench", "Regular");
                black_box(encode_to_vec(&mut face, black_box(size)).expect("encode"))
            })
        });

        let mut face = SyntheticFace::new("Bench", "Regular");
        let doc = encode_to_vec(&mut face, size).expect("encode");
        println!("{px}px synthetic document: {} bytes", doc.len());
        c.bench_function(&format!("decode_synthetic_{px}px"), |b| {
            b.iter(|| black_box(AcfFont::from_bytes(black_box(&doc)).expect("decode")))
        });
    }

    // Outline path: rasterize all 256 code points with the real backend
    let Ok(rasterizer) = Rasterizer::load() else {
        println!("outline backend not built, skipping");
        return;
    };
    let mut face = rasterizer
        .open_face(&test_font_path())
        .expect("open test font");
    c.bench_function("encode_outline_16px", |b| {
        b.iter(|| black_box(encode_to_vec(&mut face, PixelSize::default()).expect("encode")))
    });
}

criterion_group!(benches, bench_acf);
criterion_main!(benches);
