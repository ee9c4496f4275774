use std::path::PathBuf;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pol_decay::{load_decay, HelicityAmplitudeBuilder, Subsystem};
use pol_polarimetry::formulate_polarimetry;

fn workspace_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .and_then(|p| p.parent())
        .map(PathBuf::from)
        .expect("workspace root")
}

fn polarimetry_benchmark(c: &mut Criterion) {
    let decay = load_decay(&workspace_root().join("configs/lc2pkpi.yaml")).expect("model");
    let builder = HelicityAmplitudeBuilder::new(decay);

    c.bench_function("polarimetry/formulate", |b| {
        b.iter(|| {
            formulate_polarimetry(black_box(&builder), Subsystem::One).expect("formulate");
        });
    });

    let (_, _, z) = formulate_polarimetry(&builder, Subsystem::One).expect("formulate");
    c.bench_function("polarimetry/doit_z", |b| {
        b.iter(|| black_box(&z).doit(true));
    });
}

criterion_group!(benches, polarimetry_benchmark);
criterion_main!(benches);
