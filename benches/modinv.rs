use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use modinv62::{modinv, modinv_var, ModInfo, Signed62};
use rand_core::{OsRng, RngCore};

/// The secp256k1 field prime, 2^256 - 2^32 - 977.
const P: ModInfo = ModInfo::new(Signed62::from_be_hex(
    "fffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc2f",
));

/// Random value below 2^248, comfortably below the modulus.
fn random_reduced() -> Signed62 {
    let mut words = [0u64; 4];
    for word in &mut words {
        *word = OsRng.next_u64();
    }
    words[3] &= u64::MAX >> 8;
    Signed62::from_words(words)
}

fn bench_modinv(c: &mut Criterion) {
    let mut group = c.benchmark_group("modular inversion");

    group.bench_function("modinv, secp256k1 field", |b| {
        b.iter_batched(
            random_reduced,
            |x| black_box(modinv(&x, &P)),
            BatchSize::SmallInput,
        )
    });

    group.bench_function("modinv_var, secp256k1 field", |b| {
        b.iter_batched(
            random_reduced,
            |x| black_box(modinv_var(&x, &P)),
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

criterion_group!(benches, bench_modinv);
criterion_main!(benches);
