use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use gauss_solve::{lu_solve_in_place, plu, solve_in_place};
use rand::Rng;

fn random_system(n: usize) -> (Vec<f64>, Vec<f64>) {
    let mut rng = rand::rng();
    let mut a: Vec<f64> = (0..n * n).map(|_| rng.random_range(-1.0..1.0)).collect();
    for i in 0..n {
        a[i * n + i] += n as f64;
    }
    let b: Vec<f64> = (0..n).map(|_| rng.random_range(-1.0..1.0)).collect();
    (a, b)
}

fn bench_plu(c: &mut Criterion) {
    let mut group = c.benchmark_group("plu");

    for n in [3, 16, 64, 256].iter() {
        group.throughput(criterion::Throughput::Elements((*n * *n) as u64));
        let (a, _) = random_system(*n);
        let mut p = vec![0; *n];

        group.bench_with_input(BenchmarkId::new("plu", n), &a, |bencher, a| {
            bencher.iter(|| {
                let mut lu = a.clone();
                plu(*n, &mut lu, &mut p).unwrap();
                black_box(&lu);
            });
        });
    }

    group.finish();
}

fn bench_solve(c: &mut Criterion) {
    let mut group = c.benchmark_group("solve");

    for n in [3, 16, 64, 256].iter() {
        let (a, b) = random_system(*n);

        group.bench_with_input(
            BenchmarkId::new("solve_in_place", n),
            &(&a, &b),
            |bencher, (a, b)| {
                bencher.iter(|| {
                    let mut a = a.to_vec();
                    let mut x = b.to_vec();
                    solve_in_place(*n, &mut a, &mut x).unwrap();
                    black_box(&x);
                });
            },
        );

        // factorize once, solve many
        let mut lu = a.clone();
        let mut p = vec![0; *n];
        plu(*n, &mut lu, &mut p).unwrap();

        group.bench_with_input(
            BenchmarkId::new("lu_solve_in_place", n),
            &(&lu, &p, &b),
            |bencher, (lu, p, b)| {
                bencher.iter(|| {
                    let mut x = b.to_vec();
                    lu_solve_in_place(*n, lu, p, &mut x).unwrap();
                    black_box(&x);
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_plu, bench_solve);
criterion_main!(benches);
