use std::fmt::Display;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

//const ITERATIONS: usize = 1_048_576;
const ITERATIONS: usize = 1 << 15;

#[derive(Copy, Clone, Debug)]
struct Config {
    pool_size: usize,
    workers: usize,
}

impl Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "w{}s{}", self.workers, self.pool_size)
    }
}

impl Config {
    fn operations_per_worker(&self) -> usize {
        ITERATIONS / self.workers
    }
}

#[rustfmt::skip]
const CONFIGS: &[Config] = &[
    // 8 workers
    Config { workers:  8, pool_size:  2 },
    Config { workers:  8, pool_size:  4 },
    Config { workers:  8, pool_size:  8 },
    // 16 workers
    Config { workers: 16, pool_size:  4 },
    Config { workers: 16, pool_size:  8 },
    Config { workers: 16, pool_size: 16 },
    // 32 workers
    Config { workers: 32, pool_size:  8 },
    Config { workers: 32, pool_size: 16 },
    Config { workers: 32, pool_size: 32 },
];

fn bench_sync(cfg: Config) {
    let pool = objpool::sync::Pool::from_fn(|| Ok::<_, ()>(()))
        .max_size(cfg.pool_size)
        .timeout(None)
        .build()
        .unwrap();

    std::thread::scope(|s| {
        for _ in 0..cfg.workers {
            let _ = s.spawn(|| {
                for _ in 0..cfg.operations_per_worker() {
                    let obj = pool.get().unwrap();
                    pool.release(obj).unwrap();
                }
            });
        }
    });
}

fn bench_aio(cfg: Config) {
    let pool = objpool::aio::Pool::from_fn(|| Ok::<_, ()>(()))
        .max_size(cfg.pool_size)
        .build()
        .unwrap();

    std::thread::scope(|s| {
        for _ in 0..cfg.workers {
            let _ = s.spawn(|| {
                let runtime = tokio::runtime::Builder::new_current_thread()
                    .build()
                    .unwrap();

                runtime.block_on(async {
                    for _ in 0..cfg.operations_per_worker() {
                        let obj = pool.get().await.unwrap();
                        pool.release(obj).unwrap();
                    }
                });
            });
        }
    });
}

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("pool");
    for &config in CONFIGS {
        group.bench_function(BenchmarkId::new("sync", config), |b| {
            b.iter(|| bench_sync(config))
        });
        group.bench_function(BenchmarkId::new("aio", config), |b| {
            b.iter(|| bench_aio(config))
        });
    }
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
