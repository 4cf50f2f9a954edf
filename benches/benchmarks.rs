// benches/benchmarks.rs -- Transform estimation, rotations, statistics and queues.
//
//   cargo bench
//   cargo bench -- ransac

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use tidop::core::queue::{spawn_consumer, spawn_producer, FnConsumer};
use tidop::core::{Queue, QueueMPMC, QueueSPSC};
use tidop::geometry::transform::{
    ransac, Affine, Helmert2D, Helmert3D, Perspective, RansacConfig, Transform, Transform3D, TransformOrder,
};
use tidop::geometry::{Point, Point3};
use tidop::math::{DescriptiveStatistics, EulerAngles, EulerAxes, Rng, RotationConverter};
use tidop::Result;

// ============================================================
// Helpers
// ============================================================

/// `n` random source points and their image under `truth`, with every
/// `outlier_every`-th destination replaced by noise (0 disables).
fn scene<T: Transform>(truth: &T, n: usize, outlier_every: usize) -> (Vec<Point>, Vec<Point>) {
    let mut rng = Rng::new(1);
    let src: Vec<Point> = (0..n)
        .map(|_| Point::new(rng.next_f64() * 1000.0, rng.next_f64() * 1000.0))
        .collect();
    let mut dst = truth.transform_points(&src, TransformOrder::Direct).unwrap();
    if outlier_every > 0 {
        for d in dst.iter_mut().step_by(outlier_every) {
            *d = Point::new(rng.next_f64() * 1000.0, rng.next_f64() * 1000.0);
        }
    }
    (src, dst)
}

// ============================================================
// Transforms
// ============================================================

fn bench_compute(c: &mut Criterion) {
    let helmert = Helmert2D::new(120.0, -40.0, 1.2, 0.3);
    let affine = Affine::new(1.1, 0.1, -0.2, 0.9, 10.0, 20.0);
    let perspective = Perspective::new([[1.0, 0.1, 5.0], [0.05, 1.1, -3.0], [1e-4, 2e-4, 1.0]]);

    let mut group = c.benchmark_group("compute");
    for n in [10usize, 100, 1000] {
        let (src, dst) = scene(&helmert, n, 0);
        group.bench_with_input(BenchmarkId::new("helmert2d", n), &n, |b, _| {
            b.iter(|| Helmert2D::default().compute(&src, &dst))
        });
        let (src, dst) = scene(&affine, n, 0);
        group.bench_with_input(BenchmarkId::new("affine", n), &n, |b, _| {
            b.iter(|| Affine::default().compute(&src, &dst))
        });
        let (src, dst) = scene(&perspective, n, 0);
        group.bench_with_input(BenchmarkId::new("perspective", n), &n, |b, _| {
            b.iter(|| Perspective::default().compute(&src, &dst))
        });
    }

    let truth = Helmert3D::new(10.0, 20.0, 30.0, 1.01, 0.1, -0.05, 0.7);
    let mut rng = Rng::new(3);
    let src3: Vec<Point3> = (0..200)
        .map(|_| Point3::new(rng.next_f64() * 100.0, rng.next_f64() * 100.0, rng.next_f64() * 10.0))
        .collect();
    let dst3 = truth.transform3d_points(&src3, TransformOrder::Direct).unwrap();
    group.bench_function("helmert3d_200", |b| b.iter(|| Helmert3D::default().compute3d(&src3, &dst3)));
    group.finish();
}

fn bench_ransac(c: &mut Criterion) {
    let truth = Affine::new(0.9, -0.2, 0.25, 1.05, 30.0, -12.0);
    let config = RansacConfig { max_iterations: 1000, threshold: 0.5, ..Default::default() };

    let mut group = c.benchmark_group("ransac");
    for outlier_every in [10usize, 4, 2] {
        let (src, dst) = scene(&truth, 200, outlier_every);
        group.bench_with_input(
            BenchmarkId::new("affine_200", format!("1_in_{outlier_every}_outliers")),
            &outlier_every,
            |b, _| b.iter(|| ransac::estimate(Affine::default, &src, &dst, &config)),
        );
    }
    group.finish();
}

// ============================================================
// Rotations and statistics
// ============================================================

fn bench_rotations(c: &mut Criterion) {
    let e = EulerAngles::new(0.3, -0.7, 1.9, EulerAxes::Zyx);
    let m = RotationConverter::euler_to_matrix(&e);
    let q = RotationConverter::euler_to_quaternion(&e);

    let mut group = c.benchmark_group("rotations");
    group.bench_function("euler_to_matrix", |b| b.iter(|| RotationConverter::euler_to_matrix(black_box(&e))));
    group.bench_function("matrix_to_euler", |b| {
        b.iter(|| RotationConverter::matrix_to_euler(black_box(&m), EulerAxes::Zyx))
    });
    group.bench_function("matrix_to_quaternion", |b| {
        b.iter(|| RotationConverter::matrix_to_quaternion(black_box(&m)))
    });
    group.bench_function("quaternion_rotate", |b| {
        b.iter(|| q.rotate(black_box(&Point3::new(1.0, 2.0, 3.0))))
    });
    group.finish();
}

fn bench_statistics(c: &mut Criterion) {
    let mut rng = Rng::new(5);
    let data: Vec<f64> = (0..100_000).map(|_| rng.next_f64() * 100.0).collect();

    let mut group = c.benchmark_group("statistics");
    group.bench_function("summary_100k", |b| b.iter(|| DescriptiveStatistics::new(&data).summary()));
    group.bench_function("median_100k", |b| b.iter(|| DescriptiveStatistics::new(&data).median()));
    group.finish();
}

// ============================================================
// Queues
// ============================================================

fn bench_queues(c: &mut Criterion) {
    const ITEMS: usize = 10_000;

    let mut group = c.benchmark_group("queues");
    group.bench_function("spsc_10k", |b| {
        b.iter(|| {
            let (tx, rx) = QueueSPSC::new(256).split();
            let producer = std::thread::spawn(move || {
                for i in 0..ITEMS {
                    if tx.push(i).is_err() {
                        break;
                    }
                }
                tx.close();
            });
            let total: usize = rx.sum();
            let _ = producer.join();
            total
        })
    });
    group.bench_function("mpmc_4x4_10k", |b| {
        b.iter(|| {
            let queue: Arc<dyn Queue<usize>> = Arc::new(QueueMPMC::new(256));
            let producers: Vec<_> = (0..4)
                .map(|_| {
                    spawn_producer(
                        |q: &dyn Queue<usize>| -> Result<()> {
                            for i in 0..ITEMS / 4 {
                                q.push(i)?;
                            }
                            Ok(())
                        },
                        Arc::clone(&queue),
                    )
                })
                .collect();
            let consumers: Vec<_> = (0..4)
                .map(|_| {
                    spawn_consumer(
                        FnConsumer(|q: &dyn Queue<usize>| -> Result<()> {
                            while q.pop().is_some() {}
                            Ok(())
                        }),
                        Arc::clone(&queue),
                    )
                })
                .collect();
            for h in producers {
                let _ = h.join();
            }
            queue.stop();
            for h in consumers {
                let _ = h.join();
            }
        })
    });
    group.finish();
}

criterion_group!(benches, bench_compute, bench_ransac, bench_rotations, bench_statistics, bench_queues);
criterion_main!(benches);
