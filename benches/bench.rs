// Criterion benchmarks for the GIGS matching engine

use chrono::{DateTime, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use gigs_match::core::{
    distance::haversine_distance, overlap::calculate_availability_coverage, Matcher,
};
use gigs_match::models::{Coordinates, JobForMatching, TimeRange, WorkerForMatching};

fn ts(value: &str) -> DateTime<Utc> {
    value.parse().expect("valid RFC 3339 timestamp")
}

fn create_job() -> JobForMatching {
    JobForMatching {
        id: "job_1".to_string(),
        needed_roles: vec!["Usher".to_string(), "FOH".to_string()],
        rate: 25.0,
        start: ts("2024-02-01T12:00:00Z"),
        end: ts("2024-02-01T20:00:00Z"),
        location: Some(Coordinates {
            lat: 40.7128,
            lng: -74.006,
        }),
    }
}

fn create_worker(id: usize) -> WorkerForMatching {
    WorkerForMatching {
        id: format!("worker_{}", id),
        name: Some(format!("Worker {}", id)),
        skills: if id % 3 == 0 {
            vec!["Usher".to_string()]
        } else {
            vec!["Usher".to_string(), "FOH".to_string()]
        },
        min_rate: 15.0 + (id % 10) as f64,
        max_rate: 30.0 + (id % 20) as f64,
        radius_km: 25.0 + (id % 50) as f64,
        home: Coordinates {
            lat: 40.7 + (id as f64 * 0.0003),
            lng: -74.0 - (id as f64 * 0.0002),
        },
        availability: vec![
            TimeRange::new(ts("2024-02-01T08:00:00Z"), ts("2024-02-01T14:00:00Z")),
            TimeRange::new(ts("2024-02-01T16:00:00Z"), ts("2024-02-01T23:00:00Z")),
        ],
    }
}

fn bench_haversine_distance(c: &mut Criterion) {
    let origin = Coordinates {
        lat: 40.7128,
        lng: -74.0060,
    };
    let destination = Coordinates {
        lat: 40.7306,
        lng: -73.9352,
    };

    c.bench_function("haversine_distance", |b| {
        b.iter(|| haversine_distance(black_box(origin), black_box(destination)));
    });
}

fn bench_availability_coverage(c: &mut Criterion) {
    let base = TimeRange::new(ts("2024-02-01T12:00:00Z"), ts("2024-02-01T20:00:00Z"));
    let windows: Vec<TimeRange> = (0..24)
        .map(|hour| {
            TimeRange::new(
                ts("2024-02-01T00:00:00Z") + chrono::Duration::hours(hour),
                ts("2024-02-01T00:00:00Z") + chrono::Duration::hours(hour + 2),
            )
        })
        .collect();

    c.bench_function("availability_coverage_24_windows", |b| {
        b.iter(|| calculate_availability_coverage(black_box(&base), black_box(&windows)));
    });
}

fn bench_rank_workers(c: &mut Criterion) {
    let matcher = Matcher::with_default_weights();
    let job = create_job();

    let mut group = c.benchmark_group("rank_workers_for_job");
    for worker_count in [100_usize, 1_000, 5_000] {
        let workers: Vec<WorkerForMatching> = (0..worker_count).map(create_worker).collect();

        group.bench_with_input(
            BenchmarkId::from_parameter(worker_count),
            &workers,
            |b, workers| {
                b.iter(|| matcher.rank_workers_for_job(black_box(&job), black_box(workers)));
            },
        );
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_haversine_distance,
    bench_availability_coverage,
    bench_rank_workers
);
criterion_main!(benches);
