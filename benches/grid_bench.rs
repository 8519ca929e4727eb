// Benchmark for grid derivation and pointer snapping
// Measures the work done on every state notification and every pointer move

use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use timezone_grid::models::scheduler::{MinuteBucket, SchedulerState, SelectedSlot};
use timezone_grid::models::timezone::{TrackedTimezone, TrackedTimezoneId};
use timezone_grid::services::grid::{
    build_summary, cell_for_position, derive_grid, GridPoint, Orientation,
};
use timezone_grid::services::time::ChronoTzTimeService;

const ZONES: [(&str, &str); 8] = [
    ("London", "Europe/London"),
    ("New York", "America/New_York"),
    ("Tokyo", "Asia/Tokyo"),
    ("Kolkata", "Asia/Kolkata"),
    ("Sydney", "Australia/Sydney"),
    ("Kathmandu", "Asia/Kathmandu"),
    ("Los Angeles", "America/Los_Angeles"),
    ("Berlin", "Europe/Berlin"),
];

fn state_with(count: usize) -> SchedulerState {
    let timezones = ZONES
        .iter()
        .cycle()
        .take(count)
        .enumerate()
        .map(|(i, (name, id))| {
            TrackedTimezone::new(TrackedTimezoneId::new(format!("bench-{}", i)), *name, *id)
        })
        .collect();
    let date = NaiveDate::from_ymd_opt(2026, 3, 29).unwrap();
    SchedulerState::new(timezones, date)
}

fn bench_derive_grid(c: &mut Criterion) {
    let mut group = c.benchmark_group("derive_grid");
    let time = ChronoTzTimeService::new();

    for count in [1, 8, 32].iter() {
        let state = state_with(*count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &state, |b, state| {
            b.iter(|| derive_grid(black_box(state), &time));
        });
    }

    group.finish();
}

fn bench_summary(c: &mut Criterion) {
    let time = ChronoTzTimeService::new();
    let state = state_with(8);
    let grid = derive_grid(&state, &time);
    let slot = SelectedSlot::new(2, 14, MinuteBucket::Thirty);

    c.bench_function("build_summary_8", |b| {
        b.iter(|| build_summary(black_box(&state), &grid, &time, black_box(slot)));
    });
}

fn bench_cell_for_position(c: &mut Criterion) {
    let origin = GridPoint::new(160.0, 44.0);

    c.bench_function("cell_for_position_sweep", |b| {
        b.iter(|| {
            (0..1344)
                .map(|x| {
                    cell_for_position(
                        black_box(Orientation::Horizontal),
                        origin,
                        GridPoint::new(160.0 + x as f32, 80.0),
                        56.0,
                    )
                })
                .count()
        });
    });
}

criterion_group!(benches, bench_derive_grid, bench_summary, bench_cell_for_position);
criterion_main!(benches);
