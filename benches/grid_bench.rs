// Benchmark for the time-grid layout engine
// Measures a full layout pass over synthetic weeks of varying size

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use unitask::models::schedule_entry::ScheduleEntry;
use unitask::services::grid::layout_week;

fn synthetic_week(count: usize) -> Vec<ScheduleEntry> {
    (0..count)
        .map(|i| {
            let day = (i % 7) as u8;
            let start_hour = 7 + (i % 14) as i64;
            ScheduleEntry {
                id: Some(i as i64 + 1),
                user_id: "bench-user".to_string(),
                subject_id: None,
                day_of_week: day,
                start_time: format!("{:02}:00:00", start_hour),
                end_time: format!("{:02}:30:00", start_hour + 1),
                room: None,
                instructor: None,
                created_at: None,
            }
        })
        .collect()
}

fn bench_layout_week(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout_week");

    for count in [10, 100, 1000].iter() {
        let entries = synthetic_week(*count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &entries, |b, entries| {
            b.iter(|| layout_week(black_box(entries)));
        });
    }

    group.finish();
}

fn bench_layout_recompute(c: &mut Criterion) {
    // A render pass recomputes the full layout on every change; measure
    // the realistic repeated case on a typical student week.
    let entries = synthetic_week(40);

    c.bench_function("layout_week_typical_40", |b| {
        b.iter(|| layout_week(black_box(&entries)));
    });
}

criterion_group!(benches, bench_layout_week, bench_layout_recompute);
criterion_main!(benches);
