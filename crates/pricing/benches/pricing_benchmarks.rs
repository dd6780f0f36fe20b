use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use chrono::{Duration, NaiveDate};
use staysync_catalog::{Room, ServiceDefinition, ServiceType};
use staysync_pricing::{DateRange, DayRuleTable, ServiceSelection, attach_service, quote};

fn room() -> Room {
    Room::new("202".parse().unwrap(), "Family Loft", "loft", 6, 4, 25_000, 150_000)
}

fn selections(window: DateRange, count: usize, rules: &DayRuleTable) -> Vec<ServiceSelection> {
    let kinds = [
        ServiceType::Rental,
        ServiceType::Meal,
        ServiceType::WeekendMeal,
        ServiceType::Pickup,
        ServiceType::Commute,
    ];
    (0..count)
        .map(|i| {
            let def = ServiceDefinition::new(
                format!("s{i}").parse().unwrap(),
                format!("service {i}"),
                10_000,
                kinds[i % kinds.len()],
            );
            attach_service(&def, window, 4, rules)
        })
        .collect()
}

fn bench_quote(c: &mut Criterion) {
    let rules = DayRuleTable::default();
    let room = room();
    let start = NaiveDate::from_ymd_opt(2024, 5, 20).unwrap();
    let mut group = c.benchmark_group("quote");

    for nights in [1i64, 7, 30] {
        let window = DateRange::new(start, start + Duration::days(nights));
        let services = selections(window, 10, &rules);
        group.bench_with_input(BenchmarkId::from_parameter(nights), &services, |b, services| {
            b.iter(|| quote(black_box(&room), window, 5, services, 25_000))
        });
    }
    group.finish();
}

fn bench_attach(c: &mut Criterion) {
    let rules = DayRuleTable::default();
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let window = DateRange::new(start, start + Duration::days(90));

    c.bench_function("attach_every_kind_90_nights", |b| {
        b.iter(|| selections(black_box(window), 5, &rules))
    });
}

criterion_group!(benches, bench_quote, bench_attach);
criterion_main!(benches);
