use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use meteorite_processor::models::{City, Continent, MasterRecord, Meteorite};
use meteorite_processor::processors::{
    Aggregator, ClassificationMode, Classifier, DataMerger, IntegrityChecker, JoinStats,
};
use meteorite_processor::utils::coordinates::parse_geolocation;

const LABELS: [&str; 8] = [
    "L6",
    "H5",
    "Eucrite-pmict",
    "Iron, IIAB",
    "Pallasite, PMG",
    "Mesosiderite-A1",
    "Relict iron",
    "CM2",
];

// Create test data for benchmarking
fn create_test_data(count: usize) -> (Vec<Meteorite>, Vec<City>, Vec<Continent>) {
    let countries = ["fr", "de", "us", "jp", "au"];
    let cities: Vec<City> = (0..count / 4 + 1)
        .map(|i| City::new(&format!("City {}", i), countries[i % countries.len()]))
        .collect();
    let continents = vec![
        Continent::new("FR", "France", "Europe"),
        Continent::new("DE", "Germany", "Europe"),
        Continent::new("US", "United States", "Americas"),
        Continent::new("JP", "Japan", "Asia"),
    ];

    let meteorites = (0..count)
        .map(|i| {
            let meteorite = Meteorite::new(
                &format!("City {}", i % (count / 2 + 1)),
                LABELS[i % LABELS.len()],
                Some((i * 37 % 50_000) as f64),
                1801 + (i % 219) as i32,
            );
            if i % 10 == 0 {
                meteorite
            } else {
                meteorite.with_location((i % 180) as f64 - 90.0, (i % 360) as f64 - 180.0)
            }
        })
        .collect();

    (meteorites, cities, continents)
}

fn create_master(count: usize) -> Vec<MasterRecord> {
    let (meteorites, cities, continents) = create_test_data(count);
    DataMerger::new().merge(meteorites, &cities, &continents, &mut JoinStats::default())
}

fn benchmark_data_merger(c: &mut Criterion) {
    let (meteorites, cities, continents) = create_test_data(5_000);

    c.bench_function("data_merger", |b| {
        b.iter(|| {
            let mut stats = JoinStats::default();
            let records =
                DataMerger::new().merge(meteorites.clone(), &cities, &continents, &mut stats);
            black_box(records.len())
        })
    });
}

fn benchmark_classifier(c: &mut Criterion) {
    let master = create_master(5_000);

    let mut group = c.benchmark_group("classifier");
    for mode in [ClassificationMode::Exclusive, ClassificationMode::RuleConcat] {
        group.bench_with_input(BenchmarkId::new("mode", mode.as_str()), &mode, |b, &mode| {
            let classifier = Classifier::with_mode(mode);
            b.iter(|| {
                let (subsets, _) = classifier.partition(&master);
                black_box(subsets.total_rows())
            })
        });
    }
    group.finish();
}

fn benchmark_aggregator(c: &mut Criterion) {
    let master = create_master(5_000);
    let aggregator = Aggregator::new();

    c.bench_function("aggregator", |b| {
        b.iter(|| {
            let capped = aggregator.capped_mass_view(&master);
            let means = aggregator.yearly_mean_mass(&master);
            let series = aggregator.yearly_continent_mass(&capped);
            black_box((means.len(), series.len()))
        })
    });
}

fn benchmark_integrity_checker(c: &mut Criterion) {
    let master = create_master(2_000);

    c.bench_function("integrity_checker", |b| {
        b.iter(|| {
            let report = IntegrityChecker::new().check_integrity(&master);
            black_box(report.total_records)
        })
    });
}

fn benchmark_geolocation_parsing(c: &mut Criterion) {
    let geolocations = [
        "(48.85, 2.35)",
        "(-33.86785, 151.20732)",
        "(0.0, 0.0)",
        "(50.775, 6.08333)",
        "not a point",
    ];

    c.bench_function("geolocation_parsing", |b| {
        b.iter(|| {
            let parsed = geolocations
                .iter()
                .filter(|g| parse_geolocation(g).is_ok())
                .count();
            black_box(parsed)
        })
    });
}

fn benchmark_varying_data_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("merge_by_size");

    for &size in &[100, 1_000, 10_000] {
        group.bench_with_input(BenchmarkId::new("meteorites", size), &size, |b, &size| {
            let (meteorites, cities, continents) = create_test_data(size);
            b.iter(|| {
                let mut stats = JoinStats::default();
                let records =
                    DataMerger::new().merge(meteorites.clone(), &cities, &continents, &mut stats);
                black_box(records.len())
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_data_merger,
    benchmark_classifier,
    benchmark_aggregator,
    benchmark_integrity_checker,
    benchmark_geolocation_parsing,
    benchmark_varying_data_sizes
);
criterion_main!(benches);
