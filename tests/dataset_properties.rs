//! Whole-run properties of a generated 30-day dataset.

use apiary::*;
use approx::assert_abs_diff_eq;
use chrono::{Duration, NaiveDate, NaiveDateTime, Timelike};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashMap;
use tempfile::tempdir;

fn end() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 7, 15)
        .unwrap()
        .and_hms_opt(16, 42, 7)
        .unwrap()
}

fn thirty_days() -> Dataset {
    let config = GeneratorConfig::new().with_end(end()).with_seed(2024);
    generate_dataset(&config, &Topology::fleet()).unwrap()
}

#[test]
fn row_count_is_timestamps_times_hives() {
    let dataset = thirty_days();
    assert_eq!(dataset.timestamps().len(), 721);
    assert_eq!(dataset.len(), 721 * 7);
    assert_eq!(dataset.metadata.hive_count, 7);
    assert_eq!(dataset.metadata.window_end, end());
    assert_eq!(dataset.metadata.window_start, end() - Duration::days(30));
}

#[test]
fn rows_are_timestamp_major_hive_minor() {
    let dataset = thirty_days();
    let fleet = Topology::fleet();

    for (chunk, stamp) in dataset.readings().chunks(7).zip(dataset.timestamps()) {
        let ids: Vec<&str> = chunk.iter().map(|r| r.hive_id.as_str()).collect();
        let expected: Vec<&str> = fleet.hives().iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids, expected);
        assert!(chunk.iter().all(|r| r.timestamp == stamp));
    }
}

#[test]
fn cumulative_production_is_running_sum() {
    let dataset = thirty_days();
    let mut sums: HashMap<&str, (f64, usize, f64)> = HashMap::new();

    for r in dataset.readings() {
        let entry = sums.entry(r.hive_id.as_str()).or_insert((0.0, 0, 0.0));
        entry.0 += r.hourly_production;
        entry.1 += 1;

        assert!(
            r.cumulative_production >= entry.2,
            "cumulative decreased for {} at {}",
            r.hive_id,
            r.timestamp
        );
        entry.2 = r.cumulative_production;

        // Each hourly value is off by at most 0.00005, the total by 0.0005
        let tolerance = 0.0005 + 0.00005 * entry.1 as f64 + 1e-9;
        assert!((r.cumulative_production - entry.0).abs() <= tolerance);
    }

    assert!(sums.values().all(|(_, _, total)| *total > 0.0));
}

#[test]
fn production_only_in_active_hours() {
    let dataset = thirty_days();
    for r in dataset.readings() {
        if !(6..=20).contains(&r.timestamp.hour()) {
            assert_eq!(r.hourly_production, 0.0);
        }
        assert!(r.hourly_production >= 0.0);
    }
}

#[test]
fn bounded_channels() {
    let dataset = thirty_days();
    for r in dataset.readings() {
        assert!(r.activity_level <= 100);
        assert!((30.0..=90.0).contains(&r.humidity));
        if r.activity_level == 0 {
            assert_eq!(r.production_efficiency, 0.0);
        }
    }
}

#[test]
fn zero_activity_never_divides() {
    let fleet = Topology::fleet();
    let window = TimeWindow::ending_at(end(), 30);
    let quiet = SensorModel {
        activity_day_base: -500.0,
        activity_night_base: -500.0,
        ..SensorModel::default()
    };

    let generator = HiveDataGenerator::with_rng(&fleet, window, StdRng::seed_from_u64(8))
        .with_sensor_model(quiet);

    for r in generator {
        assert_eq!(r.activity_level, 0);
        assert_eq!(r.hourly_production, 0.0);
        assert_eq!(r.production_efficiency, 0.0);
        assert!(r.production_efficiency.is_finite());
    }
}

#[test]
fn denormalized_hive_attributes() {
    let dataset = thirty_days();
    let fleet = Topology::fleet();

    for r in dataset.readings() {
        let hive = fleet.get(&r.hive_id).unwrap();
        assert_eq!(r.hive_name, hive.name);
        assert_eq!(r.hive_type, hive.kind);
        assert_eq!(r.location, hive.location);
        assert_eq!(r.master_id, hive.master_id);
    }
}

#[test]
fn masters_outproduce_workers_on_average() {
    let summary = thirty_days().summary();
    let mean = |kind: &str| {
        let totals: Vec<f64> = summary
            .iter()
            .filter(|s| s.hive_id.starts_with(kind))
            .map(|s| s.total_production)
            .collect();
        totals.iter().sum::<f64>() / totals.len() as f64
    };

    assert!(mean("master") > mean("worker"));
}

#[test]
fn summary_totals_match_ledger() {
    let fleet = Topology::fleet();
    let config = GeneratorConfig::new().with_end(end()).with_seed(77);
    let mut generator = HiveDataGenerator::from_config(&config, &fleet).unwrap();

    let readings: Vec<Reading> = generator.by_ref().collect();
    let ledger = generator.into_ledger();
    let dataset = Dataset::from_readings(readings).unwrap();

    for s in dataset.summary() {
        assert_abs_diff_eq!(
            s.total_production,
            ledger.total(&s.hive_id),
            epsilon = 0.0005 + 1e-9
        );
    }

    let again = generate_dataset(&config, &fleet).unwrap().into_readings();
    assert_eq!(dataset, Dataset::from_readings(again).unwrap());
}

#[test]
fn topology_file_roundtrip() {
    let dir = tempdir().unwrap();
    let paths = OutputPaths::in_dir(dir.path());
    let fleet = Topology::fleet();
    let config = GeneratorConfig::new().with_days(1).with_end(end()).with_seed(1);
    let dataset = generate_dataset(&config, &fleet).unwrap();

    write_outputs(&dataset, &fleet, &paths).unwrap();
    let loaded = Topology::from_json(&paths.topology).unwrap();

    let ids: Vec<&str> = loaded.hives().iter().map(|h| h.id.as_str()).collect();
    assert_eq!(
        ids,
        vec![
            "master_001",
            "worker_001",
            "worker_002",
            "worker_003",
            "master_002",
            "worker_004",
            "worker_005",
        ]
    );
    assert_eq!(loaded.masters().count(), 2);
    assert_eq!(loaded.workers_of("master_001").count(), 3);
    assert_eq!(loaded.workers_of("master_002").count(), 2);

    for hive in loaded.hives() {
        match hive.kind {
            HiveKind::Master => assert!(hive.master_id.is_none()),
            HiveKind::Worker => {
                let master = loaded.get(hive.master_id.as_deref().unwrap()).unwrap();
                assert_eq!(master.kind, HiveKind::Master);
            }
        }
    }

    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&paths.topology).unwrap()).unwrap();
    assert!(raw[0]["master_id"].is_null());
    assert_eq!(raw[4]["id"], "master_002");
}
