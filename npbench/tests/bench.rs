use npbench::accel::Accelerators;
use npbench::bench::run_benchmarks_with;
use npbench::config::BenchConfig;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn short_config() -> BenchConfig {
    BenchConfig {
        seed: 1337,
        minutes: 0.1,
        per_problem_max_seconds: Some(0.02),
        use_accelerator: false,
        ..BenchConfig::default()
    }
}

#[test]
fn short_run_completes() {
    init_logging();
    let report = run_benchmarks_with(&short_config(), Accelerators::probe());

    assert!(report.completed);
    assert_eq!(report.seed, 1337);
    assert_eq!(report.problems.len(), 4);

    let sat = report.problems.three_sat.as_ref().unwrap();
    let tsp = report.problems.tsp.as_ref().unwrap();
    let cover = report.problems.vertex_cover.as_ref().unwrap();
    let knapsack = report.problems.knapsack.as_ref().unwrap();

    // The per-track budget is below the guard, so no scaling loop starts.
    assert_eq!(sat.attempted, 0);
    assert_eq!(tsp.n, 0);
    assert!(!cover.found);

    for &seconds in [sat.seconds, tsp.seconds, cover.seconds, knapsack.seconds].iter() {
        assert!(seconds <= 0.05, "track took {}s", seconds);
    }

    assert_eq!(knapsack.n, 300);
    assert!(knapsack.best_value > 0);
}

#[test]
fn knapsack_value_is_reproducible() {
    init_logging();
    let config = short_config();

    let first = run_benchmarks_with(&config, Accelerators::default());
    let second = run_benchmarks_with(&config, Accelerators::default());

    assert_eq!(
        first.problems.knapsack.unwrap().best_value,
        second.problems.knapsack.unwrap().best_value
    );
}

#[test]
fn report_json_shape() {
    init_logging();
    let report = run_benchmarks_with(&short_config(), Accelerators::probe());
    let json = serde_json::to_value(&report).unwrap();

    for key in [
        "seed",
        "minutes",
        "use_accelerator",
        "accelerators",
        "problems",
        "seconds_total",
        "completed",
    ]
    .iter()
    {
        assert!(json.get(key).is_some(), "missing {}", key);
    }

    let problems = &json["problems"];
    for key in ["3sat", "tsp", "vertex_cover", "knapsack"].iter() {
        assert!(problems[key]["seconds"].is_number(), "missing {}", key);
    }

    assert_eq!(json["completed"], serde_json::json!(true));
    assert!(json["accelerators"]["cuda"]["present"].is_boolean());
    assert!(json["accelerators"]["parallel"]["device_count"].is_number());
    assert_eq!(json["problems"]["tsp"]["backend"], serde_json::json!("cpu"));
}

#[test]
fn zero_budget_omits_all_tracks() {
    init_logging();
    let config = BenchConfig {
        minutes: 0.0,
        ..short_config()
    };
    let report = run_benchmarks_with(&config, Accelerators::default());
    assert!(report.completed);

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["problems"], serde_json::json!({}));
}

#[test]
fn tracks_make_progress_with_budget() {
    init_logging();
    let config = BenchConfig {
        seed: 7,
        minutes: 0.5,
        per_problem_max_seconds: Some(1.0),
        use_accelerator: true,
        tsp_points: 60,
        ..BenchConfig::default()
    };
    let report = run_benchmarks_with(&config, Accelerators::probe());
    assert!(report.completed);

    let sat = report.problems.three_sat.unwrap();
    assert!(sat.attempted >= 1);
    if sat.solved > 0 {
        assert!(sat.max_n >= 12);
        assert_eq!(sat.max_m, 4 * sat.max_n);
    }

    let tsp = report.problems.tsp.unwrap();
    assert_eq!(tsp.n, 60);
    assert!(tsp.improved_len <= tsp.base_len + 1e-9);
    assert!(tsp.improvement >= 0.0);
}
