use std::fs;
use std::path::PathBuf;

use u_tour::constructive::nearest_neighbor;
use u_tour::io::{load_prior_solution, load_problem, persist_solution, ProblemFile};
use u_tour::models::{ProblemModel, Solution};
use u_tour::search::{solve, SearchConfig, SearchController, Termination};
use u_tour::{Error, ValidationError};

fn four_nodes(k: usize) -> ProblemModel {
    ProblemModel::from_rows(
        vec![
            vec![0.0, 1.0, 4.0, 4.0],
            vec![1.0, 0.0, 1.0, 4.0],
            vec![4.0, 1.0, 0.0, 1.0],
            vec![4.0, 4.0, 1.0, 0.0],
        ],
        k,
    )
    .expect("valid")
}

/// Waypoints on a 4×4 grid with unit spacing, depot in a corner.
fn grid(k: usize) -> ProblemModel {
    let points: Vec<(f64, f64)> = (0..16).map(|i| ((i % 4) as f64, (i / 4) as f64)).collect();
    let rows = points
        .iter()
        .map(|a| {
            points
                .iter()
                .map(|b| (a.0 - b.0).hypot(a.1 - b.1))
                .collect()
        })
        .collect();
    ProblemModel::from_rows(rows, k).expect("valid")
}

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("u-tour-it-{}-{name}", std::process::id()))
}

#[test]
fn test_four_node_problem_converges() {
    let p = four_nodes(1);
    let solution = solve(&p, None, 5.0);
    assert_eq!(solution.tours(), vec![vec![0, 1, 2, 3, 0]]);
    assert!((solution.cost(&p) - 7.0).abs() < 1e-9);
}

#[test]
fn test_zero_vehicles_is_validation_error() {
    let err = ProblemModel::from_rows(vec![vec![0.0, 1.0], vec![1.0, 0.0]], 0).unwrap_err();
    assert!(matches!(
        err,
        Error::Validation(ValidationError::InvalidFleetSize(0))
    ));
}

#[test]
fn test_zero_time_limit_returns_construction() {
    let p = grid(3);
    let solution = solve(&p, None, 0.0);
    assert_eq!(solution, nearest_neighbor(&p));
    assert_eq!(solution.validate(&p), Ok(()));
}

#[test]
fn test_prior_with_wrong_node_count_falls_back() {
    let p = grid(2);
    // a prior from a smaller mission
    let prior = Solution::from_tours(vec![vec![0, 1, 2, 3, 0], vec![0, 4, 0]]).expect("anchored");
    let config = SearchConfig::default()
        .with_time_limit_secs(0.0)
        .with_parallel(false);
    let result = SearchController::new(&p, config)
        .expect("valid")
        .run(Some(prior));
    assert!(!result.warm_started);
    assert_eq!(result.best, nearest_neighbor(&p));
}

#[test]
fn test_prior_with_wrong_route_count_falls_back() {
    let p = four_nodes(2);
    let prior = Solution::from_tours(vec![vec![0, 1, 2, 3, 0]]).expect("anchored");
    let solution = solve(&p, Some(prior), 0.0);
    assert_eq!(solution.num_routes(), 2);
    assert_eq!(solution.validate(&p), Ok(()));
}

#[test]
fn test_search_improves_on_construction() {
    let p = grid(2);
    let start = nearest_neighbor(&p).cost(&p);
    let config = SearchConfig::default()
        .with_time_limit_secs(30.0)
        .with_max_stagnant_passes(2_000);
    let result = SearchController::new(&p, config).expect("valid").run(None);

    assert_eq!(result.best.validate(&p), Ok(()));
    assert!(result.best_cost <= start);
    assert!(result.cost_history.windows(2).all(|w| w[1].1 < w[0].1));
    assert_eq!(result.cost_history[0], (0, start));
    assert!((result.best.cost(&p) - result.best_cost).abs() < 1e-9);
}

#[test]
fn test_repeated_runs_are_identical() {
    let p = grid(3);
    let config = SearchConfig::default()
        .with_time_limit_secs(60.0)
        .with_max_stagnant_passes(500);
    let first = SearchController::new(&p, config.clone())
        .expect("valid")
        .run(None);
    let second = SearchController::new(&p, config).expect("valid").run(None);

    assert_eq!(first.termination, Termination::Stagnation);
    assert_eq!(first.best_cost, second.best_cost);
    assert_eq!(first.best, second.best);
}

#[test]
fn test_solve_is_deterministic() {
    // small enough that the default stagnation limit ends each run well
    // before the deadline
    let p = ProblemModel::from_rows(
        (0..6)
            .map(|i| (0..6).map(|j| (i as f64 - j as f64).abs()).collect())
            .collect(),
        2,
    )
    .expect("valid");

    let first = solve(&p, None, 600.0);
    let second = solve(&p, None, 600.0);
    assert_eq!(first, second);
    assert_eq!(first.cost(&p), second.cost(&p));
    assert!((first.cost(&p) - 10.0).abs() < 1e-9);
}

#[test]
fn test_parallel_and_sequential_agree() {
    let p = grid(3);
    let config = SearchConfig::default()
        .with_time_limit_secs(60.0)
        .with_max_passes(300)
        .with_max_stagnant_passes(0);
    let par = SearchController::new(&p, config.clone().with_parallel(true))
        .expect("valid")
        .run(None);
    let seq = SearchController::new(&p, config.with_parallel(false))
        .expect("valid")
        .run(None);
    assert_eq!(par.cost_history, seq.cost_history);
    assert_eq!(par.best, seq.best);
}

#[test]
fn test_warm_start_from_exported_routes() {
    let path = temp_path("warm.json");
    let p = grid(2);
    let config = SearchConfig::default()
        .with_time_limit_secs(30.0)
        .with_max_stagnant_passes(300);

    let first = SearchController::new(&p, config.clone())
        .expect("valid")
        .run(None);
    persist_solution(&first.best, &path).expect("exports");

    let prior = load_prior_solution(&path).expect("reads");
    let second = SearchController::new(&p, config).expect("valid").run(prior);
    assert!(second.warm_started);
    assert!(second.best_cost <= first.best_cost);
    fs::remove_file(&path).ok();
}

#[test]
fn test_problem_file_round_trip() {
    let path = temp_path("problem.json");
    let p = four_nodes(2);
    ProblemFile::new(p.matrix(), p.num_vehicles())
        .save(&path)
        .expect("writes");

    let loaded = load_problem(&path).expect("loads");
    assert_eq!(loaded.num_vehicles(), 2);
    assert_eq!(loaded.matrix(), p.matrix());
    fs::remove_file(&path).ok();
}

#[test]
fn test_unreachable_waypoint_aborts() {
    let inf = f64::INFINITY;
    let err = ProblemModel::from_rows(
        vec![
            vec![0.0, 1.0, inf],
            vec![1.0, 0.0, inf],
            vec![inf, inf, 0.0],
        ],
        2,
    )
    .unwrap_err();
    assert!(matches!(err, Error::Infeasible(e) if e.node == 2));
}
