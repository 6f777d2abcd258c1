use std::collections::BTreeMap;

use stepdag::dag::TaskGraph;
use stepdag::engine::{simulate, CostModel, Simulation, TableObserver, TaskState};
use stepdag::errors::StepdagError;
use stepdag::types::CostModelKind;
use stepdag_test_utils::builders::{example_graph, GraphFixture, RecordingObserver};
use stepdag_test_utils::init_tracing;

fn elapsed(graph: &TaskGraph, workers: usize, cost: &CostModel) -> u64 {
    simulate(graph, workers, cost).unwrap().elapsed
}

#[test]
fn test_example_two_workers_takes_fifteen() {
    init_tracing();
    let report = simulate(&example_graph(), 2, &CostModel::alphabet(0)).unwrap();

    assert_eq!(report.elapsed, 15);
    assert_eq!(report.completion_order.concat(), "CABFDE");
    assert_eq!(report.workers, 2);
}

#[test]
fn test_single_worker_runs_tasks_back_to_back() {
    let report = simulate(&example_graph(), 1, &CostModel::alphabet(0)).unwrap();

    // 1 + 2 + 3 + 4 + 5 + 6
    assert_eq!(report.elapsed, 21);
    // One worker follows the single-order schedule.
    assert_eq!(report.completion_order.concat(), "CABDFE");
}

#[test]
fn test_base_cost_applies_to_every_task() {
    assert_eq!(elapsed(&example_graph(), 1, &CostModel::alphabet(60)), 21 + 6 * 60);
}

#[test]
fn test_enough_workers_follow_critical_path() {
    // C(3) -> F(6) -> E(5) is the longest chain.
    let graph = example_graph();
    assert_eq!(elapsed(&graph, 6, &CostModel::alphabet(0)), 14);
    assert_eq!(elapsed(&graph, 50, &CostModel::alphabet(0)), 14);
}

#[test]
fn test_more_workers_never_slower_on_example() {
    let graph = example_graph();
    let cost = CostModel::alphabet(0);

    let times: Vec<u64> = (1..=6).map(|w| elapsed(&graph, w, &cost)).collect();
    assert_eq!(times, vec![21, 15, 14, 14, 14, 14]);
    assert!(times.windows(2).all(|pair| pair[0] >= pair[1]));
}

#[test]
fn test_independent_tasks_split_across_workers() {
    let graph = GraphFixture::new().task("A").task("B").task("C").task("D").build();
    let cost = CostModel::alphabet(0);

    assert_eq!(elapsed(&graph, 1, &cost), 10);
    // Worker 0: A then C (1 + 3), worker 1: B then D (2 + 4).
    assert_eq!(elapsed(&graph, 2, &cost), 6);
    assert_eq!(elapsed(&graph, 4, &cost), 4);
}

#[test]
fn test_empty_graph_takes_no_time() {
    let report = simulate(&TaskGraph::default(), 3, &CostModel::default()).unwrap();
    assert_eq!(report.elapsed, 0);
    assert!(report.completion_order.is_empty());
}

#[test]
fn test_graph_reusable_across_simulations() {
    let graph = example_graph();
    let snapshot = graph.clone();
    let cost = CostModel::alphabet(0);

    let first = simulate(&graph, 2, &cost).unwrap();
    let second = simulate(&graph, 2, &cost).unwrap();

    assert_eq!(first, second);
    assert_eq!(graph, snapshot);
}

#[test]
fn test_zero_workers_rejected() {
    match Simulation::new(&example_graph(), 0, &CostModel::default()) {
        Err(StepdagError::InvalidWorkerCount(0)) => {}
        other => panic!("Expected InvalidWorkerCount, got: {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_alphabet_model_rejects_words() {
    let graph =
        TaskGraph::parse("Step build must be finished before step test can begin.\n").unwrap();

    match simulate(&graph, 2, &CostModel::alphabet(0)) {
        Err(StepdagError::UnknownCost(id)) => assert_eq!(id, "build"),
        other => panic!("Expected UnknownCost, got: {:?}", other),
    }
}

#[test]
fn test_rank_model_prices_any_identifier() {
    let graph =
        TaskGraph::parse("Step build must be finished before step test can begin.\n").unwrap();
    let cost = CostModel::rank(0);

    assert_eq!(cost.cost_of(&graph, "build").unwrap(), 1);
    assert_eq!(cost.cost_of(&graph, "test").unwrap(), 2);
    assert_eq!(elapsed(&graph, 2, &cost), 3);
}

#[test]
fn test_rank_matches_alphabet_on_full_prefix() {
    // A..F are all present, so rank and alphabet agree.
    let graph = example_graph();
    assert_eq!(
        elapsed(&graph, 2, &CostModel::rank(0)),
        elapsed(&graph, 2, &CostModel::alphabet(0))
    );
}

#[test]
fn test_table_model_uses_explicit_costs() {
    let graph =
        TaskGraph::parse("Step build must be finished before step test can begin.\n").unwrap();
    let table = BTreeMap::from([("build".to_string(), 10), ("test".to_string(), 4)]);
    let cost = CostModel::table(table, 1).unwrap();

    assert_eq!(cost.kind(), CostModelKind::Table);
    assert_eq!(elapsed(&graph, 1, &cost), 11 + 5);
}

#[test]
fn test_table_model_missing_entry() {
    let graph = example_graph();
    let table = BTreeMap::from([("A".to_string(), 1)]);
    let cost = CostModel::table(table, 0).unwrap();

    match simulate(&graph, 1, &cost) {
        Err(StepdagError::UnknownCost(id)) => assert_eq!(id, "B"),
        other => panic!("Expected UnknownCost, got: {:?}", other),
    }
}

#[test]
fn test_table_model_rejects_zero_cost() {
    let table = BTreeMap::from([("A".to_string(), 0)]);
    match CostModel::table(table, 5) {
        Err(StepdagError::ConfigError(msg)) => assert!(msg.contains("'A'")),
        other => panic!("Expected ConfigError, got: {:?}", other),
    }
}

#[test]
fn test_alphabet_costs() {
    let graph = example_graph();
    let cost = CostModel::alphabet(60);

    assert_eq!(cost.cost_of(&graph, "A").unwrap(), 61);
    assert_eq!(cost.cost_of(&graph, "Z").unwrap(), 86);
    assert!(matches!(
        cost.cost_of(&graph, "AA"),
        Err(StepdagError::UnknownCost(_))
    ));
    assert!(matches!(
        cost.cost_of(&graph, "a"),
        Err(StepdagError::UnknownCost(_))
    ));
}

#[test]
fn test_cycle_detected_instead_of_spinning() {
    let graph = GraphFixture::new()
        .edges(&[("A", "B"), ("B", "A")])
        .task("C")
        .build();

    match simulate(&graph, 2, &CostModel::alphabet(0)) {
        Err(StepdagError::Cycle { blocked, .. }) => assert_eq!(blocked, vec!["A", "B"]),
        other => panic!("Expected Cycle error, got: {:?}", other),
    }
}

#[test]
fn test_manual_stepping_tracks_task_states() {
    let graph = example_graph();
    let mut sim = Simulation::new(&graph, 2, &CostModel::alphabet(0)).unwrap();

    assert_eq!(sim.state_of("C"), Some(TaskState::Available));
    assert_eq!(sim.state_of("A"), Some(TaskState::Unavailable));
    assert_eq!(sim.state_of("Q"), None);

    let first = sim.step().unwrap();
    assert_eq!(first.time, 0);
    assert_eq!(first.assigned, vec![(0, "C".to_string())]);
    assert!(first.completed.is_empty());
    assert!(!first.finished);
    assert_eq!(sim.state_of("C"), Some(TaskState::InProgress { worker: 0 }));
    assert_eq!(sim.worker_tasks(), vec![Some("C"), None]);

    sim.step().unwrap();
    let third = sim.step().unwrap();
    assert_eq!(third.time, 2);
    assert_eq!(third.completed, vec!["C".to_string()]);
    assert_eq!(sim.time(), 3);
    assert_eq!(sim.state_of("C"), Some(TaskState::Complete));
    assert_eq!(sim.state_of("A"), Some(TaskState::Available));
    assert_eq!(sim.state_of("F"), Some(TaskState::Available));
    assert_eq!(sim.worker_tasks(), vec![None, None]);

    let fourth = sim.step().unwrap();
    assert_eq!(
        fourth.assigned,
        vec![(0, "A".to_string()), (1, "F".to_string())]
    );
    assert_eq!(fourth.completed, vec!["A".to_string()]);

    while !sim.step().unwrap().finished {}

    assert!(sim.is_finished());
    assert_eq!(sim.time(), 15);
    assert_eq!(sim.completed().concat(), "CABFDE");
    for id in graph.task_ids() {
        assert_eq!(sim.state_of(id), Some(TaskState::Complete));
    }

    let after = sim.step().unwrap();
    assert!(after.finished);
    assert_eq!(after.time, 15);
    assert!(after.assigned.is_empty());
}

#[test]
fn test_observer_sees_every_step() {
    let graph = example_graph();
    let mut observer = RecordingObserver::default();

    let report = Simulation::new(&graph, 2, &CostModel::alphabet(0))
        .unwrap()
        .run_with(&mut observer)
        .unwrap();

    assert_eq!(observer.started_with, Some(2));
    assert_eq!(observer.steps.len() as u64, report.elapsed + 1);

    let times: Vec<u64> = observer.steps.iter().map(|s| s.time).collect();
    assert_eq!(times, (0..=15).collect::<Vec<_>>());

    let first = &observer.steps[0];
    assert_eq!(first.workers, vec![Some("C".to_string()), None]);
    assert!(first.completed.is_empty());

    let at_three = &observer.steps[3];
    assert_eq!(
        at_three.workers,
        vec![Some("A".to_string()), Some("F".to_string())]
    );
    assert_eq!(at_three.completed, vec!["C".to_string()]);

    let last = observer.steps.last().unwrap();
    assert_eq!(last.workers, vec![None, None]);
    assert_eq!(last.completed.concat(), "CABFDE");
}

#[test]
fn test_observer_does_not_change_result() {
    let graph = example_graph();
    let cost = CostModel::alphabet(0);

    let plain = Simulation::new(&graph, 2, &cost).unwrap().run().unwrap();
    let observed = Simulation::new(&graph, 2, &cost)
        .unwrap()
        .run_with(&mut RecordingObserver::default())
        .unwrap();

    assert_eq!(plain, observed);
}

#[test]
fn test_table_observer_layout() {
    let graph = example_graph();
    let mut table = TableObserver::new(Vec::new());

    Simulation::new(&graph, 2, &CostModel::alphabet(0))
        .unwrap()
        .run_with(&mut table)
        .unwrap();

    let out = String::from_utf8(table.finish().unwrap()).unwrap();
    let lines: Vec<&str> = out.lines().collect();

    assert_eq!(lines.len(), 17);
    assert_eq!(lines[0], "Second  Worker 0  Worker 1  Done");
    assert_eq!(
        lines[1],
        format!("   0{}C{}.{}", " ".repeat(8), " ".repeat(9), " ".repeat(5))
    );
    assert_eq!(
        lines[4],
        format!("   3{}A{}F{}C", " ".repeat(8), " ".repeat(9), " ".repeat(5))
    );
    assert_eq!(
        lines[16],
        format!("  15{}.{}.{}CABFDE", " ".repeat(8), " ".repeat(9), " ".repeat(5))
    );
}
