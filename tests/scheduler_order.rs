use stepdag::dag::{topological_order, TaskGraph};
use stepdag::errors::StepdagError;
use stepdag_test_utils::builders::{example_graph, GraphFixture};
use stepdag_test_utils::init_tracing;

#[test]
fn test_example_schedule_is_cabdfe() {
    init_tracing();
    let schedule = topological_order(&example_graph()).unwrap();

    assert_eq!(schedule.to_string(), "CABDFE");
    assert_eq!(schedule.ids(), ["C", "A", "B", "D", "F", "E"]);
    assert_eq!(schedule.len(), 6);
}

#[test]
fn test_scheduling_leaves_graph_reusable() {
    let graph = example_graph();
    let snapshot = graph.clone();

    let first = topological_order(&graph).unwrap();
    let second = topological_order(&graph).unwrap();

    assert_eq!(first, second);
    assert_eq!(graph, snapshot);
}

#[test]
fn test_smallest_available_wins_tie() {
    // Both X and B are roots; B must come first even though X was seen first.
    let graph = GraphFixture::new().edges(&[("X", "Y"), ("B", "Y")]).build();
    let schedule = topological_order(&graph).unwrap();
    assert_eq!(schedule.to_string(), "BXY");
}

#[test]
fn test_released_task_competes_with_existing_roots() {
    // After A runs, Z becomes available alongside the singleton M.
    let graph = GraphFixture::new().edge("A", "Z").task("M").build();
    let schedule = topological_order(&graph).unwrap();
    assert_eq!(schedule.to_string(), "AMZ");
}

#[test]
fn test_singleton_scheduled_when_smallest() {
    let graph = GraphFixture::new().edge("B", "C").task("A").task("D").build();
    let schedule = topological_order(&graph).unwrap();
    assert_eq!(schedule.to_string(), "ABCD");
}

#[test]
fn test_multi_character_identifiers_sort_lexicographically() {
    let graph = GraphFixture::new()
        .edges(&[("compile", "link"), ("fetch", "compile"), ("docs", "link")])
        .build();
    let schedule = topological_order(&graph).unwrap();

    assert_eq!(schedule.ids(), ["docs", "fetch", "compile", "link"]);
    assert_eq!(schedule.position("link"), Some(3));
    assert_eq!(schedule.position("nope"), None);
}

#[test]
fn test_two_task_cycle_is_reported() {
    let graph = GraphFixture::new().edges(&[("A", "B"), ("B", "A")]).build();

    match topological_order(&graph) {
        Err(StepdagError::Cycle { blocked, on_cycle }) => {
            assert_eq!(blocked, vec!["A".to_string(), "B".to_string()]);
            assert!(on_cycle == "A" || on_cycle == "B");
        }
        other => panic!("Expected Cycle error, got: {:?}", other),
    }
}

#[test]
fn test_cycle_blocks_downstream_tasks() {
    let graph = GraphFixture::new()
        .edges(&[("C", "A"), ("A", "B"), ("B", "A"), ("B", "D")])
        .build();

    match topological_order(&graph) {
        Err(StepdagError::Cycle { blocked, on_cycle }) => {
            assert_eq!(blocked, vec!["A", "B", "D"]);
            assert!(on_cycle == "A" || on_cycle == "B", "got {on_cycle}");
        }
        other => panic!("Expected Cycle error, got: {:?}", other),
    }
}

#[test]
fn test_self_loop_is_reported_as_cycle() {
    let graph =
        TaskGraph::parse("Step A must be finished before step A can begin.\n").unwrap();

    let err = topological_order(&graph).unwrap_err();
    assert!(matches!(err, StepdagError::Cycle { ref on_cycle, .. } if on_cycle == "A"));
    assert!(err.to_string().contains("Cycle detected"));
}

#[test]
fn test_empty_graph_gives_empty_schedule() {
    let schedule = topological_order(&TaskGraph::default()).unwrap();
    assert!(schedule.is_empty());
    assert_eq!(schedule.to_string(), "");
}

#[test]
fn test_into_vec_returns_owned_ids() {
    let ids = topological_order(&example_graph()).unwrap().into_vec();
    assert_eq!(ids.concat(), "CABDFE");
}
