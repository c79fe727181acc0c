mod common;

use std::time::Duration;

use navtour_lib::{
    load_houses, plan_route, NodeRegistry, PathSummary, RouteRequest, Tour, TourAlgorithm,
    TourSolution, TourSummary,
};

fn square_registry() -> NodeRegistry {
    NodeRegistry::from_nodes(common::unit_square()).expect("unique names")
}

#[test]
fn path_summary_lists_names_and_two_decimal_distance() {
    let registry = common::line_graph();
    let plan = plan_route(&registry, &RouteRequest::dijkstra("A", "E")).expect("route");
    let summary = PathSummary::from_plan(&registry, &plan);

    assert!(summary.reachable);
    assert_eq!(summary.start, "A");
    assert_eq!(summary.goal, "E");
    assert_eq!(summary.steps.len(), 5);
    assert_eq!(
        summary.render_text(),
        "Total Distance: 4.00. Path: A -> B -> C -> D -> E"
    );
}

#[test]
fn unreachable_path_summary_has_no_steps() {
    let registry = common::split_graph();
    let plan = plan_route(&registry, &RouteRequest::dijkstra("Ankara", "Van")).expect("route");
    let summary = PathSummary::from_plan(&registry, &plan);

    assert!(!summary.reachable);
    assert!(summary.steps.is_empty());
    assert_eq!(summary.render_text(), "No path could be found.");

    let json: serde_json::Value =
        serde_json::from_str(&summary.to_json().expect("json")).expect("valid json");
    assert_eq!(json["reachable"], false);
    assert!(json.get("total_distance").is_none());
}

#[test]
fn path_summary_json_carries_coordinates() {
    let registry = common::split_graph();
    let plan = plan_route(&registry, &RouteRequest::dijkstra("Konya", "Izmir")).expect("route");
    let json: serde_json::Value = serde_json::from_str(
        &PathSummary::from_plan(&registry, &plan)
            .to_json()
            .expect("json"),
    )
    .expect("valid json");

    assert_eq!(json["algorithm"], "dijkstra");
    assert_eq!(json["steps"][0]["name"], "Konya");
    assert_eq!(json["steps"][0]["x"], -1.0);
    assert_eq!(json["steps"][1]["name"], "Izmir");
}

#[test]
fn tour_summary_closes_the_circuit_with_one_based_positions() {
    let registry = square_registry();
    let solution = TourSolution {
        algorithm: TourAlgorithm::BruteForce,
        tour: Tour::new(vec![0, 3, 2, 1]),
        cost: 4.0,
        elapsed: Duration::from_millis(1250),
    };
    let summary = TourSummary::from_solution(&registry, &solution);

    assert_eq!(
        summary.render_text(),
        "Method: Brute-Force Method\n\
         Shortest Distance: 4.00000\n\
         Shortest Path: [1, 4, 3, 2, 1]\n\
         Time it takes to find the shortest path: 1.25 seconds."
    );
}

#[test]
fn tour_summary_json_names_the_method() {
    let registry = square_registry();
    let solution = TourSolution {
        algorithm: TourAlgorithm::AntColony,
        tour: Tour::new(vec![0, 1, 2, 3]),
        cost: 4.0,
        elapsed: Duration::from_millis(5),
    };
    let json: serde_json::Value = serde_json::from_str(
        &TourSummary::from_solution(&registry, &solution)
            .to_json()
            .expect("json"),
    )
    .expect("valid json");

    assert_eq!(json["algorithm"], "ant-colony");
    assert_eq!(json["total_distance"], 4.0);
    assert_eq!(json["stops"].as_array().map(Vec::len), Some(4));
    assert_eq!(json["stops"][2]["name"], "3");
}

#[test]
fn single_house_tour_repeats_itself() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("houses.txt");
    std::fs::write(&path, "7,7\n").expect("write");
    let registry = load_houses(&path).expect("loads");

    let solution = TourSolution {
        algorithm: TourAlgorithm::AntColony,
        tour: Tour::new(vec![0]),
        cost: 0.0,
        elapsed: Duration::ZERO,
    };
    let text = TourSummary::from_solution(&registry, &solution).render_text();
    assert!(text.contains("Method: Ant Colony Optimization Method"));
    assert!(text.contains("Shortest Distance: 0.00000"));
    assert!(text.contains("Shortest Path: [1, 1]"));
}
