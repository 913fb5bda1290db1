//! Unit tests for the A* search.

use super::*;
use crate::test_support::waypoint;
use rstest::{fixture, rstest};

fn names(route: &Route) -> Vec<&str> {
    route.names().collect()
}

fn rider_of<'a>(candidates: &'a [Waypoint], name: &str) -> Option<&'a str> {
    candidates
        .iter()
        .find(|candidate| candidate.name == name)
        .and_then(|candidate| candidate.rider.as_deref())
}

fn finder(config: SearchConfig) -> PathFinder {
    PathFinder::new(config).expect("valid search config")
}

#[fixture]
fn city() -> Vec<Waypoint> {
    vec![
        waypoint("Start", 26.9124, 75.7873),
        waypoint("A", 26.925, 75.800),
        waypoint("B", 26.939, 75.810),
        waypoint("C", 26.905, 75.840),
        waypoint("Destination", 26.95, 75.825),
    ]
}

/// Four collinear stops where both intermediates tie the direct edge.
#[fixture]
fn collinear() -> Vec<Waypoint> {
    vec![
        waypoint("S", 0.0, 0.0),
        waypoint("A", 1.0, 0.0),
        waypoint("B", 3.0, 0.0),
        waypoint("G", 4.0, 0.0),
    ]
}

/// A detour through `B` that is only reachable hop by hop when each stop
/// sees its two nearest peers.
#[fixture]
fn sparse() -> Vec<Waypoint> {
    vec![
        waypoint("S", 0.0, 0.0),
        waypoint("A", 1.0, 0.0),
        waypoint("B", 2.2, 0.1),
        waypoint("G", 3.0, 0.0),
    ]
}

fn endpoints(candidates: &[Waypoint], start: &str, goal: &str) -> (Waypoint, Waypoint) {
    let find = |name: &str| {
        candidates
            .iter()
            .find(|candidate| candidate.name == name)
            .cloned()
            .expect("endpoint present")
    };
    (find(start), find(goal))
}

#[rstest]
#[expect(clippy::float_arithmetic, reason = "assertions compare floating-point distances")]
fn city_route_goes_straight_to_destination(mut city: Vec<Waypoint>) {
    let (start, goal) = endpoints(&city, "Start", "Destination");
    let route = find_path(&start, &goal, &mut city, 0.05).expect("route");

    assert_eq!(names(&route), ["Start", "Destination"]);
    assert!((route.total_distance() - 0.053_245_187_575_966_84).abs() < 1e-9);
    assert_eq!(
        route.riders().collect::<Vec<_>>(),
        [Some("Rider 0"), Some("Rider 1")]
    );
}

#[rstest]
fn city_search_leaves_unexpanded_candidates_unlabelled(mut city: Vec<Waypoint>) {
    let (start, goal) = endpoints(&city, "Start", "Destination");
    find_path(&start, &goal, &mut city, 0.05).expect("route");

    assert_eq!(rider_of(&city, "Start"), Some("Rider 0"));
    assert_eq!(rider_of(&city, "Destination"), Some("Rider 1"));
    for name in ["A", "B", "C"] {
        assert_eq!(rider_of(&city, name), None, "{name} was never expanded");
    }
}

#[rstest]
fn ties_resolve_to_first_inserted_and_direct_edge_wins(mut collinear: Vec<Waypoint>) {
    let (start, goal) = endpoints(&collinear, "S", "G");
    let route = find_path(&start, &goal, &mut collinear, 5.0).expect("route");

    assert_eq!(names(&route), ["S", "G"]);
    assert_eq!(route.total_distance(), 4.0);
}

#[rstest]
fn expansion_policy_relabels_off_route_nodes(mut collinear: Vec<Waypoint>) {
    let (start, goal) = endpoints(&collinear, "S", "G");
    let route = find_path(&start, &goal, &mut collinear, 5.0).expect("route");

    // A and B tie with G on fScore and were inserted first, so they are
    // expanded (and labelled) before G even though the route skips them.
    assert_eq!(rider_of(&collinear, "A"), Some("Rider 0"));
    assert_eq!(rider_of(&collinear, "B"), Some("Rider 0"));
    // G's leg is measured from its predecessor S: 1 + 3 + 4 >= 5.
    assert_eq!(rider_of(&collinear, "G"), Some("Rider 1"));
    assert_eq!(route.rider_handoffs(), vec![1]);
}

#[rstest]
fn route_policy_labels_only_route_nodes(mut collinear: Vec<Waypoint>) {
    let (start, goal) = endpoints(&collinear, "S", "G");
    let config = SearchConfig {
        policy: HandoffPolicy::Route,
        ..SearchConfig::with_threshold(5.0)
    };
    let route = finder(config)
        .find_path(&start, &goal, &mut collinear)
        .expect("route");

    assert_eq!(names(&route), ["S", "G"]);
    assert_eq!(rider_of(&collinear, "A"), None);
    assert_eq!(rider_of(&collinear, "B"), None);
    // Route legs are 0 then 4; 4 < 5 so no handoff.
    assert_eq!(
        route.riders().collect::<Vec<_>>(),
        [Some("Rider 0"), Some("Rider 0")]
    );
    assert_eq!(rider_of(&collinear, "G"), Some("Rider 0"));
}

#[rstest]
fn handoff_fires_when_accumulated_distance_reaches_threshold() {
    let mut candidates = vec![
        waypoint("S", 0.0, 0.0),
        waypoint("M", 4.0, 0.0),
        waypoint("G", 6.0, 0.0),
    ];
    let (start, goal) = endpoints(&candidates, "S", "G");
    let route = find_path(&start, &goal, &mut candidates, 10.0).expect("route");

    // M is expanded with leg 4, then G with leg 6 from S: exactly 10.
    assert_eq!(rider_of(&candidates, "M"), Some("Rider 0"));
    assert_eq!(rider_of(&candidates, "G"), Some("Rider 1"));
    assert_eq!(names(&route), ["S", "G"]);
    assert_eq!(route.total_distance(), 6.0);
}

#[rstest]
#[expect(clippy::float_arithmetic, reason = "assertions compare floating-point distances")]
fn nearest_topology_finds_multi_hop_shortest_chain(mut sparse: Vec<Waypoint>) {
    let (start, goal) = endpoints(&sparse, "S", "G");
    let config = SearchConfig {
        topology: Topology::Nearest { k: 2 },
        ..SearchConfig::with_threshold(10.0)
    };
    let route = finder(config)
        .find_path(&start, &goal, &mut sparse)
        .expect("route");

    assert_eq!(names(&route), ["S", "B", "G"]);
    assert!((route.total_distance() - 3.008_497_329_384_379).abs() < 1e-9);
    // A is a neighbour of S and gets expanded before B, but is not on the
    // shortest chain.
    assert_eq!(rider_of(&sparse, "A"), Some("Rider 0"));
}

#[rstest]
fn route_policy_hands_off_along_the_route(mut sparse: Vec<Waypoint>) {
    let (start, goal) = endpoints(&sparse, "S", "G");
    let config = SearchConfig {
        policy: HandoffPolicy::Route,
        topology: Topology::Nearest { k: 2 },
        ..SearchConfig::with_threshold(3.0)
    };
    let route = finder(config)
        .find_path(&start, &goal, &mut sparse)
        .expect("route");

    assert_eq!(
        route.riders().collect::<Vec<_>>(),
        [Some("Rider 0"), Some("Rider 0"), Some("Rider 1")]
    );
    assert_eq!(rider_of(&sparse, "A"), None);
    assert_eq!(rider_of(&sparse, "G"), Some("Rider 1"));
}

#[rstest]
fn unreachable_goal_yields_empty_route() {
    let mut candidates = vec![
        waypoint("S", 0.0, 0.0),
        waypoint("A", 1.0, 0.0),
        waypoint("B", 10.0, 0.0),
        waypoint("G", 11.0, 0.0),
    ];
    let (start, goal) = endpoints(&candidates, "S", "G");
    let config = SearchConfig {
        topology: Topology::Nearest { k: 1 },
        ..SearchConfig::with_threshold(1.0)
    };
    let route = finder(config)
        .find_path(&start, &goal, &mut candidates)
        .expect("search runs");

    assert!(route.is_empty());
    assert_eq!(route.total_distance(), 0.0);
    assert_eq!(rider_of(&candidates, "G"), None);
}

#[rstest]
#[expect(clippy::float_arithmetic, reason = "assertions compare floating-point distances")]
fn opposite_corners_of_the_coordinate_range_still_route() {
    let mut candidates = vec![
        waypoint("S", 90.0, 180.0),
        waypoint("M", 0.0, 0.0),
        waypoint("G", -90.0, -180.0),
    ];
    let (start, goal) = endpoints(&candidates, "S", "G");
    let route = find_path(&start, &goal, &mut candidates, 50.0).expect("route");

    let stops = names(&route);
    assert_eq!(stops.first(), Some(&"S"));
    assert_eq!(stops.last(), Some(&"G"));
    let span = 180.0_f64.hypot(360.0);
    assert!((route.total_distance() - span).abs() < 1e-9);
}

#[rstest]
fn start_equal_to_goal_is_a_single_stop_route(mut collinear: Vec<Waypoint>) {
    let (start, _) = endpoints(&collinear, "S", "G");
    let route = find_path(&start, &start, &mut collinear, 1.0).expect("route");
    assert_eq!(names(&route), ["S"]);
    assert_eq!(route.total_distance(), 0.0);
}

#[rstest]
fn endpoints_are_matched_by_name_not_location(mut collinear: Vec<Waypoint>) {
    let start = waypoint("S", 50.0, 50.0);
    let (_, goal) = endpoints(&collinear, "S", "G");
    let route = find_path(&start, &goal, &mut collinear, 5.0).expect("route");
    assert_eq!(route.total_distance(), 4.0);
}

#[rstest]
fn empty_candidates_are_rejected() {
    let start = waypoint("S", 0.0, 0.0);
    let goal = waypoint("G", 1.0, 0.0);
    let err = find_path(&start, &goal, &mut [], 1.0).expect_err("empty set");
    assert_eq!(err, SearchError::EmptyCandidates);
}

#[rstest]
fn single_candidate_is_rejected() {
    let start = waypoint("S", 0.0, 0.0);
    let mut candidates = vec![start.clone()];
    let err = find_path(&start, &start, &mut candidates, 1.0).expect_err("single element");
    assert_eq!(
        err,
        SearchError::DegenerateCandidates {
            name: "S".to_owned()
        }
    );
}

#[rstest]
fn duplicate_names_fail_fast(mut collinear: Vec<Waypoint>) {
    collinear.push(waypoint("A", 9.0, 9.0));
    let (start, goal) = endpoints(&collinear, "S", "G");
    let err = find_path(&start, &goal, &mut collinear, 1.0).expect_err("duplicate");
    assert_eq!(err, SearchError::DuplicateName("A".to_owned()));
    assert!(collinear.iter().all(|candidate| candidate.rider.is_none()));
}

#[rstest]
#[case(Endpoint::Start)]
#[case(Endpoint::Goal)]
fn missing_endpoints_are_reported(mut collinear: Vec<Waypoint>, #[case] missing: Endpoint) {
    let (mut start, mut goal) = endpoints(&collinear, "S", "G");
    let stray = waypoint("Elsewhere", 0.0, 0.0);
    match missing {
        Endpoint::Start => start = stray,
        Endpoint::Goal => goal = stray,
    }
    let err = find_path(&start, &goal, &mut collinear, 1.0).expect_err("missing endpoint");
    assert_eq!(
        err,
        SearchError::MissingEndpoint {
            endpoint: missing,
            name: "Elsewhere".to_owned(),
        }
    );
}

#[rstest]
#[case(0.0)]
#[case(-1.0)]
#[case(f64::NAN)]
#[case(f64::INFINITY)]
fn invalid_thresholds_are_rejected(#[case] threshold: f64) {
    let err = PathFinder::new(SearchConfig::with_threshold(threshold)).expect_err("invalid");
    assert!(matches!(err, SearchError::InvalidThreshold(_)));
}

#[rstest]
fn zero_neighbours_are_rejected() {
    let config = SearchConfig {
        topology: Topology::Nearest { k: 0 },
        ..SearchConfig::default()
    };
    assert_eq!(
        PathFinder::new(config).expect_err("k = 0"),
        SearchError::InvalidNeighbourCount
    );
}

#[rstest]
fn custom_rider_pool_is_used(mut collinear: Vec<Waypoint>) {
    let riders = RiderPool::new(vec!["Asha".to_owned(), "Ravi".to_owned()]).expect("riders");
    let config = SearchConfig {
        riders,
        ..SearchConfig::with_threshold(5.0)
    };
    let (start, goal) = endpoints(&collinear, "S", "G");
    let route = finder(config)
        .find_path(&start, &goal, &mut collinear)
        .expect("route");
    assert_eq!(
        route.riders().collect::<Vec<_>>(),
        [Some("Asha"), Some("Ravi")]
    );
}
