use gridline::graph::{Direction, Graph, GraphEvent, LineId, PlayerId, point};
use gridline::level::{build_graph, link_lines};
use gridline::{Error, LevelConfig, Waypoint, World};

#[test]
fn closed_run_links_every_corner_twice() {
    let config = LevelConfig::square(10.0, 5.0, 1.0);
    let g = build_graph(&config.waypoints, config.line_width).unwrap();

    assert_eq!(g.corner_count(), 4);
    assert_eq!(g.line_count(), 4);
    for (_, corner) in g.corners() {
        assert_eq!(corner.line_count(), 2);
    }
    let origin = g.corner_at(point(0.0, 0.0)).unwrap();
    assert_eq!(g.corner(origin).attached_line_at(Direction::Right), Some(LineId(0)));
    assert_eq!(g.corner(origin).attached_line_at(Direction::Up), Some(LineId(3)));
    assert_eq!(g.line(LineId(1)).width(), config.line_width);
}

#[test]
fn gaps_start_independent_runs() {
    let waypoints = [
        Waypoint::at(0.0, 0.0),
        Waypoint::at(10.0, 0.0),
        Waypoint::Gap,
        Waypoint::at(0.0, 5.0),
        Waypoint::at(10.0, 5.0),
    ];
    let g = build_graph(&waypoints, 1.0).unwrap();

    assert_eq!(g.line_count(), 2);
    assert_eq!(g.corner_count(), 4);
    for (_, corner) in g.corners() {
        assert_eq!(corner.line_count(), 1);
    }
}

#[test]
fn runs_sharing_a_position_share_the_corner() {
    let waypoints = [
        Waypoint::at(0.0, 0.0),
        Waypoint::at(10.0, 0.0),
        Waypoint::Gap,
        Waypoint::at(5.0, 0.0),
        Waypoint::at(5.0, 8.0),
    ];
    let g = build_graph(&waypoints, 1.0).unwrap();

    // (5, 0) lies inside the first line, not on one of its ends.
    let mid = g.corner_at(point(5.0, 0.0)).unwrap();
    assert_eq!(g.corner(mid).line_count(), 1);
    assert_eq!(g.corner(mid).attached_line_at(Direction::Up), Some(LineId(1)));
}

#[test]
fn diagonal_segments_are_rejected() {
    let waypoints = [Waypoint::at(0.0, 0.0), Waypoint::at(3.0, 4.0)];
    let err = build_graph(&waypoints, 1.0).unwrap_err();
    assert!(matches!(err, Error::DiagonalSegment { .. }));
}

#[test]
fn a_level_needs_at_least_one_line() {
    let waypoints = [Waypoint::at(1.0, 1.0), Waypoint::Gap, Waypoint::at(2.0, 1.0)];
    assert!(matches!(build_graph(&waypoints, 1.0), Err(Error::EmptyLevel)));
    assert!(matches!(build_graph(&[], 1.0), Err(Error::EmptyLevel)));
}

#[test]
fn repeated_waypoints_are_skipped() {
    let waypoints = [
        Waypoint::at(0.0, 0.0),
        Waypoint::at(0.0, 0.0),
        Waypoint::at(4.0, 0.0),
    ];
    let g = build_graph(&waypoints, 1.0).unwrap();
    assert_eq!(g.line_count(), 1);
    assert_eq!(g.line(LineId(0)).start_corner(), g.corner_at(point(0.0, 0.0)));
}

#[test]
fn link_lines_leaves_unmatched_ends_loose() {
    let mut g = Graph::new();
    let a = g.add_corner(point(0.0, 0.0));
    let line = g.add_line(point(0.0, 0.0), point(0.0, 6.0), 1.0);

    link_lines(&mut g);

    assert_eq!(g.line(line).start_corner(), Some(a));
    assert_eq!(g.line(line).end_corner(), None);
    assert_eq!(g.corner(a).attached_line_at(Direction::Up), Some(line));

    // A second pass changes nothing.
    link_lines(&mut g);
    assert_eq!(g.corner(a).line_count(), 1);
}

#[test]
fn world_spawns_configured_players() {
    let config = LevelConfig::square(10.0, 10.0, 1.0)
        .with_player(0, 0.5, 3.0)
        .with_player(2, 0.25, 4.0);
    let mut world = World::from_level(&config).unwrap();

    assert_eq!(world.players().len(), 2);
    let first = world.player(PlayerId(0));
    assert_eq!(first.position(), point(5.0, 0.0));
    assert_eq!(first.speed(), 3.0);
    assert_eq!(world.player(PlayerId(1)).position(), point(7.5, 10.0));
    assert!(world.graph().line(LineId(2)).is_player_linked(PlayerId(1)));

    let events = world.take_graph_events();
    assert_eq!(events.len(), 8);
    let origin = world.graph().corner_at(point(0.0, 0.0)).unwrap();
    assert_eq!(events[0], GraphEvent::CornerAdded(origin));
    assert!(world.take_graph_events().is_empty());
}

#[test]
fn world_loads_from_json() {
    let world = World::from_level(
        &LevelConfig::from_json_str(
            r#"{
                "waypoints": [[0, 0], [20, 0], [20, 20], [0, 20], [0, 0], null, [10, 0], [10, 20]],
                "gridSize": 5,
                "players": [{ "line": 4, "fraction": 0.5 }]
            }"#,
        )
        .unwrap(),
    )
    .unwrap();

    assert_eq!(world.rules().grid_size, 5.0);
    assert_eq!(world.graph().line_count(), 5);
    assert_eq!(world.player(PlayerId(0)).position(), point(10.0, 10.0));
}

#[test]
fn spawns_are_validated() {
    let mut world = World::from_level(&LevelConfig::square(10.0, 10.0, 1.0)).unwrap();

    let err = world.spawn_player(7, 0.0, 1.0).unwrap_err();
    assert!(matches!(err, Error::InvalidSpawnLine { index: 7, count: 4 }));

    let err = world.spawn_player_at(0, point(3.0, 1.0), 1.0).unwrap_err();
    assert!(matches!(err, Error::SpawnOffLine { line: 0, .. }));
    assert!(world.players().is_empty());
}
