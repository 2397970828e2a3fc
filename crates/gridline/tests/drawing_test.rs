use gridline::drawing::{enter_drawing, new_drawing_line};
use gridline::graph::{Direction, GraphEvent, LineId, PlayerId, point};
use gridline::{LevelConfig, PlayerState, TickInput, Waypoint, World};

fn world_with_player(x: f64, speed: f64) -> (World, PlayerId) {
    let mut world = World::from_level(&LevelConfig::square(10.0, 10.0, 1.0)).unwrap();
    let id = world.spawn_player_at(0, point(x, 0.0), speed).unwrap();
    world.take_graph_events();
    (world, id)
}

fn draw(direction: Direction) -> TickInput {
    TickInput::new(Some(direction), None, true)
}

#[test]
fn pre_drawing_off_grid_runs_to_the_next_mark_first() {
    let (mut world, a) = world_with_player(3.4, 5.0);

    let out = world.tick(&[draw(Direction::Up)], 1.0);

    assert!((out[0].consumed - 0.6).abs() < 1e-9);
    assert_eq!(out[0].direction, Some(Direction::Right));
    assert_eq!(out[0].next, PlayerState::PreDrawing);
    assert_eq!(world.player(a).position(), point(4.0, 0.0));
    assert_eq!(world.graph().line_count(), 4);
}

#[test]
fn pre_drawing_on_a_grid_mark_starts_drawing_at_once() {
    let (mut world, a) = world_with_player(4.0, 5.0);

    let out = world.tick(&[draw(Direction::Up)], 1.0);

    assert_eq!(out[0].consumed, 5.0);
    assert_eq!(out[0].next, PlayerState::Drawing { heading: Direction::Up });
    assert_eq!(world.player(a).state(), PlayerState::Drawing { heading: Direction::Up });
    assert_eq!(world.player(a).position(), point(4.0, 5.0));

    // The bottom edge was split at x = 4 and the new line leaves the split corner upwards.
    let g = world.graph();
    assert_eq!(g.line(LineId(0)).end(), point(4.0, 0.0));
    assert_eq!(g.line(LineId(4)).start(), point(4.0, 0.0));
    assert_eq!(g.line(LineId(4)).end(), point(10.0, 0.0));
    let corner = g.corner_at(point(4.0, 0.0)).unwrap();
    assert_eq!(g.corner(corner).line_count(), 3);

    let drawn = world.player(a).current_line();
    assert_eq!(drawn, LineId(5));
    assert_eq!(g.corner(corner).attached_line_at(Direction::Up), Some(drawn));
    assert_eq!(g.line(drawn).start(), point(4.0, 0.0));
    assert_eq!(g.line(drawn).end(), point(4.0, 5.0));
    assert_eq!(g.line(drawn).end_corner(), None);
    assert!(g.line(drawn).is_player_linked(a));
    assert!(!g.line(LineId(0)).is_player_linked(a));

    assert_eq!(
        world.take_graph_events(),
        vec![
            GraphEvent::CornerAdded(corner),
            GraphEvent::LineAdded(LineId(4)),
            GraphEvent::LineAdded(LineId(5)),
        ]
    );
}

#[test]
fn turning_on_the_next_tick_after_reaching_the_mark() {
    let (mut world, a) = world_with_player(3.4, 5.0);

    world.tick(&[draw(Direction::Up)], 1.0);
    let out = world.tick(&[draw(Direction::Up)], 1.0);

    assert_eq!(out[0].next, PlayerState::Drawing { heading: Direction::Up });
    assert_eq!(world.player(a).position(), point(4.0, 5.0));
}

#[test]
fn pre_drawing_follows_the_secondary_input_to_the_mark() {
    let (mut world, a) = world_with_player(3.4, 5.0);

    let input = TickInput::new(Some(Direction::Up), Some(Direction::Left), true);
    let out = world.tick(&[input], 1.0);

    assert_eq!(out[0].direction, Some(Direction::Left));
    assert!((out[0].consumed - 0.4).abs() < 1e-9);
    assert_eq!(world.player(a).position(), point(3.0, 0.0));
}

#[test]
fn releasing_the_button_before_drawing_returns_to_travelling() {
    let (mut world, a) = world_with_player(3.4, 5.0);

    world.tick(&[draw(Direction::Up)], 1.0);
    let out = world.tick(&[TickInput::toward(Direction::Up)], 1.0);

    assert_eq!(out[0].next, PlayerState::Travelling);
    assert_eq!(world.player(a).state(), PlayerState::Travelling);
    assert_eq!(world.player(a).position(), point(4.0, 0.0));
    assert_eq!(world.graph().line_count(), 4);
}

#[test]
fn pre_drawing_along_the_line_keeps_travelling() {
    let (mut world, a) = world_with_player(2.0, 3.0);

    let out = world.tick(&[draw(Direction::Right)], 1.0);

    assert_eq!(out[0].next, PlayerState::PreDrawing);
    assert_eq!(world.player(a).position(), point(5.0, 0.0));
}

#[test]
fn drawing_out_of_the_play_area_is_refused() {
    let (mut world, a) = world_with_player(0.0, 3.0);

    let out = world.tick(&[draw(Direction::Down)], 1.0);

    assert!(out[0].blocked);
    assert_eq!(out[0].next, PlayerState::PreDrawing);
    assert_eq!(world.player(a).position(), point(0.0, 0.0));
    assert_eq!(world.graph().line_count(), 4);
}

#[test]
fn drawing_continues_without_the_button() {
    let (mut world, a) = world_with_player(4.0, 2.0);

    world.tick(&[draw(Direction::Up)], 1.0);
    let out = world.tick(&[TickInput::toward(Direction::Up)], 1.0);

    assert_eq!(out[0].next, PlayerState::Drawing { heading: Direction::Up });
    assert_eq!(world.player(a).position(), point(4.0, 4.0));
    let drawn = world.player(a).current_line();
    assert_eq!(world.graph().line(drawn).end(), point(4.0, 4.0));
}

#[test]
fn drawing_stops_at_the_edge_of_the_play_area() {
    let (mut world, a) = world_with_player(4.0, 8.0);

    world.tick(&[draw(Direction::Up)], 1.0);
    let out = world.tick(&[draw(Direction::Up)], 1.0);

    assert_eq!(world.player(a).position(), point(4.0, 10.0));
    assert_eq!(out[0].consumed, 2.0);
    assert!(out[0].blocked);
}

#[test]
fn reversing_while_drawing_is_blocked() {
    let (mut world, a) = world_with_player(4.0, 2.0);

    world.tick(&[draw(Direction::Up)], 1.0);
    let out = world.tick(&[draw(Direction::Down)], 1.0);

    assert!(out[0].blocked);
    assert_eq!(out[0].consumed, 0.0);
    assert_eq!(world.player(a).position(), point(4.0, 2.0));
}

#[test]
fn turning_on_a_grid_mark_pins_a_new_corner() {
    let (mut world, a) = world_with_player(4.0, 2.0);

    world.tick(&[draw(Direction::Up)], 1.0);
    let first = world.player(a).current_line();
    let out = world.tick(&[draw(Direction::Right)], 1.0);

    assert_eq!(out[0].next, PlayerState::Drawing { heading: Direction::Right });
    assert_eq!(out[0].consumed, 2.0);
    assert_eq!(world.player(a).position(), point(6.0, 2.0));

    let g = world.graph();
    let turn = g.corner_at(point(4.0, 2.0)).unwrap();
    assert_eq!(g.line(first).end(), point(4.0, 2.0));
    assert_eq!(g.line(first).end_corner(), Some(turn));
    assert_eq!(g.corner(turn).attached_line_at(Direction::Down), Some(first));

    let second = world.player(a).current_line();
    assert_ne!(second, first);
    assert_eq!(g.corner(turn).attached_line_at(Direction::Right), Some(second));
    assert_eq!(g.line(second).end(), point(6.0, 2.0));
}

#[test]
fn turning_off_the_grid_waits_for_the_next_mark() {
    let (mut world, a) = world_with_player(4.0, 2.5);

    world.tick(&[draw(Direction::Up)], 1.0);
    assert_eq!(world.player(a).position(), point(4.0, 2.5));

    let out = world.tick(&[draw(Direction::Right)], 1.0);
    assert_eq!(out[0].consumed, 0.5);
    assert_eq!(out[0].next, PlayerState::Drawing { heading: Direction::Up });
    assert_eq!(world.player(a).position(), point(4.0, 3.0));

    let out = world.tick(&[draw(Direction::Right)], 1.0);
    assert_eq!(out[0].next, PlayerState::Drawing { heading: Direction::Right });
    assert_eq!(world.player(a).position(), point(6.5, 3.0));
}

#[test]
fn splitting_moves_other_players_to_the_new_half() {
    let mut world = World::from_level(&LevelConfig::square(10.0, 10.0, 1.0)).unwrap();
    let a = world.spawn_player_at(0, point(4.0, 0.0), 2.0).unwrap();
    let b = world.spawn_player_at(0, point(8.0, 0.0), 2.0).unwrap();
    let c = world.spawn_player_at(0, point(1.0, 0.0), 2.0).unwrap();

    world.tick(&[draw(Direction::Up)], 1.0);

    let g = world.graph();
    let split = g.corner_at(point(4.0, 0.0)).unwrap();
    let far_half = g.corner(split).attached_line_at(Direction::Right).unwrap();
    assert_eq!(world.player(b).current_line(), far_half);
    assert!(g.line(far_half).is_player_linked(b));
    assert!(!g.line(LineId(0)).is_player_linked(b));
    assert_eq!(world.player(c).current_line(), LineId(0));
    assert!(world.player(a).state().is_drawing());
}

#[test]
#[should_panic(expected = "no travel left")]
fn entering_drawing_without_budget_is_fatal() {
    let (mut world, a) = world_with_player(4.0, 2.0);
    let mut board = world.board();
    enter_drawing(&mut board, a, Direction::Up, 0.0);
}

#[test]
fn new_drawing_line_starts_one_grid_unit_long() {
    let config = LevelConfig {
        waypoints: vec![Waypoint::at(0.0, 0.0), Waypoint::at(10.0, 0.0)],
        ..LevelConfig::square(10.0, 10.0, 2.0)
    };
    let mut world = World::from_level(&config).unwrap();
    let a = world.spawn_player_at(0, point(0.0, 0.0), 1.0).unwrap();
    world.take_graph_events();

    let mut board = world.board();
    let line = new_drawing_line(&mut board, a, Direction::Up, false).unwrap();

    let g = world.graph();
    let origin = g.corner_at(point(0.0, 0.0)).unwrap();
    assert_eq!(g.line(line).start(), point(0.0, 0.0));
    assert_eq!(g.line(line).end(), point(0.0, 2.0));
    assert_eq!(g.line(line).start_corner(), Some(origin));
    assert_eq!(g.line(line).end_corner(), None);
    assert_eq!(g.corner(origin).attached_line_at(Direction::Up), Some(line));
    assert_eq!(world.player(a).current_line(), line);
    assert!(g.line(line).is_player_linked(a));
    assert!(!g.line(LineId(0)).is_player_linked(a));
    assert_eq!(world.take_graph_events(), vec![GraphEvent::LineAdded(line)]);

    // The slot is taken now, so a second line the same way is refused.
    let mut board = world.board();
    assert_eq!(new_drawing_line(&mut board, a, Direction::Up, false), None);
    assert_eq!(world.graph().line_count(), 2);
}

#[test]
fn turn_into_an_occupied_corner_leaves_the_line_unpinned() {
    let mut config = LevelConfig::square(10.0, 10.0, 1.0);
    config.waypoints.extend([
        Waypoint::Gap,
        Waypoint::at(0.0, 5.0),
        Waypoint::at(5.0, 5.0),
        Waypoint::at(10.0, 5.0),
    ]);
    let mut world = World::from_level(&config).unwrap();
    let a = world.spawn_player_at(0, point(5.0, 0.0), 5.0).unwrap();

    world.tick(&[draw(Direction::Up)], 1.0);
    let drawn = world.player(a).current_line();
    assert_eq!(world.player(a).position(), point(5.0, 5.0));

    let junction = world.graph().corner_at(point(5.0, 5.0)).unwrap();
    let lines_before = world.graph().line_count();
    let out = world.tick(&[draw(Direction::Right)], 1.0);

    assert!(out[0].blocked);
    assert_eq!(out[0].next, PlayerState::Drawing { heading: Direction::Up });
    let g = world.graph();
    assert_eq!(g.line_count(), lines_before);
    assert_eq!(g.line(drawn).end_corner(), None);
    assert_eq!(g.corner(junction).line_count(), 2);
    assert_eq!(world.player(a).current_line(), drawn);

    world.tick(&[draw(Direction::Up)], 1.0);

    let line = world.graph().line(drawn);
    assert_eq!(world.player(a).position(), point(5.0, 10.0));
    assert_eq!(line.end(), point(5.0, 10.0));
    assert!(line.point_on_line(world.player(a).position()));
}
