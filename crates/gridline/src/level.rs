//! Builds the initial graph from a waypoint list.
//!
//! Every waypoint becomes a corner (corners are shared by position, so a run that returns to
//! its first point closes a loop). Consecutive waypoints inside a run become lines. A final
//! linking pass attaches each line end to the corner at the same position.

use gridline_graph::{Direction, Graph, LineId};

use crate::config::Waypoint;
use crate::error::{Error, Result};

pub fn build_graph(waypoints: &[Waypoint], line_width: f64) -> Result<Graph> {
    let mut graph = Graph::new();

    for p in waypoints.iter().filter_map(|w| w.position()) {
        graph.add_corner(p);
    }

    for run in waypoints.split(|w| matches!(w, Waypoint::Gap)) {
        for pair in run.windows(2) {
            let (Some(from), Some(to)) = (pair[0].position(), pair[1].position()) else {
                continue;
            };
            if from == to {
                tracing::warn!(?from, "skipping zero-length level segment");
                continue;
            }
            if Direction::from_vector(to - from).is_none() {
                return Err(Error::DiagonalSegment { from, to });
            }
            graph.add_line(from, to, line_width);
        }
    }

    if graph.line_count() == 0 {
        return Err(Error::EmptyLevel);
    }

    link_lines(&mut graph);
    Ok(graph)
}

/// Attaches every line end that is not linked yet to the corner at the same position.
///
/// Ends with no matching corner, and ends whose slot is already taken, are logged and left
/// unlinked.
pub fn link_lines(graph: &mut Graph) {
    let ids: Vec<LineId> = graph.lines().map(|(id, _)| id).collect();
    for line in ids {
        let l = graph.line(line);
        let ends = [(l.start(), l.start_corner()), (l.end(), l.end_corner())];
        for (position, linked) in ends {
            if linked.is_some() {
                continue;
            }
            match graph.corner_at(position) {
                Some(corner) => {
                    if let Err(err) = graph.attach(corner, line) {
                        tracing::warn!(line = line.0, %err, "line end left unlinked");
                    }
                }
                None => {
                    tracing::warn!(line = line.0, ?position, "line end matches no corner");
                }
            }
        }
    }
}
