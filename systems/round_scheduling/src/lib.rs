#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that materializes the spawn queue for a round.
//!
//! Given a round number and the number of paths on the active map, the
//! scheduler expands the round's composition groups into individual
//! time-stamped spawn entries, spread evenly across each group's window
//! and assigned to paths round-robin. The engine consumes the queue in
//! increasing time order as the round timer advances.

use polygon_defence_core::catalog::{self, EnemyKind};

/// A single scheduled enemy spawn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpawnEntry {
    /// Seconds after round start at which the enemy spawns.
    pub spawn_time: f32,
    /// Kind of enemy to spawn.
    pub enemy: EnemyKind,
    /// Index of the path the enemy follows, within the map's path list.
    pub path_index: usize,
}

/// Expands the composition for `round` into a time-ascending spawn queue.
///
/// Returns `None` when `round` exceeds the final defined round, which the
/// engine treats as the win transition. `path_count` must reflect the
/// active map; a zero count yields every spawn on path 0 so a degenerate
/// map cannot panic the scheduler.
#[must_use]
pub fn plan_round(round: u32, path_count: usize) -> Option<Vec<SpawnEntry>> {
    let groups = catalog::round_composition(round)?;

    let mut queue = Vec::new();
    for group in groups {
        let spacing = if group.count > 1 {
            (group.window_end - group.window_start) / group.count as f32
        } else {
            0.0
        };
        for index in 0..group.count {
            let path_index = if path_count == 0 {
                0
            } else {
                index as usize % path_count
            };
            queue.push(SpawnEntry {
                spawn_time: group.window_start + index as f32 * spacing,
                enemy: group.enemy,
                path_index,
            });
        }
    }

    queue.sort_by(|a, b| a.spawn_time.total_cmp(&b.spawn_time));
    Some(queue)
}
