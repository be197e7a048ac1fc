#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that selects tower targets from enemy candidate snapshots.
//!
//! Selection filters by range, visibility, and positive effective
//! remaining tier, then applies one of four priority modes. Ties between
//! equal sort keys resolve to the candidate that appears first in the
//! input slice, which preserves the engine's collection order.

use polygon_defence_core::{EnemyId, TargetCandidate, TargetPriority, WorldPoint};

/// Tower view of the world required to pick a target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TargetingQuery {
    /// Position of the tower.
    pub origin: WorldPoint,
    /// Targeting radius in world units.
    pub range: f32,
    /// Whether the tower can see camouflaged enemies.
    pub sees_camo: bool,
    /// Active priority mode.
    pub priority: TargetPriority,
}

/// Target selection system that reuses a scratch buffer across queries.
#[derive(Debug, Default)]
pub struct TargetSelector {
    scratch: Vec<ScoredCandidate>,
}

impl TargetSelector {
    /// Creates a new selector with an empty scratch buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Picks the best target for `query` among `candidates`, if any.
    ///
    /// Candidates outside range, camouflaged against the tower, or whose
    /// remaining tier is already fully reserved by in-flight damage are
    /// filtered out before the priority mode is applied.
    pub fn select(
        &mut self,
        query: &TargetingQuery,
        candidates: &[TargetCandidate],
    ) -> Option<EnemyId> {
        self.scratch.clear();
        self.scratch.reserve(candidates.len());

        for candidate in candidates {
            let distance = query.origin.distance_to(candidate.position);
            if distance > query.range {
                continue;
            }
            if candidate.camouflaged && !query.sees_camo {
                continue;
            }
            if candidate.tier.saturating_sub(candidate.incoming_damage) == 0 {
                continue;
            }
            self.scratch.push(ScoredCandidate {
                id: candidate.id,
                distance,
                distance_travelled: candidate.distance_travelled,
                tier: candidate.tier,
            });
        }

        let mut best: Option<&ScoredCandidate> = None;
        for candidate in &self.scratch {
            match best {
                Some(current) if !candidate.beats(current, query.priority) => {}
                _ => best = Some(candidate),
            }
        }
        best.map(|candidate| candidate.id)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct ScoredCandidate {
    id: EnemyId,
    distance: f32,
    distance_travelled: f32,
    tier: u32,
}

impl ScoredCandidate {
    /// Strict comparison, so earlier candidates win ties.
    fn beats(&self, other: &Self, priority: TargetPriority) -> bool {
        match priority {
            TargetPriority::First => self.distance_travelled > other.distance_travelled,
            TargetPriority::Last => self.distance_travelled < other.distance_travelled,
            TargetPriority::Strongest => self.tier > other.tier,
            TargetPriority::Closest => self.distance < other.distance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{TargetSelector, TargetingQuery};
    use polygon_defence_core::{EnemyId, TargetCandidate, TargetPriority, WorldPoint};

    fn candidate(id: u32, x: f32, travelled: f32, tier: u32) -> TargetCandidate {
        TargetCandidate {
            id: EnemyId::new(id),
            position: WorldPoint::new(x, 0.0),
            distance_travelled: travelled,
            tier,
            incoming_damage: 0,
            camouflaged: false,
        }
    }

    fn query(priority: TargetPriority) -> TargetingQuery {
        TargetingQuery {
            origin: WorldPoint::new(0.0, 0.0),
            range: 100.0,
            sees_camo: false,
            priority,
        }
    }

    #[test]
    fn first_prefers_greatest_distance_travelled() {
        let mut selector = TargetSelector::new();
        let candidates = [
            candidate(1, 10.0, 40.0, 1),
            candidate(2, 20.0, 90.0, 1),
            candidate(3, 30.0, 60.0, 1),
        ];
        let picked = selector.select(&query(TargetPriority::First), &candidates);
        assert_eq!(picked, Some(EnemyId::new(2)));
    }

    #[test]
    fn last_prefers_least_distance_travelled() {
        let mut selector = TargetSelector::new();
        let candidates = [candidate(1, 10.0, 40.0, 1), candidate(2, 20.0, 15.0, 1)];
        let picked = selector.select(&query(TargetPriority::Last), &candidates);
        assert_eq!(picked, Some(EnemyId::new(2)));
    }

    #[test]
    fn strongest_prefers_greatest_tier() {
        let mut selector = TargetSelector::new();
        let candidates = [
            candidate(1, 10.0, 40.0, 2),
            candidate(2, 20.0, 15.0, 7),
            candidate(3, 30.0, 80.0, 5),
        ];
        let picked = selector.select(&query(TargetPriority::Strongest), &candidates);
        assert_eq!(picked, Some(EnemyId::new(2)));
    }

    #[test]
    fn closest_prefers_least_distance_to_tower() {
        let mut selector = TargetSelector::new();
        let candidates = [candidate(1, 80.0, 40.0, 1), candidate(2, 25.0, 90.0, 1)];
        let picked = selector.select(&query(TargetPriority::Closest), &candidates);
        assert_eq!(picked, Some(EnemyId::new(2)));
    }

    #[test]
    fn out_of_range_candidates_are_ignored() {
        let mut selector = TargetSelector::new();
        let candidates = [candidate(1, 150.0, 90.0, 1)];
        let picked = selector.select(&query(TargetPriority::First), &candidates);
        assert_eq!(picked, None);
    }

    #[test]
    fn camouflage_hides_enemies_from_blind_towers() {
        let mut selector = TargetSelector::new();
        let mut hidden = candidate(1, 10.0, 90.0, 6);
        hidden.camouflaged = true;
        let candidates = [hidden, candidate(2, 20.0, 10.0, 1)];

        let picked = selector.select(&query(TargetPriority::First), &candidates);
        assert_eq!(picked, Some(EnemyId::new(2)));

        let mut seeing = query(TargetPriority::First);
        seeing.sees_camo = true;
        let picked = selector.select(&seeing, &candidates);
        assert_eq!(picked, Some(EnemyId::new(1)));
    }

    #[test]
    fn fully_reserved_enemies_are_not_retargeted() {
        let mut selector = TargetSelector::new();
        let mut doomed = candidate(1, 10.0, 90.0, 3);
        doomed.incoming_damage = 3;
        let candidates = [doomed, candidate(2, 20.0, 10.0, 1)];
        let picked = selector.select(&query(TargetPriority::First), &candidates);
        assert_eq!(picked, Some(EnemyId::new(2)));
    }

    #[test]
    fn ties_resolve_to_the_earliest_candidate() {
        let mut selector = TargetSelector::new();
        let candidates = [
            candidate(7, 10.0, 50.0, 3),
            candidate(3, 20.0, 50.0, 3),
            candidate(9, 30.0, 50.0, 3),
        ];
        for priority in [
            TargetPriority::First,
            TargetPriority::Last,
            TargetPriority::Strongest,
        ] {
            let picked = selector.select(&query(priority), &candidates);
            assert_eq!(picked, Some(EnemyId::new(7)), "{priority:?}");
        }
    }

    #[test]
    fn empty_input_clears_the_target() {
        let mut selector = TargetSelector::new();
        assert_eq!(selector.select(&query(TargetPriority::First), &[]), None);
    }
}
