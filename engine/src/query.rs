//! Read-only views over engine state for presentation layers.
//!
//! Renderers and HUDs consume plain-data snapshots instead of borrowing
//! into live entities, so a frame can be drawn without holding the
//! simulation open.

use polygon_defence_core::{
    catalog::{Difficulty, EnemyKind, MapId, TowerKind, TowerStats},
    EnemyId, TargetPriority, TowerId, WorldPoint,
};

use crate::{Engine, VisualEffect};

/// Plain-data view of one placed tower.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TowerSnapshot {
    /// Identifier of the tower.
    pub id: TowerId,
    /// Kind of the tower.
    pub kind: TowerKind,
    /// Position in world units.
    pub position: WorldPoint,
    /// Combat statistics after all purchased upgrades.
    pub stats: TowerStats,
    /// Purchased tier along each of the three upgrade paths.
    pub upgrades: [u8; 3],
    /// Active targeting priority.
    pub priority: TargetPriority,
    /// Lifetime count of damage tiers the tower has popped.
    pub pop_count: u64,
    /// Money refunded if the tower is sold now.
    pub sell_value: u32,
}

/// Plain-data view of one live enemy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemySnapshot {
    /// Identifier of the enemy.
    pub id: EnemyId,
    /// Current kind, which changes as damage strips tiers away.
    pub kind: EnemyKind,
    /// Remaining hit-point tier.
    pub tier: u32,
    /// Position in world units.
    pub position: WorldPoint,
    /// Whether the enemy is camouflaged.
    pub camouflaged: bool,
}

/// Plain-data view of one in-flight projectile.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectileSnapshot {
    /// Position in world units.
    pub position: WorldPoint,
    /// Whether the projectile bursts into an area blast on impact.
    pub area_of_effect: bool,
}

impl Engine {
    /// Money currently held.
    #[must_use]
    pub fn money(&self) -> u32 {
        self.money
    }

    /// Lives remaining.
    #[must_use]
    pub fn lives(&self) -> u32 {
        self.lives
    }

    /// Round most recently started, zero before the first round.
    #[must_use]
    pub fn current_round(&self) -> u32 {
        self.current_round
    }

    /// Map of the active session, if one exists.
    #[must_use]
    pub fn map(&self) -> Option<MapId> {
        self.map
    }

    /// Difficulty of the active session.
    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Whether a round is currently running.
    #[must_use]
    pub fn is_round_active(&self) -> bool {
        self.round_active
    }

    /// Whether the session has been won.
    #[must_use]
    pub fn is_won(&self) -> bool {
        self.won
    }

    /// Whether the session has been lost.
    #[must_use]
    pub fn is_lost(&self) -> bool {
        self.lost
    }

    /// Whether rounds start automatically after each clear.
    #[must_use]
    pub fn auto_start(&self) -> bool {
        self.auto_start
    }

    /// Snapshots of every placed tower, in placement order.
    #[must_use]
    pub fn tower_snapshots(&self) -> Vec<TowerSnapshot> {
        self.towers
            .iter()
            .map(|tower| TowerSnapshot {
                id: tower.id,
                kind: tower.kind,
                position: tower.position,
                stats: tower.stats,
                upgrades: tower.upgrades,
                priority: tower.priority,
                pop_count: tower.pop_count,
                sell_value: tower.sell_value(),
            })
            .collect()
    }

    /// Snapshots of every live enemy, in spawn order.
    #[must_use]
    pub fn enemy_snapshots(&self) -> Vec<EnemySnapshot> {
        self.enemies
            .iter()
            .filter(|enemy| enemy.active)
            .map(|enemy| EnemySnapshot {
                id: enemy.id,
                kind: enemy.kind,
                tier: enemy.tier,
                position: enemy.position,
                camouflaged: enemy.camouflaged,
            })
            .collect()
    }

    /// Snapshots of every in-flight projectile.
    #[must_use]
    pub fn projectile_snapshots(&self) -> Vec<ProjectileSnapshot> {
        self.projectiles
            .iter()
            .filter(|projectile| projectile.active)
            .map(|projectile| ProjectileSnapshot {
                position: projectile.position,
                area_of_effect: projectile.area_of_effect,
            })
            .collect()
    }

    /// Visual effects still within their display lifetime.
    #[must_use]
    pub fn visual_effects(&self) -> &[VisualEffect] {
        &self.effects
    }
}

#[cfg(test)]
mod tests {
    use crate::Engine;
    use polygon_defence_core::{
        catalog::{Difficulty, MapId, TowerKind},
        TargetPriority, WorldPoint,
    };
    use polygon_defence_persistence::MemorySaveStore;

    #[test]
    fn tower_snapshots_reflect_placement_and_priority() {
        let mut engine = Engine::new(Box::new(MemorySaveStore::new()));
        engine.start_new_game(MapId::Desert, Difficulty::Medium);
        let spot = WorldPoint::new(600.0, 300.0);
        assert!(engine.place_tower(TowerKind::Dart, spot));

        let snapshots = engine.tower_snapshots();
        assert_eq!(snapshots.len(), 1);
        assert_eq!(snapshots[0].kind, TowerKind::Dart);
        assert_eq!(snapshots[0].position, spot);
        assert_eq!(snapshots[0].priority, TargetPriority::First);
        assert_eq!(snapshots[0].upgrades, [0, 0, 0]);
        // A fresh Dart refunds 70% of its 200 purchase price.
        assert_eq!(snapshots[0].sell_value, 140);
    }

    #[test]
    fn session_accessors_track_the_new_game() {
        let mut engine = Engine::new(Box::new(MemorySaveStore::new()));
        engine.start_new_game(MapId::Arctic, Difficulty::Hard);
        assert_eq!(engine.map(), Some(MapId::Arctic));
        assert_eq!(engine.difficulty(), Difficulty::Hard);
        assert_eq!(engine.money(), 500);
        assert_eq!(engine.lives(), 75);
        assert_eq!(engine.current_round(), 0);
        assert!(!engine.is_round_active());
        assert!(!engine.is_won());
        assert!(!engine.is_lost());
    }
}
