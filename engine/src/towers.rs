//! Tower entities: cooldown bookkeeping, the three-path upgrade ladder
//! with its crossroad exclusivity rule, and save-record restoration.

use polygon_defence_core::{
    catalog::{TowerKind, TowerStats, UpgradeSpec},
    TargetPriority, TowerId, TowerRecord, WorldPoint,
};

/// Fraction of the total invested cost refunded on sale.
const SELL_REFUND: f32 = 0.7;

/// Where a tower stands in its upgrade ladder.
///
/// A tower may spread upgrades freely until one path reaches tier 2, at
/// which point that path becomes the crossroad choice: other paths may
/// still climb to tier 2, but only the chosen path continues past it.
/// Reaching tier 3 specializes the tower and locks the other paths
/// entirely.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum UpgradePosture {
    /// No path has reached tier 2 yet.
    Balanced,
    /// The given path reached tier 2 and holds the crossroad claim.
    Crossroad(usize),
    /// The given path reached tier 3; the others are locked.
    Specialized(usize),
}

#[derive(Clone, Debug)]
pub(crate) struct Tower {
    pub(crate) id: TowerId,
    pub(crate) kind: TowerKind,
    pub(crate) position: WorldPoint,
    pub(crate) stats: TowerStats,
    pub(crate) upgrades: [u8; 3],
    pub(crate) priority: TargetPriority,
    pub(crate) target: Option<polygon_defence_core::EnemyId>,
    pub(crate) pop_count: u64,
    pub(crate) total_cost: u32,
    posture: UpgradePosture,
    cooldown: f32,
}

impl Tower {
    /// Places a fresh tower. `base_cost` is the kind's unmodified price
    /// and seeds the accumulated cost the sell value derives from.
    pub(crate) fn place(
        id: TowerId,
        kind: TowerKind,
        position: WorldPoint,
        base_cost: u32,
    ) -> Self {
        Self {
            id,
            kind,
            position,
            stats: kind.base_stats(),
            upgrades: [0; 3],
            priority: TargetPriority::default(),
            target: None,
            pop_count: 0,
            total_cost: base_cost,
            posture: UpgradePosture::Balanced,
            cooldown: 0.0,
        }
    }

    /// Rebuilds a tower from a save record, replaying its purchased
    /// upgrades in path order.
    ///
    /// Returns `None` when the record names more upgrade tiers than the
    /// tower's paths define, which marks the record as corrupt. The
    /// posture is derived from the final tiers; when two paths both sit at
    /// tier 2 the lowest-index one holds the crossroad claim.
    pub(crate) fn restore(id: TowerId, record: &TowerRecord) -> Option<Self> {
        let mut tower = Self::place(id, record.kind, WorldPoint::new(record.x, record.y), record.kind.cost());
        for path in 0..3 {
            for tier in 0..record.upgrades[path] {
                let spec = record.kind.upgrade_spec(path, tier)?;
                tower.stats.apply(&spec.changes);
                tower.total_cost += spec.cost;
            }
            tower.upgrades[path] = record.upgrades[path];
        }
        tower.posture = if let Some(path) = tower.upgrades.iter().position(|&tier| tier > 2) {
            UpgradePosture::Specialized(path)
        } else if let Some(path) = tower.upgrades.iter().position(|&tier| tier == 2) {
            UpgradePosture::Crossroad(path)
        } else {
            UpgradePosture::Balanced
        };
        tower.pop_count = record.pop_count;
        tower.priority = record.targeting;
        Some(tower)
    }

    /// Serializes the tower into its persisted form.
    pub(crate) fn record(&self) -> TowerRecord {
        TowerRecord {
            kind: self.kind,
            x: self.position.x(),
            y: self.position.y(),
            upgrades: self.upgrades,
            pop_count: self.pop_count,
            targeting: self.priority,
        }
    }

    /// Next upgrade available on `path`, or `None` when the posture, the
    /// tier cap, or the path index forbids it.
    pub(crate) fn next_upgrade(&self, path: usize) -> Option<&'static UpgradeSpec> {
        if path >= 3 {
            return None;
        }
        let tier = self.upgrades[path];
        let allowed = match self.posture {
            UpgradePosture::Balanced => true,
            UpgradePosture::Crossroad(chosen) => path == chosen || tier < 2,
            UpgradePosture::Specialized(chosen) => path == chosen,
        };
        if !allowed {
            return None;
        }
        self.kind.upgrade_spec(path, tier)
    }

    /// Merges a purchased upgrade into the tower and advances the posture.
    pub(crate) fn apply_upgrade(&mut self, path: usize, spec: &UpgradeSpec) {
        self.stats.apply(&spec.changes);
        self.upgrades[path] += 1;
        self.total_cost += spec.cost;
        match self.posture {
            UpgradePosture::Balanced if self.upgrades[path] == 2 => {
                self.posture = UpgradePosture::Crossroad(path);
            }
            UpgradePosture::Crossroad(chosen) if path == chosen && self.upgrades[path] == 3 => {
                self.posture = UpgradePosture::Specialized(path);
            }
            _ => {}
        }
    }

    /// Money refunded when the tower is sold.
    pub(crate) fn sell_value(&self) -> u32 {
        (self.total_cost as f32 * SELL_REFUND) as u32
    }

    pub(crate) fn tick_cooldown(&mut self, dt: f32) {
        if self.cooldown > 0.0 {
            self.cooldown -= dt;
        }
    }

    pub(crate) fn ready_to_fire(&self) -> bool {
        self.cooldown <= 0.0 && self.target.is_some() && self.stats.attack_rate > 0.0
    }

    pub(crate) fn reset_cooldown(&mut self) {
        self.cooldown = 1.0 / self.stats.attack_rate;
    }
}
