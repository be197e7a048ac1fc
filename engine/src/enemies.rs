//! Enemy entities: path-following movement, status effects, damage, and
//! split-on-death behaviour.

use polygon_defence_core::{
    catalog::{self, EnemyKind, SlowEffect},
    EnemyId, WorldPoint,
};

/// Status effects an enemy can carry, each with a remaining duration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum StatusEffect {
    /// Halves effective speed while active.
    Slow,
}

impl StatusEffect {
    fn speed_multiplier(self) -> f32 {
        match self {
            Self::Slow => catalog::SLOW_SPEED_MULTIPLIER,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct ActiveStatus {
    effect: StatusEffect,
    remaining: f32,
}

/// Capabilities of whatever dealt a hit, captured at launch time.
#[derive(Clone, Copy, Debug)]
pub(crate) struct DamageSource {
    pub(crate) pops_lead: bool,
    pub(crate) slow: Option<SlowEffect>,
}

/// Outcome of a single damage application.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum DamageResult {
    /// Lead plating absorbed the hit entirely.
    Immune,
    /// The one-shot shield absorbed the hit.
    ShieldBroken,
    /// Damage landed; `popped` tiers were removed, capped at the
    /// remaining pool.
    Damaged { popped: u32, killed: bool },
}

/// Fields a split child copies from its dying parent.
#[derive(Clone, Copy, Debug)]
pub(crate) struct SplitSeed {
    position: WorldPoint,
    path: &'static [WorldPoint],
    path_index: usize,
    distance_travelled: f32,
    speed_modifier: f32,
}

#[derive(Clone, Debug)]
pub(crate) struct Enemy {
    pub(crate) id: EnemyId,
    pub(crate) kind: EnemyKind,
    pub(crate) tier: u32,
    pub(crate) bounty: u32,
    pub(crate) splits: &'static [(EnemyKind, u32)],
    pub(crate) camouflaged: bool,
    pub(crate) position: WorldPoint,
    pub(crate) distance_travelled: f32,
    pub(crate) active: bool,
    pub(crate) incoming_damage: u32,
    base_speed: f32,
    speed_modifier: f32,
    lead: bool,
    shielded: bool,
    path: &'static [WorldPoint],
    path_index: usize,
    statuses: Vec<ActiveStatus>,
}

impl Enemy {
    /// Spawns a fresh enemy at the head of `path`.
    ///
    /// `speed_modifier` carries the difficulty's enemy speed scaling and is
    /// reapplied when the enemy later mutates into a lighter form.
    pub(crate) fn spawn(
        id: EnemyId,
        kind: EnemyKind,
        path: &'static [WorldPoint],
        speed_modifier: f32,
    ) -> Self {
        let definition = kind.definition();
        Self {
            id,
            kind,
            tier: definition.tier,
            bounty: definition.bounty,
            splits: definition.splits,
            camouflaged: definition.camouflaged,
            position: path.first().copied().unwrap_or_default(),
            distance_travelled: 0.0,
            active: true,
            incoming_damage: 0,
            base_speed: definition.speed,
            speed_modifier,
            lead: definition.lead,
            shielded: definition.shielded,
            path,
            path_index: 0,
            statuses: Vec::new(),
        }
    }

    /// Spawns a split child at its parent's path position.
    pub(crate) fn split_child(id: EnemyId, kind: EnemyKind, seed: SplitSeed) -> Self {
        let mut child = Self::spawn(id, kind, seed.path, seed.speed_modifier);
        child.position = seed.position;
        child.path_index = seed.path_index;
        child.distance_travelled = seed.distance_travelled;
        child
    }

    /// Captures the fields a split child inherits.
    pub(crate) fn split_seed(&self) -> SplitSeed {
        SplitSeed {
            position: self.position,
            path: self.path,
            path_index: self.path_index,
            distance_travelled: self.distance_travelled,
            speed_modifier: self.speed_modifier,
        }
    }

    fn effective_speed(&self) -> f32 {
        let mut speed = self.base_speed * self.speed_modifier;
        for status in &self.statuses {
            speed *= status.effect.speed_multiplier();
        }
        speed
    }

    /// Advances along the path by one tick's travel.
    ///
    /// Returns `true` when the enemy reached the path's end this tick and
    /// deactivated (a leak); the caller deducts lives.
    pub(crate) fn advance(&mut self, dt: f32) -> bool {
        if !self.active {
            return false;
        }

        if self.path_index + 1 >= self.path.len() {
            self.active = false;
            return true;
        }

        // Statuses whose duration elapses within this tick expire before
        // the tick's movement is priced.
        self.expire_statuses(dt);
        let mut budget = self.effective_speed() * catalog::SPEED_DISTANCE_UNIT * dt;
        while budget > 0.0 && self.path_index + 1 < self.path.len() {
            let next = self.path[self.path_index + 1];
            let gap = self.position.distance_to(next);
            if gap == 0.0 {
                self.path_index += 1;
                continue;
            }
            if budget >= gap {
                budget -= gap;
                self.distance_travelled += gap;
                self.position = next;
                self.path_index += 1;
            } else {
                self.position = self.position.step_toward(next, budget);
                self.distance_travelled += budget;
                budget = 0.0;
            }
        }
        false
    }

    fn expire_statuses(&mut self, dt: f32) {
        self.statuses.retain_mut(|status| {
            status.remaining -= dt;
            status.remaining > 0.0
        });
    }

    fn apply_status(&mut self, effect: StatusEffect, duration: f32) {
        if let Some(existing) = self
            .statuses
            .iter_mut()
            .find(|status| status.effect == effect)
        {
            existing.remaining = duration;
        } else {
            self.statuses.push(ActiveStatus {
                effect,
                remaining: duration,
            });
        }
    }

    /// Applies a hit from `source`.
    ///
    /// Lead plating blocks sources that cannot pop lead; a shield absorbs
    /// one hit and is consumed. Actual damage is capped at the remaining
    /// tier. Survivors re-resolve to the heaviest kind their remaining tier
    /// supports, refreshing speed, bounty, and split composition; the
    /// property flags gained at spawn are kept.
    pub(crate) fn receive_damage(&mut self, amount: u32, source: &DamageSource) -> DamageResult {
        if self.lead && !source.pops_lead {
            return DamageResult::Immune;
        }
        if self.shielded {
            self.shielded = false;
            return DamageResult::ShieldBroken;
        }

        let popped = self.tier.min(amount);
        self.tier -= popped;

        if let Some(slow) = source.slow {
            self.apply_status(StatusEffect::Slow, slow.duration);
        }

        if self.tier == 0 {
            self.active = false;
            return DamageResult::Damaged {
                popped,
                killed: true,
            };
        }

        if let Some(kind) = catalog::kind_for_tier(self.tier) {
            if kind != self.kind {
                let definition = kind.definition();
                self.kind = kind;
                self.base_speed = definition.speed;
                self.bounty = definition.bounty;
                self.splits = definition.splits;
            }
        }

        DamageResult::Damaged {
            popped,
            killed: false,
        }
    }

    /// Releases reserved damage once an in-flight attack resolves or is
    /// cleaned up.
    pub(crate) fn release_incoming(&mut self, amount: u32) {
        self.incoming_damage = self.incoming_damage.saturating_sub(amount);
    }
}

#[cfg(test)]
mod tests {
    use super::{DamageResult, DamageSource, Enemy, StatusEffect};
    use polygon_defence_core::{
        catalog::{EnemyKind, SlowEffect},
        EnemyId, WorldPoint,
    };

    static STRAIGHT_PATH: [WorldPoint; 3] = [
        WorldPoint::new(0.0, 0.0),
        WorldPoint::new(100.0, 0.0),
        WorldPoint::new(100.0, 50.0),
    ];

    fn plain_source() -> DamageSource {
        DamageSource {
            pops_lead: false,
            slow: None,
        }
    }

    fn red(id: u32) -> Enemy {
        Enemy::spawn(
            EnemyId::new(id),
            EnemyKind::RedTriangle,
            &STRAIGHT_PATH,
            1.0,
        )
    }

    #[test]
    fn movement_consumes_distance_across_segment_corners() {
        let mut enemy = red(1);
        // Speed 1.0 covers 50 units per second; 2.4 seconds covers 120
        // units, turning the corner at (100, 0).
        assert!(!enemy.advance(2.4));
        assert!((enemy.position.x() - 100.0).abs() < 1e-3);
        assert!((enemy.position.y() - 20.0).abs() < 1e-3);
        assert!((enemy.distance_travelled - 120.0).abs() < 1e-3);
    }

    #[test]
    fn reaching_the_path_end_deactivates_and_reports_a_leak() {
        let mut enemy = red(1);
        assert!(!enemy.advance(3.0));
        assert!(enemy.advance(1.0), "enemy at the end leaks on next tick");
        assert!(!enemy.active);
    }

    #[test]
    fn slow_halves_effective_speed_until_it_expires() {
        let mut enemy = red(1);
        enemy.apply_status(StatusEffect::Slow, 1.0);
        assert!(!enemy.advance(0.5));
        assert!((enemy.distance_travelled - 12.5).abs() < 1e-3);
        // The remaining half second elapses as this tick begins, so the
        // whole tick moves at full speed again.
        assert!(!enemy.advance(0.5));
        assert!((enemy.distance_travelled - 37.5).abs() < 1e-3);
    }

    #[test]
    fn a_slow_expiring_within_the_tick_no_longer_slows_it() {
        let mut enemy = red(1);
        enemy.apply_status(StatusEffect::Slow, 1.0);
        assert!(!enemy.advance(1.0));
        assert!((enemy.distance_travelled - 50.0).abs() < 1e-3);
    }

    #[test]
    fn damage_is_capped_at_the_remaining_tier() {
        let mut enemy = Enemy::spawn(
            EnemyId::new(1),
            EnemyKind::GreenPentagon,
            &STRAIGHT_PATH,
            1.0,
        );
        let result = enemy.receive_damage(5, &plain_source());
        assert_eq!(
            result,
            DamageResult::Damaged {
                popped: 3,
                killed: true,
            }
        );
        assert!(!enemy.active);
        assert_eq!(enemy.tier, 0);
    }

    #[test]
    fn survivors_mutate_into_the_form_matching_their_remaining_tier() {
        let mut enemy = Enemy::spawn(
            EnemyId::new(1),
            EnemyKind::PinkOctagon,
            &STRAIGHT_PATH,
            1.0,
        );
        let result = enemy.receive_damage(3, &plain_source());
        assert_eq!(
            result,
            DamageResult::Damaged {
                popped: 3,
                killed: false,
            }
        );
        assert_eq!(enemy.tier, 2);
        assert_eq!(enemy.kind, EnemyKind::BlueSquare);
        assert_eq!(enemy.bounty, EnemyKind::BlueSquare.definition().bounty);
    }

    #[test]
    fn lead_blocks_sources_without_lead_popping() {
        let mut enemy = Enemy::spawn(
            EnemyId::new(1),
            EnemyKind::BlackDodecagon,
            &STRAIGHT_PATH,
            1.0,
        );
        assert_eq!(
            enemy.receive_damage(3, &plain_source()),
            DamageResult::Immune
        );
        assert_eq!(enemy.tier, 7);

        let piercing = DamageSource {
            pops_lead: true,
            slow: None,
        };
        assert_eq!(
            enemy.receive_damage(3, &piercing),
            DamageResult::Damaged {
                popped: 3,
                killed: false,
            }
        );
    }

    #[test]
    fn shield_absorbs_exactly_one_hit() {
        let mut enemy = Enemy::spawn(EnemyId::new(1), EnemyKind::CeramicStar, &STRAIGHT_PATH, 1.0);
        assert_eq!(
            enemy.receive_damage(4, &plain_source()),
            DamageResult::ShieldBroken
        );
        assert_eq!(enemy.tier, 10);
        assert_eq!(
            enemy.receive_damage(4, &plain_source()),
            DamageResult::Damaged {
                popped: 4,
                killed: false,
            }
        );
    }

    #[test]
    fn slow_sources_refresh_the_status_duration() {
        let mut enemy = Enemy::spawn(EnemyId::new(1), EnemyKind::BlueSquare, &STRAIGHT_PATH, 1.0);
        let chilling = DamageSource {
            pops_lead: false,
            slow: Some(SlowEffect { duration: 2.0 }),
        };
        let _ = enemy.receive_damage(1, &chilling);
        assert_eq!(enemy.statuses.len(), 1);
        let _ = enemy.receive_damage(1, &chilling);
        assert_eq!(enemy.statuses.len(), 1, "reapplication refreshes in place");
    }

    #[test]
    fn split_children_inherit_the_parents_path_progress() {
        let mut parent = Enemy::spawn(EnemyId::new(1), EnemyKind::CeramicStar, &STRAIGHT_PATH, 0.9);
        let _ = parent.advance(1.0);
        let seed = parent.split_seed();
        let child = Enemy::split_child(EnemyId::new(2), EnemyKind::PinkOctagon, seed);
        assert_eq!(child.position, parent.position);
        assert_eq!(child.distance_travelled, parent.distance_travelled);
        assert_eq!(child.tier, EnemyKind::PinkOctagon.definition().tier);
        assert!((child.speed_modifier - 0.9).abs() < f32::EPSILON);
    }

    #[test]
    fn release_incoming_never_underflows() {
        let mut enemy = red(1);
        enemy.incoming_damage = 2;
        enemy.release_incoming(5);
        assert_eq!(enemy.incoming_damage, 0);
    }
}
