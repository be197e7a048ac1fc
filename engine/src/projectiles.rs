//! Homing projectiles launched by non-hitscan towers.
//!
//! A projectile captures its damage payload from the owning tower at
//! launch time and reserves that damage on the target so other towers do
//! not overcommit. The engine releases the reservation when the
//! projectile resolves or loses its target.

use polygon_defence_core::{EnemyId, TowerId, WorldPoint};

use crate::enemies::DamageSource;
use crate::towers::Tower;

/// Impact distance below which a projectile counts as a hit.
const COLLISION_RADIUS: f32 = 10.0;

#[derive(Clone, Copy, Debug)]
pub(crate) struct Projectile {
    pub(crate) owner: TowerId,
    pub(crate) target: EnemyId,
    pub(crate) position: WorldPoint,
    pub(crate) damage_tier: u32,
    pub(crate) source: DamageSource,
    pub(crate) area_of_effect: bool,
    pub(crate) blast_radius: f32,
    pub(crate) active: bool,
    speed: f32,
}

impl Projectile {
    /// Launches a projectile from `tower` at the given enemy, capturing
    /// the tower's current stats as the payload.
    pub(crate) fn launch(tower: &Tower, target: EnemyId) -> Self {
        Self {
            owner: tower.id,
            target,
            position: tower.position,
            damage_tier: tower.stats.damage_tier,
            source: DamageSource {
                pops_lead: tower.stats.pops_lead,
                slow: tower.stats.slow,
            },
            area_of_effect: tower.stats.area_of_effect,
            blast_radius: tower.stats.blast_radius,
            active: true,
            speed: tower.stats.projectile_speed,
        }
    }

    /// Homes toward the target's current position by one tick's travel.
    pub(crate) fn advance(&mut self, dt: f32, target_position: WorldPoint) {
        self.position = self.position.step_toward(target_position, self.speed * dt);
    }

    /// Whether the projectile has closed within impact distance.
    pub(crate) fn collided(&self, target_position: WorldPoint) -> bool {
        self.position.distance_to(target_position) < COLLISION_RADIUS
    }
}
