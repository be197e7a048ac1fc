//! Short-lived visual effects the renderer consumes read-only.

use polygon_defence_core::WorldPoint;

const EXPLOSION_LIFETIME: f32 = 0.2;
const LINE_TRAIL_LIFETIME: f32 = 0.1;

/// Shape of a visual effect.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EffectKind {
    /// Expanding blast ring at an impact point.
    Explosion {
        /// Centre of the blast.
        position: WorldPoint,
        /// Blast radius in world units.
        radius: f32,
    },
    /// Instant tracer line drawn by hitscan attacks.
    LineTrail {
        /// Muzzle end of the trail.
        start: WorldPoint,
        /// Impact end of the trail.
        end: WorldPoint,
    },
}

/// A visual effect with its remaining display time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisualEffect {
    /// Shape and placement of the effect.
    pub kind: EffectKind,
    /// Seconds of display time left.
    pub remaining: f32,
}

impl VisualEffect {
    pub(crate) fn explosion(position: WorldPoint, radius: f32) -> Self {
        Self {
            kind: EffectKind::Explosion { position, radius },
            remaining: EXPLOSION_LIFETIME,
        }
    }

    pub(crate) fn line_trail(start: WorldPoint, end: WorldPoint) -> Self {
        Self {
            kind: EffectKind::LineTrail { start, end },
            remaining: LINE_TRAIL_LIFETIME,
        }
    }

    /// Ages the effect; returns `false` once it should disappear.
    pub(crate) fn decay(&mut self, dt: f32) -> bool {
        self.remaining -= dt;
        self.remaining > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::VisualEffect;
    use polygon_defence_core::WorldPoint;

    #[test]
    fn effects_expire_after_their_lifetime() {
        let mut effect = VisualEffect::explosion(WorldPoint::new(10.0, 10.0), 50.0);
        assert!(effect.decay(0.1));
        assert!(!effect.decay(0.15));
    }

    #[test]
    fn trails_fade_faster_than_explosions() {
        let trail = VisualEffect::line_trail(WorldPoint::new(0.0, 0.0), WorldPoint::new(5.0, 5.0));
        let blast = VisualEffect::explosion(WorldPoint::new(0.0, 0.0), 40.0);
        assert!(trail.remaining < blast.remaining);
    }
}
