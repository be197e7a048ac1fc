#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Polygon Defence simulation.
//!
//! This crate defines the vocabulary that connects the authoritative engine,
//! the pure systems, and the adapters: entity identifiers, 2D geometry for
//! path traversal, targeting priorities, presentation cues, persistence
//! records, and the static catalog of enemy, tower, map, and round
//! definitions that the simulation consumes as read-only input.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod catalog;

/// Unique identifier assigned to an enemy for the lifetime of a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EnemyId(u32);

impl EnemyId {
    /// Creates a new enemy identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a tower for the lifetime of a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TowerId(u32);

impl TowerId {
    /// Creates a new tower identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Position expressed in world units.
///
/// The playable field spans `catalog::PLAYABLE_WIDTH` units horizontally;
/// paths, towers, projectiles, and effects all share this coordinate space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldPoint {
    x: f32,
    y: f32,
}

impl WorldPoint {
    /// Creates a new point from world-unit coordinates.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Horizontal coordinate in world units.
    #[must_use]
    pub const fn x(&self) -> f32 {
        self.x
    }

    /// Vertical coordinate in world units.
    #[must_use]
    pub const fn y(&self) -> f32 {
        self.y
    }

    /// Euclidean distance between two points.
    #[must_use]
    pub fn distance_to(&self, other: WorldPoint) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Moves up to `distance` units toward `target`, snapping onto the
    /// target once the remaining gap is covered by the step.
    ///
    /// A zero-length gap yields `target`, so callers never divide by zero
    /// when normalising degenerate segments.
    #[must_use]
    pub fn step_toward(&self, target: WorldPoint, distance: f32) -> WorldPoint {
        let gap = self.distance_to(target);
        if gap <= distance || gap == 0.0 {
            return target;
        }
        let scale = distance / gap;
        WorldPoint {
            x: self.x + (target.x - self.x) * scale,
            y: self.y + (target.y - self.y) * scale,
        }
    }
}

impl fmt::Display for WorldPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.1}, {:.1})", self.x, self.y)
    }
}

/// Shortest distance between `point` and the segment `a`..`b`.
///
/// Degenerate segments collapse to the distance between `point` and `a`.
#[must_use]
pub fn distance_to_segment(point: WorldPoint, a: WorldPoint, b: WorldPoint) -> f32 {
    let seg_x = b.x() - a.x();
    let seg_y = b.y() - a.y();
    let length_sq = seg_x * seg_x + seg_y * seg_y;
    if length_sq == 0.0 {
        return point.distance_to(a);
    }

    let rel_x = point.x() - a.x();
    let rel_y = point.y() - a.y();
    let t = ((rel_x * seg_x + rel_y * seg_y) / length_sq).clamp(0.0, 1.0);
    let closest = WorldPoint::new(a.x() + t * seg_x, a.y() + t * seg_y);
    point.distance_to(closest)
}

/// Shortest distance between `point` and a polyline of path waypoints.
///
/// Polylines with fewer than two points have no segments and report
/// `f32::INFINITY`, which placement validation treats as "clear of paths".
#[must_use]
pub fn distance_to_polyline(points: &[WorldPoint], point: WorldPoint) -> f32 {
    let mut nearest = f32::INFINITY;
    for pair in points.windows(2) {
        let distance = distance_to_segment(point, pair[0], pair[1]);
        if distance < nearest {
            nearest = distance;
        }
    }
    nearest
}

/// Targeting policy a tower applies when several enemies are in range.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetPriority {
    /// Prefer the enemy furthest along its path.
    #[default]
    First,
    /// Prefer the enemy least far along its path.
    Last,
    /// Prefer the enemy with the greatest remaining tier.
    Strongest,
    /// Prefer the enemy nearest to the tower itself.
    Closest,
}

impl TargetPriority {
    /// Advances to the next priority in the fixed presentation order.
    #[must_use]
    pub const fn cycled(self) -> Self {
        match self {
            Self::First => Self::Last,
            Self::Last => Self::Strongest,
            Self::Strongest => Self::Closest,
            Self::Closest => Self::First,
        }
    }
}

/// Candidate enemy data handed to the tower targeting system.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TargetCandidate {
    /// Identifier of the candidate enemy.
    pub id: EnemyId,
    /// Current position of the enemy in world units.
    pub position: WorldPoint,
    /// Total distance the enemy has travelled along its path.
    pub distance_travelled: f32,
    /// Remaining hit-point tier of the enemy.
    pub tier: u32,
    /// Damage already committed to the enemy by in-flight attacks.
    pub incoming_damage: u32,
    /// Whether the enemy is hidden from towers without camouflage detection.
    pub camouflaged: bool,
}

/// Presentation cue emitted by the simulation for the audio collaborator.
///
/// The engine only buffers cues; mixing and playback are presentation
/// concerns outside the simulation core.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SoundCue {
    /// A tower was placed onto the field.
    TowerPlaced,
    /// A tower was sold and refunded.
    TowerSold,
    /// An upgrade purchase was accepted.
    UpgradeApplied,
    /// An enemy absorbed damage.
    EnemyPopped,
    /// A tower of the given kind fired.
    TowerFired(catalog::TowerKind),
}

/// Persisted description of a single placed tower.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TowerRecord {
    /// Kind of tower that was placed.
    pub kind: catalog::TowerKind,
    /// Horizontal position of the tower in world units.
    pub x: f32,
    /// Vertical position of the tower in world units.
    pub y: f32,
    /// Purchased tier along each of the three upgrade paths.
    pub upgrades: [u8; 3],
    /// Lifetime count of damage tiers the tower has popped.
    pub pop_count: u64,
    /// Targeting priority the tower was using.
    pub targeting: TargetPriority,
}

/// Persisted description of an in-progress game session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SaveRecord {
    /// Map the session was started on.
    pub map: catalog::MapId,
    /// Difficulty the session was started with.
    pub difficulty: catalog::Difficulty,
    /// Money held when the record was captured.
    pub money: u32,
    /// Lives remaining when the record was captured.
    pub lives: u32,
    /// Round most recently completed or in progress.
    pub current_round: u32,
    /// Towers present on the field, with their upgrade histories.
    pub towers: Vec<TowerRecord>,
}

/// Errors surfaced by persistence ports.
#[derive(Debug, Error)]
pub enum SaveStoreError {
    /// No save data exists in the backing store.
    #[error("no save data is available")]
    Missing,
    /// Save data exists but could not be parsed.
    #[error("save data could not be parsed: {0}")]
    Corrupt(String),
    /// The backing store itself failed.
    #[error("save backend failed: {0}")]
    Backend(String),
}

/// Persistence port injected into the engine.
///
/// The engine persists through this port exclusively; file layout and
/// storage location are adapter concerns. Load failures are recoverable
/// (the caller simply does not continue a session) while save failures
/// propagate to the caller as fatal.
pub trait SaveStore: fmt::Debug {
    /// Writes the provided record, replacing any previous save.
    fn save(&mut self, record: &SaveRecord) -> Result<(), SaveStoreError>;

    /// Reads the most recently saved record.
    fn load(&mut self) -> Result<SaveRecord, SaveStoreError>;

    /// Removes any persisted record. Absent data is not an error.
    fn delete(&mut self);
}

#[cfg(test)]
mod tests {
    use super::{
        catalog::{Difficulty, MapId, TowerKind},
        distance_to_polyline, distance_to_segment, SaveRecord, TargetPriority, TowerRecord,
        WorldPoint,
    };
    use serde::{de::DeserializeOwned, Serialize};

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn step_toward_snaps_onto_near_targets() {
        let origin = WorldPoint::new(0.0, 0.0);
        let target = WorldPoint::new(3.0, 4.0);
        assert_eq!(origin.step_toward(target, 10.0), target);
        assert_eq!(origin.step_toward(target, 5.0), target);
    }

    #[test]
    fn step_toward_interpolates_along_the_gap() {
        let origin = WorldPoint::new(0.0, 0.0);
        let target = WorldPoint::new(10.0, 0.0);
        let stepped = origin.step_toward(target, 4.0);
        assert!((stepped.x() - 4.0).abs() < 1e-5);
        assert_eq!(stepped.y(), 0.0);
    }

    #[test]
    fn degenerate_segments_measure_from_their_anchor() {
        let anchor = WorldPoint::new(5.0, 5.0);
        let distance = distance_to_segment(WorldPoint::new(8.0, 9.0), anchor, anchor);
        assert!((distance - 5.0).abs() < 1e-5);
    }

    #[test]
    fn polyline_distance_selects_the_nearest_segment() {
        let points = [
            WorldPoint::new(0.0, 0.0),
            WorldPoint::new(10.0, 0.0),
            WorldPoint::new(10.0, 10.0),
        ];
        let distance = distance_to_polyline(&points, WorldPoint::new(12.0, 5.0));
        assert!((distance - 2.0).abs() < 1e-5);
    }

    #[test]
    fn polyline_without_segments_reports_infinity() {
        let points = [WorldPoint::new(1.0, 1.0)];
        assert_eq!(
            distance_to_polyline(&points, WorldPoint::new(0.0, 0.0)),
            f32::INFINITY
        );
    }

    #[test]
    fn priority_cycle_visits_every_mode_once() {
        let mut priority = TargetPriority::First;
        let mut seen = Vec::new();
        for _ in 0..4 {
            seen.push(priority);
            priority = priority.cycled();
        }
        assert_eq!(priority, TargetPriority::First);
        assert_eq!(
            seen,
            vec![
                TargetPriority::First,
                TargetPriority::Last,
                TargetPriority::Strongest,
                TargetPriority::Closest,
            ]
        );
    }

    #[test]
    fn save_record_round_trips_through_bincode() {
        let record = SaveRecord {
            map: MapId::Meadow,
            difficulty: Difficulty::Medium,
            money: 450,
            lives: 100,
            current_round: 7,
            towers: vec![TowerRecord {
                kind: TowerKind::Cannon,
                x: 320.0,
                y: 240.0,
                upgrades: [2, 0, 1],
                pop_count: 118,
                targeting: TargetPriority::Strongest,
            }],
        };
        assert_round_trip(&record);
    }
}
