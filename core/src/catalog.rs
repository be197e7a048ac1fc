//! Static game definitions consumed by the simulation as read-only input.
//!
//! Enemy stat tables, tower stat and upgrade tables, map layouts, round
//! compositions, and difficulty settings live here. The engine never
//! mutates these; runtime state derives from them at spawn, placement, and
//! upgrade time.

use serde::{Deserialize, Serialize};

use crate::WorldPoint;

/// Width of the playable field; positions beyond it belong to the HUD.
pub const PLAYABLE_WIDTH: f32 = 1150.0;

/// Minimum clearance between a tower and any path polyline.
pub const PATH_CLEARANCE: f32 = 50.0;

/// Minimum spacing between two tower centres.
pub const TOWER_SPACING: f32 = 40.0;

/// World units an enemy with speed 1.0 covers per simulated second.
pub const SPEED_DISTANCE_UNIT: f32 = 50.0;

/// Speed multiplier contributed by each active slow status.
pub const SLOW_SPEED_MULTIPLIER: f32 = 0.5;

/// Flat money bonus awarded when a round is cleared; the round number is
/// added on top.
pub const ROUND_CLEAR_BONUS: u32 = 100;

/// Session difficulty selected when a new game starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Generous economy and slower enemies.
    Easy,
    /// Baseline economy and enemy behaviour.
    Medium,
    /// Tight economy and faster enemies.
    Hard,
}

/// Scalar modifiers a difficulty applies to a fresh session.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DifficultySettings {
    /// Money the player starts with.
    pub starting_money: u32,
    /// Lives the player starts with.
    pub starting_lives: u32,
    /// Multiplier applied to enemy base speed at spawn.
    pub enemy_speed_modifier: f32,
    /// Multiplier applied to tower purchase prices.
    pub tower_cost_modifier: f32,
}

impl Difficulty {
    /// Retrieves the modifiers associated with the difficulty.
    #[must_use]
    pub const fn settings(self) -> DifficultySettings {
        match self {
            Self::Easy => DifficultySettings {
                starting_money: 800,
                starting_lives: 150,
                enemy_speed_modifier: 0.9,
                tower_cost_modifier: 0.95,
            },
            Self::Medium => DifficultySettings {
                starting_money: 650,
                starting_lives: 100,
                enemy_speed_modifier: 1.0,
                tower_cost_modifier: 1.0,
            },
            Self::Hard => DifficultySettings {
                starting_money: 500,
                starting_lives: 75,
                enemy_speed_modifier: 1.1,
                tower_cost_modifier: 1.05,
            },
        }
    }
}

/// Kinds of enemies that march along the map paths.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EnemyKind {
    /// Tier 1, the weakest form.
    RedTriangle,
    /// Tier 2.
    BlueSquare,
    /// Tier 3.
    GreenPentagon,
    /// Tier 4, notably fast.
    YellowHexagon,
    /// Tier 5, the fastest regular form.
    PinkOctagon,
    /// Tier 6, camouflaged.
    WhiteDecagon,
    /// Tier 7, lead-plated.
    BlackDodecagon,
    /// Tier 10, shielded; splits into octagons when broken.
    CeramicStar,
    /// Tier 20, lead-plated and shielded; splits into ceramic stars.
    ReinforcedStar,
}

/// Immutable base statistics for one enemy kind.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemyDefinition {
    /// Hit-point pool the enemy spawns with.
    pub tier: u32,
    /// Base speed in `SPEED_DISTANCE_UNIT`s per second.
    pub speed: f32,
    /// Money credited each time the enemy is struck by a projectile.
    pub bounty: u32,
    /// Children spawned at the enemy's position when its tier is exhausted.
    pub splits: &'static [(EnemyKind, u32)],
    /// Hidden from towers that lack camouflage detection.
    pub camouflaged: bool,
    /// Immune to damage sources that cannot pop lead.
    pub lead: bool,
    /// Carries a one-shot shield that absorbs a single hit.
    pub shielded: bool,
}

const NO_SPLITS: &[(EnemyKind, u32)] = &[];
const CERAMIC_SPLITS: &[(EnemyKind, u32)] = &[(EnemyKind::PinkOctagon, 2)];
const REINFORCED_SPLITS: &[(EnemyKind, u32)] = &[(EnemyKind::CeramicStar, 2)];

impl EnemyKind {
    /// Retrieves the base statistics for the enemy kind.
    #[must_use]
    pub const fn definition(self) -> EnemyDefinition {
        match self {
            Self::RedTriangle => EnemyDefinition {
                tier: 1,
                speed: 1.0,
                bounty: 1,
                splits: NO_SPLITS,
                camouflaged: false,
                lead: false,
                shielded: false,
            },
            Self::BlueSquare => EnemyDefinition {
                tier: 2,
                speed: 1.4,
                bounty: 2,
                splits: NO_SPLITS,
                camouflaged: false,
                lead: false,
                shielded: false,
            },
            Self::GreenPentagon => EnemyDefinition {
                tier: 3,
                speed: 1.8,
                bounty: 3,
                splits: NO_SPLITS,
                camouflaged: false,
                lead: false,
                shielded: false,
            },
            Self::YellowHexagon => EnemyDefinition {
                tier: 4,
                speed: 3.2,
                bounty: 4,
                splits: NO_SPLITS,
                camouflaged: false,
                lead: false,
                shielded: false,
            },
            Self::PinkOctagon => EnemyDefinition {
                tier: 5,
                speed: 3.5,
                bounty: 5,
                splits: NO_SPLITS,
                camouflaged: false,
                lead: false,
                shielded: false,
            },
            Self::WhiteDecagon => EnemyDefinition {
                tier: 6,
                speed: 2.0,
                bounty: 6,
                splits: NO_SPLITS,
                camouflaged: true,
                lead: false,
                shielded: false,
            },
            Self::BlackDodecagon => EnemyDefinition {
                tier: 7,
                speed: 1.8,
                bounty: 7,
                splits: NO_SPLITS,
                camouflaged: false,
                lead: true,
                shielded: false,
            },
            Self::CeramicStar => EnemyDefinition {
                tier: 10,
                speed: 2.5,
                bounty: 10,
                splits: CERAMIC_SPLITS,
                camouflaged: false,
                lead: false,
                shielded: true,
            },
            Self::ReinforcedStar => EnemyDefinition {
                tier: 20,
                speed: 1.0,
                bounty: 20,
                splits: REINFORCED_SPLITS,
                camouflaged: false,
                lead: true,
                shielded: true,
            },
        }
    }
}

/// Tier thresholds in descending order, used when a damaged enemy
/// re-resolves to the heaviest form its remaining tier still supports.
const TIER_LADDER: [(u32, EnemyKind); 9] = [
    (20, EnemyKind::ReinforcedStar),
    (10, EnemyKind::CeramicStar),
    (7, EnemyKind::BlackDodecagon),
    (6, EnemyKind::WhiteDecagon),
    (5, EnemyKind::PinkOctagon),
    (4, EnemyKind::YellowHexagon),
    (3, EnemyKind::GreenPentagon),
    (2, EnemyKind::BlueSquare),
    (1, EnemyKind::RedTriangle),
];

/// Heaviest enemy kind whose base tier does not exceed `tier`.
#[must_use]
pub fn kind_for_tier(tier: u32) -> Option<EnemyKind> {
    TIER_LADDER
        .iter()
        .find(|(threshold, _)| *threshold <= tier)
        .map(|(_, kind)| *kind)
}

/// Duration of the slow status a tower confers on struck enemies.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SlowEffect {
    /// Seconds the slow persists after the most recent hit.
    pub duration: f32,
}

/// Kinds of towers the player can construct.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TowerKind {
    /// Baseline single-target projectile tower.
    Dart,
    /// Area-of-effect tower whose shells pop lead.
    Cannon,
    /// Map-wide hitscan tower.
    Sniper,
    /// Support tower that slows struck enemies.
    Frost,
    /// Water-only tower firing paired harpoons.
    Harpoon,
}

/// Mutable combat statistics a tower carries at runtime.
///
/// Values start from [`TowerKind::base_stats`] and change only through
/// [`TowerStats::apply`] as upgrades are purchased.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TowerStats {
    /// Targeting radius in world units.
    pub range: f32,
    /// Attacks per second; the firing cooldown is its reciprocal.
    pub attack_rate: f32,
    /// Damage tiers removed per hit.
    pub damage_tier: u32,
    /// Travel speed of launched projectiles in world units per second.
    pub projectile_speed: f32,
    /// Projectiles launched per attack.
    pub projectile_count: u32,
    /// Blast radius applied when `area_of_effect` is set.
    pub blast_radius: f32,
    /// Attacks resolve instantly without a travelling projectile.
    pub hitscan: bool,
    /// Impacts damage every enemy within `blast_radius`.
    pub area_of_effect: bool,
    /// Can target camouflaged enemies.
    pub sees_camo: bool,
    /// Damage affects lead-plated enemies.
    pub pops_lead: bool,
    /// Slow status conferred on struck enemies, if any.
    pub slow: Option<SlowEffect>,
    /// Tower must be placed on water rather than land.
    pub water_only: bool,
}

impl TowerStats {
    const fn new() -> Self {
        Self {
            range: 0.0,
            attack_rate: 0.0,
            damage_tier: 0,
            projectile_speed: 400.0,
            projectile_count: 1,
            blast_radius: 0.0,
            hitscan: false,
            area_of_effect: false,
            sees_camo: false,
            pops_lead: false,
            slow: None,
            water_only: false,
        }
    }

    /// Merges an upgrade's stat changes into the current statistics.
    ///
    /// Rate, range, and blast-radius changes are multiplicative; every
    /// other change replaces the previous value.
    pub fn apply(&mut self, changes: &StatChange) {
        if let Some(factor) = changes.attack_rate_multiplier {
            self.attack_rate *= factor;
        }
        if let Some(factor) = changes.range_multiplier {
            self.range *= factor;
        }
        if let Some(factor) = changes.blast_radius_multiplier {
            self.blast_radius *= factor;
        }
        if let Some(value) = changes.damage_tier {
            self.damage_tier = value;
        }
        if let Some(value) = changes.projectile_speed {
            self.projectile_speed = value;
        }
        if let Some(value) = changes.projectile_count {
            self.projectile_count = value;
        }
        if let Some(value) = changes.blast_radius {
            self.blast_radius = value;
        }
        if let Some(value) = changes.hitscan {
            self.hitscan = value;
        }
        if let Some(value) = changes.area_of_effect {
            self.area_of_effect = value;
        }
        if let Some(value) = changes.sees_camo {
            self.sees_camo = value;
        }
        if let Some(value) = changes.pops_lead {
            self.pops_lead = value;
        }
        if let Some(value) = changes.slow {
            self.slow = Some(value);
        }
    }
}

/// Stat deltas carried by a single upgrade purchase.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StatChange {
    /// Multiplies the attack rate.
    pub attack_rate_multiplier: Option<f32>,
    /// Multiplies the targeting range.
    pub range_multiplier: Option<f32>,
    /// Multiplies the blast radius.
    pub blast_radius_multiplier: Option<f32>,
    /// Replaces the damage tier per hit.
    pub damage_tier: Option<u32>,
    /// Replaces the projectile travel speed.
    pub projectile_speed: Option<f32>,
    /// Replaces the projectile count per attack.
    pub projectile_count: Option<u32>,
    /// Replaces the blast radius outright.
    pub blast_radius: Option<f32>,
    /// Replaces the hitscan flag.
    pub hitscan: Option<bool>,
    /// Replaces the area-of-effect flag.
    pub area_of_effect: Option<bool>,
    /// Replaces camouflage detection.
    pub sees_camo: Option<bool>,
    /// Replaces lead-popping capability.
    pub pops_lead: Option<bool>,
    /// Replaces the conferred slow status.
    pub slow: Option<SlowEffect>,
}

impl StatChange {
    /// A change that leaves every stat untouched.
    pub const NONE: Self = Self {
        attack_rate_multiplier: None,
        range_multiplier: None,
        blast_radius_multiplier: None,
        damage_tier: None,
        projectile_speed: None,
        projectile_count: None,
        blast_radius: None,
        hitscan: None,
        area_of_effect: None,
        sees_camo: None,
        pops_lead: None,
        slow: None,
    };
}

/// One purchasable step along a tower upgrade path.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UpgradeSpec {
    /// Display name of the upgrade.
    pub name: &'static str,
    /// Purchase price in money.
    pub cost: u32,
    /// Stat deltas the upgrade merges into the tower.
    pub changes: StatChange,
}

const fn rate(name: &'static str, cost: u32, factor: f32) -> UpgradeSpec {
    UpgradeSpec {
        name,
        cost,
        changes: StatChange {
            attack_rate_multiplier: Some(factor),
            ..StatChange::NONE
        },
    }
}

const fn reach(name: &'static str, cost: u32, factor: f32) -> UpgradeSpec {
    UpgradeSpec {
        name,
        cost,
        changes: StatChange {
            range_multiplier: Some(factor),
            ..StatChange::NONE
        },
    }
}

const fn damage(name: &'static str, cost: u32, tier: u32) -> UpgradeSpec {
    UpgradeSpec {
        name,
        cost,
        changes: StatChange {
            damage_tier: Some(tier),
            ..StatChange::NONE
        },
    }
}

static DART_POWER: [UpgradeSpec; 5] = [
    damage("Sharpened Darts", 120, 2),
    damage("Razor Darts", 250, 3),
    UpgradeSpec {
        name: "Heavy Darts",
        cost: 400,
        changes: StatChange {
            damage_tier: Some(4),
            projectile_speed: Some(500.0),
            ..StatChange::NONE
        },
    },
    UpgradeSpec {
        name: "Lead Tips",
        cost: 600,
        changes: StatChange {
            pops_lead: Some(true),
            ..StatChange::NONE
        },
    },
    damage("Polygon Piercer", 1200, 6),
];

static DART_SPEED: [UpgradeSpec; 5] = [
    rate("Quick Loader", 100, 1.25),
    rate("Double Hinge", 190, 1.33),
    rate("Trigger Discipline", 350, 1.5),
    UpgradeSpec {
        name: "Twin Launcher",
        cost: 700,
        changes: StatChange {
            projectile_count: Some(2),
            ..StatChange::NONE
        },
    },
    rate("Dart Storm", 1100, 1.5),
];

static DART_SIGHT: [UpgradeSpec; 5] = [
    reach("Spotter Scope", 90, 1.2),
    reach("Long Lens", 160, 1.25),
    UpgradeSpec {
        name: "Night Optics",
        cost: 300,
        changes: StatChange {
            sees_camo: Some(true),
            ..StatChange::NONE
        },
    },
    UpgradeSpec {
        name: "Wind Tables",
        cost: 450,
        changes: StatChange {
            range_multiplier: Some(1.3),
            projectile_speed: Some(550.0),
            ..StatChange::NONE
        },
    },
    UpgradeSpec {
        name: "Railgun Conversion",
        cost: 900,
        changes: StatChange {
            hitscan: Some(true),
            ..StatChange::NONE
        },
    },
];

static CANNON_BLAST: [UpgradeSpec; 5] = [
    UpgradeSpec {
        name: "Packed Powder",
        cost: 150,
        changes: StatChange {
            blast_radius_multiplier: Some(1.2),
            ..StatChange::NONE
        },
    },
    UpgradeSpec {
        name: "Wide Shells",
        cost: 300,
        changes: StatChange {
            blast_radius_multiplier: Some(1.25),
            ..StatChange::NONE
        },
    },
    damage("Dense Shot", 500, 2),
    UpgradeSpec {
        name: "Shockwave Casing",
        cost: 900,
        changes: StatChange {
            blast_radius_multiplier: Some(1.3),
            ..StatChange::NONE
        },
    },
    UpgradeSpec {
        name: "Siege Payload",
        cost: 1600,
        changes: StatChange {
            damage_tier: Some(4),
            blast_radius_multiplier: Some(1.2),
            ..StatChange::NONE
        },
    },
];

static CANNON_RATE: [UpgradeSpec; 5] = [
    rate("Greased Breech", 140, 1.2),
    rate("Autoloader", 280, 1.25),
    rate("Rapid Battery", 520, 1.4),
    UpgradeSpec {
        name: "Twin Barrels",
        cost: 950,
        changes: StatChange {
            projectile_count: Some(2),
            ..StatChange::NONE
        },
    },
    rate("Rolling Barrage", 1500, 1.5),
];

static CANNON_RANGE: [UpgradeSpec; 5] = [
    reach("Elevated Mount", 110, 1.15),
    reach("Surveyed Ground", 220, 1.2),
    UpgradeSpec {
        name: "Muzzle Velocity",
        cost: 350,
        changes: StatChange {
            projectile_speed: Some(420.0),
            ..StatChange::NONE
        },
    },
    UpgradeSpec {
        name: "Watchtower Crew",
        cost: 700,
        changes: StatChange {
            range_multiplier: Some(1.25),
            sees_camo: Some(true),
            ..StatChange::NONE
        },
    },
    damage("Precision Fuses", 1200, 3),
];

static SNIPER_CALIBER: [UpgradeSpec; 5] = [
    damage("Full Metal Jacket", 300, 4),
    damage("Large Caliber", 650, 7),
    damage("Anti-Materiel Rifle", 1100, 10),
    damage("Penetrating Rounds", 1800, 14),
    damage("Cross-Map Devastation", 2800, 20),
];

static SNIPER_RATE: [UpgradeSpec; 5] = [
    rate("Smooth Bolt", 250, 1.3),
    rate("Semi-Automatic", 450, 1.4),
    rate("Full Auto Sear", 800, 1.5),
    rate("Supply Crates", 1300, 1.6),
    rate("Elite Marksman", 2200, 1.8),
];

static SNIPER_RECON: [UpgradeSpec; 5] = [
    UpgradeSpec {
        name: "Thermal Scope",
        cost: 200,
        changes: StatChange {
            sees_camo: Some(true),
            ..StatChange::NONE
        },
    },
    UpgradeSpec {
        name: "Shrapnel Shock",
        cost: 400,
        changes: StatChange {
            slow: Some(SlowEffect { duration: 1.0 }),
            ..StatChange::NONE
        },
    },
    rate("Spotter Team", 600, 1.2),
    damage("Maiming Shots", 900, 4),
    UpgradeSpec {
        name: "Cripple Network",
        cost: 1500,
        changes: StatChange {
            slow: Some(SlowEffect { duration: 2.0 }),
            ..StatChange::NONE
        },
    },
];

static FROST_DEPTH: [UpgradeSpec; 5] = [
    UpgradeSpec {
        name: "Lingering Chill",
        cost: 140,
        changes: StatChange {
            slow: Some(SlowEffect { duration: 3.0 }),
            ..StatChange::NONE
        },
    },
    reach("Cold Front", 200, 1.15),
    UpgradeSpec {
        name: "Deep Freeze",
        cost: 380,
        changes: StatChange {
            slow: Some(SlowEffect { duration: 4.0 }),
            ..StatChange::NONE
        },
    },
    damage("Ice Shards", 600, 2),
    UpgradeSpec {
        name: "Absolute Zero",
        cost: 1000,
        changes: StatChange {
            slow: Some(SlowEffect { duration: 5.0 }),
            ..StatChange::NONE
        },
    },
];

static FROST_RATE: [UpgradeSpec; 5] = [
    rate("Brisk Winds", 120, 1.2),
    rate("Hail Volley", 240, 1.3),
    rate("Stormcaller", 420, 1.4),
    UpgradeSpec {
        name: "Twin Flurries",
        cost: 800,
        changes: StatChange {
            projectile_count: Some(2),
            ..StatChange::NONE
        },
    },
    rate("Blizzard Engine", 1300, 1.5),
];

static FROST_SNAP: [UpgradeSpec; 5] = [
    reach("Frost Reach", 100, 1.2),
    UpgradeSpec {
        name: "Glare Filter",
        cost: 260,
        changes: StatChange {
            sees_camo: Some(true),
            ..StatChange::NONE
        },
    },
    UpgradeSpec {
        name: "Cold Snap",
        cost: 700,
        changes: StatChange {
            area_of_effect: Some(true),
            blast_radius: Some(40.0),
            ..StatChange::NONE
        },
    },
    UpgradeSpec {
        name: "Expanding Front",
        cost: 900,
        changes: StatChange {
            blast_radius_multiplier: Some(1.25),
            ..StatChange::NONE
        },
    },
    damage("Glacier Core", 1400, 3),
];

static HARPOON_BARBS: [UpgradeSpec; 5] = [
    damage("Barbed Tips", 180, 2),
    damage("Serrated Tips", 360, 3),
    UpgradeSpec {
        name: "Armor-Splitting Heads",
        cost: 550,
        changes: StatChange {
            pops_lead: Some(true),
            ..StatChange::NONE
        },
    },
    damage("Whale Hunter", 950, 5),
    UpgradeSpec {
        name: "Triple Rack",
        cost: 1500,
        changes: StatChange {
            projectile_count: Some(3),
            ..StatChange::NONE
        },
    },
];

static HARPOON_WINCH: [UpgradeSpec; 5] = [
    rate("Oiled Winch", 160, 1.25),
    rate("Flywheel", 300, 1.3),
    rate("Steam Winch", 560, 1.4),
    rate("Crew Rotation", 1000, 1.5),
    rate("Ballista Drive", 1700, 1.6),
];

static HARPOON_WATCH: [UpgradeSpec; 5] = [
    reach("Crow's Nest", 130, 1.2),
    UpgradeSpec {
        name: "Signal Lamps",
        cost: 280,
        changes: StatChange {
            sees_camo: Some(true),
            ..StatChange::NONE
        },
    },
    reach("Tall Mast", 420, 1.25),
    UpgradeSpec {
        name: "Taut Lines",
        cost: 650,
        changes: StatChange {
            projectile_speed: Some(600.0),
            ..StatChange::NONE
        },
    },
    damage("Leviathan Lance", 1100, 4),
];

impl TowerKind {
    /// Purchase price before the difficulty cost modifier.
    #[must_use]
    pub const fn cost(self) -> u32 {
        match self {
            Self::Dart => 200,
            Self::Cannon => 450,
            Self::Sniper => 350,
            Self::Frost => 300,
            Self::Harpoon => 375,
        }
    }

    /// Combat statistics a freshly placed tower starts with.
    #[must_use]
    pub const fn base_stats(self) -> TowerStats {
        match self {
            Self::Dart => TowerStats {
                range: 150.0,
                attack_rate: 1.0,
                damage_tier: 1,
                ..TowerStats::new()
            },
            Self::Cannon => TowerStats {
                range: 130.0,
                attack_rate: 0.7,
                damage_tier: 1,
                projectile_speed: 300.0,
                blast_radius: 50.0,
                area_of_effect: true,
                pops_lead: true,
                ..TowerStats::new()
            },
            Self::Sniper => TowerStats {
                range: 2000.0,
                attack_rate: 0.5,
                damage_tier: 2,
                hitscan: true,
                pops_lead: true,
                ..TowerStats::new()
            },
            Self::Frost => TowerStats {
                range: 110.0,
                attack_rate: 0.8,
                damage_tier: 1,
                projectile_speed: 350.0,
                slow: Some(SlowEffect { duration: 2.0 }),
                ..TowerStats::new()
            },
            Self::Harpoon => TowerStats {
                range: 140.0,
                attack_rate: 0.9,
                damage_tier: 1,
                projectile_speed: 450.0,
                projectile_count: 2,
                water_only: true,
                ..TowerStats::new()
            },
        }
    }

    /// Upgrade steps along one of the three paths, tier 1 through 5.
    ///
    /// Path indices beyond 2 have no upgrades.
    #[must_use]
    pub fn upgrade_path(self, path: usize) -> Option<&'static [UpgradeSpec]> {
        let specs: &'static [UpgradeSpec] = match (self, path) {
            (Self::Dart, 0) => &DART_POWER,
            (Self::Dart, 1) => &DART_SPEED,
            (Self::Dart, 2) => &DART_SIGHT,
            (Self::Cannon, 0) => &CANNON_BLAST,
            (Self::Cannon, 1) => &CANNON_RATE,
            (Self::Cannon, 2) => &CANNON_RANGE,
            (Self::Sniper, 0) => &SNIPER_CALIBER,
            (Self::Sniper, 1) => &SNIPER_RATE,
            (Self::Sniper, 2) => &SNIPER_RECON,
            (Self::Frost, 0) => &FROST_DEPTH,
            (Self::Frost, 1) => &FROST_RATE,
            (Self::Frost, 2) => &FROST_SNAP,
            (Self::Harpoon, 0) => &HARPOON_BARBS,
            (Self::Harpoon, 1) => &HARPOON_WINCH,
            (Self::Harpoon, 2) => &HARPOON_WATCH,
            _ => return None,
        };
        Some(specs)
    }

    /// Upgrade spec that advances `path` from `tier` to `tier + 1`.
    #[must_use]
    pub fn upgrade_spec(self, path: usize, tier: u8) -> Option<&'static UpgradeSpec> {
        self.upgrade_path(path)?.get(usize::from(tier))
    }
}

/// Axis-aligned water region within a map.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WaterArea {
    /// Left edge in world units.
    pub x: f32,
    /// Top edge in world units.
    pub y: f32,
    /// Width in world units.
    pub width: f32,
    /// Height in world units.
    pub height: f32,
}

impl WaterArea {
    /// Reports whether the given point lies inside the area.
    #[must_use]
    pub fn contains(&self, point: WorldPoint) -> bool {
        point.x() >= self.x
            && point.x() <= self.x + self.width
            && point.y() >= self.y
            && point.y() <= self.y + self.height
    }
}

/// Maps available for play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MapId {
    /// Two winding land routes with a small pond.
    Meadow,
    /// A single long route past an oasis.
    Desert,
    /// A single switchback route across a frozen lake.
    Arctic,
    /// Two converging routes around a lava pool.
    Volcano,
}

/// Immutable description of a playable map.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MapDefinition {
    /// Display name of the map.
    pub name: &'static str,
    /// Enemy routes, each an ordered polyline of at least two waypoints.
    pub paths: &'static [&'static [WorldPoint]],
    /// Water regions constraining tower placement.
    pub water_areas: &'static [WaterArea],
}

static MEADOW_PATH_A: [WorldPoint; 6] = [
    WorldPoint::new(0.0, 200.0),
    WorldPoint::new(300.0, 200.0),
    WorldPoint::new(300.0, 500.0),
    WorldPoint::new(700.0, 500.0),
    WorldPoint::new(700.0, 150.0),
    WorldPoint::new(1150.0, 150.0),
];

static MEADOW_PATH_B: [WorldPoint; 6] = [
    WorldPoint::new(0.0, 560.0),
    WorldPoint::new(450.0, 560.0),
    WorldPoint::new(450.0, 300.0),
    WorldPoint::new(900.0, 300.0),
    WorldPoint::new(900.0, 620.0),
    WorldPoint::new(1150.0, 620.0),
];

static MEADOW_PATHS: [&[WorldPoint]; 2] = [&MEADOW_PATH_A, &MEADOW_PATH_B];
static MEADOW_WATER: [WaterArea; 1] = [WaterArea {
    x: 950.0,
    y: 400.0,
    width: 150.0,
    height: 120.0,
}];

static DESERT_PATH: [WorldPoint; 6] = [
    WorldPoint::new(0.0, 100.0),
    WorldPoint::new(400.0, 100.0),
    WorldPoint::new(400.0, 600.0),
    WorldPoint::new(800.0, 600.0),
    WorldPoint::new(800.0, 250.0),
    WorldPoint::new(1150.0, 250.0),
];

static DESERT_PATHS: [&[WorldPoint]; 1] = [&DESERT_PATH];
static DESERT_WATER: [WaterArea; 1] = [WaterArea {
    x: 150.0,
    y: 350.0,
    width: 180.0,
    height: 140.0,
}];

static ARCTIC_PATH: [WorldPoint; 8] = [
    WorldPoint::new(0.0, 360.0),
    WorldPoint::new(250.0, 360.0),
    WorldPoint::new(250.0, 120.0),
    WorldPoint::new(600.0, 120.0),
    WorldPoint::new(600.0, 600.0),
    WorldPoint::new(950.0, 600.0),
    WorldPoint::new(950.0, 360.0),
    WorldPoint::new(1150.0, 360.0),
];

static ARCTIC_PATHS: [&[WorldPoint]; 1] = [&ARCTIC_PATH];
static ARCTIC_WATER: [WaterArea; 1] = [WaterArea {
    x: 700.0,
    y: 200.0,
    width: 160.0,
    height: 120.0,
}];

static VOLCANO_PATH_A: [WorldPoint; 4] = [
    WorldPoint::new(0.0, 80.0),
    WorldPoint::new(575.0, 80.0),
    WorldPoint::new(575.0, 640.0),
    WorldPoint::new(1150.0, 640.0),
];

static VOLCANO_PATH_B: [WorldPoint; 6] = [
    WorldPoint::new(0.0, 500.0),
    WorldPoint::new(350.0, 500.0),
    WorldPoint::new(350.0, 200.0),
    WorldPoint::new(900.0, 200.0),
    WorldPoint::new(900.0, 500.0),
    WorldPoint::new(1150.0, 500.0),
];

static VOLCANO_PATHS: [&[WorldPoint]; 2] = [&VOLCANO_PATH_A, &VOLCANO_PATH_B];
static VOLCANO_WATER: [WaterArea; 1] = [WaterArea {
    x: 680.0,
    y: 330.0,
    width: 130.0,
    height: 130.0,
}];

impl MapId {
    /// Retrieves the immutable definition for the map.
    #[must_use]
    pub fn definition(self) -> &'static MapDefinition {
        static MEADOW: MapDefinition = MapDefinition {
            name: "Meadow",
            paths: &MEADOW_PATHS,
            water_areas: &MEADOW_WATER,
        };
        static DESERT: MapDefinition = MapDefinition {
            name: "Desert",
            paths: &DESERT_PATHS,
            water_areas: &DESERT_WATER,
        };
        static ARCTIC: MapDefinition = MapDefinition {
            name: "Arctic",
            paths: &ARCTIC_PATHS,
            water_areas: &ARCTIC_WATER,
        };
        static VOLCANO: MapDefinition = MapDefinition {
            name: "Volcano",
            paths: &VOLCANO_PATHS,
            water_areas: &VOLCANO_WATER,
        };
        match self {
            Self::Meadow => &MEADOW,
            Self::Desert => &DESERT,
            Self::Arctic => &ARCTIC,
            Self::Volcano => &VOLCANO,
        }
    }
}

/// One group of identical enemies within a round composition.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CompositionEntry {
    /// Kind of enemy to spawn.
    pub enemy: EnemyKind,
    /// Number of enemies in the group.
    pub count: u32,
    /// Seconds after round start at which the group begins spawning.
    pub window_start: f32,
    /// Seconds after round start by which the group finishes spawning.
    pub window_end: f32,
}

const fn group(enemy: EnemyKind, count: u32, window_start: f32, window_end: f32) -> CompositionEntry {
    CompositionEntry {
        enemy,
        count,
        window_start,
        window_end,
    }
}

static ROUND_1: [CompositionEntry; 1] = [group(EnemyKind::RedTriangle, 10, 0.0, 10.0)];
static ROUND_2: [CompositionEntry; 2] = [
    group(EnemyKind::RedTriangle, 15, 0.0, 8.0),
    group(EnemyKind::BlueSquare, 5, 8.0, 14.0),
];
static ROUND_3: [CompositionEntry; 2] = [
    group(EnemyKind::BlueSquare, 12, 0.0, 10.0),
    group(EnemyKind::GreenPentagon, 4, 10.0, 16.0),
];
static ROUND_4: [CompositionEntry; 2] = [
    group(EnemyKind::GreenPentagon, 10, 0.0, 12.0),
    group(EnemyKind::YellowHexagon, 4, 12.0, 18.0),
];
static ROUND_5: [CompositionEntry; 2] = [
    group(EnemyKind::YellowHexagon, 8, 0.0, 10.0),
    group(EnemyKind::WhiteDecagon, 4, 10.0, 16.0),
];
static ROUND_6: [CompositionEntry; 2] = [
    group(EnemyKind::BlackDodecagon, 6, 0.0, 10.0),
    group(EnemyKind::PinkOctagon, 10, 0.0, 12.0),
];
static ROUND_7: [CompositionEntry; 2] = [
    group(EnemyKind::WhiteDecagon, 8, 0.0, 8.0),
    group(EnemyKind::BlackDodecagon, 8, 8.0, 16.0),
];
static ROUND_8: [CompositionEntry; 2] = [
    group(EnemyKind::CeramicStar, 4, 0.0, 12.0),
    group(EnemyKind::PinkOctagon, 12, 0.0, 12.0),
];
static ROUND_9: [CompositionEntry; 2] = [
    group(EnemyKind::CeramicStar, 8, 0.0, 14.0),
    group(EnemyKind::BlackDodecagon, 10, 4.0, 12.0),
];
static ROUND_10: [CompositionEntry; 2] = [
    group(EnemyKind::ReinforcedStar, 4, 0.0, 16.0),
    group(EnemyKind::CeramicStar, 6, 0.0, 10.0),
];

static ROUNDS: [&[CompositionEntry]; 10] = [
    &ROUND_1, &ROUND_2, &ROUND_3, &ROUND_4, &ROUND_5, &ROUND_6, &ROUND_7, &ROUND_8, &ROUND_9,
    &ROUND_10,
];

/// Composition groups for the given one-based round number.
#[must_use]
pub fn round_composition(round: u32) -> Option<&'static [CompositionEntry]> {
    let index = round.checked_sub(1)?;
    ROUNDS.get(usize::try_from(index).ok()?).copied()
}

/// Highest round number with a defined composition; clearing it wins.
#[must_use]
pub fn final_round() -> u32 {
    ROUNDS.len() as u32
}
