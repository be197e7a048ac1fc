#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative game simulation for Polygon Defence.
//!
//! The [`Engine`] owns all mutable session state: enemies marching along
//! the map paths, towers with their upgrade ladders, in-flight
//! projectiles, visual effects, the economy, and the round lifecycle.
//! Presentation layers drive it with commands and a fixed-order
//! [`Engine::update`] tick, then read back snapshots through the [`query`]
//! accessors; persistence goes through the injected
//! [`SaveStore`](polygon_defence_core::SaveStore) port.

mod effects;
mod enemies;
mod projectiles;
mod towers;
pub mod query;

use std::collections::VecDeque;
use std::time::Duration;

use polygon_defence_core::{
    catalog::{self, Difficulty, DifficultySettings, MapId, TowerKind, UpgradeSpec},
    distance_to_polyline, EnemyId, SaveRecord, SaveStore, SaveStoreError, SoundCue,
    TargetCandidate, TargetPriority, TowerId, WorldPoint,
};
use polygon_defence_system_round_scheduling::{plan_round, SpawnEntry};
use polygon_defence_system_tower_targeting::{TargetSelector, TargetingQuery};

use enemies::{DamageResult, DamageSource, Enemy};
use projectiles::Projectile;
use towers::Tower;

pub use effects::{EffectKind, VisualEffect};

/// Authoritative simulation state for one process lifetime.
///
/// A session begins with [`Engine::start_new_game`] or
/// [`Engine::load_game`] and ends when the player wins, loses, or starts
/// another session. Commands issued outside a session are rejected or
/// ignored rather than panicking.
#[derive(Debug)]
pub struct Engine {
    save_store: Box<dyn SaveStore>,
    map: Option<MapId>,
    difficulty: Difficulty,
    settings: DifficultySettings,
    money: u32,
    lives: u32,
    current_round: u32,
    round_active: bool,
    round_timer: f32,
    auto_start: bool,
    won: bool,
    lost: bool,
    spawn_queue: VecDeque<SpawnEntry>,
    enemies: Vec<Enemy>,
    towers: Vec<Tower>,
    projectiles: Vec<Projectile>,
    effects: Vec<VisualEffect>,
    sound_cues: Vec<SoundCue>,
    selector: TargetSelector,
    candidates: Vec<TargetCandidate>,
    next_enemy_id: u32,
    next_tower_id: u32,
}

impl Engine {
    /// Creates an engine with no active session, persisting through the
    /// provided store.
    #[must_use]
    pub fn new(save_store: Box<dyn SaveStore>) -> Self {
        Self {
            save_store,
            map: None,
            difficulty: Difficulty::Medium,
            settings: Difficulty::Medium.settings(),
            money: 0,
            lives: 0,
            current_round: 0,
            round_active: false,
            round_timer: 0.0,
            auto_start: false,
            won: false,
            lost: false,
            spawn_queue: VecDeque::new(),
            enemies: Vec::new(),
            towers: Vec::new(),
            projectiles: Vec::new(),
            effects: Vec::new(),
            sound_cues: Vec::new(),
            selector: TargetSelector::new(),
            candidates: Vec::new(),
            next_enemy_id: 0,
            next_tower_id: 0,
        }
    }

    /// Resets all session state and begins a fresh game on `map`.
    ///
    /// Money and lives come from the difficulty table; the auto-start
    /// preference survives across sessions.
    pub fn start_new_game(&mut self, map: MapId, difficulty: Difficulty) {
        let settings = difficulty.settings();
        self.map = Some(map);
        self.difficulty = difficulty;
        self.settings = settings;
        self.money = settings.starting_money;
        self.lives = settings.starting_lives;
        self.current_round = 0;
        self.round_active = false;
        self.round_timer = 0.0;
        self.won = false;
        self.lost = false;
        self.spawn_queue.clear();
        self.enemies.clear();
        self.towers.clear();
        self.projectiles.clear();
        self.effects.clear();
        self.sound_cues.clear();
        self.candidates.clear();
        self.next_enemy_id = 0;
        self.next_tower_id = 0;
    }

    /// Begins the next round if no round is running.
    ///
    /// Asking for a round past the final composition is the win
    /// transition: the round counter still advances, the session is
    /// marked won, and the save is removed.
    pub fn start_next_round(&mut self) {
        if self.round_active || self.won || self.lost || self.map.is_none() {
            return;
        }
        self.current_round += 1;
        match plan_round(self.current_round, self.paths().len()) {
            Some(queue) => {
                self.round_timer = 0.0;
                self.spawn_queue = queue.into();
                self.round_active = true;
            }
            None => {
                self.won = true;
                self.save_store.delete();
            }
        }
    }

    /// Advances the simulation by `dt`.
    ///
    /// Phases run in a fixed order: spawning, tower targeting and fire,
    /// enemy movement and leaks, projectile flight and impacts, effect
    /// decay, then round completion. A won or lost session ignores the
    /// tick entirely. The only fallible step is the round-completion
    /// autosave, whose store error propagates to the caller.
    pub fn update(&mut self, dt: Duration) -> Result<(), SaveStoreError> {
        if self.won || self.lost {
            return Ok(());
        }
        let dt = dt.as_secs_f32();
        self.advance_spawns(dt);
        self.drive_towers(dt);
        self.advance_enemies(dt);
        self.advance_projectiles(dt);
        self.effects.retain_mut(|effect| effect.decay(dt));
        self.finish_cleared_round()
    }

    fn paths(&self) -> &'static [&'static [WorldPoint]] {
        self.map.map_or(&[], |map| map.definition().paths)
    }

    fn advance_spawns(&mut self, dt: f32) {
        if !self.round_active {
            return;
        }
        self.round_timer += dt;
        while self
            .spawn_queue
            .front()
            .is_some_and(|entry| entry.spawn_time <= self.round_timer)
        {
            let Some(entry) = self.spawn_queue.pop_front() else {
                break;
            };
            let paths = self.paths();
            if paths.is_empty() {
                continue;
            }
            let path = paths[entry.path_index % paths.len()];
            let id = EnemyId::new(self.next_enemy_id);
            self.next_enemy_id += 1;
            self.enemies.push(Enemy::spawn(
                id,
                entry.enemy,
                path,
                self.settings.enemy_speed_modifier,
            ));
        }
    }

    fn drive_towers(&mut self, dt: f32) {
        for index in 0..self.towers.len() {
            // Candidates are rebuilt per tower: hitscan fire and damage
            // reservations from earlier towers must be visible to later
            // ones within the same tick.
            self.refresh_candidates();
            let tower = &mut self.towers[index];
            tower.tick_cooldown(dt);
            let query = TargetingQuery {
                origin: tower.position,
                range: tower.stats.range,
                sees_camo: tower.stats.sees_camo,
                priority: tower.priority,
            };
            tower.target = self.selector.select(&query, &self.candidates);
            if !tower.ready_to_fire() {
                continue;
            }
            let Some(target) = tower.target else {
                continue;
            };
            tower.reset_cooldown();
            self.sound_cues.push(SoundCue::TowerFired(tower.kind));
            if tower.stats.hitscan {
                if let Some(enemy_index) = find_enemy(&self.enemies, target) {
                    let end = self.enemies[enemy_index].position;
                    let source = DamageSource {
                        pops_lead: tower.stats.pops_lead,
                        slow: tower.stats.slow,
                    };
                    let outcome = strike_enemy(
                        &mut self.enemies,
                        &mut self.next_enemy_id,
                        &mut self.sound_cues,
                        enemy_index,
                        tower.stats.damage_tier,
                        &source,
                    );
                    tower.pop_count += u64::from(outcome.credited);
                    self.effects
                        .push(VisualEffect::line_trail(tower.position, end));
                }
            } else {
                for _ in 0..tower.stats.projectile_count {
                    if let Some(enemy_index) = find_enemy(&self.enemies, target) {
                        let projectile = Projectile::launch(tower, target);
                        self.enemies[enemy_index].incoming_damage += projectile.damage_tier;
                        self.projectiles.push(projectile);
                    }
                }
            }
        }
        self.enemies.retain(|enemy| enemy.active);
    }

    fn refresh_candidates(&mut self) {
        self.candidates.clear();
        for enemy in &self.enemies {
            if !enemy.active {
                continue;
            }
            self.candidates.push(TargetCandidate {
                id: enemy.id,
                position: enemy.position,
                distance_travelled: enemy.distance_travelled,
                tier: enemy.tier,
                incoming_damage: enemy.incoming_damage,
                camouflaged: enemy.camouflaged,
            });
        }
    }

    fn advance_enemies(&mut self, dt: f32) {
        for enemy in &mut self.enemies {
            if enemy.advance(dt) {
                self.lives = self.lives.saturating_sub(enemy.tier);
                if self.lives == 0 && !self.lost {
                    self.lost = true;
                    self.save_store.delete();
                }
            }
        }
        self.enemies.retain(|enemy| enemy.active);
    }

    fn advance_projectiles(&mut self, dt: f32) {
        for index in 0..self.projectiles.len() {
            if !self.projectiles[index].active {
                continue;
            }
            let target = self.projectiles[index].target;
            let Some(target_index) = find_enemy(&self.enemies, target) else {
                // Target already died or leaked; its reservation left
                // the arena with it.
                self.projectiles[index].active = false;
                continue;
            };
            let target_position = self.enemies[target_index].position;
            self.projectiles[index].advance(dt, target_position);
            if self.projectiles[index].collided(target_position) {
                self.resolve_impact(index, target_index);
            }
        }
        self.projectiles.retain(|projectile| projectile.active);
        self.enemies.retain(|enemy| enemy.active);
    }

    fn resolve_impact(&mut self, projectile_index: usize, target_index: usize) {
        let projectile = self.projectiles[projectile_index];
        self.projectiles[projectile_index].active = false;
        self.enemies[target_index].release_incoming(projectile.damage_tier);

        let mut credited = 0u32;
        let mut earned = 0u32;
        if projectile.area_of_effect {
            self.effects.push(VisualEffect::explosion(
                projectile.position,
                projectile.blast_radius,
            ));
            // Children split off mid-blast land past this bound, so one
            // impact damages each enemy at most once.
            let in_blast = self.enemies.len();
            for enemy_index in 0..in_blast {
                if !self.enemies[enemy_index].active {
                    continue;
                }
                let gap = self.enemies[enemy_index]
                    .position
                    .distance_to(projectile.position);
                if gap > projectile.blast_radius {
                    continue;
                }
                let outcome = strike_enemy(
                    &mut self.enemies,
                    &mut self.next_enemy_id,
                    &mut self.sound_cues,
                    enemy_index,
                    projectile.damage_tier,
                    &projectile.source,
                );
                credited += outcome.credited;
                earned = earned.saturating_add(outcome.bounty);
            }
        } else {
            let outcome = strike_enemy(
                &mut self.enemies,
                &mut self.next_enemy_id,
                &mut self.sound_cues,
                target_index,
                projectile.damage_tier,
                &projectile.source,
            );
            credited = outcome.credited;
            earned = outcome.bounty;
        }

        self.money = self.money.saturating_add(earned);
        if let Some(owner) = self
            .towers
            .iter_mut()
            .find(|tower| tower.id == projectile.owner)
        {
            owner.pop_count += u64::from(credited);
        }
    }

    fn finish_cleared_round(&mut self) -> Result<(), SaveStoreError> {
        if self.lost || !self.round_active {
            return Ok(());
        }
        if !self.spawn_queue.is_empty() || !self.enemies.is_empty() {
            return Ok(());
        }
        self.round_active = false;
        self.money = self
            .money
            .saturating_add(catalog::ROUND_CLEAR_BONUS + self.current_round);
        self.save_game()?;
        if self.auto_start {
            self.start_next_round();
        }
        Ok(())
    }

    /// Purchase price of a tower kind under the session difficulty.
    #[must_use]
    pub fn tower_cost(&self, kind: TowerKind) -> u32 {
        (kind.cost() as f32 * self.settings.tower_cost_modifier) as u32
    }

    /// Whether a tower of `kind` may legally stand at `position`.
    ///
    /// Placement requires an active session, a position inside the
    /// playable field, matching terrain (water towers on water, land
    /// towers on land), clearance from every path, and spacing from every
    /// existing tower. Affordability is checked separately at purchase.
    #[must_use]
    pub fn is_valid_placement(&self, kind: TowerKind, position: WorldPoint) -> bool {
        let Some(map) = self.map else {
            return false;
        };
        if position.x() > catalog::PLAYABLE_WIDTH {
            return false;
        }
        let definition = map.definition();
        let on_water = definition
            .water_areas
            .iter()
            .any(|area| area.contains(position));
        if kind.base_stats().water_only != on_water {
            return false;
        }
        for path in definition.paths {
            if distance_to_polyline(path, position) < catalog::PATH_CLEARANCE {
                return false;
            }
        }
        !self
            .towers
            .iter()
            .any(|tower| tower.position.distance_to(position) < catalog::TOWER_SPACING)
    }

    /// Buys and places a tower, deducting its difficulty-adjusted cost.
    ///
    /// Returns `false` without side effects when the placement is invalid
    /// or unaffordable.
    pub fn place_tower(&mut self, kind: TowerKind, position: WorldPoint) -> bool {
        let cost = self.tower_cost(kind);
        if self.money < cost || !self.is_valid_placement(kind, position) {
            return false;
        }
        self.money -= cost;
        let id = TowerId::new(self.next_tower_id);
        self.next_tower_id += 1;
        // Sell value accumulates from the unmodified base price.
        self.towers.push(Tower::place(id, kind, position, kind.cost()));
        self.sound_cues.push(SoundCue::TowerPlaced);
        true
    }

    /// Next upgrade purchasable on `path` for the given tower, if the
    /// ladder and the tower's posture allow one.
    #[must_use]
    pub fn available_upgrade(&self, id: TowerId, path: usize) -> Option<&'static UpgradeSpec> {
        self.towers
            .iter()
            .find(|tower| tower.id == id)?
            .next_upgrade(path)
    }

    /// Buys the next upgrade on `path` for the given tower.
    ///
    /// Returns `false` without side effects when the tower is unknown,
    /// the posture or tier cap forbids the path, or money is short.
    pub fn upgrade_tower(&mut self, id: TowerId, path: usize) -> bool {
        let Some(index) = self.towers.iter().position(|tower| tower.id == id) else {
            return false;
        };
        let Some(spec) = self.towers[index].next_upgrade(path) else {
            return false;
        };
        if self.money < spec.cost {
            return false;
        }
        self.money -= spec.cost;
        self.towers[index].apply_upgrade(path, spec);
        self.sound_cues.push(SoundCue::UpgradeApplied);
        true
    }

    /// Sells a tower, refunding 70% of everything invested in it.
    pub fn sell_tower(&mut self, id: TowerId) -> bool {
        let Some(index) = self.towers.iter().position(|tower| tower.id == id) else {
            return false;
        };
        let tower = self.towers.remove(index);
        self.money = self.money.saturating_add(tower.sell_value());
        self.sound_cues.push(SoundCue::TowerSold);
        true
    }

    /// Sets a tower's targeting priority directly.
    pub fn set_targeting_priority(&mut self, id: TowerId, priority: TargetPriority) -> bool {
        match self.towers.iter_mut().find(|tower| tower.id == id) {
            Some(tower) => {
                tower.priority = priority;
                true
            }
            None => false,
        }
    }

    /// Advances a tower's targeting priority to the next mode, returning
    /// the mode now in effect.
    pub fn cycle_targeting_priority(&mut self, id: TowerId) -> Option<TargetPriority> {
        let tower = self.towers.iter_mut().find(|tower| tower.id == id)?;
        tower.priority = tower.priority.cycled();
        Some(tower.priority)
    }

    /// Enables or disables automatic round starts after each clear.
    pub fn set_auto_start(&mut self, enabled: bool) {
        self.auto_start = enabled;
    }

    /// Persists the current session through the save store.
    ///
    /// Without an active session there is nothing to persist and the call
    /// is a no-op.
    pub fn save_game(&mut self) -> Result<(), SaveStoreError> {
        let Some(map) = self.map else {
            return Ok(());
        };
        let record = SaveRecord {
            map,
            difficulty: self.difficulty,
            money: self.money,
            lives: self.lives,
            current_round: self.current_round,
            towers: self.towers.iter().map(Tower::record).collect(),
        };
        self.save_store.save(&record)
    }

    /// Replaces the current session with the persisted one.
    ///
    /// The engine is left untouched when the store has no record or the
    /// record fails validation, so a failed load never destroys a running
    /// game.
    pub fn load_game(&mut self) -> Result<(), SaveStoreError> {
        let record = self.save_store.load()?;
        let mut towers = Vec::with_capacity(record.towers.len());
        for (index, tower_record) in record.towers.iter().enumerate() {
            let tower =
                Tower::restore(TowerId::new(index as u32), tower_record).ok_or_else(|| {
                    SaveStoreError::Corrupt(format!(
                        "tower {index} lists more upgrades than its paths define"
                    ))
                })?;
            towers.push(tower);
        }
        self.start_new_game(record.map, record.difficulty);
        self.money = record.money;
        self.lives = record.lives;
        self.current_round = record.current_round;
        self.next_tower_id = towers.len() as u32;
        self.towers = towers;
        Ok(())
    }

    /// Removes any persisted session.
    pub fn delete_save(&mut self) {
        self.save_store.delete();
    }

    /// Takes every sound cue buffered since the previous drain.
    pub fn drain_sound_cues(&mut self) -> Vec<SoundCue> {
        std::mem::take(&mut self.sound_cues)
    }
}

fn find_enemy(enemies: &[Enemy], id: EnemyId) -> Option<usize> {
    enemies
        .iter()
        .position(|enemy| enemy.active && enemy.id == id)
}

fn spawn_splits(enemies: &mut Vec<Enemy>, next_enemy_id: &mut u32, parent_index: usize) {
    let seed = enemies[parent_index].split_seed();
    let splits = enemies[parent_index].splits;
    for &(kind, count) in splits {
        for _ in 0..count {
            let id = EnemyId::new(*next_enemy_id);
            *next_enemy_id += 1;
            enemies.push(Enemy::split_child(id, kind, seed));
        }
    }
}

struct StrikeOutcome {
    /// Damage tiers actually removed, credited to the attacking tower.
    credited: u32,
    /// Bounty of the struck enemy, read after any mutation.
    bounty: u32,
}

/// Applies one hit to one enemy, emitting the pop cue when damage lands
/// and spawning split children when the hit kills. A blocked or
/// shield-absorbed hit stays silent.
fn strike_enemy(
    enemies: &mut Vec<Enemy>,
    next_enemy_id: &mut u32,
    cues: &mut Vec<SoundCue>,
    index: usize,
    damage: u32,
    source: &DamageSource,
) -> StrikeOutcome {
    let result = enemies[index].receive_damage(damage, source);
    let bounty = enemies[index].bounty;
    match result {
        DamageResult::Immune => StrikeOutcome {
            credited: 0,
            bounty,
        },
        DamageResult::ShieldBroken => StrikeOutcome {
            credited: 0,
            bounty,
        },
        DamageResult::Damaged { popped, killed } => {
            cues.push(SoundCue::EnemyPopped);
            if killed {
                spawn_splits(enemies, next_enemy_id, index);
            }
            StrikeOutcome {
                credited: popped,
                bounty,
            }
        }
    }
}
