//! Top-level state machine: owns the world and the player and drives one
//! update per frame.
//!
//! `Playing` runs movement, the collision sweep, effects and level changes.
//! `GameOver` runs a reduced loop in a screen-space room: the lantern player
//! walks around until it touches the heart, which rebuilds everything from
//! level 1.

use rand::Rng;
use tracing::info;

use crate::config::GameConfig;
use crate::entities::{FloatText, GameEvent, GameState, Heart, Player, PortalPopup};
use crate::error::Result;
use crate::input::InputSource;
use crate::interaction::{check_collisions, touches};
use crate::level::MapProvider;
use crate::motion::update_player;
use crate::world::World;

pub const FIRST_LEVEL: u32 = 1;

/// The game-over room: a fresh player and the restart marker.
#[derive(Clone, Debug, PartialEq)]
pub struct GameOverScene {
    pub player: Player,
    pub heart: Heart,
}

/// Summary of one update.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameReport {
    pub state: GameState,
    pub level: u32,
    pub events: Vec<GameEvent>,
}

pub struct Game<M: MapProvider> {
    config: GameConfig,
    maps: M,
    state: GameState,
    level: u32,
    world: World,
    player: Player,
    float_texts: Vec<FloatText>,
    popup: Option<PortalPopup>,
    game_over: Option<GameOverScene>,
    frame: u64,
    /// Events raised outside `update`, delivered with the next report.
    pending: Vec<GameEvent>,
}

impl<M: MapProvider> Game<M> {
    /// Validate the configuration and load the first level.
    pub fn new(config: GameConfig, maps: M, rng: &mut impl Rng) -> Result<Self> {
        config.validate()?;
        let mut events = Vec::new();
        let (world, player) = build_level(&config, &maps, FIRST_LEVEL, rng, &mut events)?;
        Ok(Game {
            config,
            maps,
            state: GameState::Playing,
            level: FIRST_LEVEL,
            world,
            player,
            float_texts: Vec::new(),
            popup: None,
            game_over: None,
            frame: 0,
            pending: events,
        })
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn float_texts(&self) -> &[FloatText] {
        &self.float_texts
    }

    pub fn popup(&self) -> Option<&PortalPopup> {
        self.popup.as_ref()
    }

    pub fn game_over_scene(&self) -> Option<&GameOverScene> {
        self.game_over.as_ref()
    }

    pub fn game_over_scene_mut(&mut self) -> Option<&mut GameOverScene> {
        self.game_over.as_mut()
    }

    /// Frames updated since the game was created.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Events not yet handed out, such as the first level's load. The next
    /// `update` reports them ahead of its own.
    pub fn pending_events(&self) -> &[GameEvent] {
        &self.pending
    }

    pub fn take_pending_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.pending)
    }

    // ── Update ────────────────────────────────────────────────────────────────

    /// Advance one frame. Errors only on configuration defects, such as a
    /// portal leading to a level that does not exist.
    pub fn update(&mut self, input: &impl InputSource, rng: &mut impl Rng) -> Result<FrameReport> {
        self.frame += 1;
        let mut events = std::mem::take(&mut self.pending);
        match self.state {
            GameState::Playing => self.update_playing(input, rng, &mut events)?,
            GameState::GameOver => self.update_game_over(input, rng, &mut events)?,
        }
        Ok(FrameReport {
            state: self.state,
            level: self.level,
            events,
        })
    }

    fn update_playing(
        &mut self,
        input: &impl InputSource,
        rng: &mut impl Rng,
        events: &mut Vec<GameEvent>,
    ) -> Result<()> {
        update_player(
            &mut self.player,
            input,
            self.config.player.speed,
            self.world.solids(),
            self.world.bounds(),
        );

        let outcome = check_collisions(
            &mut self.world,
            &self.player,
            &self.config.hitboxes,
            self.config.collection_threshold,
            rng,
        );

        let fx = &self.config.effects;
        let anchor = (
            self.player.x + fx.float_text_offset_x,
            self.player.y + fx.float_text_offset_y,
        );
        for _ in 0..outcome.collected {
            self.add_float_text(anchor.0, anchor.1);
        }
        if outcome.threshold_reached {
            self.start_portal_popup();
        }
        events.extend(outcome.events);

        if outcome.hazard_hit {
            self.enter_game_over();
            return Ok(());
        }

        self.update_float_texts();
        self.update_portal_popup();
        self.world.update_enemies();

        if outcome.portal_entered {
            self.load_level(self.level + 1, rng, events)?;
        }
        Ok(())
    }

    fn update_game_over(
        &mut self,
        input: &impl InputSource,
        rng: &mut impl Rng,
        events: &mut Vec<GameEvent>,
    ) -> Result<()> {
        let arena = (self.config.game_over.screen_w, self.config.game_over.screen_h);
        let touched = match self.game_over.as_mut() {
            Some(scene) => {
                update_player(&mut scene.player, input, self.config.player.speed, &[], arena);
                touches(&scene.player, &scene.heart, &self.config.hitboxes)
            }
            None => false,
        };
        if touched {
            self.restart(rng, events)?;
        }
        Ok(())
    }

    // ── Transitions ───────────────────────────────────────────────────────────

    /// Replace the world with `level` and put a fresh player at its spawn.
    pub fn load_level(
        &mut self,
        level: u32,
        rng: &mut impl Rng,
        events: &mut Vec<GameEvent>,
    ) -> Result<()> {
        let (world, player) = build_level(&self.config, &self.maps, level, rng, events)?;
        self.world = world;
        self.player = player;
        self.level = level;
        self.float_texts.clear();
        self.popup = None;
        Ok(())
    }

    fn enter_game_over(&mut self) {
        let go = &self.config.game_over;
        let heart_w = self.config.hitboxes.heart.sprite_w;
        self.game_over = Some(GameOverScene {
            player: Player::lantern(go.player_x, go.player_y, &self.config.player),
            heart: Heart {
                x: go.screen_w / 2.0 - heart_w / 2.0,
                y: go.heart_y,
            },
        });
        self.state = GameState::GameOver;
        info!(level = self.level, frame = self.frame, "game over");
    }

    /// Rebuild everything from the first level.
    pub fn restart(&mut self, rng: &mut impl Rng, events: &mut Vec<GameEvent>) -> Result<()> {
        events.push(GameEvent::Restarted);
        self.load_level(FIRST_LEVEL, rng, events)?;
        self.game_over = None;
        self.state = GameState::Playing;
        info!("game restarted");
        Ok(())
    }

    // ── Effects ───────────────────────────────────────────────────────────────

    fn add_float_text(&mut self, x: f32, y: f32) {
        self.float_texts.push(FloatText {
            text: "+1".to_string(),
            x,
            y,
            life: self.config.effects.float_text_life,
            alpha: 1.0,
        });
    }

    fn update_float_texts(&mut self) {
        let fx = &self.config.effects;
        for ft in &mut self.float_texts {
            ft.y -= fx.float_text_rise;
            ft.life = ft.life.saturating_sub(1);
            ft.alpha = (ft.alpha - fx.float_text_fade).max(0.0);
        }
        self.float_texts.retain(|ft| ft.life > 0);
    }

    fn start_portal_popup(&mut self) {
        let (x, y) = self
            .world
            .last_collected
            .unwrap_or((self.player.x, self.player.y));
        self.popup = Some(PortalPopup {
            x,
            y,
            timer: self.config.effects.portal_popup_frames,
            alpha: 0.0,
        });
    }

    fn update_portal_popup(&mut self) {
        let fx = &self.config.effects;
        let expired = match self.popup.as_mut() {
            Some(popup) => {
                popup.timer = popup.timer.saturating_sub(1);
                popup.alpha = (popup.alpha + fx.portal_popup_fade_in).min(1.0);
                popup.y -= fx.portal_popup_rise;
                popup.timer == 0
            }
            None => false,
        };
        if expired {
            self.popup = None;
        }
    }
}

/// Load a level's map, populate it and create the player at its spawn point.
fn build_level<M: MapProvider>(
    config: &GameConfig,
    maps: &M,
    level: u32,
    rng: &mut impl Rng,
    events: &mut Vec<GameEvent>,
) -> Result<(World, Player)> {
    let level_cfg = config.level(level)?;
    let map = maps.load(level)?;
    let mut world = World::from_map(map);

    let (x, y) = level_cfg.spawn.unwrap_or((
        world.width / 2.0 - config.player.sprite_w / 2.0,
        world.height / 2.0 - config.player.sprite_h / 2.0,
    ));
    let player = Player::new(x, y, &config.player);

    // Nothing spawns on top of the player.
    world.reserve_area(&player.hitbox());
    world.spawn_items(level_cfg.good_items, level_cfg.bad_items, rng);
    let spawned = world.spawn_enemies(level_cfg.enemies, rng);
    if spawned < level_cfg.enemies {
        events.push(GameEvent::EnemySpawnSkipped {
            requested: level_cfg.enemies,
            spawned,
        });
    }

    events.push(GameEvent::LevelLoaded { level });
    info!(
        level,
        items = world.items.len(),
        hazards = world.hazards.len(),
        enemies = world.enemies.len(),
        "level loaded"
    );
    Ok((world, player))
}
