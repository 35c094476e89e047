//! Game session: phase machine plus the driver's simulation hooks
//!
//! Menu -> Stage on confirm. Stage -> Result when the clock runs out (win)
//! or the player dies (lose); the world is halted at that point so the
//! collision pass, AI, weapon and controls stand down. Confirm in Result
//! starts a fresh run with a new registry.

use glam::Vec2;

use super::clock::RunClock;
use super::control::SharedPosition;
use super::factory::{EntityFactory, Images};
use super::hud::Hud;
use super::rules::{EnemyContact, ObstacleBlock, ProjectileHit};
use super::spawner::EnemySpawner;
use super::state::{GamePhase, Outcome};
use super::stats::Stats;
use crate::audio::AudioManager;
use crate::ecs::EntityId;
use crate::platform::{Action, AudioBackend, ImageSource, InputSnapshot, InputState, RenderTarget};
use crate::settings::Settings;
use crate::sim::{GameEvent, Simulation, World};

/// Rock positions relative to the arena centre
const ROCK_OFFSETS: [Vec2; 3] = [
    Vec2::new(-200.0, -120.0),
    Vec2::new(220.0, 90.0),
    Vec2::new(-60.0, 180.0),
];

pub struct Session<A: AudioBackend> {
    settings: Settings,
    phase: GamePhase,
    world: World,
    factory: EntityFactory,
    spawner: EnemySpawner,
    clock: RunClock,
    hud: Hud,
    audio: AudioManager<A>,
    input: InputSnapshot,
    confirm_held: bool,
    player_position: SharedPosition,
    player: Option<EntityId>,
    runs: u32,
}

impl<A: AudioBackend> Session<A> {
    pub fn new(settings: Settings, images: &mut dyn ImageSource, audio: A) -> Self {
        let factory = EntityFactory::new(Images::load(images), &settings);
        let audio = AudioManager::new(audio, &settings.audio);
        Self {
            spawner: EnemySpawner::new(&settings.gameplay),
            clock: RunClock::new(settings.gameplay.time_limit),
            hud: Hud::new(settings.gameplay.player_health),
            world: World::new(),
            phase: GamePhase::Menu,
            factory,
            audio,
            input: InputSnapshot::default(),
            confirm_held: false,
            player_position: SharedPosition::default(),
            player: None,
            runs: 0,
            settings,
        }
    }

    /// Input used by every step until the next call
    pub fn set_input(&mut self, input: InputSnapshot) {
        self.input = input;
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.clock.outcome()
    }

    pub fn is_halted(&self) -> bool {
        self.world.halted
    }

    pub fn score(&self) -> i32 {
        self.hud.score()
    }

    pub fn player_health(&self) -> i32 {
        self.hud.health()
    }

    pub fn player(&self) -> Option<EntityId> {
        self.player
    }

    pub fn clock(&self) -> &RunClock {
        &self.clock
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn waves(&self) -> u32 {
        self.spawner.waves()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn audio(&self) -> &AudioManager<A> {
        &self.audio
    }

    pub fn audio_mut(&mut self) -> &mut AudioManager<A> {
        &mut self.audio
    }

    /// Begin a run on a fresh world
    pub fn start(&mut self) {
        self.runs += 1;
        self.world = World::new();
        self.world.add_rule(EnemyContact);
        self.world.add_rule(ObstacleBlock);
        self.world.add_rule(ProjectileHit);

        let gameplay = &self.settings.gameplay;
        // Later runs reseed so every restart plays differently but reproducibly
        let mut wave_settings = *gameplay;
        wave_settings.seed = gameplay.seed.wrapping_add(u64::from(self.runs - 1));
        self.spawner = EnemySpawner::new(&wave_settings);
        self.hud = Hud::new(gameplay.player_health);
        self.clock = RunClock::new(gameplay.time_limit);

        let center = self.settings.arena.center();
        self.player_position = SharedPosition::default();
        let player = self
            .factory
            .spawn_player(&mut self.world.registry, center, &self.player_position);
        self.player = Some(player);
        for offset in ROCK_OFFSETS {
            self.factory
                .spawn_obstacle(&mut self.world.registry, center + offset);
        }

        self.clock.start();
        self.spawn_due_waves();
        self.audio.clear();
        self.audio.play_music();
        self.phase = GamePhase::Stage;
        log::info!("Run {} started", self.runs);
    }

    fn spawn_due_waves(&mut self) {
        while let Some(wave) = self.spawner.poll(self.clock.elapsed()) {
            self.spawner.spawn(
                wave,
                &mut self.world.registry,
                &self.factory,
                &self.player_position,
            );
        }
    }

    fn finish(&mut self, outcome: Outcome) {
        self.world.halted = true;
        self.phase = GamePhase::Result;
        log::info!(
            "Run {} over: {} score {} at {}",
            self.runs,
            outcome.banner(),
            self.hud.score(),
            self.clock.display()
        );
    }

    fn player_alive(&self) -> bool {
        self.player
            .and_then(|id| self.world.registry.get(id))
            .and_then(|player| player.try_get::<Stats>())
            .is_some_and(|stats| !stats.is_dead())
    }

    /// Rising edge of the confirm button, tracked across steps
    fn confirm_pressed(&mut self) -> bool {
        let held = self.input.is_held(Action::Confirm);
        let pressed = held && !self.confirm_held;
        self.confirm_held = held;
        pressed
    }

    fn handle_event(&mut self, event: GameEvent) {
        self.hud.apply(&event);
        match event {
            GameEvent::Sound(effect) => self.audio.play(effect),
            GameEvent::PlayerDown => {
                if let Some(outcome) = self.clock.player_down() {
                    self.finish(outcome);
                }
            }
            GameEvent::ScoreChanged(_) | GameEvent::PlayerHealthChanged(_) | GameEvent::EnemyDown(_) => {}
        }
    }
}

impl<A: AudioBackend> Simulation for Session<A> {
    fn refresh(&mut self) {
        self.world.refresh();
    }

    fn collide(&mut self) {
        if self.phase == GamePhase::Stage {
            self.world.collide();
        }
    }

    fn update(&mut self, dt: f32) {
        match self.phase {
            GamePhase::Menu => {
                if self.confirm_pressed() {
                    self.start();
                }
            }
            GamePhase::Result => {
                if self.confirm_pressed() {
                    self.start();
                } else {
                    // Halted: capabilities stand down but timers keep running
                    self.world.update(dt, &self.input);
                }
            }
            GamePhase::Stage => {
                self.confirm_pressed();
                self.world.update(dt, &self.input);
                // A death queued this step beats the clock running out
                if !self.world.halted && self.player_alive() {
                    match self.clock.tick(dt) {
                        Some(outcome) => self.finish(outcome),
                        None => self.spawn_due_waves(),
                    }
                }
            }
        }
    }

    fn end_step(&mut self) {
        self.world.apply_commands();
        for event in self.world.take_events() {
            self.handle_event(event);
        }
        self.audio.update();
    }

    fn render(&self, target: &mut dyn RenderTarget) {
        if self.phase != GamePhase::Menu {
            self.world.render(target);
        }
        let arena = Vec2::new(self.settings.arena.width, self.settings.arena.height);
        self.hud.render(target, self.phase, &self.clock, arena);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::enemy::MoveStyle;
    use crate::game::groups;
    use crate::platform::{HeadlessImages, NullAudio, NullTarget, RecordingTarget};
    use crate::sim::{FixedStepDriver, StepConfig, UpdateMode};

    fn session(settings: Settings) -> Session<NullAudio> {
        Session::new(settings, &mut HeadlessImages::new(), NullAudio::new())
    }

    fn confirm() -> InputSnapshot {
        InputSnapshot::new().with(Action::Confirm)
    }

    fn driver() -> FixedStepDriver {
        FixedStepDriver::new(StepConfig {
            step: 0.02,
            max_steps: 200,
            mode: UpdateMode::Fixed,
        })
    }

    #[test]
    fn test_confirm_starts_run() {
        let mut s = session(Settings::default());
        let mut d = driver();
        let mut target = RecordingTarget::default();

        d.frame(&mut s, 0.02, &mut target);
        assert_eq!(s.phase(), GamePhase::Menu);
        assert!(target.has_text("Press Enter"));

        s.set_input(confirm());
        d.frame(&mut s, 0.02, &mut target);
        assert_eq!(s.phase(), GamePhase::Stage);
        assert_eq!(s.waves(), 1);
        assert_eq!(s.world().registry.by_group(groups::ENEMY).len(), 5);
        assert_eq!(s.world().registry.by_group(groups::OBSTACLE).len(), 3);
        assert_eq!(s.world().registry.by_group(groups::PLAYER).len(), 1);
    }

    #[test]
    fn test_time_limit_wins_and_halts() {
        let mut settings = Settings::default();
        settings.gameplay.time_limit = 0.1;
        let mut s = session(settings);
        s.set_input(confirm());
        s.update(0.02);
        assert_eq!(s.phase(), GamePhase::Stage);

        // Keep the player out of harm's way
        let player = s.player().unwrap();
        s.world_mut().registry.get_mut(player).unwrap().get_mut::<Stats>().health = 1000;

        let mut d = driver();
        d.frame(&mut s, 0.2, &mut RecordingTarget::default());
        assert_eq!(s.outcome(), Some(Outcome::Win));
        assert_eq!(s.phase(), GamePhase::Result);
        assert!(s.is_halted());
    }

    #[test]
    fn test_death_on_final_step_loses() {
        let mut settings = Settings::default();
        settings.gameplay.time_limit = 0.04;
        let mut s = session(settings);
        let mut d = driver();
        s.set_input(confirm());
        d.frame(&mut s, 0.02, &mut NullTarget);
        d.frame(&mut s, 0.02, &mut NullTarget);
        assert_eq!(s.phase(), GamePhase::Stage);

        let player = s.player().unwrap();
        s.world_mut().registry.get_mut(player).unwrap().get_mut::<Stats>().health = 1;
        let at = s.player_position.get();
        s.factory
            .spawn_enemy(&mut s.world.registry, at, MoveStyle::Chase, &s.player_position);

        d.frame(&mut s, 0.02, &mut NullTarget);
        assert_eq!(s.outcome(), Some(Outcome::Lose));
        assert_eq!(s.phase(), GamePhase::Result);
        assert_eq!(s.player_health(), 0);
    }

    #[test]
    fn test_player_down_loses() {
        let mut s = session(Settings::default());
        s.set_input(confirm());
        s.update(0.02);
        s.set_input(InputSnapshot::new());

        s.world_mut().events.push(GameEvent::PlayerDown);
        s.end_step();
        assert_eq!(s.outcome(), Some(Outcome::Lose));
        assert_eq!(s.player_health(), 0);

        let mut target = RecordingTarget::default();
        s.render(&mut target);
        assert!(target.has_text("You Lose!"));
    }

    #[test]
    fn test_confirm_in_result_restarts_fresh() {
        let mut s = session(Settings::default());
        s.set_input(confirm());
        s.update(0.02);
        s.world_mut().events.push(GameEvent::ScoreChanged(3));
        s.world_mut().events.push(GameEvent::PlayerDown);
        s.end_step();
        assert_eq!(s.phase(), GamePhase::Result);

        // Confirm still held from the first press: no restart
        s.update(0.02);
        assert_eq!(s.phase(), GamePhase::Result);

        s.set_input(InputSnapshot::new());
        s.update(0.02);
        s.set_input(confirm());
        s.update(0.02);
        assert_eq!(s.phase(), GamePhase::Stage);
        assert!(!s.is_halted());
        assert_eq!(s.score(), 0);
        assert_eq!(s.outcome(), None);
    }

    #[test]
    fn test_sound_events_reach_audio() {
        let mut s = session(Settings::default());
        s.set_input(confirm());
        s.update(0.02);
        let before = s.audio().backend().played.len();

        s.world_mut()
            .events
            .push(GameEvent::Sound(crate::audio::SoundEffect::Shoot));
        s.end_step();
        assert_eq!(s.audio().backend().played.len(), before + 1);
    }
}
