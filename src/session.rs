//! Tick driver
//!
//! Owns the world on behalf of a frontend: applies queued input events,
//! handles pause, advances one tick per frame and brings downed players back
//! after a delay (clearing the board and docking a third of the score).

use std::collections::BTreeMap;

use crate::settings::Settings;
use crate::sim::{World, fixed};
use crate::snapshot::WorldSnapshot;

/// Input events for a single frame, applied in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Pointer position in application units
    PointerMoved { x: i64, y: i64 },
    /// Flip the local player between attracting and repelling
    TogglePull,
    /// Pause or resume
    TogglePause,
    /// Stop the session
    Quit,
}

/// What a call to [`Session::step`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// One tick was simulated
    Advanced,
    /// Paused; nothing was simulated
    Paused,
    /// A quit event was received; nothing was simulated
    Quit,
}

/// A running game with one locally controlled player
#[derive(Debug, Clone)]
pub struct Session {
    world: World,
    player_id: u32,
    paused: bool,
    revive_delay: u32,
    /// Unpaused frames each downed player has waited, by player id
    downed_ticks: BTreeMap<u32, u32>,
}

impl Session {
    pub fn new(settings: &Settings) -> Self {
        let seed = settings.seed_or_entropy();
        let mut world = World::new(
            fixed(settings.arena_width),
            fixed(settings.arena_height),
            seed,
        );
        let (x, y) = settings.start_position();
        let player_id = world.spawn_player(fixed(x), fixed(y));

        log::info!(
            "Session started: arena {}x{}, seed {}",
            settings.arena_width,
            settings.arena_height,
            seed
        );

        Self {
            world,
            player_id,
            paused: false,
            revive_delay: settings.revive_delay_ticks,
            downed_ticks: BTreeMap::new(),
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn player_id(&self) -> u32 {
        self.player_id
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Frames the given player has been down, `None` unless it is downed
    pub fn downed_ticks(&self, id: u32) -> Option<u32> {
        self.downed_ticks.get(&id).copied()
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        self.world.snapshot()
    }

    /// Run one frame: revival bookkeeping, input, then a tick unless paused
    pub fn step(&mut self, events: &[InputEvent]) -> StepOutcome {
        if !self.paused {
            self.handle_downed();
        }

        for event in events {
            match *event {
                InputEvent::Quit => {
                    log::info!("Quit at frame {}", self.world.frame);
                    return StepOutcome::Quit;
                }
                InputEvent::TogglePause => {
                    self.paused = !self.paused;
                    log::info!("{}", if self.paused { "Paused" } else { "Resumed" });
                }
                // Only pause and quit get through while paused
                _ if self.paused => {}
                InputEvent::PointerMoved { x, y } => {
                    self.world.set_player_position(self.player_id, fixed(x), fixed(y));
                }
                InputEvent::TogglePull => {
                    self.world.toggle_pull(self.player_id);
                }
            }
        }

        if self.paused {
            return StepOutcome::Paused;
        }

        self.world.advance();
        StepOutcome::Advanced
    }

    /// While anyone is down the board stays empty; each player whose delay
    /// has run out is revived at a cost of a third of the score
    fn handle_downed(&mut self) {
        if self.world.downed.is_empty() {
            self.downed_ticks.clear();
            return;
        }

        self.world.clear_board();

        let downed = &self.world.downed;
        self.downed_ticks.retain(|id, _| downed.iter().any(|p| p.id == *id));

        let mut ready = Vec::new();
        for player in downed {
            let ticks = self.downed_ticks.entry(player.id).or_insert(0);
            *ticks += 1;
            if *ticks >= self.revive_delay {
                ready.push(player.id);
            }
        }

        for id in ready {
            self.downed_ticks.remove(&id);
            self.world.score = self.world.score * 2 / 3;
            self.world.revive(id);
            log::info!(
                "Player {} revived at frame {}, score now {}",
                id,
                self.world.frame,
                self.world.score
            );
        }
    }
}
