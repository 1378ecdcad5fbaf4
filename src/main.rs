//! Cube Maze entry point
//!
//! Native headless runner: no window, no renderer. Drives one session with
//! an autopilot that walks the carved route in top-down mode and reports
//! how it went.
//!
//! Usage: `cube-maze [seed] [max_ticks]`, optional `CUBE_MAZE_CONFIG=path.json`.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use glam::Vec3;

    use cube_maze::camera::CameraRig;
    use cube_maze::controls::{InputState, KeyBindings};
    use cube_maze::hud::{HudStatus, camera_mode_label};
    use cube_maze::sim::{CameraMode, GameEvent, GamePhase, GameState, tick};
    use cube_maze::{ConfigError, GameConfig};

    /// Distance at which a waypoint counts as reached
    const WAYPOINT_TOLERANCE: f32 = 0.25;

    /// Game instance holding all state
    struct Game {
        state: GameState,
        camera: CameraRig,
        input: InputState,
        keys: KeyBindings,
        /// Index of the next path cell the autopilot heads for
        waypoint: usize,
    }

    impl Game {
        fn new(state: GameState) -> Self {
            let camera = CameraRig::new(state.player.pos);
            Self {
                state,
                camera,
                input: InputState::default(),
                keys: KeyBindings::default(),
                waypoint: 1,
            }
        }

        fn press(&mut self, code: &str, down: bool) {
            if down {
                self.input.key_down(&self.keys, code);
            } else {
                self.input.key_up(&self.keys, code);
            }
        }

        /// Steer toward the next path cell using top-down key semantics
        fn autopilot(&mut self) {
            if self.state.camera_mode != CameraMode::TopDown {
                self.press("KeyC", true);
                self.press("KeyC", false);
            }

            let level = &self.state.level;
            let pos = self.state.player.pos;
            let Some(&cell) = level.path.cells.get(self.waypoint) else {
                self.input.release_all();
                return;
            };
            let (wx, wz) = level.mapper.grid_to_world(cell);
            let delta = Vec3::new(wx - pos.x, 0.0, wz - pos.z);

            if delta.x.abs() < WAYPOINT_TOLERANCE && delta.z.abs() < WAYPOINT_TOLERANCE {
                self.waypoint += 1;
            }

            // Top-down: left key is +X, forward is -Z
            self.press("KeyA", delta.x > WAYPOINT_TOLERANCE);
            self.press("KeyD", delta.x < -WAYPOINT_TOLERANCE);
            self.press("KeyW", delta.z < -WAYPOINT_TOLERANCE);
            self.press("KeyS", delta.z > WAYPOINT_TOLERANCE);
        }

        /// One display frame: input, simulation, camera, events
        fn frame(&mut self) {
            self.autopilot();
            let input = self.input.take_tick_input(self.camera.forward());
            tick(&mut self.state, &input);
            self.camera.update(
                self.state.camera_mode,
                self.state.player.pos,
                self.state.config.cube_size,
            );

            for event in self.state.drain_events() {
                match event {
                    GameEvent::CameraModeChanged(mode) => {
                        log::info!("{}", camera_mode_label(mode));
                    }
                    GameEvent::Restarted { .. } => self.waypoint = 1,
                    GameEvent::Won | GameEvent::Lost { .. } => {
                        log::info!("{}", HudStatus::from_phase(self.state.phase).text());
                    }
                }
            }
        }
    }

    fn load_config() -> GameConfig {
        let Ok(path) = std::env::var("CUBE_MAZE_CONFIG") else {
            return GameConfig::default();
        };
        let json = match std::fs::read_to_string(&path) {
            Ok(json) => json,
            Err(e) => {
                log::error!("Failed to read config {}: {}", path, e);
                return GameConfig::default();
            }
        };
        match GameConfig::from_json(&json) {
            Ok(config) => config,
            Err(ConfigError::Parse(e)) => {
                log::error!("Ignoring malformed config {}: {}", path, e);
                GameConfig::default()
            }
            Err(e @ ConfigError::Invalid { .. }) => {
                log::error!("Ignoring config {}: {}", path, e);
                GameConfig::default()
            }
        }
    }

    pub fn run() {
        env_logger::init();
        log::info!("Cube Maze (headless) starting...");

        let mut args = std::env::args().skip(1);
        let seed: Option<u64> = args.next().and_then(|s| s.parse().ok());
        let max_ticks: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(60 * 120);

        let config = load_config();
        let state = match seed {
            Some(seed) => GameState::with_config(seed, config),
            None => GameState::from_entropy(config),
        };
        let mut game = Game::new(state);
        while game.state.phase == GamePhase::Playing && game.state.time_ticks < max_ticks {
            game.frame();
        }

        let state = &game.state;
        let outcome = match state.phase {
            GamePhase::Playing => "timed out",
            GamePhase::Won => "won",
            GamePhase::Lost => "lost",
        };
        println!(
            "seed {}: {} after {} ticks ({} obstacles, path {} cells, reached waypoint {})",
            state.seed,
            outcome,
            state.time_ticks,
            state.level.obstacles.len(),
            state.level.path.len(),
            game.waypoint.min(state.level.path.len()),
        );
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    native::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No web frontend; the library is the product on wasm32
}
