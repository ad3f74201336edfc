//! Side Shooter headless runner
//!
//! Plays a seeded session with a scripted pilot and reports the outcome.
//! Useful for tuning difficulty presets and reproducing runs by seed.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::fs;
    use std::path::PathBuf;

    use anyhow::{Context, Result, anyhow};
    use clap::Parser;

    use side_shooter::audio::AudioManager;
    use side_shooter::consts::TICK_RATE;
    use side_shooter::sim::{GameEvent, GameState, RenderSnapshot, TickInput, tick};
    use side_shooter::{DifficultyConfig, DifficultyLevel};

    /// Pilot fires every this many ticks
    const FIRE_CADENCE: u64 = 8;
    /// Hostile bullets closer than this (horizontally) are dodged
    const DODGE_RANGE: f32 = 120.0;

    #[derive(Parser, Debug)]
    #[command(name = "side-shooter")]
    #[command(about = "Run a seeded side-scroller session headless with a scripted pilot")]
    struct Cli {
        #[arg(long, default_value_t = 1)]
        seed: u64,
        /// Maximum ticks to simulate
        #[arg(long, default_value_t = 18_000)]
        frames: u64,
        /// Preset: easy, normal or hard
        #[arg(long, default_value = "normal")]
        difficulty: String,
        /// JSON difficulty config (overrides --difficulty)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Print the final render snapshot as JSON
        #[arg(long)]
        snapshot: bool,
    }

    fn load_config(cli: &Cli) -> Result<DifficultyConfig> {
        if let Some(path) = &cli.config {
            let json = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            let config = DifficultyConfig::from_json(&json)
                .with_context(|| format!("parsing config {}", path.display()))?;
            return Ok(config);
        }

        let level = DifficultyLevel::from_str(&cli.difficulty)
            .ok_or_else(|| anyhow!("unknown difficulty '{}'", cli.difficulty))?;
        Ok(level.config())
    }

    /// Line up with the current target and sidestep incoming fire
    fn pilot(state: &GameState) -> TickInput {
        let ship = state.player.rect().center();

        let threat = state
            .enemy_bullets
            .iter()
            .filter(|b| b.pos.x > ship.x && b.pos.x - ship.x < DODGE_RANGE)
            .find(|b| (b.pos.y - ship.y).abs() < 20.0);

        let target_y = match (threat, &state.boss) {
            (Some(bullet), _) => {
                if bullet.pos.y > ship.y {
                    ship.y - 40.0
                } else {
                    ship.y + 40.0
                }
            }
            (None, Some(boss)) => boss.rect().center().y,
            (None, None) => state
                .enemies
                .first()
                .map(|e| e.rect().center().y)
                .unwrap_or(ship.y),
        };

        let dy = if target_y > ship.y + 4.0 {
            1
        } else if target_y < ship.y - 4.0 {
            -1
        } else {
            0
        };

        TickInput {
            dx: 0,
            dy,
            fire: state.time_ticks % FIRE_CADENCE == 0,
            restart: false,
        }
    }

    pub fn run() -> Result<()> {
        env_logger::init();
        let cli = Cli::parse();
        let config = load_config(&cli)?;

        log::info!("Side Shooter (headless) seed={} config={:?}", cli.seed, config);

        let mut state = GameState::new(cli.seed, config);
        let mut audio = AudioManager::silent();
        let mut boss_phases = 0u8;

        for _ in 0..cli.frames {
            let input = pilot(&state);
            tick(&mut state, &input);
            audio.play_events(&state.events);

            for event in &state.events {
                if let GameEvent::BossPhaseChanged(phase) = event {
                    boss_phases = boss_phases.max(*phase);
                }
            }

            if state.is_terminal() {
                break;
            }
        }

        log::info!(
            "Finished after {} ticks ({:.1}s): {:?}, score {}, boss phase reached {}",
            state.time_ticks,
            state.time_ticks as f64 / TICK_RATE as f64,
            state.phase,
            state.score,
            boss_phases
        );
        println!(
            "{:?} score={} ticks={}",
            state.phase, state.score, state.time_ticks
        );

        if cli.snapshot {
            let snap = RenderSnapshot::capture(&state);
            println!("{}", serde_json::to_string_pretty(&snap)?);
        }

        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    native::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Library-only on wasm; hosts drive `sim::tick` themselves
}
