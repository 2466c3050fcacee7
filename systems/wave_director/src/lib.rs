#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Wave director responsible for pacing enemy spawns and detecting cleared waves.

use std::time::Duration;

use waypoint_defence_core::{Command, Event, WavePhase};

/// Configuration parameters required to construct the wave director.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    spawn_interval: Duration,
}

impl Config {
    /// Creates a new configuration using the provided spawn cadence.
    #[must_use]
    pub const fn new(spawn_interval: Duration) -> Self {
        Self { spawn_interval }
    }
}

/// Pure system that drips enemies into an active wave and requests the wave
/// clear once nothing is left alive or waiting.
#[derive(Debug)]
pub struct WaveDirector {
    spawn_interval: Duration,
    accumulator: Duration,
}

impl WaveDirector {
    /// Creates a new wave director using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            spawn_interval: config.spawn_interval,
            accumulator: Duration::ZERO,
        }
    }

    /// Consumes events to emit at most one spawn command per call.
    ///
    /// The accumulator restarts whenever a wave starts and whenever the
    /// phase is not [`WavePhase::Spawning`].
    pub fn handle(
        &mut self,
        events: &[Event],
        phase: WavePhase,
        remaining_to_spawn: u32,
        out: &mut Vec<Command>,
    ) {
        if phase != WavePhase::Spawning {
            self.accumulator = Duration::ZERO;
            return;
        }

        let mut advanced = false;
        for event in events {
            match event {
                Event::WaveStarted { .. } => self.accumulator = Duration::ZERO,
                Event::TimeAdvanced { dt } if !dt.is_zero() => {
                    self.accumulator = self.accumulator.saturating_add(*dt);
                    advanced = true;
                }
                _ => {}
            }
        }

        if !advanced || self.spawn_interval.is_zero() || remaining_to_spawn == 0 {
            return;
        }

        if self.accumulator >= self.spawn_interval {
            self.accumulator = Duration::ZERO;
            out.push(Command::SpawnEnemy);
        }
    }

    /// Requests the wave clear once the arena is empty and nothing is left to spawn.
    pub fn check_clear(
        &self,
        phase: WavePhase,
        remaining_to_spawn: u32,
        live_enemies: usize,
        out: &mut Vec<Command>,
    ) {
        if phase == WavePhase::Spawning && remaining_to_spawn == 0 && live_enemies == 0 {
            out.push(Command::ClearWave);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tick(ms: u64) -> Event {
        Event::TimeAdvanced {
            dt: Duration::from_millis(ms),
        }
    }

    #[test]
    fn zero_interval_never_spawns() {
        let mut director = WaveDirector::new(Config::new(Duration::ZERO));
        let mut commands = Vec::new();
        director.handle(&[tick(10_000)], WavePhase::Spawning, 3, &mut commands);
        assert!(commands.is_empty());
    }

    #[test]
    fn spawn_resets_the_accumulator_to_zero() {
        let mut director = WaveDirector::new(Config::new(Duration::from_millis(900)));
        let mut commands = Vec::new();
        director.handle(&[tick(1_000)], WavePhase::Spawning, 3, &mut commands);
        assert_eq!(director.accumulator, Duration::ZERO, "overshoot is dropped");
        assert_eq!(commands, vec![Command::SpawnEnemy]);
    }
}
