//! Recording session: one counter per configured movement.

use tracing::{debug, info};

use crate::angle::AngleEvaluator;
use crate::config::Config;
use crate::counter::RepCounter;
use crate::error::{ConfigError, Error, Result};
use crate::landmark::Landmark;
use crate::movement::MovementConfig;

/// A repetition counted during one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepEvent {
    pub movement: String,
    pub count: u32,
    pub frame: u64,
}

pub struct Session {
    counters: Vec<RepCounter>,
    frames_processed: u64,
}

impl Session {
    pub fn new(config: &Config) -> Result<Self> {
        config.validate()?;
        Self::from_movements(config.movements.clone(), AngleEvaluator::new(config.evaluator))
    }

    pub fn from_movements(movements: Vec<MovementConfig>, evaluator: AngleEvaluator) -> Result<Self> {
        let mut counters: Vec<RepCounter> = Vec::with_capacity(movements.len());
        for movement in movements {
            if counters.iter().any(|c| c.name() == movement.name) {
                return Err(ConfigError::DuplicateMovement(movement.name).into());
            }
            counters.push(RepCounter::with_evaluator(movement, evaluator)?);
        }

        info!(movements = counters.len(), "session created");
        Ok(Self {
            counters,
            frames_processed: 0,
        })
    }

    /// Run every enabled counter over one frame and report new repetitions.
    pub fn process_frame(&mut self, landmarks: &[Landmark]) -> Vec<RepEvent> {
        self.frames_processed += 1;
        let frame = self.frames_processed;

        let mut events = Vec::new();
        for counter in self.counters.iter_mut().filter(|c| c.tracking_enabled()) {
            let before = counter.count();
            let after = counter.update(landmarks);
            if after > before {
                events.push(RepEvent {
                    movement: counter.name().to_string(),
                    count: after,
                    frame,
                });
            }
        }
        events
    }

    /// Current count per movement, in configuration order.
    pub fn counts(&self) -> Vec<(&str, u32)> {
        self.counters.iter().map(|c| (c.name(), c.count())).collect()
    }

    pub fn counter(&self, name: &str) -> Option<&RepCounter> {
        self.counters.iter().find(|c| c.name() == name)
    }

    pub fn counters(&self) -> &[RepCounter] {
        &self.counters
    }

    pub fn set_tracking(&mut self, name: &str, enabled: bool) -> Result<()> {
        let counter = self
            .counters
            .iter_mut()
            .find(|c| c.name() == name)
            .ok_or_else(|| Error::UnknownMovement(name.to_string()))?;
        counter.set_tracking_enabled(enabled);
        debug!(movement = name, enabled, "tracking toggled");
        Ok(())
    }

    pub fn reset_all(&mut self) {
        for counter in &mut self.counters {
            counter.reset_count();
        }
        self.frames_processed = 0;
        info!("session counts reset");
    }

    pub fn frames_processed(&self) -> u64 {
        self.frames_processed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::angle::EvaluatorConfig;
    use crate::movement::AngleSpec;

    fn straight_arm(name: &str) -> MovementConfig {
        MovementConfig::new(name, vec![AngleSpec::new(0, 1, 2, 150.0)])
    }

    fn arm_frame(bent: bool) -> Vec<Landmark> {
        let wrist = if bent {
            Landmark::new(2, 0.5, 0.3)
        } else {
            Landmark::new(2, 0.3, 0.5)
        };
        vec![Landmark::new(0, 0.7, 0.5), Landmark::new(1, 0.5, 0.5), wrist]
    }

    #[test]
    fn test_process_frame_reports_events() {
        let mut session =
            Session::from_movements(vec![straight_arm("a"), straight_arm("b")], AngleEvaluator::default())
                .unwrap();

        session.process_frame(&arm_frame(true));
        session.process_frame(&arm_frame(true));
        let events = session.process_frame(&arm_frame(false));

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].movement, "a");
        assert_eq!(events[1].count, 1);
        assert_eq!(events[1].frame, 3);
        assert_eq!(session.counts(), vec![("a", 1), ("b", 1)]);
    }

    #[test]
    fn test_disabled_movement_is_skipped() {
        let mut session =
            Session::from_movements(vec![straight_arm("a"), straight_arm("b")], AngleEvaluator::default())
                .unwrap();
        session.set_tracking("b", false).unwrap();

        for bent in [true, true, false] {
            session.process_frame(&arm_frame(bent));
        }
        assert_eq!(session.counts(), vec![("a", 1), ("b", 0)]);
        // never updated while disabled
        assert_eq!(session.counter("b").unwrap().angle_states()[0].current, None);
    }

    #[test]
    fn test_unknown_movement() {
        let mut session = Session::from_movements(vec![straight_arm("a")], AngleEvaluator::default()).unwrap();
        assert!(matches!(session.set_tracking("z", true), Err(Error::UnknownMovement(_))));
    }

    #[test]
    fn test_duplicate_movement_rejected() {
        let result = Session::from_movements(vec![straight_arm("a"), straight_arm("a")], AngleEvaluator::default());
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::DuplicateMovement(_)))
        ));
    }

    #[test]
    fn test_reset_all() {
        let mut session = Session::from_movements(vec![straight_arm("a")], AngleEvaluator::default()).unwrap();
        for bent in [true, true, false] {
            session.process_frame(&arm_frame(bent));
        }
        session.reset_all();
        assert_eq!(session.counts(), vec![("a", 0)]);
        assert_eq!(session.frames_processed(), 0);
    }

    #[test]
    fn test_default_config_session() {
        let session = Session::new(&Config::default()).unwrap();
        assert_eq!(session.counters().len(), 3);
    }

    #[test]
    fn test_invalid_evaluator_config_rejected() {
        let config = Config {
            evaluator: EvaluatorConfig {
                edge_min: 0.9,
                edge_max: 0.1,
                visibility_threshold: 0.5,
            },
            ..Config::default()
        };
        assert!(matches!(
            Session::new(&config),
            Err(Error::Config(ConfigError::InvalidBounds { .. }))
        ));

        let result = Session::from_movements(vec![straight_arm("a")], AngleEvaluator::new(config.evaluator));
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidBounds { .. }))
        ));
    }
}
