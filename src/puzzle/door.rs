use super::switch::Puzzle;
use crate::config::DoorConfig;
use crate::math::Vec2;

/// Tick-driven slide of a two-panel door
///
/// The upper panel moves up and the lower panel moves down by
/// `open_distance`, linearly over `open_duration` seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct DoorMotion {
    open_distance: f32,
    open_duration: f32,
    elapsed: Option<f32>,
}

impl DoorMotion {
    pub fn new(config: &DoorConfig) -> Self {
        DoorMotion {
            open_distance: config.open_distance,
            open_duration: config.open_duration.max(0.0),
            elapsed: None,
        }
    }

    /// Begins opening; no-op if already started
    pub fn start(&mut self) {
        if self.elapsed.is_none() {
            self.elapsed = Some(0.0);
        }
    }

    /// Advances the slide. Returns true on the tick the door finishes opening.
    pub fn tick(&mut self, dt: f32) -> bool {
        let Some(elapsed) = self.elapsed else {
            return false;
        };
        if elapsed >= self.open_duration {
            return false;
        }

        let elapsed = (elapsed + dt.max(0.0)).min(self.open_duration);
        self.elapsed = Some(elapsed);
        elapsed >= self.open_duration
    }

    /// 0.0 closed .. 1.0 fully open
    pub fn progress(&self) -> f32 {
        match self.elapsed {
            None => 0.0,
            Some(_) if self.open_duration <= 0.0 => 1.0,
            Some(elapsed) => (elapsed / self.open_duration).clamp(0.0, 1.0),
        }
    }

    pub fn is_opening(&self) -> bool {
        self.elapsed.is_some() && !self.is_open()
    }

    pub fn is_open(&self) -> bool {
        self.progress() >= 1.0
    }

    /// Offset of the upper panel from its closed position
    pub fn upper_offset(&self) -> Vec2 {
        Vec2::ZERO.lerp(Vec2::new(0.0, self.open_distance), self.progress())
    }

    /// Offset of the lower panel from its closed position
    pub fn lower_offset(&self) -> Vec2 {
        Vec2::ZERO.lerp(Vec2::new(0.0, -self.open_distance), self.progress())
    }
}

/// A puzzle that opens a door when solved
#[derive(Debug)]
pub struct PuzzleDoor {
    pub puzzle: Puzzle,
    pub motion: DoorMotion,
    /// Position of the door, used to place the opening sound
    pub position: Vec2,
    blocking: bool,
}

impl PuzzleDoor {
    pub fn new(puzzle: Puzzle, position: Vec2, config: &DoorConfig) -> Self {
        PuzzleDoor {
            puzzle,
            motion: DoorMotion::new(config),
            position,
            blocking: true,
        }
    }

    /// True while the door collider should block movement
    pub fn is_blocking(&self) -> bool {
        self.blocking
    }

    /// Re-checks the puzzle; on solve, stops blocking and starts opening
    ///
    /// Returns true on the check that solved the puzzle.
    pub fn on_switch_changed(&mut self) -> bool {
        if !self.puzzle.check() {
            return false;
        }
        self.open();
        true
    }

    /// Opens without checking the puzzle (save restore)
    pub fn open(&mut self) {
        self.blocking = false;
        self.motion.start();
    }

    pub fn tick(&mut self, dt: f32) -> bool {
        self.motion.tick(dt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::PuzzleSwitch;

    fn config() -> DoorConfig {
        DoorConfig {
            open_distance: 2.0,
            open_duration: 1.0,
        }
    }

    #[test]
    fn test_motion_slides_panels_apart() {
        let mut motion = DoorMotion::new(&config());
        assert!(!motion.tick(0.5)); // Not started
        assert_eq!(motion.upper_offset(), Vec2::ZERO);

        motion.start();
        assert!(!motion.tick(0.5));
        assert!(motion.is_opening());
        assert_eq!(motion.upper_offset(), Vec2::new(0.0, 1.0));
        assert_eq!(motion.lower_offset(), Vec2::new(0.0, -1.0));

        assert!(motion.tick(0.75));
        assert!(motion.is_open());
        assert_eq!(motion.upper_offset(), Vec2::new(0.0, 2.0));
        assert!(!motion.tick(1.0)); // Already finished
    }

    #[test]
    fn test_zero_duration_opens_at_once() {
        let mut motion = DoorMotion::new(&DoorConfig { open_distance: 1.0, open_duration: 0.0 });
        motion.start();
        assert!(motion.is_open());
        assert_eq!(motion.lower_offset(), Vec2::new(0.0, -1.0));
    }

    #[test]
    fn test_solving_puzzle_opens_door() {
        let lever = PuzzleSwitch::new(true, false);
        let puzzle = Puzzle::new("vault", vec![lever.clone()]);
        let mut door = PuzzleDoor::new(puzzle, Vec2::ZERO, &config());

        assert!(!door.on_switch_changed());
        assert!(door.is_blocking());

        lever.toggle();
        assert!(door.on_switch_changed());
        assert!(!door.is_blocking());
        assert!(door.motion.is_opening());
        assert!(door.tick(1.0));
    }
}
