use super::backend::{AudioBackend, PlayRequest, VoiceId};
use super::bank::{SoundBank, SoundName};
use crate::config::SoundConfig;
use crate::math::Vec2;
use log::{debug, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;

/// Plays named sounds on a pool of reusable voices
///
/// The pool starts with `voice_pool_size` idle voices. A play request
/// takes the oldest idle voice, or grows the pool when none is free.
/// `recycle` (once per tick) hands voices whose sound ended back to the
/// idle queue.
pub struct SoundSystem {
    bank: SoundBank,
    backend: Box<dyn AudioBackend>,
    config: SoundConfig,
    idle: VecDeque<VoiceId>,
    busy: Vec<VoiceId>,
    ambient: Option<VoiceId>,
    next_voice: u32,
    rng: StdRng,
}

impl SoundSystem {
    /// An empty or non-finite pitch range disables pitch variation.
    pub fn new(bank: SoundBank, backend: Box<dyn AudioBackend>, mut config: SoundConfig) -> Self {
        let finite = config.pitch_min.is_finite() && config.pitch_max.is_finite();
        if !(finite && config.pitch_min <= config.pitch_max) {
            warn!(
                "Pitch range {}..={} is empty, playing at pitch 1.0",
                config.pitch_min, config.pitch_max
            );
            config.pitch_min = 1.0;
            config.pitch_max = 1.0;
        }

        let mut system = SoundSystem {
            bank,
            backend,
            config,
            idle: VecDeque::new(),
            busy: Vec::new(),
            ambient: None,
            next_voice: 0,
            rng: StdRng::from_entropy(),
        };

        for _ in 0..system.config.voice_pool_size {
            let voice = system.new_voice();
            system.idle.push_back(voice);
        }
        system
    }

    /// Fixes the pitch variation sequence (tests, replays)
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Plays a one-shot sound at `position`
    ///
    /// With `vary_pitch` the pitch is picked from the configured range.
    /// Returns the voice used, or None if the bank has no clip for `name`.
    pub fn play(&mut self, name: SoundName, position: Vec2, vary_pitch: bool) -> Option<VoiceId> {
        let Some(clip) = self.bank.clip(name) else {
            warn!("No clip registered for sound {:?}", name);
            return None;
        };

        let pitch = if vary_pitch {
            self.rng.gen_range(self.config.pitch_min..=self.config.pitch_max)
        } else {
            1.0
        };
        let request = PlayRequest {
            clip: clip.to_string(),
            position,
            pitch,
            volume: 1.0,
            looping: false,
        };

        let voice = match self.idle.pop_front() {
            Some(voice) => voice,
            None => {
                debug!("Voice pool exhausted, growing to {}", self.next_voice + 1);
                self.new_voice()
            }
        };

        self.backend.play(voice, &request);
        self.busy.push(voice);
        Some(voice)
    }

    pub fn play_click(&mut self) -> Option<VoiceId> {
        self.play(SoundName::ButtonClick, Vec2::ZERO, false)
    }

    /// Starts looping ambient music on a dedicated voice
    ///
    /// Replaces any ambient track already playing.
    pub fn play_ambient(&mut self, name: SoundName) -> Option<VoiceId> {
        let Some(clip) = self.bank.clip(name) else {
            warn!("No clip registered for ambient {:?}", name);
            return None;
        };
        let request = PlayRequest {
            clip: clip.to_string(),
            position: Vec2::ZERO,
            pitch: 1.0,
            volume: self.config.ambient_volume,
            looping: true,
        };

        let voice = match self.ambient.take() {
            Some(voice) => {
                self.backend.stop(voice);
                voice
            }
            None => self.new_voice(),
        };

        self.backend.play(voice, &request);
        self.ambient = Some(voice);
        Some(voice)
    }

    pub fn stop_ambient(&mut self) {
        if let Some(voice) = self.ambient.take() {
            self.backend.stop(voice);
            self.idle.push_back(voice);
        }
    }

    /// Returns finished voices to the idle pool
    pub fn recycle(&mut self) {
        let backend = &self.backend;
        let idle = &mut self.idle;
        self.busy.retain(|voice| {
            if backend.is_playing(*voice) {
                true
            } else {
                idle.push_back(*voice);
                false
            }
        });
    }

    pub fn idle_voices(&self) -> usize {
        self.idle.len()
    }

    pub fn busy_voices(&self) -> usize {
        self.busy.len()
    }

    pub fn ambient_voice(&self) -> Option<VoiceId> {
        self.ambient
    }

    fn new_voice(&mut self) -> VoiceId {
        let voice = VoiceId(self.next_voice);
        self.next_voice += 1;
        voice
    }
}

impl std::fmt::Debug for SoundSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SoundSystem")
            .field("idle", &self.idle.len())
            .field("busy", &self.busy.len())
            .field("ambient", &self.ambient)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashSet;
    use std::rc::Rc;

    /// Records plays; voices keep playing until the test ends them
    #[derive(Default)]
    struct Recorder {
        played: Vec<(VoiceId, PlayRequest)>,
        playing: HashSet<VoiceId>,
    }

    struct SharedRecorder(Rc<RefCell<Recorder>>);

    impl AudioBackend for SharedRecorder {
        fn play(&mut self, voice: VoiceId, request: &PlayRequest) {
            let mut rec = self.0.borrow_mut();
            rec.played.push((voice, request.clone()));
            rec.playing.insert(voice);
        }

        fn is_playing(&self, voice: VoiceId) -> bool {
            self.0.borrow().playing.contains(&voice)
        }

        fn stop(&mut self, voice: VoiceId) {
            self.0.borrow_mut().playing.remove(&voice);
        }
    }

    fn system(pool: usize) -> (SoundSystem, Rc<RefCell<Recorder>>) {
        let recorder = Rc::new(RefCell::new(Recorder::default()));
        let bank = SoundBank::new()
            .with(SoundName::Coin, "coin.ogg")
            .with(SoundName::BackgroundMusic, "theme.ogg")
            .with(SoundName::ButtonClick, "click.ogg");
        let config = SoundConfig {
            voice_pool_size: pool,
            ..SoundConfig::default()
        };
        let sounds = SoundSystem::new(bank, Box::new(SharedRecorder(Rc::clone(&recorder))), config)
            .with_seed(7);
        (sounds, recorder)
    }

    #[test]
    fn test_pool_grows_when_exhausted() {
        let (mut sounds, _recorder) = system(2);
        assert_eq!(sounds.idle_voices(), 2);

        let a = sounds.play(SoundName::Coin, Vec2::ZERO, false).unwrap();
        let b = sounds.play(SoundName::Coin, Vec2::ZERO, false).unwrap();
        let c = sounds.play(SoundName::Coin, Vec2::ZERO, false).unwrap();

        assert_eq!((a, b, c), (VoiceId(0), VoiceId(1), VoiceId(2)));
        assert_eq!(sounds.busy_voices(), 3);
        assert_eq!(sounds.idle_voices(), 0);
    }

    #[test]
    fn test_recycle_returns_finished_voices() {
        let (mut sounds, recorder) = system(1);
        let voice = sounds.play(SoundName::Coin, Vec2::ZERO, false).unwrap();

        sounds.recycle();
        assert_eq!(sounds.busy_voices(), 1); // Still playing

        recorder.borrow_mut().playing.remove(&voice);
        sounds.recycle();
        assert_eq!(sounds.busy_voices(), 0);
        assert_eq!(sounds.play_click(), Some(voice)); // Reused
    }

    #[test]
    fn test_pitch_variation_within_range() {
        let (mut sounds, recorder) = system(4);
        for _ in 0..20 {
            sounds.play(SoundName::Coin, Vec2::new(1.0, 2.0), true);
        }
        sounds.play(SoundName::Coin, Vec2::ZERO, false);

        let rec = recorder.borrow();
        let (varied, plain) = rec.played.split_at(20);
        assert!(varied.iter().all(|(_, r)| (0.8..=1.2).contains(&r.pitch)));
        assert_eq!(plain[0].1.pitch, 1.0);
        assert_eq!(varied[0].1.position, Vec2::new(1.0, 2.0));
    }

    #[test]
    fn test_inverted_pitch_range_plays_at_unit_pitch() {
        let recorder = Rc::new(RefCell::new(Recorder::default()));
        let bank = SoundBank::new().with(SoundName::Coin, "coin.ogg");
        let config = SoundConfig {
            pitch_min: 1.5,
            pitch_max: 1.0,
            ..SoundConfig::default()
        };
        let mut sounds = SoundSystem::new(bank, Box::new(SharedRecorder(Rc::clone(&recorder))), config);

        assert!(sounds.play(SoundName::Coin, Vec2::ZERO, true).is_some());
        assert_eq!(recorder.borrow().played[0].1.pitch, 1.0);
    }

    #[test]
    fn test_missing_clip_is_ignored() {
        let (mut sounds, recorder) = system(1);
        assert_eq!(sounds.play(SoundName::DoorOpen, Vec2::ZERO, false), None);
        assert!(recorder.borrow().played.is_empty());
        assert_eq!(sounds.idle_voices(), 1);
    }

    #[test]
    fn test_ambient_loops_on_own_voice() {
        let (mut sounds, recorder) = system(1);
        let voice = sounds.play_ambient(SoundName::BackgroundMusic).unwrap();

        assert_eq!(sounds.idle_voices(), 1);
        assert_eq!(sounds.ambient_voice(), Some(voice));
        {
            let rec = recorder.borrow();
            let request = &rec.played[0].1;
            assert!(request.looping);
            assert_eq!(request.volume, 0.1);
        }

        sounds.stop_ambient();
        assert_eq!(sounds.ambient_voice(), None);
        assert_eq!(sounds.idle_voices(), 2);
        assert!(!recorder.borrow().playing.contains(&voice));
    }
}
