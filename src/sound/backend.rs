use crate::math::Vec2;

/// Identifies one pooled playback voice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VoiceId(pub u32);

/// Everything the host needs to start a sound on a voice
#[derive(Debug, Clone, PartialEq)]
pub struct PlayRequest {
    pub clip: String,
    pub position: Vec2,
    pub pitch: f32,
    pub volume: f32,
    pub looping: bool,
}

/// The host audio engine
pub trait AudioBackend {
    /// Starts `request` on `voice`, replacing whatever it was playing
    fn play(&mut self, voice: VoiceId, request: &PlayRequest);

    /// True while the voice is still producing sound
    fn is_playing(&self, voice: VoiceId) -> bool;

    fn stop(&mut self, voice: VoiceId);
}

/// Backend for headless runs: logs requests, every sound ends at once
#[derive(Debug, Default)]
pub struct NullAudio;

impl AudioBackend for NullAudio {
    fn play(&mut self, voice: VoiceId, request: &PlayRequest) {
        log::debug!("[audio] voice {} plays {}", voice.0, request.clip);
    }

    fn is_playing(&self, _voice: VoiceId) -> bool {
        false
    }

    fn stop(&mut self, _voice: VoiceId) {}
}
