// Sound module
//
// - bank: named sound effects mapped to clip paths
// - backend: the host audio API this crate drives (playback is external)
// - system: voice pooling, pitch variation, ambient music

pub mod backend;
pub mod bank;
pub mod system;

pub use backend::{AudioBackend, NullAudio, PlayRequest, VoiceId};
pub use bank::{SoundBank, SoundName};
pub use system::SoundSystem;
