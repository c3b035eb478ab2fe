pub mod decoder;
pub mod format;
pub mod mixer;
pub mod wav;

pub use decoder::{decode, DecodedAudio};
pub use format::AudioFormat;
pub use mixer::{normalize, NormalizedAudio};
pub use wav::{encode, EncodedWaveform};
