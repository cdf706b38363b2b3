//! Synthesized voice configuration

use serde::Deserialize;

use crate::domain::dialogue::VoiceProfile;

use super::error::ValidationError;

/// Synthesized voice configuration
#[derive(Debug, Clone, Deserialize)]
pub struct VoiceConfig {
    /// Provider voice name
    #[serde(default = "default_name")]
    pub name: String,

    /// Speaking rate
    #[serde(default = "default_rate")]
    pub rate: String,

    /// Pitch adjustment
    #[serde(default = "default_pitch")]
    pub pitch: String,

    /// Volume
    #[serde(default = "default_volume")]
    pub volume: String,
}

impl VoiceConfig {
    /// Build the voice profile used for all spoken segments
    pub fn profile(&self) -> VoiceProfile {
        VoiceProfile::new(self.name.trim()).with_prosody(&self.rate, &self.pitch, &self.volume)
    }

    /// Validate voice configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyVoiceName);
        }
        Ok(())
    }
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            rate: default_rate(),
            pitch: default_pitch(),
            volume: default_volume(),
        }
    }
}

fn default_name() -> String {
    "Polly.Amy-Neural".to_string()
}

fn default_rate() -> String {
    "90%".to_string()
}

fn default_pitch() -> String {
    "+2Hz".to_string()
}

fn default_volume() -> String {
    "loud".to_string()
}
