use std::sync::Mutex;

use medscan_core::errors::{MedscanError, MedscanResult};
use medscan_core::models::ImageTensor;
use medscan_core::traits::IImageCodec;

/// Maps each byte to `byte / 255` in a flat tensor and remembers the
/// preprocessing profiles it was asked for.
#[derive(Debug, Default)]
pub struct FlatCodec {
    profiles: Mutex<Vec<String>>,
}

impl FlatCodec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn profiles(&self) -> Vec<String> {
        self.profiles
            .lock()
            .map(|p| p.clone())
            .unwrap_or_default()
    }
}

impl IImageCodec for FlatCodec {
    fn decode(&self, bytes: &[u8], preprocessing: &str) -> MedscanResult<ImageTensor> {
        if bytes.is_empty() {
            return Err(MedscanError::InvalidImage {
                reason: "empty image".to_string(),
            });
        }
        if let Ok(mut profiles) = self.profiles.lock() {
            profiles.push(preprocessing.to_string());
        }
        let data = bytes.iter().map(|b| f32::from(*b) / 255.0).collect();
        ImageTensor::new(vec![bytes.len()], data)
    }
}
