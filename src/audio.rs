//! Named sound playback.
//!
//! The scene only knows sounds by name. Decoding and mixing belong to the
//! host, which receives play requests through an [`AudioSink`].

use std::collections::HashMap;

use anyhow::ensure;
use cgmath::Point3;

#[derive(Clone, Debug, PartialEq)]
pub struct Sound {
    pub name: String,
    pub url: String,
    /// Spatial sounds are positioned in the world when played.
    pub spatial: bool,
}

impl Sound {
    pub fn spatial(name: &str, url: &str) -> Self {
        Self {
            name: name.to_string(),
            url: url.to_string(),
            spatial: true,
        }
    }
}

pub trait AudioSink {
    fn play(&mut self, sound: &Sound, position: Option<Point3<f32>>);
}

/// Sink for hosts without audio output: play requests only show up in the log.
#[derive(Debug, Default)]
pub struct LogSink;

impl AudioSink for LogSink {
    fn play(&mut self, sound: &Sound, position: Option<Point3<f32>>) {
        log::info!("Playing sound {} ({}) at {:?}", sound.name, sound.url, position);
    }
}

pub struct SoundBank {
    sounds: HashMap<String, Sound>,
    sink: Box<dyn AudioSink>,
}

impl SoundBank {
    pub fn new(sink: Box<dyn AudioSink>) -> Self {
        Self {
            sounds: HashMap::new(),
            sink,
        }
    }

    pub fn add(&mut self, sound: Sound) -> anyhow::Result<()> {
        ensure!(
            !self.sounds.contains_key(&sound.name),
            "a sound named {} is already registered",
            sound.name
        );
        self.sounds.insert(sound.name.clone(), sound);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Sound> {
        self.sounds.get(name)
    }

    /// Plays `name`, anchored at `position` when the sound is spatial.
    /// Unknown names are logged and skipped.
    pub fn play(&mut self, name: &str, position: Option<Point3<f32>>) -> bool {
        let Some(sound) = self.sounds.get(name) else {
            log::error!("Unable to play sound {}", name);
            return false;
        };
        let position = if sound.spatial { position } else { None };
        self.sink.play(sound, position);
        true
    }

    pub fn len(&self) -> usize {
        self.sounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sounds.is_empty()
    }

    pub fn clear(&mut self) {
        self.sounds.clear();
    }
}

impl std::fmt::Debug for SoundBank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SoundBank")
            .field("sounds", &self.sounds)
            .finish_non_exhaustive()
    }
}
