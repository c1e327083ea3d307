#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Playback contracts for chibi-pets audio backends.
//!
//! Playback is fire-and-forget: the engine never blocks on a sound, and the
//! only notification channel back into the simulation is the set of pets a
//! sink reports as finished. Backends translate resolved file names into
//! whatever resource handles the host understands.

use std::{error::Error, fmt};

use chibi_pets_core::{PetId, Species};
use log::debug;

/// Errors a playback backend can surface when starting a sound.
///
/// None of these abort the simulation; the driver frees the pet's sound slot
/// and continues ticking.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlaybackError {
    /// Host policy blocked playback pending a user gesture. Swallowed
    /// without escalation.
    AutoplayBlocked,
    /// The file could not be resolved to a playable resource.
    MissingAsset {
        /// File name that failed to resolve.
        file: &'static str,
    },
    /// Any other backend failure; logged but non-fatal.
    Backend {
        /// Backend-specific description of the failure.
        message: String,
    },
}

impl fmt::Display for PlaybackError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AutoplayBlocked => {
                write!(formatter, "playback blocked pending user interaction")
            }
            Self::MissingAsset { file } => {
                write!(formatter, "audio asset {file} could not be resolved")
            }
            Self::Backend { message } => write!(formatter, "audio backend failure: {message}"),
        }
    }
}

impl Error for PlaybackError {}

/// Fire-and-forget playback backend driven once per frame.
pub trait AudioSink {
    /// Begins playback of a resolved file on behalf of one pet.
    ///
    /// # Errors
    ///
    /// Returns a [`PlaybackError`] when the backend cannot start the sound;
    /// the caller treats every variant as non-fatal.
    fn play(&mut self, pet: PetId, species: Species, file: &'static str)
        -> Result<(), PlaybackError>;

    /// Advances the sink by one frame and drains pets whose playback ended,
    /// naturally or otherwise, since the previous poll.
    fn poll_finished(&mut self, out: &mut Vec<PetId>);
}

/// Sink that models fixed-length clips without producing audio.
///
/// Useful for headless runs and tests: every accepted sound "plays" for a
/// fixed number of frames and then completes.
#[derive(Debug)]
pub struct NullAudioSink {
    clip_frames: u32,
    playing: Vec<(PetId, u32)>,
    played: Vec<(PetId, &'static str)>,
}

impl NullAudioSink {
    /// Creates a sink whose clips last the provided number of frames.
    #[must_use]
    pub const fn new(clip_frames: u32) -> Self {
        Self {
            clip_frames,
            playing: Vec::new(),
            played: Vec::new(),
        }
    }

    /// Every sound accepted so far, in playback order.
    #[must_use]
    pub fn played(&self) -> &[(PetId, &'static str)] {
        &self.played
    }
}

impl AudioSink for NullAudioSink {
    fn play(
        &mut self,
        pet: PetId,
        species: Species,
        file: &'static str,
    ) -> Result<(), PlaybackError> {
        debug!("{} pet {} plays {file}", species.name(), pet.get());
        self.playing.retain(|(playing, _)| *playing != pet);
        self.playing.push((pet, self.clip_frames));
        self.played.push((pet, file));
        Ok(())
    }

    fn poll_finished(&mut self, out: &mut Vec<PetId>) {
        for (_, remaining) in self.playing.iter_mut() {
            *remaining = remaining.saturating_sub(1);
        }
        for (pet, _) in self.playing.iter().filter(|(_, remaining)| *remaining == 0) {
            out.push(*pet);
        }
        self.playing.retain(|(_, remaining)| *remaining > 0);
    }
}
