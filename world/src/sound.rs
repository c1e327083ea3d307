//! Per-pet sound sequencing: at most one active sound, playlist cycling.

use chibi_pets_core::{Event, SoundCue};

use crate::Pet;

/// Number of recordings in the walking playlist.
const WALK_TRACKS: u8 = 3;

/// Runs a sound request through the sequencer's gate.
///
/// A walk cue always resolves against the pet's own playlist cursor and
/// advances it, even when the request ends up gated; the cursor tracks
/// attempts, not successful playback. The request starts a sound only when
/// the global toggle is on and the pet has no sound active; anything else is
/// dropped without queueing. Cues the species has no recording for resolve
/// to nothing and are dropped the same way.
pub(crate) fn sequence(enabled: bool, pet: &mut Pet, cue: SoundCue, out_events: &mut Vec<Event>) {
    let resolved = match cue {
        SoundCue::Walk { .. } => {
            let index = pet.walk_sound_index;
            pet.walk_sound_index = pet.walk_sound_index % WALK_TRACKS + 1;
            SoundCue::Walk { index }
        }
        other => other,
    };

    if !enabled || pet.sound_playing {
        return;
    }

    let Some(file) = pet.species.sound_file(resolved) else {
        return;
    };

    pet.sound_playing = true;
    out_events.push(Event::SoundStarted {
        pet: pet.id,
        species: pet.species,
        file,
    });
}
