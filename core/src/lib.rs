#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the chibi-pets engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. Systems consume event streams, query immutable
//! snapshots, and respond exclusively with new command batches.

use serde::{Deserialize, Serialize};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Chibi pets are on the loose.";

/// Unscaled width of a pet's sprite box in surface units.
pub const PET_BASE_WIDTH: f32 = 150.0;

/// Unscaled height of a pet's sprite box in surface units.
pub const PET_BASE_HEIGHT: f32 = 150.0;

/// Vertical allowance that lets pets overlap the anchor region's top edge.
pub const GROUND_OFFSET: f32 = 10.0;

/// Unique identifier assigned to a pet. Identifiers are never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PetId(u32);

impl PetId {
    /// Creates a new pet identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Closed set of pet species supported by the simulation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Species {
    /// Cheerful wanderer that jumps off walls.
    Speaki,
    /// Sleepy wanderer that turns around on wall contact.
    Erpin,
}

/// Every species, in a deterministic order useful for reconciliation sweeps.
pub const ALL_SPECIES: [Species; 2] = [Species::Speaki, Species::Erpin];

impl Species {
    /// Lower-case species name used to address externally resolved assets.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Speaki => "speaki",
            Self::Erpin => "erpin",
        }
    }

    /// Reports whether the motion state belongs to this species' machine.
    #[must_use]
    pub const fn permits(self, state: MotionState) -> bool {
        match self {
            Self::Speaki => matches!(
                state,
                MotionState::Idle
                    | MotionState::WalkLeft
                    | MotionState::WalkRight
                    | MotionState::Jumping
            ),
            Self::Erpin => matches!(
                state,
                MotionState::Idle | MotionState::Walk | MotionState::Sleeping
            ),
        }
    }

    /// Resolves a sound cue into the species' audio file name.
    ///
    /// Returns `None` when the species has no recording for the cue; callers
    /// treat that as a silently dropped request rather than an error.
    #[must_use]
    pub const fn sound_file(self, cue: SoundCue) -> Option<&'static str> {
        match (self, cue) {
            (Self::Speaki, SoundCue::Cry) => Some("cry-drag.mp3"),
            (Self::Speaki, SoundCue::Jump) => Some("jump.mp3"),
            (Self::Speaki, SoundCue::Walk { index }) => Some(match index {
                2 => "walk-2.mp3",
                3 => "walk-3.mp3",
                _ => "walk-1.mp3",
            }),
            (Self::Erpin, SoundCue::Hum) => Some("hum.mp3"),
            (Self::Erpin, SoundCue::Punch { variant }) => Some(if variant == 2 {
                "punch-2.mp3"
            } else {
                "punch-1.mp3"
            }),
            _ => None,
        }
    }
}

/// Horizontal orientation of a pet's sprite and walk direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Facing {
    /// Oriented toward decreasing x coordinates.
    Left,
    /// Oriented toward increasing x coordinates.
    Right,
}

impl Facing {
    /// Sign applied to horizontal velocity contributions in this direction.
    #[must_use]
    pub const fn horizontal_sign(self) -> f32 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }

    /// Returns the opposite orientation.
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// Side of the travel boundary a pet collided with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WallSide {
    /// Collision with the minimum-x limit.
    Left,
    /// Collision with the maximum-x limit.
    Right,
}

impl WallSide {
    /// Orientation pointing away from the contacted wall.
    #[must_use]
    pub const fn facing_away(self) -> Facing {
        match self {
            Self::Left => Facing::Right,
            Self::Right => Facing::Left,
        }
    }
}

/// Union of every species' motion states.
///
/// The world only accepts transitions permitted by [`Species::permits`], so a
/// live pet never carries a state outside its own machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MotionState {
    /// Standing still, waiting for the state timer to expire.
    Idle,
    /// Speaki walk locked to the leftward direction.
    WalkLeft,
    /// Speaki walk locked to the rightward direction.
    WalkRight,
    /// Speaki airborne after a wall jump, until the next landing.
    Jumping,
    /// Erpin walk that follows the pet's current facing.
    Walk,
    /// Erpin sleep that pins the pet in place until it wakes.
    Sleeping,
}

impl MotionState {
    /// Direction of travel the state drives toward, if it is a walk state.
    #[must_use]
    pub const fn walk_direction(self, facing: Facing) -> Option<Facing> {
        match self {
            Self::WalkLeft => Some(Facing::Left),
            Self::WalkRight => Some(Facing::Right),
            Self::Walk => Some(facing),
            _ => None,
        }
    }
}

/// Declarative visual key; adapters resolve `(species, key)` to a sprite.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AnimationKey {
    /// Default standing/walking appearance.
    Idle,
    /// Distressed appearance shown while the pet is dragged.
    Cry,
    /// Airborne appearance shown during a wall jump.
    Jump,
    /// Sleeping appearance.
    Sleep,
}

/// Sound the behavior layer asks the sequencer to play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SoundCue {
    /// Distress call emitted when a drag starts.
    Cry,
    /// Wall-jump exclamation.
    Jump,
    /// Numbered step from the walking playlist.
    Walk {
        /// One-based playlist position, cycling 1 through 3.
        index: u8,
    },
    /// Contented walking hum.
    Hum,
    /// Punch retort emitted when a drag starts.
    Punch {
        /// Recording variant, 1 or 2.
        variant: u8,
    },
}

/// Desired population shape pulled from the configuration collaborator.
///
/// Absent fields fall back to the documented defaults, matching the stored
/// configuration format where untouched settings are simply missing.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DesiredPopulation {
    /// Number of Speaki pets that should be live.
    #[serde(default = "default_count")]
    pub speaki_count: u32,
    /// Number of Erpin pets that should be live.
    #[serde(default = "default_count")]
    pub erpin_count: u32,
    /// Uniform scale applied to every pet's sprite box.
    #[serde(default = "default_scale")]
    pub scale: f32,
    /// Master toggle consulted before any sound reaches the playback layer.
    #[serde(default = "default_sound_enabled")]
    pub sound_enabled: bool,
}

impl DesiredPopulation {
    /// Desired live count for the provided species.
    #[must_use]
    pub const fn count_for(&self, species: Species) -> u32 {
        match species {
            Species::Speaki => self.speaki_count,
            Species::Erpin => self.erpin_count,
        }
    }
}

impl Default for DesiredPopulation {
    fn default() -> Self {
        Self {
            speaki_count: default_count(),
            erpin_count: default_count(),
            scale: default_scale(),
            sound_enabled: default_sound_enabled(),
        }
    }
}

const fn default_count() -> u32 {
    1
}

const fn default_scale() -> f32 {
    0.5
}

const fn default_sound_enabled() -> bool {
    true
}

/// Geometry of the hosting surface sampled immediately before a tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceFrame {
    /// Width of the full viewport in surface units.
    pub viewport_width: f32,
    /// Height of the full viewport in surface units.
    pub viewport_height: f32,
    /// Anchor region pets should stand on, when the host exposes one.
    pub anchor: Option<AnchorRect>,
}

/// Horizontal extent and top edge of the anchor region.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnchorRect {
    /// Left edge of the anchor in surface units.
    pub left: f32,
    /// Top edge of the anchor in surface units.
    pub top: f32,
    /// Right edge of the anchor in surface units.
    pub right: f32,
}

/// Rectangle of allowed travel for one pet during one tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Boundary {
    /// Vertical coordinate pets rest on while grounded.
    pub floor_y: f32,
    /// Minimum allowed x coordinate.
    pub min_x: f32,
    /// Maximum allowed x coordinate.
    pub max_x: f32,
}

impl Boundary {
    /// Computes the travel rectangle for a pet of the given scaled size.
    ///
    /// An anchor region pins the floor just above its top edge and clamps
    /// horizontal travel to its extent; without one the full viewport acts
    /// as the floor. Absence of the anchor is a normal fallback, not an
    /// error, and the result must be recomputed every tick because the host
    /// surface can move or resize between frames.
    #[must_use]
    pub fn resolve(surface: &SurfaceFrame, width: f32, height: f32) -> Self {
        if let Some(anchor) = surface.anchor {
            return Self {
                floor_y: anchor.top - height + GROUND_OFFSET,
                min_x: anchor.left,
                max_x: anchor.right - width,
            };
        }

        Self {
            floor_y: surface.viewport_height - height,
            min_x: 0.0,
            max_x: surface.viewport_width - width,
        }
    }
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Advances the simulation by one frame of physics.
    Tick {
        /// Host surface geometry sampled for this frame.
        surface: SurfaceFrame,
    },
    /// Installs a new desired population, scale and sound toggle.
    ConfigurePopulation {
        /// Population shape the reconciler should converge on.
        desired: DesiredPopulation,
    },
    /// Requests creation of one pet of the provided species.
    SpawnPet {
        /// Species the new pet belongs to.
        species: Species,
    },
    /// Requests removal of any one pet of the provided species.
    RemovePet {
        /// Species whose live count should shrink by one.
        species: Species,
    },
    /// Installs a new motion state and countdown for a pet.
    SetMotion {
        /// Pet whose state machine advances.
        pet: PetId,
        /// State to adopt; rejected unless the species permits it.
        state: MotionState,
        /// Replacement value for the state countdown timer.
        timer: i32,
    },
    /// Switches the visual shown for a pet.
    SetAnimation {
        /// Pet whose visual changes.
        pet: PetId,
        /// Key the renderer should display from now on.
        animation: AnimationKey,
    },
    /// Turns a pet to face the provided direction.
    SetFacing {
        /// Pet being turned.
        pet: PetId,
        /// New orientation.
        facing: Facing,
    },
    /// Overwrites a pet's horizontal velocity, leaving the vertical alone.
    SetHorizontalVelocity {
        /// Pet whose velocity changes.
        pet: PetId,
        /// Replacement horizontal velocity.
        velocity_x: f32,
    },
    /// Throws a pet into the air with the provided velocity.
    Launch {
        /// Pet leaving the ground.
        pet: PetId,
        /// Horizontal launch velocity.
        velocity_x: f32,
        /// Vertical launch velocity; negative values travel upward.
        velocity_y: f32,
    },
    /// Asks the sound sequencer to start a cue for a pet.
    RequestSound {
        /// Pet the sound belongs to.
        pet: PetId,
        /// Cue to resolve against the pet's species.
        cue: SoundCue,
    },
    /// Reports that a pet's active sound stopped playing.
    SoundFinished {
        /// Pet whose sound slot frees up.
        pet: PetId,
    },
    /// Starts a pointer drag on a pet.
    BeginDrag {
        /// Pet grabbed by the pointer.
        pet: PetId,
    },
    /// Moves a dragged pet under the pointer.
    DragTo {
        /// Pet being dragged.
        pet: PetId,
        /// Pointer x coordinate in surface units.
        pointer_x: f32,
        /// Pointer y coordinate in surface units.
        pointer_y: f32,
        /// Horizontal pointer movement since the previous sample.
        delta_x: f32,
        /// Vertical pointer movement since the previous sample.
        delta_y: f32,
    },
    /// Releases a dragged pet.
    EndDrag {
        /// Pet the pointer lets go of.
        pet: PetId,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the simulation advanced one frame.
    TimeAdvanced {
        /// Monotonic frame counter.
        frame: u64,
    },
    /// Confirms that a pet was created.
    PetSpawned {
        /// Identifier assigned to the new pet.
        pet: PetId,
        /// Species the pet belongs to.
        species: Species,
    },
    /// Confirms that a pet was removed.
    PetRemoved {
        /// Identifier of the removed pet.
        pet: PetId,
        /// Species the pet belonged to.
        species: Species,
    },
    /// Announces a new desired population after a configure command.
    PopulationTargetChanged {
        /// Population shape the reconciler should converge on.
        desired: DesiredPopulation,
    },
    /// Reports that a pet touched a travel-boundary wall this tick.
    WallContact {
        /// Pet that made contact.
        pet: PetId,
        /// Species of the pet, for behavior dispatch.
        species: Species,
        /// Which wall was touched.
        side: WallSide,
        /// Whether the pet was grounded when contact resolved.
        grounded: bool,
    },
    /// Reports that a pointer started dragging a pet.
    DragStarted {
        /// Pet being dragged.
        pet: PetId,
        /// Species of the pet, for behavior dispatch.
        species: Species,
    },
    /// Reports that the sequencer accepted a sound request.
    SoundStarted {
        /// Pet the sound belongs to.
        pet: PetId,
        /// Species of the pet.
        species: Species,
        /// Resolved audio file name for the playback layer.
        file: &'static str,
    },
}

/// Immutable representation of a single pet's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PetSnapshot {
    /// Unique identifier assigned to the pet.
    pub id: PetId,
    /// Species the pet belongs to.
    pub species: Species,
    /// Horizontal position of the sprite box's top-left corner.
    pub x: f32,
    /// Vertical position of the sprite box's top-left corner.
    pub y: f32,
    /// Horizontal velocity in units per tick.
    pub velocity_x: f32,
    /// Vertical velocity in units per tick.
    pub velocity_y: f32,
    /// Scale currently applied to the sprite box.
    pub scale: f32,
    /// Orientation of the sprite.
    pub facing: Facing,
    /// Current motion state.
    pub state: MotionState,
    /// Ticks remaining before the state machine re-rolls; may be negative.
    pub state_timer: i32,
    /// Whether the pet rested on the floor at the end of the last tick.
    pub grounded: bool,
    /// Whether a pointer currently overrides the pet's motion.
    pub dragging: bool,
    /// Whether a sound is still active for the pet.
    pub sound_playing: bool,
    /// Next position in the walking-sound playlist, cycling 1 through 3.
    pub walk_sound_index: u8,
}

/// Read-only snapshot describing every live pet.
#[derive(Clone, Debug, Default)]
pub struct PetView {
    snapshots: Vec<PetSnapshot>,
}

impl PetView {
    /// Creates a new pet view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<PetSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured snapshots in deterministic order.
    #[must_use]
    pub fn iter(&self) -> impl Iterator<Item = &PetSnapshot> {
        self.snapshots.iter()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<PetSnapshot> {
        self.snapshots
    }
}

/// Declarative render output for one pet, produced once per tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderFrame {
    /// Pet the frame belongs to.
    pub pet: PetId,
    /// Species of the pet, for sprite resolution.
    pub species: Species,
    /// Visual key the renderer should display.
    pub animation: AnimationKey,
    /// Horizontal position of the sprite box's top-left corner.
    pub x: f32,
    /// Vertical position of the sprite box's top-left corner.
    pub y: f32,
    /// Whether the sprite should be mirrored horizontally. The source art
    /// faces left, so right-facing pets render mirrored.
    pub flipped: bool,
    /// Scale applied to the sprite box.
    pub scale: f32,
}
