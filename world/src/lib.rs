#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative pet population state for the chibi-pets engine.
//!
//! All mutation flows through [`apply`]: adapters and systems submit
//! [`Command`] values, the world executes them, and interested parties react
//! to the broadcast [`Event`] stream. Read access goes through the [`query`]
//! module, which hands out snapshot views rather than live references.

mod physics;
mod sound;

use chibi_pets_core::{
    AnimationKey, Boundary, Command, DesiredPopulation, Event, Facing, MotionState, PetId,
    PetSnapshot, RenderFrame, Species, PET_BASE_HEIGHT, PET_BASE_WIDTH, WELCOME_BANNER,
};

/// Horizontal and vertical spawn coordinate for new pets.
const SPAWN_POSITION: (f32, f32) = (100.0, 100.0);

/// Ticks a freshly spawned pet waits before its first state roll.
const INITIAL_STATE_TIMER: i32 = 100;

/// Fraction of the pointer's per-event movement kept as thrown velocity.
const DRAG_MOMENTUM: f32 = 0.5;

/// One live pet owned by the world.
#[derive(Debug)]
struct Pet {
    id: PetId,
    species: Species,
    x: f32,
    y: f32,
    velocity_x: f32,
    velocity_y: f32,
    scale: f32,
    facing: Facing,
    state: MotionState,
    state_timer: i32,
    grounded: bool,
    dragging: bool,
    sound_playing: bool,
    walk_sound_index: u8,
    animation: AnimationKey,
}

impl Pet {
    fn spawned(id: PetId, species: Species, scale: f32) -> Self {
        Self {
            id,
            species,
            x: SPAWN_POSITION.0,
            y: SPAWN_POSITION.1,
            velocity_x: 0.0,
            velocity_y: 0.0,
            scale,
            facing: Facing::Right,
            state: MotionState::Idle,
            state_timer: INITIAL_STATE_TIMER,
            grounded: false,
            dragging: false,
            sound_playing: false,
            walk_sound_index: 1,
            animation: AnimationKey::Idle,
        }
    }

    fn width(&self) -> f32 {
        PET_BASE_WIDTH * self.scale
    }

    fn height(&self) -> f32 {
        PET_BASE_HEIGHT * self.scale
    }

    fn snapshot(&self) -> PetSnapshot {
        PetSnapshot {
            id: self.id,
            species: self.species,
            x: self.x,
            y: self.y,
            velocity_x: self.velocity_x,
            velocity_y: self.velocity_y,
            scale: self.scale,
            facing: self.facing,
            state: self.state,
            state_timer: self.state_timer,
            grounded: self.grounded,
            dragging: self.dragging,
            sound_playing: self.sound_playing,
            walk_sound_index: self.walk_sound_index,
        }
    }

    fn render_frame(&self) -> RenderFrame {
        RenderFrame {
            pet: self.id,
            species: self.species,
            animation: self.animation,
            x: self.x,
            y: self.y,
            flipped: matches!(self.facing, Facing::Right),
            scale: self.scale,
        }
    }
}

/// Represents the authoritative pet population state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    pets: Vec<Pet>,
    next_pet: u32,
    frame: u64,
    scale: f32,
    sound_enabled: bool,
}

impl World {
    /// Creates an empty world carrying the default scale and sound toggle.
    #[must_use]
    pub fn new() -> Self {
        let defaults = DesiredPopulation::default();
        Self {
            banner: WELCOME_BANNER,
            pets: Vec::new(),
            next_pet: 0,
            frame: 0,
            scale: defaults.scale,
            sound_enabled: defaults.sound_enabled,
        }
    }

    fn pet_mut(&mut self, pet: PetId) -> Option<&mut Pet> {
        self.pets.iter_mut().find(|candidate| candidate.id == pet)
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Tick { surface } => {
            world.frame = world.frame.saturating_add(1);
            out_events.push(Event::TimeAdvanced { frame: world.frame });

            for pet in world.pets.iter_mut() {
                // A pointer override suspends physics and the state countdown.
                if pet.dragging {
                    continue;
                }

                pet.state_timer -= 1;
                let boundary = Boundary::resolve(&surface, pet.width(), pet.height());
                physics::integrate(pet, &boundary, out_events);
            }
        }
        Command::ConfigurePopulation { desired } => {
            world.scale = desired.scale;
            world.sound_enabled = desired.sound_enabled;
            for pet in world.pets.iter_mut() {
                pet.scale = desired.scale;
            }
            out_events.push(Event::PopulationTargetChanged { desired });
        }
        Command::SpawnPet { species } => {
            let id = PetId::new(world.next_pet);
            world.next_pet = world.next_pet.saturating_add(1);
            world.pets.push(Pet::spawned(id, species, world.scale));
            out_events.push(Event::PetSpawned { pet: id, species });
        }
        Command::RemovePet { species } => {
            if let Some(index) = world
                .pets
                .iter()
                .position(|candidate| candidate.species == species)
            {
                let removed = world.pets.remove(index);
                out_events.push(Event::PetRemoved {
                    pet: removed.id,
                    species,
                });
            }
        }
        Command::SetMotion { pet, state, timer } => {
            if let Some(pet) = world.pet_mut(pet) {
                if pet.species.permits(state) {
                    pet.state = state;
                    pet.state_timer = timer;
                }
            }
        }
        Command::SetAnimation { pet, animation } => {
            if let Some(pet) = world.pet_mut(pet) {
                pet.animation = animation;
            }
        }
        Command::SetFacing { pet, facing } => {
            if let Some(pet) = world.pet_mut(pet) {
                pet.facing = facing;
            }
        }
        Command::SetHorizontalVelocity { pet, velocity_x } => {
            if let Some(pet) = world.pet_mut(pet) {
                pet.velocity_x = velocity_x;
            }
        }
        Command::Launch {
            pet,
            velocity_x,
            velocity_y,
        } => {
            if let Some(pet) = world.pet_mut(pet) {
                pet.velocity_x = velocity_x;
                pet.velocity_y = velocity_y;
                pet.grounded = false;
            }
        }
        Command::RequestSound { pet, cue } => {
            let enabled = world.sound_enabled;
            if let Some(pet) = world.pet_mut(pet) {
                sound::sequence(enabled, pet, cue, out_events);
            }
        }
        Command::SoundFinished { pet } => {
            if let Some(pet) = world.pet_mut(pet) {
                pet.sound_playing = false;
            }
        }
        Command::BeginDrag { pet } => {
            if let Some(pet) = world.pet_mut(pet) {
                pet.dragging = true;
                pet.velocity_x = 0.0;
                pet.velocity_y = 0.0;
                out_events.push(Event::DragStarted {
                    pet: pet.id,
                    species: pet.species,
                });
            }
        }
        Command::DragTo {
            pet,
            pointer_x,
            pointer_y,
            delta_x,
            delta_y,
        } => {
            if let Some(pet) = world.pet_mut(pet) {
                if pet.dragging {
                    pet.x = pointer_x - pet.width() / 2.0;
                    pet.y = pointer_y - pet.height() / 2.0;
                    pet.velocity_x = delta_x * DRAG_MOMENTUM;
                    pet.velocity_y = delta_y * DRAG_MOMENTUM;
                }
            }
        }
        Command::EndDrag { pet } => {
            if let Some(pet) = world.pet_mut(pet) {
                if pet.dragging {
                    pet.dragging = false;
                    // Grounding is re-evaluated from scratch on the next tick.
                    pet.grounded = false;
                }
            }
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use chibi_pets_core::{PetView, RenderFrame, Species};

    use super::{Pet, World};

    /// Retrieves the welcome banner that adapters may display on boot.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Captures an id-ordered snapshot view of every live pet.
    #[must_use]
    pub fn pet_view(world: &World) -> PetView {
        PetView::from_snapshots(world.pets.iter().map(Pet::snapshot).collect())
    }

    /// Produces the declarative render output for the current frame.
    #[must_use]
    pub fn render_view(world: &World) -> Vec<RenderFrame> {
        world.pets.iter().map(Pet::render_frame).collect()
    }

    /// Reports whether the sequencer currently lets sounds through.
    #[must_use]
    pub fn sound_enabled(world: &World) -> bool {
        world.sound_enabled
    }

    /// Number of live pets belonging to the provided species.
    #[must_use]
    pub fn live_count(world: &World, species: Species) -> usize {
        world
            .pets
            .iter()
            .filter(|pet| pet.species == species)
            .count()
    }
}
