#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Per-species behavior state machine that reacts to world events.
//!
//! The system consumes post-physics snapshots plus the event stream and
//! responds exclusively with command batches; it never touches world state
//! directly. Every probabilistic decision draws from a single seedable
//! generator injected at construction, so identical seeds replay identical
//! populations.

mod erpin;
mod speaki;

use chibi_pets_core::{
    AnimationKey, Command, Event, Facing, MotionState, PetId, PetSnapshot, PetView, SoundCue,
    Species, WallSide,
};
use rand_chacha::ChaCha8Rng;

/// Configuration parameters required to construct the behavior system.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    rng_seed: u64,
}

impl Config {
    /// Creates a new configuration using the provided generator seed.
    #[must_use]
    pub const fn new(rng_seed: u64) -> Self {
        Self { rng_seed }
    }
}

/// Pure system that drives species state machines and emits commands.
#[derive(Debug)]
pub struct Behavior {
    rng: ChaCha8Rng,
}

impl Behavior {
    /// Creates a new behavior system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        use rand::SeedableRng as _;

        Self {
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
        }
    }

    /// Consumes events and the pet view to emit behavior commands.
    ///
    /// Drag hooks fire for every [`Event::DragStarted`] in the batch. The
    /// per-tick table runs once when the batch carries
    /// [`Event::TimeAdvanced`], observing each pet's post-physics snapshot
    /// with any wall-contact hook already staged on top of it.
    pub fn handle(&mut self, events: &[Event], pet_view: &PetView, out: &mut Vec<Command>) {
        for event in events {
            if let Event::DragStarted { pet, species } = event {
                rules_for(*species).on_drag_start(*pet, &mut self.rng, out);
            }
        }

        let ticked = events
            .iter()
            .any(|event| matches!(event, Event::TimeAdvanced { .. }));
        let contacts: Vec<(PetId, WallSide, bool)> = events
            .iter()
            .filter_map(|event| match event {
                Event::WallContact {
                    pet,
                    side,
                    grounded,
                    ..
                } => Some((*pet, *side, *grounded)),
                _ => None,
            })
            .collect();

        if !ticked && contacts.is_empty() {
            return;
        }

        for snapshot in pet_view.iter() {
            if snapshot.dragging {
                continue;
            }

            let contact = contacts
                .iter()
                .find(|(contacted, ..)| *contacted == snapshot.id);
            if contact.is_none() && !ticked {
                continue;
            }

            let rules = rules_for(snapshot.species);
            let mut actor = Actor::from_snapshot(snapshot, out);

            if let Some((_, side, grounded)) = contact {
                rules.on_wall_contact(&mut actor, *side, *grounded);
            }

            if ticked {
                rules.on_tick(&mut actor, &mut self.rng);
            }
        }
    }
}

/// Looks up the rule table driving the provided species.
fn rules_for(species: Species) -> &'static dyn SpeciesRules {
    match species {
        Species::Speaki => &speaki::Speaki,
        Species::Erpin => &erpin::Erpin,
    }
}

/// Hooks and tick logic one species contributes to the shared loop.
///
/// These hooks are the only channel through which drags and wall contact
/// reach species logic; the loop itself never branches on a species name.
trait SpeciesRules: Sync {
    /// Reacts to a pointer grabbing one of this species' pets.
    fn on_drag_start(&self, pet: PetId, rng: &mut ChaCha8Rng, out: &mut Vec<Command>);

    /// Reacts to the pet touching a travel-boundary wall this tick.
    fn on_wall_contact(&self, actor: &mut Actor<'_>, side: WallSide, grounded: bool);

    /// Advances the species state machine by one tick.
    fn on_tick(&self, actor: &mut Actor<'_>, rng: &mut ChaCha8Rng);
}

/// Working copy of one pet threaded through a species' hooks.
///
/// Mutators update the scratch fields and push the matching command in one
/// step, so logic later in the same tick observes earlier decisions the way
/// the world will once the batch applies.
struct Actor<'a> {
    pet: PetId,
    state: MotionState,
    timer: i32,
    facing: Facing,
    velocity_x: f32,
    grounded: bool,
    sound_playing: bool,
    walk_sound_index: u8,
    out: &'a mut Vec<Command>,
}

impl<'a> Actor<'a> {
    fn from_snapshot(snapshot: &PetSnapshot, out: &'a mut Vec<Command>) -> Self {
        Self {
            pet: snapshot.id,
            state: snapshot.state,
            timer: snapshot.state_timer,
            facing: snapshot.facing,
            velocity_x: snapshot.velocity_x,
            grounded: snapshot.grounded,
            sound_playing: snapshot.sound_playing,
            walk_sound_index: snapshot.walk_sound_index,
            out,
        }
    }

    fn set_motion(&mut self, state: MotionState, timer: i32) {
        self.state = state;
        self.timer = timer;
        self.out.push(Command::SetMotion {
            pet: self.pet,
            state,
            timer,
        });
    }

    fn set_animation(&mut self, animation: AnimationKey) {
        self.out.push(Command::SetAnimation {
            pet: self.pet,
            animation,
        });
    }

    fn face(&mut self, facing: Facing) {
        if self.facing == facing {
            return;
        }
        self.facing = facing;
        self.out.push(Command::SetFacing {
            pet: self.pet,
            facing,
        });
    }

    fn set_velocity_x(&mut self, velocity_x: f32) {
        self.velocity_x = velocity_x;
        self.out.push(Command::SetHorizontalVelocity {
            pet: self.pet,
            velocity_x,
        });
    }

    fn drive(&mut self, acceleration: f32, direction: Facing) {
        self.set_velocity_x(self.velocity_x + acceleration * direction.horizontal_sign());
    }

    fn clamp_speed(&mut self, cap: f32) {
        if self.velocity_x > cap {
            self.set_velocity_x(cap);
        } else if self.velocity_x < -cap {
            self.set_velocity_x(-cap);
        }
    }

    fn launch(&mut self, velocity_x: f32, velocity_y: f32) {
        self.velocity_x = velocity_x;
        self.grounded = false;
        self.out.push(Command::Launch {
            pet: self.pet,
            velocity_x,
            velocity_y,
        });
    }

    fn request_sound(&mut self, cue: SoundCue) {
        self.out.push(Command::RequestSound { pet: self.pet, cue });
    }
}
