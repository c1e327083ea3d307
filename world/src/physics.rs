//! Discrete-time integrator that advances one pet by one tick.

use chibi_pets_core::{AnimationKey, Boundary, Event, MotionState, WallSide};

use crate::Pet;

/// Downward acceleration in units per tick squared.
const GRAVITY: f32 = 0.5;

/// One-shot horizontal damping applied on the landing edge.
const LANDING_DAMPING: f32 = 0.8;

/// Horizontal damping applied on every grounded tick.
const GROUND_FRICTION: f32 = 0.95;

/// Velocity multiplier applied on wall contact; inverts and halves.
const WALL_REBOUND: f32 = -0.5;

/// Integrates gravity, floor and wall collision for a single pet.
///
/// Wall contact is reported through [`Event::WallContact`]; that event is the
/// only channel through which collisions reach species behavior.
pub(crate) fn integrate(pet: &mut Pet, boundary: &Boundary, out_events: &mut Vec<Event>) {
    pet.velocity_y += GRAVITY;
    pet.y += pet.velocity_y;
    pet.x += pet.velocity_x;

    if pet.y >= boundary.floor_y {
        pet.y = boundary.floor_y;
        pet.velocity_y = 0.0;

        if !pet.grounded {
            pet.grounded = true;
            pet.velocity_x *= LANDING_DAMPING;

            if pet.state == MotionState::Jumping {
                pet.state = MotionState::Idle;
                pet.animation = AnimationKey::Idle;
            }
        }

        pet.velocity_x *= GROUND_FRICTION;
    } else {
        pet.grounded = false;
    }

    if pet.x <= boundary.min_x {
        pet.x = boundary.min_x;
        pet.velocity_x *= WALL_REBOUND;
        out_events.push(Event::WallContact {
            pet: pet.id,
            species: pet.species,
            side: WallSide::Left,
            grounded: pet.grounded,
        });
    } else if pet.x >= boundary.max_x {
        pet.x = boundary.max_x;
        pet.velocity_x *= WALL_REBOUND;
        out_events.push(Event::WallContact {
            pet: pet.id,
            species: pet.species,
            side: WallSide::Right,
            grounded: pet.grounded,
        });
    }
}
