//! Rule table for the sleepy punctual wanderer.

use chibi_pets_core::{AnimationKey, Command, MotionState, PetId, SoundCue, WallSide};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::{Actor, SpeciesRules};

const SLEEP_CHANCE: f64 = 0.02;
const IDLE_CHANCE: f64 = 0.12;
const WALK_CHANCE: f64 = 0.82;
const WALK_SLEEP_INTERRUPT_CHANCE: f64 = 0.003;
const FACING_FLIP_CHANCE: f64 = 0.02;
const WALK_SOUND_CHANCE: f64 = 0.3;
const WALK_ACCELERATION: f32 = 1.5;
const MAX_WALK_SPEED: f32 = 2.5;
const TURNAROUND_SPEED: f32 = 1.5;
const WAKE_IDLE_TICKS: i32 = 100;

/// Wanders, dozes off mid-walk, and turns around at walls instead of jumping.
pub(crate) struct Erpin;

impl SpeciesRules for Erpin {
    fn on_drag_start(&self, pet: PetId, rng: &mut ChaCha8Rng, out: &mut Vec<Command>) {
        out.push(Command::SetAnimation {
            pet,
            animation: AnimationKey::Cry,
        });
        out.push(Command::RequestSound {
            pet,
            cue: SoundCue::Punch {
                variant: rng.gen_range(1..=2),
            },
        });
    }

    fn on_wall_contact(&self, actor: &mut Actor<'_>, side: WallSide, _grounded: bool) {
        // Immediate turnaround at any altitude; vertical velocity untouched.
        let away = side.facing_away();
        actor.set_motion(MotionState::Walk, actor.timer);
        actor.face(away);
        actor.set_velocity_x(TURNAROUND_SPEED * away.horizontal_sign());
    }

    fn on_tick(&self, actor: &mut Actor<'_>, rng: &mut ChaCha8Rng) {
        if actor.state == MotionState::Sleeping {
            if actor.velocity_x != 0.0 {
                actor.set_velocity_x(0.0);
            }
            if actor.timer <= 0 {
                actor.set_motion(MotionState::Idle, WAKE_IDLE_TICKS);
                actor.set_animation(AnimationKey::Idle);
            }
            return;
        }

        if !actor.grounded {
            return;
        }

        // A walk can collapse into sleep at any moment, not just on expiry.
        if actor.state == MotionState::Walk && rng.gen::<f64>() < WALK_SLEEP_INTERRUPT_CHANCE {
            actor.set_motion(MotionState::Sleeping, rng.gen_range(300..600));
            actor.set_animation(AnimationKey::Sleep);
            return;
        }

        if actor.timer <= 0 {
            let roll: f64 = rng.gen();
            if roll < SLEEP_CHANCE {
                actor.set_motion(MotionState::Sleeping, rng.gen_range(500..1000));
                actor.set_animation(AnimationKey::Sleep);
            } else if roll < IDLE_CHANCE {
                actor.set_motion(MotionState::Idle, rng.gen_range(100..200));
                actor.set_animation(AnimationKey::Idle);
            } else if roll < WALK_CHANCE {
                actor.set_motion(MotionState::Walk, rng.gen_range(200..400));
                actor.set_animation(AnimationKey::Idle);
                if rng.gen::<f64>() < WALK_SOUND_CHANCE && !actor.sound_playing {
                    actor.request_sound(SoundCue::Hum);
                }
            }
            // Remaining probability mass: stay put and re-roll next tick.
        }

        if actor.state == MotionState::Walk {
            if rng.gen::<f64>() < FACING_FLIP_CHANCE {
                actor.face(actor.facing.flipped());
            }
            actor.drive(WALK_ACCELERATION, actor.facing);
        }

        actor.clamp_speed(MAX_WALK_SPEED);
    }
}
