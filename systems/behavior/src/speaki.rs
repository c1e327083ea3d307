//! Rule table for the cheerful wanderer.

use chibi_pets_core::{AnimationKey, Command, MotionState, PetId, SoundCue, WallSide};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::{Actor, SpeciesRules};

const IDLE_CHANCE: f64 = 0.02;
const WALK_LEFT_CHANCE: f64 = 0.52;
const WALK_ACCELERATION: f32 = 0.05;
const MAX_WALK_SPEED: f32 = 1.5;
const JUMP_VELOCITY: f32 = -10.0;
const WALL_KICK_SPEED: f32 = 2.0;

/// Mostly walks, rarely idles, and jumps off walls.
pub(crate) struct Speaki;

impl SpeciesRules for Speaki {
    fn on_drag_start(&self, pet: PetId, _rng: &mut ChaCha8Rng, out: &mut Vec<Command>) {
        out.push(Command::SetAnimation {
            pet,
            animation: AnimationKey::Cry,
        });
        out.push(Command::RequestSound {
            pet,
            cue: SoundCue::Cry,
        });
    }

    fn on_wall_contact(&self, actor: &mut Actor<'_>, side: WallSide, grounded: bool) {
        // Only a grounded pet converts wall contact into a jump.
        if !grounded {
            return;
        }

        actor.set_motion(MotionState::Jumping, actor.timer);
        actor.set_animation(AnimationKey::Jump);
        actor.request_sound(SoundCue::Jump);

        let away = side.facing_away();
        actor.face(away);
        actor.launch(WALL_KICK_SPEED * away.horizontal_sign(), JUMP_VELOCITY);
    }

    fn on_tick(&self, actor: &mut Actor<'_>, rng: &mut ChaCha8Rng) {
        if !actor.grounded {
            return;
        }

        if actor.timer <= 0 {
            let roll: f64 = rng.gen();
            if roll < IDLE_CHANCE {
                actor.set_motion(MotionState::Idle, rng.gen_range(50..100));
                actor.set_animation(AnimationKey::Idle);
            } else if roll < WALK_LEFT_CHANCE {
                actor.set_motion(MotionState::WalkLeft, rng.gen_range(600..1000));
                actor.set_animation(AnimationKey::Idle);
            } else {
                actor.set_motion(MotionState::WalkRight, rng.gen_range(600..1000));
                actor.set_animation(AnimationKey::Idle);
            }
        }

        if let Some(direction) = actor.state.walk_direction(actor.facing) {
            actor.drive(WALK_ACCELERATION, direction);
            actor.face(direction);
        }

        actor.clamp_speed(MAX_WALK_SPEED);

        if actor.state.walk_direction(actor.facing).is_some() && !actor.sound_playing {
            actor.request_sound(SoundCue::Walk {
                index: actor.walk_sound_index,
            });
        }
    }
}
