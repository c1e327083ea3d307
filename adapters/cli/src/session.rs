//! Tick driver that pumps commands and events to quiescence each frame.

use anyhow::Result;
use chibi_pets_audio::{AudioSink, PlaybackError};
use chibi_pets_core::{Command, Event, SurfaceFrame};
use chibi_pets_rendering::{stage_frames, Presenter, SurfaceProbe};
use chibi_pets_system_behavior::{Behavior, Config as BehaviorConfig};
use chibi_pets_system_reconcile::Reconciler;
use chibi_pets_world::{apply, query, World};
use log::{debug, warn};

/// Owns the world, the systems and the pending command queue for one run.
///
/// Pointer gestures and configuration changes are queued between frames and
/// drained ahead of the next tick, so their handlers never interleave with a
/// tick in flight. Everything runs cooperatively on the caller's thread.
#[derive(Debug)]
pub struct Session {
    world: World,
    behavior: Behavior,
    reconciler: Reconciler,
    pending: Vec<Command>,
}

impl Session {
    /// Creates a fresh session whose behavior rolls derive from the seed.
    #[must_use]
    pub fn new(rng_seed: u64) -> Self {
        Self {
            world: World::new(),
            behavior: Behavior::new(BehaviorConfig::new(rng_seed)),
            reconciler: Reconciler::default(),
            pending: Vec::new(),
        }
    }

    /// Queues a command to run ahead of the next frame's tick.
    pub fn queue(&mut self, command: Command) {
        self.pending.push(command);
    }

    /// Read-only access to the authoritative world.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Runs up to the requested number of frames, stopping early when the
    /// probe reports an invalidated execution context. Returns the number
    /// of frames actually run.
    ///
    /// # Errors
    ///
    /// Propagates presenter failures; playback failures never surface here.
    pub fn run(
        &mut self,
        frames: u64,
        probe: &mut dyn SurfaceProbe,
        sink: &mut dyn AudioSink,
        presenter: &mut dyn Presenter,
    ) -> Result<u64> {
        let mut completed = 0;
        for _ in 0..frames {
            let Some(surface) = probe.sample() else {
                break;
            };
            self.run_frame(surface, sink, presenter)?;
            completed += 1;
        }
        Ok(completed)
    }

    /// Advances the simulation by exactly one frame.
    ///
    /// Pending commands run first, then the tick, then systems react to the
    /// event stream until no further commands are produced. Sounds that
    /// finished since the previous frame free their slots ahead of the next
    /// one, and the resulting render view goes to the presenter.
    ///
    /// # Errors
    ///
    /// Propagates presenter failures; playback failures never surface here.
    pub fn run_frame(
        &mut self,
        surface: SurfaceFrame,
        sink: &mut dyn AudioSink,
        presenter: &mut dyn Presenter,
    ) -> Result<()> {
        let mut commands = std::mem::take(&mut self.pending);
        commands.push(Command::Tick { surface });

        while !commands.is_empty() {
            let mut events = Vec::new();
            for command in commands.drain(..) {
                apply(&mut self.world, command, &mut events);
            }
            if events.is_empty() {
                break;
            }

            self.route_events(&events, sink, presenter)?;

            let pet_view = query::pet_view(&self.world);
            self.behavior.handle(&events, &pet_view, &mut commands);
            self.reconciler.handle(&events, &pet_view, &mut commands);
        }

        let mut finished = Vec::new();
        sink.poll_finished(&mut finished);
        for pet in finished {
            self.pending.push(Command::SoundFinished { pet });
        }

        presenter.present(&stage_frames(&query::render_view(&self.world)))
    }

    fn route_events(
        &mut self,
        events: &[Event],
        sink: &mut dyn AudioSink,
        presenter: &mut dyn Presenter,
    ) -> Result<()> {
        for event in events {
            match event {
                Event::PetSpawned { pet, species } => presenter.attach(*pet, *species)?,
                Event::PetRemoved { pet, .. } => presenter.detach(*pet),
                Event::SoundStarted { pet, species, file } => {
                    if let Err(error) = sink.play(*pet, *species, *file) {
                        match &error {
                            PlaybackError::AutoplayBlocked => debug!("sound dropped: {error}"),
                            _ => warn!("sound failed: {error}"),
                        }
                        // Free the slot so one bad request cannot starve
                        // the pet's later sounds.
                        self.pending.push(Command::SoundFinished { pet: *pet });
                    }
                }
                _ => {}
            }
        }
        Ok(())
    }
}
