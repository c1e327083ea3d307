#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared presentation contracts for chibi-pets adapters.
//!
//! The engine emits declarative [`RenderFrame`] tuples; adapters resolve
//! them into positioned sprite instances and apply them to whatever surface
//! the host provides. Nothing in this crate draws pixels.

use anyhow::{bail, Result as AnyResult};
use chibi_pets_core::{
    AnimationKey, PetId, RenderFrame, Species, SurfaceFrame, PET_BASE_HEIGHT, PET_BASE_WIDTH,
};
use glam::Vec2;

/// Resolves the sprite asset shown for a species and animation key.
///
/// The returned path is relative to the externally resolved asset root.
#[must_use]
pub const fn sprite_file(species: Species, animation: AnimationKey) -> &'static str {
    match (species, animation) {
        (Species::Speaki, AnimationKey::Idle) => "speaki/cheerful.png",
        (Species::Speaki, AnimationKey::Cry) => "speaki/cry.png",
        (Species::Speaki, AnimationKey::Jump) => "speaki/happy.png",
        (Species::Erpin, AnimationKey::Idle) => "erpin/cheerful.png",
        (Species::Erpin, AnimationKey::Cry) => "erpin/cry.png",
        (Species::Erpin, AnimationKey::Sleep) => "erpin/sleeping.png",
        // Keys a species never enters fall back to its idle art.
        (Species::Speaki, AnimationKey::Sleep) => "speaki/cheerful.png",
        (Species::Erpin, AnimationKey::Jump) => "erpin/cheerful.png",
    }
}

/// Parameters describing how one pet should be drawn this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpriteInstance {
    /// Pet the sprite belongs to.
    pub pet: PetId,
    /// Resolved sprite asset path.
    pub sprite: &'static str,
    /// Position of the sprite box's top-left corner in surface units.
    pub translation: Vec2,
    /// Scaled size of the sprite box in surface units.
    pub size: Vec2,
    /// Whether the sprite should be mirrored around its vertical axis.
    pub flip_x: bool,
}

/// Stages the engine's render output into drawable sprite instances.
#[must_use]
pub fn stage_frames(frames: &[RenderFrame]) -> Vec<SpriteInstance> {
    frames
        .iter()
        .map(|frame| SpriteInstance {
            pet: frame.pet,
            sprite: sprite_file(frame.species, frame.animation),
            translation: Vec2::new(frame.x, frame.y),
            size: Vec2::new(PET_BASE_WIDTH, PET_BASE_HEIGHT) * frame.scale,
            flip_x: frame.flipped,
        })
        .collect()
}

/// Surface-side renderer that owns one drawable element per live pet.
pub trait Presenter {
    /// Creates the render surface backing a newly spawned pet.
    ///
    /// # Errors
    ///
    /// Returns an error when the host surface refuses the new element.
    fn attach(&mut self, pet: PetId, species: Species) -> AnyResult<()>;

    /// Destroys the render surface of a removed pet.
    fn detach(&mut self, pet: PetId);

    /// Applies the staged sprite instances for the current frame.
    ///
    /// # Errors
    ///
    /// Returns an error when an instance references a pet without a surface.
    fn present(&mut self, instances: &[SpriteInstance]) -> AnyResult<()>;
}

/// Samples the hosting surface immediately before each tick.
pub trait SurfaceProbe {
    /// Returns the current surface geometry, or `None` once the hosting
    /// execution context has been invalidated. A `None` stops the tick
    /// driver permanently; it is a shutdown signal, not an error.
    fn sample(&mut self) -> Option<SurfaceFrame>;
}

/// Probe for hosts whose surface never moves, such as headless runs.
#[derive(Clone, Copy, Debug)]
pub struct FixedSurface {
    frame: SurfaceFrame,
}

impl FixedSurface {
    /// Creates a probe that always reports the provided geometry.
    #[must_use]
    pub const fn new(frame: SurfaceFrame) -> Self {
        Self { frame }
    }
}

impl SurfaceProbe for FixedSurface {
    fn sample(&mut self) -> Option<SurfaceFrame> {
        Some(self.frame)
    }
}

/// Presenter that records its instructions instead of drawing.
#[derive(Debug, Default)]
pub struct HeadlessPresenter {
    attached: Vec<(PetId, Species)>,
    last_frame: Vec<SpriteInstance>,
    presented_frames: u64,
}

impl HeadlessPresenter {
    /// Pets that currently own a render surface.
    #[must_use]
    pub fn attached(&self) -> &[(PetId, Species)] {
        &self.attached
    }

    /// Sprite instances applied by the most recent present call.
    #[must_use]
    pub fn last_frame(&self) -> &[SpriteInstance] {
        &self.last_frame
    }

    /// Number of frames presented so far.
    #[must_use]
    pub const fn presented_frames(&self) -> u64 {
        self.presented_frames
    }
}

impl Presenter for HeadlessPresenter {
    fn attach(&mut self, pet: PetId, species: Species) -> AnyResult<()> {
        if self.attached.iter().any(|(existing, _)| *existing == pet) {
            bail!("pet {} already owns a render surface", pet.get());
        }
        self.attached.push((pet, species));
        Ok(())
    }

    fn detach(&mut self, pet: PetId) {
        self.attached.retain(|(existing, _)| *existing != pet);
    }

    fn present(&mut self, instances: &[SpriteInstance]) -> AnyResult<()> {
        for instance in instances {
            if !self
                .attached
                .iter()
                .any(|(existing, _)| *existing == instance.pet)
            {
                bail!("pet {} has no render surface", instance.pet.get());
            }
        }
        self.last_frame = instances.to_vec();
        self.presented_frames += 1;
        Ok(())
    }
}
