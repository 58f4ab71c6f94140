//! Software 3D renderer core for text terminals.
//!
//! Turns a scene (meshes + materials + lights + camera) into a frame of
//! colored block glyphs: near-plane clipping in homogeneous clip space,
//! edge-function rasterization with perspective-correct interpolation,
//! z-buffered visibility, per-fragment Blinn-Phong, and ANSI truecolor
//! encoding. Frontends supply an output byte sink (`std::io::Write`) and an
//! input driver (`termrast_hal::InputDriver`); asset ingestion lives behind
//! the [`AssetLoader`] trait.

pub mod controller;
pub mod math;
pub mod render;
pub mod scene;
pub mod smooth;

pub use render::composer::Composer;
pub use scene::{
    AssetLoader, Behavior, BehaviorKind, Camera, Display, Light, Material, Mesh, NullLoader,
    Texture, Triangle,
};
