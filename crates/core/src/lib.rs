#![deny(unsafe_code)]
//! Core types for the noisebed GLSL noise testbed.
//!
//! Provides the fixed permutation/gradient tables, the CPU-side lookup
//! texture builders, run-time render parameters with debounced input
//! handling, and frame-rate bookkeeping. GL-facing code (shader program
//! lifecycle, texture upload, per-frame uniform synchronization) lives in
//! [`render`] behind the `render` feature.

pub mod fps;
pub mod lut;
pub mod params;
pub mod tables;

#[cfg(feature = "render")]
pub mod render;

pub use fps::FpsCounter;
pub use params::{OctaveStep, ParameterController, RenderParameters};
