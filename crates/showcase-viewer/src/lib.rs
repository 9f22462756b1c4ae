// src/lib.rs
//! Interactive viewer for the product showcase.
//!
//! Wires the `showcase` navigation core to a wgpu/winit window: renders the
//! floor grid and slide panels, hit-tests pointer clicks against hotspots,
//! and draws the annotation card, navigation bar and tuning panel with egui.

pub mod app;
pub mod assets;
pub mod camera;
pub mod config;
pub mod renderer;
pub mod ui;
