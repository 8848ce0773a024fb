//! Display abstraction and framebuffer for Lockstep
//!
//! This crate provides:
//! - `PixelDisplay` trait for pixel-addressable monochrome panels
//! - `Framebuffer`, a 1-bit page-organised frame shared by panel drivers
//!
//! # Architecture
//!
//! Drivers own a `Framebuffer` and compose the whole frame in RAM; only
//! `flush` touches the bus, so the panel never shows a half-drawn frame.

#![no_std]

pub mod backend;
pub mod framebuffer;

// Re-export key types
pub use backend::{DisplayError, PixelDisplay};
pub use framebuffer::{Framebuffer, HEIGHT, PAGES, WIDTH};
