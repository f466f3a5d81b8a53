//! Weighted random-selection wheel.
//!
//! This crate turns a list of weighted participants into a wheel: it expands
//! weights into a slot pool, partitions the circle into wedges, draws a
//! winner, plans a rotation that stops the winner under a fixed pointer, and
//! animates toward it frame by frame. It compiles to WebAssembly for the
//! browser host and as a plain library for native hosts and tests.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::WheelCore`] |
//! | [`participant`] | Participants, settings, and the roster |
//! | [`weight`] | Slot count per participant |
//! | [`pool`] | Ordered slot pool construction |
//! | [`segment`] | Wedge partitioning and same-owner merging |
//! | [`select`] | Injectable random source and winner draw |
//! | [`rotation`] | Landing wedge choice and terminal rotation |
//! | [`animation`] | Spin state machine and easing |
//! | [`render`] | Frame contract and 2D-canvas drawing |
//! | [`storage`] | Versioned state record and JSON file store |
//! | [`consts`] | Shared numeric constants (defaults, ranges, drawing sizes) |

pub mod animation;
pub mod consts;
pub mod engine;
pub mod participant;
pub mod pool;
pub mod render;
pub mod rotation;
pub mod segment;
pub mod select;
pub mod storage;
pub mod weight;
