//! Pointer, touch, keyboard and resize handling for the grid.
//!
//! Everything here is toolkit-agnostic: positions arrive as [`GridPoint`]s and
//! time as an `Instant`. The egui layer translates its events into these calls.
//!
//! [`GridPoint`]: crate::services::grid::GridPoint

pub mod controller;
pub mod gesture;
pub mod reorder;
pub mod timers;

pub use controller::{GridLayout, HoverPreview, Intent, InteractionController, InteractionMode, KeyInput};
pub use gesture::{GestureEvent, TouchGesture, TouchPhase};
pub use reorder::ReorderDrag;
pub use timers::{Debouncer, Deadline, MinuteTicker};
