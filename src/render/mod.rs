//! Render cycle and link-state sync

pub mod links;
mod renderer;

pub use links::sync_active_links;
pub use renderer::{RenderCycle, RenderOutcome, RenderPhase, Renderer};
