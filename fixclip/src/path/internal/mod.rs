//! Engines behind the public path operations.
mod clip_edges;
mod clip_engine;
mod clip_output;
mod offset_engine;

pub(crate) use clip_engine::ClipEngine;
pub(crate) use offset_engine::OffsetEngine;
