//! Priority-ordered first-fit allocation for the haulage engine.
//!
//! This crate provides [`FirstFitAllocator`], the default implementation of
//! the [`Allocator`](haulage_core::Allocator) trait. Each pass empties every
//! vehicle, orders clients VIP first and heaviest first, then places each one
//! on the first already-used vehicle with room, opening the next unused
//! vehicle in registration order only when none has room. Placements are
//! never revisited, so the result is a heuristic packing rather than an
//! optimal one, but it is fully deterministic for a given registry.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod first_fit;

pub use first_fit::{FirstFitAllocator, priority_order};
