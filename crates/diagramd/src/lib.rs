//! HTTP gateway for constraint-based diagram rendering.
//!
//! Forwards trio programs (domain, substance, style) to an external renderer
//! subprocess, stores uploaded sketch images under a public media root, and
//! asks a hosted multimodal model to turn a sketch back into trio programs.
//! This crate contains no diagram logic of its own; it is validation, file
//! plumbing, subprocess supervision, and prompt/response shaping.

pub mod config;
pub mod error;
pub mod handlers;
pub mod renderer;
pub mod router;
pub mod schema;
pub mod state;
pub mod vision;
