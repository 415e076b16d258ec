//! HTTP handler modules for the diagramd API.
//!
//! Each sub-module implements one thin handler that parses and validates the
//! request, delegates to [`crate::renderer`] or [`crate::vision`], and
//! returns a JSON response. No rendering or model logic lives in handlers.

pub mod generate;
pub mod render;
pub mod upload;
