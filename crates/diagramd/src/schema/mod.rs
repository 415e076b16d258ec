//! Request and response types for the diagramd API.

pub mod generate;
pub mod render;
pub mod upload;
