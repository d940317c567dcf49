//! Model-client seam.
//!
//! deckforge composes prompt text; sending it to a generative model is the
//! job of an external collaborator. This module defines the boundary: the
//! message/request/response types and the [`ModelClient`] trait a concrete
//! client implements. Image stages additionally carry template and material
//! images as [`ImageAttachment`] payloads alongside the composed text.

pub mod client;

pub use client::{
    Choice, GenerationRequest, GenerationResponse, ImageAttachment, ImageRequest, Message,
    ModelClient, Usage,
};
