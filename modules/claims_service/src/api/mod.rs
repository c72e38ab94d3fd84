//! Read-model projection layer
//!
//! DTOs and mappers for the external representation; the transport that
//! carries them (HTTP or otherwise) lives outside this module.

pub mod dto;
pub mod mapper;
