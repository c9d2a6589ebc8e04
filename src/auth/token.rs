//! Access token model and secret wrapper.

pub mod access;
pub mod secret;
