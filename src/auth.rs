//! Identifiers, access tokens, and token request options.

pub mod id;
pub mod options;
pub mod token;

pub use id::*;
pub use options::*;
pub use token::{access::*, secret::*};
