//! Core utilities for the LTE FDD base-station stack
//!
//! This crate provides fundamental types and utilities used across the LTE stack

/// Git version string, set at compile time
pub const GIT_VERSION: &str = git_version::git_version!(fallback = "unknown");
/// Stack version followed by git version string, e.g., "0.1.0-aabbccdd"
pub const STACK_VERSION: &str = const_format::formatcp!("{}-{}", env!("CARGO_PKG_VERSION"), GIT_VERSION);

pub mod bitstream;
pub mod debug;
pub mod pdu_codec_err;

// Re-export commonly used items
pub use bitstream::{BitReader, BitWriter, MAX_MSG_BITS, MAX_MSG_SIZE};
pub use pdu_codec_err::PduCodecErr;
