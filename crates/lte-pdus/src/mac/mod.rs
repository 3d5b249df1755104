//! 36.321 v10.2.0 Medium Access Control layer codecs

pub mod ces;
pub mod enums;
pub mod pdus;
