//! PDU codecs for the LTE FDD base-station stack
//!
//! Pure bit-exact pack/unpack of 36.321 MAC PDUs and control elements.
//! No I/O and no threads; all state lives in caller-owned records.

pub mod mac;
