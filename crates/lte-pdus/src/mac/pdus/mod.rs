pub mod mac_pdu;
pub mod rar_pdu;

pub use mac_pdu::{MacPdu, MacSubheader, SubheaderPayload, MAX_PDU_SUBHEADERS};
pub use rar_pdu::{Rar, RarPdu};
