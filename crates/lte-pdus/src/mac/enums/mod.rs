pub mod chan_type;
pub mod lcid;

pub use chan_type::MacChanType;
pub use lcid::LcidClass;
