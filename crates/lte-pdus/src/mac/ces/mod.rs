//! MAC control elements, 36.321 v10.2.0 §6.1.3

pub mod act_deact;
pub mod bsr;
pub mod c_rnti;
pub mod ext_power_headroom;
pub mod mch_sched_info;
pub mod power_headroom;
pub mod ta_command;
pub mod ue_con_res_id;

pub use act_deact::ActivationDeactivation;
pub use bsr::{LongBsr, ShortBsr, TruncatedBsr};
pub use c_rnti::CRnti;
pub use ext_power_headroom::{EphCell, ExtPowerHeadroom};
pub use mch_sched_info::{MchSchedItem, MchSchedulingInfo};
pub use power_headroom::PowerHeadroom;
pub use ta_command::TimingAdvanceCommand;
pub use ue_con_res_id::UeContentionResolutionId;
