//! Logical channel ID values from 36.321 v10.2.0 tables 6.2.1-1, 6.2.1-2 and 6.2.1-4

use super::chan_type::MacChanType;

// DL-SCH (table 6.2.1-1)
pub const DLSCH_CCCH_LCID: u8 = 0x00;
pub const DLSCH_DCCH_LCID: u8 = 0x01;
pub const DLSCH_ACTIVATION_DEACTIVATION_LCID: u8 = 0x1B;
pub const DLSCH_UE_CONTENTION_RESOLUTION_ID_LCID: u8 = 0x1C;
pub const DLSCH_TA_COMMAND_LCID: u8 = 0x1D;
pub const DLSCH_DRX_COMMAND_LCID: u8 = 0x1E;
pub const DLSCH_PADDING_LCID: u8 = 0x1F;

// UL-SCH (table 6.2.1-2)
pub const ULSCH_CCCH_LCID: u8 = 0x00;
pub const ULSCH_DCCH_LCID: u8 = 0x01;
pub const ULSCH_EXT_POWER_HEADROOM_REPORT_LCID: u8 = 0x19;
pub const ULSCH_POWER_HEADROOM_REPORT_LCID: u8 = 0x1A;
pub const ULSCH_C_RNTI_LCID: u8 = 0x1B;
pub const ULSCH_TRUNCATED_BSR_LCID: u8 = 0x1C;
pub const ULSCH_SHORT_BSR_LCID: u8 = 0x1D;
pub const ULSCH_LONG_BSR_LCID: u8 = 0x1E;
pub const ULSCH_PADDING_LCID: u8 = 0x1F;

// MCH (table 6.2.1-4)
pub const MCH_MCCH_LCID: u8 = 0x00;
pub const MCH_SCHEDULING_INFORMATION_LCID: u8 = 0x1E;
pub const MCH_PADDING_LCID: u8 = 0x1F;

/// What a subheader's payload is, as determined by the `(channel, LCID)` pair.
/// Both pack and unpack route through this classification so the two sides
/// can never disagree on a subheader's interpretation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LcidClass {
    /// Byte passthrough, including every LCID this codec has no CE for
    Sdu,
    ActDeact,
    UeConResId,
    TaCommand,
    DrxCommand,
    Padding,
    ExtPowerHeadroom,
    PowerHeadroom,
    CRnti,
    TruncatedBsr,
    ShortBsr,
    LongBsr,
    MchSchedInfo,
}

impl LcidClass {
    pub fn classify(chan_type: MacChanType, lcid: u8) -> LcidClass {
        match chan_type {
            MacChanType::Dlsch => match lcid {
                DLSCH_ACTIVATION_DEACTIVATION_LCID => LcidClass::ActDeact,
                DLSCH_UE_CONTENTION_RESOLUTION_ID_LCID => LcidClass::UeConResId,
                DLSCH_TA_COMMAND_LCID => LcidClass::TaCommand,
                DLSCH_DRX_COMMAND_LCID => LcidClass::DrxCommand,
                DLSCH_PADDING_LCID => LcidClass::Padding,
                _ => LcidClass::Sdu,
            },
            MacChanType::Ulsch => match lcid {
                ULSCH_EXT_POWER_HEADROOM_REPORT_LCID => LcidClass::ExtPowerHeadroom,
                ULSCH_POWER_HEADROOM_REPORT_LCID => LcidClass::PowerHeadroom,
                ULSCH_C_RNTI_LCID => LcidClass::CRnti,
                ULSCH_TRUNCATED_BSR_LCID => LcidClass::TruncatedBsr,
                ULSCH_SHORT_BSR_LCID => LcidClass::ShortBsr,
                ULSCH_LONG_BSR_LCID => LcidClass::LongBsr,
                ULSCH_PADDING_LCID => LcidClass::Padding,
                _ => LcidClass::Sdu,
            },
            MacChanType::Mch => match lcid {
                MCH_SCHEDULING_INFORMATION_LCID => LcidClass::MchSchedInfo,
                MCH_PADDING_LCID => LcidClass::Padding,
                _ => LcidClass::Sdu,
            },
        }
    }

    /// Whether a non-final subheader with this classification carries a
    /// length field. Fixed-size CEs and padding are implicit on DL-SCH and
    /// UL-SCH; every MCH subheader carries a length.
    pub fn has_length_field(self, chan_type: MacChanType) -> bool {
        match chan_type {
            MacChanType::Dlsch => matches!(self, LcidClass::Sdu),
            MacChanType::Ulsch => matches!(self, LcidClass::Sdu | LcidClass::ExtPowerHeadroom),
            MacChanType::Mch => true,
        }
    }
}
