#[derive(Debug, PartialEq, Eq)]
pub enum PduCodecErr {
    BufferEnded { field: Option<&'static str> },
    InvalidValue { field: &'static str, value: u64 },
    TooManyEntries { field: &'static str, count: usize },
    InconsistentLength { expected: usize, found: usize },
}

/// Checks whether a value matches an expected value. If not, returns PduCodecErr::InvalidValue
#[macro_export]
macro_rules! expect_value {
    ($value:ident, $expected:expr) => {
        $crate::expect_value!(@inner $value, $expected, stringify!($value))
    };
    ($value:expr, $expected:expr, $field:expr) => {
        $crate::expect_value!(@inner $value, $expected, $field)
    };

    (@inner $value:expr, $expected:expr, $field:expr) => {{
        let val = $value;
        if val == $expected {
            Ok(())
        } else {
            Err($crate::pdu_codec_err::PduCodecErr::InvalidValue {
                field: $field,
                value: val.into(),
            })
        }
    }};
}

#[macro_export]
macro_rules! let_field {
    ($buf:expr, $ident:ident, $bits:expr) => {
        let $ident = $buf.read_field($bits, stringify!($ident))?;
    };
}
