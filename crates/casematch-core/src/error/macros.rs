//! Error macros for casematch

/// Macro for creating invalid value errors
#[macro_export]
macro_rules! bail_invalid {
    ($context:expr, $value:expr) => {
        return Err($crate::error::CaseMatchError::invalid_value($context, $value))
    };
}

/// Macro for rejecting records that are not documents
#[macro_export]
macro_rules! bail_input {
    ($($arg:tt)*) => {
        return Err($crate::error::CaseMatchError::invalid_input(format!($($arg)*)))
    };
}

/// Macro for creating usage errors
#[macro_export]
macro_rules! bail_usage {
    ($msg:expr) => {
        return Err($crate::error::CaseMatchError::UsageError($msg.to_string()))
    };
}
