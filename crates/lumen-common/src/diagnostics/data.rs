//! Diagnostic message table.
//!
//! Codes 3001-3099 belong to definite-assignment analysis, 3101-3199 to
//! supertype decidability.

use super::{DiagnosticCategory, DiagnosticMessage};

pub mod diagnostic_codes {
    pub const NOT_YET_DECLARED: u32 = 3001;
    pub const NOT_DEFINITELY_ASSIGNED: u32 = 3002;
    pub const CANNOT_SPECIFY_VALUE_FROM_HERE: u32 = 3003;
    pub const NOT_DEFINITELY_UNASSIGNED: u32 = 3004;

    pub const INHERITANCE_IS_CIRCULAR: u32 = 3101;
    pub const INHERITANCE_IS_CIRCULAR_IN_SUPERTYPE: u32 = 3102;
    pub const SELF_TYPE_APPEARS_AS_ARGUMENT_IN_SUPERTYPE: u32 = 3103;
    pub const CONTRAVARIANT_TYPE_PARAMETER_IN_CONTRAVARIANT_LOCATION: u32 = 3104;
}

pub mod diagnostic_messages {
    pub const NOT_YET_DECLARED: &str = "not yet declared: {0}";
    pub const NOT_DEFINITELY_ASSIGNED: &str = "not definitely assigned: {0}";
    pub const CANNOT_SPECIFY_VALUE_FROM_HERE: &str = "cannot specify value from here: {0}";
    pub const NOT_DEFINITELY_UNASSIGNED: &str = "not definitely unassigned: {0}";

    pub const INHERITANCE_IS_CIRCULAR: &str =
        "inheritance is circular: definition of {0} is recursive, involving {1}";
    pub const INHERITANCE_IS_CIRCULAR_IN_SUPERTYPE: &str =
        "inheritance is circular: definition of {0} is recursive, involving {1} in supertype {2}";
    pub const SELF_TYPE_APPEARS_AS_ARGUMENT_IN_SUPERTYPE: &str =
        "self type appears as argument in supertype {0} of {1}";
    pub const CONTRAVARIANT_TYPE_PARAMETER_IN_CONTRAVARIANT_LOCATION: &str = "type with contravariant type parameter {0} appears in contravariant location in supertype: {1}";
}

macro_rules! error_message {
    ($name:ident) => {
        DiagnosticMessage {
            code: diagnostic_codes::$name,
            category: DiagnosticCategory::Error,
            message: diagnostic_messages::$name,
        }
    };
}

pub static DIAGNOSTIC_MESSAGES: &[DiagnosticMessage] = &[
    error_message!(NOT_YET_DECLARED),
    error_message!(NOT_DEFINITELY_ASSIGNED),
    error_message!(CANNOT_SPECIFY_VALUE_FROM_HERE),
    error_message!(NOT_DEFINITELY_UNASSIGNED),
    error_message!(INHERITANCE_IS_CIRCULAR),
    error_message!(INHERITANCE_IS_CIRCULAR_IN_SUPERTYPE),
    error_message!(SELF_TYPE_APPEARS_AS_ARGUMENT_IN_SUPERTYPE),
    error_message!(CONTRAVARIANT_TYPE_PARAMETER_IN_CONTRAVARIANT_LOCATION),
];
