//! Macro for implementing Display and FromStr for name-mapped enums
//!
//! Backends are addressed by stable names (`v_26`, `v_14`, ...) in
//! configuration files and environment variables. This macro keeps the
//! mapping in one place.
//!
//! # Example
//!
//! ```rust
//! use jobapi_domain::impl_enum_name_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Family {
//!     JobScheduler,
//!     AlarmManager,
//! }
//!
//! impl_enum_name_conversions!(Family {
//!     JobScheduler => "job_scheduler",
//!     AlarmManager => "alarm_manager",
//! });
//!
//! assert_eq!(Family::AlarmManager.to_string(), "alarm_manager");
//! assert_eq!("JOB_SCHEDULER".parse::<Family>(), Ok(Family::JobScheduler));
//! ```

/// Implements Display and FromStr traits for name-mapped enums
///
/// - Display writes the mapped lowercase name
/// - FromStr parses case-insensitively and trims surrounding whitespace
#[macro_export]
macro_rules! impl_enum_name_conversions {
    ($enum_name:ident { $($variant:ident => $str:literal),+ $(,)? }) => {
        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(Self::$variant => f.write_str($str),)+
                }
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($str => Ok(Self::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }
    };
}
