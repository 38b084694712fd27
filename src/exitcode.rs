//! Standard exit codes (BSD sysexits.h compatible)

/// Successful termination, including every help and usage path
pub const OK: i32 = 0;

/// Command line usage error
pub const USAGE: i32 = 64;

/// Data format error (undecodable API response)
pub const DATAERR: i32 = 65;

/// Service unavailable (network failure)
pub const UNAVAILABLE: i32 = 69;

/// Internal software error (API rejected the call, unimplemented command)
pub const SOFTWARE: i32 = 70;

/// Input/output error
pub const IOERR: i32 = 74;

/// Configuration error
pub const CONFIG: i32 = 78;
