//! CLI Exit Code Registry
//!
//! Single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract — scripts rely on them.
//!
//! | Code | Meaning                                         |
//! |------|-------------------------------------------------|
//! | 0    | Success                                         |
//! | 1    | General error (unspecified)                     |
//! | 2    | CLI usage error (clap: bad args)                |
//! | 3    | Invalid pipeline config                         |
//! | 4    | Runtime error (unreadable input, write failure) |
//! | 5    | Empty join result (zero merged countries)       |

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

// 1 (general error) and 2 (usage, emitted by clap) are reserved; every
// failure path here carries a specific code instead.

/// Config failed to parse or validate.
pub const EXIT_INVALID_CONFIG: u8 = 3;

/// IO or other runtime failure outside the core's authority.
pub const EXIT_RUNTIME: u8 = 4;

/// The inner join produced zero records. Outputs are still written
/// (zero rows plus header); the distinct code lets scripts tell "nothing
/// matched" apart from a crash.
pub const EXIT_EMPTY_JOIN: u8 = 5;
