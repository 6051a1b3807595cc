//! Process exit codes.

pub const SUCCESS: i32 = 0;
/// The server or a command failed while running.
pub const RUNTIME_FAILURE: i32 = 1;
/// Bad configuration or a failed preflight; nothing was started.
pub const CONFIG_FAILURE: i32 = 2;
