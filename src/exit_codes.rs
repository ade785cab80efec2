//! Exit code constants for the tempdd CLI.
//!
//! - 0: Success
//! - 1: User error (bad command, unknown stage/action, uninitialized project)
//! - 2: Configuration error (workflow definition or template is malformed)
//! - 4: Lock acquisition failure

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad command string, unknown names, or missing project state.
pub const USER_ERROR: i32 = 1;

/// Configuration error: invalid workflow definition or template file.
pub const CONFIG_ERROR: i32 = 2;

/// Lock acquisition failure: another invocation holds the project state lock.
pub const LOCK_FAILURE: i32 = 4;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct() {
        let codes = [SUCCESS, USER_ERROR, CONFIG_ERROR, LOCK_FAILURE];
        for (i, &a) in codes.iter().enumerate() {
            for (j, &b) in codes.iter().enumerate() {
                if i != j {
                    assert_ne!(a, b, "Exit codes must be distinct");
                }
            }
        }
    }

    #[test]
    fn success_is_zero() {
        assert_eq!(SUCCESS, 0);
        assert_ne!(USER_ERROR, 0);
    }
}
