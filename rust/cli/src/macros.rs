//! Output helpers for [`crate::run_with_input`], which reports failures as
//! exit codes rather than `Result`s.

/// `writeln!` that bails out of the enclosing function with
/// [`crate::exit_code::ERROR`] when the stream cannot be written.
///
/// ```ignore
/// write_or_exit!(err, "Interrupted: {}", msg);
/// ```
#[macro_export]
macro_rules! write_or_exit {
    ($dest:expr, $($arg:tt)*) => {
        if writeln!($dest, $($arg)*).is_err() {
            return $crate::exit_code::ERROR;
        }
    };
}
