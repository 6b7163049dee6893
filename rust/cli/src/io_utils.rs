//! Small I/O helpers shared by the interactive and file-backed commands.

use std::io::{self, BufRead};
use std::path::Path;

/// Reads a line of input from a buffered reader, blocking until available.
///
/// The line is trimmed. `Ok(None)` means the input is closed (EOF). Bytes that
/// are not valid UTF-8 are replaced rather than rejected, so a garbled line
/// reaches the caller as ordinary unrecognized input.
///
/// # Example
///
/// ```rust
/// use std::io::Cursor;
/// # use blackjack_cli::io_utils::read_stdin_line;
///
/// let mut input = Cursor::new("  100 \n");
/// assert_eq!(read_stdin_line(&mut input).unwrap(), Some("100".to_string()));
/// assert_eq!(read_stdin_line(&mut input).unwrap(), None);
/// ```
pub fn read_stdin_line(stdin: &mut dyn BufRead) -> io::Result<Option<String>> {
    let mut buf = Vec::new();
    if stdin.read_until(b'\n', &mut buf)? == 0 {
        return Ok(None); // EOF
    }
    Ok(Some(String::from_utf8_lossy(&buf).trim().to_string()))
}

/// Creates the parent directory of `path` if it does not exist yet.
pub fn ensure_parent_dir(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}
