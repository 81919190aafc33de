//! Utility functions for running child processes.
use crate::{Error, Result};
use std::{
    io::Read,
    process::{Command, Stdio},
};
use tracing::trace;

/// Run an external command with any arguments, discarding its output.
///
/// The child is not waited on: the run loop ignores SIGCHLD so exited
/// children are reaped by init rather than accumulating as zombies.
pub fn spawn<S: Into<String>>(cmd: S) -> Result<()> {
    let s = cmd.into();
    trace!(cmd = %s, "spawning external program");
    let parts = split_command(&s)?;

    Command::new(parts[0])
        .args(&parts[1..])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;

    Ok(())
}

/// Run an external command and return its stdout as a String.
///
/// Unlike [spawn] this blocks until the child exits.
pub fn spawn_for_output<S: Into<String>>(cmd: S) -> Result<String> {
    let s = cmd.into();
    trace!(cmd = %s, "spawning external program for output");
    let parts = split_command(&s)?;

    let mut child = Command::new(parts[0])
        .args(&parts[1..])
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()?;

    let mut out = String::new();
    if let Some(mut stdout) = child.stdout.take() {
        stdout.read_to_string(&mut out)?;
    }
    child.wait()?;

    Ok(out)
}

fn split_command(s: &str) -> Result<Vec<&str>> {
    let parts: Vec<&str> = s.split_whitespace().collect();
    if parts.is_empty() {
        return Err(Error::Custom("empty command".to_string()));
    }

    Ok(parts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_for_output_captures_stdout() {
        let out = spawn_for_output("echo hello world").unwrap();

        assert_eq!(out.trim(), "hello world");
    }

    #[test]
    fn empty_commands_error() {
        assert!(matches!(spawn(""), Err(Error::Custom(_))));
    }
}
