use std::io::Write;
use std::process::{Command, ExitStatus, Stdio};

/// Feeds a fetched script to an interpreter's stdin (`sh -s` / `bash -s`),
/// forwarding `args` positionally and `envs` through the child environment.
/// The child inherits stdout/stderr so the vendor installer talks to the
/// operator directly.
pub(crate) fn pipe_to_interpreter(
    interpreter: &str,
    script: &str,
    args: &[String],
    envs: &[(&str, &str)],
) -> std::io::Result<ExitStatus> {
    let mut command = Command::new(interpreter);
    command.arg("-s").args(args).stdin(Stdio::piped());
    for (key, value) in envs {
        command.env(key, value);
    }

    let mut child = command.spawn()?;
    if let Some(stdin) = child.stdin.as_mut() {
        stdin.write_all(script.as_bytes())?;
    }
    // Closes stdin so the interpreter sees EOF.
    drop(child.stdin.take());

    child.wait()
}
