use crate::error::{Result, SvntlError};
use std::process::{Command, Stdio};
use tracing::debug;

/// Capability for running an external command and capturing its stdout.
///
/// The reconstruction engine is generic over this trait so tests can swap in
/// a scripted double instead of spawning `svn`.
pub trait CommandRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<Vec<u8>>;
}

/// Runs commands through `std::process`, one child process per call.
///
/// Stderr is not part of the success path: it is logged and discarded, and a
/// process that writes to stderr but exits zero still succeeds. No retries
/// and no timeout at this layer.
#[derive(Debug, Clone, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<Vec<u8>> {
        let rendered = render_command(program, args);
        debug!(command = %rendered, "spawning");

        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| SvntlError::CommandSpawn {
                command: rendered.clone(),
                source,
            })?;

        if !output.stderr.is_empty() {
            debug!(
                command = %rendered,
                stderr = %String::from_utf8_lossy(&output.stderr),
                "child wrote to stderr"
            );
        }

        if !output.status.success() {
            return Err(SvntlError::CommandFailed {
                command: rendered,
                status: output.status,
            });
        }

        Ok(output.stdout)
    }
}

fn render_command(program: &str, args: &[&str]) -> String {
    let mut rendered = String::from(program);
    for arg in args {
        rendered.push(' ');
        rendered.push_str(arg);
    }
    rendered
}
