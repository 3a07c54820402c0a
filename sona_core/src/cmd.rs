/*!
# Sona: External Commands
*/

use crate::SonaError;
use std::{
	path::Path,
	process::Command,
};



#[derive(Debug, Clone, Default, Eq, PartialEq)]
/// # Command Output.
///
/// The captured result of a finished external program.
pub struct CommandOutput {
	/// # STDOUT.
	pub stdout: Vec<u8>,

	/// # STDERR.
	pub stderr: Vec<u8>,

	/// # Exit Code.
	///
	/// This is `None` if the program was killed by a signal.
	pub status: Option<i32>,
}

impl CommandOutput {
	#[must_use]
	/// # Success?
	pub const fn success(&self) -> bool { matches!(self.status, Some(0)) }

	#[must_use]
	/// # Failure Detail.
	///
	/// Return the trimmed STDERR, or the exit status if that's empty.
	pub fn detail(&self) -> String {
		let err = String::from_utf8_lossy(&self.stderr);
		let err = err.trim();
		if ! err.is_empty() { err.to_owned() }
		else if let Some(code) = self.status { format!("exit status {code}") }
		else { "terminated by signal".to_owned() }
	}
}



/// # Command Runner.
///
/// Every external program Sona leans on (`udevadm`, `cdparanoia`, `ffmpeg`)
/// is run through this trait.
pub trait CommandRunner {
	/// # Run.
	///
	/// Run `program` with `args`, optionally from within `cwd`, wait for it to
	/// finish, and return what it had to say.
	///
	/// ## Errors
	///
	/// This returns an error only if the program could not be started at all;
	/// a non-zero exit is reported through [`CommandOutput::status`].
	fn run(&self, program: &str, args: &[&str], cwd: Option<&Path>)
	-> Result<CommandOutput, SonaError>;
}



#[derive(Debug, Clone, Copy, Default)]
/// # System Runner.
///
/// The real thing: `std::process::Command`, blocking until exit.
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
	fn run(&self, program: &str, args: &[&str], cwd: Option<&Path>)
	-> Result<CommandOutput, SonaError> {
		let mut cmd = Command::new(program);
		cmd.args(args);
		if let Some(cwd) = cwd { cmd.current_dir(cwd); }

		let out = cmd.output()
			.map_err(|e| SonaError::Command(program.to_owned(), e.to_string()))?;

		Ok(CommandOutput {
			stdout: out.stdout,
			stderr: out.stderr,
			status: out.status.code(),
		})
	}
}
