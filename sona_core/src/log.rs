/*!
# Sona: Log
*/

use crate::SonaError;
use std::{
	fmt,
	fs::File,
	io::Write,
	path::Path,
	sync::Mutex,
};
use utc2k::FmtUtc2k;



#[derive(Debug, Default)]
/// # Pipeline Log.
///
/// A super basic structured log: one timestamped line per event, appended to
/// an optional file and/or echoed to STDOUT.
///
/// The log is created once by the binary and handed to everything else by
/// reference through [`Context`](crate::Context).
pub struct PipelineLog {
	file: Option<Mutex<File>>,
	stdout: bool,
}

impl PipelineLog {
	#[must_use]
	/// # New (Silent) Instance.
	pub const fn new() -> Self {
		Self {
			file: None,
			stdout: false,
		}
	}

	/// # With File.
	///
	/// Append log lines to `path`, creating it if necessary.
	///
	/// ## Errors
	///
	/// This will return an error if the file cannot be opened for writing.
	pub fn with_file<P>(self, path: P) -> Result<Self, SonaError>
	where P: AsRef<Path> {
		let path = path.as_ref();
		let file = File::options()
			.create(true)
			.append(true)
			.open(path)
			.map_err(|_| SonaError::Write(path.to_string_lossy().into_owned()))?;

		Ok(Self {
			file: Some(Mutex::new(file)),
			..self
		})
	}

	#[must_use]
	/// # With STDOUT.
	///
	/// When `true`, log lines are also printed to STDOUT.
	pub fn with_stdout(self, stdout: bool) -> Self {
		Self {
			stdout,
			..self
		}
	}
}

impl PipelineLog {
	/// # Info.
	pub fn info<D: fmt::Display>(&self, msg: D) { self.push(LogLevel::Info, msg); }

	/// # Error.
	pub fn error<D: fmt::Display>(&self, msg: D) { self.push(LogLevel::Error, msg); }

	/// # Write a Line.
	///
	/// Logging is best-effort; write failures are ignored.
	fn push<D: fmt::Display>(&self, level: LogLevel, msg: D) {
		if self.file.is_none() && ! self.stdout { return; }

		let line = format!("[{}] {:<5} {msg}\n", FmtUtc2k::now(), level.as_str());

		if let Some(Ok(mut file)) = self.file.as_ref().map(Mutex::lock) {
			let _res = file.write_all(line.as_bytes()).and_then(|()| file.flush());
		}

		if self.stdout {
			let writer = std::io::stdout();
			let mut handle = writer.lock();
			let _res = handle.write_all(line.as_bytes()).and_then(|()| handle.flush());
		}
	}
}



#[derive(Debug, Clone, Copy)]
/// # Log Level.
enum LogLevel {
	Error,
	Info,
}

impl LogLevel {
	/// # As Str.
	const fn as_str(self) -> &'static str {
		match self {
			Self::Error => "ERROR",
			Self::Info => "INFO",
		}
	}
}
