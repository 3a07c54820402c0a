/*!
# Sona: Run Context
*/

use crate::{
	CommandRunner,
	MetadataSource,
	PipelineLog,
	TocReader,
};
use std::fmt;



#[derive(Clone, Copy)]
/// # Run Context.
///
/// The capabilities a pipeline run depends on, bundled up and passed down
/// explicitly. Everything is borrowed, so the context is cheap to copy.
pub struct Context<'a> {
	/// # External Programs.
	runner: &'a dyn CommandRunner,

	/// # Table of Contents Reader.
	toc: &'a dyn TocReader,

	/// # Metadata Source.
	lookup: &'a dyn MetadataSource,

	/// # Log.
	log: &'a PipelineLog,
}

impl fmt::Debug for Context<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Context")
			.field("log", &self.log)
			.finish_non_exhaustive()
	}
}

impl<'a> Context<'a> {
	#[must_use]
	/// # New.
	pub const fn new(
		runner: &'a dyn CommandRunner,
		toc: &'a dyn TocReader,
		lookup: &'a dyn MetadataSource,
		log: &'a PipelineLog,
	) -> Self {
		Self { runner, toc, lookup, log }
	}

	#[must_use]
	/// # Command Runner.
	pub const fn runner(self) -> &'a dyn CommandRunner { self.runner }

	#[must_use]
	/// # TOC Reader.
	pub const fn toc_reader(self) -> &'a dyn TocReader { self.toc }

	#[must_use]
	/// # Metadata Source.
	pub const fn lookup(self) -> &'a dyn MetadataSource { self.lookup }

	#[must_use]
	/// # Log.
	pub const fn log(self) -> &'a PipelineLog { self.log }
}
