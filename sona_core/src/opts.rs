/*!
# Sona: Run Options
*/

use std::{
	num::NonZeroU8,
	path::{
		Path,
		PathBuf,
	},
};



#[derive(Debug, Clone, Eq, PartialEq)]
/// # Run Options.
///
/// Options are set using builder-style methods, like:
///
/// ```
/// use sona_core::RunOptions;
/// use std::num::NonZeroU8;
///
/// let opts = RunOptions::default()
///     .with_disc(NonZeroU8::new(2).unwrap())
///     .with_music_root("/srv/music");
///
/// assert_eq!(opts.disc().get(), 2);
/// assert!(! opts.no_rip());
/// ```
pub struct RunOptions {
	dev: Option<PathBuf>,
	disc: NonZeroU8,
	music_root: Option<PathBuf>,
	no_rip: bool,
}

impl Default for RunOptions {
	fn default() -> Self {
		Self {
			dev: None,
			disc: NonZeroU8::MIN,
			music_root: None,
			no_rip: false,
		}
	}
}

/// ## Setters.
impl RunOptions {
	#[must_use]
	/// # Device.
	///
	/// Use this optical drive rather than searching for one.
	pub fn with_dev<P>(self, dev: P) -> Self
	where P: Into<PathBuf> {
		Self {
			dev: Some(dev.into()),
			..self
		}
	}

	#[must_use]
	/// # Disc Number.
	///
	/// Which disc of a multi-disc release is in the drive. The default is
	/// `1`.
	pub fn with_disc(self, disc: NonZeroU8) -> Self {
		Self {
			disc,
			..self
		}
	}

	#[must_use]
	/// # Music Root.
	///
	/// Finished albums are copied to `<root>/<artist>/<album>/`.
	pub fn with_music_root<P>(self, root: P) -> Self
	where P: Into<PathBuf> {
		Self {
			music_root: Some(root.into()),
			..self
		}
	}

	#[must_use]
	/// # No Rip.
	///
	/// When `true`, stop after resolving the tags. The default is `false`.
	pub fn with_no_rip(self, no_rip: bool) -> Self {
		Self {
			no_rip,
			..self
		}
	}
}

/// # Getters.
impl RunOptions {
	#[must_use]
	/// # Device.
	pub fn dev(&self) -> Option<&Path> { self.dev.as_deref() }

	#[must_use]
	/// # Disc Number.
	pub const fn disc(&self) -> NonZeroU8 { self.disc }

	#[must_use]
	/// # Music Root.
	pub fn music_root(&self) -> Option<&Path> { self.music_root.as_deref() }

	#[must_use]
	/// # No Rip?
	pub const fn no_rip(&self) -> bool { self.no_rip }
}
