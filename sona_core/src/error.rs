/*!
# Sona: Errors
*/

use cdtoc::TocError;
use fyi_msg::Msg;
use std::{
	error::Error,
	fmt,
};



#[cfg(feature = "bin")]
/// # Help Text.
const HELP: &str = concat!(r"
Sona v", env!("CARGO_PKG_VERSION"), r"
Rip an audio CD to FLAC and tag it from MusicBrainz.

USAGE:
    sona [OPTIONS] [DISC]

ARGS:
    <DISC>            Which disc of a multi-disc release is in the drive.
                      [default: 1]

OPTIONS:
    -d, --dev <PATH>  The device path for the optical drive containing the CD
                      of interest, like /dev/sr0. [default: auto]
    -l, --log <PATH>  Append the structured run log to this file.
    -m, --music-root <PATH>
                      The root of the music library. Tracks are saved to
                      <PATH>/<ARTIST>/<ALBUM>/<NN>. <TITLE>.flac.
                      [default: $SONA_MUSIC_ROOT]

MISCELLANEOUS:
    -h, --help        Print help information to STDOUT and exit.
    -v, --verbose     Echo the structured run log to STDOUT.
    -V, --version     Print version information to STDOUT and exit.
        --no-rip      Resolve the drive, disc, release, and tags, print them
                      to STDERR, and exit (without ripping anything).

REQUIREMENTS:
    udevadm, cdparanoia, and ffmpeg must be installed and in the PATH.
");



#[derive(Debug, Clone, Eq, PartialEq)]
/// # Errors.
pub enum SonaError {
	/// # CDTOC passthrough.
	Cdtoc(TocError),

	/// # External command failed.
	Command(String, String),

	/// # Copy/install failure.
	Copy(String),

	/// # Metadata decode failure.
	Decode(String),

	/// # Property query failure.
	DeviceQuery(String, String),

	/// # Invalid disc number.
	DiscNumber,

	/// # Unable to read the table of contents.
	DiscRead(String),

	/// # Unreadable FLAC container.
	FlacRead(String),

	/// # Unable to save a FLAC container.
	FlacWrite(String),

	/// # Missing transcoded track.
	MissingTrack(String),

	/// # Missing music root.
	MusicRoot,

	/// # No CD-format release.
	NoCdRelease,

	/// # No optical drive.
	NoDrive,

	/// # Missing medium.
	NoMedium(u8),

	/// # Response has no release list.
	NoReleases,

	/// # Unable to read a directory.
	ReadDir(String),

	/// # Rename failure.
	Rename(String, String),

	/// # Remote lookup failure.
	Request(String),

	/// # Invalid track number.
	TrackNumber(String),

	/// # Unexpected rip output.
	TrackFile(String),

	/// # Working directory.
	WorkDir,

	/// # Writing to disk.
	Write(String),

	#[cfg(feature = "bin")]
	/// # Invalid CLI arg.
	CliArg(String),

	#[cfg(feature = "bin")]
	/// # CLI Parsing failure.
	CliParse(&'static str),

	#[cfg(feature = "bin")]
	/// # Print Help (Not an Error).
	PrintHelp,

	#[cfg(feature = "bin")]
	/// # Print Version (Not an Error).
	PrintVersion,
}

impl Error for SonaError {}

impl From<TocError> for SonaError {
	#[inline]
	fn from(err: TocError) -> Self { Self::Cdtoc(err) }
}

impl From<SonaError> for Msg {
	#[inline]
	fn from(src: SonaError) -> Self { Self::error(src.to_string()) }
}

impl fmt::Display for SonaError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Cdtoc(s) => write!(f, "{s}"),
			Self::Command(cmd, s) => write!(f, "{cmd} failed: {s}"),
			Self::Copy(s) => write!(f, "Unable to copy {s} to the music library."),
			Self::Decode(s) => write!(f, "Unable to parse the MusicBrainz response: {s}"),
			Self::DeviceQuery(dev, s) => write!(f, "Unable to query the properties of {dev}: {s}"),
			Self::DiscNumber => f.write_str("The disc number must be a positive integer."),
			Self::DiscRead(s) => write!(f, "Unable to read the table of contents from {s}."),
			Self::FlacRead(s) => write!(f, "Unable to read FLAC file {s}."),
			Self::FlacWrite(s) => write!(f, "Unable to save FLAC file {s}."),
			Self::MissingTrack(s) => write!(f, "The rip produced no {s}."),
			Self::MusicRoot => f.write_str("No music root; use -m/--music-root or set SONA_MUSIC_ROOT."),
			Self::NoCdRelease => f.write_str("No CD release found."),
			Self::NoDrive => f.write_str("No CD drive found."),
			Self::NoMedium(n) => write!(f, "The release has no CD medium for disc #{n}."),
			Self::NoReleases => f.write_str("Incomplete metadata schema; the response has no release list."),
			Self::ReadDir(s) => write!(f, "Unable to read directory {s}."),
			Self::Rename(a, b) => write!(f, "Unable to rename {a} to {b}."),
			Self::Request(s) => write!(f, "MusicBrainz request failed: {s}"),
			Self::TrackNumber(s) => write!(f, "Unable to parse track number {s:?}."),
			Self::TrackFile(s) => write!(f, "Unexpected rip output {s}."),
			Self::WorkDir => f.write_str("Unable to establish a working directory."),
			Self::Write(s) => write!(f, "Unable to write to {s}."),

			#[cfg(feature = "bin")]
			Self::CliArg(s) => write!(f, "Invalid CLI option: {s}"),

			#[cfg(feature = "bin")]
			Self::CliParse(s) => write!(f, "Unable to parse {s}."),

			#[cfg(feature = "bin")]
			Self::PrintHelp => f.write_str(HELP),

			#[cfg(feature = "bin")]
			Self::PrintVersion => f.write_str(concat!("Sona v", env!("CARGO_PKG_VERSION"))),
		}
	}
}

impl SonaError {
	#[must_use]
	/// # Unrecoverable?
	///
	/// Returns `true` for metadata the pipeline cannot make sense of, such as
	/// a response without any release list, or a non-numeric track number.
	/// Ordinary configuration, I/O, and network trouble is recoverable.
	///
	/// The binary reports these separately and exits with status `2`.
	pub const fn is_unrecoverable(&self) -> bool {
		matches!(
			self,
			Self::NoCdRelease | Self::NoMedium(_) | Self::NoReleases | Self::TrackNumber(_)
		)
	}
}
