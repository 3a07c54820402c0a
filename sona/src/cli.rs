/*!
# Sona: CLI
*/

use argyle::Argument;
use dactyl::traits::BytesToUnsigned;
use sona_core::{
	MUSIC_ROOT_ENV,
	RunOptions,
	SonaError,
};
use std::{
	num::NonZeroU8,
	path::PathBuf,
};



/// # Options Return Type.
///
/// The run options, the log path (if any), and whether or not to echo the
/// log to STDOUT.
pub(super) type Parsed = (
	RunOptions,
	Option<PathBuf>,
	bool,
);



/// # Parse Options.
pub(super) fn parse() -> Result<Parsed, SonaError> {
	let args = argyle::args()
		.with_keywords(include!(concat!(env!("OUT_DIR"), "/argyle.rs")));

	let mut opts = RunOptions::default();
	let mut disc = None;
	let mut log = None;
	let mut music_root = None;
	let mut verbose = false;
	for arg in args {
		match arg {
			Argument::Key("-h" | "--help") => return Err(SonaError::PrintHelp),
			Argument::Key("--no-rip") => { opts = opts.with_no_rip(true); },
			Argument::Key("-v" | "--verbose") => { verbose = true; },
			Argument::Key("-V" | "--version") => return Err(SonaError::PrintVersion),

			Argument::KeyWithValue("-d" | "--dev", s) => {
				let s = s.trim();
				if s.is_empty() { return Err(SonaError::CliParse("-d/--dev")); }
				opts = opts.with_dev(s);
			},
			Argument::KeyWithValue("-l" | "--log", s) => {
				let s = s.trim();
				if s.is_empty() { return Err(SonaError::CliParse("-l/--log")); }
				log.replace(PathBuf::from(s));
			},
			Argument::KeyWithValue("-m" | "--music-root", s) => {
				let s = s.trim();
				if s.is_empty() { return Err(SonaError::CliParse("-m/--music-root")); }
				music_root.replace(PathBuf::from(s));
			},

			// The disc number is the only positional argument.
			Argument::Other(s) => {
				if s.starts_with('-') || disc.is_some() {
					return Err(SonaError::CliArg(s));
				}
				disc.replace(parse_disc(&s)?);
			},

			_ => {},
		}
	}

	if let Some(disc) = disc { opts = opts.with_disc(disc); }

	// Fall back to the environment for the music root.
	if let Some(root) = music_root.or_else(music_root_env) {
		opts = opts.with_music_root(root);
	}

	Ok((opts, log, verbose))
}



/// # Parse Disc Number.
fn parse_disc(src: &str) -> Result<NonZeroU8, SonaError> {
	u8::btou(src.trim().as_bytes())
		.and_then(NonZeroU8::new)
		.ok_or(SonaError::DiscNumber)
}

/// # Music Root From Environment.
fn music_root_env() -> Option<PathBuf> {
	std::env::var_os(MUSIC_ROOT_ENV)
		.filter(|v| ! v.is_empty())
		.map(PathBuf::from)
}
