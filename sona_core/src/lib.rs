/*!
# Sona: Library

This crate identifies the audio CD in an optical drive, looks it up on
MusicBrainz, and turns the matching release into Vorbis comments for the
ripped FLAC tracks.

The heavy lifting is done by [`run`]. Everything it depends on from the
outside world (external programs, the drive itself, the metadata service, and
the log) is reached through a [`Context`], so each piece can be swapped out.
*/

#![deny(unsafe_code)]

#![warn(
	clippy::filetype_is_file,
	clippy::integer_division,
	clippy::needless_borrow,
	clippy::nursery,
	clippy::pedantic,
	clippy::perf,
	clippy::suboptimal_flops,
	clippy::unneeded_field_pattern,
	macro_use_extern_crate,
	missing_copy_implementations,
	missing_debug_implementations,
	missing_docs,
	non_ascii_idents,
	trivial_casts,
	trivial_numeric_casts,
	unreachable_pub,
	unused_crate_dependencies,
	unused_extern_crates,
	unused_import_braces,
)]

#![allow(
	clippy::doc_markdown,
	clippy::module_name_repetitions,
	clippy::redundant_pub_crate,
)]

mod cdio;
mod cmd;
mod context;
mod disc;
mod drive;
mod error;
mod log;
mod lookup;
mod naming;
mod opts;
mod pipeline;
mod release;
mod rip;
mod tags;
mod writer;

#[cfg(test)]
mod test_support;

pub use cdio::LinuxCdrom;
pub use cmd::{
	CommandOutput,
	CommandRunner,
	SystemRunner,
};
pub use context::Context;
pub use disc::{
	Disc,
	DiscToc,
	TocReader,
};
pub use drive::{
	DEVICE_DIR,
	DEVICE_PREFIX,
	DriveKind,
	query_drive,
	resolve_drive,
	resolve_drive_in,
};
pub use error::SonaError;
pub use log::PipelineLog;
pub use lookup::{
	lookup_url,
	MetadataSource,
	MUSICBRAINZ_API,
	MusicBrainz,
};
pub use naming::{
	album_dir,
	final_name,
	ripped_name,
	sanitize,
	untagged_name,
};
pub use opts::RunOptions;
pub use pipeline::{
	run,
	RunReport,
};
pub use release::{
	Artist,
	ArtistCredit,
	CD_FORMAT,
	Envelope,
	Medium,
	Metadata,
	NameCredit,
	Recording,
	Release,
	Track,
};
pub use rip::{
	rip_disc,
	transcode_all,
};
pub use tags::{
	resolve_tags,
	TagRecord,
	track_offset,
};
pub use writer::{
	install,
	merge_tags,
	stage_untagged,
	write_tags,
};



/// # Number of lead-in sectors.
///
/// All discs have a 2-second region at the start before any data. Different
/// contexts include or exclude this amount, so it's good to keep it handy.
pub const CD_LEADIN: u16 = 150;

/// # Lead-out Label.
///
/// This is used solely for the table of contents printout; e.g. 01 02 03 AA.
pub const CD_LEADOUT_LABEL: &str = "AA";

/// # Music Root Environment Variable.
///
/// Used as the music root when none is passed explicitly.
pub const MUSIC_ROOT_ENV: &str = "SONA_MUSIC_ROOT";
