/*!
# Sona: Tag Writer

Tracks move through three names on their way to the library:

1. `track01.flac`: whatever the transcoder left behind;
2. `01. Title-no-tags.flac`: renamed, but still untagged;
3. `06. Title.flac`: tagged, numbered across the whole release.

Every track reaches the second stage before any are tagged, so an
interruption never leaves anonymous files sitting beside finished ones.
*/

use crate::{
	Context,
	Release,
	SonaError,
	TagRecord,
	track_offset,
};
use metaflac::{
	block::VorbisComment,
	Tag,
};
use std::{
	num::NonZeroU8,
	path::{
		Path,
		PathBuf,
	},
};



/// # Vorbis Keys.
const KEY_TITLE: &str = "TITLE";
const KEY_ARTIST: &str = "ARTIST";
const KEY_ALBUM: &str = "ALBUM";
const KEY_ALBUM_ARTIST: &str = "ALBUMARTIST";
const KEY_TRACK_NUMBER: &str = "TRACKNUMBER";
const KEY_TRACK_TOTAL: &str = "TRACKTOTAL";
const KEY_DISC_NUMBER: &str = "DISCNUMBER";
const KEY_DISC_TOTAL: &str = "DISCTOTAL";
const KEY_RELEASE_DATE: &str = "RELEASEDATE";
const KEY_LENGTH: &str = "LENGTH";
const KEY_GENRE: &str = "GENRE";
const KEY_JOIN_PHRASE: &str = "JOINPHRASE";
const KEY_ARTIST_TYPE: &str = "ARTISTTYPE";



/// # Stage Untagged.
///
/// Rename every `trackNN.flac` in `dir` to its untagged name.
///
/// ## Errors
///
/// The first failed rename is returned; earlier renames are kept.
pub fn stage_untagged(ctx: Context<'_>, dir: &Path, tags: &[TagRecord])
-> Result<(), SonaError> {
	for t in tags {
		let src = dir.join(t.ripped_name());
		let dst = dir.join(t.untagged_name());
		std::fs::rename(&src, &dst).map_err(|_| SonaError::Rename(
			src.to_string_lossy().into_owned(),
			dst.to_string_lossy().into_owned(),
		))?;
		ctx.log().info(format_args!(
			"Renamed {} to {}",
			src.display(),
			dst.display(),
		));
	}

	Ok(())
}

/// # Write Tags.
///
/// Tag each staged file in `dir`, saving the result under its final name.
/// The paths of the finished files are returned in track order.
///
/// ## Errors
///
/// The first failure is returned. Files finished before it are left as they
/// are.
pub fn write_tags(
	ctx: Context<'_>,
	dir: &Path,
	tags: &[TagRecord],
	release: &Release,
	disc: NonZeroU8,
) -> Result<Vec<PathBuf>, SonaError> {
	let offset = track_offset(release, disc)?;

	let mut out = Vec::with_capacity(tags.len());
	for t in tags {
		let src = dir.join(t.untagged_name());
		let dst = dir.join(t.final_name(offset));
		ctx.log().info(format_args!("Saving tags for {}", dst.display()));
		merge_tags(&src, &dst, t)?;
		out.push(dst);
	}

	Ok(out)
}

/// # Merge Tags.
///
/// Read the FLAC at `src`, fold `tags` into its Vorbis comment block (creating
/// one if needed), and save the result to `dst`. The source is not modified.
///
/// Any values already present for the keys being written are replaced, so
/// re-tagging a file never duplicates anything.
///
/// ## Errors
///
/// Returns an error if the source isn't a readable FLAC or the destination
/// can't be written.
pub fn merge_tags(src: &Path, dst: &Path, tags: &TagRecord) -> Result<(), SonaError> {
	let mut flac = Tag::read_from_path(src)
		.map_err(|_| SonaError::FlacRead(src.to_string_lossy().into_owned()))?;
	apply_tags(flac.vorbis_comments_mut(), tags);

	std::fs::copy(src, dst)
		.map_err(|_| SonaError::Write(dst.to_string_lossy().into_owned()))?;
	flac.write_to_path(dst)
		.map_err(|_| SonaError::FlacWrite(dst.to_string_lossy().into_owned()))
}

/// # Install.
///
/// Copy `files` into `dir`, creating it if necessary, and return the new
/// paths.
///
/// ## Errors
///
/// The first failure is returned.
pub fn install(ctx: Context<'_>, files: &[PathBuf], dir: &Path)
-> Result<Vec<PathBuf>, SonaError> {
	std::fs::create_dir_all(dir)
		.map_err(|_| SonaError::Write(dir.to_string_lossy().into_owned()))?;

	let mut out = Vec::with_capacity(files.len());
	for src in files {
		let name = src.file_name()
			.ok_or_else(|| SonaError::Copy(src.to_string_lossy().into_owned()))?;
		let dst = dir.join(name);
		std::fs::copy(src, &dst)
			.map_err(|_| SonaError::Copy(src.to_string_lossy().into_owned()))?;
		ctx.log().info(format_args!("Copied {} to {}", src.display(), dst.display()));
		out.push(dst);
	}

	Ok(out)
}



/// # Apply Tags.
fn apply_tags(comments: &mut VorbisComment, tags: &TagRecord) {
	set_one(comments, KEY_TITLE, tags.title());
	set_many(comments, KEY_ARTIST, tags.artists());
	set_one(comments, KEY_ALBUM, tags.album());
	set_many(comments, KEY_ALBUM_ARTIST, tags.album_artists());
	set_one(comments, KEY_TRACK_NUMBER, &tags.track_number().to_string());
	set_one(comments, KEY_TRACK_TOTAL, &tags.track_total().to_string());
	set_one(comments, KEY_DISC_NUMBER, &tags.disc_number().to_string());
	set_one(comments, KEY_DISC_TOTAL, &tags.disc_total().to_string());
	set_one(comments, KEY_RELEASE_DATE, tags.release_date());
	set_one(comments, KEY_LENGTH, &tags.length().to_string());
	set_many(comments, KEY_GENRE, tags.genres());
	set_one(comments, KEY_JOIN_PHRASE, tags.join_phrase());
	set_one(comments, KEY_ARTIST_TYPE, tags.artist_type());
}

/// # Set Single Value.
///
/// The key is always written, even when the value is empty.
fn set_one(comments: &mut VorbisComment, key: &str, value: &str) {
	comments.set(key, vec![value]);
}

/// # Set Multiple Values.
///
/// Order is preserved, as are duplicates. An empty list clears the key.
fn set_many(comments: &mut VorbisComment, key: &str, values: &[String]) {
	if values.is_empty() { comments.remove(key); }
	else { comments.set(key, values.to_vec()); }
}
