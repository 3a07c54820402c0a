/*!
# Sona: File Naming
*/

use std::path::{
	Path,
	PathBuf,
};



/// # Untagged Suffix.
const UNTAGGED_SUFFIX: &str = "-no-tags.flac";



#[must_use]
/// # Sanitize.
///
/// Replace every character that is troublesome in a file name (or a shell)
/// with an underscore. Everything else, spaces included, passes through
/// unchanged.
///
/// ## Examples
///
/// ```
/// assert_eq!(
///     sona_core::sanitize("Rock & Roll: Pt. 1"),
///     "Rock _ Roll_ Pt_ 1",
/// );
/// ```
pub fn sanitize(src: &str) -> String {
	src.chars()
		.map(|c| match c {
			'/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' |
			'&' | '!' | ';' | '#' | '~' | '%' | '^' |
			'[' | ']' | '{' | '}' | '(' | ')' |
			'$' | '=' | '@' | ',' | '.' | '`' | '\'' |
			'\t' | '\n' | '\r' => '_',
			c => c,
		})
		.collect()
}

#[must_use]
/// # Ripped Name (Phase One).
///
/// The name the transcoder leaves behind, e.g. `track01.flac`.
pub fn ripped_name(track: u8) -> String { format!("track{track:02}.flac") }

#[must_use]
/// # Untagged Name (Phase Two).
///
/// E.g. `01. Intro-no-tags.flac`.
pub fn untagged_name(track: u8, title: &str) -> String {
	format!("{track:02}. {}{UNTAGGED_SUFFIX}", sanitize(title))
}

#[must_use]
/// # Final Name (Phase Three).
///
/// E.g. `06. Intro.flac`, numbered across the whole release.
pub fn final_name(absolute: u16, title: &str) -> String {
	format!("{absolute:02}. {}.flac", sanitize(title))
}

#[must_use]
/// # Album Directory.
///
/// `{root}/{artist}/{album}`, with both components sanitized.
pub fn album_dir(root: &Path, artist: &str, album: &str) -> PathBuf {
	root.join(sanitize(artist)).join(sanitize(album))
}
