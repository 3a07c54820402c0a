/*!
# Sona: Tag Resolution
*/

use crate::{
	naming,
	Release,
	SonaError,
};
use dactyl::traits::BytesToUnsigned;
use std::num::NonZeroU8;



#[derive(Debug, Clone, Default, Eq, PartialEq)]
/// # Resolved Tags.
///
/// Everything that will be written to one track's Vorbis comment block.
pub struct TagRecord {
	title: String,
	artists: Vec<String>,
	album: String,
	album_artists: Vec<String>,
	track_number: u8,
	track_total: u8,
	disc_number: u8,
	disc_total: u8,
	release_date: String,
	length: u32,
	genres: Vec<String>,
	join_phrase: String,
	artist_type: String,
}

impl TagRecord {
	#[must_use]
	/// # Title.
	pub fn title(&self) -> &str { &self.title }

	#[must_use]
	/// # (Track) Artists.
	pub fn artists(&self) -> &[String] { &self.artists }

	#[must_use]
	/// # Album.
	pub fn album(&self) -> &str { &self.album }

	#[must_use]
	/// # Album Artists.
	pub fn album_artists(&self) -> &[String] { &self.album_artists }

	#[must_use]
	/// # Track Number (Within the Disc).
	pub const fn track_number(&self) -> u8 { self.track_number }

	#[must_use]
	/// # Track Total.
	pub const fn track_total(&self) -> u8 { self.track_total }

	#[must_use]
	/// # Disc Number.
	pub const fn disc_number(&self) -> u8 { self.disc_number }

	#[must_use]
	/// # Disc Total.
	///
	/// Note: this is the number of disc IDs MusicBrainz has attached to the
	/// medium, not the number of media in the release.
	pub const fn disc_total(&self) -> u8 { self.disc_total }

	#[must_use]
	/// # Release Date.
	pub fn release_date(&self) -> &str { &self.release_date }

	#[must_use]
	/// # Length (Milliseconds).
	pub const fn length(&self) -> u32 { self.length }

	#[must_use]
	/// # Genres.
	pub fn genres(&self) -> &[String] { &self.genres }

	#[must_use]
	/// # Join Phrase.
	pub fn join_phrase(&self) -> &str { &self.join_phrase }

	#[must_use]
	/// # Artist Type.
	pub fn artist_type(&self) -> &str { &self.artist_type }
}

impl TagRecord {
	#[must_use]
	/// # Ripped File Name.
	pub fn ripped_name(&self) -> String { naming::ripped_name(self.track_number) }

	#[must_use]
	/// # Untagged File Name.
	pub fn untagged_name(&self) -> String {
		naming::untagged_name(self.track_number, &self.title)
	}

	#[must_use]
	/// # Final File Name.
	///
	/// The track number is shifted by `offset`, the number of tracks on the
	/// discs that come before this one. See [`track_offset`].
	pub fn final_name(&self, offset: u16) -> String {
		naming::final_name(offset.saturating_add(u16::from(self.track_number)), &self.title)
	}
}



/// # Resolve Tags.
///
/// Build one [`TagRecord`] for each track on the release's `disc`th medium,
/// in track-list order.
///
/// ## Errors
///
/// If the release has no such medium, or any of its track numbers are not
/// numeric, an unrecoverable error is returned.
pub fn resolve_tags(release: &Release, disc: NonZeroU8) -> Result<Vec<TagRecord>, SonaError> {
	let medium = release.media()
		.get(usize::from(disc.get() - 1))
		.ok_or(SonaError::NoMedium(disc.get()))?;

	let album_artists = release.artist_credit().names();
	let artist_type = release.artist_credit()
		.first()
		.map_or_else(String::new, |c| c.artist().kind().to_owned());
	let disc_total = u8::try_from(medium.discs().len()).unwrap_or(u8::MAX);

	medium.tracks()
		.iter()
		.map(|track| -> Result<TagRecord, SonaError> {
			let recording = track.recording();

			let title =
				if track.title().is_empty() { recording.title() }
				else { track.title() };

			let track_number = u8::btou(track.number().trim().as_bytes())
				.ok_or_else(|| SonaError::TrackNumber(track.number().to_owned()))?;

			Ok(TagRecord {
				title: title.to_owned(),
				artists: recording.artist_credit().names(),
				album: release.title().to_owned(),
				album_artists: album_artists.clone(),
				track_number,
				track_total: medium.track_count(),
				disc_number: disc.get(),
				disc_total,
				release_date: recording.first_release_date().to_owned(),
				length: track.length(),
				genres: recording.genres().to_vec(),
				join_phrase: recording.artist_credit()
					.first()
					.map_or_else(String::new, |c| c.join_phrase().to_owned()),
				artist_type: artist_type.clone(),
			})
		})
		.collect()
}

/// # Track Offset.
///
/// Return the total number of tracks on the CD media preceding `disc`, used
/// to number tracks continuously across a multi-disc release.
///
/// ## Errors
///
/// If any of the earlier CD media are missing from the release, an
/// unrecoverable error is returned.
pub fn track_offset(release: &Release, disc: NonZeroU8) -> Result<u16, SonaError> {
	let mut offset = 0_u16;
	for position in 1..disc.get() {
		let medium = release.cd_medium(position)
			.ok_or(SonaError::NoMedium(position))?;
		offset += u16::from(medium.track_count());
	}
	Ok(offset)
}
