/*!
# Sona: Release Metadata

This module holds the MusicBrainz release tree, its XML decoding, and the
selection of the one CD release Sona cares about.
*/

use crate::SonaError;
use dactyl::traits::BytesToUnsigned;
use roxmltree::{
	Document,
	Node,
};



/// # CD Format.
///
/// The medium format MusicBrainz uses for plain audio CDs.
pub const CD_FORMAT: &str = "CD";



#[derive(Debug, Clone, Default, Eq, PartialEq)]
/// # Artist.
pub struct Artist {
	name: String,
	kind: String,
}

impl Artist {
	#[must_use]
	/// # Name.
	pub fn name(&self) -> &str { &self.name }

	#[must_use]
	/// # Type.
	///
	/// E.g. "Person" or "Group".
	pub fn kind(&self) -> &str { &self.kind }
}



#[derive(Debug, Clone, Default, Eq, PartialEq)]
/// # Name Credit.
///
/// One artist within a credit, along with whatever joins it to the next one
/// (e.g. `" & "`).
pub struct NameCredit {
	artist: Artist,
	join_phrase: String,
}

impl NameCredit {
	#[must_use]
	/// # Artist.
	pub const fn artist(&self) -> &Artist { &self.artist }

	#[must_use]
	/// # Join Phrase.
	pub fn join_phrase(&self) -> &str { &self.join_phrase }
}



#[derive(Debug, Clone, Default, Eq, PartialEq)]
/// # Artist Credit.
pub struct ArtistCredit(Vec<NameCredit>);

impl ArtistCredit {
	#[must_use]
	/// # Name Credits.
	pub fn credits(&self) -> &[NameCredit] { &self.0 }

	#[must_use]
	/// # First Credit.
	pub fn first(&self) -> Option<&NameCredit> { self.0.first() }

	#[must_use]
	/// # Artist Names.
	///
	/// Order and duplicates are preserved.
	pub fn names(&self) -> Vec<String> {
		self.0.iter().map(|c| c.artist.name.clone()).collect()
	}
}



#[derive(Debug, Clone, Default, Eq, PartialEq)]
/// # Recording.
///
/// The underlying work a track points to.
pub struct Recording {
	title: String,
	artist_credit: ArtistCredit,
	first_release_date: String,
	genres: Vec<String>,
}

impl Recording {
	#[must_use]
	/// # Title.
	pub fn title(&self) -> &str { &self.title }

	#[must_use]
	/// # Artist Credit.
	pub const fn artist_credit(&self) -> &ArtistCredit { &self.artist_credit }

	#[must_use]
	/// # First Release Date.
	pub fn first_release_date(&self) -> &str { &self.first_release_date }

	#[must_use]
	/// # Genres.
	pub fn genres(&self) -> &[String] { &self.genres }
}



#[derive(Debug, Clone, Default, Eq, PartialEq)]
/// # Track.
pub struct Track {
	number: String,
	title: String,
	length: u32,
	recording: Recording,
}

impl Track {
	#[must_use]
	/// # Number (Raw).
	///
	/// This is whatever MusicBrainz has for the track number, which is
	/// usually, but not always, numeric.
	pub fn number(&self) -> &str { &self.number }

	#[must_use]
	/// # Title (Explicit).
	///
	/// This is often empty, in which case the recording title applies.
	pub fn title(&self) -> &str { &self.title }

	#[must_use]
	/// # Length (Milliseconds).
	pub const fn length(&self) -> u32 { self.length }

	#[must_use]
	/// # Recording.
	pub const fn recording(&self) -> &Recording { &self.recording }
}



#[derive(Debug, Clone, Default, Eq, PartialEq)]
/// # Medium.
///
/// One physical disc of a release.
pub struct Medium {
	position: u8,
	format: String,
	track_count: u8,
	tracks: Vec<Track>,
	discs: Vec<String>,
}

impl Medium {
	#[must_use]
	/// # Position (1-based).
	pub const fn position(&self) -> u8 { self.position }

	#[must_use]
	/// # Format.
	pub fn format(&self) -> &str { &self.format }

	#[must_use]
	/// # Is CD?
	pub fn is_cd(&self) -> bool { self.format == CD_FORMAT }

	#[must_use]
	/// # Declared Track Count.
	pub const fn track_count(&self) -> u8 { self.track_count }

	#[must_use]
	/// # Tracks.
	pub fn tracks(&self) -> &[Track] { &self.tracks }

	#[must_use]
	/// # Disc IDs.
	///
	/// The disc IDs MusicBrainz has attached to this medium.
	pub fn discs(&self) -> &[String] { &self.discs }
}



#[derive(Debug, Clone, Default, Eq, PartialEq)]
/// # Release.
pub struct Release {
	id: String,
	title: String,
	artist_credit: ArtistCredit,
	media: Vec<Medium>,
}

impl Release {
	#[must_use]
	/// # MusicBrainz ID.
	pub fn id(&self) -> &str { &self.id }

	#[must_use]
	/// # Title.
	pub fn title(&self) -> &str { &self.title }

	#[must_use]
	/// # Artist Credit.
	pub const fn artist_credit(&self) -> &ArtistCredit { &self.artist_credit }

	#[must_use]
	/// # Media.
	pub fn media(&self) -> &[Medium] { &self.media }

	#[must_use]
	/// # Primary Artist.
	///
	/// The name of the first credited artist, if any.
	pub fn artist(&self) -> Option<&str> {
		self.artist_credit.first().map(|c| c.artist.name())
	}

	#[must_use]
	/// # CD Medium.
	///
	/// Find the CD medium at the given (1-based) position.
	pub fn cd_medium(&self, position: u8) -> Option<&Medium> {
		self.media.iter().find(|m| m.is_cd() && m.position == position)
	}
}



#[derive(Debug, Clone, Eq, PartialEq)]
/// # Release Envelope.
///
/// A disc ID lookup wraps its releases inside the matching `<disc>` element,
/// but when MusicBrainz falls back to a fuzzy TOC match, the releases sit
/// directly under the root instead. Both shapes land here.
pub enum Envelope {
	/// # `<metadata><disc><release-list>`.
	Disc(Vec<Release>),

	/// # `<metadata><release-list>`.
	Releases(Vec<Release>),
}

impl Envelope {
	#[must_use]
	/// # Releases.
	pub fn releases(&self) -> &[Release] {
		match self {
			Self::Disc(v) | Self::Releases(v) => v,
		}
	}
}



#[derive(Debug, Clone, Default, Eq, PartialEq)]
/// # Lookup Metadata.
///
/// The decoded MusicBrainz response.
pub struct Metadata(Option<Envelope>);

impl From<Envelope> for Metadata {
	#[inline]
	fn from(src: Envelope) -> Self { Self(Some(src)) }
}

impl Metadata {
	/// # From XML.
	///
	/// ## Errors
	///
	/// This will return an error if the document is not well-formed, is not a
	/// MusicBrainz `<metadata>` document, or contains non-numeric values where
	/// numbers belong.
	pub fn from_xml(raw: &str) -> Result<Self, SonaError> {
		let doc = Document::parse(raw).map_err(|e| SonaError::Decode(e.to_string()))?;
		let root = doc.root_element();
		if root.tag_name().name() != "metadata" {
			return Err(SonaError::Decode(format!(
				"unexpected root element <{}>",
				root.tag_name().name(),
			)));
		}

		if let Some(disc) = child(root, "disc") {
			let releases = child(disc, "release-list")
				.map_or_else(|| Ok(Vec::new()), parse_release_list)?;
			Ok(Self(Some(Envelope::Disc(releases))))
		}
		else if let Some(list) = child(root, "release-list") {
			Ok(Self(Some(Envelope::Releases(parse_release_list(list)?))))
		}
		else { Ok(Self(None)) }
	}

	#[must_use]
	/// # Envelope.
	pub const fn envelope(&self) -> Option<&Envelope> { self.0.as_ref() }

	/// # Select Release.
	///
	/// Return the first release whose first medium is a CD.
	///
	/// ## Errors
	///
	/// If the response had no release list at all, or none of its releases
	/// are CDs, an unrecoverable error is returned.
	pub fn select_release(&self) -> Result<&Release, SonaError> {
		self.envelope()
			.ok_or(SonaError::NoReleases)?
			.releases()
			.iter()
			.find(|r| r.media.first().is_some_and(Medium::is_cd))
			.ok_or(SonaError::NoCdRelease)
	}
}



/// # First Child Element by Name.
fn child<'a, 'i>(node: Node<'a, 'i>, name: &str) -> Option<Node<'a, 'i>> {
	node.children().find(|n| n.is_element() && n.tag_name().name() == name)
}

/// # Child Elements by Name.
fn children<'a, 'i>(node: Node<'a, 'i>, name: &'static str)
-> impl Iterator<Item=Node<'a, 'i>> {
	node.children().filter(move |n| n.is_element() && n.tag_name().name() == name)
}

/// # Child Text.
///
/// Return the trimmed text of the named child, or an empty string.
fn child_text(node: Node<'_, '_>, name: &str) -> String {
	child(node, name)
		.and_then(|n| n.text())
		.map_or_else(String::new, |s| s.trim().to_owned())
}

/// # Parse Number.
///
/// Missing and empty values are zero; anything else must be numeric.
fn parse_num<N: BytesToUnsigned + Default>(raw: Option<&str>, label: &str)
-> Result<N, SonaError> {
	let raw = raw.map_or("", str::trim);
	if raw.is_empty() { Ok(N::default()) }
	else {
		N::btou(raw.as_bytes())
			.ok_or_else(|| SonaError::Decode(format!("invalid {label} {raw:?}")))
	}
}

/// # Parse Artist Credit.
fn parse_artist_credit(node: Node<'_, '_>) -> ArtistCredit {
	let Some(credit) = child(node, "artist-credit") else { return ArtistCredit::default(); };
	ArtistCredit(
		children(credit, "name-credit")
			.map(|nc| {
				let artist = child(nc, "artist").map_or_else(Artist::default, |a| Artist {
					name: child_text(a, "name"),
					kind: a.attribute("type").unwrap_or_default().to_owned(),
				});
				NameCredit {
					artist,
					join_phrase: nc.attribute("joinphrase").unwrap_or_default().to_owned(),
				}
			})
			.collect()
	)
}

/// # Parse Recording.
fn parse_recording(node: Node<'_, '_>) -> Recording {
	Recording {
		title: child_text(node, "title"),
		artist_credit: parse_artist_credit(node),
		first_release_date: child_text(node, "first-release-date"),
		genres: child(node, "genre-list")
			.map(|list| children(list, "genre").map(|g| child_text(g, "name")).collect())
			.unwrap_or_default(),
	}
}

/// # Parse Track.
fn parse_track(node: Node<'_, '_>) -> Result<Track, SonaError> {
	Ok(Track {
		number: child_text(node, "number"),
		title: child_text(node, "title"),
		length: parse_num(child(node, "length").and_then(|n| n.text()), "track length")?,
		recording: child(node, "recording").map_or_else(Recording::default, parse_recording),
	})
}

/// # Parse Medium.
fn parse_medium(node: Node<'_, '_>) -> Result<Medium, SonaError> {
	let position = parse_num(child(node, "position").and_then(|n| n.text()), "medium position")?;
	let format = child_text(node, "format");

	let (track_count, tracks) = match child(node, "track-list") {
		Some(list) => {
			let tracks = children(list, "track")
				.map(parse_track)
				.collect::<Result<Vec<_>, _>>()?;
			let count = match list.attribute("count") {
				Some(c) => parse_num(Some(c), "track count")?,
				None => u8::try_from(tracks.len())
					.map_err(|_| SonaError::Decode("too many tracks".to_owned()))?,
			};
			(count, tracks)
		},
		None => (0, Vec::new()),
	};

	let discs = child(node, "disc-list")
		.map(|list| {
			children(list, "disc")
				.map(|d| d.attribute("id").unwrap_or_default().to_owned())
				.collect()
		})
		.unwrap_or_default();

	Ok(Medium { position, format, track_count, tracks, discs })
}

/// # Parse Release.
fn parse_release(node: Node<'_, '_>) -> Result<Release, SonaError> {
	let media = match child(node, "medium-list") {
		Some(list) => children(list, "medium")
			.map(parse_medium)
			.collect::<Result<Vec<_>, _>>()?,
		None => Vec::new(),
	};

	Ok(Release {
		id: node.attribute("id").unwrap_or_default().to_owned(),
		title: child_text(node, "title"),
		artist_credit: parse_artist_credit(node),
		media,
	})
}

/// # Parse Release List.
fn parse_release_list(node: Node<'_, '_>) -> Result<Vec<Release>, SonaError> {
	children(node, "release").map(parse_release).collect()
}
