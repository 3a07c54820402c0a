/*!
# Sona: MusicBrainz Lookup
*/

use crate::{
	Disc,
	Metadata,
	SonaError,
};
use ureq::{
	Agent,
	AgentBuilder,
};



/// # MusicBrainz Web Service.
pub const MUSICBRAINZ_API: &str = "https://musicbrainz.org/ws/2";

/// # Lookup Includes.
const LOOKUP_INC: &str = "artists+recordings";

/// # User Agent.
const USER_AGENT: &str = concat!("Sona/", env!("CARGO_PKG_VERSION"));



/// # Metadata Source.
///
/// Whatever can turn a [`Disc`] into release [`Metadata`]. The real
/// implementation is [`MusicBrainz`]; tests use canned responses.
pub trait MetadataSource {
	/// # Fetch.
	///
	/// ## Errors
	///
	/// Any transport or decoding failure is returned as-is; nothing is
	/// retried.
	fn fetch(&self, disc: &Disc) -> Result<Metadata, SonaError>;
}



#[derive(Debug, Clone)]
/// # MusicBrainz.
///
/// A blocking client for the MusicBrainz disc ID lookup.
pub struct MusicBrainz {
	/// # Connection Agent.
	agent: Agent,

	/// # Base URL.
	base: String,
}

impl Default for MusicBrainz {
	fn default() -> Self { Self::new(MUSICBRAINZ_API) }
}

impl MetadataSource for MusicBrainz {
	fn fetch(&self, disc: &Disc) -> Result<Metadata, SonaError> {
		let url = lookup_url(&self.base, disc);
		let res = self.agent.get(&url)
			.call()
			.map_err(|e| SonaError::Request(e.to_string()))?;
		let body = res.into_string()
			.map_err(|e| SonaError::Request(e.to_string()))?;

		Metadata::from_xml(&body)
	}
}

impl MusicBrainz {
	#[must_use]
	/// # New.
	///
	/// Point the client at `base`, which should be the web service root
	/// (without a trailing slash).
	pub fn new(base: &str) -> Self {
		Self {
			agent: AgentBuilder::new()
				.user_agent(USER_AGENT)
				.build(),
			base: base.trim_end_matches('/').to_owned(),
		}
	}
}



#[must_use]
/// # Lookup URL.
///
/// Build the disc ID lookup URL for `disc`. The query is assembled by hand so
/// the `+` separators go out as-is.
pub fn lookup_url(base: &str, disc: &Disc) -> String {
	format!(
		"{}/discid/{}?inc={LOOKUP_INC}&toc={}",
		base.trim_end_matches('/'),
		disc.id(),
		disc.lookup_toc(),
	)
}
