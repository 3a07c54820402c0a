/*!
# Sona: Disc
*/

use cdtoc::Toc;
use crate::{
	CD_LEADIN,
	CD_LEADOUT_LABEL,
	Context,
	SonaError,
};
use std::{
	fmt,
	path::{
		Path,
		PathBuf,
	},
};



/// # Data Track Gap.
///
/// When a CD-Extra disc has a trailing data session, the audio session ends
/// this many sectors before it begins.
const CD_EXTRA_GAP: u32 = 11_400;



#[derive(Debug, Clone, Eq, PartialEq)]
/// # Raw Table of Contents.
///
/// Track start positions and leadout as read from the drive, in LBA form
/// (i.e. _including_ the 150-sector lead-in).
pub struct DiscToc {
	/// # Audio Track Starts.
	audio: Vec<u32>,

	/// # Data Track Start.
	data: Option<u32>,

	/// # Leadout.
	leadout: u32,
}

impl DiscToc {
	#[must_use]
	/// # New.
	pub const fn new(audio: Vec<u32>, data: Option<u32>, leadout: u32) -> Self {
		Self { audio, data, leadout }
	}
}



/// # Table of Contents Reader.
///
/// Whatever can pull a [`DiscToc`] off a device. The real implementation is
/// [`LinuxCdrom`](crate::LinuxCdrom); tests use fakes.
pub trait TocReader {
	/// # Read TOC.
	///
	/// ## Errors
	///
	/// Returns an error if the device cannot be opened or there is no readable
	/// disc in it.
	fn read_toc(&self, dev: &Path) -> Result<DiscToc, SonaError>;
}



#[derive(Debug)]
/// # Disc.
///
/// A loaded disc, identified.
pub struct Disc {
	/// # Device Path.
	dev: PathBuf,

	/// # Parsed Table of Contents.
	toc: Toc,

	/// # Raw Parts.
	raw: DiscToc,

	/// # MusicBrainz ID.
	id: String,
}

impl fmt::Display for Disc {
	/// # Summarize the Disc.
	///
	/// Print the identifiers and track layout in a nice little table.
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		/// # Divider.
		const DIVIDER: &str = "------------------------------\n";

		let kv = [
			("Device:", self.dev.display().to_string()),
			("CDTOC:", self.toc.to_string()),
			("MusicBrainz:", self.id.clone()),
		];
		let col_max: usize = kv.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
		for (k, v) in kv {
			writeln!(f, "{k:col_max$} {v}")?;
		}

		f.write_str("\n##   FIRST    LAST  LENGTH\n")?;
		f.write_str(DIVIDER)?;

		let (first, _, leadout, offsets) = self.musicbrainz_parts();
		for (k, start) in offsets.iter().copied().enumerate() {
			let end = offsets.get(k + 1).copied().unwrap_or(leadout);
			let start = start.saturating_sub(u32::from(CD_LEADIN));
			let end = end.saturating_sub(u32::from(CD_LEADIN));
			writeln!(
				f,
				"{:02}  {start:>6}  {:>6}  {:>6}",
				usize::from(first) + k,
				end.saturating_sub(1),
				end.saturating_sub(start),
			)?;
		}

		writeln!(
			f,
			"{CD_LEADOUT_LABEL}  {:>6}                LEAD-OUT",
			leadout.saturating_sub(u32::from(CD_LEADIN)),
		)?;
		f.write_str(DIVIDER)
	}
}

impl Disc {
	/// # Read.
	///
	/// Read the table of contents from `dev` and work out its MusicBrainz
	/// identity.
	///
	/// ## Errors
	///
	/// This will return an error if the drive can't be read or the table of
	/// contents doesn't make sense.
	pub fn read(ctx: Context<'_>, dev: &Path) -> Result<Self, SonaError> {
		let raw = ctx.toc_reader().read_toc(dev)?;
		let out = Self::from_parts(dev, raw)?;
		ctx.log().info(format_args!("Disc ID: {}", out.id));
		ctx.log().info(format_args!("Disc TOC: {}", out.lookup_toc()));
		Ok(out)
	}

	/// # From Parts.
	///
	/// ## Errors
	///
	/// Returns an error if the layout is invalid.
	pub fn from_parts(dev: &Path, raw: DiscToc) -> Result<Self, SonaError> {
		let toc = Toc::from_parts(raw.audio.clone(), raw.data, raw.leadout)?;
		let id = toc.musicbrainz_id().to_string();
		Ok(Self {
			dev: dev.to_path_buf(),
			toc,
			raw,
			id,
		})
	}
}

impl Disc {
	#[must_use]
	/// # Device.
	pub fn dev(&self) -> &Path { &self.dev }

	#[must_use]
	/// # MusicBrainz Disc ID.
	pub fn id(&self) -> &str { &self.id }

	#[must_use]
	/// # Table of Contents.
	pub const fn toc(&self) -> &Toc { &self.toc }

	#[must_use]
	/// # MusicBrainz TOC String.
	///
	/// This is the space-separated `first last leadout offset1 … offsetN`
	/// form understood by the MusicBrainz web service.
	pub fn toc_string(&self) -> String {
		use std::fmt::Write;

		let (first, last, leadout, offsets) = self.musicbrainz_parts();
		let mut out = format!("{first} {last} {leadout}");
		for v in offsets {
			let _res = write!(out, " {v}");
		}
		out
	}

	#[must_use]
	/// # Lookup TOC String.
	///
	/// The TOC string with its spaces swapped for `+`, as the lookup query
	/// expects.
	pub fn lookup_toc(&self) -> String { self.toc_string().replace(' ', "+") }

	/// # MusicBrainz Parts.
	///
	/// Return the first and last track numbers, the leadout, and the track
	/// offsets in the shape MusicBrainz wants them.
	///
	/// A leading data track is counted like any other track; a trailing one
	/// is dropped, with the leadout pulled back to the end of the audio
	/// session.
	fn musicbrainz_parts(&self) -> (u8, u8, u32, Vec<u32>) {
		let mut offsets = Vec::with_capacity(self.raw.audio.len() + 1);
		let mut leadout = self.raw.leadout;

		match self.raw.data {
			Some(data) if self.raw.audio.first().is_some_and(|&a| data < a) => {
				offsets.push(data);
			},
			Some(data) => { leadout = data.saturating_sub(CD_EXTRA_GAP); },
			None => {},
		}
		offsets.extend_from_slice(&self.raw.audio);

		let last = u8::try_from(offsets.len()).unwrap_or(u8::MAX);
		(1, last, leadout, offsets)
	}
}
