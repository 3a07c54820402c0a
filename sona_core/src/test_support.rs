/*!
# Sona: Test Fakes
*/

use crate::{
	CommandOutput,
	CommandRunner,
	Disc,
	DiscToc,
	Metadata,
	MetadataSource,
	SonaError,
	TocReader,
};
use std::{
	cell::{
		Cell,
		RefCell,
	},
	collections::HashMap,
	path::Path,
};



/// # Runner Hook.
type Hook = Box<dyn Fn(&str, &[&str], Option<&Path>)>;



#[derive(Default)]
/// # Fake Command Runner.
///
/// Answers are keyed by `"{program} {last arg}"`, falling back to the bare
/// program name. Anything unscripted "exits" with status `1`.
pub(crate) struct FakeRunner {
	answers: HashMap<String, CommandOutput>,
	calls: RefCell<Vec<String>>,
	hook: Option<Hook>,
}

impl CommandRunner for FakeRunner {
	fn run(&self, program: &str, args: &[&str], cwd: Option<&Path>)
	-> Result<CommandOutput, SonaError> {
		let mut call = program.to_owned();
		for a in args {
			call.push(' ');
			call.push_str(a);
		}
		self.calls.borrow_mut().push(call);

		let key = format!("{program} {}", args.last().copied().unwrap_or_default());
		let out = self.answers.get(&key)
			.or_else(|| self.answers.get(program))
			.cloned()
			.unwrap_or_else(|| CommandOutput {
				stdout: Vec::new(),
				stderr: b"unscripted".to_vec(),
				status: Some(1),
			});

		if out.success() {
			if let Some(hook) = &self.hook { hook(program, args, cwd); }
		}

		Ok(out)
	}
}

impl FakeRunner {
	/// # Script an Answer.
	pub(crate) fn answer<S: Into<String>>(&mut self, key: S, out: CommandOutput) {
		self.answers.insert(key.into(), out);
	}

	/// # Script a Silent Success.
	pub(crate) fn succeed<S: Into<String>>(&mut self, key: S) {
		self.answer(key, CommandOutput {
			stdout: Vec::new(),
			stderr: Vec::new(),
			status: Some(0),
		});
	}

	#[must_use]
	/// # With Hook.
	///
	/// Run `hook` after every successful call, e.g. to fake the files a
	/// program would have written.
	pub(crate) fn with_hook<F>(self, hook: F) -> Self
	where F: Fn(&str, &[&str], Option<&Path>) + 'static {
		Self {
			hook: Some(Box::new(hook)),
			..self
		}
	}

	/// # Calls.
	///
	/// Every command line run so far, in order.
	pub(crate) fn calls(&self) -> Vec<String> { self.calls.borrow().clone() }
}



#[derive(Debug, Clone)]
/// # Fake TOC Reader.
pub(crate) struct FakeToc(Option<DiscToc>);

impl Default for FakeToc {
	/// # Two Audio Tracks.
	fn default() -> Self {
		Self(Some(DiscToc::new(vec![150, 11_563], None, 25_174)))
	}
}

impl TocReader for FakeToc {
	fn read_toc(&self, dev: &Path) -> Result<DiscToc, SonaError> {
		self.0.clone().ok_or_else(|| SonaError::DiscRead(dev.display().to_string()))
	}
}

impl FakeToc {
	/// # Empty Drive.
	pub(crate) const fn empty() -> Self { Self(None) }
}



#[derive(Debug, Default)]
/// # Fake Metadata Source.
///
/// Decodes a canned XML response, or fails like a dead network if there
/// isn't one.
pub(crate) struct FakeLookup {
	xml: Option<&'static str>,
	calls: Cell<usize>,
}

impl MetadataSource for FakeLookup {
	fn fetch(&self, _disc: &Disc) -> Result<Metadata, SonaError> {
		self.calls.set(self.calls.get() + 1);
		let xml = self.xml.ok_or_else(|| SonaError::Request("connection refused".to_owned()))?;
		Metadata::from_xml(xml)
	}
}

impl FakeLookup {
	/// # New.
	pub(crate) const fn new(xml: &'static str) -> Self {
		Self {
			xml: Some(xml),
			calls: Cell::new(0),
		}
	}

	/// # Number of Fetches.
	pub(crate) fn calls(&self) -> usize { self.calls.get() }
}



/// # Fake Audio Frames.
///
/// Not real audio, just something to make sure the bytes after the metadata
/// survive.
pub(crate) const FLAC_FRAMES: &[u8] = &[0xFF, 0xF8, 0x69, 0x08, 0x00, 0x00, 0x8E, 0x42, 0x13, 0x37];

/// # STREAMINFO Block Body.
///
/// An empty 44.1kHz 16-bit stereo stream.
const STREAMINFO: [u8; 34] = [
	// Min/max block size.
	0x10, 0x00, 0x10, 0x00,
	// Min/max frame size (unknown).
	0, 0, 0, 0, 0, 0,
	// Sample rate, channels, bits per sample, total samples.
	0x0A, 0xC4, 0x42, 0xF0, 0, 0, 0, 0,
	// MD5.
	0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
];

#[must_use]
/// # Minimal FLAC.
///
/// A `fLaC` marker followed by a lone STREAMINFO block and some frame bytes.
/// There is no comment block at all.
pub(crate) fn flac_fixture() -> Vec<u8> {
	let mut out = b"fLaC".to_vec();
	push_block(&mut out, 0, true, &STREAMINFO);
	out.extend_from_slice(FLAC_FRAMES);
	out
}

#[must_use]
/// # Encoded FLAC.
///
/// The shape `ffmpeg` leaves behind: STREAMINFO, a comment block with an
/// encoder and placeholder title, then trailing PADDING and frame bytes.
pub(crate) fn flac_fixture_encoded() -> Vec<u8> {
	let mut comments = Vec::new();
	let vendor = b"Lavf60.16.100";
	comments.extend_from_slice(&(vendor.len() as u32).to_le_bytes());
	comments.extend_from_slice(vendor);
	comments.extend_from_slice(&2_u32.to_le_bytes());
	for kv in [&b"ENCODER=Lavf60.16.100"[..], &b"TITLE=track01"[..]] {
		comments.extend_from_slice(&(kv.len() as u32).to_le_bytes());
		comments.extend_from_slice(kv);
	}

	let mut out = b"fLaC".to_vec();
	push_block(&mut out, 0, false, &STREAMINFO);
	push_block(&mut out, 4, false, &comments);
	push_block(&mut out, 1, true, &[0; 64]);
	out.extend_from_slice(FLAC_FRAMES);
	out
}

/// # Push Metadata Block.
fn push_block(out: &mut Vec<u8>, kind: u8, last: bool, body: &[u8]) {
	let len = (body.len() as u32).to_be_bytes();
	out.push(if last { 0x80 | kind } else { kind });
	out.extend_from_slice(&len[1..]);
	out.extend_from_slice(body);
}

/// # Read Comments.
///
/// Return the Vorbis comments from the FLAC at `path`, panicking if there
/// aren't any.
pub(crate) fn read_comments(path: &Path) -> HashMap<String, Vec<String>> {
	metaflac::Tag::read_from_path(path)
		.expect("Unreadable FLAC.")
		.vorbis_comments()
		.expect("Missing comments.")
		.comments
		.clone()
}
