/*!
# Sona: Pipeline
*/

use crate::{
	album_dir,
	Context,
	Disc,
	install,
	Release,
	resolve_drive,
	resolve_tags,
	rip_disc,
	RunOptions,
	SonaError,
	stage_untagged,
	TagRecord,
	track_offset,
	transcode_all,
	write_tags,
};
use std::path::{
	Path,
	PathBuf,
};



/// # Unknown Artist.
///
/// The folder name used when a release has no credited artists.
const UNKNOWN_ARTIST: &str = "Unknown Artist";



#[derive(Debug)]
/// # Run Report.
///
/// What a pipeline run found and, unless it was a dry run, where the
/// finished tracks ended up.
pub struct RunReport {
	disc: Disc,
	release: Release,
	tags: Vec<TagRecord>,
	offset: u16,
	album_dir: Option<PathBuf>,
	installed: Vec<PathBuf>,
}

impl RunReport {
	#[must_use]
	/// # Disc.
	pub const fn disc(&self) -> &Disc { &self.disc }

	#[must_use]
	/// # Release.
	pub const fn release(&self) -> &Release { &self.release }

	#[must_use]
	/// # Resolved Tags.
	pub fn tags(&self) -> &[TagRecord] { &self.tags }

	#[must_use]
	/// # Track Offset.
	///
	/// The number of tracks on the release's earlier discs.
	pub const fn offset(&self) -> u16 { self.offset }

	#[must_use]
	/// # Album Directory.
	///
	/// This is `None` for dry runs.
	pub fn album_dir(&self) -> Option<&Path> { self.album_dir.as_deref() }

	#[must_use]
	/// # Installed Files.
	pub fn installed(&self) -> &[PathBuf] { &self.installed }
}



/// # Run.
///
/// Find the drive, identify the disc, look it up, resolve the tags, and
/// (unless this is a dry run) rip, transcode, tag, and install the tracks.
///
/// Ripping happens in a temporary directory that is removed once the run
/// ends, however it ends.
///
/// ## Errors
///
/// The first failure of any step is returned. Nothing is retried.
pub fn run(ctx: Context<'_>, opts: &RunOptions) -> Result<RunReport, SonaError> {
	// Configuration first, before anything touches the drive.
	let root =
		if opts.no_rip() { None }
		else { Some(opts.music_root().ok_or(SonaError::MusicRoot)?) };

	let dev = match opts.dev() {
		Some(dev) => dev.to_path_buf(),
		None => resolve_drive(ctx)?,
	};

	let disc = Disc::read(ctx, &dev)?;

	ctx.log().info("Fetching release metadata");
	let meta = ctx.lookup().fetch(&disc)?;

	ctx.log().info("Getting the release property");
	let release = meta.select_release()?.clone();
	ctx.log().info(format_args!("Selected release {} ({})", release.title(), release.id()));

	ctx.log().info("Getting flac tags for songs");
	let tags = resolve_tags(&release, opts.disc())?;
	let offset = track_offset(&release, opts.disc())?;
	for t in &tags {
		ctx.log().info(format_args!("Flac tags for {}: {t:?}", t.title()));
	}

	let Some(root) = root else {
		return Ok(RunReport {
			disc,
			release,
			tags,
			offset,
			album_dir: None,
			installed: Vec::new(),
		});
	};

	let work = tempfile::Builder::new()
		.prefix("sona")
		.tempdir()
		.map_err(|_| SonaError::WorkDir)?;
	ctx.log().info(format_args!("Created temp directory {}", work.path().display()));

	rip_disc(ctx, disc.dev(), work.path())?;
	let flacs = transcode_all(ctx, work.path())?;
	check_transcoded(&flacs, &tags)?;
	stage_untagged(ctx, work.path(), &tags)?;
	let done = write_tags(ctx, work.path(), &tags, &release, opts.disc())?;

	let dst = album_dir(
		root,
		release.artist().filter(|a| ! a.is_empty()).unwrap_or(UNKNOWN_ARTIST),
		release.title(),
	);
	let installed = install(ctx, &done, &dst)?;

	Ok(RunReport {
		disc,
		release,
		tags,
		offset,
		album_dir: Some(dst),
		installed,
	})
}


/// # Check Transcoded.
///
/// Make sure every track the release lists was actually ripped and
/// transcoded before anything gets renamed.
fn check_transcoded(flacs: &[PathBuf], tags: &[TagRecord]) -> Result<(), SonaError> {
	for t in tags {
		let name = t.ripped_name();
		if ! flacs.iter().any(|p| p.file_name().is_some_and(|n| n == name.as_str())) {
			return Err(SonaError::MissingTrack(name));
		}
	}

	Ok(())
}



#[cfg(test)]
mod test {
	use super::*;
	use crate::{
		CommandRunner,
		Metadata,
		MetadataSource,
		PipelineLog,
		test_support::{
			FakeLookup,
			FakeRunner,
			FakeToc,
			flac_fixture,
			read_comments,
		},
		TocReader,
	};
	use std::num::NonZeroU8;

	const ALBUM: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<metadata xmlns="http://musicbrainz.org/ns/mmd-2.0#">
  <disc id="whatever">
    <release-list count="1">
      <release id="r1">
        <title>Album X</title>
        <artist-credit>
          <name-credit><artist type="Group"><name>Artist Y</name></artist></name-credit>
        </artist-credit>
        <medium-list count="1">
          <medium>
            <position>1</position>
            <format>CD</format>
            <disc-list count="1"><disc id="whatever"/></disc-list>
            <track-list count="2">
              <track><number>1</number><length>1000</length><recording><title>A</title></recording></track>
              <track><number>2</number><length>2000</length><recording><title>B</title></recording></track>
            </track-list>
          </medium>
        </medium-list>
      </release>
    </release-list>
  </disc>
</metadata>"#;

	/// # Fake Drive Tools.
	///
	/// `cdparanoia` leaves `tracks` WAVs behind; `ffmpeg` writes a FLAC
	/// wherever it's told.
	fn tools(tracks: u8) -> FakeRunner {
		let mut runner = FakeRunner::default().with_hook(move |program, args, cwd| {
			let Some(cwd) = cwd else { return; };
			if program == "cdparanoia" {
				for n in 1..=tracks {
					std::fs::write(cwd.join(format!("track{n:02}.cdda.wav")), b"RIFF")
						.expect("Fake rip failed.");
				}
			}
			else if program == "ffmpeg" {
				if let Some(dst) = args.last() {
					std::fs::write(cwd.join(dst), flac_fixture()).expect("Fake transcode failed.");
				}
			}
		});
		runner.succeed("cdparanoia");
		runner.succeed("ffmpeg");
		runner
	}

	fn ctx<'a>(
		runner: &'a dyn CommandRunner,
		toc: &'a dyn TocReader,
		lookup: &'a dyn MetadataSource,
		log: &'a PipelineLog,
	) -> Context<'a> {
		Context::new(runner, toc, lookup, log)
	}

	#[test]
	fn t_run() {
		let root = tempfile::tempdir().expect("Tempdir failed.");
		let runner = tools(2);
		let toc = FakeToc::default();
		let lookup = FakeLookup::new(ALBUM);
		let log = PipelineLog::new();
		let opts = RunOptions::default()
			.with_dev("/dev/sr0")
			.with_music_root(root.path());

		let report = run(ctx(&runner, &toc, &lookup, &log), &opts).expect("Run failed.");

		let album = root.path().join("Artist Y").join("Album X");
		assert_eq!(report.album_dir(), Some(album.as_path()));
		assert_eq!(report.installed(), [album.join("01. A.flac"), album.join("02. B.flac")]);
		for p in report.installed() {
			assert!(p.is_file(), "Missing {}.", p.display());
		}

		// The installed files should carry their tags.
		let c = read_comments(&report.installed()[0]);
		assert_eq!(c["TITLE"], ["A"]);
		assert_eq!(c["TRACKNUMBER"], ["1"]);
		assert_eq!(c["ALBUM"], ["Album X"]);
		assert_eq!(c["ARTIST"], ["Artist Y"]);
		let c = read_comments(&report.installed()[1]);
		assert_eq!(c["TITLE"], ["B"]);
		assert_eq!(c["TRACKNUMBER"], ["2"]);
		assert_eq!(c["LENGTH"], ["2000"]);
		assert_eq!(report.tags().len(), 2);
		assert_eq!(report.offset(), 0);
		assert_eq!(report.release().title(), "Album X");
		assert_eq!(lookup.calls(), 1, "Exactly one lookup should be made.");

		// The rip and both transcodes; no drive search.
		let calls = runner.calls();
		assert_eq!(calls.len(), 3, "Unexpected calls: {calls:?}");
		assert_eq!(calls[0], "cdparanoia -d /dev/sr0 -Bw");
	}

	#[test]
	fn t_run_no_rip() {
		let runner = FakeRunner::default();
		let toc = FakeToc::default();
		let lookup = FakeLookup::new(ALBUM);
		let log = PipelineLog::new();

		// No music root is needed.
		let opts = RunOptions::default()
			.with_dev("/dev/sr0")
			.with_no_rip(true);

		let report = run(ctx(&runner, &toc, &lookup, &log), &opts).expect("Run failed.");
		assert_eq!(report.album_dir(), None);
		assert!(report.installed().is_empty(), "Nothing should be installed.");
		assert_eq!(report.tags()[1].final_name(report.offset()), "02. B.flac");
		assert_eq!(report.disc().dev(), Path::new("/dev/sr0"));
		assert!(runner.calls().is_empty(), "Nothing should have been run.");
	}

	#[test]
	fn t_run_failures() {
		let runner = FakeRunner::default();
		let toc = FakeToc::default();
		let log = PipelineLog::new();

		// Missing music root: nothing happens at all.
		let lookup = FakeLookup::new(ALBUM);
		let opts = RunOptions::default().with_dev("/dev/sr0");
		assert!(
			matches!(run(ctx(&runner, &toc, &lookup, &log), &opts), Err(SonaError::MusicRoot)),
			"Expected a music root error.",
		);
		assert_eq!(lookup.calls(), 0, "No lookup should have been made.");

		// Network trouble.
		let lookup = FakeLookup::default();
		let opts = opts.with_no_rip(true);
		assert!(
			matches!(run(ctx(&runner, &toc, &lookup, &log), &opts), Err(SonaError::Request(_))),
			"Expected a request error.",
		);

		// An empty drive.
		let lookup = FakeLookup::new(ALBUM);
		let empty = FakeToc::empty();
		assert!(
			matches!(run(ctx(&runner, &empty, &lookup, &log), &opts), Err(SonaError::DiscRead(_))),
			"Expected a disc read error.",
		);
		assert_eq!(lookup.calls(), 0, "No lookup should have been made.");

		// Unsupported shapes.
		let lookup = FakeLookup::new("<metadata><release-list/></metadata>");
		let res = run(ctx(&runner, &toc, &lookup, &log), &opts);
		assert!(matches!(res, Err(SonaError::NoCdRelease)), "Expected no CD release.");
		assert!(res.is_err_and(|e| e.is_unrecoverable()), "That should be unrecoverable.");

		// A second disc that isn't there.
		let lookup = FakeLookup::new(ALBUM);
		let opts = opts.with_disc(NonZeroU8::new(2).expect("Two is non-zero."));
		assert!(
			matches!(run(ctx(&runner, &toc, &lookup, &log), &opts), Err(SonaError::NoMedium(2))),
			"Expected a missing medium.",
		);
	}

	#[test]
	fn t_run_rip_failure() {
		let root = tempfile::tempdir().expect("Tempdir failed.");
		let runner = FakeRunner::default();
		let toc = FakeToc::default();
		let lookup = FakeLookup::new(ALBUM);
		let log = PipelineLog::new();
		let opts = RunOptions::default()
			.with_dev("/dev/sr0")
			.with_music_root(root.path());

		assert!(
			matches!(
				run(ctx(&runner, &toc, &lookup, &log), &opts),
				Err(SonaError::Command(cmd, _)) if cmd == "cdparanoia"
			),
			"Expected a cdparanoia failure.",
		);
		assert!(
			std::fs::read_dir(root.path()).expect("Unreadable root.").next().is_none(),
			"Nothing should have been installed.",
		);
	}

	#[test]
	fn t_run_short_rip() {
		// Only one of the two tracks comes off the disc.
		let root = tempfile::tempdir().expect("Tempdir failed.");
		let runner = tools(1);
		let toc = FakeToc::default();
		let lookup = FakeLookup::new(ALBUM);
		let log = PipelineLog::new();
		let opts = RunOptions::default()
			.with_dev("/dev/sr0")
			.with_music_root(root.path());

		assert_eq!(
			run(ctx(&runner, &toc, &lookup, &log), &opts).map(|r| r.installed().len()),
			Err(SonaError::MissingTrack("track02.flac".to_owned())),
		);
		assert!(
			std::fs::read_dir(root.path()).expect("Unreadable root.").next().is_none(),
			"Nothing should have been installed.",
		);
	}

	#[test]
	fn t_check_transcoded() {
		let tags = resolve_tags(
			Metadata::from_xml(ALBUM).expect("Decode failed.").select_release().expect("No release."),
			NonZeroU8::MIN,
		).expect("Resolution failed.");

		let dir = Path::new("/tmp/work");
		let both = [dir.join("track01.flac"), dir.join("track02.flac")];
		assert_eq!(check_transcoded(&both, &tags), Ok(()));

		// Extras are fine.
		let extra = [dir.join("track01.flac"), dir.join("track02.flac"), dir.join("track03.flac")];
		assert_eq!(check_transcoded(&extra, &tags), Ok(()));

		assert_eq!(
			check_transcoded(&both[1..], &tags),
			Err(SonaError::MissingTrack("track01.flac".to_owned())),
		);
	}
}
