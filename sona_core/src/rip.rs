/*!
# Sona: Rip and Transcode

The actual audio extraction is left to `cdparanoia`, and the FLAC encoding to
`ffmpeg`; this module just drives them.
*/

use crate::{
	Context,
	SonaError,
};
use std::path::{
	Path,
	PathBuf,
};



/// # Rip Suffix.
///
/// `cdparanoia -B` names its output `track01.cdda.wav`, etc.
const RIP_SUFFIX: &str = ".cdda.wav";

/// # FLAC Compression Level.
const FLAC_LEVEL: &str = "5";



/// # Rip Disc.
///
/// Rip every track from `dev` into `dir` as WAV.
///
/// ## Errors
///
/// Returns an error if `cdparanoia` can't be run or fails.
pub fn rip_disc(ctx: Context<'_>, dev: &Path, dir: &Path) -> Result<(), SonaError> {
	let dev = dev.to_string_lossy();
	ctx.log().info(format_args!("Running command cdparanoia -d {dev} -Bw"));

	let out = ctx.runner().run("cdparanoia", &["-d", &dev, "-Bw"], Some(dir))?;
	if out.success() { Ok(()) }
	else { Err(SonaError::Command("cdparanoia".to_owned(), out.detail())) }
}

/// # Transcode All.
///
/// Convert each ripped WAV in `dir` to FLAC, in name order, returning the
/// paths of the new files.
///
/// ## Errors
///
/// Returns an error if the directory can't be read, a ripped file has an
/// unexpected name, or `ffmpeg` fails. Nothing after the failure is
/// attempted.
pub fn transcode_all(ctx: Context<'_>, dir: &Path) -> Result<Vec<PathBuf>, SonaError> {
	ctx.log().info("Converting ripped songs to flac");

	let mut out = Vec::new();
	for src in ripped_files(dir)? {
		let dst = flac_name(&src)?;
		ctx.log().info(format_args!("Converting {src} to {dst}"));

		let res = ctx.runner().run(
			"ffmpeg",
			&["-i", &src, "-c:a", "flac", "-compression_level", FLAC_LEVEL, &dst],
			Some(dir),
		)?;
		if ! res.success() {
			return Err(SonaError::Command("ffmpeg".to_owned(), format!("{src}: {}", res.detail())));
		}

		ctx.log().info(format_args!("Converted {src} to {dst}"));
		out.push(dir.join(dst));
	}

	Ok(out)
}



/// # Ripped Files.
///
/// Return the names of the ripped WAVs in `dir`, sorted.
fn ripped_files(dir: &Path) -> Result<Vec<String>, SonaError> {
	let mut out: Vec<String> = std::fs::read_dir(dir)
		.map_err(|_| SonaError::ReadDir(dir.display().to_string()))?
		.filter_map(|e| {
			let e = e.ok()?;
			if e.file_type().ok()?.is_dir() { return None; }
			let name = e.file_name().into_string().ok()?;
			if name.contains(RIP_SUFFIX) { Some(name) }
			else { None }
		})
		.collect();

	out.sort_unstable();
	Ok(out)
}

/// # FLAC Name.
///
/// Turn `track01.cdda.wav` into `track01.flac`.
fn flac_name(src: &str) -> Result<String, SonaError> {
	src.strip_suffix(RIP_SUFFIX)
		.filter(|stem| ! stem.is_empty() && ! stem.contains('.'))
		.map(|stem| format!("{stem}.flac"))
		.ok_or_else(|| SonaError::TrackFile(src.to_owned()))
}



#[cfg(test)]
mod test {
	use super::*;
	use crate::{
		CommandOutput,
		PipelineLog,
		test_support::{
			FakeLookup,
			FakeRunner,
			FakeToc,
		},
	};

	#[test]
	fn t_flac_name() {
		assert_eq!(flac_name("track01.cdda.wav"), Ok("track01.flac".to_owned()));
		for bad in ["track01.wav", "my.track01.cdda.wav", ".cdda.wav", "track01.cdda.wav.bak"] {
			assert_eq!(
				flac_name(bad),
				Err(SonaError::TrackFile(bad.to_owned())),
				"Expected {bad} to be rejected.",
			);
		}
	}

	#[test]
	fn t_rip_disc() {
		let dir = tempfile::tempdir().expect("Tempdir failed.");
		let mut runner = FakeRunner::default();
		runner.succeed("cdparanoia");
		let log = PipelineLog::new();
		let toc = FakeToc::default();
		let lookup = FakeLookup::default();
		let ctx = Context::new(&runner, &toc, &lookup, &log);

		rip_disc(ctx, Path::new("/dev/sr0"), dir.path()).expect("Rip failed.");
		assert_eq!(runner.calls(), ["cdparanoia -d /dev/sr0 -Bw"]);

		// Failure.
		let mut runner = FakeRunner::default();
		runner.answer("cdparanoia", CommandOutput {
			stdout: Vec::new(),
			stderr: b"Unable to open disc.\n".to_vec(),
			status: Some(1),
		});
		let ctx = Context::new(&runner, &toc, &lookup, &log);
		assert_eq!(
			rip_disc(ctx, Path::new("/dev/sr0"), dir.path()),
			Err(SonaError::Command("cdparanoia".to_owned(), "Unable to open disc.".to_owned())),
		);
	}

	#[test]
	fn t_transcode_all() {
		let dir = tempfile::tempdir().expect("Tempdir failed.");
		for name in ["track02.cdda.wav", "track01.cdda.wav", "notes.txt"] {
			std::fs::write(dir.path().join(name), b"").expect("Write failed.");
		}

		let mut runner = FakeRunner::default();
		runner.succeed("ffmpeg");
		let log = PipelineLog::new();
		let toc = FakeToc::default();
		let lookup = FakeLookup::default();
		let ctx = Context::new(&runner, &toc, &lookup, &log);

		let out = transcode_all(ctx, dir.path()).expect("Transcode failed.");
		assert_eq!(out, [dir.path().join("track01.flac"), dir.path().join("track02.flac")]);
		assert_eq!(
			runner.calls(),
			[
				"ffmpeg -i track01.cdda.wav -c:a flac -compression_level 5 track01.flac",
				"ffmpeg -i track02.cdda.wav -c:a flac -compression_level 5 track02.flac",
			],
		);
	}

	#[test]
	fn t_transcode_stops() {
		let dir = tempfile::tempdir().expect("Tempdir failed.");
		for name in ["track01.cdda.wav", "track02.cdda.wav", "track03.cdda.wav"] {
			std::fs::write(dir.path().join(name), b"").expect("Write failed.");
		}

		// Only the first track is scripted to succeed.
		let mut runner = FakeRunner::default();
		runner.succeed("ffmpeg track01.flac");
		let log = PipelineLog::new();
		let toc = FakeToc::default();
		let lookup = FakeLookup::default();
		let ctx = Context::new(&runner, &toc, &lookup, &log);

		let res = transcode_all(ctx, dir.path());
		assert!(
			matches!(&res, Err(SonaError::Command(cmd, _)) if cmd == "ffmpeg"),
			"Expected an ffmpeg failure, not {res:?}.",
		);
		assert_eq!(runner.calls().len(), 2, "The third track should not have been tried.");

		// A mangled name stops things before ffmpeg is even run.
		let dir = tempfile::tempdir().expect("Tempdir failed.");
		std::fs::write(dir.path().join("track.01.cdda.wav"), b"").expect("Write failed.");
		let runner = FakeRunner::default();
		let ctx = Context::new(&runner, &toc, &lookup, &log);
		assert_eq!(
			transcode_all(ctx, dir.path()),
			Err(SonaError::TrackFile("track.01.cdda.wav".to_owned())),
		);
		assert!(runner.calls().is_empty(), "Nothing should have been run.");
	}
}
