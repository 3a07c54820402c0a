/*!
# Sona
*/

#![forbid(unsafe_code)]

#![deny(
	clippy::allow_attributes_without_reason,
	clippy::correctness,
	unreachable_pub,
)]

#![warn(
	clippy::complexity,
	clippy::nursery,
	clippy::pedantic,
	clippy::perf,
	clippy::style,

	clippy::allow_attributes,
	clippy::clone_on_ref_ptr,
	clippy::create_dir,
	clippy::filetype_is_file,
	clippy::format_push_string,
	clippy::get_unwrap,
	clippy::impl_trait_in_params,
	clippy::lossy_float_literal,
	clippy::missing_assert_message,
	clippy::missing_docs_in_private_items,
	clippy::needless_raw_strings,
	clippy::panic_in_result_fn,
	clippy::pub_without_shorthand,
	clippy::rest_pat_in_fully_bound_structs,
	clippy::semicolon_inside_block,
	clippy::str_to_string,
	clippy::string_to_string,
	clippy::todo,
	clippy::undocumented_unsafe_blocks,
	clippy::unneeded_field_pattern,
	clippy::unseparated_literal_suffix,
	clippy::unwrap_in_result,

	macro_use_extern_crate,
	missing_copy_implementations,
	missing_docs,
	non_ascii_idents,
	trivial_casts,
	trivial_numeric_casts,
	unused_crate_dependencies,
	unused_extern_crates,
	unused_import_braces,
)]

#![expect(clippy::redundant_pub_crate, reason = "Unresolvable.")]



mod cli;

use dactyl::NiceElapsed;
use fyi_msg::Msg;
use oxford_join::{
	Conjunction,
	OxfordJoin,
};
use sona_core::{
	Context,
	LinuxCdrom,
	MusicBrainz,
	PipelineLog,
	RunReport,
	SonaError,
	SystemRunner,
};
use std::{
	process::ExitCode,
	time::Instant,
};



/// # Exit Code: Unrecoverable Metadata.
///
/// Used when the release data itself can't be worked with, as opposed to
/// ordinary configuration, device, network, or I/O failures.
const EXIT_UNRECOVERABLE: u8 = 2;



/// # Main.
///
/// This lets us bubble up startup errors so they can be pretty-printed.
fn main() -> ExitCode {
	match main__() {
		Ok(()) => ExitCode::SUCCESS,
		Err(e @ (SonaError::PrintHelp | SonaError::PrintVersion)) => {
			println!("{e}");
			ExitCode::SUCCESS
		},
		Err(e) => {
			let code =
				if e.is_unrecoverable() { ExitCode::from(EXIT_UNRECOVERABLE) }
				else { ExitCode::FAILURE };
			Msg::from(e).eprint();
			code
		},
	}
}

#[inline]
/// # Actual Main.
///
/// This does all the stuff.
fn main__() -> Result<(), SonaError> {
	let (opts, log_path, verbose) = cli::parse()?;

	let mut log = PipelineLog::new().with_stdout(verbose);
	if let Some(path) = log_path { log = log.with_file(path)?; }

	let runner = SystemRunner;
	let toc = LinuxCdrom;
	let lookup = MusicBrainz::default();
	let ctx = Context::new(&runner, &toc, &lookup, &log);

	let now = Instant::now();
	let report = sona_core::run(ctx, &opts).inspect_err(|e| { log.error(e); })?;

	summarize(&report);

	if opts.no_rip() {
		Msg::info("Nothing was ripped (--no-rip).").eprint();
	}
	else {
		let elapsed = u32::try_from(now.elapsed().as_secs()).unwrap_or(u32::MAX);
		let dir = report.album_dir().map_or_else(String::new, |d| d.display().to_string());
		log.info(format_args!("Finished {dir}"));
		Msg::success(format!(
			"Saved {} track{} to {dir} in {}.",
			report.installed().len(),
			if report.installed().len() == 1 { "" } else { "s" },
			NiceElapsed::from(elapsed),
		)).eprint();
	}

	Ok(())
}

/// # Summarize.
///
/// Print the disc layout, the release, and the resolved track list to
/// STDERR.
fn summarize(report: &RunReport) {
	eprintln!("{}", report.disc());

	let release = report.release();
	let artists = release.artist_credit().names();
	if artists.is_empty() { eprintln!("{}\n", release.title()); }
	else {
		eprintln!("{} by {}\n", release.title(), artists.oxford_join(Conjunction::And));
	}

	for t in report.tags() {
		if t.artists().is_empty() {
			eprintln!("  {}", t.final_name(report.offset()));
		}
		else {
			eprintln!(
				"  {}  ({})",
				t.final_name(report.offset()),
				t.artists().oxford_join(Conjunction::And),
			);
		}
	}
	eprintln!();
}
