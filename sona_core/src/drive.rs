/*!
# Sona: Drive Detection
*/

use crate::{
	CommandRunner,
	Context,
	SonaError,
};
use std::path::{
	Path,
	PathBuf,
};



/// # Device Directory.
pub const DEVICE_DIR: &str = "/dev";

/// # Device Name Prefix.
///
/// Optical drives are `/dev/sr0`, `/dev/sr1`, etc.
pub const DEVICE_PREFIX: &str = "sr";

/// # Blu-ray Property.
const PROP_BD: &str = "ID_CDROM_BD=1";

/// # CD Property.
const PROP_CD: &str = "ID_CDROM=1";



#[derive(Debug, Clone, Copy, Eq, PartialEq)]
/// # Drive Kind.
///
/// How a device classifies according to its udev properties.
pub enum DriveKind {
	/// # Blu-ray.
	BluRay,

	/// # Optical Drive.
	Cd,

	/// # Something Else.
	Other,
}

impl DriveKind {
	#[must_use]
	/// # From `udevadm` Properties.
	///
	/// Parse the `KEY=VALUE` lines printed by
	/// `udevadm info --query=property`.
	///
	/// `ID_CDROM_BD=1` wins over everything else, even if the device also
	/// claims `ID_CDROM=1`.
	pub fn from_properties(raw: &str) -> Self {
		let mut cd = false;
		for line in raw.lines() {
			let line = line.trim();
			if line == PROP_BD { return Self::BluRay; }
			if line == PROP_CD { cd = true; }
		}

		if cd { Self::Cd }
		else { Self::Other }
	}

	#[must_use]
	/// # Acceptable?
	pub const fn is_cd(self) -> bool { matches!(self, Self::Cd) }
}



/// # Resolve Drive.
///
/// Find the first `/dev/sr*` device that is a CD drive (and not a Blu-ray
/// drive).
///
/// ## Errors
///
/// Any property query failure is returned immediately, even if later devices
/// might have worked. If nothing matches, [`SonaError::NoDrive`] is returned.
pub fn resolve_drive(ctx: Context<'_>) -> Result<PathBuf, SonaError> {
	resolve_drive_in(ctx, Path::new(DEVICE_DIR), DEVICE_PREFIX)
}

/// # Resolve Drive (Custom Location).
///
/// Same as [`resolve_drive`], but scanning `dir` for entries beginning with
/// `prefix`.
///
/// ## Errors
///
/// See [`resolve_drive`].
pub fn resolve_drive_in(ctx: Context<'_>, dir: &Path, prefix: &str)
-> Result<PathBuf, SonaError> {
	ctx.log().info("Getting all device names");

	for dev in candidates(dir, prefix)? {
		match query_drive(ctx.runner(), &dev)? {
			DriveKind::Cd => {
				ctx.log().info(format_args!("Found CD drive {}", dev.display()));
				return Ok(dev);
			},
			DriveKind::BluRay => {
				ctx.log().info(format_args!("Skipping Blu-ray drive {}", dev.display()));
			},
			DriveKind::Other => {},
		}
	}

	Err(SonaError::NoDrive)
}

/// # Query Drive.
///
/// Run `udevadm info --query=property --name=<dev>` and classify the result.
///
/// ## Errors
///
/// Returns an error if `udevadm` cannot be run or exits non-zero.
pub fn query_drive(runner: &dyn CommandRunner, dev: &Path) -> Result<DriveKind, SonaError> {
	let name = format!("--name={}", dev.display());
	let out = runner.run("udevadm", &["info", "--query=property", &name], None)
		.map_err(|e| SonaError::DeviceQuery(dev.display().to_string(), e.to_string()))?;

	if out.success() {
		Ok(DriveKind::from_properties(&String::from_utf8_lossy(&out.stdout)))
	}
	else {
		Err(SonaError::DeviceQuery(dev.display().to_string(), out.detail()))
	}
}

/// # Candidate Devices.
///
/// Return the entries of `dir` whose names begin with `prefix`, sorted the
/// way a shell glob would be.
fn candidates(dir: &Path, prefix: &str) -> Result<Vec<PathBuf>, SonaError> {
	let mut out: Vec<PathBuf> = std::fs::read_dir(dir)
		.map_err(|_| SonaError::ReadDir(dir.display().to_string()))?
		.filter_map(|e| {
			let e = e.ok()?;
			if e.file_name().to_str()?.starts_with(prefix) { Some(e.path()) }
			else { None }
		})
		.collect();

	out.sort_unstable();
	Ok(out)
}
