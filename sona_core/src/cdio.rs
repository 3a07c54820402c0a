/*!
# Sona: `libcdio` Wrappers
*/

use crate::{
	CD_LEADIN,
	DiscToc,
	SonaError,
	TocReader,
};
use libcdio_sys::{
	cdio_track_enums_CDIO_CDROM_LEADOUT_TRACK,
	discmode_t_CDIO_DISC_MODE_CD_DA,
	discmode_t_CDIO_DISC_MODE_CD_MIXED,
	driver_id_t_DRIVER_DEVICE,
	track_format_t_TRACK_FORMAT_AUDIO,
	track_format_t_TRACK_FORMAT_ERROR,
	track_format_t_TRACK_FORMAT_PSX,
};
use std::{
	ffi::CString,
	os::unix::ffi::OsStrExt,
	path::Path,
	sync::Once,
};



static LIBCDIO_INIT: Once = Once::new();



#[derive(Debug, Clone, Copy, Default)]
/// # Linux CD-ROM.
///
/// Read the table of contents from a drive by way of `libcdio`.
pub struct LinuxCdrom;

impl TocReader for LinuxCdrom {
	fn read_toc(&self, dev: &Path) -> Result<DiscToc, SonaError> {
		let err = || SonaError::DiscRead(dev.display().to_string());
		let cdio = LibcdioInstance::new(dev).ok_or_else(err)?;

		let mut audio = Vec::new();
		let mut data = None;

		// The inclusive range to search.
		let from = cdio.first_track_num().ok_or_else(err)?;
		let to = cdio.num_tracks().ok_or_else(err)?;
		if to < from { return Err(err()); }

		for idx in from..=to {
			let start = cdio.track_lba_start(idx).ok_or_else(err)?;
			if cdio.track_format(idx).ok_or_else(err)? { audio.push(start); }
			else {
				// Only one data track is supported, and only at either end.
				if data.is_some() || (idx != from && idx != to) {
					return Err(err());
				}
				data.replace(start);
			}
		}

		let leadout = cdio.leadout_lba().ok_or_else(err)?;
		Ok(DiscToc::new(audio, data, leadout))
	}
}



#[derive(Debug)]
#[allow(dead_code)] // The device string just needs to outlive the pointer.
/// # CDIO Instance.
struct LibcdioInstance {
	dev: CString,
	ptr: *mut libcdio_sys::CdIo_t,
}

impl Drop for LibcdioInstance {
	#[allow(unsafe_code)]
	fn drop(&mut self) {
		// Safety: the pointer came from `cdio_open` and is released exactly
		// once.
		if ! self.ptr.is_null() {
			unsafe { libcdio_sys::cdio_destroy(self.ptr); }
		}
	}
}

impl LibcdioInstance {
	#[allow(unsafe_code)]
	/// # New.
	///
	/// Connect to `dev`, returning `None` if it doesn't exist, can't be
	/// opened, or doesn't hold an audio CD.
	fn new(dev: &Path) -> Option<Self> {
		LIBCDIO_INIT.call_once(|| unsafe { libcdio_sys::cdio_init(); });

		if ! dev.exists() { return None; }
		let dev = CString::new(dev.as_os_str().as_bytes()).ok()?;

		// Safety: the string outlives the instance.
		let ptr = unsafe { libcdio_sys::cdio_open(dev.as_ptr(), driver_id_t_DRIVER_DEVICE) };
		if ptr.is_null() { return None; }

		let out = Self { dev, ptr };
		if out.is_audio() { Some(out) }
		else { None }
	}

	#[allow(unsafe_code)]
	#[allow(non_upper_case_globals)] // Not our globals.
	/// # Audio Disc?
	fn is_audio(&self) -> bool {
		let discmode = unsafe { libcdio_sys::cdio_get_discmode(self.ptr) };
		matches!(
			discmode,
			discmode_t_CDIO_DISC_MODE_CD_DA | discmode_t_CDIO_DISC_MODE_CD_MIXED
		)
	}

	#[allow(unsafe_code)]
	/// # First Track Number.
	fn first_track_num(&self) -> Option<u8> {
		let raw = unsafe { libcdio_sys::cdio_get_first_track_num(self.ptr.cast_const()) };
		if raw == 0 { None }
		else { Some(raw) }
	}

	#[allow(unsafe_code)]
	/// # Number of Tracks.
	fn num_tracks(&self) -> Option<u8> {
		let raw = unsafe { libcdio_sys::cdio_get_num_tracks(self.ptr.cast_const()) };
		if raw == 0 { None }
		else { Some(raw) }
	}

	#[allow(unsafe_code)]
	#[allow(non_upper_case_globals)] // Not our globals.
	/// # Track Format.
	///
	/// Returns `true` for audio, `false` for data, and `None` for anything
	/// else.
	fn track_format(&self, idx: u8) -> Option<bool> {
		let kind = unsafe { libcdio_sys::cdio_get_track_format(self.ptr.cast_const(), idx) };
		match kind {
			track_format_t_TRACK_FORMAT_AUDIO => Some(true),
			track_format_t_TRACK_FORMAT_PSX |
			track_format_t_TRACK_FORMAT_ERROR => None,
			_ => Some(false),
		}
	}

	#[allow(unsafe_code)]
	/// # Track LBA Start.
	fn track_lba_start(&self, idx: u8) -> Option<u32> {
		if idx == 0 { return None; }
		let raw = unsafe { libcdio_sys::cdio_get_track_lsn(self.ptr.cast_const(), idx) };
		lsn_to_lba(raw)
	}

	/// # Leadout.
	fn leadout_lba(&self) -> Option<u32> {
		let idx = u8::try_from(cdio_track_enums_CDIO_CDROM_LEADOUT_TRACK).unwrap_or(170);
		self.track_lba_start(idx)
	}
}



/// # LSN to LBA.
///
/// `libcdio` reports LSNs; the lead-in is added to match what everything
/// downstream expects. Negative values are errors.
fn lsn_to_lba(raw: i32) -> Option<u32> {
	if raw < 0 { None }
	else { raw.abs_diff(0).checked_add(u32::from(CD_LEADIN)) }
}
