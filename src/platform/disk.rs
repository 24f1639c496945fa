//! Filesystem capacity queries.

use std::path::Path;

use crate::core::health_monitor::{DiskStatus, Reading, SensorError, SensorKind};

/// Total and free bytes of the filesystem containing `path` (statvfs).
#[cfg(unix)]
pub fn disk_status(path: &Path) -> Reading<DiskStatus> {
    use std::ffi::CString;
    use std::mem;
    use std::os::unix::ffi::OsStrExt;

    let c_path = CString::new(path.as_os_str().as_bytes())
        .map_err(|_| SensorError::new(SensorKind::Disk, "path contains a NUL byte"))?;

    let mut stats: libc::statvfs = unsafe { mem::zeroed() };
    let result = unsafe { libc::statvfs(c_path.as_ptr(), &mut stats) };

    if result != 0 {
        return Err(SensorError::new(
            SensorKind::Disk,
            format!(
                "statvfs({}) failed: {}",
                path.display(),
                std::io::Error::last_os_error()
            ),
        ));
    }

    let block_size = stats.f_frsize as u64;
    let total = (stats.f_blocks as u64).saturating_mul(block_size);
    let free = (stats.f_bavail as u64).saturating_mul(block_size);

    Ok(DiskStatus::from_bytes(total, free))
}

/// Total and free bytes of the volume containing `path` (GetDiskFreeSpaceExW).
#[cfg(windows)]
pub fn disk_status(path: &Path) -> Reading<DiskStatus> {
    use std::os::windows::ffi::OsStrExt;
    use windows_sys::Win32::Storage::FileSystem::GetDiskFreeSpaceExW;

    let wide: Vec<u16> = path
        .as_os_str()
        .encode_wide()
        .chain(std::iter::once(0))
        .collect();

    let mut free_to_caller: u64 = 0;
    let mut total: u64 = 0;
    let mut total_free: u64 = 0;

    let ok = unsafe {
        GetDiskFreeSpaceExW(
            wide.as_ptr(),
            &mut free_to_caller,
            &mut total,
            &mut total_free,
        )
    };

    if ok == 0 {
        return Err(SensorError::new(
            SensorKind::Disk,
            format!(
                "GetDiskFreeSpaceExW({}) failed: {}",
                path.display(),
                std::io::Error::last_os_error()
            ),
        ));
    }

    Ok(DiskStatus::from_bytes(total, free_to_caller))
}

#[cfg(not(any(unix, windows)))]
pub fn disk_status(path: &Path) -> Reading<DiskStatus> {
    Err(SensorError::new(
        SensorKind::Disk,
        format!("disk capacity not supported on this platform ({})", path.display()),
    ))
}
