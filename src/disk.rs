use core::ops::Deref;
use std::{io, sync::Arc};

use derive_builder::Builder;

use crate::sector::{SECTOR_SIZE, Sector};

pub trait DeviceError {
    fn unexpected_eof() -> Self;
}

/// A raw block device, partition or disk image that supports reads at absolute byte offsets.
///
/// Opening the device is up to the implementor's constructor, closing happens on drop.
pub trait BlockDevice {
    type Err: DeviceError + core::error::Error + 'static;

    /// Reads up to `buffer.len()` bytes starting at `offset`, returning how many were read.
    /// `0` means the end of the device was reached.
    fn read_at(&self, offset: u64, buffer: &mut [u8]) -> Result<usize, Self::Err>;

    /// Fills `buffer` completely from `offset`, failing if the device ends first.
    fn read_exact_at(&self, mut offset: u64, mut buffer: &mut [u8]) -> Result<(), Self::Err> {
        while !buffer.is_empty() {
            match self.read_at(offset, buffer)? {
                0 => return Err(<Self::Err as DeviceError>::unexpected_eof()),
                n => {
                    buffer = &mut buffer[n..];
                    offset = offset
                        .checked_add(n as u64)
                        .ok_or_else(<Self::Err as DeviceError>::unexpected_eof)?;
                }
            }
        }
        Ok(())
    }
}

impl DeviceError for io::Error {
    fn unexpected_eof() -> Self {
        io::Error::from(io::ErrorKind::UnexpectedEof)
    }
}

impl<T: BlockDevice + ?Sized> BlockDevice for &T {
    type Err = T::Err;

    fn read_at(&self, offset: u64, buf: &mut [u8]) -> Result<usize, Self::Err> {
        (*self).read_at(offset, buf)
    }
}

impl<T: BlockDevice + ?Sized> BlockDevice for Arc<T> {
    type Err = T::Err;

    fn read_at(&self, offset: u64, buf: &mut [u8]) -> Result<usize, Self::Err> {
        self.deref().read_at(offset, buf)
    }
}

/// An in-memory disk image.
impl BlockDevice for [u8] {
    type Err = io::Error;

    fn read_at(&self, offset: u64, buf: &mut [u8]) -> Result<usize, Self::Err> {
        let Some(remaining) = usize::try_from(offset).ok().and_then(|o| self.get(o..)) else {
            return Ok(0);
        };
        let n = remaining.len().min(buf.len());
        buf[..n].copy_from_slice(&remaining[..n]);
        Ok(n)
    }
}

impl BlockDevice for Vec<u8> {
    type Err = io::Error;

    fn read_at(&self, offset: u64, buf: &mut [u8]) -> Result<usize, Self::Err> {
        self.as_slice().read_at(offset, buf)
    }
}

impl<const N: usize> BlockDevice for [u8; N] {
    type Err = io::Error;

    fn read_at(&self, offset: u64, buf: &mut [u8]) -> Result<usize, Self::Err> {
        self.as_slice().read_at(offset, buf)
    }
}

#[cfg(feature = "std")]
impl BlockDevice for std::fs::File {
    type Err = io::Error;

    #[cfg(unix)]
    fn read_at(&self, offset: u64, buf: &mut [u8]) -> Result<usize, Self::Err> {
        std::os::unix::fs::FileExt::read_at(self, buf, offset)
    }

    #[cfg(windows)]
    fn read_at(&self, offset: u64, buf: &mut [u8]) -> Result<usize, Self::Err> {
        std::os::windows::fs::FileExt::seek_read(self, buf, offset)
    }
}

/// Opens a volume for reading, e.g. `/dev/sdb1`, a disk image or `\\.\C:` on Windows.
#[cfg(feature = "std")]
pub fn open_volume<P: AsRef<std::path::Path>>(path: P) -> io::Result<std::fs::File> {
    let path = path.as_ref();
    debug!("Opening volume {}", path.display());
    std::fs::File::open(path)
}

/// Where to find the boot sector on a device.
#[derive(Builder, Copy, Clone, Debug, Default, PartialEq, Eq)]
#[builder(build_fn(validate = "Self::validate"))]
pub struct ReadOptions {
    /// Absolute byte offset of the volume on the device.
    /// - `0` if the device is the volume itself, the partition start on a whole-disk image.
    /// - Must be a multiple of `512`.
    #[builder(default)]
    offset: u64,
}

impl ReadOptions {
    pub fn offset(&self) -> u64 {
        self.offset
    }
}

impl ReadOptionsBuilder {
    fn validate(&self) -> Result<(), String> {
        match self.offset {
            Some(offset) if offset % SECTOR_SIZE as u64 != 0 => Err(format!(
                "Invalid offset: {offset:#x}. Must be a multiple of `{SECTOR_SIZE}`."
            )),
            _ => Ok(()),
        }
    }
}

/// Reads the 512 bytes at `options.offset()`.
pub fn read_sector<D: BlockDevice + ?Sized>(
    device: &D,
    options: &ReadOptions,
) -> Result<Sector, crate::error::ReadError<D::Err>> {
    let mut sector = [0u8; SECTOR_SIZE];
    trace!("Reading boot sector at {:#x}", options.offset);
    device
        .read_exact_at(options.offset, &mut sector)
        .map_err(|e| crate::error::ReadError::Device(options.offset, e))?;
    Ok(sector)
}
