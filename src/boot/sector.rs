use crate::{
    disk::{self, BlockDevice, ReadOptions},
    error::{DecodeError, ReadError},
    fat::FatBootSector,
    ntfs::NtfsBootSector,
    sector::Sector,
};

use super::{CommonParameters, FileSystemFamily, Header};

/// A decoded boot sector of either family.
///
/// The family is chosen by the caller. Decoding never inspects the OEM name or any other
/// signature to guess it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BootSector {
    Fat(FatBootSector),
    Ntfs(NtfsBootSector),
}

impl BootSector {
    /// Decodes `bytes` with the layout of `family`. `bytes` must be exactly one 512-byte sector.
    pub fn decode(family: FileSystemFamily, bytes: &[u8]) -> Result<Self, DecodeError> {
        match family {
            FileSystemFamily::Fat => FatBootSector::decode(bytes).map(BootSector::Fat),
            FileSystemFamily::Ntfs => NtfsBootSector::decode(bytes).map(BootSector::Ntfs),
        }
    }

    /// Reads the boot sector of the volume located at `options.offset()` on `device` and decodes
    /// it with the layout of `family`.
    pub fn read_from<D: BlockDevice + ?Sized>(
        family: FileSystemFamily,
        device: &D,
        options: &ReadOptions,
    ) -> Result<Self, ReadError<D::Err>> {
        let sector = disk::read_sector(device, options)?;
        Ok(Self::decode(family, &sector)?)
    }

    pub fn family(&self) -> FileSystemFamily {
        match self {
            BootSector::Fat(_) => FileSystemFamily::Fat,
            BootSector::Ntfs(_) => FileSystemFamily::Ntfs,
        }
    }

    pub fn header(&self) -> &Header {
        match self {
            BootSector::Fat(boot) => &boot.header,
            BootSector::Ntfs(boot) => &boot.header,
        }
    }

    /// The parameter block fields both families store at the same offsets.
    pub fn common(&self) -> &CommonParameters {
        match self {
            BootSector::Fat(boot) => &boot.bpb.common,
            BootSector::Ntfs(boot) => &boot.bpb.common,
        }
    }

    pub fn to_bytes(&self) -> Sector {
        match self {
            BootSector::Fat(boot) => boot.to_bytes(),
            BootSector::Ntfs(boot) => boot.to_bytes(),
        }
    }
}

impl From<FatBootSector> for BootSector {
    fn from(boot: FatBootSector) -> Self {
        BootSector::Fat(boot)
    }
}

impl From<NtfsBootSector> for BootSector {
    fn from(boot: NtfsBootSector) -> Self {
        BootSector::Ntfs(boot)
    }
}
