use crate::{
    boot::Header,
    disk::{self, BlockDevice, ReadOptions},
    error::{DecodeError, ReadError},
    sector::{self, FieldReader, FieldWriter, SECTOR_SIZE, Sector},
};

use super::BiosParameterBlock;

/// The boot sector of an NTFS volume.
///
/// Only the header and the BIOS parameter block are decoded. The bootstrap code and the end of
/// sector signature that follow are ignored.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct NtfsBootSector {
    /// Jump instruction and OEM name (`"NTFS    "`).
    pub header: Header,

    /// The NTFS BIOS parameter block.
    pub bpb: BiosParameterBlock,
}

impl NtfsBootSector {
    /// Decodes an NTFS boot sector. `bytes` must be exactly one 512-byte sector.
    pub fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        let sector = sector::as_sector(bytes)?;
        let fields = FieldReader::new(sector);
        let boot_sector = Self {
            header: Header::decode(fields),
            bpb: BiosParameterBlock::decode(fields),
        };
        trace!(
            "Decoded NTFS boot sector: OEM {:?}, MFT at cluster {}",
            boot_sector.header.oem_name,
            boot_sector.bpb.mft_cluster
        );
        Ok(boot_sector)
    }

    /// Encodes every decoded field at its offset, leaving all other bytes zero.
    pub fn to_bytes(&self) -> Sector {
        let mut sector = [0u8; SECTOR_SIZE];
        let mut fields = FieldWriter::new(&mut sector);
        self.header.encode(&mut fields);
        self.bpb.encode(&mut fields);
        sector
    }

    /// Reads the boot sector of the volume located at `options.offset()` on `device`.
    pub fn read_from<D: BlockDevice + ?Sized>(
        device: &D,
        options: &ReadOptions,
    ) -> Result<Self, ReadError<D::Err>> {
        let sector = disk::read_sector(device, options)?;
        Ok(Self::decode(&sector)?)
    }
}
