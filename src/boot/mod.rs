// fields shared by all boot sector families

use bytemuck::{Pod, Zeroable};

use crate::{
    media::MediaDescriptor,
    sector::{FieldReader, FieldWriter},
    text::AsciiField,
};

pub mod sector;

/// Offsets of the region common to FAT12/16/32 and NTFS boot sectors.
pub(crate) mod offset {
    pub(crate) const JUMP_BOOT: usize = 0x00;
    pub(crate) const OEM_NAME: usize = 0x03;
    pub(crate) const BYTES_PER_SECTOR: usize = 0x0b;
    pub(crate) const SECTORS_PER_CLUSTER: usize = 0x0d;
    pub(crate) const RESERVED_SECTOR_COUNT: usize = 0x0e;
    pub(crate) const MEDIA_DESCRIPTOR: usize = 0x15;
    pub(crate) const SECTORS_PER_TRACK: usize = 0x18;
    pub(crate) const NUMBER_OF_HEADS: usize = 0x1a;
    pub(crate) const HIDDEN_SECTORS: usize = 0x1c;
}

/// The jump instruction at the very start of the sector, kept as raw bytes.
/// - Usually `0xEB 0x?? 0x90` (short jump + NOP) or `0xE9 0x?? 0x??` (near jump).
#[repr(transparent)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
pub struct JumpInstruction(pub [u8; 3]);

/// Which boot sector layout the caller expects to find on the volume.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FileSystemFamily {
    /// FAT12, FAT16 or FAT32.
    Fat,
    Ntfs,
}

/// The part of the sector preceding the BIOS parameter block.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Header {
    /// The jump instruction for CPUs to execute the bootstrap code.
    pub jump_boot: JumpInstruction,

    /// Name of the system that formatted the volume, e.g. `"MSDOS5.0"` or `"NTFS    "`.
    pub oem_name: AsciiField<8>,
}

impl Header {
    pub(crate) fn decode(fields: FieldReader<'_>) -> Self {
        Self {
            jump_boot: fields.pod(offset::JUMP_BOOT),
            oem_name: AsciiField::new(fields.bytes(offset::OEM_NAME)),
        }
    }

    pub(crate) fn encode(&self, fields: &mut FieldWriter<'_>) {
        fields.pod(offset::JUMP_BOOT, &self.jump_boot);
        fields.bytes(offset::OEM_NAME, self.oem_name.bytes());
    }
}

/// BIOS parameter block fields that FAT and NTFS store at the same offsets.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct CommonParameters {
    /// Size of a sector in bytes.
    /// - One of `512`, `1024`, `2048` or `4096` on well-formed volumes.
    pub bytes_per_sector: u16,

    /// Number of sectors in an allocation unit.
    /// - A power of two between `1` and `128`.
    pub sectors_per_cluster: u8,

    /// Number of sectors before the first FAT, including the boot sector.
    /// - Always `0` on NTFS.
    pub reserved_sector_count: u16,

    /// Legacy media type.
    pub media_descriptor: MediaDescriptor,

    /// Sectors per track for INT 13h geometry.
    pub sectors_per_track: u16,

    /// Number of heads for INT 13h geometry.
    pub number_of_heads: u16,

    /// Number of sectors preceding the partition that contains this volume.
    pub hidden_sectors: u32,
}

impl CommonParameters {
    pub(crate) fn decode(fields: FieldReader<'_>) -> Self {
        Self {
            bytes_per_sector: fields.u16(offset::BYTES_PER_SECTOR),
            sectors_per_cluster: fields.u8(offset::SECTORS_PER_CLUSTER),
            reserved_sector_count: fields.u16(offset::RESERVED_SECTOR_COUNT),
            media_descriptor: fields.u8(offset::MEDIA_DESCRIPTOR).into(),
            sectors_per_track: fields.u16(offset::SECTORS_PER_TRACK),
            number_of_heads: fields.u16(offset::NUMBER_OF_HEADS),
            hidden_sectors: fields.u32(offset::HIDDEN_SECTORS),
        }
    }

    pub(crate) fn encode(&self, fields: &mut FieldWriter<'_>) {
        fields.u16(offset::BYTES_PER_SECTOR, self.bytes_per_sector);
        fields.u8(offset::SECTORS_PER_CLUSTER, self.sectors_per_cluster);
        fields.u16(offset::RESERVED_SECTOR_COUNT, self.reserved_sector_count);
        fields.u8(offset::MEDIA_DESCRIPTOR, self.media_descriptor.into());
        fields.u16(offset::SECTORS_PER_TRACK, self.sectors_per_track);
        fields.u16(offset::NUMBER_OF_HEADS, self.number_of_heads);
        fields.u32(offset::HIDDEN_SECTORS, self.hidden_sectors);
    }

    /// Size of a cluster in bytes.
    pub fn bytes_per_cluster(&self) -> u32 {
        self.bytes_per_sector as u32 * self.sectors_per_cluster as u32
    }
}
