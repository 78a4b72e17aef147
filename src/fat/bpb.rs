use crate::{
    boot::CommonParameters,
    sector::{FieldReader, FieldWriter},
};

mod offset {
    pub(super) const FAT_COUNT: usize = 0x10;
    pub(super) const MAX_ROOT_DIR_ENTRIES: usize = 0x11;
    pub(super) const TOTAL_SECTORS_16: usize = 0x13;
    pub(super) const FAT_SIZE_16: usize = 0x16;
    pub(super) const TOTAL_SECTORS_32: usize = 0x20;
}

/// The BIOS parameter block of a FAT12/16/32 volume, starting at offset `0x0b`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct BiosParameterBlock {
    /// Fields laid out identically on NTFS.
    pub common: CommonParameters,

    /// Number of copies of the file allocation table.
    /// - Conventionally `2`.
    pub fat_count: u8,

    /// Number of 32-byte entries in the fixed root directory.
    /// - Must be `0` on FAT32, whose root directory is a cluster chain.
    pub max_root_dir_entries: u16,

    /// Total sector count if it fits in 16 bits.
    /// - A value of `0` means [`Self::total_sectors_32`] holds the count.
    pub total_sectors_16: u16,

    /// Sectors occupied by one FAT on FAT12/16.
    /// - A value of `0` means the FAT32 extended field holds the size.
    pub fat_size_16: u16,

    /// Total sector count when [`Self::total_sectors_16`] is `0`.
    pub total_sectors_32: u32,
}

impl BiosParameterBlock {
    pub(crate) fn decode(fields: FieldReader<'_>) -> Self {
        Self {
            common: CommonParameters::decode(fields),
            fat_count: fields.u8(offset::FAT_COUNT),
            max_root_dir_entries: fields.u16(offset::MAX_ROOT_DIR_ENTRIES),
            total_sectors_16: fields.u16(offset::TOTAL_SECTORS_16),
            fat_size_16: fields.u16(offset::FAT_SIZE_16),
            total_sectors_32: fields.u32(offset::TOTAL_SECTORS_32),
        }
    }

    pub(crate) fn encode(&self, fields: &mut FieldWriter<'_>) {
        self.common.encode(fields);
        fields.u8(offset::FAT_COUNT, self.fat_count);
        fields.u16(offset::MAX_ROOT_DIR_ENTRIES, self.max_root_dir_entries);
        fields.u16(offset::TOTAL_SECTORS_16, self.total_sectors_16);
        fields.u16(offset::FAT_SIZE_16, self.fat_size_16);
        fields.u32(offset::TOTAL_SECTORS_32, self.total_sectors_32);
    }

    /// The authoritative total sector count of the volume.
    pub fn total_sectors(&self) -> u32 {
        match self.total_sectors_16 {
            0 => self.total_sectors_32,
            small => small as u32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{media::MediaDescriptor, sector::SECTOR_SIZE};

    fn floppy() -> [u8; SECTOR_SIZE] {
        // 1.44MB floppy
        let mut sector = [0u8; SECTOR_SIZE];
        let mut fields = FieldWriter::new(&mut sector);
        fields.u16(0x0b, 512);
        fields.u8(0x0d, 1);
        fields.u16(0x0e, 1);
        fields.u8(0x10, 2);
        fields.u16(0x11, 224);
        fields.u16(0x13, 2880);
        fields.u8(0x15, 0xF0);
        fields.u16(0x16, 9);
        fields.u16(0x18, 18);
        fields.u16(0x1a, 2);
        sector
    }

    #[test]
    fn decode_floppy() {
        let sector = floppy();
        let bpb = BiosParameterBlock::decode(FieldReader::new(&sector));

        assert_eq!(bpb.common.bytes_per_sector, 512);
        assert_eq!(bpb.common.sectors_per_cluster, 1);
        assert_eq!(bpb.common.reserved_sector_count, 1);
        assert_eq!(bpb.fat_count, 2);
        assert_eq!(bpb.max_root_dir_entries, 224);
        assert_eq!(bpb.total_sectors_16, 2880);
        assert_eq!(bpb.common.media_descriptor, MediaDescriptor::Removable);
        assert_eq!(bpb.fat_size_16, 9);
        assert_eq!(bpb.common.sectors_per_track, 18);
        assert_eq!(bpb.common.number_of_heads, 2);
        assert_eq!(bpb.common.hidden_sectors, 0);
        assert_eq!(bpb.total_sectors_32, 0);
    }

    #[test]
    fn total_sectors_prefers_16_bit_field() {
        let sector = floppy();
        let mut bpb = BiosParameterBlock::decode(FieldReader::new(&sector));
        assert_eq!(bpb.total_sectors(), 2880);

        bpb.total_sectors_32 = 1_000_000;
        assert_eq!(bpb.total_sectors(), 2880);

        bpb.total_sectors_16 = 0;
        assert_eq!(bpb.total_sectors(), 1_000_000);
    }

    #[test]
    fn encode_restores_fields() {
        let sector = floppy();
        let bpb = BiosParameterBlock::decode(FieldReader::new(&sector));

        let mut encoded = [0u8; SECTOR_SIZE];
        bpb.encode(&mut FieldWriter::new(&mut encoded));
        assert_eq!(encoded, sector);
    }
}
