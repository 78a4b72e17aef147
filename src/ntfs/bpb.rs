use crate::{
    boot::CommonParameters,
    sector::{FieldReader, FieldWriter},
    text::AsciiField,
};

mod offset {
    pub(super) const RESERVED_10: usize = 0x10;
    pub(super) const RESERVED_13: usize = 0x13;
    pub(super) const RESERVED_16: usize = 0x16;
    pub(super) const RESERVED_20: usize = 0x20;
    pub(super) const RESERVED_24: usize = 0x24;
    pub(super) const TOTAL_SECTORS: usize = 0x28;
    pub(super) const MFT_CLUSTER: usize = 0x30;
    pub(super) const MFT_MIRROR_CLUSTER: usize = 0x38;
    pub(super) const CLUSTERS_PER_MFT_RECORD: usize = 0x40;
    pub(super) const CLUSTERS_PER_INDEX_BUFFER: usize = 0x44;
    pub(super) const VOLUME_SERIAL_NUMBER: usize = 0x48;
    pub(super) const CHECKSUM: usize = 0x50;
}

/// The BIOS parameter block of an NTFS volume, starting at offset `0x0b`.
///
/// NTFS refuses to mount volumes where the FAT-only slots are non-zero. They are decoded anyway
/// so that a sector can be inspected and encoded again without losing bytes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct BiosParameterBlock {
    /// Fields laid out identically on FAT.
    pub common: CommonParameters,

    /// FAT count and root directory entries on FAT. Must be zero.
    pub reserved_10: [u8; 3],

    /// 16-bit total sectors on FAT. Must be zero.
    pub reserved_13: u16,

    /// 16-bit FAT size on FAT. Must be zero.
    pub reserved_16: u16,

    /// 32-bit total sectors on FAT. Must be zero.
    pub reserved_20: u32,

    /// Not used by NTFS. Usually `0x00800080`.
    pub reserved_24: u32,

    /// Number of sectors in the volume.
    pub total_sectors: u64,

    /// Logical cluster number of the master file table.
    pub mft_cluster: i64,

    /// Logical cluster number of the master file table mirror.
    pub mft_mirror_cluster: i64,

    /// Size of an MFT record. Only the low byte is significant, as a signed value:
    /// - positive: number of clusters per record.
    /// - negative `n`: a record is `2^-n` bytes.
    pub clusters_per_mft_record: u32,

    /// Size of an index buffer, encoded like [`Self::clusters_per_mft_record`].
    pub clusters_per_index_buffer: u32,

    /// Volume serial number as raw bytes.
    pub volume_serial_number: AsciiField<8>,

    /// Boot sector checksum. Not used by NTFS.
    pub checksum: u32,
}

impl BiosParameterBlock {
    pub(crate) fn decode(fields: FieldReader<'_>) -> Self {
        Self {
            common: CommonParameters::decode(fields),
            reserved_10: fields.bytes(offset::RESERVED_10),
            reserved_13: fields.u16(offset::RESERVED_13),
            reserved_16: fields.u16(offset::RESERVED_16),
            reserved_20: fields.u32(offset::RESERVED_20),
            reserved_24: fields.u32(offset::RESERVED_24),
            total_sectors: fields.u64(offset::TOTAL_SECTORS),
            mft_cluster: fields.i64(offset::MFT_CLUSTER),
            mft_mirror_cluster: fields.i64(offset::MFT_MIRROR_CLUSTER),
            clusters_per_mft_record: fields.u32(offset::CLUSTERS_PER_MFT_RECORD),
            clusters_per_index_buffer: fields.u32(offset::CLUSTERS_PER_INDEX_BUFFER),
            volume_serial_number: AsciiField::new(fields.bytes(offset::VOLUME_SERIAL_NUMBER)),
            checksum: fields.u32(offset::CHECKSUM),
        }
    }

    pub(crate) fn encode(&self, fields: &mut FieldWriter<'_>) {
        self.common.encode(fields);
        fields.bytes(offset::RESERVED_10, &self.reserved_10);
        fields.u16(offset::RESERVED_13, self.reserved_13);
        fields.u16(offset::RESERVED_16, self.reserved_16);
        fields.u32(offset::RESERVED_20, self.reserved_20);
        fields.u32(offset::RESERVED_24, self.reserved_24);
        fields.u64(offset::TOTAL_SECTORS, self.total_sectors);
        fields.i64(offset::MFT_CLUSTER, self.mft_cluster);
        fields.i64(offset::MFT_MIRROR_CLUSTER, self.mft_mirror_cluster);
        fields.u32(offset::CLUSTERS_PER_MFT_RECORD, self.clusters_per_mft_record);
        fields.u32(offset::CLUSTERS_PER_INDEX_BUFFER, self.clusters_per_index_buffer);
        fields.bytes(offset::VOLUME_SERIAL_NUMBER, self.volume_serial_number.bytes());
        fields.u32(offset::CHECKSUM, self.checksum);
    }

    /// Whether every slot NTFS requires to be zero is zero.
    pub fn reserved_fields_clear(&self) -> bool {
        self.common.reserved_sector_count == 0
            && self.reserved_10 == [0; 3]
            && self.reserved_13 == 0
            && self.reserved_16 == 0
            && self.reserved_20 == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sector::SECTOR_SIZE;

    #[test]
    fn reserved_slots_are_exposed() {
        let mut sector = [0u8; SECTOR_SIZE];
        sector[0x10..0x13].copy_from_slice(&[1, 2, 3]);
        sector[0x13..0x15].copy_from_slice(&[0x34, 0x12]);
        sector[0x16..0x18].copy_from_slice(&[0x78, 0x56]);
        sector[0x20..0x24].copy_from_slice(&[0xff; 4]);

        let bpb = BiosParameterBlock::decode(FieldReader::new(&sector));
        assert_eq!(bpb.reserved_10, [1, 2, 3]);
        assert_eq!(bpb.reserved_13, 0x1234);
        assert_eq!(bpb.reserved_16, 0x5678);
        assert_eq!(bpb.reserved_20, u32::MAX);
        assert!(!bpb.reserved_fields_clear());

        let mut encoded = [0u8; SECTOR_SIZE];
        bpb.encode(&mut FieldWriter::new(&mut encoded));
        assert_eq!(encoded, sector);
    }

    #[test]
    fn zeroed_reserved_slots() {
        let sector = [0u8; SECTOR_SIZE];
        let bpb = BiosParameterBlock::decode(FieldReader::new(&sector));
        assert!(bpb.reserved_fields_clear());
    }
}
