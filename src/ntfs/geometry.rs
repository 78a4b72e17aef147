use checked_num::CheckedU64;

use crate::error::GeometryError;

use super::NtfsBootSector;

impl NtfsBootSector {
    /// Size of a cluster in bytes.
    pub fn cluster_size(&self) -> u64 {
        self.bpb.common.bytes_per_cluster() as u64
    }

    /// Byte offset of the master file table from the start of the volume.
    pub fn mft_offset(&self) -> Result<u64, GeometryError> {
        self.cluster_offset(self.bpb.mft_cluster)
    }

    /// Byte offset of the master file table mirror from the start of the volume.
    pub fn mft_mirror_offset(&self) -> Result<u64, GeometryError> {
        self.cluster_offset(self.bpb.mft_mirror_cluster)
    }

    /// Size of a master file table record in bytes.
    pub fn mft_record_size(&self) -> Result<u64, GeometryError> {
        self.decode_size(self.bpb.clusters_per_mft_record)
    }

    /// Size of an index buffer in bytes.
    pub fn index_buffer_size(&self) -> Result<u64, GeometryError> {
        self.decode_size(self.bpb.clusters_per_index_buffer)
    }

    fn cluster_offset(&self, cluster: i64) -> Result<u64, GeometryError> {
        let cluster =
            u64::try_from(cluster).map_err(|_| GeometryError::NegativeClusterNumber(cluster))?;
        if self.bpb.common.sectors_per_cluster == 0 {
            return Err(GeometryError::ZeroSectorsPerCluster);
        }
        (CheckedU64::new(cluster) * self.cluster_size()).ok_or(GeometryError::Overflow)
    }

    // low byte, read as signed: clusters if positive, log2 of the byte size if negative
    fn decode_size(&self, encoded: u32) -> Result<u64, GeometryError> {
        match encoded as u8 as i8 {
            0 => Err(GeometryError::ZeroClustersPerRecord),
            clusters @ 1.. => {
                if self.bpb.common.sectors_per_cluster == 0 {
                    return Err(GeometryError::ZeroSectorsPerCluster);
                }
                Ok(clusters as u64 * self.cluster_size())
            }
            shift => 1u64
                .checked_shl(shift.unsigned_abs() as u32)
                .ok_or(GeometryError::Overflow),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ntfs::ntfs_sector;

    fn boot_sector() -> NtfsBootSector {
        NtfsBootSector::decode(&ntfs_sector()).unwrap()
    }

    #[test]
    fn mft_location() {
        let boot = boot_sector();
        assert_eq!(boot.cluster_size(), 4096);
        assert_eq!(boot.mft_offset(), Ok(786_432 * 4096));
        assert_eq!(boot.mft_mirror_offset(), Ok(2 * 4096));
    }

    #[test]
    fn negative_mft_cluster() {
        let mut boot = boot_sector();
        boot.bpb.mft_cluster = -1;
        assert_eq!(boot.mft_offset(), Err(GeometryError::NegativeClusterNumber(-1)));
    }

    #[test]
    fn mft_offset_overflow() {
        let mut boot = boot_sector();
        boot.bpb.mft_cluster = i64::MAX;
        assert_eq!(boot.mft_offset(), Err(GeometryError::Overflow));
    }

    #[test]
    fn zero_sectors_per_cluster() {
        let mut boot = boot_sector();
        boot.bpb.common.sectors_per_cluster = 0;
        assert_eq!(boot.mft_offset(), Err(GeometryError::ZeroSectorsPerCluster));
        assert_eq!(boot.index_buffer_size(), Err(GeometryError::ZeroSectorsPerCluster));
    }

    #[test]
    fn record_sizes() {
        let mut boot = boot_sector();
        // 0xF6 is -10: 1024 byte records
        assert_eq!(boot.mft_record_size(), Ok(1024));
        assert_eq!(boot.index_buffer_size(), Ok(4096));

        boot.bpb.clusters_per_mft_record = 2;
        assert_eq!(boot.mft_record_size(), Ok(8192));

        boot.bpb.clusters_per_index_buffer = 0;
        assert_eq!(boot.index_buffer_size(), Err(GeometryError::ZeroClustersPerRecord));

        // -128
        boot.bpb.clusters_per_mft_record = 0x80;
        assert_eq!(boot.mft_record_size(), Err(GeometryError::Overflow));
    }

    #[test]
    fn only_low_byte_is_significant() {
        let mut boot = boot_sector();
        boot.bpb.clusters_per_mft_record = 0xFFFF_FF00 | 0xF6;
        assert_eq!(boot.mft_record_size(), Ok(1024));
    }
}
