use core::fmt;

use checked_num::CheckedU64;

use crate::{FAT12_CLUSTER_LIMIT, FAT16_CLUSTER_LIMIT, FIRST_DATA_CLUSTER, error::GeometryError};

use super::FatBootSector;

/// FAT variant, determined solely by the number of data clusters.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FatType {
    Fat12,
    Fat16,
    Fat32,
}

impl FatType {
    /// Classifies a volume by its cluster count. The thresholds are exclusive: a volume with
    /// exactly `4085` clusters is FAT16 and one with exactly `65525` clusters is FAT32.
    pub fn from_cluster_count(cluster_count: u32) -> FatType {
        if cluster_count < FAT12_CLUSTER_LIMIT {
            FatType::Fat12
        } else if cluster_count < FAT16_CLUSTER_LIMIT {
            FatType::Fat16
        } else {
            FatType::Fat32
        }
    }

    /// Width of a FAT entry in bits.
    pub fn bits(&self) -> u8 {
        match self {
            FatType::Fat12 => 12,
            FatType::Fat16 => 16,
            FatType::Fat32 => 32,
        }
    }
}

impl fmt::Display for FatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FAT{}", self.bits())
    }
}

impl FatBootSector {
    /// Sectors occupied by one FAT. FAT32 stores `0` in the 16-bit field and the real size in
    /// the 32-bit one.
    pub fn effective_fat_size(&self) -> u32 {
        match self.bpb.fat_size_16 {
            0 => self.fat_size_32,
            small => small as u32,
        }
    }

    /// Sector number of the first sector of the data region, or `0` if it does not fit in 32
    /// bits. Use [`Self::try_first_data_sector`] to tell the two apart.
    pub fn first_data_sector(&self) -> u32 {
        self.try_first_data_sector().unwrap_or_else(|err| {
            debug!("First data sector unavailable ({err}), falling back to 0");
            0
        })
    }

    /// Sector number of the first sector of the data region:
    /// `reserved_sector_count + fat_count * effective_fat_size`.
    pub fn try_first_data_sector(&self) -> Result<u32, GeometryError> {
        let sector = (CheckedU64::new(self.bpb.fat_count as u64) * self.effective_fat_size() as u64
            + self.bpb.common.reserved_sector_count as u64)
            .ok_or(GeometryError::Overflow)?;
        u32::try_from(sector).map_err(|_| GeometryError::Overflow)
    }

    /// Sector number of the first sector of `cluster`. Data clusters are numbered from `2`.
    pub fn first_sector_of_cluster(&self, cluster: u32) -> Result<u32, GeometryError> {
        if cluster < FIRST_DATA_CLUSTER {
            return Err(GeometryError::ReservedCluster(cluster));
        }

        let sector = (CheckedU64::new((cluster - FIRST_DATA_CLUSTER) as u64)
            * self.bpb.common.sectors_per_cluster as u64
            + self.try_first_data_sector()? as u64)
            .ok_or(GeometryError::Overflow)?;
        u32::try_from(sector).map_err(|_| GeometryError::Overflow)
    }

    /// Byte offset of the root directory from the start of the volume.
    ///
    /// Only meaningful on FAT32. FAT12/16 keep the root directory in a fixed region after the
    /// FATs instead of a cluster chain.
    pub fn root_directory_offset(&self) -> Result<u64, GeometryError> {
        let sector = self.first_sector_of_cluster(self.root_dir_first_cluster)?;
        Ok(sector as u64 * self.bpb.common.bytes_per_sector as u64)
    }

    /// Number of data clusters:
    /// `(total_sectors_32 - (reserved_sector_count + fat_count * fat_size_32)) / sectors_per_cluster`.
    pub fn cluster_count(&self) -> Result<u32, GeometryError> {
        let sectors_per_cluster = self.bpb.common.sectors_per_cluster;
        if sectors_per_cluster == 0 {
            return Err(GeometryError::ZeroSectorsPerCluster);
        }

        let metadata_sectors = (CheckedU64::new(self.bpb.fat_count as u64) * self.fat_size_32 as u64
            + self.bpb.common.reserved_sector_count as u64)
            .ok_or(GeometryError::Overflow)?;
        let data_sectors = (CheckedU64::new(self.bpb.total_sectors_32 as u64) - metadata_sectors)
            .ok_or(GeometryError::DataRegionUnderflow)?;

        // at most `u32::MAX`, since it never exceeds `total_sectors_32`
        Ok((data_sectors / sectors_per_cluster as u64) as u32)
    }

    /// The FAT variant of the volume, derived from [`Self::cluster_count`].
    pub fn fat_type(&self) -> Result<FatType, GeometryError> {
        self.cluster_count().map(FatType::from_cluster_count)
    }
}
