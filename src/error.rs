/// Failure to decode a boot sector from raw bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("Malformed boot sector: expected exactly `512` bytes, got {0}.")]
    MalformedSector(usize),
}

/// A geometry query that has no meaningful answer for the decoded fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GeometryError {
    #[error("Sectors per cluster is `0`.")]
    ZeroSectorsPerCluster,
    #[error("Cluster #{0} is reserved. Data clusters start at `2`.")]
    ReservedCluster(u32),
    #[error("Geometry arithmetic overflowed.")]
    Overflow,
    #[error("Reserved and FAT sectors exceed the total sector count.")]
    DataRegionUnderflow,
    #[error("Negative cluster number: {0}.")]
    NegativeClusterNumber(i64),
    #[error("Clusters per record is `0`.")]
    ZeroClustersPerRecord,
}

/// Failure to fetch and decode a boot sector from a block device.
#[derive(Debug, thiserror::Error)]
pub enum ReadError<E> {
    #[error("Read failed at: {0:#x}.")]
    Device(u64, #[source] E),
    #[error("{0}")]
    Decode(#[from] DecodeError),
}
