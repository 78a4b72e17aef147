//! NTFS boot sectors and the locations of the master file table.

mod boot_sector;
mod bpb;
mod geometry;

pub use boot_sector::NtfsBootSector;
pub use bpb::BiosParameterBlock;

#[cfg(test)]
pub(crate) use boot_sector::tests::ntfs_sector;
