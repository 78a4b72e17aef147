//! FAT12/16/32 boot sectors and the volume geometry derived from them.

mod boot_sector;
mod bpb;
mod geometry;

pub use boot_sector::{ExtendedFlags, FatBootSector, FileSystemVersion};
pub use bpb::BiosParameterBlock;
pub use geometry::FatType;

#[cfg(test)]
pub(crate) use boot_sector::tests::fat32_sector;
