//! # bootsector
//!
//! Decoding of FAT12/16/32 and NTFS boot sectors, and the FAT volume geometry derived from them.
//!
//! ## Usage
//!
//! ```rust
//! use bootsector::{FatBootSector, FatType, ReadOptionsBuilder};
//!
//! # let mut image = vec![0u8; 1024];
//! # image[0x0b..0x0e].copy_from_slice(&[0x00, 0x02, 0x04]);
//! # image[0x0e] = 32;
//! # image[0x10] = 2;
//! # image[0x20..0x24].copy_from_slice(&280_000u32.to_le_bytes());
//! # image[0x24..0x28].copy_from_slice(&8000u32.to_le_bytes());
//! # image[0x2c] = 2;
//! let options = ReadOptionsBuilder::default().offset(0).build().unwrap();
//! let boot_sector = FatBootSector::read_from(&image, &options).unwrap();
//!
//! assert_eq!(boot_sector.first_data_sector(), 16032);
//! assert_eq!(boot_sector.first_sector_of_cluster(5), Ok(16044));
//! assert_eq!(boot_sector.fat_type(), Ok(FatType::Fat32));
//! ```
//!
//! ## Limitations
//! Only the boot sector itself is interpreted. FAT chains, MFT records and directory entries are
//! not read.

#[macro_use]
extern crate log;

/// Fields shared by all families and the tagged boot sector
pub mod boot;
/// Block device access
pub mod disk;
pub mod error;
/// FAT12/16/32 boot sectors and geometry
pub mod fat;
pub mod media;
/// NTFS boot sectors
pub mod ntfs;
pub mod sector;
pub mod text;

pub use boot::{CommonParameters, FileSystemFamily, Header, JumpInstruction, sector::BootSector};
pub use disk::{BlockDevice, ReadOptions, ReadOptionsBuilder};
pub use error::{DecodeError, GeometryError, ReadError};
pub use fat::{FatBootSector, FatType};
pub use media::MediaDescriptor;
pub use ntfs::NtfsBootSector;
pub use sector::{SECTOR_SIZE, Sector};
pub use text::AsciiField;

/// First cluster number that maps to the data region. Clusters `0` and `1` are reserved.
pub const FIRST_DATA_CLUSTER: u32 = 2;
/// Volumes with fewer clusters than this are FAT12.
pub const FAT12_CLUSTER_LIMIT: u32 = 4085;
/// Volumes with fewer clusters than this (and at least [`FAT12_CLUSTER_LIMIT`]) are FAT16.
pub const FAT16_CLUSTER_LIMIT: u32 = 65525;
