use bitflags::bitflags;
use bytemuck::{Pod, Zeroable};

use crate::{
    boot::Header,
    disk::{self, BlockDevice, ReadOptions},
    error::{DecodeError, ReadError},
    sector::{self, FieldReader, FieldWriter, SECTOR_SIZE, Sector},
    text::AsciiField,
};

use super::BiosParameterBlock;

mod offset {
    pub(super) const FAT_SIZE_32: usize = 0x24;
    pub(super) const EXTENDED_FLAGS: usize = 0x28;
    pub(super) const FILE_SYSTEM_VERSION: usize = 0x2a;
    pub(super) const ROOT_DIR_FIRST_CLUSTER: usize = 0x2c;
    pub(super) const FS_INFO_SECTOR: usize = 0x30;
    pub(super) const BACKUP_BOOT_SECTOR: usize = 0x32;
    pub(super) const RESERVED: usize = 0x34;
    pub(super) const DRIVE_NUMBER: usize = 0x40;
    pub(super) const RESERVED1: usize = 0x41;
    pub(super) const EXTENDED_BOOT_SIGNATURE: usize = 0x42;
    pub(super) const VOLUME_ID: usize = 0x43;
    pub(super) const VOLUME_LABEL: usize = 0x47;
    pub(super) const FILE_SYSTEM_TYPE: usize = 0x52;
}

/// The boot sector of a FAT12/16/32 volume.
///
/// Everything from offset `0x24` onwards is laid out as the FAT32 extended BIOS parameter block.
/// FAT12/16 volumes store other data there, so those fields are only meaningful when the
/// volume turns out to be FAT32 (see [`FatBootSector::fat_type`]).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct FatBootSector {
    /// Jump instruction and OEM name.
    pub header: Header,

    /// The BIOS parameter block shared by all FAT variants.
    pub bpb: BiosParameterBlock,

    /// Sectors occupied by one FAT on FAT32.
    pub fat_size_32: u32,

    /// FAT mirroring configuration. See [`ExtendedFlags`].
    pub extended_flags: ExtendedFlags,

    /// Version of the FAT32 structures.
    /// - Must be `0.0` for current implementations to mount the volume.
    pub file_system_version: FileSystemVersion,

    /// The cluster index of the first cluster of the root directory.
    /// - Usually `2`.
    pub root_dir_first_cluster: u32,

    /// Sector number of the FSINFO structure within the reserved area.
    /// - Usually `1`.
    pub fs_info_sector: u16,

    /// Sector number of the backup boot sector within the reserved area.
    /// - Usually `6`, `0` if there is no backup.
    pub backup_boot_sector: u16,

    /// Reserved for future expansion. Should be all zeroes.
    pub reserved: [u8; 12],

    /// INT 13h drive number.
    /// - `0x80` for hard disks, `0x00` for floppies.
    pub drive_number: u8,

    /// Reserved. Used by Windows NT to store dirty flags.
    pub reserved1: u8,

    /// Extended boot signature.
    /// - `0x29` indicates that the following three fields are present.
    pub extended_boot_signature: u8,

    /// Volume serial number, usually derived from the format date and time.
    pub volume_id: u32,

    /// Volume label, matching the label stored in the root directory.
    /// - `"NO NAME    "` if there is none.
    pub volume_label: AsciiField<11>,

    /// Informational file system type.
    /// - Typically `"FAT32   "`. Must not be used to determine the FAT type.
    pub file_system_type: AsciiField<8>,
}

impl FatBootSector {
    /// Decodes a FAT boot sector. `bytes` must be exactly one 512-byte sector.
    pub fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        let sector = sector::as_sector(bytes)?;
        let fields = FieldReader::new(sector);
        let boot_sector = Self {
            header: Header::decode(fields),
            bpb: BiosParameterBlock::decode(fields),
            fat_size_32: fields.u32(offset::FAT_SIZE_32),
            extended_flags: ExtendedFlags::from_bits_retain(fields.u16(offset::EXTENDED_FLAGS)),
            file_system_version: fields.pod(offset::FILE_SYSTEM_VERSION),
            root_dir_first_cluster: fields.u32(offset::ROOT_DIR_FIRST_CLUSTER),
            fs_info_sector: fields.u16(offset::FS_INFO_SECTOR),
            backup_boot_sector: fields.u16(offset::BACKUP_BOOT_SECTOR),
            reserved: fields.bytes(offset::RESERVED),
            drive_number: fields.u8(offset::DRIVE_NUMBER),
            reserved1: fields.u8(offset::RESERVED1),
            extended_boot_signature: fields.u8(offset::EXTENDED_BOOT_SIGNATURE),
            volume_id: fields.u32(offset::VOLUME_ID),
            volume_label: AsciiField::new(fields.bytes(offset::VOLUME_LABEL)),
            file_system_type: AsciiField::new(fields.bytes(offset::FILE_SYSTEM_TYPE)),
        };
        trace!(
            "Decoded FAT boot sector: OEM {:?}, {} bytes per sector",
            boot_sector.header.oem_name,
            boot_sector.bpb.common.bytes_per_sector
        );
        Ok(boot_sector)
    }

    /// Encodes every decoded field at its offset. Bytes not covered by a field (boot code,
    /// signature) are left zero.
    pub fn to_bytes(&self) -> Sector {
        let mut sector = [0u8; SECTOR_SIZE];
        let mut fields = FieldWriter::new(&mut sector);
        self.header.encode(&mut fields);
        self.bpb.encode(&mut fields);
        fields.u32(offset::FAT_SIZE_32, self.fat_size_32);
        fields.u16(offset::EXTENDED_FLAGS, self.extended_flags.bits());
        fields.pod(offset::FILE_SYSTEM_VERSION, &self.file_system_version);
        fields.u32(offset::ROOT_DIR_FIRST_CLUSTER, self.root_dir_first_cluster);
        fields.u16(offset::FS_INFO_SECTOR, self.fs_info_sector);
        fields.u16(offset::BACKUP_BOOT_SECTOR, self.backup_boot_sector);
        fields.bytes(offset::RESERVED, &self.reserved);
        fields.u8(offset::DRIVE_NUMBER, self.drive_number);
        fields.u8(offset::RESERVED1, self.reserved1);
        fields.u8(offset::EXTENDED_BOOT_SIGNATURE, self.extended_boot_signature);
        fields.u32(offset::VOLUME_ID, self.volume_id);
        fields.bytes(offset::VOLUME_LABEL, self.volume_label.bytes());
        fields.bytes(offset::FILE_SYSTEM_TYPE, self.file_system_type.bytes());
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

bitflags! {
    /// FAT32 extended flags at offset `0x28`.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ExtendedFlags: u16 {
        /// Only the FAT selected by the active FAT bits is in use. When clear, all FATs are
        /// mirrored at runtime.
        const MIRRORING_DISABLED = 1 << 7;
        // bits 0-3 hold the zero-based active FAT, the rest are reserved
        const _ = !0;
    }
}

impl ExtendedFlags {
    const ACTIVE_FAT_MASK: u16 = 0x000f;

    /// Zero-based index of the active FAT. Only valid if mirroring is disabled.
    pub fn active_fat(&self) -> u8 {
        (self.bits() & Self::ACTIVE_FAT_MASK) as u8
    }

    /// Whether all FATs are kept in sync.
    pub fn is_mirrored(&self) -> bool {
        !self.contains(ExtendedFlags::MIRRORING_DISABLED)
    }
}

/// Revision of the FAT32 structures.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
pub struct FileSystemVersion {
    /// Minor revision number (low-order byte).
    pub minor: u8,
    /// Major revision number (high-order byte).
    pub major: u8,
}

#[cfg(test)]
pub(crate) mod tests {
    use hex_literal::hex;

    use super::*;
    use crate::{boot::JumpInstruction, media::MediaDescriptor};

    /// Boot sector of a 1GiB FAT32 volume as written by `mkfs.fat`.
    pub(crate) fn fat32_sector() -> Sector {
        let mut sector = [0u8; SECTOR_SIZE];
        sector[..0x5a].copy_from_slice(&hex!(
            "EB 58 90 6D 6B 66 73 2E 66 61 74 00 02 08 20 00"
            "02 00 00 00 00 F8 00 00 3F 00 FF 00 00 08 00 00"
            "00 00 20 00 FC 07 00 00 00 00 00 00 02 00 00 00"
            "01 00 06 00 00 00 00 00 00 00 00 00 00 00 00 00"
            "80 00 29 EF BE AD DE 4E 4F 20 4E 41 4D 45 20 20"
            "20 20 46 41 54 33 32 20 20 20"
        ));
        sector[0x1fe..].copy_from_slice(&hex!("55 AA"));
        sector
    }

    #[test]
    fn decode_fat32() {
        let boot = FatBootSector::decode(&fat32_sector()).unwrap();

        assert_eq!(boot.header.jump_boot, JumpInstruction([0xEB, 0x58, 0x90]));
        assert_eq!(boot.header.oem_name.text(), "mkfs.fat");
        assert_eq!(boot.bpb.common.bytes_per_sector, 512);
        assert_eq!(boot.bpb.common.sectors_per_cluster, 8);
        assert_eq!(boot.bpb.common.reserved_sector_count, 32);
        assert_eq!(boot.bpb.fat_count, 2);
        assert_eq!(boot.bpb.max_root_dir_entries, 0);
        assert_eq!(boot.bpb.total_sectors_16, 0);
        assert_eq!(boot.bpb.common.media_descriptor, MediaDescriptor::FixedDisk);
        assert_eq!(boot.bpb.fat_size_16, 0);
        assert_eq!(boot.bpb.common.hidden_sectors, 2048);
        assert_eq!(boot.bpb.total_sectors_32, 2_097_152);
        assert_eq!(boot.fat_size_32, 2044);
        assert!(boot.extended_flags.is_mirrored());
        assert_eq!(boot.file_system_version, FileSystemVersion::default());
        assert_eq!(boot.root_dir_first_cluster, 2);
        assert_eq!(boot.fs_info_sector, 1);
        assert_eq!(boot.backup_boot_sector, 6);
        assert_eq!(boot.reserved, [0; 12]);
        assert_eq!(boot.drive_number, 0x80);
        assert_eq!(boot.extended_boot_signature, 0x29);
        assert_eq!(boot.volume_id, 0xDEADBEEF);
        assert_eq!(boot.volume_label.text(), "NO NAME");
        assert_eq!(boot.file_system_type.text(), "FAT32");
    }

    #[test]
    fn decode_rejects_wrong_length() {
        let sector = fat32_sector();
        assert_eq!(
            FatBootSector::decode(&sector[..511]),
            Err(DecodeError::MalformedSector(511))
        );

        let mut long = sector.to_vec();
        long.push(0);
        assert_eq!(
            FatBootSector::decode(&long),
            Err(DecodeError::MalformedSector(513))
        );
    }

    #[test]
    fn decode_does_not_reject_unknown_media() {
        let mut sector = fat32_sector();
        sector[0x15] = 0x00;
        let boot = FatBootSector::decode(&sector).unwrap();
        assert_eq!(boot.bpb.common.media_descriptor, MediaDescriptor::Unknown(0));
        assert_eq!(boot.to_bytes()[0x15], 0x00);
    }

    #[test]
    fn oem_name_is_trimmed() {
        let mut sector = fat32_sector();
        sector[0x03..0x0b].copy_from_slice(b"MSDOS5  ");
        let boot = FatBootSector::decode(&sector).unwrap();
        assert_eq!(boot.header.oem_name.text(), "MSDOS5");
        assert_eq!(boot.header.oem_name.bytes(), b"MSDOS5  ");
    }

    #[test]
    fn encode_restores_decoded_fields() {
        let sector = fat32_sector();
        let encoded = FatBootSector::decode(&sector).unwrap().to_bytes();
        // the end of sector signature is not a decoded field
        assert_eq!(encoded[..0x5a], sector[..0x5a]);
        assert!(encoded[0x5a..].iter().all(|&b| b == 0));
    }

    #[test]
    fn encode_restores_arbitrary_bytes() {
        let mut sector = [0u8; SECTOR_SIZE];
        for (i, b) in sector.iter_mut().enumerate() {
            *b = (i as u8).wrapping_mul(31).wrapping_add(7);
        }
        let encoded = FatBootSector::decode(&sector).unwrap().to_bytes();
        assert_eq!(encoded[..0x5a], sector[..0x5a]);
    }

    #[test]
    fn extended_flags() {
        let flags = ExtendedFlags::from_bits_retain(0x0081);
        assert!(!flags.is_mirrored());
        assert_eq!(flags.active_fat(), 1);
        // reserved bits are kept
        assert_eq!(ExtendedFlags::from_bits_retain(0xff00).bits(), 0xff00);
    }

    #[test]
    fn read_from_device() {
        let mut disk = vec![0u8; 4 * SECTOR_SIZE];
        disk[2 * SECTOR_SIZE..3 * SECTOR_SIZE].copy_from_slice(&fat32_sector());

        let options = crate::ReadOptionsBuilder::default()
            .offset(2 * SECTOR_SIZE as u64)
            .build()
            .unwrap();
        let boot = FatBootSector::read_from(&disk, &options).unwrap();
        assert_eq!(boot.volume_id, 0xDEADBEEF);

        let options = crate::ReadOptionsBuilder::default()
            .offset(4 * SECTOR_SIZE as u64)
            .build()
            .unwrap();
        assert!(matches!(
            FatBootSector::read_from(&disk, &options),
            Err(ReadError::Device(offset, _)) if offset == 4 * SECTOR_SIZE as u64
        ));
    }
}
