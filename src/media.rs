/// Legacy media type byte stored at offset `0x15` of every FAT and NTFS boot sector.
///
/// Media codes are informational only. Bytes outside the documented set are kept as
/// [`MediaDescriptor::Unknown`] so that decoding never fails on them.
///
/// Equality and hashing follow the encoded byte, so a hand-built `Unknown(0xF8)` equals
/// [`MediaDescriptor::FixedDisk`].
#[derive(Copy, Clone, Debug)]
pub enum MediaDescriptor {
    /// `0xF0`: 3.5" double sided, 80 tracks, 18 or 36 sectors; also used for other removable media.
    Removable,
    /// `0xF8`: fixed disk.
    FixedDisk,
    /// `0xF9`: 3.5" or 5.25" double sided, 80 tracks, 9 or 15 sectors.
    DoubleSided80Track,
    /// `0xFA`: 5.25" single sided, 80 tracks, 8 sectors; also RAM disks.
    SingleSided80Track8Sector,
    /// `0xFB`: 3.5" or 5.25" double sided, 80 tracks, 8 sectors.
    DoubleSided80Track8Sector,
    /// `0xFC`: 5.25" single sided, 40 tracks, 9 sectors.
    SingleSided40Track9Sector,
    /// `0xFD`: 5.25" double sided, 40 tracks, 9 sectors.
    DoubleSided40Track9Sector,
    /// `0xFE`: 5.25" single sided, 40 tracks, 8 sectors.
    SingleSided40Track8Sector,
    /// `0xFF`: 5.25" double sided, 40 tracks, 8 sectors.
    DoubleSided40Track8Sector,
    /// Any byte outside the documented set. Decoding never produces it for a documented code.
    Unknown(u8),
}

impl PartialEq for MediaDescriptor {
    fn eq(&self, other: &Self) -> bool {
        u8::from(*self) == u8::from(*other)
    }
}

impl Eq for MediaDescriptor {}

impl core::hash::Hash for MediaDescriptor {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        u8::from(*self).hash(state);
    }
}

impl MediaDescriptor {
    /// Whether the byte is one of the documented media codes.
    pub fn is_known(&self) -> bool {
        !matches!(MediaDescriptor::from(u8::from(*self)), MediaDescriptor::Unknown(_))
    }
}

impl From<u8> for MediaDescriptor {
    fn from(value: u8) -> Self {
        match value {
            0xF0 => Self::Removable,
            0xF8 => Self::FixedDisk,
            0xF9 => Self::DoubleSided80Track,
            0xFA => Self::SingleSided80Track8Sector,
            0xFB => Self::DoubleSided80Track8Sector,
            0xFC => Self::SingleSided40Track9Sector,
            0xFD => Self::DoubleSided40Track9Sector,
            0xFE => Self::SingleSided40Track8Sector,
            0xFF => Self::DoubleSided40Track8Sector,
            other => Self::Unknown(other),
        }
    }
}

impl From<MediaDescriptor> for u8 {
    fn from(value: MediaDescriptor) -> Self {
        match value {
            MediaDescriptor::Removable => 0xF0,
            MediaDescriptor::FixedDisk => 0xF8,
            MediaDescriptor::DoubleSided80Track => 0xF9,
            MediaDescriptor::SingleSided80Track8Sector => 0xFA,
            MediaDescriptor::DoubleSided80Track8Sector => 0xFB,
            MediaDescriptor::SingleSided40Track9Sector => 0xFC,
            MediaDescriptor::DoubleSided40Track9Sector => 0xFD,
            MediaDescriptor::SingleSided40Track8Sector => 0xFE,
            MediaDescriptor::DoubleSided40Track8Sector => 0xFF,
            MediaDescriptor::Unknown(other) => other,
        }
    }
}

#[test]
fn every_byte_survives_conversion() {
    for byte in 0..=u8::MAX {
        assert_eq!(u8::from(MediaDescriptor::from(byte)), byte);
    }
}

#[test]
fn documented_codes() {
    assert_eq!(MediaDescriptor::from(0xF8), MediaDescriptor::FixedDisk);
    assert!(MediaDescriptor::from(0xF0).is_known());
    assert!((0xF8..=0xFF).all(|b| MediaDescriptor::from(b).is_known()));
    assert_eq!(MediaDescriptor::from(0x00), MediaDescriptor::Unknown(0x00));
    assert!(!MediaDescriptor::from(0xF7).is_known());
}

#[test]
fn equality_follows_the_encoded_byte() {
    use std::collections::HashSet;

    assert_eq!(MediaDescriptor::Unknown(0xF8), MediaDescriptor::FixedDisk);
    assert!(MediaDescriptor::Unknown(0xF0).is_known());
    assert_ne!(MediaDescriptor::Unknown(0x01), MediaDescriptor::Unknown(0x02));

    let set: HashSet<_> = [MediaDescriptor::Unknown(0xF8), MediaDescriptor::FixedDisk].into();
    assert_eq!(set.len(), 1);
}
