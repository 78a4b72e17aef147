use bytemuck::Pod;

use crate::error::DecodeError;

/// Size of a boot sector in bytes.
pub const SECTOR_SIZE: usize = 512;

/// Raw contents of a boot sector.
pub type Sector = [u8; SECTOR_SIZE];

/// Views `bytes` as a whole sector. Anything other than exactly [`SECTOR_SIZE`] bytes is rejected.
pub(crate) fn as_sector(bytes: &[u8]) -> Result<&Sector, DecodeError> {
    bytemuck::try_from_bytes::<Sector>(bytes).map_err(|_| DecodeError::MalformedSector(bytes.len()))
}

/// Reads little-endian fields from absolute offsets of a sector.
#[derive(Copy, Clone)]
pub(crate) struct FieldReader<'a>(&'a Sector);

impl<'a> FieldReader<'a> {
    pub(crate) fn new(sector: &'a Sector) -> Self {
        Self(sector)
    }

    pub(crate) fn pod<T: Pod>(&self, offset: usize) -> T {
        bytemuck::pod_read_unaligned(&self.0[offset..offset + size_of::<T>()])
    }

    pub(crate) fn bytes<const N: usize>(&self, offset: usize) -> [u8; N] {
        self.pod(offset)
    }

    pub(crate) fn u8(&self, offset: usize) -> u8 {
        self.0[offset]
    }

    pub(crate) fn u16(&self, offset: usize) -> u16 {
        u16::from_le_bytes(self.bytes(offset))
    }

    pub(crate) fn u32(&self, offset: usize) -> u32 {
        u32::from_le_bytes(self.bytes(offset))
    }

    pub(crate) fn u64(&self, offset: usize) -> u64 {
        u64::from_le_bytes(self.bytes(offset))
    }

    pub(crate) fn i64(&self, offset: usize) -> i64 {
        i64::from_le_bytes(self.bytes(offset))
    }
}

/// Writes little-endian fields to absolute offsets of a sector.
pub(crate) struct FieldWriter<'a>(&'a mut Sector);

impl<'a> FieldWriter<'a> {
    pub(crate) fn new(sector: &'a mut Sector) -> Self {
        Self(sector)
    }

    pub(crate) fn pod<T: Pod>(&mut self, offset: usize, value: &T) {
        let bytes = bytemuck::bytes_of(value);
        self.0[offset..offset + bytes.len()].copy_from_slice(bytes);
    }

    pub(crate) fn bytes(&mut self, offset: usize, value: &[u8]) {
        self.0[offset..offset + value.len()].copy_from_slice(value);
    }

    pub(crate) fn u8(&mut self, offset: usize, value: u8) {
        self.0[offset] = value;
    }

    pub(crate) fn u16(&mut self, offset: usize, value: u16) {
        self.bytes(offset, &value.to_le_bytes());
    }

    pub(crate) fn u32(&mut self, offset: usize, value: u32) {
        self.bytes(offset, &value.to_le_bytes());
    }

    pub(crate) fn u64(&mut self, offset: usize, value: u64) {
        self.bytes(offset, &value.to_le_bytes());
    }

    pub(crate) fn i64(&mut self, offset: usize, value: i64) {
        self.bytes(offset, &value.to_le_bytes());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_short_and_long_buffers() {
        assert_eq!(as_sector(&[0u8; 511]), Err(DecodeError::MalformedSector(511)));
        assert_eq!(as_sector(&[0u8; 513]), Err(DecodeError::MalformedSector(513)));
        assert_eq!(as_sector(&[]), Err(DecodeError::MalformedSector(0)));
        assert!(as_sector(&[0u8; SECTOR_SIZE]).is_ok());
    }

    #[test]
    fn fields_are_little_endian() {
        let mut sector = [0u8; SECTOR_SIZE];
        sector[0x0b..0x0d].copy_from_slice(&[0x00, 0x02]);
        sector[0x30..0x38].copy_from_slice(&[0xff; 8]);
        let reader = FieldReader::new(&sector);
        assert_eq!(reader.u16(0x0b), 512);
        assert_eq!(reader.i64(0x30), -1);
        assert_eq!(reader.u64(0x30), u64::MAX);
    }

    #[test]
    fn writer_places_bytes_at_offset() {
        let mut sector = [0u8; SECTOR_SIZE];
        let mut writer = FieldWriter::new(&mut sector);
        writer.u32(0x1c, 0x0403_0201);
        writer.u8(0x15, 0xf8);
        assert_eq!(sector[0x1c..0x20], [1, 2, 3, 4]);
        assert_eq!(sector[0x15], 0xf8);
    }
}
