use core::fmt;

/// A fixed-width text field of a boot sector, such as the OEM name or the volume label.
///
/// The raw bytes are kept as found on disk. [`AsciiField::text`] interprets them as ASCII,
/// substituting `?` for bytes above `0x7F`, and strips space and NUL padding from both ends.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct AsciiField<const N: usize>([u8; N]);

impl<const N: usize> AsciiField<N> {
    pub const fn new(bytes: [u8; N]) -> Self {
        Self(bytes)
    }

    /// The untrimmed bytes of the field.
    pub fn bytes(&self) -> &[u8; N] {
        &self.0
    }

    /// The trimmed ASCII interpretation of the field.
    pub fn text(&self) -> String {
        let text: String = self
            .0
            .iter()
            .map(|&b| if b.is_ascii() { b as char } else { '?' })
            .collect();
        text.trim_matches(|c: char| c == '\0' || c.is_ascii_whitespace())
            .to_string()
    }
}

impl<const N: usize> Default for AsciiField<N> {
    fn default() -> Self {
        Self([b' '; N])
    }
}

impl<const N: usize> From<[u8; N]> for AsciiField<N> {
    fn from(bytes: [u8; N]) -> Self {
        Self(bytes)
    }
}

impl<const N: usize> fmt::Display for AsciiField<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}

impl<const N: usize> fmt::Debug for AsciiField<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AsciiField").field(&self.text()).finish()
    }
}
