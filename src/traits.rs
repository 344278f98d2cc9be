//! # Traits
//!
//! Element types that can be written into a VTK `DataArray`, either inline as
//! ascii text or as raw little endian bytes that are then base64 encoded.

/// A value that can be stored in a VTK data array.
pub trait Numeric: Copy {
    /// the VTK name of the type, as used in the `type` attribute
    const VTK_TYPE: &'static str;

    /// size of one element in bytes
    const SIZE: usize;

    /// append the little endian bytes of this value
    fn extend_le_bytes(self, bytes: &mut Vec<u8>);

    /// append the ascii form of this value
    fn push_ascii(self, text: &mut String);
}

impl Numeric for f32 {
    const VTK_TYPE: &'static str = "Float32";
    const SIZE: usize = 4;

    fn extend_le_bytes(self, bytes: &mut Vec<u8>) {
        bytes.extend_from_slice(&self.to_le_bytes());
    }

    fn push_ascii(self, text: &mut String) {
        let mut buffer = ryu::Buffer::new();
        text.push_str(buffer.format(self));
    }
}

impl Numeric for f64 {
    const VTK_TYPE: &'static str = "Float64";
    const SIZE: usize = 8;

    fn extend_le_bytes(self, bytes: &mut Vec<u8>) {
        bytes.extend_from_slice(&self.to_le_bytes());
    }

    fn push_ascii(self, text: &mut String) {
        let mut buffer = ryu::Buffer::new();
        text.push_str(buffer.format(self));
    }
}

impl Numeric for i64 {
    const VTK_TYPE: &'static str = "Int64";
    const SIZE: usize = 8;

    fn extend_le_bytes(self, bytes: &mut Vec<u8>) {
        bytes.extend_from_slice(&self.to_le_bytes());
    }

    fn push_ascii(self, text: &mut String) {
        text.push_str(&self.to_string());
    }
}

impl Numeric for u8 {
    const VTK_TYPE: &'static str = "UInt8";
    const SIZE: usize = 1;

    fn extend_le_bytes(self, bytes: &mut Vec<u8>) {
        bytes.push(self);
    }

    fn push_ascii(self, text: &mut String) {
        text.push_str(&self.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_forms() {
        let mut text = String::new();
        1.5_f32.push_ascii(&mut text);
        text.push(' ');
        (-2_i64).push_ascii(&mut text);
        text.push(' ');
        5_u8.push_ascii(&mut text);
        assert_eq!(text, "1.5 -2 5");
    }

    #[test]
    fn byte_sizes() {
        let mut bytes = Vec::new();
        1.0_f64.extend_le_bytes(&mut bytes);
        1.0_f32.extend_le_bytes(&mut bytes);
        assert_eq!(bytes.len(), f64::SIZE + f32::SIZE);
        assert_eq!(&bytes[..8], &1.0_f64.to_le_bytes());
    }
}
