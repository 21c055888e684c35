use byteorder::{ByteOrder, LittleEndian};

/// A flat, little-endian byte buffer holding the native encoding of an operand's elements.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct TestBuffer {
    bytes: Vec<u8>,
}

impl TestBuffer {
    pub fn new() -> TestBuffer {
        TestBuffer::default()
    }

    pub fn from_bytes(bytes: Vec<u8>) -> TestBuffer {
        TestBuffer { bytes }
    }

    pub fn from_i8(values: &[i8]) -> TestBuffer {
        TestBuffer::from_bytes(values.iter().map(|&v| v as u8).collect())
    }

    pub fn from_u8(values: &[u8]) -> TestBuffer {
        TestBuffer::from_bytes(values.to_vec())
    }

    pub fn from_bool8(values: &[bool]) -> TestBuffer {
        TestBuffer::from_bytes(values.iter().map(|&v| v as u8).collect())
    }

    pub fn from_u16(values: &[u16]) -> TestBuffer {
        let mut bytes = vec![0u8; values.len() * 2];
        LittleEndian::write_u16_into(values, &mut bytes);
        TestBuffer::from_bytes(bytes)
    }

    pub fn from_i16(values: &[i16]) -> TestBuffer {
        let mut bytes = vec![0u8; values.len() * 2];
        LittleEndian::write_i16_into(values, &mut bytes);
        TestBuffer::from_bytes(bytes)
    }

    pub fn from_i32(values: &[i32]) -> TestBuffer {
        let mut bytes = vec![0u8; values.len() * 4];
        LittleEndian::write_i32_into(values, &mut bytes);
        TestBuffer::from_bytes(bytes)
    }

    pub fn from_f32(values: &[f32]) -> TestBuffer {
        let mut bytes = vec![0u8; values.len() * 4];
        LittleEndian::write_f32_into(values, &mut bytes);
        TestBuffer::from_bytes(bytes)
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn to_i8(&self) -> Vec<i8> {
        self.bytes.iter().map(|&b| b as i8).collect()
    }

    pub fn to_u8(&self) -> Vec<u8> {
        self.bytes.clone()
    }

    pub fn to_bool8(&self) -> Vec<bool> {
        self.bytes.iter().map(|&b| b != 0).collect()
    }

    // Trailing bytes that do not form a whole element are ignored by the wide decoders.

    pub fn to_u16(&self) -> Vec<u16> {
        let mut values = vec![0u16; self.bytes.len() / 2];
        LittleEndian::read_u16_into(&self.bytes[..values.len() * 2], &mut values);
        values
    }

    pub fn to_i16(&self) -> Vec<i16> {
        let mut values = vec![0i16; self.bytes.len() / 2];
        LittleEndian::read_i16_into(&self.bytes[..values.len() * 2], &mut values);
        values
    }

    pub fn to_i32(&self) -> Vec<i32> {
        let mut values = vec![0i32; self.bytes.len() / 4];
        LittleEndian::read_i32_into(&self.bytes[..values.len() * 4], &mut values);
        values
    }

    pub fn to_f32(&self) -> Vec<f32> {
        let mut values = vec![0f32; self.bytes.len() / 4];
        LittleEndian::read_f32_into(&self.bytes[..values.len() * 4], &mut values);
        values
    }
}
