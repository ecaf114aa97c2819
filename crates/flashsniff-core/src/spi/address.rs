//! Address width types

use crate::error::Error;

/// Number of address bytes following an opcode on the wire
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AddressWidth {
    /// 1-byte address
    OneByte,
    /// 2-byte address
    TwoByte,
    /// 3-byte (24-bit) address - supports up to 16 MiB
    #[default]
    ThreeByte,
    /// 4-byte (32-bit) address - supports up to 4 GiB
    FourByte,
}

impl AddressWidth {
    /// Returns the number of address bytes
    pub const fn bytes(&self) -> usize {
        match self {
            Self::OneByte => 1,
            Self::TwoByte => 2,
            Self::ThreeByte => 3,
            Self::FourByte => 4,
        }
    }

    /// Returns the number of hex digits used to print an address
    pub const fn hex_digits(&self) -> usize {
        2 * self.bytes()
    }

    /// Decode a big-endian address from the start of `buf`
    ///
    /// Returns `None` if `buf` is shorter than the address width.
    pub fn decode(&self, buf: &[u8]) -> Option<u32> {
        let bytes = buf.get(..self.bytes())?;
        Some(bytes.iter().fold(0u32, |addr, &b| (addr << 8) | u32::from(b)))
    }
}

impl TryFrom<u8> for AddressWidth {
    type Error = Error;

    fn try_from(bytes: u8) -> Result<Self, Self::Error> {
        match bytes {
            1 => Ok(Self::OneByte),
            2 => Ok(Self::TwoByte),
            3 => Ok(Self::ThreeByte),
            4 => Ok(Self::FourByte),
            n => Err(Error::InvalidAddressWidth(n)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_big_endian() {
        let buf = [0x00, 0x10, 0x00, 0x00, 0xAA];
        assert_eq!(AddressWidth::ThreeByte.decode(&buf), Some(0x001000));
        assert_eq!(AddressWidth::FourByte.decode(&buf), Some(0x00100000));
        assert_eq!(AddressWidth::OneByte.decode(&buf[4..]), Some(0xAA));
    }

    #[test]
    fn test_decode_short_buffer() {
        assert_eq!(AddressWidth::FourByte.decode(&[0x01, 0x02, 0x03]), None);
    }

    #[test]
    fn test_try_from() {
        assert_eq!(AddressWidth::try_from(4), Ok(AddressWidth::FourByte));
        assert_eq!(AddressWidth::try_from(0), Err(Error::InvalidAddressWidth(0)));
        assert_eq!(AddressWidth::try_from(5), Err(Error::InvalidAddressWidth(5)));
        assert_eq!(AddressWidth::default().hex_digits(), 6);
    }
}
