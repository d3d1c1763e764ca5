/// A trait for working with integers as little-endian byte arrays.
/// Automatically implemented for the built-in unsigned integers.
pub trait LeBytes: Sized {
    /// Write the memory representation of `self` as a byte array in
    /// little-endian byte order into the provided buffer.
    ///
    /// Returns the number of bytes written, or `None` if `buf` is too small.
    fn to_le_bytes(self, buf: &mut [u8]) -> Option<usize>;

    /// Parse `self` from a byte array in little-endian byte order.
    ///
    /// Returns `None` unless `buf` is exactly `size_of::<Self>()` bytes long.
    fn from_le_bytes(buf: &[u8]) -> Option<Self>;
}

macro_rules! impl_le_bytes {
    ($($num:ty)*) => {
        $(
            impl LeBytes for $num {
                fn to_le_bytes(self, buf: &mut [u8]) -> Option<usize> {
                    let len = core::mem::size_of::<$num>();
                    let buf = buf.get_mut(..len)?;
                    buf.copy_from_slice(&<$num>::to_le_bytes(self));
                    Some(len)
                }

                fn from_le_bytes(buf: &[u8]) -> Option<Self> {
                    use core::convert::TryInto;
                    Some(<$num>::from_le_bytes(buf.try_into().ok()?))
                }
            }
        )*
    };
}

impl_le_bytes!(u8 u16 u32 u64 u128 usize);
