/// A trait for working with integers as big-endian byte arrays. Automatically
/// implemented for the built-in unsigned integers.
pub trait BeBytes: Sized {
    /// Write the memory representation of `self` as a byte array in
    /// big-endian (network) byte order into the provided buffer.
    fn to_be_bytes(self, buf: &mut [u8]) -> Option<usize>;
}

macro_rules! impl_be_bytes {
    ($($num:ty)*) => {
        $(
            impl BeBytes for $num {
                fn to_be_bytes(self, buf: &mut [u8]) -> Option<usize> {
                    let len = core::mem::size_of::<$num>();
                    let buf = buf.get_mut(..len)?;
                    buf.copy_from_slice(&<$num>::to_be_bytes(self));
                    Some(len)
                }
            }
        )*
    };
}

impl_be_bytes!(u8 u16 u32 u64 u128 usize);
