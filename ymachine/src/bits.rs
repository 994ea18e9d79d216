use typenum::Unsigned;

use std::marker::PhantomData;
use std::ops::{BitAnd, Shl, Shr};

/// A 24-bit instruction word. Byte 0 of a buffer is the high byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YWord(u32);

impl From<[u8; 3]> for YWord {
    fn from(v: [u8; 3]) -> YWord {
        let [hi, mid, lo] = v;
        YWord((hi as u32) << 16 | (mid as u32) << 8 | lo as u32)
    }
}

impl From<YWord> for [u8; 3] {
    fn from(v: YWord) -> [u8; 3] {
        [(v.0 >> 16) as u8, (v.0 >> 8) as u8, v.0 as u8]
    }
}

impl From<u32> for YWord {
    fn from(v: u32) -> YWord {
        YWord(v & 0x00ff_ffff)
    }
}

impl From<YWord> for u32 {
    fn from(v: YWord) -> u32 {
        v.0
    }
}

pub trait To<N> {
    fn to() -> N;
}

macro_rules! impl_to {
    ($n:ty, $c:ident) => {
        impl<T: Unsigned> To<$n> for T {
            fn to() -> $n {
                T::$c
            }
        }
    }
}

impl_to!(u32, U32);

macro_rules! bitstruct {
    ($($name:ident: $numtype:ty {
        $($field:ident: $type:ident, Width = $W:ident, Offset = $O:ident),+
    }),+) => {
        use typenum::*;
        use crate::bits::BitField;
        $(
            $(
                type $type = BitField<$numtype, $W, $O, op!(((U1 << $W) - U1) << $O)>;
            )+

            #[derive(Debug)]
            pub struct $name {
                $(pub $field: $type),+
            }

            impl $name {
                pub fn new(val: $numtype) -> $name {
                    $name {
                        $($field: $type::new(val)),+
                    }
                }
            }
        )+
    };
}

/// One field of a packed word: `W` bits wide, starting `O` bits up, under
/// mask `M`.
#[derive(Debug)]
pub struct BitField<N, W: Unsigned, O: Unsigned, M: Unsigned> {
    val: N,
    _width: PhantomData<W>,
    _offset: PhantomData<O>,
    _mask: PhantomData<M>,
}

impl<N, W: Unsigned, O: Unsigned, M: Unsigned> BitField<N, W, O, M>
where
    N: BitAnd<Output = N> + Shr<Output = N> + Shl<Output = N> + Copy,
    O: To<N>,
    M: To<N> {
    pub fn new(val: N) -> BitField<N, W, O, M> {
        BitField {
            val,
            _width: PhantomData,
            _offset: PhantomData,
            _mask: PhantomData,
        }
    }

    pub fn value_of(&self) -> N {
        (self.val & M::to()) >> O::to()
    }

    /// Shifts `field` into this field's position. Bits outside the mask are
    /// dropped.
    pub fn pack(field: N) -> N {
        (field << O::to()) & M::to()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_byte_order() {
        let word = YWord::from([0x12, 0x34, 0x56]);
        assert_eq!(u32::from(word), 0x0012_3456);
        assert_eq!(<[u8; 3]>::from(word), [0x12, 0x34, 0x56]);
    }

    #[test]
    fn word_drops_high_byte() {
        let word = YWord::from(0xff12_3456);
        assert_eq!(u32::from(word), 0x0012_3456);
    }

    #[test]
    fn field_extract_and_pack() {
        use typenum::{U1, U8, U16};
        type Mid = BitField<u32, U8, U8, op!(((U1 << U8) - U1) << U8)>;
        type High = BitField<u32, U8, U16, op!(((U1 << U8) - U1) << U16)>;

        assert_eq!(Mid::new(0x00ab_cdef).value_of(), 0xcd);
        assert_eq!(High::new(0x00ab_cdef).value_of(), 0xab);
        assert_eq!(Mid::pack(0x1ff), 0xff00);
    }
}
