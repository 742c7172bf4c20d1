//! A square bitboard whose side length is chosen at runtime.
//!
//! Boards are represented as an `size×size` grid packed into an unsigned
//! integer `T`. The side length is checked against the capacity of `T` when
//! the board is created, so every later access only has to check bounds.

use core::ops::{BitOr, Not};
use core::{fmt, mem};
use num_traits::{PrimInt, Unsigned, Zero};
use thiserror::Error;

/// Errors returned by bitboard operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BitBoardError {
    /// Requested board size N*N exceeds capacity of `T::BITS`.
    #[error("SizeTooLarge: {n}x{n} board exceeds T::BITS={capacity}")]
    SizeTooLarge { n: usize, capacity: usize },
    /// Row or column index is out of bounds [0..N).
    #[error("IndexOutOfBounds: row={row}, col={col}")]
    IndexOutOfBounds { row: usize, col: usize },
}

/// An `size×size` bitboard stored in the unsigned integer `T`.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct BitBoard<T>
where
    T: PrimInt + Unsigned + Zero,
{
    bits: T,
    size: usize,
}

impl<T> BitBoard<T>
where
    T: PrimInt + Unsigned + Zero,
{
    #[inline]
    fn capacity() -> usize {
        mem::size_of::<T>() * 8
    }

    #[inline]
    fn mask(size: usize) -> T {
        let cells = size * size;
        if cells == Self::capacity() {
            !T::zero()
        } else {
            (T::one() << cells) - T::one()
        }
    }

    /// Create an empty bitboard without a size check. The caller guarantees
    /// that `size * size` fits in `T`; see [`try_new`](Self::try_new).
    #[inline]
    pub fn new(size: usize) -> Self {
        debug_assert!(size * size <= Self::capacity());
        BitBoard {
            bits: T::zero(),
            size,
        }
    }

    /// Create an empty bitboard, failing with `SizeTooLarge` if
    /// `size * size` does not fit in `T`.
    pub fn try_new(size: usize) -> Result<Self, BitBoardError> {
        let capacity = Self::capacity();
        if size * size > capacity {
            Err(BitBoardError::SizeTooLarge { n: size, capacity })
        } else {
            Ok(BitBoard {
                bits: T::zero(),
                size,
            })
        }
    }

    /// Side length of the board.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the number of set bits (occupied cells).
    pub fn count_ones(&self) -> usize {
        self.bits.count_ones() as usize
    }

    /// Returns true if no bits are set.
    pub fn is_empty(&self) -> bool {
        self.bits.is_zero()
    }

    /// Gets the bit at (row, col).
    pub fn get(&self, row: usize, col: usize) -> Result<bool, BitBoardError> {
        let idx = self.index(row, col)?;
        Ok(((self.bits >> idx) & T::one()) != T::zero())
    }

    /// Like [`get`](Self::get), but out-of-bounds cells read as unset.
    #[inline]
    pub fn contains(&self, row: usize, col: usize) -> bool {
        self.get(row, col).unwrap_or(false)
    }

    /// Sets the bit at (row, col) to 1.
    pub fn set(&mut self, row: usize, col: usize) -> Result<(), BitBoardError> {
        let idx = self.index(row, col)?;
        self.bits = self.bits | (T::one() << idx);
        Ok(())
    }

    /// Clears the bit at (row, col) to 0.
    pub fn clear(&mut self, row: usize, col: usize) -> Result<(), BitBoardError> {
        let idx = self.index(row, col)?;
        self.bits = self.bits & !(T::one() << idx);
        Ok(())
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> Result<usize, BitBoardError> {
        if row >= self.size || col >= self.size {
            Err(BitBoardError::IndexOutOfBounds { row, col })
        } else {
            Ok(row * self.size + col)
        }
    }

    /// Iterator over the set bits of the board, in row-major order.
    #[inline]
    pub fn iter_set_bits(&self) -> SetBits<'_, T> {
        SetBits {
            board: self,
            idx: 0,
        }
    }

    #[inline]
    fn with_bits(self, bits: T) -> Self {
        BitBoard {
            bits: bits & Self::mask(self.size),
            size: self.size,
        }
    }
}

impl<T> fmt::Debug for BitBoard<T>
where
    T: PrimInt + Unsigned + Zero,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "BitBoard<{}x{}>:", self.size, self.size)?;
        for r in 0..self.size {
            for c in 0..self.size {
                let bit = if self.contains(r, c) { '■' } else { '□' };
                write!(f, "{} ", bit)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Iterator over the set bits of a bitboard.
#[derive(Clone, Copy)]
pub struct SetBits<'a, T>
where
    T: PrimInt + Unsigned + Zero,
{
    board: &'a BitBoard<T>,
    idx: usize,
}

impl<'a, T> Iterator for SetBits<'a, T>
where
    T: PrimInt + Unsigned + Zero,
{
    type Item = (usize, usize);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let n = self.board.size;
        while self.idx < n * n {
            let idx = self.idx;
            self.idx += 1;
            if ((self.board.bits >> idx) & T::one()) != T::zero() {
                return Some((idx / n, idx % n));
            }
        }
        None
    }
}

/// Bitwise OR for combining two bitboards of the same size.
impl<T> BitOr for BitBoard<T>
where
    T: PrimInt + Unsigned + Zero,
{
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        debug_assert_eq!(self.size, rhs.size);
        self.with_bits(self.bits | rhs.bits)
    }
}

/// Bitwise NOT for inverting a bitboard (within board bounds).
impl<T> Not for BitBoard<T>
where
    T: PrimInt + Unsigned + Zero,
{
    type Output = Self;
    #[inline]
    fn not(self) -> Self {
        self.with_bits(!self.bits)
    }
}
