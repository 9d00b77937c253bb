//! # Enums Module — *Style and Element-Type Tags*

use std::fmt;

/// Physical backing strategy for a column's storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Style {
    Dense,
    Sparse,
    Mapped,
    CodedDense,
    CodedSparse,
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Style::Dense => "Dense",
            Style::Sparse => "Sparse",
            Style::Mapped => "Mapped",
            Style::CodedDense => "CodedDense",
            Style::CodedSparse => "CodedSparse",
        };
        write!(f, "{s}")
    }
}

/// Logical element type tag, used by factories and error messages: one of
/// `{Boolean, Int, Long, Double, LocalDate, LocalTime, LocalDateTime,
/// ZonedDateTime, String, Enum, Object}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementType {
    Boolean,
    Int,
    Long,
    Double,
    LocalDate,
    LocalTime,
    LocalDateTime,
    ZonedDateTime,
    String,
    Enum,
    Object,
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

/// Sort direction multiplier. `Ascending` = `+1`, `Descending` = `-1`,
/// `Restore` replays the identity permutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
    Restore,
}

impl Direction {
    #[inline]
    pub fn sign(self) -> i32 {
        match self {
            Direction::Ascending => 1,
            Direction::Descending => -1,
            Direction::Restore => 0,
        }
    }
}
