//! Orthographic context bits
//!
//! Records in which sentence positions and with which letter case a type has
//! been observed. Bit values match the persisted parameter format.

use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign};

use crate::domain::token::LetterCase;

/// Bitmask over {beginning, middle, unknown} x {upper, lower}
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct OrthoContext(u8);

impl OrthoContext {
    pub const EMPTY: Self = Self(0);
    /// Beginning of a sentence with upper case
    pub const BEG_UC: Self = Self(1 << 1);
    /// Middle of a sentence with upper case
    pub const MID_UC: Self = Self(1 << 2);
    /// Unknown position with upper case
    pub const UNK_UC: Self = Self(1 << 3);
    /// Beginning of a sentence with lower case
    pub const BEG_LC: Self = Self(1 << 4);
    /// Middle of a sentence with lower case
    pub const MID_LC: Self = Self(1 << 5);
    /// Unknown position with lower case
    pub const UNK_LC: Self = Self(1 << 6);

    /// Any upper-case observation
    pub const UC: Self = Self(Self::BEG_UC.0 | Self::MID_UC.0 | Self::UNK_UC.0);
    /// Any lower-case observation
    pub const LC: Self = Self(Self::BEG_LC.0 | Self::MID_LC.0 | Self::UNK_LC.0);

    const ALL: u8 = Self::UC.0 | Self::LC.0;

    /// Build from raw bits, rejecting unknown bits
    pub const fn from_bits(bits: u32) -> Option<Self> {
        if bits & !(Self::ALL as u32) == 0 {
            Some(Self(bits as u8))
        } else {
            None
        }
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// True if all bits of `other` are set
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// True if any bit of `other` is set
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    /// Clear the bits of `other`
    pub fn remove(&mut self, other: Self) {
        self.0 &= !other.0;
    }
}

impl BitOr for OrthoContext {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for OrthoContext {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for OrthoContext {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl fmt::Debug for OrthoContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const NAMES: [(OrthoContext, &str); 6] = [
            (OrthoContext::BEG_UC, "BEG_UC"),
            (OrthoContext::MID_UC, "MID_UC"),
            (OrthoContext::UNK_UC, "UNK_UC"),
            (OrthoContext::BEG_LC, "BEG_LC"),
            (OrthoContext::MID_LC, "MID_LC"),
            (OrthoContext::UNK_LC, "UNK_LC"),
        ];

        let names: Vec<&str> = NAMES
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect();
        write!(f, "OrthoContext({})", names.join(" | "))
    }
}

/// Position of a token within its sentence, as far as it is known
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentencePosition {
    Initial,
    Internal,
    Unknown,
}

/// Context bit for a position and first-letter case
pub const fn ortho_flag(position: SentencePosition, case: LetterCase) -> OrthoContext {
    match (position, case) {
        (SentencePosition::Initial, LetterCase::Upper) => OrthoContext::BEG_UC,
        (SentencePosition::Internal, LetterCase::Upper) => OrthoContext::MID_UC,
        (SentencePosition::Unknown, LetterCase::Upper) => OrthoContext::UNK_UC,
        (SentencePosition::Initial, LetterCase::Lower) => OrthoContext::BEG_LC,
        (SentencePosition::Internal, LetterCase::Lower) => OrthoContext::MID_LC,
        (SentencePosition::Unknown, LetterCase::Lower) => OrthoContext::UNK_LC,
        (_, LetterCase::None) => OrthoContext::EMPTY,
    }
}
