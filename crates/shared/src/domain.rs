use std::{fmt, str::FromStr};

use crate::error::ValidationError;

pub const FACE_CELLS: usize = 9;
pub const FACE_COUNT: usize = 6;
pub const CUBE_LEN: usize = FACE_CELLS * FACE_COUNT;

/// Solved arrangement used until the user enters anything else.
pub const DEFAULT_CUBE: &str = "RRRRRRRRRBBBBBBBBBWWWWWWWWWGGGGGGGGGYYYYYYYYYOOOOOOOOO";

/// One sticker color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Facelet {
    White,
    Blue,
    Red,
    Green,
    Yellow,
    Orange,
}

impl Facelet {
    pub const ALL: [Facelet; 6] = [
        Facelet::White,
        Facelet::Blue,
        Facelet::Red,
        Facelet::Green,
        Facelet::Yellow,
        Facelet::Orange,
    ];

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'W' => Some(Self::White),
            'B' => Some(Self::Blue),
            'R' => Some(Self::Red),
            'G' => Some(Self::Green),
            'Y' => Some(Self::Yellow),
            'O' => Some(Self::Orange),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Self::White => 'W',
            Self::Blue => 'B',
            Self::Red => 'R',
            Self::Green => 'G',
            Self::Yellow => 'Y',
            Self::Orange => 'O',
        }
    }
}

impl fmt::Display for Facelet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Faces in the order they appear inside a cube string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Face {
    Up,
    Left,
    Front,
    Right,
    Back,
    Down,
}

impl Face {
    pub const ALL: [Face; FACE_COUNT] = [
        Face::Up,
        Face::Left,
        Face::Front,
        Face::Right,
        Face::Back,
        Face::Down,
    ];

    pub fn offset(self) -> usize {
        let index = match self {
            Self::Up => 0,
            Self::Left => 1,
            Self::Front => 2,
            Self::Right => 3,
            Self::Back => 4,
            Self::Down => 5,
        };
        index * FACE_CELLS
    }
}

/// A 54-symbol cube string that has passed validation.
///
/// The only way to obtain one is through [`CubeState::parse`] (or the
/// `FromStr`/`TryFrom` impls that call it), so holders never need to
/// re-check length or alphabet.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CubeState(String);

impl CubeState {
    pub fn parse(candidate: &str) -> Result<Self, ValidationError> {
        let actual = candidate.chars().count();
        if actual != CUBE_LEN {
            return Err(ValidationError::InvalidLength { actual });
        }

        if let Some((position, character)) = candidate
            .chars()
            .enumerate()
            .find(|(_, c)| Facelet::from_char(*c).is_none())
        {
            return Err(ValidationError::InvalidCharacter {
                character,
                position,
            });
        }

        Ok(Self(candidate.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn facelet(&self, index: usize) -> Option<Facelet> {
        // ASCII-only after parse, so byte indexing is char indexing.
        self.0
            .as_bytes()
            .get(index)
            .and_then(|b| Facelet::from_char(char::from(*b)))
    }

    pub fn facelets(&self) -> impl Iterator<Item = Facelet> + '_ {
        self.0.chars().filter_map(Facelet::from_char)
    }

    pub fn face(&self, face: Face) -> [Facelet; FACE_CELLS] {
        let mut cells = [Facelet::White; FACE_CELLS];
        for (slot, facelet) in cells
            .iter_mut()
            .zip(self.facelets().skip(face.offset()))
        {
            *slot = facelet;
        }
        cells
    }

    /// Returns a copy with the cell at `index` recolored, or `None` when
    /// `index` is outside the cube.
    pub fn with_facelet(&self, index: usize, facelet: Facelet) -> Option<String> {
        if index >= CUBE_LEN {
            return None;
        }
        let painted = self
            .0
            .chars()
            .enumerate()
            .map(|(i, c)| if i == index { facelet.as_char() } else { c })
            .collect();
        Some(painted)
    }

    /// True when every face is a single color matching its center.
    pub fn is_solved(&self) -> bool {
        Face::ALL.iter().all(|face| {
            let cells = self.face(*face);
            let center = cells[FACE_CELLS / 2];
            cells.iter().all(|cell| *cell == center)
        })
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl Default for CubeState {
    fn default() -> Self {
        Self(DEFAULT_CUBE.to_string())
    }
}

impl FromStr for CubeState {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for CubeState {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl AsRef<str> for CubeState {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CubeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
#[path = "tests/domain_tests.rs"]
mod tests;
