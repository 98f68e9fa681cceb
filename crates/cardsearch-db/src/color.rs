//! Colors and color sets.

use std::fmt;
use std::ops::BitOr;

/// One of the five colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Color {
    /// `w`
    White,
    /// `u`
    Blue,
    /// `b`
    Black,
    /// `r`
    Red,
    /// `g`
    Green,
}

impl Color {
    /// All colors in canonical `wubrg` order.
    pub const ALL: [Color; 5] = [
        Color::White,
        Color::Blue,
        Color::Black,
        Color::Red,
        Color::Green,
    ];

    /// The single-letter code.
    pub fn letter(self) -> char {
        match self {
            Color::White => 'w',
            Color::Blue => 'u',
            Color::Black => 'b',
            Color::Red => 'r',
            Color::Green => 'g',
        }
    }

    /// Parses a single-letter code, case-insensitively.
    pub fn from_letter(c: char) -> Option<Color> {
        match c.to_ascii_lowercase() {
            'w' => Some(Color::White),
            'u' => Some(Color::Blue),
            'b' => Some(Color::Black),
            'r' => Some(Color::Red),
            'g' => Some(Color::Green),
            _ => None,
        }
    }

    /// Lowercase English name.
    pub fn name(self) -> &'static str {
        match self {
            Color::White => "white",
            Color::Blue => "blue",
            Color::Black => "black",
            Color::Red => "red",
            Color::Green => "green",
        }
    }

    /// Color implied by a basic land type, if any.
    pub fn from_basic_land_type(land_type: &str) -> Option<Color> {
        match land_type {
            "plains" => Some(Color::White),
            "island" => Some(Color::Blue),
            "swamp" => Some(Color::Black),
            "mountain" => Some(Color::Red),
            "forest" => Some(Color::Green),
            _ => None,
        }
    }

    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

/// A set of colors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ColorSet(u8);

impl ColorSet {
    /// No colors.
    pub const EMPTY: ColorSet = ColorSet(0);
    /// All five colors.
    pub const ALL: ColorSet = ColorSet(0b1_1111);

    /// Collects every color letter in `letters`; other characters are ignored.
    pub fn from_letters(letters: &str) -> ColorSet {
        letters.chars().filter_map(Color::from_letter).collect()
    }

    /// Adds a color.
    pub fn insert(&mut self, color: Color) {
        self.0 |= color.bit();
    }

    /// Whether the set contains `color`.
    pub fn contains(self, color: Color) -> bool {
        self.0 & color.bit() != 0
    }

    /// Union of two sets.
    pub fn union(self, other: ColorSet) -> ColorSet {
        ColorSet(self.0 | other.0)
    }

    /// Whether every color of `self` is in `other`.
    pub fn is_subset(self, other: ColorSet) -> bool {
        self.0 & !other.0 == 0
    }

    /// Whether the sets share a color.
    pub fn intersects(self, other: ColorSet) -> bool {
        self.0 & other.0 != 0
    }

    /// Number of colors.
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Whether the set is colorless.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Colors in `wubrg` order.
    pub fn iter(self) -> impl Iterator<Item = Color> {
        Color::ALL.into_iter().filter(move |c| self.contains(*c))
    }

    /// Letters in `wubrg` order.
    pub fn letters(self) -> String {
        self.iter().map(Color::letter).collect()
    }

    /// English description used in messages, e.g. `"white, blue, and black"`.
    pub fn describe(self) -> String {
        let names: Vec<&str> = self.iter().map(Color::name).collect();
        match names.as_slice() {
            [] => "colorless".to_string(),
            [one] => (*one).to_string(),
            [a, b] => format!("{a} and {b}"),
            [_, _, _, _, _] => "all colors".to_string(),
            [init @ .., last] => format!("{}, and {last}", init.join(", ")),
        }
    }
}

impl FromIterator<Color> for ColorSet {
    fn from_iter<I: IntoIterator<Item = Color>>(iter: I) -> Self {
        let mut set = ColorSet::EMPTY;
        for color in iter {
            set.insert(color);
        }
        set
    }
}

impl BitOr for ColorSet {
    type Output = ColorSet;

    fn bitor(self, rhs: ColorSet) -> ColorSet {
        self.union(rhs)
    }
}

impl fmt::Display for ColorSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.letters())
    }
}
