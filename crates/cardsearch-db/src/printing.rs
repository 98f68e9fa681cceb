//! Card printings: one card in one set.

use std::fmt;

use chrono::NaiveDate;

use crate::error::{DbError, DbResult};
use crate::ids::{ArtistId, CardId, PrintingId, SetId};

/// Printing rarity, ordered `basic < common < uncommon < rare < mythic < special`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rarity {
    /// Basic land rarity.
    Basic,
    /// Common.
    Common,
    /// Uncommon.
    Uncommon,
    /// Rare.
    Rare,
    /// Mythic rare.
    Mythic,
    /// Special (timeshifted purple, promos).
    Special,
}

impl Rarity {
    /// Parses a rarity name; `mythic rare` is accepted for `mythic`.
    pub fn from_name(name: &str) -> Option<Rarity> {
        match name.trim().to_lowercase().as_str() {
            "basic" | "basic land" => Some(Rarity::Basic),
            "common" => Some(Rarity::Common),
            "uncommon" => Some(Rarity::Uncommon),
            "rare" => Some(Rarity::Rare),
            "mythic" | "mythic rare" => Some(Rarity::Mythic),
            "special" => Some(Rarity::Special),
            _ => None,
        }
    }

    pub(crate) fn parse(card: &str, raw: &str) -> DbResult<Rarity> {
        Rarity::from_name(raw).ok_or_else(|| DbError::UnknownRarity {
            card: card.to_string(),
            rarity: raw.to_string(),
        })
    }

    /// Lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Rarity::Basic => "basic",
            Rarity::Common => "common",
            Rarity::Uncommon => "uncommon",
            Rarity::Rare => "rare",
            Rarity::Mythic => "mythic",
            Rarity::Special => "special",
        }
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Card frame generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Frame {
    /// Original 1993/1997 frame.
    Old,
    /// 2003 frame.
    Modern,
    /// 2015 frame with holofoil stamp.
    M15,
    /// Future Sight timeshifted frame.
    Future,
}

impl Frame {
    /// Frame from the raw frame version, falling back to the release date.
    pub fn classify(raw: Option<&str>, release_date: Option<NaiveDate>) -> Frame {
        match raw {
            Some("1993") | Some("1997") => Frame::Old,
            Some("2003") => Frame::Modern,
            Some("2015") => Frame::M15,
            Some("future") => Frame::Future,
            _ => Frame::by_date(release_date),
        }
    }

    fn by_date(release_date: Option<NaiveDate>) -> Frame {
        let Some(date) = release_date else {
            return Frame::M15;
        };
        if date < NaiveDate::from_ymd_opt(2003, 7, 28).unwrap_or(NaiveDate::MIN) {
            Frame::Old
        } else if date < NaiveDate::from_ymd_opt(2014, 7, 18).unwrap_or(NaiveDate::MIN) {
            Frame::Modern
        } else {
            Frame::M15
        }
    }

    /// Parses a query frame name.
    pub fn from_name(name: &str) -> Option<Frame> {
        match name {
            "old" => Some(Frame::Old),
            "modern" => Some(Frame::Modern),
            "m15" => Some(Frame::M15),
            "future" => Some(Frame::Future),
            _ => None,
        }
    }

    /// Lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Frame::Old => "old",
            Frame::Modern => "modern",
            Frame::M15 => "m15",
            Frame::Future => "future",
        }
    }
}

/// One appearance of a card in a set.
#[derive(Debug, Clone, PartialEq)]
pub struct CardPrinting {
    /// This printing.
    pub id: PrintingId,
    /// Owning card.
    pub card: CardId,
    /// Owning set.
    pub set: SetId,
    /// Collector number (may carry a face suffix like `12a`).
    pub number: String,
    /// Rarity.
    pub rarity: Rarity,
    /// Artist name as printed; `None` when the record had none.
    pub artist_name: Option<String>,
    /// Artist record, assigned by the linker.
    pub artist: Option<ArtistId>,
    /// Release date; the set's date unless the printing overrides it.
    pub release_date: Option<NaiveDate>,
    /// Border color.
    pub border: Option<String>,
    /// Frame generation.
    pub frame: Frame,
    /// Flavor text.
    pub flavor: Option<String>,
    /// Watermark, lowercase.
    pub watermark: Option<String>,
    /// Printed names by language code.
    pub printed_names: Vec<(String, String)>,
    /// Games the printing exists in (`paper`, `mtgo`, `arena`, `shandalar`).
    pub games: Vec<String>,
    /// Available in foil.
    pub foil: bool,
    /// Available in nonfoil.
    pub nonfoil: bool,
    /// Oversized card.
    pub oversized: bool,
    /// Digital only.
    pub online_only: bool,
    /// Not for tournament play.
    pub funny: bool,
    /// Promotional printing.
    pub promo: bool,
    /// Buy-a-box promotion.
    pub buyabox: bool,
    /// Opened in boosters.
    pub in_boosters: bool,
    /// Timeshifted.
    pub timeshifted: bool,
    /// Raw partner collector number before linking.
    pub partner_number: Option<String>,
    /// Partner printing in the same set.
    pub partner: Option<PrintingId>,
    /// Sibling face printings, in the card's face order minus this one.
    pub others: Vec<PrintingId>,
    /// Position in the global default order.
    pub default_sort_index: u32,
}

impl CardPrinting {
    /// Leading digits of the collector number (`12a` → 12, `★` → 0).
    pub fn number_value(&self) -> u32 {
        let digits: String = self.number.chars().take_while(char::is_ascii_digit).collect();
        digits.parse().unwrap_or(0)
    }

    /// Whether the printing exists in `game`.
    pub fn in_game(&self, game: &str) -> bool {
        self.games.iter().any(|g| g == game)
    }

    /// Release year, if dated.
    pub fn year(&self) -> Option<i32> {
        use chrono::Datelike;
        self.release_date.map(|d| d.year())
    }
}
