//! Oracle-level cards.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;

use crate::color::ColorSet;
use crate::derive::{
    clean_text, color_indicator, partial_color_identity, reminder_text, type_line, type_tags,
};
use crate::error::{DbError, DbResult};
use crate::ids::{CardId, PrintingId};
use crate::mana::ManaHash;
use crate::normalize::{hard_normalize, normalize_accents, normalize_name, stemmed_name};
use crate::raw::{RawCard, RawRuling};
use crate::stat::StatValue;

/// A card's status in a format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Legality {
    /// Any number of copies up to the format limit.
    Legal,
    /// Not allowed.
    Banned,
    /// At most one copy.
    Restricted,
}

impl Legality {
    /// Parses a status name, case-insensitively.
    pub fn from_name(name: &str) -> Option<Legality> {
        match name.to_lowercase().as_str() {
            "legal" => Some(Legality::Legal),
            "banned" => Some(Legality::Banned),
            "restricted" => Some(Legality::Restricted),
            _ => None,
        }
    }

    /// Lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Legality::Legal => "legal",
            Legality::Banned => "banned",
            Legality::Restricted => "restricted",
        }
    }
}

impl fmt::Display for Legality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Canonical format key: lowercase, `edh` is `commander`.
pub fn normalize_format_name(format: &str) -> String {
    let format = format.trim().to_lowercase();
    if format == "edh" {
        "commander".to_string()
    } else {
        format
    }
}

const EXTRA_LAYOUTS: [&str; 3] = ["vanguard", "planar", "scheme"];
const FRONT_LAYOUTS: [&str; 3] = ["aftermath", "flip", "adventure"];

/// One oracle card, shared by all of its printings.
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    /// This card.
    pub id: CardId,
    /// Name as printed.
    pub name: String,
    /// Lookup key.
    pub normalized_name: String,
    /// Plural-insensitive lookup key.
    pub stemmed_name: String,
    /// Face names of a multi-part card, in printed order.
    pub names: Option<Vec<String>>,
    /// Layout.
    pub layout: String,
    /// Declared colors.
    pub colors: ColorSet,
    /// Not for tournament play.
    pub funny: bool,
    /// Rules text without reminder text.
    pub text: String,
    /// Accent-folded rules text.
    pub text_normalized: String,
    /// Has augment.
    pub augment: bool,
    /// Mana cost as printed.
    pub mana_cost: Option<String>,
    /// Mana cost shown to users.
    pub display_mana_cost: Option<String>,
    /// Mana cost multiset.
    pub mana_hash: Option<ManaHash>,
    /// On the reserved list.
    pub reserved: bool,
    /// Normalized type tags.
    pub types: Vec<String>,
    /// Printed type line.
    pub type_line: String,
    /// Converted mana cost.
    pub cmc: f64,
    /// Power.
    pub power: Option<StatValue>,
    /// Toughness.
    pub toughness: Option<StatValue>,
    /// Loyalty.
    pub loyalty: Option<StatValue>,
    /// Power as displayed.
    pub display_power: Option<String>,
    /// Toughness as displayed.
    pub display_toughness: Option<String>,
    /// Single-face identity before multi-part union.
    pub partial_color_identity: ColorSet,
    /// Deck-building identity.
    pub color_identity: ColorSet,
    /// Color indicator, when colors don't follow from the cost.
    pub color_indicator: Option<ColorSet>,
    /// Synthesized reminder text.
    pub reminder_text: Option<String>,
    /// Vanguard, plane, scheme or conspiracy.
    pub extra: bool,
    /// Vanguard hand modifier.
    pub hand: Option<i32>,
    /// Vanguard life modifier.
    pub life: Option<i32>,
    /// Rulings.
    pub rulings: Vec<RawRuling>,
    /// Not the main face.
    pub secondary: bool,
    /// Has partner.
    pub partner: bool,
    /// Foreign names by language.
    pub foreign_names: BTreeMap<String, Vec<String>>,
    /// Accent and case folded foreign names.
    pub foreign_names_normalized: BTreeMap<String, Vec<String>>,
    /// Related card names.
    pub related: Vec<String>,
    /// Keywords.
    pub keywords: Vec<String>,
    /// Format legality by normalized format name.
    pub legalities: BTreeMap<String, Legality>,
    /// Printings in default order.
    pub printings: Vec<PrintingId>,
    /// Printed only in custom or funny sets, at least one custom.
    pub custom: bool,
    /// Earliest printing date.
    pub first_release_date: Option<NaiveDate>,
    /// Earliest printing date ignoring prerelease promos.
    pub first_regular_release_date: Option<NaiveDate>,
    /// Latest printing date.
    pub last_release_date: Option<NaiveDate>,
}

impl Card {
    /// Derives a card from its raw record. Printings are attached later.
    pub fn from_raw(id: CardId, raw: &RawCard) -> DbResult<Card> {
        let name = raw.name.as_str();
        let colors = ColorSet::from_letters(&raw.colors);
        let text = clean_text(raw.text.as_deref().unwrap_or(""), raw.funny);
        let types = type_tags(&raw.types, &raw.subtypes, &raw.supertypes);

        let mana_hash = raw
            .mana_cost
            .as_deref()
            .map(|cost| ManaHash::parse(name, cost))
            .transpose()?;
        let stat = |value: &Option<String>| {
            value
                .as_deref()
                .map(|v| StatValue::parse_card_value(name, v))
                .transpose()
        };
        let power = stat(&raw.power)?;
        let toughness = stat(&raw.toughness)?;
        let loyalty = stat(&raw.loyalty)?;

        let partial = partial_color_identity(name, colors, raw.mana_cost.as_deref(), &text, &types)?;
        let indicator = color_indicator(name, mana_hash.as_ref(), colors)?;
        let reminder = reminder_text(
            name,
            &types,
            &raw.layout,
            raw.secondary,
            raw.names.as_deref(),
        )?;

        let mut legalities = BTreeMap::new();
        for (format, status) in &raw.legalities {
            let legality = Legality::from_name(status).ok_or_else(|| DbError::UnknownLegality {
                card: name.to_string(),
                format: format.clone(),
                status: status.clone(),
            })?;
            legalities.insert(normalize_format_name(format), legality);
        }

        let foreign_names_normalized = raw
            .foreign_names
            .iter()
            .map(|(lang, names)| (lang.clone(), names.iter().map(|n| hard_normalize(n)).collect()))
            .collect();

        Ok(Card {
            id,
            name: name.to_string(),
            normalized_name: normalize_name(name),
            stemmed_name: stemmed_name(name),
            names: raw.names.clone(),
            layout: raw.layout.clone(),
            colors,
            funny: raw.funny,
            text_normalized: normalize_accents(&text),
            augment: text.to_lowercase().contains("augment {"),
            text,
            mana_cost: raw.mana_cost.clone(),
            display_mana_cost: if raw.hide_mana_cost {
                None
            } else {
                raw.mana_cost.clone()
            },
            mana_hash,
            reserved: raw.reserved,
            extra: EXTRA_LAYOUTS.contains(&raw.layout.as_str())
                || types.iter().any(|t| t == "conspiracy"),
            type_line: type_line(&raw.supertypes, &raw.types, &raw.subtypes),
            types,
            cmc: raw.cmc,
            display_power: raw.display_power.clone().or_else(|| raw.power.clone()),
            display_toughness: raw.display_toughness.clone().or_else(|| raw.toughness.clone()),
            power,
            toughness,
            loyalty,
            partial_color_identity: partial,
            color_identity: partial,
            color_indicator: indicator,
            reminder_text: reminder,
            hand: raw.hand,
            life: raw.life,
            rulings: raw.rulings.clone(),
            secondary: raw.secondary,
            partner: raw.is_partner,
            foreign_names: raw.foreign_names.clone(),
            foreign_names_normalized,
            related: raw.related.clone(),
            keywords: raw.keywords.clone(),
            legalities,
            printings: Vec::new(),
            custom: false,
            first_release_date: None,
            first_regular_release_date: None,
            last_release_date: None,
        })
    }

    /// Whether the card has type tag `tag`.
    pub fn has_type(&self, tag: &str) -> bool {
        self.types.iter().any(|t| t == tag)
    }

    /// Whether this face is a front face.
    pub fn is_front(&self) -> bool {
        !self.secondary || FRONT_LAYOUTS.contains(&self.layout.as_str())
    }

    /// Whether this face is a back face.
    pub fn is_back(&self) -> bool {
        !self.is_front()
    }

    /// Whether this is the main face.
    pub fn is_primary(&self) -> bool {
        !self.secondary
    }

    /// Whether the card has several named faces.
    pub fn has_multiple_parts(&self) -> bool {
        self.names.is_some()
    }

    /// Whether the card may lead a Commander deck.
    pub fn is_commander(&self) -> bool {
        if self.secondary {
            return false;
        }
        if self.has_type("legendary") && self.has_type("creature") {
            return true;
        }
        (self.has_type("planeswalker") || self.has_type("saga"))
            && self.text.contains("can be your commander")
    }

    /// Whether the card may lead a Brawl deck.
    pub fn is_brawler(&self) -> bool {
        !self.secondary
            && self.has_type("legendary")
            && (self.has_type("creature") || self.has_type("planeswalker"))
    }

    /// Whether singleton and copy limits ignore this card.
    pub fn allowed_in_any_number(&self) -> bool {
        self.has_type("basic") || self.text.contains("A deck can have any number of cards named")
    }

    /// Legality in `format`; `edh` is accepted for `commander`.
    pub fn legality(&self, format: &str) -> Option<Legality> {
        self.legalities.get(&normalize_format_name(format)).copied()
    }

    /// Whether the card has no rules text.
    pub fn is_vanilla(&self) -> bool {
        self.text.is_empty()
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Card({})", self.name)
    }
}
