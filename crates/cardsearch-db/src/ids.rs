//! Arena identifiers for corpus records.
//!
//! Records live in flat vectors owned by [`crate::CardDatabase`]; these
//! newtypes index into them so cards, printings and sets can refer to each
//! other without shared ownership.

macro_rules! arena_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(pub u32);

        impl $name {
            /// Create an identifier from a raw index.
            #[must_use]
            pub const fn new(id: u32) -> Self {
                Self(id)
            }

            /// Get the raw index value.
            #[must_use]
            pub const fn raw(self) -> u32 {
                self.0
            }

            /// The index as a `usize`, for slice access.
            #[must_use]
            pub const fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!($label, "({})"), self.0)
            }
        }
    };
}

arena_id!(
    /// Identifier of a [`crate::Card`].
    CardId,
    "Card"
);
arena_id!(
    /// Identifier of a [`crate::CardPrinting`].
    PrintingId,
    "Printing"
);
arena_id!(
    /// Identifier of a [`crate::CardSet`].
    SetId,
    "Set"
);
arena_id!(
    /// Identifier of an [`crate::Artist`].
    ArtistId,
    "Artist"
);
