//! Artists grouped by slug.

use crate::ids::{ArtistId, PrintingId};

/// An artist and every printing they illustrated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artist {
    /// This artist.
    pub id: ArtistId,
    /// Name as first seen.
    pub name: String,
    /// Grouping key, see [`crate::normalize::artist_slug`].
    pub slug: String,
    /// Illustrated printings.
    pub printings: Vec<PrintingId>,
}
