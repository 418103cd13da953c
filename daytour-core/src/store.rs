//! Read-only access to cached venue data.
//!
//! The `VenueStore` trait is the seam towards the external venue/schedule
//! cache: the optimizer only ever reads through it. The in-memory
//! implementation backs tests and snapshot-file deployments alike.

use std::collections::BTreeMap;

use crate::venue::{Venue, VenueId};

/// Read-only venue cache interface.
pub trait VenueStore {
    /// Look up one venue by identifier.
    fn venue(&self, id: &VenueId) -> Option<&Venue>;

    /// Iterate over every cached venue, ordered by identifier.
    fn venues(&self) -> Box<dyn Iterator<Item = &Venue> + '_>;
}

/// In-memory [`VenueStore`] over a snapshot of venue records.
#[derive(Debug, Clone, Default)]
pub struct MemoryVenueStore {
    venues: BTreeMap<VenueId, Venue>,
}

impl MemoryVenueStore {
    /// Build a store from a collection of venues.
    ///
    /// A later venue with a duplicate identifier replaces the earlier one;
    /// loaders that must reject duplicates check before constructing.
    #[must_use]
    pub fn with_venues<I>(venues: I) -> Self
    where
        I: IntoIterator<Item = Venue>,
    {
        Self {
            venues: venues
                .into_iter()
                .map(|venue| (venue.id().clone(), venue))
                .collect(),
        }
    }

    /// Insert one venue, replacing any previous entry with the same id.
    pub fn insert(&mut self, venue: Venue) {
        self.venues.insert(venue.id().clone(), venue);
    }

    /// Number of cached venues.
    #[must_use]
    pub fn len(&self) -> usize {
        self.venues.len()
    }

    /// Whether the store holds no venues.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.venues.is_empty()
    }
}

impl VenueStore for MemoryVenueStore {
    fn venue(&self, id: &VenueId) -> Option<&Venue> {
        self.venues.get(id)
    }

    fn venues(&self) -> Box<dyn Iterator<Item = &Venue> + '_> {
        Box::new(self.venues.values())
    }
}
