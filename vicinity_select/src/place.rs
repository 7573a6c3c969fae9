// Copyright 2025 the Vicinity Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Places and place sets.

use std::collections::HashMap;
use std::fmt;

use kurbo::Point;
use vicinity_grid::Located;

use crate::error::Error;

/// Relevance assumed for places that carry none.
pub const DEFAULT_RELEVANCE: f64 = 1.0;

/// Stable identifier of a place within one run.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlaceId(pub u64);

impl fmt::Display for PlaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A geo-located item with an optional intrinsic relevance.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Place {
    /// Identifier, unique within a [`PlaceSet`].
    pub id: PlaceId,
    /// 2D coordinate.
    pub position: Point,
    /// Intrinsic relevance; [`DEFAULT_RELEVANCE`] when absent.
    pub relevance: Option<f64>,
}

impl Place {
    /// A place without an explicit relevance.
    pub const fn new(id: u64, x: f64, y: f64) -> Self {
        Self {
            id: PlaceId(id),
            position: Point::new(x, y),
            relevance: None,
        }
    }

    /// Set the intrinsic relevance.
    #[must_use]
    pub const fn with_relevance(mut self, relevance: f64) -> Self {
        self.relevance = Some(relevance);
        self
    }

    /// Intrinsic relevance, falling back to [`DEFAULT_RELEVANCE`].
    #[inline]
    pub fn relevance(&self) -> f64 {
        self.relevance.unwrap_or(DEFAULT_RELEVANCE)
    }

    /// Euclidean distance to another place.
    #[inline]
    pub fn distance(&self, other: &Self) -> f64 {
        self.position.distance(other.position)
    }
}

impl Located for Place {
    #[inline]
    fn position(&self) -> Point {
        self.position
    }

    #[inline]
    fn attribute(&self) -> f64 {
        self.relevance()
    }
}

/// Ordered collection of places with unique identifiers.
///
/// Order carries no meaning for selection or scoring; it only fixes iteration order.
#[derive(Clone, Debug, Default)]
pub struct PlaceSet {
    places: Vec<Place>,
    index: HashMap<PlaceId, usize>,
}

impl PlaceSet {
    /// Build a set, rejecting duplicate identifiers.
    pub fn new(places: Vec<Place>) -> Result<Self, Error> {
        let mut index = HashMap::with_capacity(places.len());
        for (i, place) in places.iter().enumerate() {
            if index.insert(place.id, i).is_some() {
                return Err(Error::InvalidArgument(format!(
                    "duplicate place identifier {}",
                    place.id
                )));
            }
        }
        Ok(Self { places, index })
    }

    /// Number of places.
    #[inline]
    pub fn len(&self) -> usize {
        self.places.len()
    }

    /// Whether the set holds no places.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }

    /// Places in iteration order.
    #[inline]
    pub fn as_slice(&self) -> &[Place] {
        &self.places
    }

    /// Iterate places in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Place> {
        self.places.iter()
    }

    /// Position of a place in iteration order.
    #[inline]
    pub fn index_of(&self, id: PlaceId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    /// Look a place up by identifier.
    pub fn get(&self, id: PlaceId) -> Option<&Place> {
        self.index_of(id).map(|i| &self.places[i])
    }

    /// Whether a place with this identifier is present.
    #[inline]
    pub fn contains(&self, id: PlaceId) -> bool {
        self.index.contains_key(&id)
    }

    /// Identifiers in iteration order.
    pub fn ids(&self) -> impl Iterator<Item = PlaceId> + '_ {
        self.places.iter().map(|p| p.id)
    }

    /// Subset at the given positions, in the given order.
    ///
    /// Positions must be distinct and in range; the identifiers stay unique.
    pub(crate) fn pick(&self, positions: impl IntoIterator<Item = usize>) -> Self {
        let places: Vec<Place> = positions.into_iter().map(|i| self.places[i]).collect();
        let index = places.iter().enumerate().map(|(i, p)| (p.id, i)).collect();
        Self { places, index }
    }
}

impl<'a> IntoIterator for &'a PlaceSet {
    type Item = &'a Place;
    type IntoIter = std::slice::Iter<'a, Place>;

    fn into_iter(self) -> Self::IntoIter {
        self.places.iter()
    }
}
