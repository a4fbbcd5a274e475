//! Bounding-box spatial index over one level's children.

use rstar::{RTree, RTreeObject, AABB};

use crate::models::{GeoBbox, GeoPoint};

/// R-tree entry: a child's slot in its owner's vector plus its envelope.
#[derive(Debug, Clone)]
struct IndexedBox {
    slot: usize,
    envelope: AABB<[f64; 2]>,
}

impl RTreeObject for IndexedBox {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

/// Spatial index answering "which children's bounding box covers this
/// point". Entries are inserted during the load and never removed; bounds
/// are inclusive on all four sides, so degenerate boxes still match their
/// own point.
#[derive(Debug, Default)]
pub struct BoxIndex {
    tree: RTree<IndexedBox>,
}

impl BoxIndex {
    pub fn new() -> Self {
        Self { tree: RTree::new() }
    }

    /// Register a child's bounding box under its slot.
    pub fn insert(&mut self, slot: usize, bbox: &GeoBbox) {
        // Envelopes are (x=lng, y=lat), matching the polygon coordinates.
        self.tree.insert(IndexedBox {
            slot,
            envelope: AABB::from_corners(
                [bbox.min_lng, bbox.min_lat],
                [bbox.max_lng, bbox.max_lat],
            ),
        });
    }

    /// Slots of every entry whose bounding box contains the point.
    ///
    /// Order is whatever the tree yields; callers that need a single
    /// winner apply their own tie-break.
    pub fn query(&self, point: GeoPoint) -> Vec<usize> {
        let query_envelope = AABB::from_point([point.lng, point.lat]);

        self.tree
            .locate_in_envelope_intersecting(&query_envelope)
            .map(|entry| entry.slot)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}
