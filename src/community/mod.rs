//! Community partition of the co-authorship graph

pub mod detection;

use std::collections::BTreeMap;

/// Assignment of every graph node to exactly one community id.
///
/// Ids increase monotonically across connected components in discovery
/// order. They are opaque labels: id values carry no meaning across
/// runs or between components.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommunityAssignment {
    /// Community id per node index
    ids: Vec<u32>,

    /// Total number of distinct community ids handed out
    community_count: usize,
}

impl CommunityAssignment {
    pub(crate) fn new(ids: Vec<u32>, community_count: usize) -> Self {
        Self {
            ids,
            community_count,
        }
    }

    /// Community id assigned to a node index
    pub fn id_of(&self, node: u32) -> u32 {
        self.ids[node as usize]
    }

    /// Number of nodes covered by this assignment
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Number of distinct communities
    pub fn community_count(&self) -> usize {
        self.community_count
    }

    /// Members of each community, keyed by id in ascending order
    pub fn groups(&self) -> BTreeMap<u32, Vec<u32>> {
        let mut groups: BTreeMap<u32, Vec<u32>> = BTreeMap::new();
        for (node, &id) in self.ids.iter().enumerate() {
            groups.entry(id).or_default().push(node as u32);
        }
        groups
    }
}
