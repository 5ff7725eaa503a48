//! Interning pool for road-information records.

use std::collections::HashMap;

use super::RoadInformation;

/// Interns [`RoadInformation`] records by structural equality so that every
/// distinct attribute tuple exists exactly once, identified by its index in
/// the arena. Arcs refer to records by that index.
///
/// During the parallel conversion phase the pool is the only shared mutable
/// state; callers wrap it in a mutex and hold the lock only for the intern
/// call itself.
#[derive(Debug, Default)]
pub struct RoadInfoPool {
    infos: Vec<RoadInformation>,
    index: HashMap<RoadInformation, u32>,
}

impl RoadInfoPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the canonical index for `info`, storing it if no structurally
    /// equal record exists yet.
    pub fn get_or_create(&mut self, info: RoadInformation) -> u32 {
        if let Some(&idx) = self.index.get(&info) {
            return idx;
        }
        let idx = self.infos.len() as u32;
        self.index.insert(info.clone(), idx);
        self.infos.push(info);
        idx
    }

    pub fn get(&self, idx: u32) -> &RoadInformation {
        &self.infos[idx as usize]
    }

    pub fn len(&self) -> usize {
        self.infos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.infos.is_empty()
    }

    /// Consume the pool, yielding the interned records in index order.
    pub fn into_infos(self) -> Vec<RoadInformation> {
        self.infos
    }
}
