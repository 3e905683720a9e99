//! In-memory cluster view for tests.
//!
//! `MockClusterView` plays the role an in-memory state store plays for the
//! persistence layer: a fully functional, ephemeral backend that
//! downstream crates drive their tests against. Topology is held behind a
//! lock so tests can mutate the cluster through a shared reference while
//! a decorator built on top of it is still alive.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use rand::seq::IndexedRandom;

use crate::config::ScheduleConfig;
use crate::types::{Peer, PeerId, RegionId, RegionInfo, StoreId, StoreInfo, WriteStats};
use crate::view::{ClusterView, RegionOption};

#[derive(Default)]
struct MockState {
    stores: HashMap<StoreId, StoreInfo>,
    regions: HashMap<RegionId, RegionInfo>,
    write_stats: WriteStats,
    next_peer_id: PeerId,
}

/// An in-memory `ClusterView` with settable topology and statistics.
#[derive(Clone, Default)]
pub struct MockClusterView {
    config: ScheduleConfig,
    state: Arc<RwLock<MockState>>,
}

impl MockClusterView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock cluster backed by the given schedule configuration.
    pub fn with_config(config: ScheduleConfig) -> Self {
        Self {
            config,
            state: Arc::default(),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, MockState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, MockState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Add a store with the given region aggregates.
    pub fn add_store(&self, id: StoreId, region_count: u64, region_size: u64) {
        let mut state = self.write();
        state.stores.insert(
            id,
            StoreInfo {
                id,
                address: format!("store-{id}"),
                region_count,
                region_size,
            },
        );
    }

    /// Remove a store. Regions referencing it are left in place.
    pub fn remove_store(&self, id: StoreId) {
        self.write().stores.remove(&id);
    }

    /// Add a region with its leader on `leader_store` and one follower on
    /// each of `follower_stores`. Peer ids are allocated internally.
    pub fn add_region(&self, id: RegionId, leader_store: StoreId, follower_stores: &[StoreId]) {
        let mut state = self.write();

        let mut peers = Vec::with_capacity(1 + follower_stores.len());
        for store_id in std::iter::once(&leader_store).chain(follower_stores) {
            state.next_peer_id += 1;
            peers.push(Peer {
                id: state.next_peer_id,
                store_id: *store_id,
            });
        }

        let region = RegionInfo {
            id,
            leader: Some(peers[0]),
            peers,
            ..Default::default()
        };
        state.regions.insert(id, region);
    }

    /// Insert or replace a fully specified region.
    pub fn put_region(&self, region: RegionInfo) {
        self.write().regions.insert(region.id, region);
    }

    /// Replace the hot-write statistics returned by `region_write_stats`.
    pub fn set_write_stats(&self, stats: WriteStats) {
        self.write().write_stats = stats;
    }

    fn rand_region(
        &self,
        store_id: StoreId,
        opts: &[RegionOption],
        locate: impl Fn(&RegionInfo, StoreId) -> bool,
    ) -> Option<RegionInfo> {
        let state = self.read();
        let candidates: Vec<&RegionInfo> = state
            .regions
            .values()
            .filter(|r| locate(r, store_id) && opts.iter().all(|opt| opt(r)))
            .collect();
        candidates.choose(&mut rand::rng()).map(|r| (*r).clone())
    }
}

impl ClusterView for MockClusterView {
    fn get_stores(&self) -> Vec<StoreInfo> {
        self.read().stores.values().cloned().collect()
    }

    fn get_store(&self, store_id: StoreId) -> Option<StoreInfo> {
        self.read().stores.get(&store_id).cloned()
    }

    fn get_region(&self, region_id: RegionId) -> Option<RegionInfo> {
        self.read().regions.get(&region_id).cloned()
    }

    fn rand_follower_region(&self, store_id: StoreId, opts: &[RegionOption]) -> Option<RegionInfo> {
        self.rand_region(store_id, opts, |r, s| r.follower_peer(s).is_some())
    }

    fn rand_leader_region(&self, store_id: StoreId, opts: &[RegionOption]) -> Option<RegionInfo> {
        self.rand_region(store_id, opts, |r, s| r.leader_peer(s).is_some())
    }

    fn average_region_size(&self) -> u64 {
        let state = self.read();
        let (mut total_count, mut total_size) = (0u64, 0u64);
        for store in state.stores.values() {
            total_count += store.region_count;
            total_size += store.region_size;
        }
        if total_count == 0 {
            return 0;
        }
        total_size / total_count
    }

    fn region_write_stats(&self) -> WriteStats {
        self.read().write_stats.clone()
    }

    fn options(&self) -> &ScheduleConfig {
        &self.config
    }
}
