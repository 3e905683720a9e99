//! Domain types for the scheduling subsystem.
//!
//! These types describe cluster topology as the schedulers see it: stores
//! (nodes), regions (replicated key ranges) with their peers, and hot-write
//! statistics. They are snapshots handed out by a [`ClusterView`]
//! implementation, not live handles into cluster state.
//!
//! [`ClusterView`]: crate::view::ClusterView

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Unique identifier for a store (cluster node).
pub type StoreId = u64;

/// Unique identifier for a region (replicated key range).
pub type RegionId = u64;

/// Unique identifier for a peer (one replica of a region).
pub type PeerId = u64;

// ── Store ──────────────────────────────────────────────────────────

/// A cluster node hosting region replicas.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoreInfo {
    pub id: StoreId,
    pub address: String,
    /// Number of region replicas on this store.
    pub region_count: u64,
    /// Total approximate size of region data on this store.
    pub region_size: u64,
}

impl StoreInfo {
    pub fn new(id: StoreId, address: impl Into<String>) -> Self {
        Self {
            id,
            address: address.into(),
            region_count: 0,
            region_size: 0,
        }
    }
}

// ── Region ─────────────────────────────────────────────────────────

/// One replica of a region, naming the store it resides on.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Peer {
    pub id: PeerId,
    pub store_id: StoreId,
}

/// A replicated key range with a leader and follower peers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct RegionInfo {
    pub id: RegionId,
    /// All replicas, leader included.
    pub peers: Vec<Peer>,
    pub leader: Option<Peer>,
    /// Peers reported unreachable by the store heartbeat.
    pub down_peers: Vec<Peer>,
    /// Peers still catching up after a configuration change.
    pub pending_peers: Vec<Peer>,
    pub approximate_size: u64,
}

impl RegionInfo {
    /// The peer of this region located on `store_id`, if any.
    pub fn peer_on(&self, store_id: StoreId) -> Option<&Peer> {
        self.peers.iter().find(|p| p.store_id == store_id)
    }

    /// The leader peer if it is located on `store_id`.
    pub fn leader_peer(&self, store_id: StoreId) -> Option<&Peer> {
        self.leader.as_ref().filter(|p| p.store_id == store_id)
    }

    /// A non-leader peer located on `store_id`, if any.
    pub fn follower_peer(&self, store_id: StoreId) -> Option<&Peer> {
        let leader_id = self.leader.as_ref().map(|p| p.id);
        self.peers
            .iter()
            .find(|p| p.store_id == store_id && Some(p.id) != leader_id)
    }

    /// Store ids of all peers.
    pub fn store_ids(&self) -> Vec<StoreId> {
        self.peers.iter().map(|p| p.store_id).collect()
    }
}

// ── Write statistics ───────────────────────────────────────────────

/// Write-flow statistics for one hot peer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HotPeerStat {
    pub region_id: RegionId,
    pub store_id: StoreId,
    /// Written bytes per second, smoothed.
    pub bytes_rate: f64,
}

/// Cluster-wide hot-write statistics, keyed by store.
pub type WriteStats = HashMap<StoreId, Vec<HotPeerStat>>;
