//! Operator — the action descriptor a scheduler produces.
//!
//! Operators describe what should happen to a region; applying them to
//! the cluster (raft conf changes, leader transfers, progress tracking)
//! belongs to the surrounding service.

use serde::{Deserialize, Serialize};

use shardgrid_core::{RegionId, StoreId};

/// A balancing action targeting one region.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Operator {
    pub region_id: RegionId,
    pub desc: OperatorDesc,
}

/// What the operator does.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OperatorDesc {
    /// Move region leadership between two member stores.
    TransferLeader { from: StoreId, to: StoreId },
    /// Relocate one replica to a different store.
    MovePeer { from: StoreId, to: StoreId },
    /// Add a replica on the store.
    AddPeer { store: StoreId },
    /// Remove the replica on the store.
    RemovePeer { store: StoreId },
}

impl Operator {
    pub fn transfer_leader(region_id: RegionId, from: StoreId, to: StoreId) -> Self {
        Self {
            region_id,
            desc: OperatorDesc::TransferLeader { from, to },
        }
    }

    pub fn move_peer(region_id: RegionId, from: StoreId, to: StoreId) -> Self {
        Self {
            region_id,
            desc: OperatorDesc::MovePeer { from, to },
        }
    }

    pub fn add_peer(region_id: RegionId, store: StoreId) -> Self {
        Self {
            region_id,
            desc: OperatorDesc::AddPeer { store },
        }
    }

    pub fn remove_peer(region_id: RegionId, store: StoreId) -> Self {
        Self {
            region_id,
            desc: OperatorDesc::RemovePeer { store },
        }
    }
}
