//! The cluster view capability.
//!
//! `ClusterView` is the read surface schedulers are written against. A
//! concrete cluster implements it over live topology; decorators (such as
//! a namespace-scoped view) implement it over a restricted subset and are
//! substitutable anywhere a full view is expected.

use crate::config::{ScheduleConfig, DEFAULT_NAMESPACE};
use crate::types::{RegionId, RegionInfo, StoreId, StoreInfo, WriteStats};

/// Filter applied to candidate regions during random sampling.
pub type RegionOption = fn(&RegionInfo) -> bool;

/// Accept only regions with no down and no pending peers.
pub fn healthy_region(region: &RegionInfo) -> bool {
    region.down_peers.is_empty() && region.pending_peers.is_empty()
}

/// Read access to cluster topology and scheduling quotas.
///
/// All operations are synchronous and side-effect free. Absence (a store
/// or region that does not exist, or a sampler that finds no candidate)
/// is reported as `None`, never as an error: callers retry on their next
/// scheduling tick.
pub trait ClusterView {
    /// All stores visible through this view, unordered.
    fn get_stores(&self) -> Vec<StoreInfo>;

    /// Look up a single store by id.
    fn get_store(&self, store_id: StoreId) -> Option<StoreInfo>;

    /// Look up a single region by id.
    fn get_region(&self, region_id: RegionId) -> Option<RegionInfo>;

    /// A random region with a follower peer on `store_id`, passing every
    /// option filter.
    fn rand_follower_region(&self, store_id: StoreId, opts: &[RegionOption]) -> Option<RegionInfo>;

    /// A random region whose leader peer is on `store_id`, passing every
    /// option filter.
    fn rand_leader_region(&self, store_id: StoreId, opts: &[RegionOption]) -> Option<RegionInfo>;

    /// Average approximate region size across the view's stores.
    /// Zero when the view holds no regions.
    fn average_region_size(&self) -> u64;

    /// Hot-write statistics, keyed by store.
    fn region_write_stats(&self) -> WriteStats;

    /// The schedule configuration backing the limit accessors.
    fn options(&self) -> &ScheduleConfig;

    // Schedule quotas. The defaults read the configuration at the default
    // namespace; namespace-scoped views override them with their own.

    fn leader_schedule_limit(&self) -> u64 {
        self.options().leader_schedule_limit(DEFAULT_NAMESPACE)
    }

    fn region_schedule_limit(&self) -> u64 {
        self.options().region_schedule_limit(DEFAULT_NAMESPACE)
    }

    fn replica_schedule_limit(&self) -> u64 {
        self.options().replica_schedule_limit(DEFAULT_NAMESPACE)
    }

    fn merge_schedule_limit(&self) -> u64 {
        self.options().merge_schedule_limit(DEFAULT_NAMESPACE)
    }

    fn max_replicas(&self) -> usize {
        self.options().max_replicas(DEFAULT_NAMESPACE)
    }
}
