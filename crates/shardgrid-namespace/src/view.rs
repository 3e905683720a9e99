//! Namespace-scoped cluster view.
//!
//! `NamespaceView` wraps a full `ClusterView` and restricts it to one
//! namespace. Membership is a point-in-time snapshot: the store set is
//! computed once at construction and never mutated, so a view built at
//! the start of a scheduling attempt answers consistently for its whole
//! (short) lifetime regardless of what happens to the base view. A view
//! is built fresh for every attempt and discarded afterwards.
//!
//! Region accessors enforce strict containment: a region counts as inside
//! the namespace only if the classifier labels it so AND every peer sits
//! on a member store. A region straddling a namespace boundary is invisible
//! through this view.

use std::collections::HashMap;

use tracing::debug;

use shardgrid_core::{
    ClusterView, RegionId, RegionInfo, RegionOption, ScheduleConfig, StoreId, StoreInfo,
    WriteStats,
};

use crate::classifier::Classifier;

/// Upper bound on delegated draws in `rand_follower_region` /
/// `rand_leader_region`. The base view samples the whole cluster, so the
/// scoped view rejection-samples; the bound trades completeness for a
/// fixed worst case. Exhausting it returns absent, which callers treat as
/// "try again next tick".
pub const RAND_REGION_MAX_RETRY: usize = 10;

/// A `ClusterView` restricted to the stores and regions of one namespace.
pub struct NamespaceView<'a> {
    base: &'a dyn ClusterView,
    classifier: &'a dyn Classifier,
    namespace: String,
    /// Membership snapshot, computed once at construction.
    stores: HashMap<StoreId, StoreInfo>,
    rand_retry: usize,
    filter_write_stats: bool,
}

impl<'a> NamespaceView<'a> {
    /// Build a view of `namespace` over `base`.
    ///
    /// Walks every store of the base view once and keeps those the
    /// classifier assigns to `namespace`. An empty membership set is
    /// valid: it is simply a namespace with nothing to schedule.
    pub fn new(
        base: &'a dyn ClusterView,
        classifier: &'a dyn Classifier,
        namespace: impl Into<String>,
    ) -> Self {
        let namespace = namespace.into();
        let mut stores = HashMap::new();
        for store in base.get_stores() {
            if classifier.store_namespace(&store) == namespace {
                stores.insert(store.id, store);
            }
        }
        debug!(namespace = %namespace, stores = stores.len(), "namespace view constructed");
        Self {
            base,
            classifier,
            namespace,
            stores,
            rand_retry: RAND_REGION_MAX_RETRY,
            filter_write_stats: false,
        }
    }

    /// Override the sampling retry bound.
    pub fn with_rand_retry(mut self, retries: usize) -> Self {
        self.rand_retry = retries;
        self
    }

    /// Restrict `region_write_stats` to member stores.
    ///
    /// Off by default: write statistics pass through cluster-wide, unlike
    /// every other accessor.
    pub fn with_filtered_write_stats(mut self, filtered: bool) -> Self {
        self.filter_write_stats = filtered;
        self
    }

    /// The namespace this view is scoped to.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Whether the region is fully contained in this namespace: its own
    /// label matches and every peer's store is a member.
    pub fn region_belongs(&self, region: &RegionInfo) -> bool {
        if self.classifier.region_namespace(region) != self.namespace {
            return false;
        }
        region.peers.iter().all(|p| self.stores.contains_key(&p.store_id))
    }

    /// Rejection-sample the base view until a region belongs to this
    /// namespace or the retry bound is exhausted. A base `None` means the
    /// cluster itself has no candidate and ends the loop early.
    fn rand_region(&self, sample: impl Fn() -> Option<RegionInfo>) -> Option<RegionInfo> {
        for _ in 0..self.rand_retry {
            let region = sample()?;
            if self.region_belongs(&region) {
                return Some(region);
            }
        }
        debug!(
            namespace = %self.namespace,
            retries = self.rand_retry,
            "sampling exhausted without an in-namespace region"
        );
        None
    }
}

impl ClusterView for NamespaceView<'_> {
    fn get_stores(&self) -> Vec<StoreInfo> {
        self.stores.values().cloned().collect()
    }

    fn get_store(&self, store_id: StoreId) -> Option<StoreInfo> {
        self.stores.get(&store_id).cloned()
    }

    /// A region that exists cluster-wide but is not fully contained in
    /// this namespace is reported absent. Cross-tenant existence must not
    /// leak through this accessor.
    fn get_region(&self, region_id: RegionId) -> Option<RegionInfo> {
        self.base
            .get_region(region_id)
            .filter(|r| self.region_belongs(r))
    }

    fn rand_follower_region(&self, store_id: StoreId, opts: &[RegionOption]) -> Option<RegionInfo> {
        self.rand_region(|| self.base.rand_follower_region(store_id, opts))
    }

    fn rand_leader_region(&self, store_id: StoreId, opts: &[RegionOption]) -> Option<RegionInfo> {
        self.rand_region(|| self.base.rand_leader_region(store_id, opts))
    }

    fn average_region_size(&self) -> u64 {
        let (mut total_count, mut total_size) = (0u64, 0u64);
        for store in self.stores.values() {
            total_count += store.region_count;
            total_size += store.region_size;
        }
        if total_count == 0 {
            return 0;
        }
        total_size / total_count
    }

    fn region_write_stats(&self) -> WriteStats {
        let stats = self.base.region_write_stats();
        if !self.filter_write_stats {
            return stats;
        }
        stats
            .into_iter()
            .filter(|(store_id, _)| self.stores.contains_key(store_id))
            .collect()
    }

    fn options(&self) -> &ScheduleConfig {
        self.base.options()
    }

    // Quotas resolve at this view's namespace, not the default one. This
    // is how per-namespace scheduling limits reach the schedulers.

    fn leader_schedule_limit(&self) -> u64 {
        self.options().leader_schedule_limit(&self.namespace)
    }

    fn region_schedule_limit(&self) -> u64 {
        self.options().region_schedule_limit(&self.namespace)
    }

    fn replica_schedule_limit(&self) -> u64 {
        self.options().replica_schedule_limit(&self.namespace)
    }

    fn merge_schedule_limit(&self) -> u64 {
        self.options().merge_schedule_limit(&self.namespace)
    }

    fn max_replicas(&self) -> usize {
        self.options().max_replicas(&self.namespace)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::StaticClassifier;
    use shardgrid_core::{HotPeerStat, MockClusterView, NamespaceConfig};
    use std::cell::Cell;

    /// Two namespaces: stores 1 and 2 in "a", store 3 in "b".
    /// Region 100 sits entirely in "a"; region 200 straddles the boundary
    /// (peers on stores 1 and 3) but is labeled "a".
    fn split_cluster() -> (MockClusterView, StaticClassifier) {
        let cluster = MockClusterView::new();
        cluster.add_store(1, 4, 400);
        cluster.add_store(2, 6, 200);
        cluster.add_store(3, 10, 9000);
        cluster.add_region(100, 1, &[2]);
        cluster.add_region(200, 1, &[3]);

        let classifier = StaticClassifier::new()
            .assign_store(1, "a")
            .assign_store(2, "a")
            .assign_store(3, "b")
            .assign_region(100, "a")
            .assign_region(200, "a");
        (cluster, classifier)
    }

    #[test]
    fn membership_follows_the_classifier() {
        let (cluster, classifier) = split_cluster();
        let view = NamespaceView::new(&cluster, &classifier, "a");

        let mut ids: Vec<_> = view.get_stores().iter().map(|s| s.id).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![1, 2]);

        assert!(view.get_store(1).is_some());
        // Store 3 exists in the base view but is outside the namespace.
        assert!(view.get_store(3).is_none());
    }

    #[test]
    fn empty_namespace_is_valid() {
        let (cluster, classifier) = split_cluster();
        let view = NamespaceView::new(&cluster, &classifier, "c");

        assert!(view.get_stores().is_empty());
        assert_eq!(view.average_region_size(), 0);
    }

    #[test]
    fn region_belongs_requires_full_containment() {
        let (cluster, classifier) = split_cluster();
        let view = NamespaceView::new(&cluster, &classifier, "a");

        let fully_inside = cluster.get_region(100).unwrap();
        let straddling = cluster.get_region(200).unwrap();

        assert!(view.region_belongs(&fully_inside));
        // Labeled "a" but one peer lives on store 3: partial containment
        // is rejected.
        assert!(!view.region_belongs(&straddling));
    }

    #[test]
    fn region_belongs_requires_matching_label() {
        let (cluster, classifier) = split_cluster();
        // Region 300 has all peers inside "a" but carries label "b".
        cluster.add_region(300, 2, &[1]);
        let classifier = classifier.assign_region(300, "b");
        let view = NamespaceView::new(&cluster, &classifier, "a");

        let region = cluster.get_region(300).unwrap();
        assert!(!view.region_belongs(&region));
    }

    #[test]
    fn get_region_does_not_leak_across_tenants() {
        let (cluster, classifier) = split_cluster();
        let view = NamespaceView::new(&cluster, &classifier, "a");

        assert_eq!(view.get_region(100).unwrap().id, 100);
        // Region 200 exists cluster-wide but fails containment.
        assert!(cluster.get_region(200).is_some());
        assert!(view.get_region(200).is_none());
        assert!(view.get_region(999).is_none());
    }

    #[test]
    fn membership_is_a_construction_time_snapshot() {
        let (cluster, classifier) = split_cluster();
        let view = NamespaceView::new(&cluster, &classifier, "a");

        cluster.remove_store(1);
        cluster.add_store(4, 0, 0);

        // The snapshot still answers as of construction time.
        assert!(view.get_store(1).is_some());
        assert!(view.get_store(4).is_none());
        assert_eq!(view.get_stores().len(), 2);
    }

    #[test]
    fn average_region_size_covers_member_stores_only() {
        let (cluster, classifier) = split_cluster();
        let view = NamespaceView::new(&cluster, &classifier, "a");

        // Stores 1 and 2: (400 + 200) / (4 + 6) = 60. Store 3's 9000 of
        // data must not bleed in.
        assert_eq!(view.average_region_size(), 60);
    }

    /// Wraps a mock cluster and counts delegated sampling calls.
    struct CountingSampler<'a> {
        inner: &'a MockClusterView,
        calls: Cell<usize>,
    }

    impl<'a> CountingSampler<'a> {
        fn new(inner: &'a MockClusterView) -> Self {
            Self {
                inner,
                calls: Cell::new(0),
            }
        }
    }

    impl ClusterView for CountingSampler<'_> {
        fn get_stores(&self) -> Vec<StoreInfo> {
            self.inner.get_stores()
        }

        fn get_store(&self, store_id: StoreId) -> Option<StoreInfo> {
            self.inner.get_store(store_id)
        }

        fn get_region(&self, region_id: RegionId) -> Option<RegionInfo> {
            self.inner.get_region(region_id)
        }

        fn rand_follower_region(
            &self,
            store_id: StoreId,
            opts: &[RegionOption],
        ) -> Option<RegionInfo> {
            self.calls.set(self.calls.get() + 1);
            self.inner.rand_follower_region(store_id, opts)
        }

        fn rand_leader_region(&self, store_id: StoreId, opts: &[RegionOption]) -> Option<RegionInfo> {
            self.calls.set(self.calls.get() + 1);
            self.inner.rand_leader_region(store_id, opts)
        }

        fn average_region_size(&self) -> u64 {
            self.inner.average_region_size()
        }

        fn region_write_stats(&self) -> WriteStats {
            self.inner.region_write_stats()
        }

        fn options(&self) -> &ScheduleConfig {
            self.inner.options()
        }
    }

    #[test]
    fn sampling_returns_only_contained_regions() {
        let (cluster, classifier) = split_cluster();
        let view = NamespaceView::new(&cluster, &classifier, "a");

        // Store 2 hosts a follower of region 100 only.
        for _ in 0..20 {
            let region = view.rand_follower_region(2, &[]).unwrap();
            assert_eq!(region.id, 100);
            assert!(view.region_belongs(&region));
        }

        // Store 1 leads both region 100 and the straddling region 200,
        // so give the sampler enough draws to make a miss impossible.
        let view = NamespaceView::new(&cluster, &classifier, "a").with_rand_retry(100);
        for _ in 0..20 {
            assert_eq!(view.rand_leader_region(1, &[]).unwrap().id, 100);
        }
    }

    #[test]
    fn sampling_gives_up_after_the_retry_bound() {
        let (cluster, classifier) = split_cluster();
        // Make region 200 (straddling, never valid for "a") the only
        // follower candidate on store 1: leader on 3, follower on 1.
        cluster.add_region(201, 3, &[1]);
        let classifier = classifier.assign_region(201, "a");

        let counting = CountingSampler::new(&cluster);
        let view = NamespaceView::new(&counting, &classifier, "a");

        assert!(view.rand_follower_region(1, &[]).is_none());
        assert_eq!(counting.calls.get(), RAND_REGION_MAX_RETRY);
    }

    #[test]
    fn retry_bound_is_injectable() {
        let (cluster, classifier) = split_cluster();
        cluster.add_region(201, 3, &[1]);
        let classifier = classifier.assign_region(201, "a");

        let counting = CountingSampler::new(&cluster);
        let view = NamespaceView::new(&counting, &classifier, "a").with_rand_retry(3);

        assert!(view.rand_follower_region(1, &[]).is_none());
        assert_eq!(counting.calls.get(), 3);
    }

    #[test]
    fn base_absence_short_circuits_the_retry_loop() {
        let cluster = MockClusterView::new();
        cluster.add_store(1, 0, 0);
        let classifier = StaticClassifier::new().assign_store(1, "a");

        let counting = CountingSampler::new(&cluster);
        let view = NamespaceView::new(&counting, &classifier, "a");

        // No regions at all: the base reports absent on the first draw.
        assert!(view.rand_follower_region(1, &[]).is_none());
        assert_eq!(counting.calls.get(), 1);
    }

    fn cross_tenant_stats() -> WriteStats {
        let mut stats = WriteStats::new();
        for store_id in [1, 3] {
            stats.insert(
                store_id,
                vec![HotPeerStat {
                    region_id: store_id * 100,
                    store_id,
                    bytes_rate: 1024.0,
                }],
            );
        }
        stats
    }

    #[test]
    fn write_stats_pass_through_unfiltered_by_default() {
        let (cluster, classifier) = split_cluster();
        cluster.set_write_stats(cross_tenant_stats());
        let view = NamespaceView::new(&cluster, &classifier, "a");

        // Store 3 is outside the namespace, yet its stats are visible:
        // write statistics are the one accessor that stays cluster-wide.
        let stats = view.region_write_stats();
        assert_eq!(stats.len(), 2);
        assert!(stats.contains_key(&3));
    }

    #[test]
    fn write_stats_filtering_is_opt_in() {
        let (cluster, classifier) = split_cluster();
        cluster.set_write_stats(cross_tenant_stats());
        let view = NamespaceView::new(&cluster, &classifier, "a").with_filtered_write_stats(true);

        let stats = view.region_write_stats();
        assert_eq!(stats.len(), 1);
        assert!(stats.contains_key(&1));
        assert!(!stats.contains_key(&3));
    }

    #[test]
    fn quotas_resolve_at_the_view_namespace() {
        let mut config = ScheduleConfig::default();
        config.namespace.insert(
            "a".to_string(),
            NamespaceConfig {
                leader_schedule_limit: Some(16),
                max_replicas: Some(5),
                ..Default::default()
            },
        );
        let cluster = MockClusterView::with_config(config);
        cluster.add_store(1, 0, 0);
        let classifier = StaticClassifier::new().assign_store(1, "a");

        let view = NamespaceView::new(&cluster, &classifier, "a");
        assert_eq!(view.leader_schedule_limit(), 16);
        assert_eq!(view.max_replicas(), 5);
        // Unset fields fall back to the cluster-wide defaults.
        assert_eq!(view.region_schedule_limit(), 4);

        // The base view itself still resolves at the default namespace.
        assert_eq!(cluster.leader_schedule_limit(), 4);
    }
}
