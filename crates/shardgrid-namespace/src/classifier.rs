//! Namespace classification.
//!
//! The classifier is the policy seam: it decides which namespace a store
//! or region belongs to and enumerates the namespaces that exist. The
//! scheduling core never inspects assignment policy; it only asks.

use std::collections::{BTreeSet, HashMap};

use shardgrid_core::{RegionId, RegionInfo, StoreId, StoreInfo, DEFAULT_NAMESPACE};

/// Assigns stores and regions to namespaces.
pub trait Classifier {
    /// The namespace the store belongs to.
    fn store_namespace(&self, store: &StoreInfo) -> String;

    /// The namespace the region belongs to.
    fn region_namespace(&self, region: &RegionInfo) -> String;

    /// All namespaces known to this classifier.
    fn all_namespaces(&self) -> Vec<String>;
}

/// The no-policy classifier: everything lives in the default namespace.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultClassifier;

impl Classifier for DefaultClassifier {
    fn store_namespace(&self, _store: &StoreInfo) -> String {
        DEFAULT_NAMESPACE.to_string()
    }

    fn region_namespace(&self, _region: &RegionInfo) -> String {
        DEFAULT_NAMESPACE.to_string()
    }

    fn all_namespaces(&self) -> Vec<String> {
        vec![DEFAULT_NAMESPACE.to_string()]
    }
}

/// A table-driven classifier with explicit store and region assignments.
///
/// Anything not assigned falls back to the fallback namespace. Intended
/// for static tenant layouts and tests; production policies implement
/// [`Classifier`] directly.
#[derive(Debug, Clone)]
pub struct StaticClassifier {
    fallback: String,
    stores: HashMap<StoreId, String>,
    regions: HashMap<RegionId, String>,
}

impl StaticClassifier {
    pub fn new() -> Self {
        Self {
            fallback: DEFAULT_NAMESPACE.to_string(),
            stores: HashMap::new(),
            regions: HashMap::new(),
        }
    }

    /// Set the namespace used for unassigned stores and regions.
    pub fn with_fallback(mut self, namespace: impl Into<String>) -> Self {
        self.fallback = namespace.into();
        self
    }

    /// Assign a store to a namespace.
    pub fn assign_store(mut self, store_id: StoreId, namespace: impl Into<String>) -> Self {
        self.stores.insert(store_id, namespace.into());
        self
    }

    /// Assign a region to a namespace.
    pub fn assign_region(mut self, region_id: RegionId, namespace: impl Into<String>) -> Self {
        self.regions.insert(region_id, namespace.into());
        self
    }
}

impl Default for StaticClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Classifier for StaticClassifier {
    fn store_namespace(&self, store: &StoreInfo) -> String {
        self.stores.get(&store.id).unwrap_or(&self.fallback).clone()
    }

    fn region_namespace(&self, region: &RegionInfo) -> String {
        self.regions.get(&region.id).unwrap_or(&self.fallback).clone()
    }

    fn all_namespaces(&self) -> Vec<String> {
        let mut namespaces: BTreeSet<&String> = BTreeSet::new();
        namespaces.insert(&self.fallback);
        namespaces.extend(self.stores.values());
        namespaces.extend(self.regions.values());
        namespaces.into_iter().cloned().collect()
    }
}
