//! Fair namespace dispatch.
//!
//! One dispatch call produces at most one operator. Namespaces are
//! visited in a fresh uniform random order every call; the first
//! namespace whose scheduler produces an operator wins the tick. Over
//! many ticks every namespace gets an equal share of first-visit slots,
//! so no namespace starves while another is eligible.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use shardgrid_core::ClusterView;
use shardgrid_namespace::{Classifier, NamespaceView};

use crate::operator::Operator;
use crate::scheduler::Scheduler;

/// Offer every namespace a scoped view of `cluster`, in uniform random
/// order, and return the first operator the scheduler produces.
///
/// `None` means no namespace had anything to do; the control loop retries
/// on its next tick.
pub fn schedule_by_namespace(
    cluster: &dyn ClusterView,
    classifier: &dyn Classifier,
    scheduler: &mut dyn Scheduler,
) -> Option<Operator> {
    schedule_by_namespace_with(cluster, classifier, scheduler, &mut rand::rng())
}

/// [`schedule_by_namespace`] with a caller-supplied RNG, so tests can
/// drive the permutation deterministically.
pub fn schedule_by_namespace_with<R: Rng>(
    cluster: &dyn ClusterView,
    classifier: &dyn Classifier,
    scheduler: &mut dyn Scheduler,
    rng: &mut R,
) -> Option<Operator> {
    let mut namespaces = classifier.all_namespaces();
    // Re-drawn on every call; a cached order would hand the same
    // namespace the first slot on every tick.
    namespaces.shuffle(rng);

    for namespace in &namespaces {
        let view = NamespaceView::new(cluster, classifier, namespace.as_str());
        if let Some(op) = scheduler.schedule(&view) {
            debug!(
                namespace = %namespace,
                scheduler = scheduler.name(),
                region = op.region_id,
                "namespace produced an operator"
            );
            return Some(op);
        }
    }
    None
}
