//! The scheduler capability.

use shardgrid_core::ClusterView;

use crate::operator::Operator;

/// A scheduling algorithm: given a cluster view, it may produce one
/// operator describing a balancing action.
///
/// Schedulers are written against the general [`ClusterView`] surface, so
/// the same implementation runs over the whole cluster or over a
/// namespace-scoped view without modification. Returning `None` means
/// "nothing to do right now"; the control loop calls again next tick.
pub trait Scheduler {
    /// Name used in logs and diagnostics.
    fn name(&self) -> &str;

    /// Attempt to produce one operator from the given view.
    fn schedule(&mut self, cluster: &dyn ClusterView) -> Option<Operator>;
}
