//! shardgrid-schedule — operators, the scheduler capability, and fair
//! namespace dispatch.
//!
//! A scheduler looks at a cluster view and may produce one [`Operator`],
//! a descriptor of a balancing action executed elsewhere. The dispatch
//! loop gives every namespace a fair shot at producing that operator:
//!
//! - Enumerate the classifier's namespaces
//! - Shuffle them uniformly, fresh on every call
//! - Offer each namespace's scoped view to the scheduler in turn
//! - Return the first operator produced, or nothing
//!
//! Randomizing the visit order is what prevents starvation: with a fixed
//! order, whichever namespace happens to be enumerated first would win
//! every tick on which several namespaces are eligible.

pub mod dispatch;
pub mod operator;
pub mod scheduler;

pub use dispatch::{schedule_by_namespace, schedule_by_namespace_with};
pub use operator::{Operator, OperatorDesc};
pub use scheduler::Scheduler;
