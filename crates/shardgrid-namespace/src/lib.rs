//! shardgrid-namespace — tenant isolation for the scheduling subsystem.
//!
//! A namespace is a logical partition of the cluster: every store and
//! region is assigned to exactly one namespace by a [`Classifier`], and a
//! [`NamespaceView`] restricts a full cluster view to the members of one
//! namespace. The restricted view satisfies the same `ClusterView`
//! capability as the cluster it wraps, so schedulers written against the
//! general surface run unmodified against a single tenant's slice.
//!
//! # Architecture
//!
//! ```text
//! ClusterView (whole cluster)
//!   └── NamespaceView "tenant-a"
//!       ├── membership snapshot (stores classified into "tenant-a")
//!       ├── filtered region accessors (strict peer containment)
//!       └── per-namespace schedule quotas
//! ```

pub mod classifier;
pub mod view;

pub use classifier::{Classifier, DefaultClassifier, StaticClassifier};
pub use view::{NamespaceView, RAND_REGION_MAX_RETRY};
