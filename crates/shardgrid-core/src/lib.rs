//! shardgrid-core — cluster domain types and the cluster view capability.
//!
//! This crate is the shared vocabulary of the scheduling subsystem:
//!
//! - **`types`** — stores, regions, peers, and write-flow statistics
//! - **`view`** — the `ClusterView` capability trait that schedulers and
//!   decorators are written against
//! - **`config`** — schedule limits with per-namespace overrides, loaded
//!   from TOML
//! - **`mock`** — an in-memory `ClusterView` for tests
//!
//! Nothing in this crate mutates cluster state. Views expose read
//! operations only; producing and executing operators belongs to the
//! scheduling crates layered on top.

pub mod config;
pub mod mock;
pub mod types;
pub mod view;

pub use config::{ConfigError, ConfigResult, NamespaceConfig, ScheduleConfig, DEFAULT_NAMESPACE};
pub use mock::MockClusterView;
pub use types::{HotPeerStat, Peer, PeerId, RegionId, RegionInfo, StoreId, StoreInfo, WriteStats};
pub use view::{healthy_region, ClusterView, RegionOption};
