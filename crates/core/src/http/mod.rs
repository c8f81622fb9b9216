pub mod live;
pub mod pool;

pub use live::HttpSnapshotSource;
