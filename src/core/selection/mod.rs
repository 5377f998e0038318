mod region_selector;

pub use region_selector::{RegionSelector, SelectionCancelled};
