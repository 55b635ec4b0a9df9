//! Filter selection applied before the filtered charts are built.

mod filter_state;
mod overrides;

pub use filter_state::FilterState;
pub use overrides::FilterOverrides;
