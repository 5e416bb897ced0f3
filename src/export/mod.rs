pub mod bundle;
pub mod png;

pub use bundle::{BundleSummary, write_round_bundle};
pub use png::{encode_png, save_png};
