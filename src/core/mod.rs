pub mod gabor;
pub mod stimulus;

pub use gabor::{LumaImage, render};
pub use stimulus::{Carrier, PatchQuery, StimulusParams};
