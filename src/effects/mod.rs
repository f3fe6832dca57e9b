pub mod filters;
pub mod sharpen;
