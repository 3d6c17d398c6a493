pub mod sequence;
pub mod validation;
