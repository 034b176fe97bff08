pub mod rules;
pub mod simulate;
