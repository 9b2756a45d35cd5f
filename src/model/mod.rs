pub mod champion;
pub mod ids;
pub mod language;
pub mod tab;
