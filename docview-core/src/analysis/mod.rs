pub mod bbox;
pub mod category;
pub mod style;
