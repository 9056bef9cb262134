pub mod legend;
pub mod popup;
pub mod radar;
