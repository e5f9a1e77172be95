pub mod display;
pub mod pagination;
pub mod time;
