pub mod analysis;
pub mod landmark;
pub mod path;
pub mod triangle;
