pub mod editor;
pub mod header;
pub mod status;
