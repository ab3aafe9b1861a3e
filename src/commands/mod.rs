pub mod list;
pub mod track;
