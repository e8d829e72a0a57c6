pub mod check;
pub mod explain;
pub mod files;
pub mod gen;
pub mod list;
