pub mod contract;
pub mod directory;
pub mod template;
