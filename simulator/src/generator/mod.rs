pub mod motion;
pub mod profile;
pub mod template;
