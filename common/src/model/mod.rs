pub mod account;
pub mod media;
pub mod permission;
pub mod reference;
pub mod report;
pub mod tag;
pub mod template;
