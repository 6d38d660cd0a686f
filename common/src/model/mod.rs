pub mod asset;
pub mod draft;
pub mod notification;
pub mod pagination;
pub mod record;
