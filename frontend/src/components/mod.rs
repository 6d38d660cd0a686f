pub mod notification_toast;
pub mod resource;
