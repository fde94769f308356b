pub mod session;
pub mod template;
pub mod template_version;
pub mod tenant;
