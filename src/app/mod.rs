//! 应用层

pub mod admin;
pub mod storefront;
