//! Admin single-page-application shell: route table, matcher, lazy views
//! and navigation metadata.

pub mod config;
pub mod lifecycle;
pub mod navigation;
pub mod observability;
pub mod routing;
pub mod views;

pub use config::schema::ShellConfig;
pub use lifecycle::{Shell, ShellBuilder};
pub use navigation::Router;
pub use routing::{RouteDefinition, RouteTable};
