//! Navigation subsystem.
//!
//! # Data Flow
//! ```text
//! navigate(target)
//!     → location.rs (parse path, query, hash)
//!     → routing::Matcher (resolve, follow redirects)
//!     → views::ViewLoader (load chain views, may suspend)
//!     → router.rs (commit if still latest, notify listeners)
//!
//! Listeners (read ResolvedRoute.meta only):
//!     → title.rs (page title)
//!     → sidebar.rs (menu entries)
//!     → tabs.rs (visited / affixed tabs)
//!     → icons.rs (icon references)
//! ```

pub mod error;
pub mod icons;
pub mod location;
pub mod router;
pub mod sidebar;
pub mod tabs;
pub mod title;

pub use error::NavigationError;
pub use icons::{is_external, IconRef, IconResolver};
pub use location::{HistoryMode, Location};
pub use router::{Navigation, NavigationOutcome, Router, NOT_FOUND_VIEW};
pub use sidebar::{Sidebar, SidebarItem};
pub use tabs::{Tab, TabStrip};
pub use title::PageTitle;
