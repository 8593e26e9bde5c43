//! Document title derived from the active navigation.

use crate::navigation::router::Navigation;
use crate::routing::{KeySpec, MetaConsumer, TITLE};

/// Builds page titles as `<route title> - <app title>`.
#[derive(Debug, Clone)]
pub struct PageTitle {
    app_title: String,
}

impl PageTitle {
    pub fn new(app_title: impl Into<String>) -> Self {
        Self {
            app_title: app_title.into(),
        }
    }

    pub fn for_navigation(&self, navigation: &Navigation) -> String {
        match navigation.route.as_ref().and_then(|r| r.get(&TITLE)) {
            Some(title) => format!("{} - {}", title, self.app_title),
            None => self.app_title.clone(),
        }
    }
}

impl MetaConsumer for PageTitle {
    fn name(&self) -> &'static str {
        "page-title"
    }

    fn reads(&self) -> &'static [KeySpec] {
        const READS: &[KeySpec] = &[TITLE.spec()];
        READS
    }
}
