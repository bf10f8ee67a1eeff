// View selection and rendering
pub mod filter;
pub mod format;
pub mod render;

pub use filter::CatalogFilter;
pub use render::{render_error_panel, renderer_for, RenderContext, RenderFn};

use crate::models::{CatalogPayload, ViewId};
use std::fmt;

/// Tracks the active view. Switching only changes which renderer runs next;
/// it never touches the loader.
#[derive(Debug, Clone, Default)]
pub struct ViewDispatcher {
    active: ViewId,
}

impl ViewDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> ViewId {
        self.active
    }

    pub fn switch(&mut self, view: ViewId) {
        if self.active != view {
            log::debug!("Switching view {} -> {}", self.active, view);
        }
        self.active = view;
    }

    pub fn render(
        &self,
        catalog: &CatalogPayload,
        ctx: &RenderContext<'_>,
        out: &mut dyn fmt::Write,
    ) -> fmt::Result {
        renderer_for(self.active)(catalog, ctx, out)
    }

    pub fn render_to_string(&self, catalog: &CatalogPayload, ctx: &RenderContext<'_>) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail
        let _ = self.render(catalog, ctx, &mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_dispatcher_starts_on_primary_catalog() {
        let mut dispatcher = ViewDispatcher::new();
        assert_eq!(dispatcher.active(), ViewId::PrimaryCatalog);

        dispatcher.switch(ViewId::Discounts);
        assert_eq!(dispatcher.active(), ViewId::Discounts);

        let filter = CatalogFilter::default();
        let ctx = RenderContext {
            now: Utc::now(),
            filter: &filter,
        };
        let out = dispatcher.render_to_string(&CatalogPayload::default(), &ctx);
        assert!(out.starts_with("== Discounted Games =="));
        assert!(out.contains("No games available right now."));
    }
}
