// View switching commands
use crate::feed::LoadError;
use crate::models::ViewId;
use crate::state::{AppState, LoadState};
use crate::views::{CatalogFilter, RenderContext};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ViewError {
    #[error("catalog has not been loaded yet")]
    NotLoaded,
    #[error(transparent)]
    LoadFailed(LoadError),
}

/// Renders the active view from the catalog already held in memory.
pub fn render_active_view(state: &AppState) -> Result<String, ViewError> {
    let catalog = match state.load_state() {
        LoadState::Loaded(loaded) => loaded.catalog,
        LoadState::Failed(e) => return Err(ViewError::LoadFailed(e)),
        LoadState::Idle => return Err(ViewError::NotLoaded),
    };

    let filter = state.filter();
    let ctx = RenderContext {
        now: state.clock().now(),
        filter: &filter,
    };
    Ok(state.dispatcher().render_to_string(&catalog, &ctx))
}

pub fn switch_view(state: &AppState, view: ViewId) -> Result<String, ViewError> {
    state.dispatcher().switch(view);
    render_active_view(state)
}

pub fn apply_filter(state: &AppState, filter: CatalogFilter) -> Result<String, ViewError> {
    state.set_filter(filter);
    render_active_view(state)
}

/// Renders all three views in turn, ending back on the view that was active.
pub fn render_all_views(state: &AppState) -> Result<Vec<(ViewId, String)>, ViewError> {
    let original = state.active_view();
    let mut rendered = Vec::with_capacity(ViewId::ALL.len());

    for view in ViewId::ALL {
        match switch_view(state, view) {
            Ok(out) => rendered.push((view, out)),
            Err(e) => {
                state.dispatcher().switch(original);
                return Err(e);
            }
        }
    }

    state.dispatcher().switch(original);
    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::feed::load_catalog;
    use crate::feed::test_support::CountingSource;
    use crate::feed::{CacheStore, CatalogLoader, Clock, ManualClock};
    use crate::models::Settings;
    use std::sync::atomic::Ordering;
    use std::sync::Arc;

    fn app_state(source: CountingSource, dir: &std::path::Path) -> AppState {
        let clock: Arc<dyn Clock> = Arc::new(ManualClock::new(1_760_000_000_000));
        let loader = CatalogLoader::new(Box::new(source), CacheStore::new(dir, clock.clone()));
        AppState::new(Settings::default(), loader, clock)
    }

    #[test]
    fn test_switching_views_never_refetches() {
        let dir = tempfile::tempdir().unwrap();
        let source = CountingSource::ok();
        let calls = source.calls();
        let state = app_state(source, dir.path());

        load_catalog(&state).unwrap();
        for view in [
            ViewId::TimeLimited,
            ViewId::Discounts,
            ViewId::PrimaryCatalog,
            ViewId::Discounts,
        ] {
            switch_view(&state, view).unwrap();
            assert_eq!(state.active_view(), view);
        }
        render_all_views(&state).unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(state.active_view(), ViewId::Discounts);
    }

    #[test]
    fn test_initial_view_is_primary_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let state = app_state(CountingSource::ok(), dir.path());

        load_catalog(&state).unwrap();
        let out = render_active_view(&state).unwrap();

        assert!(out.starts_with("== Permanently Free Games =="));
        assert!(out.contains("- Portal  https://x"));
    }

    #[test]
    fn test_render_before_load_or_after_failure() {
        let dir = tempfile::tempdir().unwrap();
        let state = app_state(CountingSource::failing_then_ok(1), dir.path());

        assert_eq!(render_active_view(&state), Err(ViewError::NotLoaded));
        let _ = load_catalog(&state);
        assert!(matches!(
            switch_view(&state, ViewId::Discounts),
            Err(ViewError::LoadFailed(LoadError::Network { .. }))
        ));
    }

    #[test]
    fn test_filter_rerenders_without_fetch() {
        let dir = tempfile::tempdir().unwrap();
        let source = CountingSource::ok();
        let calls = source.calls();
        let state = app_state(source, dir.path());
        load_catalog(&state).unwrap();

        let out = apply_filter(&state, CatalogFilter::new(Some("half".to_string()), None, None)).unwrap();

        assert!(out.contains("No games match the current filters."));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
