// Per-view text renderers
use super::filter::CatalogFilter;
use super::format::{format_countdown, format_price};
use crate::feed::LoadError;
use crate::models::{CatalogPayload, GameEntry, PlatformCatalog, StoreCatalog, ViewId};
use chrono::{DateTime, Utc};
use std::fmt::{self, Write};

pub struct RenderContext<'a> {
    pub now: DateTime<Utc>,
    pub filter: &'a CatalogFilter,
}

/// A view's renderer: reads the loaded catalog and writes into the mount point.
pub type RenderFn = fn(&CatalogPayload, &RenderContext<'_>, &mut dyn Write) -> fmt::Result;

pub fn renderer_for(view: ViewId) -> RenderFn {
    match view {
        ViewId::PrimaryCatalog => render_primary_catalog,
        ViewId::TimeLimited => render_time_limited,
        ViewId::Discounts => render_discounts,
    }
}

fn write_card(out: &mut dyn Write, indent: &str, entry: &GameEntry, detail: Option<&str>) -> fmt::Result {
    write!(out, "{}- {}", indent, entry.display_title())?;
    if let Some(detail) = detail {
        write!(out, "  [{}]", detail)?;
    }
    match entry.link.trim() {
        "" => writeln!(out),
        link => writeln!(out, "  {}", link),
    }
}

fn write_empty(out: &mut dyn Write, ctx: &RenderContext<'_>) -> fmt::Result {
    if ctx.filter.is_empty() {
        writeln!(out, "No games available right now.")
    } else {
        writeln!(out, "No games match the current filters.")
    }
}

/// Renders platform -> store -> (genre) -> cards. Returns how many cards were
/// written.
fn render_platforms(
    catalog: &PlatformCatalog,
    ctx: &RenderContext<'_>,
    out: &mut dyn Write,
    detail: &dyn Fn(&GameEntry) -> Option<String>,
) -> Result<usize, fmt::Error> {
    let mut shown = 0;

    for (platform, stores) in catalog.iter() {
        let mut section = String::new();

        for (store, shelf) in stores {
            let accept = |e: &&GameEntry| ctx.filter.matches(e, Some(platform.as_str()), Some(store.as_str()));
            let mut block = String::new();

            match shelf {
                StoreCatalog::FlatList(games) => {
                    for entry in games.iter().filter(accept) {
                        write_card(&mut block, "    ", entry, detail(entry).as_deref())?;
                        shown += 1;
                    }
                }
                StoreCatalog::GenreGrouped(genres) => {
                    for (genre, games) in genres {
                        let matching: Vec<&GameEntry> = games.iter().filter(accept).collect();
                        if matching.is_empty() {
                            continue;
                        }
                        writeln!(block, "    [{}]", genre)?;
                        for entry in matching {
                            write_card(&mut block, "    ", entry, detail(entry).as_deref())?;
                            shown += 1;
                        }
                    }
                }
            }

            if !block.is_empty() {
                writeln!(section, "  {}", store)?;
                section.push_str(&block);
            }
        }

        if !section.is_empty() {
            writeln!(out, "{}", platform.to_uppercase())?;
            out.write_str(&section)?;
            writeln!(out)?;
        }
    }

    Ok(shown)
}

fn write_title(out: &mut dyn Write, view: ViewId) -> fmt::Result {
    writeln!(out, "== {} ==", view.title())?;
    writeln!(out)
}

pub fn render_primary_catalog(
    catalog: &CatalogPayload,
    ctx: &RenderContext<'_>,
    out: &mut dyn Write,
) -> fmt::Result {
    write_title(out, ViewId::PrimaryCatalog)?;
    let shown = render_platforms(&catalog.permanent, ctx, out, &|_: &GameEntry| None)?;
    if shown == 0 {
        write_empty(out, ctx)?;
    }
    Ok(())
}

pub fn render_time_limited(
    catalog: &CatalogPayload,
    ctx: &RenderContext<'_>,
    out: &mut dyn Write,
) -> fmt::Result {
    write_title(out, ViewId::TimeLimited)?;
    let now = ctx.now;
    let shown = render_platforms(&catalog.temporary, ctx, out, &|entry: &GameEntry| {
        Some(format_countdown(entry.ends_at(), now))
    })?;
    if shown == 0 {
        write_empty(out, ctx)?;
    }
    Ok(())
}

pub fn render_discounts(
    catalog: &CatalogPayload,
    ctx: &RenderContext<'_>,
    out: &mut dyn Write,
) -> fmt::Result {
    write_title(out, ViewId::Discounts)?;
    let mut shown = 0;

    for (store, games) in &catalog.sale {
        let mut matching: Vec<&GameEntry> = games
            .iter()
            .filter(|e| ctx.filter.matches(e, None, Some(store.as_str())))
            .collect();
        if matching.is_empty() {
            continue;
        }
        // Deepest discount first, unknown discounts last
        matching.sort_by(|a, b| {
            b.discount_percentage
                .cmp(&a.discount_percentage)
                .then_with(|| a.display_title().cmp(b.display_title()))
        });

        writeln!(out, "{}", store.to_uppercase())?;
        for entry in matching {
            let price = format_price(
                entry.original_price,
                entry.final_price,
                entry.discount_percentage,
            );
            write_card(out, "  ", entry, Some(&price))?;
            shown += 1;
        }
        writeln!(out)?;
    }

    if shown == 0 {
        write_empty(out, ctx)?;
    }
    Ok(())
}

/// The single error panel shown for any failed load.
pub fn render_error_panel(err: &LoadError) -> String {
    format!(
        "Failed to load games.\n{}\nRun the command again to retry.\n",
        err
    )
}
