use crate::app::{AppContext, QuakeError, Result};
use crate::cli::ViewArgs;
use crate::presentation::{self, EarthquakeDetail};
use crate::store::{EarthquakeStore, FetchOutcome, StoreSnapshot};

pub async fn list(ctx: &AppContext, view: &ViewArgs, limit: Option<usize>) -> Result<()> {
    let snapshot = load(ctx, view).await?;

    if snapshot.visible.is_empty() {
        println!("No earthquakes");
        return Ok(());
    }

    let limit = limit.unwrap_or(snapshot.visible.len());
    for (index, quake) in snapshot.visible.iter().take(limit).enumerate() {
        println!("{:>4}  {}", index, presentation::list_line(quake));
    }

    println!(
        "\nShowing {} of {} earthquakes",
        limit.min(snapshot.visible.len()),
        snapshot.total
    );
    Ok(())
}

pub async fn show(ctx: &AppContext, index: usize, view: &ViewArgs) -> Result<()> {
    load(ctx, view).await?;

    let quake = ctx.store.get(index).ok_or(QuakeError::NotFound(index))?;
    for line in EarthquakeDetail::new(&quake).lines() {
        println!("{}", line);
    }
    Ok(())
}

pub fn legend() {
    for (_, line) in presentation::legend() {
        println!("{}", line);
    }
}

/// Fetches the feed once and applies the requested search and sort.
async fn load(ctx: &AppContext, view: &ViewArgs) -> Result<StoreSnapshot> {
    tracing::debug!(url = %ctx.feed.url, "Loading earthquakes");

    match ctx.store.fetch_all().await {
        FetchOutcome::Success(_) => {}
        FetchOutcome::Failure(kind) => {
            return Err(QuakeError::Feed(presentation::error_message(&kind)));
        }
        FetchOutcome::Discarded => {
            return Err(QuakeError::Other("Fetch was cancelled".into()));
        }
    }

    apply_view(&ctx.store, view);
    Ok(ctx.store.snapshot())
}

/// Search first, then sort, so the two options compose.
pub fn apply_view(store: &EarthquakeStore, view: &ViewArgs) {
    if let Some(query) = &view.search {
        store.search(query);
    }
    if let Some(sort) = view.sort {
        store.sort(sort.into());
    }
}
