//! Runs the effects returned by `update` as background tasks.
//!
//! Each effect becomes one spawned task that performs the network or store
//! call and sends exactly one `Msg` back over the channel, including when the
//! task panics.

use crate::app::{
    App, Effect, Msg, TASK_FETCH_DETAIL, TASK_FETCH_PAGE, TASK_LOOKUP, TASK_SAVE_FAVORITE,
};
use crate::catalog::CatalogClient;
use crate::storage::FavoritesStore;
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use tokio::sync::mpsc;

/// Wraps a future to catch panics and convert them to errors.
///
/// - `Ok(result)` if the future completes normally
/// - `Err(panic_message)` if the future panics
pub(super) async fn catch_task_panic<F, T>(future: F) -> Result<T, String>
where
    F: std::future::Future<Output = T>,
{
    AssertUnwindSafe(future)
        .catch_unwind()
        .await
        .map_err(|panic| {
            if let Some(s) = panic.downcast_ref::<&'static str>() {
                s.to_string()
            } else if let Some(s) = panic.downcast_ref::<String>() {
                s.clone()
            } else if let Some(e) = panic.downcast_ref::<Box<dyn std::error::Error + Send>>() {
                e.to_string()
            } else {
                format!("Unknown panic: {:?}", (*panic).type_id())
            }
        })
}

/// Perform one effect and produce the message reporting its outcome.
pub async fn execute_effect(
    catalog: &CatalogClient,
    favorites: &FavoritesStore,
    effect: Effect,
) -> Msg {
    match effect {
        Effect::FetchPage { page, generation } => Msg::PageLoaded {
            page,
            generation,
            result: catalog.fetch_page(page).await,
        },
        Effect::Lookup { query, generation } => {
            let result = catalog.fetch_by_identifier(&query).await;
            Msg::LookupCompleted {
                query,
                generation,
                result,
            }
        }
        Effect::FetchDetail { id, detail_url } => Msg::DetailLoaded {
            id,
            result: catalog.fetch_detail(&detail_url).await,
        },
        Effect::SaveFavorite(record) => {
            let result = favorites
                .add(record.clone())
                .await
                .map_err(|e| e.to_string());
            Msg::FavoriteSaved { record, result }
        }
    }
}

fn task_name(effect: &Effect) -> &'static str {
    match effect {
        Effect::FetchPage { .. } => TASK_FETCH_PAGE,
        Effect::Lookup { .. } => TASK_LOOKUP,
        Effect::FetchDetail { .. } => TASK_FETCH_DETAIL,
        Effect::SaveFavorite(_) => TASK_SAVE_FAVORITE,
    }
}

/// Spawn one task per effect.
pub(super) fn spawn_effects(app: &App, effects: Vec<Effect>, msg_tx: &mpsc::Sender<Msg>) {
    for effect in effects {
        let task = task_name(&effect);
        let catalog = app.catalog.clone();
        let favorites = app.favorites_store.clone();
        let tx = msg_tx.clone();

        tracing::trace!(task, ?effect, "Spawning effect");
        tokio::spawn(async move {
            let msg = match catch_task_panic(execute_effect(&catalog, &favorites, effect)).await {
                Ok(msg) => msg,
                Err(error) => {
                    tracing::error!(task, error = %error, "Background task panicked");
                    Msg::TaskPanicked { task, error }
                }
            };

            if let Err(e) = tx.send(msg).await {
                tracing::warn!(task, error = %e, "Channel send failed (receiver dropped)");
            }
        });
    }
}
