use serde::Deserialize;

/// Number of entries requested per listing page.
pub const PAGE_SIZE: u32 = 20;

/// Maximum number of move names shown in a card's detail view.
pub const MAX_MOVES: usize = 5;

/// Listing offset of a 1-based page. Page 0 is treated as page 1.
pub fn page_offset(page: u32) -> u32 {
    page.max(1).saturating_sub(1).saturating_mul(PAGE_SIZE)
}

// ============================================================================
// Domain Types
// ============================================================================

/// One catalog item as shown on a card.
///
/// Immutable once fetched. A page (or filter result) replaces the whole set,
/// entries are never patched in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub id: u32,
    pub name: String,
    pub detail_url: String,
}

/// A single listing page returned by the remote catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogPage {
    /// Total number of entries in the remote catalog (not just this page).
    pub total_count: u64,
    pub entries: Vec<CatalogEntry>,
}

// ============================================================================
// Wire Types
// ============================================================================

/// `GET /pokemon?limit&offset` response body.
#[derive(Debug, Deserialize)]
pub(crate) struct RawListing {
    pub count: u64,
    pub results: Vec<RawListingItem>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawListingItem {
    pub name: String,
    pub url: String,
}

/// `GET /pokemon/{nameOrId}` response body, reduced to the fields we read.
#[derive(Debug, Deserialize)]
pub(crate) struct RawRecord {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub moves: Vec<RawMoveSlot>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawMoveSlot {
    #[serde(rename = "move")]
    pub move_ref: RawNamedRef,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawNamedRef {
    pub name: String,
}

impl RawListing {
    /// Convert a listing into entries, deriving ids from detail URLs.
    ///
    /// Items whose URL carries no numeric id fall back to their absolute
    /// position in the catalog (`offset + index + 1`).
    pub(crate) fn into_page(self, offset: u32) -> CatalogPage {
        let entries = self
            .results
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                let id = parse_entry_id(&item.url).unwrap_or_else(|| {
                    let fallback = offset.saturating_add(index as u32).saturating_add(1);
                    tracing::debug!(url = %item.url, fallback, "No id in entry URL, using position");
                    fallback
                });
                CatalogEntry {
                    id,
                    name: item.name,
                    detail_url: item.url,
                }
            })
            .collect();

        CatalogPage {
            total_count: self.count,
            entries,
        }
    }
}

impl RawRecord {
    /// First `MAX_MOVES` move names, in source order.
    pub(crate) fn move_names(self) -> Vec<String> {
        self.moves
            .into_iter()
            .take(MAX_MOVES)
            .map(|slot| slot.move_ref.name)
            .collect()
    }
}

/// Extract the numeric id from a detail URL such as
/// `https://pokeapi.co/api/v2/pokemon/25/`.
///
/// Returns `None` when the URL does not parse or has no numeric segment
/// directly after a `pokemon` segment.
pub fn parse_entry_id(detail_url: &str) -> Option<u32> {
    let parsed = url::Url::parse(detail_url).ok()?;
    let segments: Vec<&str> = parsed.path_segments()?.collect();
    segments
        .windows(2)
        .find(|pair| pair[0] == "pokemon")
        .and_then(|pair| pair[1].parse::<u32>().ok())
}
