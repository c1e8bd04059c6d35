//! End-to-end replays: messages go through `update`, effects run against a
//! mocked API and a real in-memory store, and their result messages are fed
//! back in until the state settles.

use pokedex::app::{
    init, render_cards, update, AppState, DetailView, Display, DisplayRegion, Effect,
    FavoriteControl, Msg, PageDirection, NOT_FOUND_MESSAGE,
};
use pokedex::app::pagination::controls;
use pokedex::catalog::CatalogClient;
use pokedex::storage::{Database, FavoriteRecord, FavoritesStore};
use pokedex::ui::execute_effect;
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SPRITES: &str = "https://sprites.test";

struct Harness {
    state: AppState,
    catalog: CatalogClient,
    store: FavoritesStore,
    /// Number of effects executed so far.
    executed: usize,
}

impl Harness {
    async fn new(server: &MockServer) -> Self {
        let db = Database::open(":memory:").await.unwrap();
        let store = FavoritesStore::new(db);
        let catalog = CatalogClient::new(reqwest::Client::new(), &server.uri()).unwrap();
        Self {
            state: AppState::new(1, Vec::new()),
            catalog,
            store,
            executed: 0,
        }
    }

    /// Run effects to completion, one at a time, in the order they were issued.
    async fn settle(&mut self, mut effects: Vec<Effect>) {
        while !effects.is_empty() {
            let effect = effects.remove(0);
            self.executed += 1;
            let msg = execute_effect(&self.catalog, &self.store, effect).await;
            effects.extend(update(&mut self.state, msg));
        }
    }

    async fn start(&mut self) {
        let effects = init(&mut self.state);
        self.settle(effects).await;
    }

    async fn send(&mut self, msg: Msg) {
        let effects = update(&mut self.state, msg);
        self.settle(effects).await;
    }
}

async fn mount_page(server: &MockServer, offset: u32, count: u64, entries: &[(u32, &str)]) {
    let results: Vec<_> = entries
        .iter()
        .map(|(id, name)| json!({ "name": name, "url": format!("{}/pokemon/{}/", server.uri(), id) }))
        .collect();
    Mock::given(method("GET"))
        .and(path("/pokemon"))
        .and(query_param("offset", offset.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": count,
            "results": results
        })))
        .mount(server)
        .await;
}

fn card_ids(region: &DisplayRegion) -> Vec<u32> {
    match region {
        DisplayRegion::Cards(cards) => cards.iter().map(|c| c.id).collect(),
        DisplayRegion::Message { .. } => Vec::new(),
    }
}

#[tokio::test]
async fn test_first_page_of_220() {
    let server = MockServer::start().await;
    mount_page(&server, 0, 220, &[(1, "bulbasaur"), (4, "charmander")]).await;
    let mut h = Harness::new(&server).await;

    h.start().await;

    let view = controls(&h.state);
    assert!(view.visible);
    assert_eq!(view.label, "Page 1 of 11");
    assert!(!view.previous_enabled);
    assert!(view.next_enabled);
    assert_eq!(card_ids(&render_cards(&h.state, SPRITES)), vec![1, 4]);
}

#[tokio::test]
async fn test_next_page_fetches_offset_20() {
    let server = MockServer::start().await;
    mount_page(&server, 0, 45, &[(1, "bulbasaur")]).await;
    mount_page(&server, 20, 45, &[(21, "spearow")]).await;
    let mut h = Harness::new(&server).await;

    h.start().await;
    h.send(Msg::PageChanged(PageDirection::Next)).await;

    assert_eq!(h.state.page.current_page, 2);
    assert_eq!(controls(&h.state).label, "Page 2 of 3");
    assert!(controls(&h.state).previous_enabled);
    assert_eq!(card_ids(&render_cards(&h.state, SPRITES)), vec![21]);
}

#[tokio::test]
async fn test_filter_by_id_never_hits_network() {
    let server = MockServer::start().await;
    mount_page(&server, 0, 2, &[(1, "bulbasaur"), (25, "pikachu")]).await;
    let mut h = Harness::new(&server).await;
    h.start().await;
    let before = h.executed;

    h.send(Msg::SearchInput("25".into())).await;

    assert_eq!(h.executed, before);
    assert!(!controls(&h.state).visible);
    assert_eq!(card_ids(&render_cards(&h.state, SPRITES)), vec![25]);

    h.send(Msg::SearchInput(String::new())).await;
    assert_eq!(h.executed, before);
    assert!(controls(&h.state).visible);
    assert_eq!(card_ids(&render_cards(&h.state, SPRITES)), vec![1, 25]);
}

#[tokio::test]
async fn test_favorite_charmander_persists_and_disables_control() {
    let server = MockServer::start().await;
    mount_page(&server, 0, 3, &[(1, "bulbasaur"), (4, "charmander")]).await;
    let mut h = Harness::new(&server).await;
    h.start().await;

    h.send(Msg::FavoriteClicked(4)).await;

    assert_eq!(
        h.store.list().await,
        vec![FavoriteRecord {
            id: 4,
            name: "charmander".into()
        }]
    );
    let DisplayRegion::Cards(cards) = render_cards(&h.state, SPRITES) else {
        panic!("expected cards");
    };
    assert_eq!(cards[1].favorite, FavoriteControl::Saved);
    assert_eq!(cards[0].favorite, FavoriteControl::Available);

    // Second click is a no-op, the store keeps one record
    h.send(Msg::FavoriteClicked(4)).await;
    assert_eq!(h.store.list().await.len(), 1);
}

#[tokio::test]
async fn test_lookup_not_found_hides_pagination() {
    let server = MockServer::start().await;
    mount_page(&server, 0, 2, &[(1, "bulbasaur"), (25, "pikachu")]).await;
    Mock::given(method("GET"))
        .and(path("/pokemon/not-a-real-pokemon"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    let mut h = Harness::new(&server).await;
    h.start().await;

    h.send(Msg::SearchSubmitted("not-a-real-pokemon".into())).await;

    assert!(matches!(h.state.display, Display::NotFound(_)));
    assert!(!controls(&h.state).visible);
    assert_eq!(
        render_cards(&h.state, SPRITES),
        DisplayRegion::Message {
            text: NOT_FOUND_MESSAGE.to_string(),
            is_error: true
        }
    );
}

#[tokio::test]
async fn test_lookup_success_shows_single_entry() {
    let server = MockServer::start().await;
    mount_page(&server, 0, 2, &[(1, "bulbasaur")]).await;
    Mock::given(method("GET"))
        .and(path("/pokemon/mewtwo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 150,
            "name": "mewtwo",
            "moves": []
        })))
        .mount(&server)
        .await;
    let mut h = Harness::new(&server).await;
    h.start().await;

    h.send(Msg::SearchSubmitted("  MewTwo ".into())).await;

    assert_eq!(card_ids(&render_cards(&h.state, SPRITES)), vec![150]);
    assert!(!controls(&h.state).visible);
}

#[tokio::test]
async fn test_card_toggle_fetches_once() {
    let server = MockServer::start().await;
    mount_page(&server, 0, 1, &[(25, "pikachu")]).await;
    Mock::given(method("GET"))
        .and(path("/pokemon/25/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 25,
            "name": "pikachu",
            "moves": [
                { "move": { "name": "mega-punch" } },
                { "move": { "name": "pay-day" } },
                { "move": { "name": "thunder-punch" } },
                { "move": { "name": "slam" } },
                { "move": { "name": "double-kick" } },
                { "move": { "name": "mega-kick" } }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;
    let mut h = Harness::new(&server).await;
    h.start().await;

    h.send(Msg::CardToggled(25)).await;
    match h.state.details.get(&25) {
        Some(DetailView::Expanded(moves)) => {
            assert_eq!(moves.len(), 5);
            assert_eq!(moves[0], "mega-punch");
        }
        other => panic!("expected expanded detail, got {other:?}"),
    }

    let before = h.executed;
    h.send(Msg::CardToggled(25)).await;
    assert_eq!(h.executed, before);
    assert!(h.state.details.get(&25).is_none());
}

#[tokio::test]
async fn test_page_failure_keeps_session_usable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pokemon"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    let mut h = Harness::new(&server).await;

    h.start().await;

    assert!(matches!(h.state.display, Display::LoadFailed(_)));
    assert!(matches!(
        render_cards(&h.state, SPRITES),
        DisplayRegion::Message { is_error: true, .. }
    ));
    assert!(h.state.pending_page.is_none());
}

async fn mount_lookup(server: &MockServer, name: &str, id: u32) {
    Mock::given(method("GET"))
        .and(path(format!("/pokemon/{name}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": id,
            "name": name,
            "moves": []
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_lookup_answered_before_failed_first_page_stays_on_screen() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pokemon"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    mount_lookup(&server, "pikachu", 25).await;
    let mut h = Harness::new(&server).await;

    // The first page is still in flight when the lookup completes
    let first_page = init(&mut h.state);
    h.send(Msg::SearchSubmitted("pikachu".into())).await;
    h.settle(first_page).await;

    assert_eq!(card_ids(&render_cards(&h.state, SPRITES)), vec![25]);
    assert!(!controls(&h.state).visible);
    assert!(h.state.notice.is_some());
    assert!(h.state.pending_page.is_none());
}

#[tokio::test]
async fn test_not_found_survives_failed_first_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pokemon"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/pokemon/missingno"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    let mut h = Harness::new(&server).await;

    let first_page = init(&mut h.state);
    h.send(Msg::SearchSubmitted("missingno".into())).await;
    h.settle(first_page).await;

    assert!(matches!(h.state.display, Display::NotFound(_)));
    assert_eq!(
        render_cards(&h.state, SPRITES),
        DisplayRegion::Message {
            text: NOT_FOUND_MESSAGE.to_string(),
            is_error: true
        }
    );
}

#[tokio::test]
async fn test_first_page_arriving_after_lookup_is_kept_behind_it() {
    let server = MockServer::start().await;
    mount_page(&server, 0, 45, &[(1, "bulbasaur"), (4, "charmander")]).await;
    mount_lookup(&server, "pikachu", 25).await;
    let mut h = Harness::new(&server).await;

    let first_page = init(&mut h.state);
    h.send(Msg::SearchSubmitted("pikachu".into())).await;
    h.settle(first_page).await;

    assert_eq!(card_ids(&render_cards(&h.state, SPRITES)), vec![25]);
    assert!(!controls(&h.state).visible);

    // Clearing the search brings back the page that arrived underneath
    h.send(Msg::SearchInput(String::new())).await;
    assert!(controls(&h.state).visible);
    assert_eq!(controls(&h.state).label, "Page 1 of 3");
    assert_eq!(card_ids(&render_cards(&h.state, SPRITES)), vec![1, 4]);
}

#[tokio::test]
async fn test_start_page_past_end_lands_on_last_page() {
    let server = MockServer::start().await;
    mount_page(&server, 19_960, 1302, &[]).await;
    mount_page(&server, 1300, 1302, &[(1301, "entry-a"), (1302, "entry-b")]).await;
    let mut h = Harness::new(&server).await;
    h.state = AppState::new(999, Vec::new());

    h.start().await;

    assert_eq!(h.state.page.current_page, 66);
    let view = controls(&h.state);
    assert_eq!(view.label, "Page 66 of 66");
    assert!(!view.next_enabled);
    assert!(view.previous_enabled);
    assert_eq!(card_ids(&render_cards(&h.state, SPRITES)), vec![1301, 1302]);
}
