use chrono::{TimeDelta, TimeZone, Utc};
use shelf_catalog::*;
use shelf_db::SqliteStore;
use shelf_lib::*;

fn input(title: &str, genres: &[&str], platforms: &[&str]) -> GameInput {
    GameInput {
        title: title.to_string(),
        genres: genres.iter().map(|s| s.to_string()).collect(),
        platforms: platforms.iter().map(|s| s.to_string()).collect(),
        publisher: "Nintendo".to_string(),
        developer: "Nintendo EAD".to_string(),
        release_year: 2000,
        metacritic_score: None,
        play_hours: 0.0,
        completed: false,
        favorite: false,
    }
}

/// Insert games one second apart, in the given order.
fn seed(store: &SqliteStore, inputs: Vec<GameInput>) -> Vec<Game> {
    let base = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
    inputs
        .into_iter()
        .enumerate()
        .map(|(i, g)| store.insert(g, base + TimeDelta::seconds(i as i64)).unwrap())
        .collect()
}

fn titles(games: &[Game]) -> Vec<&str> {
    games.iter().map(|g| g.title.as_str()).collect()
}

fn select(store: &SqliteStore, spec: &FilterSpec) -> Vec<Game> {
    FilterEngine::new(store).select(spec).unwrap()
}

fn store() -> SqliteStore {
    SqliteStore::open_memory().unwrap()
}

// -- Selection --

#[test]
fn insert_then_get_round_trips() {
    let store = store();
    let mut game = input("Metroid Prime", &["Action", "Adventure"], &["GameCube", "Wii"]);
    game.metacritic_score = Some(97);
    game.play_hours = 22.25;
    game.completed = true;

    let now = shelf_lib::now();
    let inserted = store.insert(game, now).unwrap();
    let fetched = store.get(&inserted.id).unwrap().unwrap();
    assert_eq!(fetched, inserted);
    assert_eq!(fetched.genres, vec!["Action", "Adventure"]);
    assert_eq!(fetched.created_at, now);
}

#[test]
fn missing_id_reads_as_none() {
    let store = store();
    assert_eq!(store.get(&GameId::new("nope")).unwrap(), None);
}

#[test]
fn empty_spec_returns_everything_newest_first() {
    let store = store();
    seed(
        &store,
        vec![
            input("First", &["RPG"], &["PC"]),
            input("Second", &["RPG"], &["PC"]),
            input("Third", &["RPG"], &["PC"]),
        ],
    );
    let games = select(&store, &FilterSpec::new());
    assert_eq!(titles(&games), vec!["Third", "Second", "First"]);
}

#[test]
fn favorite_filter_keeps_only_favorites() {
    let store = store();
    let mut fav = input("Chrono Trigger", &["RPG"], &["SNES"]);
    fav.favorite = true;
    seed(&store, vec![fav, input("Secret of Mana", &["RPG"], &["SNES"])]);

    let games = select(&store, &FilterSpec::new().with_favorite(true));
    assert_eq!(titles(&games), vec!["Chrono Trigger"]);

    let games = select(&store, &FilterSpec::new().with_favorite(false));
    assert_eq!(titles(&games), vec!["Secret of Mana"]);
}

#[test]
fn genre_filter_matches_any_listed_member() {
    let store = store();
    seed(
        &store,
        vec![
            input("A", &["RPG", "Action"], &["PC"]),
            input("B", &["Puzzle"], &["PC"]),
            input("C", &["Strategy", "RPG"], &["PC"]),
        ],
    );

    let spec = FilterSpec::new().with_genre("RPG").sorted_by("title", "asc");
    assert_eq!(titles(&select(&store, &spec)), vec!["A", "C"]);

    let spec = FilterSpec::new()
        .with_genre("Puzzle")
        .with_genre("Strategy")
        .sorted_by("title", "asc");
    assert_eq!(titles(&select(&store, &spec)), vec!["B", "C"]);
}

#[test]
fn genre_membership_is_exact() {
    let store = store();
    seed(&store, vec![input("A", &["Action RPG"], &["PC"])]);
    assert!(select(&store, &FilterSpec::new().with_genre("RPG")).is_empty());
    assert!(select(&store, &FilterSpec::new().with_genre("action rpg")).is_empty());
}

#[test]
fn platform_and_completion_combine_conjunctively() {
    let store = store();
    let mut done = input("Done", &["RPG"], &["PS1", "PC"]);
    done.completed = true;
    seed(
        &store,
        vec![done, input("Open", &["RPG"], &["PS1"]), input("Other", &["RPG"], &["N64"])],
    );

    let spec = FilterSpec::new().with_platform("PS1").with_completed(true);
    assert_eq!(titles(&select(&store, &spec)), vec!["Done"]);
}

#[test]
fn search_is_case_insensitive_across_title_developer_publisher() {
    let store = store();
    let mut by_dev = input("Breath of the Wild", &["Adventure"], &["Switch"]);
    by_dev.developer = "Zelda Team".to_string();
    let mut by_pub = input("Hyrule Warriors", &["Action"], &["Switch"]);
    by_pub.publisher = "ZELDA Publishing".to_string();
    seed(
        &store,
        vec![
            input("The Legend of Zelda", &["Adventure"], &["NES"]),
            by_dev,
            by_pub,
            input("Metroid", &["Action"], &["NES"]),
        ],
    );

    let games = select(&store, &FilterSpec::new().with_search("zelda"));
    assert_eq!(
        titles(&games),
        vec!["Hyrule Warriors", "Breath of the Wild", "The Legend of Zelda"]
    );
}

#[test]
fn search_folds_non_ascii_case() {
    let store = store();
    seed(&store, vec![input("ÖKAMI", &["Action"], &["PS2"])]);
    let games = select(&store, &FilterSpec::new().with_search("ökami"));
    assert_eq!(titles(&games), vec!["ÖKAMI"]);
}

#[test]
fn publisher_filter_is_substring_match() {
    let store = store();
    let mut sega = input("Sonic", &["Platform"], &["Genesis"]);
    sega.publisher = "Sega of America".to_string();
    seed(&store, vec![sega, input("Mario", &["Platform"], &["NES"])]);

    let games = select(&store, &FilterSpec::new().with_publisher("sega"));
    assert_eq!(titles(&games), vec!["Sonic"]);
}

#[test]
fn missing_metacritic_sorts_lowest() {
    let store = store();
    let mut a = input("Ninety", &["RPG"], &["PC"]);
    a.metacritic_score = Some(90);
    let b = input("Unscored", &["RPG"], &["PC"]);
    let mut c = input("SeventyFive", &["RPG"], &["PC"]);
    c.metacritic_score = Some(75);
    seed(&store, vec![a, b, c]);

    let desc = select(&store, &FilterSpec::new().sorted_by("metacritic_score", "desc"));
    assert_eq!(titles(&desc), vec!["Ninety", "SeventyFive", "Unscored"]);

    let asc = select(&store, &FilterSpec::new().sorted_by("metacriticScore", "asc"));
    assert_eq!(titles(&asc), vec!["Unscored", "SeventyFive", "Ninety"]);
}

#[test]
fn ties_keep_insertion_order_in_both_directions() {
    let store = store();
    seed(
        &store,
        vec![
            input("One", &["RPG"], &["PC"]),
            input("Two", &["RPG"], &["PC"]),
            input("Three", &["RPG"], &["PC"]),
        ],
    );
    let asc = select(&store, &FilterSpec::new().sorted_by("release_year", "asc"));
    assert_eq!(titles(&asc), vec!["One", "Two", "Three"]);
    let desc = select(&store, &FilterSpec::new().sorted_by("release_year", "desc"));
    assert_eq!(titles(&desc), vec!["One", "Two", "Three"]);
}

#[test]
fn unknown_sort_field_falls_back_to_created_at() {
    let store = store();
    seed(
        &store,
        vec![input("Old", &["RPG"], &["PC"]), input("New", &["RPG"], &["PC"])],
    );
    let games = select(&store, &FilterSpec::new().sorted_by("rating", "sideways"));
    assert_eq!(titles(&games), vec!["New", "Old"]);
}

#[test]
fn memory_and_sqlite_agree_on_selection() {
    let sqlite = store();
    let memory = MemoryStore::new();
    let base = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
    let inputs = vec![
        input("Zelda", &["Adventure"], &["NES"]),
        input("Metroid", &["Action", "Adventure"], &["NES", "GBA"]),
        input("Kirby", &["Platform"], &["GB"]),
        input("F-Zero", &["Racing"], &["SNES"]),
    ];
    for (i, g) in inputs.into_iter().enumerate() {
        let at = base + TimeDelta::seconds(i as i64);
        sqlite.insert(g.clone(), at).unwrap();
        memory.insert(g, at).unwrap();
    }

    let specs = [
        FilterSpec::new(),
        FilterSpec::new().with_genre("Adventure").sorted_by("title", "asc"),
        FilterSpec::new().with_platform("NES").with_search("o"),
        FilterSpec::new().with_publisher("NINTENDO").sorted_by("title", "desc"),
    ];
    for spec in &specs {
        let a = FilterEngine::new(&sqlite).select(spec).unwrap();
        let b = FilterEngine::new(&memory).select(spec).unwrap();
        assert_eq!(titles(&a), titles(&b), "mismatch for {spec:?}");
    }
}

#[test]
fn memory_and_sqlite_agree_on_every_sort() {
    let sqlite = store();
    let memory = MemoryStore::new();
    let base = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();

    let rows: [(&str, &str, i32, Option<i32>, f64, bool, bool); 5] = [
        ("Okami", "Capcom", 2006, Some(93), 40.0, true, false),
        ("Ōkami HD", "Capcom", 2012, None, 12.5, false, true),
        ("Bayonetta", "Sega", 2009, Some(90), 12.5, true, true),
        ("Vanquish", "Sega", 2010, Some(84), 6.0, false, false),
        ("Mad World", "Sega", 2009, None, 0.0, false, false),
    ];
    for (i, (title, publisher, year, score, hours, completed, favorite)) in
        rows.into_iter().enumerate()
    {
        let mut g = input(title, &["Action"], &["PS2"]);
        g.publisher = publisher.to_string();
        g.developer = "PlatinumGames".to_string();
        g.release_year = year;
        g.metacritic_score = score;
        g.play_hours = hours;
        g.completed = completed;
        g.favorite = favorite;
        let at = base + TimeDelta::seconds(i as i64);
        sqlite.insert(g.clone(), at).unwrap();
        memory.insert(g, at).unwrap();
    }

    let fields = [
        "title",
        "publisher",
        "developer",
        "release_year",
        "metacritic_score",
        "play_hours",
        "completed",
        "favorite",
        "created_at",
        "updated_at",
        "no_such_field",
    ];
    for field in fields {
        for order in ["asc", "desc", "ASC"] {
            let spec = FilterSpec::new().sorted_by(field, order);
            let a = FilterEngine::new(&sqlite).select(&spec).unwrap();
            let b = FilterEngine::new(&memory).select(&spec).unwrap();
            assert_eq!(titles(&a), titles(&b), "mismatch sorting by {field} {order}");
        }
    }

    let spec = FilterSpec::new().with_search("ŌKAMI").with_completed(false);
    assert_eq!(select(&sqlite, &spec).len(), 1);
    assert_eq!(
        StatsEngine::new(&sqlite).snapshot().unwrap(),
        StatsEngine::new(&memory).snapshot().unwrap()
    );
}

// -- Statistics --

#[test]
fn stats_on_empty_store_are_zero() {
    let store = store();
    let stats = StatsEngine::new(&store).snapshot().unwrap();
    assert_eq!(stats, StatsSnapshot::default());
}

#[test]
fn stats_count_sum_and_average() {
    let store = store();
    let mut a = input("A", &["RPG"], &["SNES"]);
    a.completed = true;
    a.favorite = true;
    a.metacritic_score = Some(90);
    a.play_hours = 40.5;
    let mut b = input("B", &["RPG", "Action"], &["SNES"]);
    b.metacritic_score = Some(85);
    b.play_hours = 10.0;
    b.release_year = 1995;
    let mut c = input("C", &["Action"], &["PC"]);
    c.play_hours = 1.5;
    c.release_year = 2010;
    seed(&store, vec![a, b, c]);

    let stats = StatsEngine::new(&store).snapshot().unwrap();
    assert_eq!(stats.total, 3);
    assert_eq!(stats.completed, 1);
    assert_eq!(stats.favorites, 1);
    assert_eq!(stats.total_play_hours, 52.0);
    assert_eq!(stats.avg_score, 88);

    let genres: Vec<(&str, u64)> = stats
        .by_genre
        .iter()
        .map(|g| (g.key.as_str(), g.count))
        .collect();
    assert_eq!(genres, vec![("RPG", 2), ("Action", 2)]);

    let platforms: Vec<(&str, u64)> = stats
        .by_platform
        .iter()
        .map(|g| (g.key.as_str(), g.count))
        .collect();
    assert_eq!(platforms, vec![("SNES", 2), ("PC", 1)]);

    let years: Vec<i32> = stats.by_year.iter().map(|g| g.key).collect();
    assert_eq!(years, vec![2010, 2000, 1995]);
}

#[test]
fn filter_options_are_sorted_and_distinct() {
    let store = store();
    let mut b = input("B", &["RPG", "Action"], &["SNES"]);
    b.publisher = "Square".to_string();
    seed(&store, vec![input("A", &["RPG"], &["PC", "SNES"]), b]);

    let options = StatsEngine::new(&store).filter_options().unwrap();
    assert_eq!(options.genres, vec!["Action", "RPG"]);
    assert_eq!(options.platforms, vec!["PC", "SNES"]);
    assert_eq!(options.publishers, vec!["Nintendo", "Square"]);
    assert_eq!(options.developers, vec!["Nintendo EAD"]);
}

// -- Mutations --

#[test]
fn toggle_favorite_twice_through_collection() {
    let shelf = Collection::new(store());
    let original = shelf.create(input("Excitebike", &["Racing"], &["NES"])).unwrap();

    let once = shelf.toggle_favorite(&original.id).unwrap();
    assert!(once.favorite);
    assert!(once.updated_at > original.updated_at);

    let twice = shelf.toggle_favorite(&original.id).unwrap();
    assert!(!twice.favorite);
    assert!(twice.updated_at > once.updated_at);
    assert_eq!(shelf.get(&original.id).unwrap(), twice);
}

#[test]
fn update_rewrites_members_and_keeps_position() {
    let store = store();
    let games = seed(
        &store,
        vec![input("First", &["RPG"], &["PC"]), input("Second", &["RPG"], &["PC"])],
    );
    let shelf = Collection::new(store);

    let update = GameUpdate {
        genres: Some(vec!["Strategy".to_string(), "Puzzle".to_string()]),
        metacritic_score: Some(Some(80)),
        ..Default::default()
    };
    let updated = shelf.update(&games[0].id, &update).unwrap();
    assert_eq!(updated.genres, vec!["Strategy", "Puzzle"]);
    assert_eq!(updated.created_at, games[0].created_at);

    let stored = shelf.get(&games[0].id).unwrap();
    assert_eq!(stored, updated);

    // Equal sort keys, so natural order decides.
    let all = shelf
        .select(&FilterSpec::new().sorted_by("completed", "asc"))
        .unwrap();
    assert_eq!(titles(&all), vec!["First", "Second"]);
}

#[test]
fn invalid_update_leaves_record_untouched() {
    let shelf = Collection::new(store());
    let game = shelf.create(input("Pikmin", &["Strategy"], &["GameCube"])).unwrap();

    let update = GameUpdate {
        title: Some("Pikmin 2".to_string()),
        metacritic_score: Some(Some(150)),
        ..Default::default()
    };
    let err = shelf.update(&game.id, &update).unwrap_err();
    assert!(matches!(err, CollectionError::Validation(_)));
    assert_eq!(shelf.get(&game.id).unwrap(), game);
}

#[test]
fn replace_and_delete_unknown_id_are_not_found() {
    let store = store();
    let mut ghost = seed(&store, vec![input("Ghost", &["RPG"], &["PC"])]).remove(0);
    store.delete(&ghost.id).unwrap();

    ghost.title = "Still a ghost".to_string();
    assert!(matches!(store.replace(&ghost), Err(StoreError::NotFound(_))));
    assert!(matches!(store.delete(&ghost.id), Err(StoreError::NotFound(_))));
}

#[test]
fn delete_removes_members_too() {
    let store = store();
    let game = seed(&store, vec![input("Gone", &["RPG"], &["PC"])]).remove(0);
    let deleted = store.delete(&game.id).unwrap();
    assert_eq!(deleted, game);

    assert_eq!(store.count(&Predicate::all()).unwrap(), 0);
    assert!(store.distinct_values(TextField::Genre).unwrap().is_empty());
    assert!(store.group_count(GroupField::Platform).unwrap().is_empty());
}

#[test]
fn collection_delete_unknown_is_not_found() {
    let shelf = Collection::new(store());
    let err = shelf.delete(&GameId::new("missing")).unwrap_err();
    assert!(matches!(err, CollectionError::NotFound(_)));
}

// -- Persistence --

#[test]
fn records_survive_reopen() {
    let tmp = tempfile::TempDir::new().unwrap();
    let path = tmp.path().join("games.db");

    let created = {
        let shelf = Collection::new(SqliteStore::open(&path).unwrap());
        let game = shelf.create(input("Earthbound", &["RPG"], &["SNES"])).unwrap();
        shelf.toggle_favorite(&game.id).unwrap()
    };

    let shelf = Collection::new(SqliteStore::open(&path).unwrap());
    let reopened = shelf.get(&created.id).unwrap();
    assert_eq!(reopened, created);
    assert!(reopened.favorite);
}
