use quotebook_core::db::migrations::apply_migrations;
use quotebook_core::db::open_db_in_memory;
use quotebook_core::{Quote, QuoteRepository, SqliteQuoteRepository};
use rusqlite::Connection;

fn seed(repo: &SqliteQuoteRepository<'_>) -> Vec<Quote> {
    [
        ("Be water, my friend", "Bruce Lee", "wisdom"),
        ("The unexamined life is not worth living", "Socrates", "philosophy"),
        ("100% effort, 0_excuses", "Coach", "sport"),
    ]
    .into_iter()
    .map(|(text, author, category)| repo.save(&Quote::new(text, author, category)).unwrap())
    .collect()
}

fn texts(quotes: &[Quote]) -> Vec<&str> {
    quotes.iter().map(|quote| quote.text.as_str()).collect()
}

#[test]
fn search_matches_text_substring_case_insensitively() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteQuoteRepository::try_new(&conn).unwrap();
    seed(&repo);

    let hits = repo.search("WATER").unwrap();
    assert_eq!(texts(&hits), ["Be water, my friend"]);

    let hits = repo.search("examined LIFE").unwrap();
    assert_eq!(texts(&hits), ["The unexamined life is not worth living"]);
}

#[test]
fn search_matches_author_substring() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteQuoteRepository::try_new(&conn).unwrap();
    let seeded = seed(&repo);

    let hits = repo.search("socr").unwrap();
    assert_eq!(hits, vec![seeded[1].clone()]);
}

#[test]
fn search_folds_case_beyond_ascii() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteQuoteRepository::try_new(&conn).unwrap();
    let stored = repo
        .save(&Quote::new("Über alles", "Émile Zola", "x"))
        .unwrap();
    let greek = repo
        .save(&Quote::new("ΓΝΩΘΙ ΣΑΥΤΟΝ", "Delphi", "wisdom"))
        .unwrap();

    assert_eq!(repo.search("über").unwrap(), vec![stored.clone()]);
    assert_eq!(repo.search("ÜBER").unwrap(), vec![stored.clone()]);
    assert_eq!(repo.search("émile zola").unwrap(), vec![stored]);
    assert_eq!(repo.search("γνωθι").unwrap(), vec![greek]);
}

#[test]
fn repository_on_externally_migrated_connection_can_search() {
    let mut conn = Connection::open_in_memory().unwrap();
    apply_migrations(&mut conn).unwrap();
    let repo = SqliteQuoteRepository::try_new(&conn).unwrap();
    let stored = repo.save(&Quote::new("Ärger", "", "")).unwrap();

    assert_eq!(repo.search("ärger").unwrap(), vec![stored]);
}

#[test]
fn search_treats_like_wildcards_literally() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteQuoteRepository::try_new(&conn).unwrap();
    seed(&repo);

    assert_eq!(texts(&repo.search("%").unwrap()), ["100% effort, 0_excuses"]);
    assert_eq!(texts(&repo.search("0_e").unwrap()), ["100% effort, 0_excuses"]);
    assert!(repo.search("b_ water").unwrap().is_empty());
}

#[test]
fn search_without_matches_returns_empty() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteQuoteRepository::try_new(&conn).unwrap();
    seed(&repo);

    assert!(repo.search("nonexistent phrase").unwrap().is_empty());
}

#[test]
fn search_reflects_updated_content() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteQuoteRepository::try_new(&conn).unwrap();
    let mut quote = repo.save(&Quote::new("alpha text", "", "")).unwrap();

    quote.text = "beta text".to_string();
    repo.save(&quote).unwrap();

    assert!(repo.search("alpha").unwrap().is_empty());
    assert_eq!(repo.search("beta").unwrap(), vec![quote]);
}

#[test]
fn injection_payloads_are_matched_as_plain_text() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteQuoteRepository::try_new(&conn).unwrap();
    let seeded = seed(&repo);

    for payload in [
        "'; DROP TABLE quotes; --",
        "' OR '1'='1",
        "\") OR 1=1 --",
        "x' UNION SELECT 1, sql, name, type FROM sqlite_master --",
    ] {
        assert!(repo.search(payload).unwrap().is_empty(), "payload {payload}");
    }

    assert_eq!(repo.find_all().unwrap(), seeded);
    assert!(table_exists(&conn, "quotes"));
}

fn table_exists(conn: &Connection, name: &str) -> bool {
    conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1);",
        [name],
        |row| row.get::<_, i64>(0),
    )
    .unwrap()
        == 1
}
