use super::*;

#[test]
fn missing_file_gives_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let settings = load_settings_from(&dir.path().join("nope.toml"));
    assert_eq!(settings, ShopSettings::default());
    assert_eq!(settings.initial_code(), TicketCode::INITIAL);
}

#[test]
fn corrupt_file_gives_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.toml");
    std::fs::write(&path, "[database\npath = ").unwrap();
    assert_eq!(load_settings_from(&path), ShopSettings::default());
}

#[test]
fn partial_file_fills_in_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.toml");
    std::fs::write(&path, "[database]\npath = \"/srv/store.db\"\n").unwrap();

    let settings = load_settings_from(&path);
    assert_eq!(settings.database.path, Some(PathBuf::from("/srv/store.db")));
    assert_eq!(settings.tickets.initial_code, "A000");
}

#[test]
fn save_then_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("settings.toml");
    let settings = ShopSettings {
        database: DatabaseSettings {
            path: Some(PathBuf::from("/tmp/shop.db")),
        },
        tickets: TicketSettings {
            initial_code: "C120".to_string(),
        },
    };

    save_settings_to(&path, &settings).unwrap();
    assert!(!path.with_extension("toml.tmp").exists());
    let loaded = load_settings_from(&path);
    assert_eq!(loaded, settings);
    assert_eq!(loaded.initial_code().to_string(), "C120");
}

#[test]
fn malformed_seed_falls_back() {
    let settings = ShopSettings {
        tickets: TicketSettings {
            initial_code: "zz".to_string(),
        },
        ..Default::default()
    };
    assert_eq!(settings.initial_code(), TicketCode::INITIAL);
}

#[test]
fn cli_override_wins() {
    let settings = ShopSettings {
        database: DatabaseSettings {
            path: Some(PathBuf::from("/from/settings.db")),
        },
        ..Default::default()
    };
    assert_eq!(
        resolve_database_path(Some(PathBuf::from("/from/cli.db")), &settings),
        PathBuf::from("/from/cli.db")
    );
    assert_eq!(
        resolve_database_path(None, &settings),
        PathBuf::from("/from/settings.db")
    );
    assert_eq!(
        resolve_database_path(None, &ShopSettings::default()),
        default_database_path()
    );
}
