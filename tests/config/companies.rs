use clap::Parser;
use insider_screener::cli::{self, Cli};
use insider_screener::companies::{default_companies, select};
use insider_screener::{IsError, Settings};

#[test]
fn default_list_has_twelve_unique_slugs() {
    let all = default_companies();
    assert_eq!(all.len(), 12);
    let mut slugs: Vec<&str> = all.iter().map(|c| c.slug.as_str()).collect();
    slugs.sort_unstable();
    slugs.dedup();
    assert_eq!(slugs.len(), 12);
    assert_eq!(all[0].slug, "afry-ab");
}

#[test]
fn select_keeps_tracked_order() {
    let all = default_companies();
    let picked = select(&all, &["bouvet-asa".into(), "afry-ab".into()]).unwrap();
    let slugs: Vec<&str> = picked.iter().map(|c| c.slug.as_str()).collect();
    assert_eq!(slugs, ["afry-ab", "bouvet-asa"]);
}

#[test]
fn select_rejects_unknown_slugs() {
    let all = default_companies();
    let err = select(&all, &["afry-ab".into(), "nope".into(), "also-nope".into()]).unwrap_err();
    match err {
        IsError::Config(msg) => {
            assert!(msg.starts_with("Unknown company slugs:"));
            assert!(msg.contains("nope"));
            assert!(msg.contains("also-nope"));
        }
        other => panic!("expected Config error, got {other:?}"),
    }
}

#[test]
fn cli_requires_exactly_one_mode() {
    assert!(Cli::try_parse_from(["insider-screener"]).is_err());
    assert!(Cli::try_parse_from(["insider-screener", "--all", "--list"]).is_err());
    assert!(Cli::try_parse_from(["insider-screener", "--companies"]).is_err());

    let cli =
        Cli::try_parse_from(["insider-screener", "--companies", "afry-ab", "eqt-ab"]).unwrap();
    assert_eq!(cli.companies, ["afry-ab", "eqt-ab"]);
    assert!(!cli.all && !cli.list);
}

#[test]
fn cli_overrides_apply_to_settings() {
    let cli = Cli::try_parse_from([
        "insider-screener",
        "--all",
        "--data-dir",
        "/srv/insiders",
        "--max-change-history",
        "10",
    ])
    .unwrap();
    let mut settings = Settings::default();
    cli.apply(&mut settings).unwrap();
    assert_eq!(settings.storage.base_dir, std::path::PathBuf::from("/srv/insiders"));
    assert_eq!(settings.storage.max_change_history, 10);

    let cli =
        Cli::try_parse_from(["insider-screener", "--all", "--max-change-history", "0"]).unwrap();
    assert!(cli.apply(&mut Settings::default()).is_err());
}

fn broken_settings() -> Result<Settings, IsError> {
    Err(IsError::Config("MAX_CHANGE_HISTORY must be a number".into()))
}

#[tokio::test]
async fn list_does_not_load_settings() {
    let cli = Cli::try_parse_from(["insider-screener", "--list"]).unwrap();
    let out = cli::execute(cli, broken_settings).await.unwrap();
    assert!(out.is_none());
}

#[tokio::test]
async fn tracking_fails_on_broken_settings() {
    let cli = Cli::try_parse_from(["insider-screener", "--all"]).unwrap();
    let err = cli::execute(cli, broken_settings).await.unwrap_err();
    assert!(err.to_string().contains("MAX_CHANGE_HISTORY"), "{err}");
}
