//! Tests for the configuration module.

use super::*;

#[test]
fn test_default_config() {
    let config = CentralConfig::default();
    assert_eq!(config.common.log_level, "info");
    assert_eq!(config.board.rows, 6);
    assert_eq!(config.board.cols, 7);
    assert_eq!(config.engine.time_budget_secs, 3);
    assert_eq!(config.engine.final_move, "uct");
    assert_eq!(config.game.first_player, "ask");
}

#[test]
fn test_zero_means_unset() {
    let mut engine = EngineConfig::default();
    assert_eq!(engine.iteration_cap(), None);
    assert_eq!(engine.fixed_seed(), None);

    engine.max_iterations = 500;
    engine.seed = 42;
    assert_eq!(engine.iteration_cap(), Some(500));
    assert_eq!(engine.fixed_seed(), Some(42));
}

#[test]
fn test_parse_config_toml() {
    let toml_content = r#"
[common]
log_level = "debug"

[board]
rows = 8
cols = 9

[engine]
time_budget_secs = 10
max_iterations = 20000
seed = 7
final_move = "most_visited"

[game]
first_player = "engine"
"#;
    let config: CentralConfig = toml::from_str(toml_content).unwrap();
    assert_eq!(config.common.log_level, "debug");
    assert_eq!(config.board.rows, 8);
    assert_eq!(config.board.cols, 9);
    assert_eq!(config.engine.time_budget_secs, 10);
    assert_eq!(config.engine.iteration_cap(), Some(20000));
    assert_eq!(config.engine.fixed_seed(), Some(7));
    assert_eq!(config.engine.final_move, "most_visited");
    assert_eq!(config.game.first_player, "engine");
}

#[test]
fn test_partial_config() {
    let toml_content = r#"
[engine]
time_budget_secs = 1
"#;
    let config: CentralConfig = toml::from_str(toml_content).unwrap();
    assert_eq!(config.engine.time_budget_secs, 1);
    assert_eq!(config.engine.final_move, "uct"); // Default
    assert_eq!(config.board.cols, 7); // Default
    assert_eq!(config.game.first_player, "ask"); // Default
}

#[test]
fn test_load_from_path() {
    let path = std::env::temp_dir().join(format!("dropfour-config-{}.toml", std::process::id()));
    std::fs::write(&path, "[board]\nrows = 5\n\n[engine]\nmax_iterations = 300\n").unwrap();

    let config = load_from_path(&path);
    assert_eq!(config.board.rows, 5);
    assert_eq!(config.engine.iteration_cap(), Some(300));

    std::fs::remove_file(&path).unwrap();
}

#[test]
fn test_unreadable_or_invalid_file_falls_back_to_defaults() {
    let missing = std::env::temp_dir().join("dropfour-does-not-exist.toml");
    let config = load_from_path(&missing);
    assert_eq!(config.board.rows, 6);

    let path = std::env::temp_dir().join(format!("dropfour-bad-{}.toml", std::process::id()));
    std::fs::write(&path, "[board\nrows = ").unwrap();
    let config = load_from_path(&path);
    assert_eq!(config.board.rows, 6);
    std::fs::remove_file(&path).unwrap();
}

// Env vars are process-wide, so every override check lives in one test
#[test]
fn test_dropfour_env_overrides() {
    std::env::set_var("DROPFOUR_ENGINE_TIME_BUDGET_SECS", "9");
    std::env::set_var("DROPFOUR_ENGINE_FINAL_MOVE", "max_win_rate");
    std::env::set_var("DROPFOUR_ENGINE_SEED", "not-a-number");
    std::env::set_var("DROPFOUR_BOARD_COLS", "9");
    std::env::set_var("DROPFOUR_GAME_FIRST_PLAYER", "human");

    let config = load_config();
    assert_eq!(config.engine.time_budget_secs, 9);
    assert_eq!(config.engine.final_move, "max_win_rate");
    // Unparsable values are ignored
    assert_eq!(config.engine.seed, 0);
    assert_eq!(config.board.cols, 9);
    assert_eq!(config.game.first_player, "human");

    std::env::remove_var("DROPFOUR_ENGINE_TIME_BUDGET_SECS");
    std::env::remove_var("DROPFOUR_ENGINE_FINAL_MOVE");
    std::env::remove_var("DROPFOUR_ENGINE_SEED");
    std::env::remove_var("DROPFOUR_BOARD_COLS");
    std::env::remove_var("DROPFOUR_GAME_FIRST_PLAYER");
}

#[test]
fn test_config_clone() {
    let config = CentralConfig::default();
    let cloned = config.clone();
    assert_eq!(config.board.rows, cloned.board.rows);
    assert_eq!(config.engine.final_move, cloned.engine.final_move);
}
