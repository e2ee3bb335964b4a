//! Integration test for terminal rendering after moves.

use cytale::{
    CytaleResult, Direction, GameConfig, Level, Location, Player, SpawnCounter, TerminalDisplay,
};

fn load(rows: &[&str]) -> CytaleResult<Level> {
    Level::load(
        rows,
        Player::new("TestPlayer", 5),
        &GameConfig::new(12345),
        &mut SpawnCounter::new(),
    )
}

#[test]
fn test_render_follows_player_and_coins() -> CytaleResult<()> {
    let mut level = load(&["#.#", "#1#", "#*#"])?;
    assert_eq!(TerminalDisplay::render_map(&level), "# C # \n# 1 # \n# * # \n");

    level.move_player(Direction::Top);
    assert_eq!(TerminalDisplay::render_map(&level), "# 1 # \n#   # \n# * # \n");
    Ok(())
}

#[test]
fn test_render_draws_monsters_over_terrain() -> CytaleResult<()> {
    let level = load(&["1 R"])?;
    let map = TerminalDisplay::render_map(&level);
    assert_eq!(map, "1   R \n");
    assert_eq!(
        TerminalDisplay::symbol_at(&level, Location::new(2, 0)),
        'R'
    );
    Ok(())
}

#[test]
fn test_frame_shows_event_messages() -> CytaleResult<()> {
    let mut level = load(&["#####", "#1R##", "#####"])?;
    let mut display = TerminalDisplay::new();

    let events = level.move_player(Direction::Right);
    display.add_events(&events);

    let frame = display.render_frame(&level);
    assert!(frame.contains("MONSTER0 attacked Player! Player health is now 4"));
    assert!(frame.contains("TestPlayer : 0 pt | health 4"));
    Ok(())
}
