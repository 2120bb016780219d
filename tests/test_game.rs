use platform_quest::config::{GameConfig, Variant};
use platform_quest::game::GameContext;
use platform_quest::geometry::Rect;
use platform_quest::input::{InputSnapshot, InputState, Key};
use platform_quest::levels::LevelIndex;
use platform_quest::overworld::Overworld;
use platform_quest::render::{self, DrawCmd};
use platform_quest::screen::{transition, Screen, ScreenEvent, Transition};
use platform_quest::terrain::SolidMap;

fn level(n: u8) -> LevelIndex {
    LevelIndex::new(n).expect("valid level")
}

fn new_game(variant: Variant, start: LevelIndex) -> GameContext {
    GameContext::new(GameConfig::for_variant(variant), start, 7)
}

/// Press and release `key` over two frames.
fn press(ctx: &mut GameContext, key: Key) {
    ctx.update(InputSnapshot::default().with(key));
    ctx.update(InputSnapshot::default());
}

/// Drop the player into the first clear spot inside the goal and run one
/// frame. Invulnerable so nearby enemies can't interfere.
fn reach_goal(ctx: &mut GameContext) {
    let world = ctx.world.as_mut().expect("a level is loaded");
    let goal = world.level.goal;
    let (w, h) = (world.player.body.rect.w, world.player.body.rect.h);
    let x = (goal.center_x() - w / 2.0).clamp(0.0, world.level.width - w);
    let y = (goal.top() as i32..=(goal.bottom() - h) as i32)
        .map(|y| y as f32)
        .find(|&y| {
            let mut hits = Vec::new();
            world
                .level
                .terrain
                .solids_overlapping(&Rect::new(x, y, w, h), &mut hits);
            hits.is_empty()
        })
        .expect("room to stand inside the goal");
    let body = &mut world.player.body;
    body.rect.x = x;
    body.rect.y = y;
    body.vx = 0.0;
    body.vy = 0.0;
    ctx.progress.invulnerable = 1000;
    ctx.update(InputSnapshot::default());
}

// ── Screen transitions ────────────────────────────────────────────────────────

#[test]
fn transition_table() {
    let l1 = LevelIndex::FIRST;
    use Screen::*;
    assert_eq!(transition(Title, ScreenEvent::Confirm, l1), Transition::Goto(Map));
    assert_eq!(transition(Map, ScreenEvent::Confirm, l1), Transition::Goto(Playing));
    assert_eq!(transition(Playing, ScreenEvent::GoalReached, l1), Transition::Goto(LevelComplete));
    assert_eq!(transition(Playing, ScreenEvent::OutOfLives, l1), Transition::Goto(GameOver));
    assert_eq!(transition(LevelComplete, ScreenEvent::Confirm, l1), Transition::Goto(Map));
    assert_eq!(
        transition(LevelComplete, ScreenEvent::Confirm, LevelIndex::LAST),
        Transition::Goto(Win)
    );
    assert_eq!(transition(GameOver, ScreenEvent::Confirm, l1), Transition::Goto(Title));
    assert_eq!(transition(Win, ScreenEvent::Confirm, l1), Transition::Goto(Title));
}

#[test]
fn quit_leaves_from_any_screen() {
    for screen in [
        Screen::Title,
        Screen::Map,
        Screen::Playing,
        Screen::LevelComplete,
        Screen::GameOver,
        Screen::Win,
    ] {
        assert_eq!(transition(screen, ScreenEvent::Quit, LevelIndex::FIRST), Transition::Quit);
    }
}

#[test]
fn unrelated_events_stay_put() {
    let l1 = LevelIndex::FIRST;
    assert_eq!(transition(Screen::Playing, ScreenEvent::Confirm, l1), Transition::Stay);
    assert_eq!(transition(Screen::Title, ScreenEvent::GoalReached, l1), Transition::Stay);
    assert_eq!(transition(Screen::Map, ScreenEvent::OutOfLives, l1), Transition::Stay);
}

// ── Overworld ─────────────────────────────────────────────────────────────────

#[test]
fn fresh_map_opens_only_the_first_node() {
    let map = Overworld::new();
    assert_eq!(map.nodes().len(), 32);
    assert!(map.node(LevelIndex::FIRST).unlocked);
    assert!(!map.node(level(2)).unlocked);
    assert_eq!(map.selected(), LevelIndex::FIRST);
    assert_eq!(map.completed_count(), 0);
}

#[test]
fn selection_skips_locked_nodes() {
    let mut map = Overworld::new();
    map.move_selection(1);
    assert_eq!(map.selected(), LevelIndex::FIRST);
    map.move_selection(-1);
    assert_eq!(map.selected(), LevelIndex::FIRST);
}

#[test]
fn completing_a_level_unlocks_and_selects_the_next() {
    let mut map = Overworld::new();
    map.complete_level(LevelIndex::FIRST);
    assert!(map.node(LevelIndex::FIRST).completed);
    assert!(map.node(level(2)).unlocked);
    assert_eq!(map.selected(), level(2));
    map.move_selection(-1);
    assert_eq!(map.selected(), LevelIndex::FIRST);
    assert_eq!(map.completed_count(), 1);

    map.complete_level(LevelIndex::LAST);
    assert_eq!(map.completed_count(), 2);
}

#[test]
fn starting_part_way_unlocks_the_earlier_nodes() {
    let map = Overworld::starting_at(level(5));
    assert_eq!(map.selected(), level(5));
    assert!(map.node(level(4)).unlocked);
    assert!(!map.node(level(6)).unlocked);
}

// ── Input edges ───────────────────────────────────────────────────────────────

#[test]
fn pressed_and_released_are_single_frame_edges() {
    let mut input = InputState::default();
    input.advance(InputSnapshot::default().with(Key::Jump));
    assert!(input.pressed(Key::Jump) && input.held(Key::Jump));
    input.advance(InputSnapshot::default().with(Key::Jump));
    assert!(!input.pressed(Key::Jump) && input.held(Key::Jump));
    input.advance(InputSnapshot::default());
    assert!(input.released(Key::Jump) && !input.held(Key::Jump));
    input.advance(InputSnapshot::default());
    assert!(!input.released(Key::Jump));
}

#[test]
fn opposite_directions_cancel() {
    let mut input = InputState::default();
    input.advance([Key::Left, Key::Right].into_iter().collect());
    assert_eq!(input.axis(), 0.0);
    input.advance(InputSnapshot::default().with(Key::Left));
    assert_eq!(input.axis(), -1.0);
}

// ── GameContext ───────────────────────────────────────────────────────────────

#[test]
fn title_to_map_to_playing() {
    let mut ctx = new_game(Variant::Classic, LevelIndex::FIRST);
    assert_eq!(ctx.screen, Screen::Title);
    press(&mut ctx, Key::Confirm);
    assert_eq!(ctx.screen, Screen::Map);
    assert!(ctx.world.is_none());
    press(&mut ctx, Key::Confirm);
    assert_eq!(ctx.screen, Screen::Playing);
    let world = ctx.world.as_ref().expect("level loaded");
    assert_eq!(world.level.index, LevelIndex::FIRST);
    assert_eq!(ctx.progress.lives, 3);
}

#[test]
fn held_confirm_does_not_skip_screens() {
    let mut ctx = new_game(Variant::Arcade, LevelIndex::FIRST);
    let confirm = InputSnapshot::default().with(Key::Confirm);
    ctx.update(confirm);
    ctx.update(confirm);
    ctx.update(confirm);
    assert_eq!(ctx.screen, Screen::Map);
}

#[test]
fn finishing_a_level_returns_to_the_map_with_the_next_unlocked() {
    let mut ctx = new_game(Variant::Classic, LevelIndex::FIRST);
    press(&mut ctx, Key::Confirm);
    press(&mut ctx, Key::Confirm);
    reach_goal(&mut ctx);
    assert_eq!(ctx.screen, Screen::LevelComplete);
    assert!(ctx.progress.score >= ctx.config.rules.goal_reward);

    press(&mut ctx, Key::Confirm);
    assert_eq!(ctx.screen, Screen::Map);
    assert!(ctx.world.is_none());
    assert!(ctx.overworld.node(LevelIndex::FIRST).completed);
    assert_eq!(ctx.overworld.selected(), level(2));

    press(&mut ctx, Key::Confirm);
    assert_eq!(ctx.world.as_ref().map(|w| w.level.index), Some(level(2)));
}

#[test]
fn finishing_the_last_level_wins() {
    let mut ctx = new_game(Variant::Deluxe, LevelIndex::LAST);
    press(&mut ctx, Key::Confirm);
    press(&mut ctx, Key::Confirm);
    assert_eq!(ctx.current_level(), LevelIndex::LAST);
    reach_goal(&mut ctx);
    assert_eq!(ctx.screen, Screen::LevelComplete);
    press(&mut ctx, Key::Confirm);
    assert_eq!(ctx.screen, Screen::Win);
    press(&mut ctx, Key::Confirm);
    assert_eq!(ctx.screen, Screen::Title);
}

#[test]
fn losing_the_last_life_is_game_over_and_a_new_game_resets() {
    let mut ctx = new_game(Variant::Classic, LevelIndex::FIRST).with_lives(1);
    press(&mut ctx, Key::Confirm);
    press(&mut ctx, Key::Confirm);
    {
        let world = ctx.world.as_mut().expect("level loaded");
        world.player.body.rect.y = world.level.height + 1000.0;
    }
    ctx.update(InputSnapshot::default());
    assert_eq!(ctx.screen, Screen::GameOver);
    assert_eq!(ctx.progress.lives, 0);

    press(&mut ctx, Key::Confirm);
    assert_eq!(ctx.screen, Screen::Title);
    press(&mut ctx, Key::Confirm);
    assert_eq!(ctx.progress.lives, 1);
    assert_eq!(ctx.progress.score, 0);
}

#[test]
fn map_selection_follows_direction_keys() {
    let mut ctx = new_game(Variant::Arcade, level(3));
    press(&mut ctx, Key::Confirm);
    press(&mut ctx, Key::Left);
    assert_eq!(ctx.overworld.selected(), level(2));
    press(&mut ctx, Key::Right);
    press(&mut ctx, Key::Right);
    assert_eq!(ctx.overworld.selected(), level(3));
}

#[test]
fn map_selection_also_follows_up_and_down() {
    let mut ctx = new_game(Variant::Deluxe, level(3));
    press(&mut ctx, Key::Confirm);
    press(&mut ctx, Key::Up);
    assert_eq!(ctx.overworld.selected(), level(2));
    press(&mut ctx, Key::Down);
    assert_eq!(ctx.overworld.selected(), level(3));
    assert_eq!(ctx.screen, Screen::Map);
}

#[test]
fn quit_key_stops_the_game() {
    let mut ctx = new_game(Variant::Classic, LevelIndex::FIRST);
    press(&mut ctx, Key::Confirm);
    assert!(ctx.is_running());
    ctx.update(InputSnapshot::default().with(Key::Quit));
    assert!(!ctx.is_running());
}

// ── Rendering ─────────────────────────────────────────────────────────────────

#[test]
fn every_screen_draws_something() {
    for variant in [Variant::Classic, Variant::Arcade, Variant::Deluxe] {
        let mut ctx = new_game(variant, LevelIndex::LAST);
        let mut seen = Vec::new();
        let mut check = |ctx: &GameContext| {
            let frame = render::frame(ctx);
            assert!(matches!(frame.commands.first(), Some(DrawCmd::Fill(_))));
            assert!(frame.commands.len() > 1, "{variant:?} {:?}", ctx.screen);
            seen.push(ctx.screen);
        };
        check(&ctx);
        press(&mut ctx, Key::Confirm);
        check(&ctx);
        press(&mut ctx, Key::Confirm);
        check(&ctx);
        reach_goal(&mut ctx);
        check(&ctx);
        press(&mut ctx, Key::Confirm);
        check(&ctx);
        assert_eq!(
            seen,
            vec![Screen::Title, Screen::Map, Screen::Playing, Screen::LevelComplete, Screen::Win]
        );
    }
}

#[test]
fn game_over_screen_draws_something() {
    let mut ctx = new_game(Variant::Arcade, LevelIndex::FIRST).with_lives(1);
    press(&mut ctx, Key::Confirm);
    press(&mut ctx, Key::Confirm);
    if let Some(world) = ctx.world.as_mut() {
        world.player.body.rect.y = world.level.height + 1000.0;
    }
    ctx.update(InputSnapshot::default());
    assert_eq!(ctx.screen, Screen::GameOver);
    assert!(render::frame(&ctx).commands.len() > 1);
}
