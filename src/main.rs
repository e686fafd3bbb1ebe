/// Entry point and game loop.

mod config;
mod domain;
mod sim;
mod ui;

use std::time::{Duration, Instant};

use crossterm::event::KeyCode;

use config::GameConfig;
use domain::cell::Cell;
use sim::event::CellReached;
use sim::level::{self, load_level};
use sim::progress;
use sim::world::{GameState, Phase};
use ui::input::InputState;
use ui::renderer::Renderer;
use ui::sound::SoundEngine;

const FRAME_SLEEP: Duration = Duration::from_millis(5);

fn main() {
    let config = GameConfig::load();

    let mut world = GameState::new(&config);
    progress::load_progress(&mut world);

    // Pre-load level list for title/select screens
    world.level_names = level::level_names(&config);
    world.total_levels = world.level_names.len();

    let mut renderer = Renderer::new();

    if let Err(e) = renderer.init() {
        eprintln!("Terminal init failed: {e}");
        return;
    }

    let sound = SoundEngine::new();

    let result = game_loop(&mut world, &mut renderer, sound.as_ref(), &config);

    if let Err(e) = renderer.cleanup() {
        eprintln!("Terminal cleanup failed: {e}");
    }

    if let Err(e) = result {
        eprintln!("Game error: {e}");
    }

    println!();
    println!("Thanks for playing Beam Breach!");
}

fn game_loop(
    world: &mut GameState,
    renderer: &mut Renderer,
    sound: Option<&SoundEngine>,
    config: &GameConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut kb = InputState::new();
    let mut last_frame = Instant::now();
    let frame_time = Duration::from_millis(config.frame_ms);

    loop {
        kb.drain_events();

        if kb.ctrl_c_pressed() {
            break;
        }
        if handle_meta(world, sound, &kb, config) {
            break;
        }

        let dt_ms = last_frame.elapsed().as_secs_f32() * 1000.0;
        last_frame = Instant::now();

        if world.phase == Phase::Playing {
            let events = world.session.tick(&world.board, dt_ms);
            process_sound_events(sound, &events, world);
            world.apply_beam_events(&events);

            let was_playing = world.phase == Phase::Playing;
            world.tick_alarm(dt_ms);
            if was_playing && world.phase == Phase::Lost {
                if let Some(sfx) = sound {
                    sfx.play_lose();
                }
            }
        }

        // Message timer runs in every phase.
        if world.message_timer > 0 {
            world.message_timer -= 1;
            if world.message_timer == 0 {
                world.message.clear();
            }
        }

        renderer.render(world)?;
        let spent = last_frame.elapsed();
        if spent < frame_time {
            std::thread::sleep((frame_time - spent).max(FRAME_SLEEP));
        } else {
            std::thread::sleep(FRAME_SLEEP);
        }
    }

    Ok(())
}

fn process_sound_events(sound: Option<&SoundEngine>, events: &[CellReached], world: &GameState) {
    let sfx = match sound {
        Some(s) => s,
        None => return,
    };
    for ev in events {
        match ev.cell {
            Cell::Bomb => sfx.play_boom(),
            Cell::Alarm(_) if world.alarm_remaining_ms.is_none() => sfx.play_alarm(),
            Cell::Target(required) => {
                if required.is_none() || required == ev.color {
                    sfx.play_win();
                } else {
                    sfx.play_reject();
                }
            }
            _ => {}
        }
    }
}

// ── Key Constants ──

const KEYS_LEFT: &[KeyCode] = &[KeyCode::Left];
const KEYS_RIGHT: &[KeyCode] = &[KeyCode::Right];
const KEYS_UP: &[KeyCode] = &[KeyCode::Up];
const KEYS_DOWN: &[KeyCode] = &[KeyCode::Down];
const KEYS_SLASH: &[KeyCode] = &[KeyCode::Char('z'), KeyCode::Char('Z'), KeyCode::Char('/')];
const KEYS_BACKSLASH: &[KeyCode] = &[KeyCode::Char('x'), KeyCode::Char('X'), KeyCode::Char('\\')];
const KEYS_REMOVE: &[KeyCode] = &[KeyCode::Char('d'), KeyCode::Char('D'), KeyCode::Delete];
const KEYS_RESTART: &[KeyCode] = &[KeyCode::Char('r'), KeyCode::Char('R')];
const KEYS_CONFIRM: &[KeyCode] = &[KeyCode::Enter, KeyCode::Char(' ')];

/// Back to the title screen, keeping campaign progress and level list.
fn return_to_title(world: &mut GameState) {
    world.session.set_animating(false);
    world.phase = Phase::Title;
    world.message.clear();
    world.message_timer = 0;
}

fn handle_meta(
    world: &mut GameState,
    sound: Option<&SoundEngine>,
    kb: &InputState,
    config: &GameConfig,
) -> bool {
    let confirm = kb.any_pressed(KEYS_CONFIRM);
    let esc = kb.was_pressed(KeyCode::Esc);

    match world.phase {
        // ── Title Screen ──
        Phase::Title => {
            if confirm {
                let start = world.unlocked_up_to.min(world.total_levels.saturating_sub(1));
                load_level(world, start, config);
            } else if kb.any_pressed(&[KeyCode::Char('l'), KeyCode::Char('L')]) {
                world.phase = Phase::LevelSelect;
                world.select_cursor = world.unlocked_up_to.min(world.total_levels.saturating_sub(1));
            } else if kb.any_pressed(&[KeyCode::Char('q'), KeyCode::Char('Q')]) || esc {
                return true;
            }
        }

        // ── Level Select ──
        Phase::LevelSelect => {
            let total = world.total_levels;
            if total == 0 {
                return_to_title(world);
                return false;
            }

            if kb.was_pressed(KeyCode::Up) {
                world.select_cursor = world.select_cursor.saturating_sub(1);
            } else if kb.was_pressed(KeyCode::Down) {
                world.select_cursor = (world.select_cursor + 1).min(total - 1);
            } else if confirm {
                if world.select_cursor <= world.unlocked_up_to {
                    let picked = world.select_cursor;
                    load_level(world, picked, config);
                } else {
                    world.set_message("That vault is still sealed", 40);
                }
            } else if esc {
                return_to_title(world);
            }
        }

        // ── Briefing ──
        Phase::Briefing => {
            if confirm {
                world.phase = Phase::Playing;
            } else if esc {
                return_to_title(world);
            }
        }

        // ── Playing ──
        Phase::Playing => {
            if kb.any_pressed(KEYS_UP) {
                world.move_cursor(-1, 0);
            }
            if kb.any_pressed(KEYS_DOWN) {
                world.move_cursor(1, 0);
            }
            if kb.any_pressed(KEYS_LEFT) {
                world.move_cursor(0, -1);
            }
            if kb.any_pressed(KEYS_RIGHT) {
                world.move_cursor(0, 1);
            }

            let (r, c) = world.cursor;
            if kb.any_pressed(KEYS_SLASH) {
                world.place_mirror(r, c, Cell::MirrorSlash);
                if let Some(sfx) = sound {
                    sfx.play_place();
                }
            } else if kb.any_pressed(KEYS_BACKSLASH) {
                world.place_mirror(r, c, Cell::MirrorBackslash);
                if let Some(sfx) = sound {
                    sfx.play_place();
                }
            } else if kb.any_pressed(KEYS_REMOVE) {
                world.remove_mirror(r, c);
            } else if kb.any_pressed(KEYS_RESTART) {
                world.restart_level();
            } else if esc {
                return_to_title(world);
            }
        }

        // ── Won ──
        Phase::Won => {
            if confirm {
                let _ = progress::save_progress(world);
                let next = world.current_level + 1;
                load_level(world, next, config);
            } else if esc {
                let _ = progress::save_progress(world);
                return_to_title(world);
            }
        }

        // ── Lost ──
        Phase::Lost => {
            if confirm || kb.any_pressed(KEYS_RESTART) {
                world.restart_level();
            } else if esc {
                return_to_title(world);
            }
        }

        // ── Game Complete ──
        Phase::GameComplete => {
            if confirm || esc {
                let _ = progress::save_progress(world);
                return_to_title(world);
            }
        }
    }

    false
}
