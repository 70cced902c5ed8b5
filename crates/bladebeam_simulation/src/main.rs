//! Headless симуляция Bladebeam
//!
//! Запускает Bevy App без рендера: Level1, игрок стоит на месте и машет
//! мечом раз в секунду, limit-способности жмёт по расписанию.
//!
//! Использование: `bladebeam_simulation [seed] [config.ron]`

use bevy::input::ButtonInput;
use bevy::prelude::*;

use bladebeam_simulation::logger::{set_log_level, LogLevel};
use bladebeam_simulation::{
    create_headless_app, init_logger, log_error, step_fixed, CurrentLevel, GameAction, GameplayConfig,
    HeadlessPhysicsPlugin, HudState, Level, LevelTransition, SessionState, SimulationPlugin,
};

const MAX_TICKS: u32 = 60 * 60 * 3;

fn main() {
    init_logger();
    // Debug-лог каждого удара слишком шумный для 10k тиков
    set_log_level(LogLevel::Info);

    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|arg| arg.parse().ok()).unwrap_or(42);

    let config = match args.next() {
        Some(path) => match GameplayConfig::load(&path) {
            Ok(config) => config,
            Err(err) => {
                log_error(&format!("Failed to load config {}: {}", path, err));
                std::process::exit(1);
            }
        },
        None => GameplayConfig::default(),
    };

    println!("Starting Bladebeam headless simulation (seed: {})", seed);

    let mut app = create_headless_app(seed);
    app.insert_resource(config)
        .add_plugins((SimulationPlugin, HeadlessPhysicsPlugin));

    app.world_mut()
        .send_event(LevelTransition::start(Level::Level1));
    step_fixed(&mut app, 1);

    for tick in 1..=MAX_TICKS {
        drive_input(&mut app, tick);
        step_fixed(&mut app, 1);

        let level = app.world().resource::<CurrentLevel>().0;
        if tick % 100 == 0 {
            let session = app.world().resource::<SessionState>();
            let hud = app.world().resource::<HudState>();
            println!(
                "Tick {}: {} | enemies {} | HP {}/{} | limit {:.0}%",
                tick,
                level.name(),
                session.enemy_count,
                hud.health,
                hud.max_health,
                hud.limit_fraction() * 100.0
            );
        }

        if level == Level::Main {
            println!("All levels cleared at tick {}", tick);
            break;
        }
    }

    println!("Simulation complete!");
}

/// Скриптованный "игрок"
///
/// Удар раз в секунду: клип Chop короче секунды, меч успевает выключиться,
/// и следующий взмах даёт новый overlap.
fn drive_input(app: &mut App, tick: u32) {
    let mut input = app.world_mut().resource_mut::<ButtonInput<GameAction>>();

    input.release_all();
    if tick % 60 == 0 {
        input.press(GameAction::Attack);
    }
    if tick % 240 == 30 {
        input.press(GameAction::LimitBreak);
    }
    if tick % 240 == 150 {
        input.press(GameAction::Shoot);
    }
}
