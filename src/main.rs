//=========================================================================
// Aetheric Arcade — Demo Binary
//
// Opens the window on the title screen. Enter starts, WASD/arrows move,
// Space fires, Escape/P pauses, R restarts after the round ends.
//
// HUD values are reported through the log (target "hud").
//
//=========================================================================

use aetheric_arcade::core::notify::Notification;
use aetheric_arcade::core::session::SessionConfig;
use aetheric_arcade::EngineBuilder;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Aetheric Arcade starting...");

    EngineBuilder::new()
        .with_tps(60.0)
        .with_session_config(SessionConfig::default().with_debug_mode(cfg!(debug_assertions)))
        .build()
        .init(|game| {
            game.session_mut().notifications().subscribe_all(|n| match n {
                Notification::GameOver => log::info!(target: "hud", "GAME OVER"),
                Notification::LevelComplete => log::info!(target: "hud", "LEVEL COMPLETE"),
                Notification::TimeChanged(t) => log::trace!(target: "hud", "time {:.1}", t),
                other => log::info!(target: "hud", "{:?}", other),
            });
        })
        .run();
}
