//! Scripted demo: one minute of play driven by a canned emotion script

use pulse_core::math::Vec2;
use pulse_emotion::event::EmotionLabel;
use pulse_game::config::GameConfig;
use pulse_game::world::{GameWorld, WorldEvent};

const DT: f32 = 1.0 / 60.0;

fn main() {
    env_logger::init();

    let config = GameConfig::default();
    let mut world = GameWorld::new(config, 42);
    world.set_player_pos(Vec2::new(0.0, 0.0));
    world.spawn_enemy(Vec2::new(5.0, 0.0));
    world.spawn_enemy(Vec2::new(-8.0, 0.0));

    // (time, label) pairs pushed into the feed as the minute plays out
    let script = [
        (5.0, EmotionLabel::Excited),
        (15.0, EmotionLabel::Happy),
        (25.0, EmotionLabel::Anxious),
        (35.0, EmotionLabel::Sad),
        (50.0, EmotionLabel::Calm),
    ];
    let mut next = 0;

    let mut elapsed = 0.0f32;
    while elapsed < 60.0 {
        if next < script.len() && elapsed >= script[next].0 {
            world.feed_mut().emit(script[next].1, None);
            next += 1;
        }
        for event in world.tick(DT) {
            report(&world, &event);
        }
        elapsed += DT;
    }

    log::info!(
        "demo over: {} HP, {} enemies left, {:?} playing",
        world.player_health().current(),
        world.enemies().len(),
        world.music().active_track()
    );
}

fn report(world: &GameWorld, event: &WorldEvent) {
    match event {
        WorldEvent::Emotion(e) => log::info!("emotion: {} ({:.2})", e.label, e.confidence),
        WorldEvent::Combat(c) => log::info!("combat: {c:?}"),
        WorldEvent::Health(h) => log::debug!("health: {h:?}"),
        WorldEvent::Lever(l) => log::info!("lever {} -> {}", l.id, l.is_on),
        WorldEvent::ComfortStarted { enemy } => {
            let line = world
                .comfort_for(*enemy)
                .map(|a| a.visible_text().to_string())
                .unwrap_or_default();
            log::info!("enemy {enemy} walks over to comfort the player {line:?}");
        }
        WorldEvent::EnemySpawned { enemy } => log::info!("spawned enemy {enemy}"),
        WorldEvent::EnemyRemoved { enemy } => log::info!("removed enemy {enemy}"),
    }
}
