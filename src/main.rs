//! Headless session runner
//!
//! Builds a small scene (pickups, a lever-operated door, a talking NPC),
//! walks the player across it for a few seconds of simulated ticks,
//! crafts an axe and writes a quick save.
//!
//! Usage: `gameplay_core [config.toml]`

use gameplay_core::config::GameplayConfig;
use gameplay_core::crafting::{CraftingRecipe, CraftingSystem, RecipeIngredient};
use gameplay_core::dialogue::{Dialogue, DialogueLine, DialogueTrigger};
use gameplay_core::game::{DialogueBridge, EntityId, PickupItem, PuzzleLever, Session, TickInput, World};
use gameplay_core::interaction::InteractionProfile;
use gameplay_core::item::{ItemDefinition, ItemRegistry};
use gameplay_core::math::Vec2;
use gameplay_core::puzzle::{Puzzle, PuzzleDoor, PuzzleSwitch};
use gameplay_core::save::{SaveManager, SaveMetadata, SaveType};
use gameplay_core::sound::{NullAudio, SoundBank, SoundName, SoundSystem};
use log::{info, warn};
use std::error::Error;
use std::rc::Rc;

// Simulation constants
const TICK_SECONDS: f32 = 1.0 / 30.0;
const WALK_SPEED: f32 = 2.0;
const INTERACT_RADIUS: f32 = 1.5;
const SCENE_END_X: f32 = 12.0;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => GameplayConfig::load(&path)?,
        None => GameplayConfig::default(),
    };

    // Content
    let mut registry = ItemRegistry::new();
    let wood = registry.register(ItemDefinition::new("wood", "Wood", 20))?;
    let stone = registry.register(ItemDefinition::new("stone", "Stone", 20))?;
    let axe = registry.register(ItemDefinition::unique("axe", "Axe").with_description("Chops trees."))?;

    let recipes = vec![
        CraftingRecipe::new("Axe", RecipeIngredient::new(axe.clone(), 1))
            .with_ingredient(wood.clone(), 3)
            .with_ingredient(stone.clone(), 2),
    ];

    let bank = SoundBank::new()
        .with(SoundName::Coin, "sfx/coin.ogg")
        .with(SoundName::Interact, "sfx/lever.ogg")
        .with(SoundName::DoorOpen, "sfx/door_open.ogg")
        .with(SoundName::BackgroundMusic, "music/theme.ogg");
    let mut sounds = SoundSystem::new(bank, Box::new(NullAudio), config.sound.clone());
    sounds.play_ambient(SoundName::BackgroundMusic);

    let mut world = World::new(config.clone(), sounds, CraftingSystem::new(recipes));
    world.inventory.subscribe(|inventory| {
        info!("Inventory now uses {}/{} slots", inventory.occupied_slots(), inventory.capacity());
    });

    // Scene
    let lever_switch = PuzzleSwitch::new(true, false);
    let door = world.add_door(PuzzleDoor::new(
        Puzzle::new("east_gate", vec![lever_switch.clone()]),
        Vec2::new(10.0, 0.0),
        &config.door,
    ));

    let mut session = Session::new(world);
    session.selector_mut().subscribe(|target| match target {
        Some(target) => info!("Prompt: [E] {}", target.prompt_text()),
        None => info!("Prompt hidden"),
    });

    let profile = InteractionProfile::from_config(&config.interaction);
    let mut scene: Vec<EntityId> = Vec::new();

    for (x, item, amount) in [(2.0, &wood, 5), (4.0, &stone, 2)] {
        let item = item.clone();
        let profile = profile.clone().with_prompt("Pick up");
        scene.push(session.spawn(move |id| {
            Rc::new(PickupItem::new(id, item, amount, Vec2::new(x, 0.0), profile))
        }));
    }

    let greeting = Rc::new(Dialogue::new(vec![
        DialogueLine::new("The gate is stuck.").spoken_by("Guard"),
        DialogueLine::new("Try the lever.").spoken_by("Guard"),
    ]));
    let talk_profile = profile.clone().with_prompt("Talk").with_priority(5);
    scene.push(session.spawn(move |_| {
        Rc::new(DialogueBridge::new(DialogueTrigger::new(greeting), Vec2::new(6.0, 0.5), talk_profile))
    }));

    let lever_profile = profile.clone().with_prompt("Pull lever");
    scene.push(session.spawn(move |_| {
        Rc::new(PuzzleLever::new(lever_switch, door, Vec2::new(8.0, 0.0), lever_profile))
    }));

    // Walk the player across the scene
    // The scripted "player" presses interact once whenever a new target shows up
    let mut anchor = Vec2::ZERO;
    let mut press_interact = false;
    while anchor.x < SCENE_END_X {
        update_proximity(&mut session, &scene, anchor);

        let input = TickInput {
            anchor,
            dt: TICK_SECONDS,
            interact_pressed: press_interact,
            advance_pressed: session.world.dialogue.is_active() && !session.world.dialogue.is_typing(),
        };
        let report = session.tick(input);
        press_interact = report.target_changed && session.prompt().is_some();
        if report.doors_opened > 0 {
            info!("Door finished opening");
        }

        // Hold still while someone is talking
        if !session.world.dialogue.is_active() {
            anchor.x += WALK_SPEED * TICK_SECONDS;
        }
    }

    let world = &mut session.world;
    match world.crafting.craft_named("Axe", &mut world.inventory) {
        Ok(amount) => info!("Crafted {} axe(s)", amount),
        Err(err) => warn!("Crafting failed: {}", err),
    }

    for (slot, stack) in world.inventory.iter() {
        info!("[{}] {} x{}", slot, stack.item.name, stack.amount);
    }

    let directory = match &config.save.directory {
        Some(directory) => directory.clone(),
        None => SaveManager::default_directory()?,
    };
    let mut saves = SaveManager::new(directory)?;
    let save = session.capture_save(SaveMetadata {
        game_version: env!("CARGO_PKG_VERSION").to_string(),
        player_name: None,
        playtime_seconds: 0,
        save_type: SaveType::QuickSave,
        save_slot: saves.save_slot(),
    });
    saves.save_game(&save)?;

    Ok(())
}

/// Stand-in for the physics trigger: entities within `INTERACT_RADIUS` are in range
fn update_proximity(session: &mut Session, scene: &[EntityId], anchor: Vec2) {
    let radius_sq = INTERACT_RADIUS * INTERACT_RADIUS;

    for &id in scene {
        let Some(position) = session.entity(id).map(|entity| entity.position()) else {
            continue;
        };
        if position.distance_squared(anchor) <= radius_sq {
            session.enter_proximity(id);
        } else {
            session.exit_proximity(id);
        }
    }
}
