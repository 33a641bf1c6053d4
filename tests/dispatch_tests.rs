//! Ability dispatch integration tests.
//!
//! These tests exercise the whole path: registry resolution, handler
//! execution against a live ability, and the scene facade boundary.

use std::sync::{Arc, Mutex};

use runecore::{
    Ability, AbilityActionHandler, AbilityActionKind, AbilityData, AbilityDispatcher, ActionSpec,
    ContentStore, EntityId, PlayerId, RegistryBuilder, RulesConfig, RulesRuntime, SceneFacade,
    ScriptEventKind,
};

/// Scene double that records every mutation request.
#[derive(Default)]
struct RecordingScene {
    kills: Mutex<Vec<EntityId>>,
    damage: Mutex<Vec<(EntityId, f32)>>,
}

impl SceneFacade for RecordingScene {
    fn kill_entity(&self, entity: EntityId) -> bool {
        self.kills.lock().unwrap().push(entity);
        true
    }

    fn damage_entity(&self, entity: EntityId, amount: f32) -> bool {
        self.damage.lock().unwrap().push((entity, amount));
        true
    }

    fn call_script_event(&self, _kind: ScriptEventKind, _args: &[i64]) {}
}

fn test_runtime() -> RulesRuntime {
    let mut content = ContentStore::new();
    content.register_ability(
        AbilityData::new("Avatar_Boy_Skill_TestA")
            .with_special("CD", 8.0)
            .with_modifier("TestA_Burn"),
    );
    RulesRuntime::new(Arc::new(content), RulesConfig::default()).unwrap()
}

fn test_ability(runtime: &RulesRuntime) -> Ability {
    let data = runtime.content().ability("Avatar_Boy_Skill_TestA").unwrap();
    Ability::new(Arc::clone(data), EntityId::new(100), Some(PlayerId::new(1)))
}

/// A kill-self action with a target kills exactly that target.
#[test]
fn test_kill_self_with_target() {
    let runtime = test_runtime();
    let scene = RecordingScene::default();
    let mut ability = test_ability(&runtime);

    let ok = runtime.dispatcher().dispatch(
        &mut ability,
        &ActionSpec::kill_self(),
        Some(EntityId::new(200)),
        &scene,
        1_000,
    );

    assert!(ok);
    assert_eq!(scene.kills.lock().unwrap().as_slice(), &[EntityId::new(200)]);
}

/// A kill-self action without a target fails gracefully: no entity is
/// touched and the worker keeps going.
#[test]
fn test_kill_self_null_target_guard() {
    let runtime = test_runtime();
    let scene = RecordingScene::default();
    let mut ability = test_ability(&runtime);

    let ok = runtime
        .dispatcher()
        .dispatch(&mut ability, &ActionSpec::kill_self(), None, &scene, 1_000);

    assert!(!ok);
    assert!(scene.kills.lock().unwrap().is_empty());
    assert!(scene.damage.lock().unwrap().is_empty());
}

/// Dispatching a kind with no registered handler fails and leaves
/// ability state untouched.
#[test]
fn test_unregistered_action_kind() {
    let runtime = test_runtime();
    let scene = RecordingScene::default();
    let mut ability = test_ability(&runtime);

    // A partial registry missing the modifier handlers.
    let builder: RegistryBuilder<AbilityActionKind, dyn AbilityActionHandler> =
        RegistryBuilder::new("ability-action");
    let partial = builder
        .register(
            AbilityActionKind::KillSelf,
            Box::new(runecore::ability::KillSelfAction),
        )
        .unwrap()
        .build();
    let dispatcher = AbilityDispatcher::new(&partial);

    let ok = dispatcher.dispatch(
        &mut ability,
        &ActionSpec::apply_modifier("TestA_Burn", None),
        None,
        &scene,
        1_000,
    );

    assert!(!ok);
    assert!(!ability.has_modifier("TestA_Burn"));
}

/// Modifier actions mutate only the targeted ability instance.
#[test]
fn test_apply_and_remove_modifier() {
    let runtime = test_runtime();
    let scene = RecordingScene::default();
    let mut ability = test_ability(&runtime);

    let applied = runtime.dispatcher().dispatch(
        &mut ability,
        &ActionSpec::apply_modifier("TestA_Burn", Some(5.0)),
        None,
        &scene,
        1_000,
    );
    assert!(applied);
    assert!(ability.has_modifier("TestA_Burn"));

    // Undeclared modifiers are rejected, not invented.
    let bogus = runtime.dispatcher().dispatch(
        &mut ability,
        &ActionSpec::apply_modifier("Not_Declared", None),
        None,
        &scene,
        1_000,
    );
    assert!(!bogus);
    assert!(!ability.has_modifier("Not_Declared"));

    let removed = runtime.dispatcher().dispatch(
        &mut ability,
        &ActionSpec::remove_modifier("TestA_Burn"),
        None,
        &scene,
        1_001,
    );
    assert!(removed);
    assert!(!ability.has_modifier("TestA_Burn"));
}

/// Lose-hp falls back to the ability owner when untargeted.
#[test]
fn test_lose_hp_defaults_to_owner() {
    let runtime = test_runtime();
    let scene = RecordingScene::default();
    let mut ability = test_ability(&runtime);

    let ok = runtime
        .dispatcher()
        .dispatch(&mut ability, &ActionSpec::lose_hp(120.0), None, &scene, 1_000);

    assert!(ok);
    assert_eq!(
        scene.damage.lock().unwrap().as_slice(),
        &[(EntityId::new(100), 120.0)]
    );
}

/// Two instances over the same data never mutate the shared defaults,
/// and both derive the same hash.
#[test]
fn test_shared_data_isolation() {
    let runtime = test_runtime();
    let data = runtime.content().ability("Avatar_Boy_Skill_TestA").unwrap();

    let mut first = Ability::new(Arc::clone(data), EntityId::new(1), None);
    first.set_special("CD", 0.5);

    let second = Ability::new(Arc::clone(data), EntityId::new(2), None);
    assert_eq!(second.special("CD"), Some(8.0));
    assert_eq!(data.specials.get("CD"), Some(&8.0));

    assert_eq!(first.hash(), second.hash());
    assert_eq!(first.hash(), runecore::name_hash("Avatar_Boy_Skill_TestA"));
}

/// Wire references resolve through the runtime's name table.
#[test]
fn test_wire_name_resolution() {
    let runtime = test_runtime();

    let hash = runecore::name_hash("Avatar_Boy_Skill_TestA");
    let by_hash = runecore::AbilityRef::from_hash(hash);
    assert_eq!(
        by_hash.canonical_name(runtime.names()),
        Some("Avatar_Boy_Skill_TestA")
    );

    // Inline names win over the hash.
    let both = runecore::AbilityRef {
        name: Some("Inline_Override".to_string()),
        hash: Some(hash),
    };
    assert_eq!(both.canonical_name(runtime.names()), Some("Inline_Override"));

    // Unknown hashes resolve to nothing, not a fault.
    let unknown = runecore::AbilityRef::from_hash(hash.wrapping_add(1));
    assert_eq!(unknown.canonical_name(runtime.names()), None);
}
