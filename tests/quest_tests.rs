//! Quest condition/executor integration tests.
//!
//! The quest state machine lives outside this crate; these tests drive
//! the framework the way it would: evaluate a sub-quest's accept
//! conditions, then apply an executor list at a transition point.

use std::sync::{Arc, Mutex};

use runecore::{
    quest, AcceptCondition, ContentStore, EntityId, EventTrigger, MainQuest, Player, PlayerId,
    QuestCondKind, QuestExec, QuestExecKind, RulesConfig, RulesRuntime, SceneFacade, SubQuestData,
    ScriptEventKind,
};

#[derive(Default)]
struct RecordingScene {
    script_events: Mutex<Vec<(ScriptEventKind, Vec<i64>)>>,
}

impl SceneFacade for RecordingScene {
    fn kill_entity(&self, _entity: EntityId) -> bool {
        false
    }

    fn damage_entity(&self, _entity: EntityId, _amount: f32) -> bool {
        false
    }

    fn call_script_event(&self, kind: ScriptEventKind, args: &[i64]) {
        self.script_events.lock().unwrap().push((kind, args.to_vec()));
    }
}

fn test_runtime() -> RulesRuntime {
    let mut content = ContentStore::new();
    content.register_sub_quest(
        SubQuestData::new(30302, 303)
            .with_accept_condition(AcceptCondition::new(
                QuestCondKind::PlayerLevelGreaterOrEqual,
                [5],
            ))
            .with_accept_condition(AcceptCondition::new(QuestCondKind::OpenStateEqual, [20, 1])),
    );
    content.register_scene_point(3, 7);
    RulesRuntime::new(Arc::new(content), RulesConfig::default()).unwrap()
}

/// Accept conditions evaluate as a conjunction against live player
/// state.
#[test]
fn test_accept_condition_conjunction() {
    let runtime = test_runtime();
    let player = Player::new(PlayerId::new(1), 5);
    let quest_data: &SubQuestData = runtime.content().sub_quest(30302).unwrap();

    // Level is met but the open state is not.
    assert!(!quest::evaluate_all(
        runtime.quest_conditions(),
        &quest_data.accept_conditions,
        &player,
        Some(quest_data),
        0,
    ));

    // Flip the open state through the progress manager.
    let scene = RecordingScene::default();
    runtime.progress(&player, &scene).force_set_open_state(20, 1);

    assert!(quest::evaluate_all(
        runtime.quest_conditions(),
        &quest_data.accept_conditions,
        &player,
        Some(quest_data),
        0,
    ));

    // Dropping below the level requirement fails again.
    player.set_level(4);
    assert!(!quest::evaluate_all(
        runtime.quest_conditions(),
        &quest_data.accept_conditions,
        &player,
        Some(quest_data),
        0,
    ));
}

/// An executor list is applied in order at a transition point, touching
/// quest vars, counters and the world.
#[test]
fn test_executor_transition() {
    let runtime = test_runtime();
    let player = Player::new(PlayerId::new(1), 5);
    player
        .quest_log()
        .add_main_quest(MainQuest::new(303).with_quest_vars(2));
    let scene = RecordingScene::default();

    let execs = [
        QuestExec::new(QuestExecKind::SetQuestVar, []).with_param_str(["0", "3"]),
        QuestExec::new(QuestExecKind::IncQuestVar, []).with_param_str(["0", "2"]),
        QuestExec::new(QuestExecKind::AddQuestProgress, [55, 1]),
        QuestExec::new(QuestExecKind::UnlockTransPoint, [3, 7]),
    ];

    let mut ctx = quest::ExecContext {
        player: &player,
        sub_quest_id: 30302,
        main_quest_id: 303,
        content: runtime.content(),
        config: runtime.config(),
        scene: &scene,
        now: 1_000,
    };
    quest::apply_all(runtime.quest_execs(), &execs, &mut ctx);

    assert_eq!(player.quest_log().main_quest(303).unwrap().quest_var(0), Some(5));
    assert_eq!(player.quest_progress(55), 1);
    assert!(player.has_scene_point(3, 7));
    assert_eq!(
        scene.script_events.lock().unwrap().as_slice(),
        &[(ScriptEventKind::UnlockTransPoint, vec![3, 7])]
    );

    let events = player.drain_events();
    assert!(events
        .iter()
        .any(|event| event.trigger == EventTrigger::AddQuestProgress));
    assert!(events
        .iter()
        .any(|event| event.trigger == EventTrigger::UnlockTransPoint));
}

/// A sweep over both registries: every declared kind resolves to its
/// handler before any dispatch happens.
#[test]
fn test_registries_are_fully_populated() {
    let runtime = test_runtime();

    for kind in [
        QuestCondKind::PlayerLevelGreaterOrEqual,
        QuestCondKind::OpenStateEqual,
        QuestCondKind::ActivityOpen,
        QuestCondKind::TimeVarGreaterOrEqual,
        QuestCondKind::QuestStateEqual,
        QuestCondKind::HistoryGotAnyItem,
        QuestCondKind::CityReputationLevel,
    ] {
        assert!(runtime.quest_conditions().contains(kind), "missing {kind:?}");
    }

    for kind in [
        QuestExecKind::SetQuestVar,
        QuestExecKind::IncQuestVar,
        QuestExecKind::DecQuestVar,
        QuestExecKind::AddQuestProgress,
        QuestExecKind::UnlockTransPoint,
    ] {
        assert!(runtime.quest_execs().contains(kind), "missing {kind:?}");
    }
}

/// Item history drives its condition end to end.
#[test]
fn test_item_history_condition() {
    let runtime = test_runtime();
    let player = Player::new(PlayerId::new(1), 5);
    let scene = RecordingScene::default();
    let condition = AcceptCondition::new(QuestCondKind::HistoryGotAnyItem, [112001, 3]);

    let met = |player: &Player| {
        quest::evaluate_all(
            runtime.quest_conditions(),
            std::slice::from_ref(&condition),
            player,
            None,
            0,
        )
    };

    assert!(!met(&player));
    runtime.progress(&player, &scene).add_item_history(112001, 2);
    assert!(!met(&player));
    runtime.progress(&player, &scene).add_item_history(112001, 1);
    assert!(met(&player));
}
