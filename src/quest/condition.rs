//! Quest accept conditions.
//!
//! Each condition kind has one handler type; a condition list evaluates
//! as a short-circuiting conjunction in declared order. Evaluation is
//! effect-free: handlers read player and quest state, never write it.
//!
//! Conservative defaults throughout: a referenced quest that does not
//! exist evaluates false, and a kind with no registered handler
//! evaluates false — "not yet met", never an error.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::debug;

use crate::content::SubQuestData;
use crate::core::error::Result;
use crate::core::Player;
use crate::registry::{HandlerRegistry, RegistryBuilder};

/// Discriminant for quest accept conditions. Content-defined, closed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestCondKind {
    /// Player level is at least `param[0]`.
    PlayerLevelGreaterOrEqual,
    /// Open state `param[0]` equals `param[1]`.
    OpenStateEqual,
    /// Activity `param[0]` is currently running.
    ActivityOpen,
    /// Main quest `param[0]`'s time var `param[1]` is at least
    /// `param[2]` hours old.
    TimeVarGreaterOrEqual,
    /// Sub-quest `param[0]` is in state `param[1]`.
    QuestStateEqual,
    /// Item `param[0]` has appeared in the obtained history at least
    /// `param[1]` times (once if unset).
    HistoryGotAnyItem,
    /// City reputation gate. Not implemented: always false, pending
    /// clarified game rules.
    CityReputationLevel,
}

/// One condition as declared by quest content.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AcceptCondition {
    /// Which condition family.
    pub kind: QuestCondKind,
    /// Integer parameters, meaning depends on the kind.
    pub params: SmallVec<[i32; 4]>,
    /// Free-form string parameter, rarely used.
    pub param_str: String,
}

impl AcceptCondition {
    /// Create a condition from its integer parameters.
    #[must_use]
    pub fn new(kind: QuestCondKind, params: impl IntoIterator<Item = i32>) -> Self {
        Self {
            kind,
            params: params.into_iter().collect(),
            param_str: String::new(),
        }
    }

    /// Attach a string parameter (builder pattern).
    #[must_use]
    pub fn with_param_str(mut self, param_str: impl Into<String>) -> Self {
        self.param_str = param_str.into();
        self
    }

    /// Get a parameter by index, zero when absent.
    #[must_use]
    pub fn param(&self, index: usize) -> i32 {
        self.params.get(index).copied().unwrap_or(0)
    }
}

/// Context for one condition evaluation. Built per call, never kept.
pub struct ConditionContext<'a> {
    /// The player being evaluated against.
    pub player: &'a Player,
    /// The sub-quest the condition belongs to, when there is one.
    pub quest: Option<&'a SubQuestData>,
    /// The condition under evaluation.
    pub condition: &'a AcceptCondition,
    /// Current time in seconds.
    pub now: u64,
}

/// A pluggable predicate for one condition kind.
pub trait QuestConditionHandler: Send + Sync {
    /// Is the condition satisfied?
    fn evaluate(&self, ctx: &ConditionContext<'_>) -> bool;
}

/// Registry type for the quest-condition family.
pub type QuestConditionRegistry = HandlerRegistry<QuestCondKind, dyn QuestConditionHandler>;

/// Evaluate a condition list as a conjunction.
///
/// Short-circuits on the first failing condition in declared order; an
/// empty list is vacuously true.
pub fn evaluate_all(
    registry: &QuestConditionRegistry,
    conditions: &[AcceptCondition],
    player: &Player,
    quest: Option<&SubQuestData>,
    now: u64,
) -> bool {
    for condition in conditions {
        let Ok(handler) = registry.resolve(condition.kind) else {
            debug!(kind = ?condition.kind, "condition kind has no handler, treating as unmet");
            return false;
        };
        let ctx = ConditionContext {
            player,
            quest,
            condition,
            now,
        };
        if !handler.evaluate(&ctx) {
            return false;
        }
    }
    true
}

// === Handlers ===

/// Handler for [`QuestCondKind::PlayerLevelGreaterOrEqual`].
pub struct ConditionPlayerLevel;

impl QuestConditionHandler for ConditionPlayerLevel {
    fn evaluate(&self, ctx: &ConditionContext<'_>) -> bool {
        i64::from(ctx.player.level()) >= i64::from(ctx.condition.param(0))
    }
}

/// Handler for [`QuestCondKind::OpenStateEqual`].
pub struct ConditionOpenStateEqual;

impl QuestConditionHandler for ConditionOpenStateEqual {
    fn evaluate(&self, ctx: &ConditionContext<'_>) -> bool {
        let state = ctx.condition.param(0) as u32;
        ctx.player.open_state(state) == ctx.condition.param(1)
    }
}

/// Handler for [`QuestCondKind::ActivityOpen`].
pub struct ConditionActivityOpen;

impl QuestConditionHandler for ConditionActivityOpen {
    fn evaluate(&self, ctx: &ConditionContext<'_>) -> bool {
        ctx.player.is_activity_active(ctx.condition.param(0) as u32)
    }
}

/// Handler for [`QuestCondKind::TimeVarGreaterOrEqual`].
pub struct ConditionTimeVarGreaterOrEqual;

impl QuestConditionHandler for ConditionTimeVarGreaterOrEqual {
    fn evaluate(&self, ctx: &ConditionContext<'_>) -> bool {
        let main_quest_id = ctx.condition.param(0) as u32;
        let time_var_index = ctx.condition.param(1) as usize;
        let min_hours = i64::from(ctx.condition.param(2));

        let log = ctx.player.quest_log();
        let Some(main) = log.main_quest(main_quest_id) else {
            return false;
        };
        match main.hours_since_time_var(time_var_index, ctx.now) {
            Some(hours) => hours as i64 >= min_hours,
            None => false,
        }
    }
}

/// Handler for [`QuestCondKind::QuestStateEqual`].
pub struct ConditionQuestStateEqual;

impl QuestConditionHandler for ConditionQuestStateEqual {
    fn evaluate(&self, ctx: &ConditionContext<'_>) -> bool {
        let quest_id = ctx.condition.param(0) as u32;
        let expected = ctx.condition.param(1);

        let log = ctx.player.quest_log();
        match log.quest(quest_id) {
            Some(quest) => quest.state.value() == expected,
            None => false,
        }
    }
}

/// Handler for [`QuestCondKind::HistoryGotAnyItem`].
pub struct ConditionHistoryGotAnyItem;

impl QuestConditionHandler for ConditionHistoryGotAnyItem {
    fn evaluate(&self, ctx: &ConditionContext<'_>) -> bool {
        let item = ctx.condition.param(0) as u32;
        let required = i64::from(ctx.condition.param(1)).max(1);
        ctx.player.item_history(item) >= required
    }
}

/// Handler for [`QuestCondKind::CityReputationLevel`].
///
/// Placeholder: opening these gates early triggers content that is not
/// ready, so the condition stays unmet until the real reputation rules
/// land.
pub struct ConditionCityReputation;

impl QuestConditionHandler for ConditionCityReputation {
    fn evaluate(&self, _ctx: &ConditionContext<'_>) -> bool {
        false
    }
}

/// Build the standard quest-condition registry.
pub fn standard_condition_registry() -> Result<QuestConditionRegistry> {
    let builder: RegistryBuilder<QuestCondKind, dyn QuestConditionHandler> =
        RegistryBuilder::new("quest-condition");
    Ok(builder
        .register(QuestCondKind::PlayerLevelGreaterOrEqual, Box::new(ConditionPlayerLevel))?
        .register(QuestCondKind::OpenStateEqual, Box::new(ConditionOpenStateEqual))?
        .register(QuestCondKind::ActivityOpen, Box::new(ConditionActivityOpen))?
        .register(
            QuestCondKind::TimeVarGreaterOrEqual,
            Box::new(ConditionTimeVarGreaterOrEqual),
        )?
        .register(QuestCondKind::QuestStateEqual, Box::new(ConditionQuestStateEqual))?
        .register(
            QuestCondKind::HistoryGotAnyItem,
            Box::new(ConditionHistoryGotAnyItem),
        )?
        .register(QuestCondKind::CityReputationLevel, Box::new(ConditionCityReputation))?
        .build())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PlayerId;
    use crate::quest::{MainQuest, QuestState, SubQuest};

    fn player() -> Player {
        Player::new(PlayerId::new(1), 10)
    }

    fn evaluate(player: &Player, condition: &AcceptCondition, now: u64) -> bool {
        let registry = standard_condition_registry().unwrap();
        evaluate_all(&registry, std::slice::from_ref(condition), player, None, now)
    }

    #[test]
    fn test_player_level() {
        let player = player();
        assert!(evaluate(
            &player,
            &AcceptCondition::new(QuestCondKind::PlayerLevelGreaterOrEqual, [10]),
            0
        ));
        assert!(!evaluate(
            &player,
            &AcceptCondition::new(QuestCondKind::PlayerLevelGreaterOrEqual, [11]),
            0
        ));
    }

    #[test]
    fn test_activity_open() {
        let player = player();
        let condition = AcceptCondition::new(QuestCondKind::ActivityOpen, [2001]);
        assert!(!evaluate(&player, &condition, 0));

        player.set_activity_active(2001, true);
        assert!(evaluate(&player, &condition, 0));
    }

    #[test]
    fn test_time_var_missing_quest_is_false() {
        let player = player();
        let condition = AcceptCondition::new(QuestCondKind::TimeVarGreaterOrEqual, [303, 0, 1]);
        assert!(!evaluate(&player, &condition, 10_000));
    }

    #[test]
    fn test_time_var_elapsed() {
        let player = player();
        {
            let mut log = player.quest_log();
            let mut main = MainQuest::new(303);
            main.set_time_var(0, 3_600);
            log.add_main_quest(main);
        }

        let condition = AcceptCondition::new(QuestCondKind::TimeVarGreaterOrEqual, [303, 0, 2]);
        assert!(!evaluate(&player, &condition, 7_200));
        assert!(evaluate(&player, &condition, 3_600 + 2 * 3_600));
    }

    #[test]
    fn test_quest_state_equal() {
        let player = player();
        player
            .quest_log()
            .add_sub_quest(SubQuest::new(30302, 303).with_state(QuestState::Finished));

        assert!(evaluate(
            &player,
            &AcceptCondition::new(QuestCondKind::QuestStateEqual, [30302, 2]),
            0
        ));
        assert!(!evaluate(
            &player,
            &AcceptCondition::new(QuestCondKind::QuestStateEqual, [30302, 1]),
            0
        ));
        // Missing quest evaluates false, not an error.
        assert!(!evaluate(
            &player,
            &AcceptCondition::new(QuestCondKind::QuestStateEqual, [99999, 2]),
            0
        ));
    }

    #[test]
    fn test_city_reputation_is_always_unmet() {
        let player = player();
        assert!(!evaluate(
            &player,
            &AcceptCondition::new(QuestCondKind::CityReputationLevel, [1, 1]),
            0
        ));
    }

    #[test]
    fn test_empty_list_is_vacuously_true() {
        let player = player();
        let registry = standard_condition_registry().unwrap();
        assert!(evaluate_all(&registry, &[], &player, None, 0));
    }

    #[test]
    fn test_conjunction_short_circuits() {
        use std::sync::atomic::{AtomicBool, Ordering};
        use std::sync::Arc;

        struct ProbeCondition(Arc<AtomicBool>);

        impl QuestConditionHandler for ProbeCondition {
            fn evaluate(&self, _ctx: &ConditionContext<'_>) -> bool {
                self.0.store(true, Ordering::SeqCst);
                true
            }
        }

        let invoked = Arc::new(AtomicBool::new(false));
        let builder: RegistryBuilder<QuestCondKind, dyn QuestConditionHandler> =
            RegistryBuilder::new("quest-condition");
        let registry = builder
            .register(QuestCondKind::PlayerLevelGreaterOrEqual, Box::new(ConditionPlayerLevel))
            .unwrap()
            .register(
                QuestCondKind::ActivityOpen,
                Box::new(ProbeCondition(Arc::clone(&invoked))),
            )
            .unwrap()
            .build();

        let player = player();
        let conditions = [
            // Level 10 player fails this one...
            AcceptCondition::new(QuestCondKind::PlayerLevelGreaterOrEqual, [90]),
            // ...so the probe must never run.
            AcceptCondition::new(QuestCondKind::ActivityOpen, [1]),
        ];

        assert!(!evaluate_all(&registry, &conditions, &player, None, 0));
        assert!(!invoked.load(Ordering::SeqCst));
    }

    #[test]
    fn test_unregistered_kind_defaults_false() {
        let builder: RegistryBuilder<QuestCondKind, dyn QuestConditionHandler> =
            RegistryBuilder::new("quest-condition");
        let registry = builder.build();

        let player = player();
        let conditions = [AcceptCondition::new(QuestCondKind::ActivityOpen, [1])];
        assert!(!evaluate_all(&registry, &conditions, &player, None, 0));
    }
}
