//! Quest script executors.
//!
//! Executors are the side-effecting half of the quest framework: the
//! state machine applies a declared list of them at a transition point,
//! in order, each independently fallible. A failing executor does not
//! roll back the ones before it — script execution is best-effort.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, warn};

use crate::content::ContentStore;
use crate::core::error::Result;
use crate::core::{Player, RulesConfig, SceneFacade, SceneId};
use crate::progress;
use crate::registry::{HandlerRegistry, RegistryBuilder};

/// Discriminant for quest executors. Content-defined, closed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestExecKind {
    /// Set quest variable `str[0]` of the owning main quest to `str[1]`.
    SetQuestVar,
    /// Increment quest variable `str[0]` by `str[1]`.
    IncQuestVar,
    /// Decrement quest variable `str[0]` by `str[1]`.
    DecQuestVar,
    /// Advance progress counter `param[0]` by `param[1]` (1 if unset).
    AddQuestProgress,
    /// Unlock map point `param[1]` in scene `param[0]`.
    UnlockTransPoint,
}

/// One executor invocation as declared by quest content.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuestExec {
    /// Which executor to run.
    pub kind: QuestExecKind,
    /// Integer parameters.
    pub params: SmallVec<[i32; 4]>,
    /// String parameters; the script format keeps numbers in here too.
    pub param_str: SmallVec<[String; 2]>,
}

impl QuestExec {
    /// Create an executor from integer parameters.
    #[must_use]
    pub fn new(kind: QuestExecKind, params: impl IntoIterator<Item = i32>) -> Self {
        Self {
            kind,
            params: params.into_iter().collect(),
            param_str: SmallVec::new(),
        }
    }

    /// Attach string parameters (builder pattern).
    #[must_use]
    pub fn with_param_str<S: Into<String>>(mut self, params: impl IntoIterator<Item = S>) -> Self {
        self.param_str = params.into_iter().map(Into::into).collect();
        self
    }

    /// Get an integer parameter by index, zero when absent.
    #[must_use]
    pub fn param(&self, index: usize) -> i32 {
        self.params.get(index).copied().unwrap_or(0)
    }
}

/// Context for applying executors. Built per transition, never kept.
pub struct ExecContext<'a> {
    /// The player the quest belongs to.
    pub player: &'a Player,
    /// The sub-quest being executed.
    pub sub_quest_id: u32,
    /// Its owning main quest.
    pub main_quest_id: u32,
    /// Loaded content.
    pub content: &'a ContentStore,
    /// Runtime configuration.
    pub config: &'a RulesConfig,
    /// The world simulation boundary.
    pub scene: &'a dyn SceneFacade,
    /// Current time in seconds.
    pub now: u64,
}

/// A pluggable side-effecting interpreter for one executor kind.
pub trait QuestExecHandler: Send + Sync {
    /// Apply the executor. False means it had no effect.
    fn apply(&self, ctx: &mut ExecContext<'_>, exec: &QuestExec) -> bool;
}

/// Registry type for the quest-executor family.
pub type QuestExecRegistry = HandlerRegistry<QuestExecKind, dyn QuestExecHandler>;

/// Apply an executor list in declared order.
///
/// Failures are logged and skipped; earlier effects stay applied.
pub fn apply_all(registry: &QuestExecRegistry, execs: &[QuestExec], ctx: &mut ExecContext<'_>) {
    for exec in execs {
        let handler = match registry.resolve(exec.kind) {
            Ok(handler) => handler,
            Err(error) => {
                warn!(%error, "quest executor not applied");
                continue;
            }
        };
        if !handler.apply(ctx, exec) {
            debug!(kind = ?exec.kind, quest = ctx.sub_quest_id, "quest executor had no effect");
        }
    }
}

/// Parse a string parameter leniently; unparseable input fails the
/// executor instead of faulting the worker.
fn int_str_param(exec: &QuestExec, index: usize) -> Option<i64> {
    let raw = exec.param_str.get(index)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(raw = raw.as_str(), index, kind = ?exec.kind, "unparseable executor parameter");
            None
        }
    }
}

// === Handlers ===

/// Handler for [`QuestExecKind::SetQuestVar`].
pub struct ExecSetQuestVar;

impl QuestExecHandler for ExecSetQuestVar {
    fn apply(&self, ctx: &mut ExecContext<'_>, exec: &QuestExec) -> bool {
        let (Some(index), Some(value)) = (int_str_param(exec, 0), int_str_param(exec, 1)) else {
            return false;
        };
        let mut log = ctx.player.quest_log();
        let Some(main) = log.main_quest_mut(ctx.main_quest_id) else {
            return false;
        };
        main.set_quest_var(index as usize, value)
    }
}

/// Handler for [`QuestExecKind::IncQuestVar`].
pub struct ExecIncQuestVar;

impl QuestExecHandler for ExecIncQuestVar {
    fn apply(&self, ctx: &mut ExecContext<'_>, exec: &QuestExec) -> bool {
        let (Some(index), Some(delta)) = (int_str_param(exec, 0), int_str_param(exec, 1)) else {
            return false;
        };
        let mut log = ctx.player.quest_log();
        let Some(main) = log.main_quest_mut(ctx.main_quest_id) else {
            return false;
        };
        main.modify_quest_var(index as usize, delta)
    }
}

/// Handler for [`QuestExecKind::DecQuestVar`].
pub struct ExecDecQuestVar;

impl QuestExecHandler for ExecDecQuestVar {
    fn apply(&self, ctx: &mut ExecContext<'_>, exec: &QuestExec) -> bool {
        let (Some(index), Some(delta)) = (int_str_param(exec, 0), int_str_param(exec, 1)) else {
            return false;
        };
        let mut log = ctx.player.quest_log();
        let Some(main) = log.main_quest_mut(ctx.main_quest_id) else {
            return false;
        };
        main.modify_quest_var(index as usize, -delta)
    }
}

/// Handler for [`QuestExecKind::AddQuestProgress`].
pub struct ExecAddQuestProgress;

impl QuestExecHandler for ExecAddQuestProgress {
    fn apply(&self, ctx: &mut ExecContext<'_>, exec: &QuestExec) -> bool {
        let id = exec.param(0) as u32;
        let count = i64::from(exec.params.get(1).copied().unwrap_or(1));
        progress::add_quest_progress(ctx.player, id, count);
        true
    }
}

/// Handler for [`QuestExecKind::UnlockTransPoint`].
pub struct ExecUnlockTransPoint;

impl QuestExecHandler for ExecUnlockTransPoint {
    fn apply(&self, ctx: &mut ExecContext<'_>, exec: &QuestExec) -> bool {
        let scene_id = SceneId::new(exec.param(0) as u32);
        let point = exec.param(1) as u32;
        progress::unlock_trans_point(
            ctx.player,
            ctx.content,
            ctx.config,
            ctx.scene,
            scene_id,
            point,
            false,
        )
    }
}

/// Build the standard quest-executor registry.
pub fn standard_exec_registry() -> Result<QuestExecRegistry> {
    let builder: RegistryBuilder<QuestExecKind, dyn QuestExecHandler> =
        RegistryBuilder::new("quest-exec");
    Ok(builder
        .register(QuestExecKind::SetQuestVar, Box::new(ExecSetQuestVar))?
        .register(QuestExecKind::IncQuestVar, Box::new(ExecIncQuestVar))?
        .register(QuestExecKind::DecQuestVar, Box::new(ExecDecQuestVar))?
        .register(QuestExecKind::AddQuestProgress, Box::new(ExecAddQuestProgress))?
        .register(QuestExecKind::UnlockTransPoint, Box::new(ExecUnlockTransPoint))?
        .build())
}
