//! Quest condition/executor framework.
//!
//! Conditions are effect-free predicates the quest state machine checks
//! at transition points; executors are the script commands it applies
//! afterwards. Both families dispatch through frozen registries.

pub mod condition;
pub mod exec;
pub mod state;

pub use condition::{
    evaluate_all, standard_condition_registry, AcceptCondition, ConditionContext, QuestCondKind,
    QuestConditionHandler, QuestConditionRegistry,
};
pub use exec::{
    apply_all, standard_exec_registry, ExecContext, QuestExec, QuestExecHandler, QuestExecKind,
    QuestExecRegistry,
};
pub use state::{MainQuest, ParentQuestState, QuestLog, QuestState, SubQuest};
