//! Core types: ids, errors, configuration, the player, and the
//! collaborator boundaries (scene facade, outbound packets, quest
//! events).

pub mod config;
pub mod error;
pub mod event;
pub mod facade;
pub mod id;
pub mod ledger;
pub mod packet;
pub mod player;

pub use config::{RulesConfig, CHAT_OPEN_STATE};
pub use error::{CoreError, Result};
pub use event::{EventTrigger, QueuedEvent};
pub use facade::{SceneFacade, ScriptEventKind};
pub use id::{AvatarGuid, EntityId, PlayerId, SceneId};
pub use ledger::ItemLedger;
pub use packet::{Packet, QueueEntrySnapshot, Retcode};
pub use player::Player;
