//! Side effects behind the inline action button.

use chatview_core::ActionEffect;
use chatview_types::{InitialAction, Peer};

/// Operations the surrounding application performs for a mode action.
///
/// The session resolves an [`ActionEffect`] opcode to exactly one of these.
pub trait ChatInteraction {
    fn join_channel(&self, peer: &Peer);
    fn remove_and_close_chat(&self, peer: &Peer);
    fn toggle_notifications(&self, peer: &Peer);
    fn return_group(&self, peer: &Peer);
    fn unblock(&self, peer: &Peer);
    fn invoke_initial_action(&self, action: &InitialAction);
    fn start_bot(&self, peer: &Peer);
}

/// Run `effect` against `interaction`.
///
/// Returns `false` when the effect needs context that is missing (no peer or
/// no initial action) or is [`ActionEffect::Noop`].
pub(crate) fn dispatch(
    effect: ActionEffect,
    peer: Option<&Peer>,
    initial_action: Option<&InitialAction>,
    interaction: &dyn ChatInteraction,
) -> bool {
    match effect {
        ActionEffect::Noop => false,
        ActionEffect::InvokeInitialAction => match initial_action {
            Some(action) => {
                interaction.invoke_initial_action(action);
                true
            }
            None => false,
        },
        _ => {
            let Some(peer) = peer else {
                return false;
            };
            match effect {
                ActionEffect::JoinChannel => interaction.join_channel(peer),
                ActionEffect::RemoveAndCloseChat => interaction.remove_and_close_chat(peer),
                ActionEffect::ToggleNotifications => interaction.toggle_notifications(peer),
                ActionEffect::ReturnGroup => interaction.return_group(peer),
                ActionEffect::Unblock => interaction.unblock(peer),
                ActionEffect::StartBot => interaction.start_bot(peer),
                ActionEffect::Noop | ActionEffect::InvokeInitialAction => return false,
            }
            true
        }
    }
}

/// Logs each requested interaction instead of performing it.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingInteraction;

impl ChatInteraction for LoggingInteraction {
    fn join_channel(&self, peer: &Peer) {
        tracing::info!(peer = %peer.id(), "join channel requested");
    }

    fn remove_and_close_chat(&self, peer: &Peer) {
        tracing::info!(peer = %peer.id(), "remove and close chat requested");
    }

    fn toggle_notifications(&self, peer: &Peer) {
        tracing::info!(peer = %peer.id(), "toggle notifications requested");
    }

    fn return_group(&self, peer: &Peer) {
        tracing::info!(peer = %peer.id(), "return to group requested");
    }

    fn unblock(&self, peer: &Peer) {
        tracing::info!(peer = %peer.id(), "unblock requested");
    }

    fn invoke_initial_action(&self, action: &InitialAction) {
        tracing::info!(?action, "initial action requested");
    }

    fn start_bot(&self, peer: &Peer) {
        tracing::info!(peer = %peer.id(), "start bot requested");
    }
}
