use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Store work requested by the session, executed in order by the event loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Action {
    LoadCategories,
    LoadWindow,
    SaveWindow,
}

pub(super) type ActionTx = UnboundedSender<Action>;
pub(super) type ActionRx = UnboundedReceiver<Action>;

pub(super) fn channel() -> (ActionTx, ActionRx) {
    mpsc::unbounded_channel()
}

impl Action {
    pub(super) fn progress_message(&self, backend: &str) -> String {
        match self {
            Action::LoadCategories => "Loading activities...".to_string(),
            Action::LoadWindow => "Loading time window data...".to_string(),
            Action::SaveWindow => format!("Saving to {}...", backend),
        }
    }
}
