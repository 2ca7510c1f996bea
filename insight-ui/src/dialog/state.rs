use insight_dom::PresencePhase;

/// Where a dialog is in its open/close lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogState {
    Closed,
    Entering,
    Open,
    Exiting,
}

impl From<PresencePhase> for DialogState {
    fn from(phase: PresencePhase) -> Self {
        match phase {
            PresencePhase::Unmounted => Self::Closed,
            PresencePhase::Entering => Self::Entering,
            PresencePhase::Present => Self::Open,
            PresencePhase::Exiting => Self::Exiting,
        }
    }
}

/// A completed animation, reported by `Dialog::tick`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogTransition {
    /// Enter animation finished.
    Opened,
    /// Exit animation finished; the dialog is no longer rendered.
    Closed,
}

/// Panel width hint in terminal columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialogWidth {
    Sm,
    Md,
    Lg,
    Xl,
    #[default]
    TwoXl,
    ThreeXl,
    Columns(u16),
}

impl DialogWidth {
    pub fn columns(self) -> u16 {
        match self {
            Self::Sm => 48,
            Self::Md => 56,
            Self::Lg => 64,
            Self::Xl => 72,
            Self::TwoXl => 84,
            Self::ThreeXl => 96,
            Self::Columns(n) => n,
        }
    }

    /// Panel width on a screen `screen_width` columns wide, keeping a
    /// 2-column margin on each side.
    pub fn resolve(self, screen_width: u16) -> u16 {
        self.columns().min(screen_width.saturating_sub(4))
    }
}
