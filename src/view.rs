use serde::{Deserialize, Serialize};

use crate::{Ax, CellId, CellState};

/// Input commands a renderer feeds into the session, decoupled from whatever
/// event system produced them.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Intent {
    Reveal(CellId),
    Flag(CellId),
    NewGame { seed: u64 },
}

/// Player-visible reveal state of a cell, as reported to the renderer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevealState {
    Hidden,
    Flagged,
    Revealed,
}

/// One cell whose visible state changed.
///
/// `adjacent` is set only for revealed safe cells; `mine` is true only for
/// cells exposed by a loss.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CellDelta {
    pub id: CellId,
    pub state: RevealState,
    pub adjacent: Option<u8>,
    pub mine: bool,
}

impl CellDelta {
    pub(crate) fn new(id: CellId, cell: CellState) -> Self {
        match cell {
            CellState::Hidden => Self {
                id,
                state: RevealState::Hidden,
                adjacent: None,
                mine: false,
            },
            CellState::Flagged => Self {
                id,
                state: RevealState::Flagged,
                adjacent: None,
                mine: false,
            },
            CellState::Revealed(count) => Self {
                id,
                state: RevealState::Revealed,
                adjacent: Some(count),
                mine: false,
            },
            CellState::Mine => Self {
                id,
                state: RevealState::Revealed,
                adjacent: None,
                mine: true,
            },
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    None,
    Won,
    Lost,
}

impl Outcome {
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Everything a renderer needs after one intent: changed cells in application
/// order plus the readouts. `generation` identifies the board the deltas belong
/// to, so late async work for a replaced board can be dropped.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameUpdate {
    pub deltas: Vec<CellDelta>,
    pub flags_remaining: Ax,
    pub elapsed_secs: u32,
    pub outcome: Outcome,
    pub generation: u64,
}

/// Persisted display theme. Owned entirely by the presentation layer; nothing
/// in the core reads it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub const fn scheme(self) -> &'static str {
        use Theme::*;
        match self {
            Light => "light",
            Dark => "dark",
        }
    }

    pub fn from_scheme(scheme: &str) -> Option<Self> {
        match scheme {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    pub const fn toggled(self) -> Self {
        use Theme::*;
        match self {
            Light => Dark,
            Dark => Light,
        }
    }

    /// Stored preference, or the default when none exists.
    pub fn load_or_default(store: &impl ThemeStore) -> Self {
        store.load().unwrap_or_default()
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::Light
    }
}

/// Key-value persistence capability the renderer implements over its own
/// storage (e.g. localStorage): read once at startup, written on toggle.
pub trait ThemeStore {
    fn load(&self) -> Option<Theme>;
    fn save(&mut self, theme: Theme);
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MemoryStore(Option<Theme>);

    impl ThemeStore for MemoryStore {
        fn load(&self) -> Option<Theme> {
            self.0
        }

        fn save(&mut self, theme: Theme) {
            self.0 = Some(theme);
        }
    }

    #[test]
    fn theme_scheme_round_trips() {
        assert_eq!(Theme::from_scheme("dark"), Some(Theme::Dark));
        assert_eq!(Theme::from_scheme(Theme::Light.scheme()), Some(Theme::Light));
        assert_eq!(Theme::from_scheme("solarized"), None);
    }

    #[test]
    fn missing_preference_falls_back_to_light() {
        let mut store = MemoryStore(None);
        assert_eq!(Theme::load_or_default(&store), Theme::Light);

        store.save(Theme::Light.toggled());
        assert_eq!(Theme::load_or_default(&store), Theme::Dark);
    }

    #[test]
    fn deltas_carry_adjacency_only_for_safe_reveals() {
        let safe = CellDelta::new(3, CellState::Revealed(2));
        assert_eq!(safe.state, RevealState::Revealed);
        assert_eq!(safe.adjacent, Some(2));
        assert!(!safe.mine);

        let exposed = CellDelta::new(4, CellState::Mine);
        assert_eq!(exposed.state, RevealState::Revealed);
        assert_eq!(exposed.adjacent, None);
        assert!(exposed.mine);
    }
}
