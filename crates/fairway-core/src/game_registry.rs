use serde::Serialize;

use crate::game_trait::GameKind;

/// A game kind as shown in the catalog.
#[derive(Debug, Clone, Serialize)]
pub struct GameEntry {
    pub kind: GameKind,
    pub name: &'static str,
    pub settleable: bool,
}

/// All game kinds a round may select, in display order.
pub fn catalog() -> Vec<GameEntry> {
    GameKind::ALL
        .into_iter()
        .map(|kind| GameEntry {
            kind,
            name: match kind {
                GameKind::Banker => "Banker",
                GameKind::Nassau => "Nassau",
                GameKind::Skins => "Skins",
            },
            settleable: kind.is_settleable(),
        })
        .collect()
}
