//! Per-language commentary line pools.
//!
//! English carries every pool. Other languages carry what they have; a
//! missing category falls back to English, and a missing stroke inside a
//! language's own stroke pools falls back to that language's generic pool.

mod en;
mod hi;
mod ta;

use crease_models::{BoundaryKind, DismissalMode, Language, ShotLabel};

/// A set of interchangeable lines.
pub type Pool = &'static [&'static str];

const EMPTY: Pool = &[];

/// Stroke pools for one language.
#[derive(Debug)]
pub struct ShotPools {
    pub generic: Pool,
    pub strokes: &'static [(ShotLabel, Pool)],
}

impl ShotPools {
    fn get(&self, label: ShotLabel) -> Pool {
        self.strokes
            .iter()
            .find(|(l, _)| *l == label)
            .map(|(_, pool)| *pool)
            .unwrap_or(self.generic)
    }
}

/// Boundary pools for one language.
#[derive(Debug)]
pub struct BoundaryPools {
    pub four: Pool,
    pub six: Pool,
}

/// All pools for one language.
#[derive(Debug)]
pub struct TemplateTable {
    pub language: Language,
    /// Said when nothing happened.
    pub default_line: &'static str,
    /// Lead-ins prefixed to stroke lines; each carries its own trailing separator.
    pub transitions: Pool,
    pub boundaries: Option<BoundaryPools>,
    pub shots: Option<ShotPools>,
    pub wickets: &'static [(DismissalMode, Pool)],
}

impl TemplateTable {
    /// Table for `language`.
    pub fn for_language(language: Language) -> &'static TemplateTable {
        match language {
            Language::En => &en::TABLE,
            Language::Hi => &hi::TABLE,
            Language::Ta => &ta::TABLE,
        }
    }

    pub fn boundary_pool(&self, kind: BoundaryKind) -> Pool {
        let pools = self.boundaries.as_ref().or(en::TABLE.boundaries.as_ref());
        match (pools, kind) {
            (Some(p), BoundaryKind::Four) => p.four,
            (Some(p), BoundaryKind::Six) => p.six,
            (None, _) => EMPTY,
        }
    }

    pub fn shot_pool(&self, label: ShotLabel) -> Pool {
        self.shots
            .as_ref()
            .or(en::TABLE.shots.as_ref())
            .map_or(EMPTY, |pools| pools.get(label))
    }

    pub fn wicket_pool(&self, mode: DismissalMode) -> Pool {
        let wickets = if self.wickets.is_empty() {
            en::TABLE.wickets
        } else {
            self.wickets
        };
        wickets
            .iter()
            .find(|(m, _)| *m == mode)
            .map_or(EMPTY, |(_, pool)| *pool)
    }
}
