//! Click targets recorded while rendering.

use roster_lib::query::SortMode;

use crate::ui::Rect;

/// Something a click can land on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Search,
    SortToggle,
    SortOption(SortMode),
    Row { id: u64, index: usize },
    PreviousPage,
    NextPage,
    PageInput,
    CloseDetail,
    DetailBody,
    Retry,
}

/// Regions drawn this frame, in paint order.
#[derive(Debug, Default)]
pub struct HitMap {
    regions: Vec<(Rect, Target)>,
}

impl HitMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.regions.clear();
    }

    pub fn push(&mut self, area: Rect, target: Target) {
        if area.width > 0 && area.height > 0 {
            self.regions.push((area, target));
        }
    }

    /// Topmost target at (`x`, `y`): later regions are painted over earlier ones.
    pub fn hit(&self, x: u16, y: u16) -> Option<Target> {
        self.regions
            .iter()
            .rev()
            .find(|(area, _)| area.contains(x, y))
            .map(|(_, target)| *target)
    }
}
