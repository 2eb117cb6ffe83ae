use crate::model::mode::ViewMode;
use crate::msg::Direction;
use crate::plugin::manifest::PluginId;

/// Selected plugin identity plus the layout parameters navigation depends on.
#[derive(Debug, Clone)]
pub struct Selection {
    selected: Option<PluginId>,
    view_mode: ViewMode,
    grid_columns: usize,
}

impl Selection {
    pub fn new(view_mode: ViewMode, grid_columns: usize) -> Self {
        Self {
            selected: None,
            view_mode,
            grid_columns: grid_columns.max(1),
        }
    }

    pub fn selected(&self) -> Option<&PluginId> {
        self.selected.as_ref()
    }

    pub fn select(&mut self, id: PluginId) {
        self.selected = Some(id);
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    /// Switch layout. Selection is untouched.
    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.view_mode = mode;
    }

    pub fn grid_columns(&self) -> usize {
        self.grid_columns
    }

    pub fn set_grid_columns(&mut self, columns: usize) {
        self.grid_columns = columns.max(1);
    }

    /// Columns navigation works with: the grid width, or 1 for row layouts.
    pub fn columns(&self) -> usize {
        match self.view_mode {
            ViewMode::Grid => self.grid_columns,
            ViewMode::List | ViewMode::Table => 1,
        }
    }

    /// Index of the selection in `ids`, 0 when unset or absent.
    pub fn index_in(&self, ids: &[PluginId]) -> usize {
        self.selected
            .as_ref()
            .and_then(|selected| ids.iter().position(|id| id == selected))
            .unwrap_or(0)
    }

    /// Apply a keyboard move. Returns true when the selection changed.
    pub fn move_selection(&mut self, direction: Direction, ids: &[PluginId]) -> bool {
        let Some(next) = next_index(
            self.index_in(ids),
            direction,
            self.view_mode,
            self.grid_columns,
            ids.len(),
        ) else {
            return false;
        };

        let next_id = ids[next].clone();
        if self.selected.as_ref() == Some(&next_id) {
            return false;
        }
        self.selected = Some(next_id);
        true
    }

    /// Keep the selection pointing into `ids`: fall back to the first id, or
    /// nothing when `ids` is empty.
    pub fn reconcile(&mut self, ids: &[PluginId]) {
        let still_present = self
            .selected
            .as_ref()
            .is_some_and(|selected| ids.contains(selected));

        if !still_present {
            self.selected = ids.first().cloned();
        }
    }
}

/// Column-aware navigation over a flat ordered sequence of `len` items.
///
/// Returns `None` only when there is nothing to select; every other result is
/// within `0..len`.
pub fn next_index(
    idx: usize,
    direction: Direction,
    mode: ViewMode,
    columns: usize,
    len: usize,
) -> Option<usize> {
    if len == 0 {
        return None;
    }

    let last = len - 1;
    let idx = idx.min(last);
    let columns = match mode {
        ViewMode::Grid => columns.max(1),
        ViewMode::List | ViewMode::Table => 1,
    };
    let row = idx / columns;
    let col = idx % columns;
    let rows = len.div_ceil(columns);

    let next = match (mode, direction) {
        (_, Direction::Home) => 0,
        (_, Direction::End) => last,
        (ViewMode::Grid, Direction::Left) => idx.saturating_sub(1),
        (ViewMode::Grid, Direction::Right) => (idx + 1).min(last),
        (ViewMode::Grid, Direction::Up) if row > 0 => (row - 1) * columns + col,
        (ViewMode::Grid, Direction::Down) if row + 1 < rows => {
            ((row + 1) * columns + col).min(last)
        }
        (ViewMode::Grid, Direction::Up | Direction::Down) => idx,
        (_, Direction::Left | Direction::Right) => idx,
        (_, Direction::Up) => idx.saturating_sub(1),
        (_, Direction::Down) => (idx + 1).min(last),
    };

    Some(next)
}
