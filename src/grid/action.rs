/// A single robot move, one cell in a compass direction.
///
/// The variant order is fixed: it doubles as the action-axis index of the
/// Q-table, so `Up` is index 0, `Right` 1, `Down` 2, `Left` 3. Tie-breaking
/// during greedy selection falls back to the lowest index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Up,
    Right,
    Down,
    Left,
}

impl Action {
    /// All actions in index order.
    pub const ALL: [Action; 4] = [Action::Up, Action::Right, Action::Down, Action::Left];

    /// Index of this action along the action axis of the Q-table.
    pub fn index(self) -> usize {
        match self {
            Action::Up => 0,
            Action::Right => 1,
            Action::Down => 2,
            Action::Left => 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_indices_match_declaration_order() {
        for (i, action) in Action::ALL.iter().enumerate() {
            assert_eq!(action.index(), i);
        }
    }

    #[test]
    fn test_action_order() {
        assert_eq!(
            Action::ALL,
            [Action::Up, Action::Right, Action::Down, Action::Left]
        );
    }
}
