//! Neighbourhood edge behavior for the step rule.

/// How the step rule treats neighbours that fall outside the grid.
///
/// This never changes how [`Grid`](crate::Grid) accessors behave: grid
/// reads and writes are always bounds-checked. `EdgeBehavior` only controls
/// which cells the step engine considers adjacent to a boundary cell.
///
/// # Examples
///
/// ```
/// use lifeloop_core::EdgeBehavior;
///
/// // Absorb: off-grid neighbours do not exist.
/// assert_eq!(EdgeBehavior::Absorb.resolve_axis(-1, 8), None);
/// // Wrap: off-grid neighbours come from the opposite side (torus).
/// assert_eq!(EdgeBehavior::Wrap.resolve_axis(-1, 8), Some(7));
/// assert_eq!(EdgeBehavior::Wrap.resolve_axis(8, 8), Some(0));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EdgeBehavior {
    /// Out-of-bounds neighbour is omitted and counts as dead.
    #[default]
    Absorb,
    /// Out-of-bounds neighbour wraps to the opposite side (toroidal grid).
    Wrap,
}

impl EdgeBehavior {
    /// Resolve a single axis value against an axis of length `len`.
    ///
    /// Returns `Some(index)` for in-range values (`0 <= val < len`), the
    /// wrapped index under [`Wrap`](Self::Wrap), or `None` for an
    /// out-of-range value under [`Absorb`](Self::Absorb).
    pub fn resolve_axis(self, val: i64, len: u32) -> Option<u32> {
        let n = i64::from(len);
        if (0..n).contains(&val) {
            return Some(val as u32);
        }
        match self {
            Self::Absorb => None,
            Self::Wrap => Some(val.rem_euclid(n) as u32),
        }
    }
}
