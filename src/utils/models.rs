/// Collection of char for the table
#[derive(Clone, Copy)]
pub enum TabChar {
    /// Vertical bar
    Bv,
    /// Horizontal bar
    Bh,
    /// Joint left
    Jl,
    /// Joint right
    Jr,
    /// Joint bottom left
    Jbl,
    /// Joint bottom right
    Jbr,
    /// Joint top left
    Jtl,
    /// Joint top right
    Jtr,
    /// Joint to top
    Jtt,
    /// Joint to bottom
    Jtb,
    /// Joint of the middle
    Jm,
}

impl TabChar {
    /// Value of the element
    pub fn val(self) -> char {
        match self {
            Self::Bv => '│',
            Self::Bh => '─',
            Self::Jl => '├',
            Self::Jr => '┤',
            Self::Jbl => '└',
            Self::Jbr => '┘',
            Self::Jtl => '┌',
            Self::Jtr => '┐',
            Self::Jtt => '┴',
            Self::Jtb => '┬',
            Self::Jm => '┼',
        }
    }

    /// Joint of a middle line, knowing if the rule goes on each side
    pub fn joint(left: bool, right: bool) -> Self {
        match (left, right) {
            (true, true) => Self::Jm,
            (true, false) => Self::Jr,
            (false, true) => Self::Jl,
            (false, false) => Self::Bv,
        }
    }
}

/// Position for lines inside the table
#[derive(Clone, Copy)]
pub enum Position {
    Top,
    Middle,
    Bottom,
}
