//! Viewport breakpoints

/// Viewport size class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Breakpoint {
    Small,
    Medium,
    Large,
}

impl Breakpoint {
    pub const LARGE_MIN_WIDTH: u32 = 992;
    pub const MEDIUM_MIN_WIDTH: u32 = 768;

    pub fn from_width(width: u32) -> Self {
        if width >= Self::LARGE_MIN_WIDTH {
            Breakpoint::Large
        } else if width >= Self::MEDIUM_MIN_WIDTH {
            Breakpoint::Medium
        } else {
            Breakpoint::Small
        }
    }
}

/// Collapsed item count per breakpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreakpointLimits {
    pub large: usize,
    pub medium: usize,
    pub small: usize,
}

impl BreakpointLimits {
    pub const fn new(large: usize, medium: usize, small: usize) -> Self {
        Self { large, medium, small }
    }

    /// Same limit at every width
    pub const fn uniform(limit: usize) -> Self {
        Self::new(limit, limit, limit)
    }

    pub fn for_breakpoint(&self, breakpoint: Breakpoint) -> usize {
        match breakpoint {
            Breakpoint::Large => self.large,
            Breakpoint::Medium => self.medium,
            Breakpoint::Small => self.small,
        }
    }

    pub fn for_width(&self, width: u32) -> usize {
        self.for_breakpoint(Breakpoint::from_width(width))
    }
}
