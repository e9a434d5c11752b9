//! Responsive grid metrics, recomputed once resizing settles

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::debounce::Debouncer;

/// Below this width the grid collapses to one column
pub const MOBILE_BREAKPOINT: u32 = 768;
/// Below this width cards use compact padding
pub const COMPACT_BREAKPOINT: u32 = 480;
/// Default resize-settle window
pub const RESIZE_SETTLE: Duration = Duration::from_millis(250);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum GridColumns {
    Single,
    AutoFill { min_px: u32 },
}

impl GridColumns {
    /// Value for `grid-template-columns`
    pub fn template(&self) -> String {
        match self {
            GridColumns::Single => "1fr".to_string(),
            GridColumns::AutoFill { min_px } => {
                format!("repeat(auto-fill, minmax({}px, 1fr))", min_px)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutMetrics {
    pub columns: GridColumns,
    pub gap_rem: f32,
    pub card_padding_rem: f32,
}

impl LayoutMetrics {
    pub fn for_width(width: u32) -> Self {
        let (columns, gap_rem) = if width < MOBILE_BREAKPOINT {
            (GridColumns::Single, 1.0)
        } else {
            (GridColumns::AutoFill { min_px: 300 }, 1.5)
        };
        let card_padding_rem = if width < COMPACT_BREAKPOINT { 1.0 } else { 2.0 };
        Self {
            columns,
            gap_rem,
            card_padding_rem,
        }
    }
}

/// Viewport width tracking with a settle window
#[derive(Debug, Clone)]
pub struct ResponsiveLayout {
    debouncer: Debouncer<u32>,
    current: LayoutMetrics,
}

impl ResponsiveLayout {
    /// Start from the initial viewport width
    pub fn new(initial_width: u32, settle: Duration) -> Self {
        Self {
            debouncer: Debouncer::new(settle),
            current: LayoutMetrics::for_width(initial_width),
        }
    }

    pub fn current(&self) -> LayoutMetrics {
        self.current
    }

    pub fn on_resize(&mut self, width: u32, now: Duration) {
        self.debouncer.schedule(width, now);
    }

    /// New metrics once resizing has settled
    pub fn poll(&mut self, now: Duration) -> Option<LayoutMetrics> {
        let width = self.debouncer.poll(now)?;
        self.current = LayoutMetrics::for_width(width);
        Some(self.current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(320, GridColumns::Single, 1.0, 1.0)]
    #[case(479, GridColumns::Single, 1.0, 1.0)]
    #[case(480, GridColumns::Single, 1.0, 2.0)]
    #[case(767, GridColumns::Single, 1.0, 2.0)]
    #[case(768, GridColumns::AutoFill { min_px: 300 }, 1.5, 2.0)]
    #[case(1440, GridColumns::AutoFill { min_px: 300 }, 1.5, 2.0)]
    fn test_breakpoints(
        #[case] width: u32,
        #[case] columns: GridColumns,
        #[case] gap: f32,
        #[case] padding: f32,
    ) {
        let metrics = LayoutMetrics::for_width(width);
        assert_eq!(metrics.columns, columns);
        assert_eq!(metrics.gap_rem, gap);
        assert_eq!(metrics.card_padding_rem, padding);
    }

    #[test]
    fn test_template() {
        assert_eq!(GridColumns::Single.template(), "1fr");
        assert_eq!(
            GridColumns::AutoFill { min_px: 300 }.template(),
            "repeat(auto-fill, minmax(300px, 1fr))"
        );
    }

    #[test]
    fn test_resize_storm_settles_once() {
        let mut layout = ResponsiveLayout::new(1280, RESIZE_SETTLE);
        for (i, width) in [1200, 900, 700, 600].into_iter().enumerate() {
            layout.on_resize(width, Duration::from_millis(i as u64 * 30));
        }
        assert_eq!(layout.poll(Duration::from_millis(300)), None);
        let settled = layout.poll(Duration::from_millis(340)).unwrap();
        assert_eq!(settled.columns, GridColumns::Single);
        assert_eq!(layout.current(), settled);
        assert_eq!(layout.poll(Duration::from_millis(1000)), None);
    }
}
