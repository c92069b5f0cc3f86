//! Layout engine: terminal size in, region geometry out.
//!
//! Pure and recomputed for every frame. The top half of the rows holds the
//! main menu and submenu side by side, the remainder minus one row holds
//! the action panel, and the last row is the status bar. Every height is
//! clamped at zero, so degenerate sizes still produce valid geometry.

use ratatui::layout::Rect;

/// Named display regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Region {
    Menu,
    Submenu,
    ActionPanel,
    StatusBar,
}

impl Region {
    pub const ALL: [Region; 4] = [
        Region::Menu,
        Region::Submenu,
        Region::ActionPanel,
        Region::StatusBar,
    ];
}

/// Concrete geometry for one terminal size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutGeometry {
    pub terminal_width: u16,
    pub terminal_height: u16,
    pub menu: Rect,
    pub submenu: Rect,
    pub action_panel: Rect,
    pub status_bar: Rect,
}

impl LayoutGeometry {
    pub fn region(&self, region: Region) -> Rect {
        match region {
            Region::Menu => self.menu,
            Region::Submenu => self.submenu,
            Region::ActionPanel => self.action_panel,
            Region::StatusBar => self.status_bar,
        }
    }

    /// True when the terminal is smaller than `min_width x min_height`.
    pub fn below_minimum(&self, min_width: u16, min_height: u16) -> bool {
        self.terminal_width < min_width || self.terminal_height < min_height
    }
}

/// Compute region geometry for a `width x height` terminal.
pub fn compute_layout(width: u16, height: u16) -> LayoutGeometry {
    let status_height = height.min(1);
    let top_height = height / 2;
    let middle_height = height
        .saturating_sub(top_height)
        .saturating_sub(status_height);

    let menu_width = width / 2;
    let submenu_width = width - menu_width;

    LayoutGeometry {
        terminal_width: width,
        terminal_height: height,
        menu: Rect::new(0, 0, menu_width, top_height),
        submenu: Rect::new(menu_width, 0, submenu_width, top_height),
        action_panel: Rect::new(0, top_height, width, middle_height),
        status_bar: Rect::new(0, top_height + middle_height, width, status_height),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn total_rows(g: &LayoutGeometry) -> u16 {
        g.menu.height + g.action_panel.height + g.status_bar.height
    }

    #[test]
    fn standard_split() {
        let g = compute_layout(80, 24);
        assert_eq!(g.menu, Rect::new(0, 0, 40, 12));
        assert_eq!(g.submenu, Rect::new(40, 0, 40, 12));
        assert_eq!(g.action_panel, Rect::new(0, 12, 80, 11));
        assert_eq!(g.status_bar, Rect::new(0, 23, 80, 1));
    }

    #[test]
    fn odd_sizes_cover_every_cell() {
        let g = compute_layout(81, 25);
        assert_eq!(g.menu.width + g.submenu.width, 81);
        assert_eq!(total_rows(&g), 25);
        assert_eq!(g.status_bar.y, 24);
    }

    #[test]
    fn zero_size_is_all_zero() {
        let g = compute_layout(0, 0);
        for region in Region::ALL {
            let r = g.region(region);
            assert_eq!((r.width, r.height), (0, 0), "{:?}", region);
        }
    }

    #[test]
    fn single_row_goes_to_status_bar() {
        let g = compute_layout(40, 1);
        assert_eq!(g.menu.height, 0);
        assert_eq!(g.action_panel.height, 0);
        assert_eq!(g.status_bar, Rect::new(0, 0, 40, 1));
    }

    #[test]
    fn tiny_heights_never_overflow() {
        for h in 0..6 {
            let g = compute_layout(10, h);
            assert_eq!(total_rows(&g), h, "height {}", h);
            assert!(g.status_bar.bottom() <= h);
        }
    }

    #[test]
    fn minimum_check() {
        assert!(compute_layout(59, 30).below_minimum(60, 12));
        assert!(compute_layout(100, 11).below_minimum(60, 12));
        assert!(!compute_layout(60, 12).below_minimum(60, 12));
    }
}
