//! ナビゲーションバーの状態
//!
//! スクロール位置によるスタイル切り替えと、モバイルメニューの開閉。
//! メニューは閉じるときに退場アニメーションを挟むので3状態を持つ。

/// ナビゲーションリンク
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavLink {
    pub href: &'static str,
    pub label: &'static str,
}

pub const NAV_LINKS: [NavLink; 2] = [
    NavLink { href: "#proyectos", label: "Proyectos" },
    NavLink { href: "#contacto", label: "Contacto" },
];

/// 右端の CTA ボタン
pub const NAV_CTA: NavLink = NavLink { href: "#contacto", label: "Trabajemos" };

/// モバイルメニューの表示段階
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MenuPhase {
    #[default]
    Closed,
    Open,
    /// 退場アニメーション中（DOMにはまだ残す）
    Closing,
}

impl MenuPhase {
    /// DOMに描画するか
    pub fn is_mounted(self) -> bool {
        self != MenuPhase::Closed
    }

    /// トグルボタンのアイコン用
    pub fn is_open(self) -> bool {
        self == MenuPhase::Open
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NavState {
    scrolled: bool,
    menu: MenuPhase,
}

impl NavState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_scrolled(&self) -> bool {
        self.scrolled
    }

    pub fn menu(&self) -> MenuPhase {
        self.menu
    }

    /// スクロール位置を反映。スタイルが切り替わったら true
    pub fn on_scroll(&mut self, scroll_y: f64, threshold: f64) -> bool {
        let scrolled = scroll_y > threshold;
        let changed = scrolled != self.scrolled;
        self.scrolled = scrolled;
        changed
    }

    /// トグルボタン
    ///
    /// 退場中に押された場合は開き直す。
    pub fn toggle_menu(&mut self) -> MenuPhase {
        self.menu = match self.menu {
            MenuPhase::Closed | MenuPhase::Closing => MenuPhase::Open,
            MenuPhase::Open => MenuPhase::Closing,
        };
        self.menu
    }

    /// メニュー内のリンクを押したとき
    pub fn close_menu(&mut self) -> MenuPhase {
        if self.menu == MenuPhase::Open {
            self.menu = MenuPhase::Closing;
        }
        self.menu
    }

    /// 退場アニメーション完了。開き直されていたら何もしない
    pub fn exit_finished(&mut self) -> bool {
        if self.menu == MenuPhase::Closing {
            self.menu = MenuPhase::Closed;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_threshold_is_exclusive() {
        let mut nav = NavState::new();
        assert!(!nav.on_scroll(50.0, 50.0));
        assert!(!nav.is_scrolled());
        assert!(nav.on_scroll(51.0, 50.0));
        assert!(nav.is_scrolled());
        assert!(!nav.on_scroll(400.0, 50.0));
        assert!(nav.on_scroll(0.0, 50.0));
    }

    #[test]
    fn test_menu_cycle() {
        let mut nav = NavState::new();
        assert_eq!(nav.toggle_menu(), MenuPhase::Open);
        assert_eq!(nav.toggle_menu(), MenuPhase::Closing);
        assert!(nav.menu().is_mounted());
        assert!(nav.exit_finished());
        assert_eq!(nav.menu(), MenuPhase::Closed);
        assert!(!nav.menu().is_mounted());
    }

    #[test]
    fn test_reopen_during_exit() {
        let mut nav = NavState::new();
        nav.toggle_menu();
        nav.close_menu();
        assert_eq!(nav.toggle_menu(), MenuPhase::Open);
        // 古い退場アニメーションの完了通知は無視
        assert!(!nav.exit_finished());
        assert!(nav.menu().is_open());
    }

    #[test]
    fn test_close_when_closed_is_noop() {
        let mut nav = NavState::new();
        assert_eq!(nav.close_menu(), MenuPhase::Closed);
        assert!(!nav.exit_finished());
    }

    #[test]
    fn test_links_are_fragments() {
        for link in NAV_LINKS.iter().chain(std::iter::once(&NAV_CTA)) {
            assert!(link.href.starts_with('#'));
        }
    }
}
