#[cfg(test)]
mod tests {
    use dash_wm::geometry::Viewport;
    use dash_wm::window::{GestureController, ResizeEdge};
    use dash_wm::{WindowContent, WindowDefinition, WindowId, WindowManager, WindowRegistry};
    use ratatui::Frame;
    use ratatui::prelude::Rect;

    struct Blank;

    impl WindowContent for Blank {
        fn render(&mut self, _frame: &mut Frame<'_>, _area: Rect, _focused: bool) {}
    }

    fn definition(id: &str, width: u16, height: u16) -> WindowDefinition {
        WindowDefinition::new(id, id, width, height, Box::new(|| Box::new(Blank)))
    }

    fn desktop() -> WindowManager {
        let registry = WindowRegistry::new(vec![
            definition("alpha", 400, 400),
            definition("beta", 400, 300),
            definition("gamma", 480, 320),
        ])
        .unwrap();
        WindowManager::new(registry)
    }

    const VP: Viewport = Viewport {
        width: 1920,
        height: 1080,
    };

    /// A full desktop session: open two windows, drag one, shrink it to the
    /// minimum width, then minimize and restore the other.
    #[test]
    fn drag_resize_minimize_restore_session() {
        let mut wm = desktop();
        let alpha = WindowId::new("alpha");
        let beta = WindowId::new("beta");
        let mut gc = GestureController::new();

        wm.open_or_restore(&alpha);
        wm.open_or_restore(&beta);
        let z_alpha = wm.record(&alpha).unwrap().z_index;
        let z_beta = wm.record(&beta).unwrap().z_index;
        assert!(z_beta > z_alpha, "later-opened window starts on top");

        // Drag alpha by (+50, +30) from a grip inside its title bar.
        let w = wm.record(&alpha).unwrap();
        let (grip_x, grip_y) = (w.x + 100, w.y + 10);
        let (x0, y0) = (w.x, w.y);
        assert!(gc.begin_drag(&mut wm, &alpha, grip_x, grip_y));
        gc.pointer_move(&mut wm, grip_x + 50, grip_y + 30, VP);
        gc.pointer_up();
        let w = wm.record(&alpha).unwrap();
        assert_eq!((w.x, w.y), (x0 + 50, y0 + 30));
        assert!(
            w.z_index > z_beta,
            "starting a drag focuses the window above its siblings"
        );

        // Shrink alpha through its right handle by 200px: 400 -> 320 exactly,
        // never below the minimum.
        let (edge_x, edge_y) = (w.rect().right(), w.y + 100);
        assert!(gc.begin_resize(&mut wm, &alpha, ResizeEdge::Right, edge_x, edge_y));
        gc.pointer_move(&mut wm, edge_x - 200, edge_y, VP);
        assert_eq!(wm.record(&alpha).unwrap().width, 320);
        gc.pointer_move(&mut wm, edge_x - 1000, edge_y, VP);
        assert_eq!(wm.record(&alpha).unwrap().width, 320);
        gc.pointer_up();

        // Minimize beta, restore it: geometry intact, stack position on top.
        let before = wm.record(&beta).unwrap().rect();
        wm.minimize(&beta);
        assert!(!wm.is_open(&beta));
        assert!(wm.is_open(&alpha));
        wm.restore(&beta);
        let w = wm.record(&beta).unwrap();
        assert_eq!(w.rect(), before);
        assert_eq!(wm.top_window().unwrap().id, beta);
    }

    #[test]
    fn z_order_stays_strict_across_many_focus_changes() {
        let mut wm = desktop();
        for name in ["alpha", "beta", "gamma"] {
            wm.open_or_restore(&WindowId::new(name));
        }
        for name in ["beta", "alpha", "gamma", "beta", "beta", "alpha"] {
            let id = WindowId::new(name);
            wm.focus(&id);
            assert_eq!(wm.top_window().unwrap().id, id);
            let zs: Vec<u64> = wm.windows_by_z().iter().map(|w| w.z_index).collect();
            let mut sorted = zs.clone();
            sorted.sort_unstable();
            sorted.dedup();
            assert_eq!(zs.len(), sorted.len(), "z indices must stay unique");
        }
    }

    #[test]
    fn closing_mid_gesture_leaves_a_consistent_desktop() {
        let mut wm = desktop();
        let alpha = WindowId::new("alpha");
        let beta = WindowId::new("beta");
        let mut gc = GestureController::new();
        wm.open_or_restore(&alpha);
        wm.open_or_restore(&beta);

        let w = wm.record(&alpha).unwrap();
        let (wx, wy) = (w.x, w.y);
        assert!(gc.begin_drag(&mut wm, &alpha, wx + 50, wy + 10));
        wm.close(&alpha);
        // Queued pointer traffic for the closed window must change nothing.
        gc.pointer_move(&mut wm, 900, 900, VP);
        gc.pointer_up();
        assert!(!wm.exists(&alpha));
        assert!(wm.is_open(&beta));
        assert_eq!(wm.top_window().unwrap().id, beta);

        // Reopening starts from definition defaults again.
        wm.open_or_restore(&alpha);
        assert_eq!(wm.record(&alpha).unwrap().width, 400);
    }

    #[test]
    fn locked_window_keeps_taskbar_and_buttons_working() {
        let mut wm = desktop();
        let alpha = WindowId::new("alpha");
        let mut gc = GestureController::new();
        wm.open_or_restore(&alpha);
        wm.toggle_lock(&alpha);

        let before = wm.record(&alpha).unwrap().rect();
        assert!(!gc.begin_drag(&mut wm, &alpha, before.x + 10, before.y + 10));
        assert!(!gc.begin_resize(
            &mut wm,
            &alpha,
            ResizeEdge::BottomRight,
            before.right(),
            before.bottom()
        ));
        assert_eq!(wm.record(&alpha).unwrap().rect(), before);

        // Minimize, restore and close stay available while locked.
        wm.toggle(&alpha);
        assert!(!wm.is_open(&alpha));
        wm.toggle(&alpha);
        assert!(wm.is_open(&alpha));
        assert!(wm.record(&alpha).unwrap().locked);
        wm.close(&alpha);
        assert!(!wm.exists(&alpha));
    }
}
