use crate::fox::frames::SPRITE_WIDTH;
use crate::fox::Fox;

/// Window and screen geometry sampled for this tick, in screen pixels.
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    /// Current x of the overlay window.
    pub window_x: i32,
    pub screen_width: i32,
    /// Physical width of the overlay window.
    pub overlay_width: i32,
}

/// Trot one step from where the window is now.
pub fn trot(fox: &mut Fox, view: &Viewport) {
    step(fox, view);
}

/// Pounce one step. Same stride as trotting; only the animation differs.
pub fn pounce(fox: &mut Fox, view: &Viewport) {
    step(fox, view);
}

fn step(fox: &mut Fox, view: &Viewport) {
    fox.position.x = view.window_x + fox.pounce_speed;
    flip(fox, view);
}

/// Reverse direction at the far edge and at the screen midpoint.
///
/// The two checks are independent: a position past both bounds (only
/// possible on a screen narrower than twice the overlay) negates twice and
/// keeps its direction.
pub fn flip(fox: &mut Fox, view: &Viewport) {
    let x = fox.position.x;

    if x >= view.screen_width - view.overlay_width - SPRITE_WIDTH {
        reverse(fox);
    }

    if x <= view.screen_width / 2 {
        reverse(fox);
    }
}

fn reverse(fox: &mut Fox) {
    fox.speed = -fox.speed;
    fox.pounce_speed = -fox.pounce_speed;
    log::trace!("fox turned at x={}, pounce_speed={}", fox.position.x, fox.pounce_speed);
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::IVec2;

    fn desk(window_x: i32) -> Viewport {
        Viewport {
            window_x,
            screen_width: 1280,
            overlay_width: 128,
        }
    }

    fn fox() -> Fox {
        Fox::new(IVec2::new(640, 900)).unwrap()
    }

    #[test]
    fn one_pixel_past_midpoint_keeps_direction() {
        let mut fox = fox();
        trot(&mut fox, &desk(640));

        assert_eq!(fox.position.x, 641);
        assert_eq!(fox.speed, 2);
        assert_eq!(fox.pounce_speed, 1);
    }

    #[test]
    fn far_edge_reverses() {
        let mut fox = fox();
        // 1119 + 1 = 1120 = 1280 - 128 - 32
        pounce(&mut fox, &desk(1119));

        assert_eq!(fox.position.x, 1120);
        assert_eq!(fox.speed, -2);
        assert_eq!(fox.pounce_speed, -1);
        assert!(fox.faces_left());
    }

    #[test]
    fn midpoint_reverses_back() {
        let mut fox = fox();
        fox.speed = -2;
        fox.pounce_speed = -1;
        trot(&mut fox, &desk(641));

        assert_eq!(fox.position.x, 640);
        assert_eq!(fox.speed, 2);
        assert_eq!(fox.pounce_speed, 1);
    }

    #[test]
    fn step_starts_from_window_not_stored_position() {
        let mut fox = fox();
        fox.position.x = 10;
        trot(&mut fox, &desk(700));
        assert_eq!(fox.position.x, 701);
    }

    #[test]
    fn both_bounds_at_once_cancel_out() {
        // Right bound 200 - 128 - 32 = 40, midpoint 100.
        for x in 40..=100 {
            let mut fox = fox();
            fox.position.x = x;
            flip(
                &mut fox,
                &Viewport {
                    window_x: x,
                    screen_width: 200,
                    overlay_width: 128,
                },
            );
            assert_eq!(fox.speed, 2, "x={x}");
            assert_eq!(fox.pounce_speed, 1, "x={x}");
        }
    }

    #[test]
    fn bounces_between_midpoint_and_far_edge() {
        let mut fox = fox();
        let mut x = 640;
        let mut seen_left = false;

        for _ in 0..2000 {
            trot(&mut fox, &desk(x));
            x = fox.position.x;
            assert!((640..=1120).contains(&x), "x={x}");
            seen_left |= fox.faces_left();
        }
        assert!(seen_left);
    }
}
