use glam::IVec2;

use super::movement::{self, Viewport};
use crate::fox::{Fox, FoxState};

/// Seconds in Idle before the fox considers doing something else.
const IDLE_RESTLESS_AFTER: u32 = 5;
/// Roll above which a restless fox starts trotting.
const TROT_THRESHOLD: f64 = 0.6;
/// Roll below which a restless fox looks behind instead of napping.
const LOOK_BEHIND_THRESHOLD: f64 = 0.5;
/// LookBehind ends when the dwell timer reads exactly this.
const LOOK_BEHIND_SECS: u32 = 3;
/// Shocked ends when the dwell timer reads exactly this.
const SHOCKED_SECS: u32 = 2;
/// Trotting and Pouncing end once the dwell timer passes this.
const MOVING_SECS: u32 = 2;

/// Inclusive rectangle in overlay-local logical pixels.
#[derive(Debug, Clone, Copy)]
pub struct HotZone {
    min: IVec2,
    max: IVec2,
}

impl HotZone {
    const fn new(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Self {
        Self {
            min: IVec2::new(min_x, min_y),
            max: IVec2::new(max_x, max_y),
        }
    }

    pub fn contains(&self, p: IVec2) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }
}

/// Clicking here startles the fox.
pub const SHOCK_ZONE: HotZone = HotZone::new(15, 15, 25, 25);
/// Hovering beside the fox, either side, makes it pounce.
pub const POUNCE_ZONES: [HotZone; 2] = [
    HotZone::new(-10, 15, -5, 30),
    HotZone::new(30, 15, 40, 30),
];

/// Input sampled for this tick.
#[derive(Debug, Clone, Copy)]
pub struct Stimulus {
    /// Pointer in overlay-local logical pixels, `None` if unknown.
    pub pointer: Option<IVec2>,
    pub left_pressed: bool,
}

impl Stimulus {
    fn pointer_in(&self, zone: &HotZone) -> bool {
        self.pointer.is_some_and(|p| zone.contains(p))
    }
}

/// Source of uniform rolls in `[0, 1)`.
pub trait RandomSource {
    fn roll(&mut self) -> f64;
}

impl RandomSource for fastrand::Rng {
    fn roll(&mut self) -> f64 {
        self.f64()
    }
}

/// Run one tick of the fox's state machine.
///
/// Every rule below is checked in order, none returns early: a later rule
/// may overwrite what an earlier one chose in the same tick. Trotting and
/// Pouncing move the fox on the tick they time out as well.
pub fn update<R: RandomSource + ?Sized>(
    fox: &mut Fox,
    dwell: &mut u32,
    stimulus: &Stimulus,
    view: &Viewport,
    rng: &mut R,
) {
    // 1. Clicked on the fox
    if stimulus.left_pressed && stimulus.pointer_in(&SHOCK_ZONE) {
        *dwell = 0;
        fox.set_state(FoxState::Shocked);
    }

    // 2. Restless idle: both rolls are drawn even if the first one decides.
    if fox.state() == FoxState::Idle && *dwell > IDLE_RESTLESS_AFTER {
        let trot_roll = rng.roll();
        let rest_roll = rng.roll();

        let next = if trot_roll > TROT_THRESHOLD {
            FoxState::Trotting
        } else if rest_roll < LOOK_BEHIND_THRESHOLD {
            FoxState::LookBehind
        } else {
            FoxState::Sleeping
        };
        *dwell = 0;
        fox.set_state(next);
    }

    // 3. Pointer hovering beside the fox
    if POUNCE_ZONES.iter().any(|zone| stimulus.pointer_in(zone)) {
        *dwell = 0;
        fox.set_state(FoxState::Pouncing);
    }

    // 4. Per-state timeouts
    match fox.state() {
        FoxState::LookBehind => {
            if *dwell == LOOK_BEHIND_SECS {
                fox.set_state(FoxState::Idle);
            }
        }
        FoxState::Shocked => {
            if *dwell == SHOCKED_SECS {
                *dwell = 0;
                fox.set_state(FoxState::Idle);
            }
        }
        FoxState::Trotting => {
            if *dwell > MOVING_SECS {
                fox.set_state(FoxState::Idle);
            }
            movement::trot(fox, view);
        }
        FoxState::Pouncing => {
            if *dwell > MOVING_SECS {
                fox.set_state(FoxState::Idle);
            }
            movement::pounce(fox, view);
        }
        FoxState::Idle | FoxState::Sleeping | FoxState::Dying => {}
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;

    /// Hands out pre-chosen rolls and counts how many were taken.
    struct Scripted {
        rolls: VecDeque<f64>,
        taken: usize,
    }

    impl Scripted {
        fn new(rolls: &[f64]) -> Self {
            Self {
                rolls: rolls.iter().copied().collect(),
                taken: 0,
            }
        }
    }

    impl RandomSource for Scripted {
        fn roll(&mut self) -> f64 {
            self.taken += 1;
            self.rolls.pop_front().expect("ran out of scripted rolls")
        }
    }

    const VIEW: Viewport = Viewport {
        window_x: 800,
        screen_width: 1280,
        overlay_width: 128,
    };

    fn fox_in(state: FoxState) -> Fox {
        let mut fox = Fox::new(IVec2::new(800, 900)).unwrap();
        fox.set_state(state);
        fox
    }

    fn away() -> Stimulus {
        Stimulus {
            pointer: Some(IVec2::new(200, 200)),
            left_pressed: false,
        }
    }

    fn click_at(x: i32, y: i32) -> Stimulus {
        Stimulus {
            pointer: Some(IVec2::new(x, y)),
            left_pressed: true,
        }
    }

    fn hover_at(x: i32, y: i32) -> Stimulus {
        Stimulus {
            pointer: Some(IVec2::new(x, y)),
            left_pressed: false,
        }
    }

    #[test]
    fn click_on_fox_shocks_from_any_state() {
        for state in FoxState::ALL {
            let mut fox = fox_in(state);
            let mut dwell = 7;
            let mut rng = fastrand::Rng::with_seed(1);
            update(&mut fox, &mut dwell, &click_at(20, 20), &VIEW, &mut rng);

            assert_eq!(fox.state(), FoxState::Shocked, "from {state:?}");
            assert_eq!(dwell, 0);
        }
    }

    #[test]
    fn shock_zone_edges_are_inclusive() {
        for (x, y) in [(15, 15), (25, 25), (15, 25), (25, 15)] {
            let mut fox = fox_in(FoxState::Sleeping);
            let mut dwell = 1;
            update(&mut fox, &mut dwell, &click_at(x, y), &VIEW, &mut Scripted::new(&[]));
            assert_eq!(fox.state(), FoxState::Shocked, "({x},{y})");
        }

        let mut fox = fox_in(FoxState::Sleeping);
        let mut dwell = 1;
        update(&mut fox, &mut dwell, &click_at(26, 20), &VIEW, &mut Scripted::new(&[]));
        assert_eq!(fox.state(), FoxState::Sleeping);
    }

    #[test]
    fn hover_without_click_does_not_shock() {
        let mut fox = fox_in(FoxState::Sleeping);
        let mut dwell = 1;
        update(&mut fox, &mut dwell, &hover_at(20, 20), &VIEW, &mut Scripted::new(&[]));
        assert_eq!(fox.state(), FoxState::Sleeping);
        assert_eq!(dwell, 1);
    }

    #[test]
    fn idle_waits_until_restless() {
        let mut fox = fox_in(FoxState::Idle);
        let mut dwell = 5;
        let mut rng = Scripted::new(&[]);
        update(&mut fox, &mut dwell, &away(), &VIEW, &mut rng);

        assert_eq!(fox.state(), FoxState::Idle);
        assert_eq!(rng.taken, 0);
    }

    #[test]
    fn restless_idle_branches_on_rolls() {
        let cases = [
            ([0.61, 0.1], FoxState::Trotting),
            ([0.61, 0.9], FoxState::Trotting),
            ([0.6, 0.49], FoxState::LookBehind),
            ([0.2, 0.5], FoxState::Sleeping),
            ([0.0, 0.99], FoxState::Sleeping),
        ];

        for (rolls, expected) in cases {
            let mut fox = fox_in(FoxState::Idle);
            let mut dwell = 6;
            let mut rng = Scripted::new(&rolls);
            update(&mut fox, &mut dwell, &away(), &VIEW, &mut rng);

            assert_eq!(fox.state(), expected, "rolls {rolls:?}");
            assert_eq!(dwell, 0);
            assert_eq!(rng.taken, 2, "both rolls drawn for {rolls:?}");
        }
    }

    #[test]
    fn restless_idle_distribution() {
        const TRIALS: usize = 20_000;
        let mut rng = fastrand::Rng::with_seed(0x5eed);
        let (mut trot, mut look, mut sleep) = (0usize, 0usize, 0usize);

        for _ in 0..TRIALS {
            let mut fox = fox_in(FoxState::Idle);
            let mut dwell = 6;
            update(&mut fox, &mut dwell, &away(), &VIEW, &mut rng);
            match fox.state() {
                FoxState::Trotting => trot += 1,
                FoxState::LookBehind => look += 1,
                FoxState::Sleeping => sleep += 1,
                other => panic!("unexpected {other:?}"),
            }
        }

        let share = |n: usize| n as f64 / TRIALS as f64;
        assert!((share(trot) - 0.4).abs() < 0.02, "trot {}", share(trot));
        assert!((share(look) - 0.3).abs() < 0.02, "look {}", share(look));
        assert!((share(sleep) - 0.3).abs() < 0.02, "sleep {}", share(sleep));
    }

    #[test]
    fn pounce_zones_trigger_pounce() {
        for (x, y) in [(-10, 15), (-5, 30), (-7, 20), (30, 15), (40, 30), (35, 22)] {
            let mut fox = fox_in(FoxState::Sleeping);
            let mut dwell = 4;
            update(&mut fox, &mut dwell, &hover_at(x, y), &VIEW, &mut Scripted::new(&[]));
            assert_eq!(fox.state(), FoxState::Pouncing, "({x},{y})");
            assert_eq!(dwell, 0);
        }

        for (x, y) in [(-4, 20), (-11, 20), (29, 20), (41, 20), (35, 14), (35, 31)] {
            let mut fox = fox_in(FoxState::Sleeping);
            let mut dwell = 4;
            update(&mut fox, &mut dwell, &hover_at(x, y), &VIEW, &mut Scripted::new(&[]));
            assert_eq!(fox.state(), FoxState::Sleeping, "({x},{y})");
        }
    }

    #[test]
    fn pounce_overrides_idle_branch_in_same_tick() {
        let mut fox = fox_in(FoxState::Idle);
        let mut dwell = 9;
        let mut rng = Scripted::new(&[0.1, 0.1]);
        update(&mut fox, &mut dwell, &hover_at(35, 20), &VIEW, &mut rng);

        assert_eq!(fox.state(), FoxState::Pouncing);
        assert_eq!(rng.taken, 2);
        assert_eq!(fox.position.x, VIEW.window_x + 1);
    }

    #[test]
    fn click_beside_fox_is_a_pounce() {
        let mut fox = fox_in(FoxState::Idle);
        let mut dwell = 1;
        update(&mut fox, &mut dwell, &click_at(35, 20), &VIEW, &mut Scripted::new(&[]));
        assert_eq!(fox.state(), FoxState::Pouncing);
    }

    #[test]
    fn look_behind_ends_exactly_at_three() {
        for (dwell_in, expected) in [
            (2, FoxState::LookBehind),
            (3, FoxState::Idle),
            (4, FoxState::LookBehind),
        ] {
            let mut fox = fox_in(FoxState::LookBehind);
            let mut dwell = dwell_in;
            update(&mut fox, &mut dwell, &away(), &VIEW, &mut Scripted::new(&[]));
            assert_eq!(fox.state(), expected, "dwell {dwell_in}");
            assert_eq!(dwell, dwell_in);
        }
    }

    #[test]
    fn shocked_ends_exactly_at_two_and_resets_timer() {
        for (dwell_in, expected, dwell_out) in [
            (1, FoxState::Shocked, 1),
            (2, FoxState::Idle, 0),
            (3, FoxState::Shocked, 3),
        ] {
            let mut fox = fox_in(FoxState::Shocked);
            let mut dwell = dwell_in;
            update(&mut fox, &mut dwell, &away(), &VIEW, &mut Scripted::new(&[]));
            assert_eq!(fox.state(), expected, "dwell {dwell_in}");
            assert_eq!(dwell, dwell_out);
        }
    }

    #[test]
    fn trotting_moves_and_times_out() {
        let mut fox = fox_in(FoxState::Trotting);
        let mut dwell = 2;
        update(&mut fox, &mut dwell, &away(), &VIEW, &mut Scripted::new(&[]));
        assert_eq!(fox.state(), FoxState::Trotting);
        assert_eq!(fox.position.x, 801);

        let mut dwell = 3;
        update(&mut fox, &mut dwell, &away(), &VIEW, &mut Scripted::new(&[]));
        assert_eq!(fox.state(), FoxState::Idle);
        // Still took its last step.
        assert_eq!(fox.position.x, 801);
        assert_eq!(dwell, 3);
    }

    #[test]
    fn pouncing_moves_on_timeout_tick() {
        let mut fox = fox_in(FoxState::Pouncing);
        let mut dwell = 3;
        let view = Viewport {
            window_x: 900,
            ..VIEW
        };
        update(&mut fox, &mut dwell, &away(), &view, &mut Scripted::new(&[]));
        assert_eq!(fox.state(), FoxState::Idle);
        assert_eq!(fox.position.x, 901);
    }

    #[test]
    fn resting_states_have_no_timeout() {
        for state in [FoxState::Sleeping, FoxState::Dying] {
            for dwell_in in 0..20 {
                let mut fox = fox_in(state);
                let mut dwell = dwell_in;
                update(&mut fox, &mut dwell, &away(), &VIEW, &mut Scripted::new(&[]));
                assert_eq!(fox.state(), state);
                assert_eq!(fox.position.x, 800);
            }
        }
    }

    #[test]
    fn unknown_pointer_triggers_nothing() {
        let mut fox = fox_in(FoxState::Sleeping);
        let mut dwell = 1;
        let stimulus = Stimulus {
            pointer: None,
            left_pressed: true,
        };
        update(&mut fox, &mut dwell, &stimulus, &VIEW, &mut Scripted::new(&[]));
        assert_eq!(fox.state(), FoxState::Sleeping);
    }
}
