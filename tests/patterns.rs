mod support;

mod tests {
    use embassy_time::{Duration, Instant};
    use sonatable_lights::{
        PixelSurface,
        Rgbw,
        SurfaceConfig,
        color::{rgb_to_rgbw, wheel},
        pattern::{
            GradientPulse, Landmarks, Pacifica, Pattern, PowerOn, Rainbow, Solid, Step,
            default_palettes,
        },
    };

    use crate::support::RecordingDriver;

    fn surface<const N: usize>() -> PixelSurface<RecordingDriver, N> {
        PixelSurface::new(RecordingDriver::default(), SurfaceConfig::default())
    }

    /// Drive a phase until it completes, returning the sleeps it asked for
    fn drive<F>(mut phase: F) -> Vec<Duration>
    where
        F: FnMut(Instant) -> Step,
    {
        let mut now = Instant::from_millis(0);
        let mut sleeps = Vec::new();
        loop {
            match phase(now) {
                Step::Sleep(delay) => {
                    sleeps.push(delay);
                    now += delay;
                }
                Step::Done => return sleeps,
            }
            assert!(sleeps.len() < 10_000, "phase never completes");
        }
    }

    #[test]
    fn test_solid_fades_in_to_exact_color() {
        let color = Rgbw::new(255, 0, 0, 0);
        let mut solid = Solid::new(color);
        let mut surface = surface::<8>();

        let sleeps = drive(|now| solid.enter(now, &mut surface));
        assert_eq!(sleeps.len(), 100);
        assert!(sleeps.iter().all(|delay| *delay == Duration::from_millis(10)));

        let frames = &surface.driver().frames;
        assert_eq!(frames.len(), 100);
        assert_eq!(frames[0][0], Rgbw::new(3, 0, 0, 0));
        assert_eq!(frames[49][0], Rgbw::new(128, 0, 0, 0));
        assert!(frames[99].iter().all(|pixel| *pixel == color));
    }

    #[test]
    fn test_solid_steady_state_and_exit() {
        let color = Rgbw::new(10, 20, 30, 40);
        let mut solid = Solid::new(color);
        let mut surface = surface::<8>();
        let now = Instant::from_millis(0);

        assert_eq!(solid.run(now, &mut surface), Step::Sleep(Duration::from_secs(1)));
        assert!(surface.driver().last().unwrap().iter().all(|p| *p == color));

        let sleeps = drive(|now| solid.exit(now, &mut surface));
        assert_eq!(sleeps.len(), 100);
        assert!(surface.driver().last().unwrap().iter().all(|p| *p == Rgbw::BLACK));
    }

    #[test]
    fn test_solid_increase_channel_wraps() {
        let mut solid = Solid::new(Rgbw::new(250, 0, 0, 0));
        solid.increase_channel(0, 10);
        assert_eq!(solid.color(), Rgbw::new(4, 0, 0, 0));
        solid.increase_channel(3, 1);
        assert_eq!(solid.color(), Rgbw::new(4, 0, 0, 1));
        solid.increase_channel(9, 1);
        assert_eq!(solid.color(), Rgbw::new(4, 0, 0, 1));
    }

    #[test]
    fn test_gradient_pulse_sweeps_both_ways() {
        let from = Rgbw::BLACK;
        let to = Rgbw::new(0, 0, 0, 200);
        let mut pulse = GradientPulse::new(from, to, 4, Duration::from_millis(30));
        let mut surface = surface::<3>();
        let now = Instant::from_millis(0);

        drive(|now| pulse.enter(now, &mut surface));
        assert_eq!(surface.driver().frames.len(), 1);
        assert_eq!(surface.driver().last().unwrap()[0], from);

        let mut whites = Vec::new();
        for _ in 0..9 {
            assert_eq!(pulse.run(now, &mut surface), Step::Sleep(Duration::from_millis(30)));
            whites.push(surface.driver().last().unwrap()[0].w);
        }
        assert_eq!(whites, vec![0, 50, 100, 150, 200, 150, 100, 50, 0]);

        drive(|now| pulse.exit(now, &mut surface));
        assert_eq!(surface.driver().last().unwrap()[2], Rgbw::BLACK);
    }

    #[test]
    fn test_gradient_pulse_zero_steps() {
        let mut pulse = GradientPulse::new(Rgbw::BLACK, Rgbw::WHITE, 0, Duration::from_millis(5));
        let mut surface = surface::<2>();
        let now = Instant::from_millis(0);
        pulse.run(now, &mut surface);
        pulse.run(now, &mut surface);
        pulse.run(now, &mut surface);
        let whites: Vec<u8> = surface.driver().frames.iter().map(|frame| frame[0].w).collect();
        assert_eq!(whites, vec![0, 255, 0]);
    }

    #[test]
    fn test_rainbow_rotates() {
        let mut rainbow = Rainbow::new(Duration::from_millis(50));
        let mut surface = surface::<4>();
        let now = Instant::from_millis(0);

        drive(|now| rainbow.enter(now, &mut surface));
        assert!(surface.driver().last().unwrap().iter().all(|p| *p == Rgbw::BLACK));

        rainbow.run(now, &mut surface);
        let expected: Vec<Rgbw> = [0u8, 63, 127, 191]
            .iter()
            .map(|&position| rgb_to_rgbw(wheel(position), false))
            .collect();
        assert_eq!(surface.driver().last().unwrap(), expected.as_slice());

        rainbow.run(now, &mut surface);
        assert_eq!(
            surface.driver().last().unwrap()[0],
            rgb_to_rgbw(wheel(1), false)
        );
    }

    #[test]
    fn test_power_on_sequence() {
        let mut power_on = PowerOn::new(Landmarks::DEFAULT);
        let mut surface = surface::<151>();
        let now = Instant::from_millis(0);

        drive(|now| power_on.enter(now, &mut surface));
        let frames = &surface.driver().frames;
        // blank, 81 flash positions (70 -> 0 clockwise), 60 line positions
        assert_eq!(frames.len(), 1 + 81 + 60);
        assert!(frames[0].iter().all(|p| *p == Rgbw::BLACK));
        assert_eq!(frames[1][70], Rgbw::FULL);
        assert_eq!(frames[1].iter().filter(|p| **p != Rgbw::BLACK).count(), 1);
        assert_eq!(frames[81][150], Rgbw::FULL);

        assert_eq!(surface.pixel(30), Rgbw::FULL);
        assert_eq!(surface.pixel(100), Rgbw::BLACK);

        assert_eq!(power_on.run(now, &mut surface), Step::Done);
        assert_eq!(surface.driver().frames.len(), 142);

        drive(|now| power_on.exit(now, &mut surface));
        assert!(surface.driver().last().unwrap().iter().all(|p| *p == Rgbw::BLACK));
    }

    #[test]
    fn test_pacifica_is_deterministic() {
        let mut first = Pacifica::new(Duration::from_millis(50), default_palettes(), true);
        let mut second = Pacifica::new(Duration::from_millis(50), default_palettes(), true);
        let mut surface_a = surface::<30>();
        let mut surface_b = surface::<30>();

        for ms in [0u64, 50, 100, 150, 5_000] {
            let now = Instant::from_millis(ms);
            assert_eq!(first.run(now, &mut surface_a), Step::Sleep(Duration::from_millis(50)));
            second.run(now, &mut surface_b);
            assert_eq!(surface_a.driver().last(), surface_b.driver().last());
        }

        let frame = surface_a.driver().last().unwrap();
        assert!(frame.iter().any(|p| p.b > 1));
    }
}
