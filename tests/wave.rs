mod tests {
    use embassy_time::Instant;
    use sonatable_lights::wave::{
        beat8, beat16, beat88, beatsin8, beatsin16, beatsin88, sin8, sin16,
    };

    #[test]
    fn test_sin16_reference_points() {
        assert_eq!(sin16(0), 0);
        assert_eq!(sin16(8192), 23170);
        assert_eq!(sin16(16384), 32645);
        assert_eq!(sin16(32768), 0);
        assert_eq!(sin16(49152), -32645);
    }

    #[test]
    fn test_sin16_is_odd() {
        for theta in (0..32768u16).step_by(97) {
            assert_eq!(sin16(theta.wrapping_add(32768)), -sin16(theta));
        }
    }

    #[test]
    fn test_sin8_reference_points() {
        assert_eq!(sin8(0), 128);
        assert_eq!(sin8(64), 255);
        assert_eq!(sin8(128), 128);
        assert_eq!(sin8(192), 1);
    }

    #[test]
    fn test_beat_counters() {
        let start = Instant::from_millis(0);
        assert_eq!(beat88(15360, start), 0);
        assert_eq!(beat16(60, Instant::from_millis(500)), 32812);
        assert_eq!(beat16(60, Instant::from_millis(500)), beat88(60 << 8, Instant::from_millis(500)));
        assert_eq!(beat8(60, Instant::from_millis(500)), 128);
    }

    #[test]
    fn test_beatsin_stays_in_range() {
        for ms in (0..20_000u64).step_by(37) {
            let now = Instant::from_millis(ms);
            let value = beatsin8(10, 70, 130, now);
            assert!((70..=130).contains(&value), "{value} at {ms} ms");

            let value = beatsin16(3, 11 * 256, 14 * 256, now);
            assert!((11 * 256..=14 * 256).contains(&value), "{value} at {ms} ms");

            let value = beatsin88(1011, 10, 13, now);
            assert!((10..=13).contains(&value), "{value} at {ms} ms");
        }
    }

    #[test]
    fn test_beats_are_reproducible() {
        let now = Instant::from_millis(123_456);
        assert_eq!(beatsin16(4, 179, 269, now), beatsin16(4, 179, 269, now));
        assert_eq!(beat16(301, now), beat16(301, now));
    }
}
