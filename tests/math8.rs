mod tests {
    use sonatable_lights::math8::{offset16, qadd8, scale8, scale16};

    #[test]
    fn test_scale8() {
        assert_eq!(scale8(255, 128), 128);
        assert_eq!(scale8(0, 128), 0);
        assert_eq!(scale8(128, 128), 64);
        assert_eq!(scale8(128, 255), 128);
        assert_eq!(scale8(128, 0), 0);
    }

    #[test]
    fn test_scale16() {
        assert_eq!(scale16(65535, 65535), 65535);
        assert_eq!(scale16(65535, 240), 240);
        assert_eq!(scale16(32768, 1000), 500);
        assert_eq!(scale16(1234, 0), 0);
    }

    #[test]
    fn test_qadd8() {
        assert_eq!(qadd8(200, 100), 255);
        assert_eq!(qadd8(20, 30), 50);
    }

    #[test]
    fn test_offset16() {
        assert_eq!(offset16(-32768), 0);
        assert_eq!(offset16(0), 32768);
        assert_eq!(offset16(32767), 65535);
    }
}
