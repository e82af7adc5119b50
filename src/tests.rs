#[cfg(test)]
mod tests {
    use crate::automaton::random::SequenceSource;
    use crate::automaton::{AnimationDriver, TickOutcome};
    use crate::config::{AutomatonConfig, Preset};
    use crate::ffi::{
        pa_copy_frame, pa_create, pa_destroy, pa_frame_size, pa_get_generation, pa_is_running,
        pa_rule_active, pa_set_running, pa_set_speed, pa_tick, pa_toggle_rule,
    };
    use std::ptr;

    unsafe fn copy_frame(driver: *const AnimationDriver) -> Vec<u8> {
        let (mut w, mut h) = (0u32, 0u32);
        let len = pa_frame_size(driver, &mut w, &mut h);
        assert_eq!(len, w as u64 * h as u64 * 4);
        let mut out = vec![0u8; len as usize];
        assert_eq!(pa_copy_frame(driver, out.as_mut_ptr(), len), len);
        out
    }

    #[test]
    fn test_host_session_lifecycle() {
        unsafe {
            let driver = pa_create(Preset::Grouping as u8, 11);
            assert!(!driver.is_null(), "pa_create() should not return null");
            assert_eq!(pa_get_generation(driver), 0);
            assert_eq!(pa_is_running(driver), 1);

            // 20 fps: one step every 50 ms of host time
            let mut steps = 0;
            for frame in 1..=40 {
                if pa_tick(driver, frame as f64 * 25.0) == 2 {
                    steps += 1;
                }
            }
            assert_eq!(steps, 20);
            assert_eq!(pa_get_generation(driver), 20);

            let frame = copy_frame(driver);
            assert!(frame.chunks_exact(4).all(|px| px[3] == 255));

            pa_set_running(driver, 0);
            assert_eq!(pa_tick(driver, 10_000.0), 0);
            assert_eq!(pa_get_generation(driver), 20);
            assert_eq!(copy_frame(driver), frame, "Paused ticks must not repaint");

            pa_destroy(driver);
        }
    }

    #[test]
    fn test_seeded_sessions_are_reproducible() {
        unsafe {
            let a = pa_create(Preset::RandomizedStream as u8, 42);
            let b = pa_create(Preset::RandomizedStream as u8, 42);

            for t in 1..=6 {
                assert_eq!(pa_tick(a, t as f64 * 50.0), 2);
                assert_eq!(pa_tick(b, t as f64 * 50.0), 2);
            }
            assert_eq!(copy_frame(a), copy_frame(b));

            pa_destroy(a);
            pa_destroy(b);
        }
    }

    #[test]
    fn test_speed_change_mid_session() {
        unsafe {
            let driver = pa_create(Preset::NumberStream as u8, 3);
            assert_eq!(pa_tick(driver, 50.0), 2);

            assert_eq!(pa_set_speed(driver, 5), 0);
            // 200 ms interval now
            assert_eq!(pa_tick(driver, 200.0), 1);
            assert_eq!(pa_tick(driver, 250.0), 2);

            assert_eq!(pa_set_speed(driver, 100), 1);
            assert_eq!(pa_tick(driver, 300.0), 1, "Rejected speed keeps 200 ms interval");
            assert_eq!(pa_get_generation(driver), 2);

            pa_destroy(driver);
        }
    }

    #[test]
    fn test_rules_panel_toggles_round_trip() {
        unsafe {
            let driver = pa_create(Preset::RulesPanel as u8, 9);

            assert_eq!(pa_toggle_rule(driver, c"Negative World".as_ptr()), 1);
            assert_eq!(pa_toggle_rule(driver, c"Heatmap Mode".as_ptr()), 1);
            assert_eq!(pa_tick(driver, 100.0), 2);
            assert_eq!(pa_rule_active(driver, c"Negative World".as_ptr()), 1);
            // Catalog rule without a color effect is still tracked
            assert_eq!(pa_rule_active(driver, c"Heatmap Mode".as_ptr()), 1);

            assert_eq!(pa_toggle_rule(driver, c"Negative World".as_ptr()), 1);
            assert_eq!(pa_tick(driver, 200.0), 2);
            assert_eq!(pa_rule_active(driver, c"Negative World".as_ptr()), 0);

            pa_destroy(driver);
        }
    }

    #[test]
    fn test_toggle_stack_colors() {
        // Constant draws give every pixel a base of (128, 128, 128).
        let config = AutomatonConfig {
            size: 3,
            ..AutomatonConfig::rules_panel()
        };
        let mut driver =
            AnimationDriver::with_random_source(&config, Box::new(SequenceSource::constant(0.5)))
                .unwrap();
        driver.toggle_rule("Pixel Mass");
        driver.toggle_rule("Prime Number Clusters");
        driver.step().unwrap();

        let frame = driver.frame();
        for index in 0..9 {
            let px = &frame[index * 4..index * 4 + 4];
            let expected: [u8; 4] = match index {
                // Yellow, then mass: (255 + 255 + 0) / 3 = 170
                2 | 3 | 5 | 7 => [170, 170, 190, 255],
                _ => [128, 128, 148, 255],
            };
            assert_eq!(px, expected, "pixel {}", index);
        }
    }

    #[test]
    fn test_number_stream_first_column() {
        let config = AutomatonConfig {
            size: 5,
            ..AutomatonConfig::number_stream()
        };
        let mut driver =
            AnimationDriver::with_random_source(&config, Box::new(SequenceSource::constant(0.5)))
                .unwrap();

        assert_eq!(driver.tick(49.9).unwrap(), TickOutcome::Skipped);
        assert!(matches!(driver.tick(50.0).unwrap(), TickOutcome::Stepped(_)));

        let field = &driver.state.field;
        let right: Vec<i64> = (0..5).map(|y| field.cells[y * 5 + 4]).collect();
        assert_eq!(right, vec![0, 1, 2, 3, 4]);
        assert!(field.cells.iter().enumerate().all(|(i, &v)| i % 5 == 4 || v == 0));
    }

    #[test]
    fn test_null_handles_everywhere() {
        unsafe {
            let (mut w, mut h) = (0u32, 0u32);
            assert_eq!(pa_get_generation(ptr::null()), 0);
            assert_eq!(pa_is_running(ptr::null()), -1);
            assert_eq!(pa_set_speed(ptr::null_mut(), 10), -1);
            assert_eq!(pa_tick(ptr::null_mut(), 0.0), -1);
            assert_eq!(pa_frame_size(ptr::null(), &mut w, &mut h), 0);
            assert_eq!(pa_toggle_rule(ptr::null_mut(), ptr::null()), -1);
            pa_set_running(ptr::null_mut(), 0);
            pa_destroy(ptr::null_mut());
        }
    }
}
