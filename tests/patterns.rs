mod tests {
    use matrix_pattern_composer::bounds::Point;
    use matrix_pattern_composer::font::glyph;
    use matrix_pattern_composer::pattern::{
        BlinkPattern, Pattern, SNAKE_LENGTH, ScrollMode, ScrollingTextPattern, SelfTestPattern,
        SelfTestStage, SnakePattern, Step,
    };
    use matrix_pattern_composer::rng::Rng;
    use matrix_pattern_composer::{MatrixSurface, PatternId, PatternMessages, PatternSlot};

    const W: usize = 32;

    fn adjacent_wrapped(a: Point, b: Point) -> bool {
        let dx = (i32::from(a.x) - i32::from(b.x)).rem_euclid(W as i32);
        let dy = (i32::from(a.y) - i32::from(b.y)).rem_euclid(8);
        matches!((dx, dy), (1 | 31, 0) | (0, 1 | 7))
    }

    #[test]
    fn test_pattern_names() {
        assert_eq!(PatternId::parse_from_str("BORED"), Some(PatternId::Bored));
        assert_eq!(PatternId::parse_from_str("PRINTING"), Some(PatternId::Thinking));
        assert_eq!(PatternId::parse_from_str("REMOVE_FIGURE"), Some(PatternId::RemoveFigure));
        assert_eq!(PatternId::parse_from_str("SELFTEST"), Some(PatternId::SelfTest));
        assert_eq!(PatternId::parse_from_str("NONE"), None);
        assert_eq!(PatternId::parse_from_str("bored"), None);

        for raw in 0..=6 {
            let id = PatternId::from_raw(raw).expect("known id");
            assert_eq!(id as u8, raw);
        }
        assert_eq!(PatternId::from_raw(7), None);
        assert_eq!(PatternId::RemoveFigure.to_string(), "REMOVE_FIGURE");
    }

    #[test]
    fn test_slots_match_ids() {
        let messages = PatternMessages::default();
        let mut rng = Rng::default();
        for raw in 0..=6 {
            let id = PatternId::from_raw(raw).expect("known id");
            let slot = id.to_slot::<W>(&messages, ScrollMode::OneShot, &mut rng);
            assert_eq!(slot.id(), id);
        }

        let slot = PatternId::Thinking.to_slot::<W>(&messages, ScrollMode::OneShot, &mut rng);
        let PatternSlot::Thinking(scroll) = slot else {
            panic!("unexpected slot");
        };
        // Only FINISH follows the configured mode
        assert_eq!(scroll.mode(), ScrollMode::Loop);
        assert_eq!(scroll.message(), "THINKING   ");

        let slot = PatternId::Finish.to_slot::<W>(&messages, ScrollMode::OneShot, &mut rng);
        let PatternSlot::Finish(scroll) = slot else {
            panic!("unexpected slot");
        };
        assert_eq!(scroll.mode(), ScrollMode::OneShot);
    }

    #[test]
    fn test_scroll_loops_back_to_right_edge() {
        let mut surface = MatrixSurface::<W>::new();
        let mut rng = Rng::default();
        let mut scroll = ScrollingTextPattern::new::<W>("HI", ScrollMode::Loop);
        assert_eq!(scroll.offset(), 32);

        // First frame is drawn entirely off the right edge
        assert_eq!(scroll.step(&mut surface, &mut rng), Step::Continue);
        assert_eq!(surface.lit_count(), 0);

        for _ in 1..44 {
            assert_eq!(scroll.step(&mut surface, &mut rng), Step::Continue);
        }
        assert_eq!(scroll.offset(), -12);
        assert_eq!(scroll.step(&mut surface, &mut rng), Step::Continue);
        assert_eq!(scroll.offset(), 32);
    }

    #[test]
    fn test_scroll_moves_one_pixel_per_step() {
        let mut surface = MatrixSurface::<W>::new();
        let mut rng = Rng::default();
        let mut scroll = ScrollingTextPattern::new::<W>("HI", ScrollMode::Loop);

        for _ in 0..33 {
            scroll.step(&mut surface, &mut rng);
        }
        // 33rd frame was drawn at offset 0: H stem at column 0, I stem at 8
        assert!((0..7).all(|row| surface.get(row, 0)));
        assert!((0..7).all(|row| surface.get(row, 8)));
        assert!(!surface.get(3, 12));

        scroll.step(&mut surface, &mut rng);
        assert!((0..7).all(|row| surface.get(row, 7)));
        assert!(!surface.get(0, 8));
    }

    #[test]
    fn test_every_glyph_fully_visible_in_one_cycle() {
        let message = "THINKING   ";
        let mut surface = MatrixSurface::<W>::new();
        let mut rng = Rng::default();
        let mut scroll = ScrollingTextPattern::new::<W>(message, ScrollMode::Loop);

        let mut seen = [false; 11];
        for _ in 0..(32 + 66 + 1) {
            let drawn_at = scroll.offset();
            scroll.step(&mut surface, &mut rng);
            for (index, c) in message.chars().enumerate() {
                let x = drawn_at + 6 * index as i32;
                if !(0..=27).contains(&x) {
                    continue;
                }
                let columns = glyph(c);
                let matches = (0..5).all(|dx| {
                    (0..7).all(|row| {
                        surface.get(row, x + dx)
                            == (columns[dx as usize] & (1 << row) != 0)
                    })
                });
                seen[index] |= matches;
            }
        }
        assert!(seen.iter().all(|visible| *visible));
        assert_eq!(scroll.offset(), 32);
    }

    #[test]
    fn test_one_shot_scroll_completes() {
        let mut surface = MatrixSurface::<W>::new();
        let mut rng = Rng::default();
        let mut scroll = ScrollingTextPattern::new::<W>("HI", ScrollMode::OneShot);

        for _ in 0..44 {
            assert_eq!(scroll.step(&mut surface, &mut rng), Step::Continue);
        }
        assert_eq!(scroll.step(&mut surface, &mut rng), Step::Complete);
    }

    #[test]
    fn test_blink_toggles() {
        let mut surface = MatrixSurface::<W>::new();
        let mut rng = Rng::default();
        let mut blink = BlinkPattern::new("ERROR");
        assert!(!blink.is_visible());

        blink.step(&mut surface, &mut rng);
        assert!(blink.is_visible());
        assert!(surface.lit_count() > 0);
        // Centered: 30 px wide text leaves column 0 dark
        assert!((0..8).all(|row| !surface.get(row, 0)));

        blink.step(&mut surface, &mut rng);
        assert!(!blink.is_visible());
        assert_eq!(surface.lit_count(), 0);

        assert_eq!(blink.step(&mut surface, &mut rng), Step::Continue);
        assert!(blink.is_visible());
    }

    #[test]
    fn test_self_test_sequence() {
        let mut surface = MatrixSurface::<W>::new();
        let mut rng = Rng::default();
        let mut self_test = SelfTestPattern::new();
        assert_eq!(SelfTestPattern::total_steps(W), 69);

        self_test.step(&mut surface, &mut rng);
        assert_eq!(surface.lit_count(), 256);

        // Finish the all-on hold, then the first row frame
        for _ in 1..8 {
            self_test.step(&mut surface, &mut rng);
        }
        assert_eq!(self_test.stage(), Some(SelfTestStage::Rows));
        self_test.step(&mut surface, &mut rng);
        assert_eq!(surface.lit_count(), 32);
        assert!(surface.get(0, 17));
        assert!(!surface.get(1, 17));

        let mut steps = 9;
        while self_test.stage() != Some(SelfTestStage::Corners) {
            assert_eq!(self_test.step(&mut surface, &mut rng), Step::Continue);
            steps += 1;
        }
        // Last checkerboard frame
        assert_eq!(surface.lit_count(), 128);
        assert!(surface.get(0, 0));
        assert!(!surface.get(0, 1));

        self_test.step(&mut surface, &mut rng);
        steps += 1;
        assert_eq!(surface.lit_count(), 4);
        assert!(surface.get(0, 0) && surface.get(0, 31) && surface.get(7, 0) && surface.get(7, 31));

        while self_test.step(&mut surface, &mut rng) == Step::Continue {
            steps += 1;
        }
        assert_eq!(steps + 1, 69);
    }

    #[test]
    fn test_self_test_modules_stage() {
        let mut surface = MatrixSurface::<W>::new();
        let mut rng = Rng::default();
        let mut self_test = SelfTestPattern::new();

        // All-on, rows and columns come first
        for _ in 0..(8 + 8 + 32) {
            self_test.step(&mut surface, &mut rng);
        }
        assert_eq!(self_test.stage(), Some(SelfTestStage::Modules));

        for module in 0..4 {
            self_test.step(&mut surface, &mut rng);
            assert_eq!(surface.lit_count(), 64);
            assert!(surface.get(3, module * 8));
            assert!(surface.get(3, module * 8 + 7));
        }
        assert_eq!(self_test.stage(), Some(SelfTestStage::Checkerboard));
    }

    #[test]
    fn test_snake_starts_straight() {
        let mut rng = Rng::new(7);
        let snake = SnakePattern::new::<W>(&mut rng);

        assert_eq!(snake.head(), Point::new(16, 4));
        assert_eq!(snake.body()[SNAKE_LENGTH - 1], Point::new(12, 4));
        assert!(!snake.body().contains(&snake.food()));
    }

    #[test]
    fn test_snake_invariants_hold_while_roaming() {
        let mut surface = MatrixSurface::<W>::new();
        let mut rng = Rng::new(0xDEAD_BEEF);
        let mut snake = SnakePattern::new::<W>(&mut rng);

        for _ in 0..2_000 {
            let previous_head = snake.head();
            let previous_direction = snake.direction();

            assert_eq!(snake.step(&mut surface, &mut rng), Step::Continue);

            assert!(!snake.direction().is_reverse_of(previous_direction));
            assert!(adjacent_wrapped(snake.head(), previous_head));
            assert!(!snake.body().contains(&snake.food()));
            assert!(!snake.body()[1..].contains(&snake.head()));
            // Five distinct body cells plus the food
            assert_eq!(surface.lit_count(), SNAKE_LENGTH + 1);
            for segment in snake.body() {
                assert!((0..32).contains(&segment.x));
                assert!((0..8).contains(&segment.y));
                assert!(surface.get(i32::from(segment.y), i32::from(segment.x)));
            }
            assert!(surface.get(i32::from(snake.food().y), i32::from(snake.food().x)));
        }
    }

    #[test]
    fn test_snake_never_runs_into_itself() {
        let mut surface = MatrixSurface::<W>::new();
        for seed in 0..300 {
            let mut rng = Rng::new(seed);
            let mut snake = SnakePattern::new::<W>(&mut rng);
            for step in 0..500 {
                snake.step(&mut surface, &mut rng);
                let body = snake.body();
                for (i, segment) in body.iter().enumerate() {
                    assert!(
                        !body[i + 1..].contains(segment),
                        "seed {seed} step {step}: {body:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_snake_eats_food() {
        let mut surface = MatrixSurface::<W>::new();
        let mut rng = Rng::new(42);
        let mut snake = SnakePattern::new::<W>(&mut rng);

        let mut eaten = 0;
        for _ in 0..500 {
            let food = snake.food();
            snake.step(&mut surface, &mut rng);
            if snake.head() == food {
                eaten += 1;
                assert_ne!(snake.food(), food);
            }
        }
        // Greedy steering reaches the food within a couple of panel widths
        assert!(eaten >= 5, "snake ate only {eaten} times");
    }
}
