//! Driver state-machine tests: construction, lifecycle sequences, rotation
//! handling and window addressing.

mod common;

use common::{make_panel, span, MockBus, MockDelay, MockReset, Tx};
use rm67162_core::{commands, ColorSpace, Config, Error, Orientation, Rm67162};

fn commands_of(log: &[Tx]) -> Vec<u8> {
    log.iter()
        .filter_map(|tx| match tx {
            Tx::Command { cmd, .. } => Some(*cmd),
            Tx::Pixels(_) => None,
        })
        .collect()
}

mod construction {
    use super::*;

    #[test]
    fn applies_rotation_zero_once() {
        let bus = MockBus::new(240, 536);
        let handle = bus.clone();
        let panel = Rm67162::new(bus, Config::default()).unwrap();

        assert_eq!(
            handle.take(),
            vec![Tx::Command { cmd: commands::MADCTL, params: vec![0x00] }]
        );
        assert_eq!(panel.width(), 240);
        assert_eq!(panel.height(), 536);
        assert_eq!(panel.rotation(), 0);
    }

    #[test]
    fn bgr_order_sets_the_color_bit() {
        let bus = MockBus::new(240, 536);
        let handle = bus.clone();
        let config = Config {
            color_space: ColorSpace::Bgr,
            ..Config::default()
        };
        let _panel = Rm67162::new(bus, config).unwrap();

        assert_eq!(
            handle.take(),
            vec![Tx::Command { cmd: commands::MADCTL, params: vec![commands::MADCTL_BGR] }]
        );
    }

    #[test]
    fn rejects_monochrome() {
        let bus = MockBus::new(240, 536);
        let config = Config {
            color_space: ColorSpace::Monochrome,
            ..Config::default()
        };
        let result = Rm67162::new(bus, config);
        assert!(matches!(result, Err(Error::UnsupportedColorSpace)));
    }

    #[test]
    fn rejects_odd_bit_depths() {
        let bus = MockBus::new(240, 536);
        let config = Config { bpp: 12, ..Config::default() };
        let result = Rm67162::new(bus, config);
        assert!(matches!(result, Err(Error::UnsupportedBitDepth(12))));
    }
}

mod lifecycle {
    use super::*;

    #[test]
    fn init_sequence_and_timing() {
        let (mut panel, bus) = make_panel();
        let mut delay = MockDelay::default();

        panel.init(&mut delay).unwrap();

        assert_eq!(
            bus.take(),
            vec![
                Tx::Command { cmd: commands::SLPOUT, params: vec![] },
                Tx::Command { cmd: commands::MADCTL, params: vec![0x00] },
                Tx::Command { cmd: commands::COLMOD, params: vec![0x75] },
                Tx::Command { cmd: commands::DISPON, params: vec![] },
            ]
        );
        assert_eq!(delay.0, vec![100]);
    }

    #[test]
    fn init_at_18_bpp_selects_the_wide_format() {
        let bus = MockBus::new(240, 536);
        let handle = bus.clone();
        let config = Config { bpp: 18, ..Config::default() };
        let mut panel = Rm67162::new(bus, config).unwrap();
        handle.take();
        let mut delay = MockDelay::default();

        panel.init(&mut delay).unwrap();

        assert!(handle
            .take()
            .contains(&Tx::Command { cmd: commands::COLMOD, params: vec![0x76] }));
    }

    #[test]
    fn reset_with_a_line_pulses_it() {
        let bus = MockBus::new(240, 536);
        let handle = bus.clone();
        let line = MockReset::default();
        let levels = line.levels.clone();
        let config = Config {
            reset: Some(line),
            reset_level: false,
            color_space: ColorSpace::Rgb,
            bpp: 16,
        };
        let mut panel = Rm67162::new(bus, config).unwrap();
        handle.take();
        let mut delay = MockDelay::default();

        panel.reset(&mut delay).unwrap();

        assert_eq!(*levels.borrow(), vec![false, true]);
        assert_eq!(delay.0, vec![300, 200]);
        assert!(handle.take().is_empty());
    }

    #[test]
    fn reset_without_a_line_falls_back_to_software() {
        let (mut panel, bus) = make_panel();
        let mut delay = MockDelay::default();

        panel.reset(&mut delay).unwrap();

        assert_eq!(
            bus.take(),
            vec![Tx::Command { cmd: commands::SWRESET, params: vec![] }]
        );
        assert!(delay.0.is_empty());
    }

    #[test]
    fn disp_off_sleeps_then_blanks() {
        let (mut panel, bus) = make_panel();
        panel.disp_off().unwrap();
        assert_eq!(commands_of(&bus.take()), vec![commands::SLPIN, commands::DISPOFF]);
    }

    #[test]
    fn disp_on_wakes_then_unblanks() {
        let (mut panel, bus) = make_panel();
        panel.disp_on().unwrap();
        assert_eq!(commands_of(&bus.take()), vec![commands::SLPOUT, commands::DISPON]);
    }

    #[test]
    fn brightness_scales_and_clamps() {
        let (mut panel, bus) = make_panel();

        panel.brightness(100).unwrap();
        panel.brightness(40).unwrap();
        panel.brightness(150).unwrap();

        assert_eq!(
            bus.take(),
            vec![
                Tx::Command { cmd: commands::WRDISBV, params: vec![255] },
                Tx::Command { cmd: commands::WRDISBV, params: vec![102] },
                Tx::Command { cmd: commands::WRDISBV, params: vec![255] },
            ]
        );
    }

    #[test]
    fn backlight_toggles_full_range() {
        let (mut panel, bus) = make_panel();
        panel.backlight_on().unwrap();
        panel.backlight_off().unwrap();
        assert_eq!(
            bus.take(),
            vec![
                Tx::Command { cmd: commands::WRDISBV, params: vec![0xFF] },
                Tx::Command { cmd: commands::WRDISBV, params: vec![0x00] },
            ]
        );
    }

    #[test]
    fn invert_color_picks_the_matching_command() {
        let (mut panel, bus) = make_panel();
        panel.invert_color(true).unwrap();
        panel.invert_color(false).unwrap();
        assert_eq!(commands_of(&bus.take()), vec![commands::INVON, commands::INVOFF]);
    }

    #[test]
    fn vscroll_area_encodes_big_endian() {
        let (mut panel, bus) = make_panel();

        panel.vscroll_area(10, 500, 26).unwrap();

        assert_eq!(
            bus.take(),
            vec![Tx::Command {
                cmd: commands::VSCRDEF,
                params: vec![0, 10, 1, 244, 0, 26],
            }]
        );
    }

    #[test]
    fn vscroll_start_toggles_wrap_in_madctl() {
        let (mut panel, bus) = make_panel();

        panel.vscroll_start(0x0100, true).unwrap();
        assert_eq!(
            bus.take(),
            vec![
                Tx::Command { cmd: commands::MADCTL, params: vec![commands::MADCTL_ML] },
                Tx::Command { cmd: commands::VSCSAD, params: vec![0x01, 0x00] },
            ]
        );

        panel.vscroll_start(0, false).unwrap();
        assert_eq!(
            bus.take(),
            vec![
                Tx::Command { cmd: commands::MADCTL, params: vec![0x00] },
                Tx::Command { cmd: commands::VSCSAD, params: vec![0x00, 0x00] },
            ]
        );
    }

    #[test]
    fn deinit_shuts_the_bus_down() {
        let (panel, bus) = make_panel();
        panel.deinit();
        assert_eq!(*bus.shutdowns.borrow(), 1);
    }

    #[test]
    fn raw_passthrough_forwards_verbatim() {
        let (mut panel, bus) = make_panel();
        panel.send_command(0xFE, &[0x20]).unwrap();
        assert_eq!(
            bus.take(),
            vec![Tx::Command { cmd: 0xFE, params: vec![0x20] }]
        );
    }
}

mod rotation {
    use super::*;

    #[test]
    fn index_is_taken_modulo_four() {
        let (mut panel, bus) = make_panel();

        panel.set_rotation(5, None).unwrap();

        assert_eq!(panel.rotation(), 1);
        assert_eq!(panel.width(), 536);
        assert_eq!(panel.height(), 240);
        assert_eq!(
            bus.take(),
            vec![Tx::Command { cmd: commands::MADCTL, params: vec![0x60] }]
        );
    }

    #[test]
    fn all_four_orientations_of_the_native_panel() {
        let (mut panel, bus) = make_panel();
        let expected = [
            (0u8, 0x00u8, 240u16, 536u16),
            (1, 0x60, 536, 240),
            (2, 0xC0, 240, 536),
            (3, 0xA0, 536, 240),
        ];
        for (index, madctl, width, height) in expected {
            panel.set_rotation(index, None).unwrap();
            assert_eq!(panel.width(), width, "rotation {index}");
            assert_eq!(panel.height(), height, "rotation {index}");
            assert_eq!(
                bus.take(),
                vec![Tx::Command { cmd: commands::MADCTL, params: vec![madctl] }],
                "rotation {index}"
            );
        }
    }

    #[test]
    fn caller_table_overwrites_slots() {
        let (mut panel, _bus) = make_panel();
        let table = [Orientation {
            madctl: 0x00,
            width: 100,
            height: 200,
            col_start: 5,
            row_start: 7,
        }];

        panel.set_rotation(0, Some(&table)).unwrap();

        assert_eq!(panel.width(), 100);
        assert_eq!(panel.height(), 200);

        // The other three slots keep their calibrated entries.
        panel.set_rotation(1, None).unwrap();
        assert_eq!(panel.width(), 536);
    }

    #[test]
    fn zero_sized_table_entry_is_rejected() {
        let (mut panel, bus) = make_panel();
        let table = [Orientation {
            madctl: 0x00,
            width: 0,
            height: 200,
            col_start: 0,
            row_start: 0,
        }];

        let result = panel.set_rotation(0, Some(&table));

        assert!(matches!(result, Err(Error::BadOrientation { index: 0 })));
        assert!(bus.take().is_empty());
    }

    #[test]
    fn unknown_panel_size_gets_a_generic_table() {
        let bus = MockBus::new(128, 160);
        let handle = bus.clone();
        let mut panel = Rm67162::new(bus, Config::default()).unwrap();
        handle.take();

        panel.set_rotation(1, None).unwrap();

        assert_eq!(panel.width(), 160);
        assert_eq!(panel.height(), 128);
    }

    #[test]
    fn mirror_and_swap_compose_in_madctl() {
        let (mut panel, bus) = make_panel();

        panel.mirror(true, false).unwrap();
        panel.mirror(false, true).unwrap();
        panel.swap_axes(true).unwrap();

        assert_eq!(
            bus.take(),
            vec![
                Tx::Command { cmd: commands::MADCTL, params: vec![commands::MADCTL_MX] },
                Tx::Command { cmd: commands::MADCTL, params: vec![commands::MADCTL_MY] },
                Tx::Command {
                    cmd: commands::MADCTL,
                    params: vec![commands::MADCTL_MY | commands::MADCTL_MV],
                },
            ]
        );
    }

    #[test]
    fn rotation_preserves_scroll_and_color_bits() {
        let bus = MockBus::new(240, 536);
        let handle = bus.clone();
        let config = Config {
            color_space: ColorSpace::Bgr,
            ..Config::default()
        };
        let mut panel = Rm67162::new(bus, config).unwrap();
        handle.take();

        panel.set_rotation(1, None).unwrap();

        assert_eq!(
            handle.take(),
            vec![Tx::Command {
                cmd: commands::MADCTL,
                params: vec![0x60 | commands::MADCTL_BGR],
            }]
        );
    }
}

mod window {
    use super::*;

    #[test]
    fn valid_window_emits_the_address_triplet() {
        let (mut panel, bus) = make_panel();

        let accepted = panel.set_window(1, 2, 239, 300).unwrap();

        assert!(accepted);
        let log = bus.take();
        assert_eq!(commands_of(&log), vec![commands::CASET, commands::RASET, commands::RAMWR]);
        let Tx::Command { params: cols, .. } = &log[0] else { panic!() };
        let Tx::Command { params: rows, .. } = &log[1] else { panic!() };
        assert_eq!(span(cols), (1, 239));
        assert_eq!(span(rows), (2, 300));
        assert_eq!(rows, &vec![0x00, 0x02, 0x01, 0x2C]);
    }

    #[test]
    fn inverted_window_is_an_observable_no_op() {
        let (mut panel, bus) = make_panel();

        let accepted = panel.set_window(5, 0, 4, 0).unwrap();

        assert!(!accepted);
        assert!(bus.take().is_empty());
    }

    #[test]
    fn out_of_range_window_is_rejected() {
        let (mut panel, bus) = make_panel();

        assert!(!panel.set_window(0, 0, 240, 0).unwrap());
        assert!(!panel.set_window(0, 0, 0, 536).unwrap());
        assert!(bus.take().is_empty());
    }

    #[test]
    fn bounds_follow_the_active_rotation() {
        let (mut panel, bus) = make_panel();
        panel.set_rotation(1, None).unwrap();
        bus.take();

        assert!(panel.set_window(0, 0, 535, 239).unwrap());
        bus.take();
        assert!(!panel.set_window(0, 0, 0, 240).unwrap());
    }
}
