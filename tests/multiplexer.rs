#![cfg(feature = "host")]
//! The display handle and its render step, observed through a recording bus.

mod common;

use std::thread;

use common::new_display;
use embassy_time::Duration;
use mex_clock::glyph::{BLANK, DECIMAL_POINT_HIDDEN, DECIMAL_POINT_SHOWN};
use mex_clock::led4::{CELL_COUNT, RecordingBus, Visibility};
use mex_clock::{BLINK_PERIOD, Glyph, Led4, MULTIPLEX_PERIOD};

const LETTERS: &str = "AaEFfNnhlRruOo";

fn every_supported_glyph() -> impl Iterator<Item = Glyph> {
    (0..10)
        .map(Glyph::Digit)
        .chain(LETTERS.chars().map(Glyph::from))
}

/// Ticks until `index` is driven and returns its pattern, or `None` if it stayed dark.
///
/// Every other digit must be on.
fn render_digit(led4: Led4<'_, RecordingBus>, index: usize) -> Option<u8> {
    for _ in 0..CELL_COUNT {
        led4.tick();
        match led4.inspect_bus(RecordingBus::lit) {
            Some((lit_index, segments)) if lit_index == index => return Some(segments),
            Some(_) => {}
            None => return None,
        }
    }
    None
}

#[test]
fn digits_are_driven_round_robin() {
    let shared = new_display();
    let led4 = Led4::from_shared(&shared);
    led4.write_digits([1, 2, 3, 4].map(Glyph::Digit));

    for expected in [0, 1, 2, 3, 0, 1] {
        led4.tick();
        let (index, segments) = led4
            .inspect_bus(|bus| bus.lit())
            .expect("every digit is on");
        assert_eq!(index, expected);
        let digit = u8::try_from(expected).expect("small index") + 1;
        assert_eq!(segments, Glyph::Digit(digit).segments());
    }
}

#[test]
fn each_glyph_lands_on_the_bus_with_its_decimal_point() {
    let shared = new_display();
    let led4 = Led4::from_shared(&shared);

    for glyph in every_supported_glyph() {
        for index in 0..CELL_COUNT {
            for shown in [false, true] {
                led4.write_digit(index, glyph);
                if shown {
                    led4.enable_decimal_point(index);
                } else {
                    led4.disable_decimal_point(index);
                }
                let mask = if shown {
                    DECIMAL_POINT_SHOWN
                } else {
                    DECIMAL_POINT_HIDDEN
                };
                assert_eq!(
                    render_digit(led4, index),
                    Some(glyph.segments() & mask),
                    "{glyph:?} at {index}, point shown: {shown}"
                );
            }
        }
    }
}

#[test]
fn unsupported_characters_render_blank() {
    let shared = new_display();
    let led4 = Led4::from_shared(&shared);
    led4.write_message("xyz?");

    for index in 0..CELL_COUNT {
        assert_eq!(render_digit(led4, index), Some(BLANK));
    }
}

#[test]
fn short_messages_blank_the_remaining_digits() {
    let shared = new_display();
    let led4 = Led4::from_shared(&shared);
    led4.write_digits([8, 8, 8, 8].map(Glyph::Digit));
    led4.write_message("Er");

    assert_eq!(led4.slot(0).map(|slot| slot.glyph), Some(Glyph::Letter('E')));
    assert_eq!(led4.slot(2).map(|slot| slot.glyph), Some(Glyph::Blank));
    assert_eq!(led4.slot(3).map(|slot| slot.glyph), Some(Glyph::Blank));
    assert_eq!(render_digit(led4, 3), Some(BLANK));
}

#[test]
fn disable_display_turns_everything_off_at_once() {
    let shared = new_display();
    let led4 = Led4::from_shared(&shared);
    led4.write_digits([8, 8, 8, 8].map(Glyph::Digit));
    led4.enable_clock_display();
    led4.tick();
    assert!(led4.inspect_bus(RecordingBus::lit).is_some());
    let blanks_before = led4.inspect_bus(RecordingBus::blank_count);

    led4.disable_display();
    assert_eq!(led4.inspect_bus(RecordingBus::lit), None);
    assert_eq!(led4.inspect_bus(RecordingBus::indicators), (false, false));
    assert_eq!(
        led4.inspect_bus(RecordingBus::blank_count),
        blanks_before + 1
    );
    for _ in 0..2 * CELL_COUNT {
        led4.tick();
        assert_eq!(led4.inspect_bus(RecordingBus::lit), None);
    }

    led4.enable_display();
    led4.tick();
    assert!(led4.inspect_bus(RecordingBus::lit).is_some());
}

#[test]
fn a_blinking_digit_alternates_every_blink_period() {
    let shared = new_display();
    let led4 = Led4::from_shared(&shared);
    led4.write_digits([8, 8, 8, 8].map(Glyph::Digit));
    led4.enable_blink(2);

    // A fresh display drives digit 0 first, so tick `n` drives digit `n % 4`.
    let mut pattern = Vec::new();
    for tick in 0..4 * usize::from(BLINK_PERIOD) * CELL_COUNT {
        led4.tick();
        if tick % CELL_COUNT == 2 {
            pattern.push(led4.inspect_bus(RecordingBus::lit).is_some());
        }
    }

    let period = usize::from(BLINK_PERIOD);
    assert_eq!(pattern.len(), 4 * period);
    for (visit, lit) in pattern.iter().enumerate() {
        assert_eq!(*lit, (visit / period) % 2 == 0, "visit {visit}");
    }

    led4.disable_blink(2);
    assert_eq!(led4.slot(2).map(|slot| slot.visibility), Some(Visibility::On));
}

#[test]
fn presets_set_the_indicators() {
    let shared = new_display();
    let led4 = Led4::from_shared(&shared);

    led4.enable_temp_display();
    led4.tick();
    assert_eq!(led4.inspect_bus(RecordingBus::indicators), (false, true));
    assert_eq!(led4.slot(3).map(|slot| slot.visibility), Some(Visibility::Off));
    assert_eq!(led4.slot(1).map(|slot| slot.decimal_point), Some(true));

    led4.enable_clock_display();
    led4.tick();
    assert_eq!(led4.inspect_bus(RecordingBus::indicators), (true, false));

    led4.enable_numeric_display();
    led4.tick();
    assert_eq!(led4.inspect_bus(RecordingBus::indicators), (false, false));
}

#[test]
fn brightness_sets_the_on_time() {
    let shared = new_display();
    let led4 = Led4::from_shared(&shared);

    led4.write_digits([8, 8, 8, 8].map(Glyph::Digit));

    assert_eq!(led4.tick(), MULTIPLEX_PERIOD);
    assert_eq!(led4.inspect_bus(RecordingBus::show_count), 1);

    led4.set_brightness(0);
    for _ in 0..CELL_COUNT {
        assert_eq!(led4.tick(), Duration::from_ticks(0));
        assert_eq!(led4.inspect_bus(RecordingBus::lit), None);
    }
    assert_eq!(led4.inspect_bus(RecordingBus::show_count), 1);

    led4.set_brightness(u8::MAX);
    assert_eq!(led4.tick(), MULTIPLEX_PERIOD);
    assert!(led4.inspect_bus(RecordingBus::lit).is_some());
}

#[test]
fn rendering_and_writing_can_run_on_different_threads() {
    let shared = new_display();
    let led4 = Led4::from_shared(&shared);
    let eights = [8, 8, 8, 8].map(Glyph::Digit);
    let ones = [1, 1, 1, 1].map(Glyph::Digit);
    let allowed = [
        Glyph::Digit(8).segments(),
        Glyph::Digit(1).segments(),
        Glyph::Digit(8).segments() & DECIMAL_POINT_SHOWN,
        Glyph::Digit(1).segments() & DECIMAL_POINT_SHOWN,
    ];

    thread::scope(|scope| {
        scope.spawn(|| {
            for _ in 0..20_000 {
                led4.tick();
                if let Some((_, segments)) = led4.inspect_bus(RecordingBus::lit) {
                    assert!(allowed.contains(&segments), "{segments:#010b}");
                }
            }
        });
        for round in 0..5_000 {
            led4.write_digits(if round % 2 == 0 { eights } else { ones });
            led4.set_decimal_points(round % 3 == 0);
            led4.enable_blink(round % CELL_COUNT);
            led4.disable_blink(round % CELL_COUNT);
        }
    });

    led4.set_decimal_points(false);
    led4.write_digits(ones);
    assert_eq!(render_digit(led4, 0), Some(Glyph::Digit(1).segments()));
}
