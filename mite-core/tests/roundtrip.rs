//! Printed integers parse back to the truncated value

use heapless::Vec;
use mite_core::config::{BaseSet, FormatSettings, FormatterMode, IntWidth};
use mite_core::fmt::NumberPrinter;
use proptest::prelude::*;

fn width() -> impl Strategy<Value = IntWidth> {
    prop_oneof![Just(IntWidth::Byte), Just(IntWidth::Int), Just(IntWidth::Long)]
}

fn table_base() -> impl Strategy<Value = u8> {
    prop_oneof![Just(2u8), Just(8u8), Just(10u8), Just(16u8)]
}

fn printer(width: IntWidth, mode: FormatterMode) -> NumberPrinter {
    NumberPrinter::from_settings(FormatSettings::new(width, mode))
}

fn text(out: &Vec<u8, 40>) -> &str {
    core::str::from_utf8(out).unwrap()
}

proptest! {
    #[test]
    fn test_table_unsigned_roundtrip(n in any::<u32>(), width in width(), base in table_base()) {
        let printer = printer(width, FormatterMode::Table(BaseSet::ALL));
        let mut out: Vec<u8, 40> = Vec::new();
        let count = printer.print_unsigned(&mut out, n, base);

        prop_assert_eq!(count, out.len());
        prop_assert_eq!(u32::from_str_radix(text(&out), base as u32), Ok(width.truncate(n)));
    }

    #[test]
    fn test_division_unsigned_roundtrip(n in any::<u32>(), width in width(), base in 2u8..=16) {
        let printer = printer(width, FormatterMode::Division);
        let mut out: Vec<u8, 40> = Vec::new();
        let count = printer.print_unsigned(&mut out, n, base);

        prop_assert_eq!(count, out.len());
        prop_assert_eq!(u32::from_str_radix(text(&out), base as u32), Ok(width.truncate(n)));
    }

    #[test]
    fn test_modes_agree_on_table_bases(n in any::<u32>(), width in width(), base in table_base()) {
        let table = printer(width, FormatterMode::Table(BaseSet::ALL));
        let division = printer(width, FormatterMode::Division);
        let mut a: Vec<u8, 40> = Vec::new();
        let mut b: Vec<u8, 40> = Vec::new();
        table.print_unsigned(&mut a, n, base);
        division.print_unsigned(&mut b, n, base);

        prop_assert_eq!(a, b);
    }

    #[test]
    fn test_signed_decimal_roundtrip(n in any::<i32>(), width in width()) {
        let printer = printer(width, FormatterMode::Table(BaseSet::DEC));
        let mut out: Vec<u8, 40> = Vec::new();
        let count = printer.print_signed(&mut out, n, 10);

        prop_assert_eq!(count, out.len());
        prop_assert_eq!(text(&out).parse::<i32>(), Ok(width.truncate_signed(n)));
    }

    #[test]
    fn test_no_leading_zeros(n in 1u32.., base in table_base()) {
        let printer = printer(IntWidth::Long, FormatterMode::Table(BaseSet::ALL));
        let mut out: Vec<u8, 40> = Vec::new();
        printer.print_unsigned(&mut out, n, base);

        prop_assert_ne!(out.first(), Some(&b'0'));
    }

    #[test]
    fn test_signed_non_decimal_is_bit_pattern(
        n in i32::MIN..0,
        width in width(),
        base in prop_oneof![Just(2u8), Just(8u8), Just(16u8)],
    ) {
        let printer = printer(width, FormatterMode::Table(BaseSet::ALL));
        let mut signed: Vec<u8, 40> = Vec::new();
        let mut unsigned: Vec<u8, 40> = Vec::new();
        let a = printer.print_signed(&mut signed, n, base);
        let b = printer.print_unsigned(&mut unsigned, n as u32, base);

        prop_assert_eq!(a, b);
        prop_assert_eq!(signed, unsigned);
    }
}
