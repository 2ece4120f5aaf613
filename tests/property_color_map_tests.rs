use plot_data::core::{ColorMap, ColorMapKind, Interval};
use proptest::prelude::*;

fn kind_strategy() -> impl Strategy<Value = ColorMapKind> {
    prop_oneof![Just(ColorMapKind::Gray), Just(ColorMapKind::Jet)]
}

proptest! {
    #[test]
    fn stops_are_sorted_unit_positions(
        levels in prop::collection::vec(-1.0e4f64..1.0e4, 2..128),
        kind in kind_strategy()
    ) {
        let map = ColorMap::new(levels.clone(), kind);
        let positions: Vec<f64> = map.stops().iter().map(|stop| stop.position).collect();

        prop_assert!(positions.len() <= levels.len());
        prop_assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
        prop_assert!(positions.iter().all(|p| (0.0..=1.0).contains(p)));
        if !map.is_degenerate() {
            prop_assert_eq!(positions[0], 0.0);
            prop_assert_eq!(positions[positions.len() - 1], 1.0);
        }
    }

    #[test]
    fn sorted_gray_levels_darken_to_lighten(count in 2usize..300) {
        let map = ColorMap::from_interval(Interval::UNIT, count, ColorMapKind::Gray);
        let shades: Vec<u8> = map.stops().iter().map(|stop| stop.color.red).collect();

        prop_assert_eq!(shades.len(), count);
        prop_assert!(shades.windows(2).all(|pair| pair[0] <= pair[1]));
        prop_assert_eq!(shades[0], 0);
        prop_assert_eq!(shades[count - 1], 255);
    }

    #[test]
    fn jet_endpoints_are_pure_blue_and_pure_red(count in 2usize..400) {
        let map = ColorMap::from_interval(Interval::UNIT, count, ColorMapKind::Jet);
        let low = map.min_color();
        let high = map.max_color();

        prop_assert_eq!((low.red, low.green), (0, 0));
        prop_assert!(low.blue > 0);
        prop_assert_eq!((high.green, high.blue), (0, 0));
        prop_assert!(high.red > 0);
    }

    #[test]
    fn color_at_always_returns_a_palette_color(
        count in 2usize..64,
        value in -2.0f64..3.0,
        kind in kind_strategy()
    ) {
        let map = ColorMap::from_interval(Interval::UNIT, count, kind);
        let color = map.color_at(value);

        let in_palette = map.stops().iter().any(|stop| stop.color == color)
            || color == map.min_color()
            || color == map.max_color();
        prop_assert!(in_palette);
    }
}
