//! Color temperature conversions and nearest-value matching against the
//! colors a bulb actually supports.

use crate::hub::HsColor;

const MIRED_SCALE: u32 = 1_000_000;

pub fn kelvin_to_mired(kelvin: u32) -> u32 {
    MIRED_SCALE / kelvin.max(1)
}

pub fn mired_to_kelvin(mired: u32) -> u32 {
    MIRED_SCALE / mired.max(1)
}

/// Returns the supported color closest to `requested`.
///
/// The hue is matched first. Only the pairs sharing that hue are then
/// searched for the closest saturation. On equal distance the first
/// candidate in list order wins.
pub fn nearest_supported_color(supported: &[HsColor], requested: HsColor) -> Option<HsColor> {
    let (hue, saturation) = requested;
    let nearest_hue = supported
        .iter()
        .map(|c| c.0)
        .min_by(|a, b| (a - hue).abs().total_cmp(&(b - hue).abs()))?;
    let nearest_saturation = supported
        .iter()
        .filter(|c| c.0 == nearest_hue)
        .map(|c| c.1)
        .min_by(|a, b| (a - saturation).abs().total_cmp(&(b - saturation).abs()))?;
    Some((nearest_hue, nearest_saturation))
}

/// Returns the supported temperature (Kelvin) closest to `kelvin`, the first
/// one in list order on equal distance.
pub fn nearest_supported_color_temp(supported: &[u32], kelvin: u32) -> Option<u32> {
    supported
        .iter()
        .copied()
        .min_by_key(|t| t.abs_diff(kelvin))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kelvin_to_mired() {
        assert_eq!(kelvin_to_mired(6500), 153);
        assert_eq!(kelvin_to_mired(2700), 370);
        assert_eq!(kelvin_to_mired(5000), 200);
    }

    #[test]
    fn test_mired_to_kelvin() {
        assert_eq!(mired_to_kelvin(200), 5000);
        assert_eq!(mired_to_kelvin(153), 6535);
        assert_eq!(mired_to_kelvin(370), 2702);
    }

    #[test]
    fn test_zero_does_not_panic() {
        assert_eq!(kelvin_to_mired(0), MIRED_SCALE);
        assert_eq!(mired_to_kelvin(0), MIRED_SCALE);
    }

    #[test]
    fn test_mired_round_trip_within_rounding() {
        for kelvin in (1000..=10_000).step_by(7) {
            let back = mired_to_kelvin(kelvin_to_mired(kelvin));
            // floor(1e6 / floor(1e6 / k)) can only overshoot, by less than k² / (1e6 - k)
            let bound = kelvin * kelvin / (MIRED_SCALE - kelvin) + 1;
            assert!(back >= kelvin, "{kelvin}K came back as {back}K");
            assert!(back - kelvin <= bound, "{kelvin}K came back as {back}K");
        }
    }

    #[test]
    fn test_nearest_color_two_stage() {
        let supported = [(10.0, 50.0), (10.0, 80.0), (40.0, 90.0)];
        assert_eq!(
            nearest_supported_color(&supported, (12.0, 60.0)),
            Some((10.0, 50.0))
        );
        assert_eq!(
            nearest_supported_color(&supported, (12.0, 70.0)),
            Some((10.0, 80.0))
        );
        // hue wins even when another pair has a much closer saturation
        assert_eq!(
            nearest_supported_color(&supported, (20.0, 90.0)),
            Some((10.0, 80.0))
        );
        assert_eq!(
            nearest_supported_color(&supported, (35.0, 0.0)),
            Some((40.0, 90.0))
        );
    }

    #[test]
    fn test_nearest_color_exact_match() {
        let supported = [(358.0, 180.0), (358.0, 112.0), (35.0, 214.0)];
        assert_eq!(
            nearest_supported_color(&supported, (358.0, 112.0)),
            Some((358.0, 112.0))
        );
    }

    #[test]
    fn test_nearest_color_is_minimal() {
        let supported = [
            (358.0, 180.0),
            (358.0, 112.0),
            (358.0, 54.0),
            (35.0, 214.0),
            (35.0, 140.0),
            (52.0, 153.0),
            (120.0, 82.0),
            (120.0, 38.0),
            (195.0, 255.0),
            (195.0, 153.0),
        ];
        for hue in (0..=360).step_by(9) {
            for saturation in (0..=255).step_by(17) {
                let requested = (hue as f64, saturation as f64);
                let (h, s) = nearest_supported_color(&supported, requested).unwrap();
                assert!(supported.contains(&(h, s)));
                let hue_distance = (h - requested.0).abs();
                for &(oh, os) in &supported {
                    let other_hue_distance = (oh - requested.0).abs();
                    assert!(other_hue_distance >= hue_distance);
                    if oh == h {
                        assert!((os - requested.1).abs() >= (s - requested.1).abs());
                    }
                }
            }
        }
    }

    #[test]
    fn test_nearest_color_hue_tie_takes_first() {
        let supported = [(10.0, 50.0), (30.0, 60.0)];
        assert_eq!(
            nearest_supported_color(&supported, (20.0, 60.0)),
            Some((10.0, 50.0))
        );
    }

    #[test]
    fn test_nearest_color_empty() {
        assert_eq!(nearest_supported_color(&[], (10.0, 10.0)), None);
    }

    #[test]
    fn test_nearest_color_temp() {
        let supported = [2700, 3000, 4000, 6500];
        assert_eq!(
            nearest_supported_color_temp(&supported, mired_to_kelvin(200)),
            Some(4000)
        );
        assert_eq!(nearest_supported_color_temp(&supported, 1000), Some(2700));
        assert_eq!(nearest_supported_color_temp(&supported, 9000), Some(6500));
        assert_eq!(nearest_supported_color_temp(&supported, 3000), Some(3000));
    }

    #[test]
    fn test_nearest_color_temp_tie_takes_first_in_list_order() {
        assert_eq!(nearest_supported_color_temp(&[3000, 2000], 2500), Some(3000));
        assert_eq!(nearest_supported_color_temp(&[2000, 3000], 2500), Some(2000));
    }

    #[test]
    fn test_nearest_color_temp_is_minimal() {
        let supported = [2700, 3000, 3400, 3800, 4200, 4700, 5300, 5900, 6500];
        for kelvin in (1500..=9000).step_by(50) {
            let nearest = nearest_supported_color_temp(&supported, kelvin).unwrap();
            assert!(supported.contains(&nearest));
            assert!(
                supported
                    .iter()
                    .all(|t| t.abs_diff(kelvin) >= nearest.abs_diff(kelvin))
            );
        }
    }

    #[test]
    fn test_nearest_color_temp_empty() {
        assert_eq!(nearest_supported_color_temp(&[], 4000), None);
    }
}
