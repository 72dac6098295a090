use serde::{Deserialize, Serialize};

/// Easing function applied to a linear time ratio.
///
/// All variants map 0 to 0 and 1 to 1, so an eased interpolation still
/// starts and ends exactly on the segment boundaries. `ElasticOut`
/// overshoots past 1 mid-curve, which is the point of it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    /// Linear pass-through.
    #[default]
    Identity,
    /// Decelerating cubic finish.
    CubicOut,
    /// Springs past the target and settles back onto it.
    ElasticOut,
}

impl Easing {
    /// Map a linear ratio to the eased ratio.
    pub fn apply(self, x: f64) -> f64 {
        match self {
            Easing::Identity => x,
            Easing::CubicOut => 1.0 - (1.0 - x).powi(3),
            Easing::ElasticOut => {
                const C4: f64 = (2.0 * std::f64::consts::PI) / 3.0;
                if x == 0.0 {
                    0.0
                } else if x == 1.0 {
                    1.0
                } else {
                    2f64.powf(-10.0 * x) * ((x * 10.0 - 0.75) * C4).sin() + 1.0
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_easings_fix_the_endpoints() {
        for easing in [Easing::Identity, Easing::CubicOut, Easing::ElasticOut] {
            assert_eq!(easing.apply(0.0), 0.0, "{:?} must map 0 to 0", easing);
            assert_eq!(easing.apply(1.0), 1.0, "{:?} must map 1 to 1", easing);
        }
    }

    #[test]
    fn test_identity_is_linear() {
        assert_eq!(Easing::Identity.apply(0.25), 0.25);
        assert_eq!(Easing::Identity.apply(0.5), 0.5);
    }

    #[test]
    fn test_cubic_out_decelerates() {
        // Front-loaded: halfway through time is most of the way through distance.
        let halfway = Easing::CubicOut.apply(0.5);
        assert!((halfway - 0.875).abs() < 1e-12);
        assert!(Easing::CubicOut.apply(0.1) > 0.1);
    }

    #[test]
    fn test_elastic_out_overshoots_then_settles() {
        let early = Easing::ElasticOut.apply(0.2);
        assert!(early > 1.0, "elastic should overshoot early, got {}", early);
        let late = Easing::ElasticOut.apply(0.95);
        assert!((late - 1.0).abs() < 0.1);
    }
}
