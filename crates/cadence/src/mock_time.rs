#![forbid(unsafe_code)]

use crate::Error;
use timeline::Timestamp;

/// Maps real time to the time shown on the face.
///
/// Content time runs `speed` times faster than real time from `anchor`, and
/// wraps into `[min, max)` when a range is set. Scheduling never uses it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MockTime {
    speed: f64,
    anchor: Timestamp,
    wrap: Option<(Timestamp, Timestamp)>,
}

impl MockTime {
    /// `speed` must be positive and finite, and a wrap range non-empty.
    pub fn new(
        speed: f64,
        anchor: Timestamp,
        wrap: Option<(Timestamp, Timestamp)>,
    ) -> Result<Self, Error> {
        if !speed.is_finite() || speed <= 0.0 {
            return Err(Error::InvalidSpeed(speed));
        }
        if let Some((min, max)) = wrap
            && min >= max
        {
            return Err(Error::InvalidWrapRange { min, max });
        }
        Ok(Self {
            speed,
            anchor,
            wrap,
        })
    }

    /// Returns `Ok(None)` when the warp is disabled.
    pub fn from_config(
        config: &config::MockTime,
        anchor: Timestamp,
    ) -> Result<Option<Self>, Error> {
        if !config.enabled {
            return Ok(None);
        }
        let wrap = match (config.min_time, config.max_time) {
            (Some(min), Some(max)) => {
                Some((Timestamp::from_millis(min), Timestamp::from_millis(max)))
            }
            _ => None,
        };
        Self::new(config.speed, anchor, wrap).map(Some)
    }

    pub fn content_now(&self, real: Timestamp) -> Timestamp {
        let elapsed = self.anchor.millis_until(real) as f64 * self.speed;
        let warped = self.anchor.as_millis().saturating_add(elapsed.round() as i64);
        match self.wrap {
            Some((min, max)) => {
                let span = min.millis_until(max).max(1);
                let offset = warped.saturating_sub(min.as_millis()).rem_euclid(span);
                min.saturating_add_millis(offset)
            }
            None => Timestamp::from_millis(warped),
        }
    }

    /// Real milliseconds that elapse while content time advances by
    /// `content_millis`. Rounds up so the wake-up is never early.
    pub fn real_delay_millis(&self, content_millis: i64) -> i64 {
        (content_millis as f64 / self.speed).ceil() as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(millis: i64) -> Timestamp {
        Timestamp::from_millis(millis)
    }

    #[test]
    fn speeds_up_from_anchor() {
        let mock = MockTime::new(60.0, ts(1_000), None).unwrap();
        assert_eq!(mock.content_now(ts(1_000)), ts(1_000));
        assert_eq!(mock.content_now(ts(2_000)), ts(61_000));
        assert_eq!(mock.real_delay_millis(60_000), 1_000);
        assert_eq!(mock.real_delay_millis(61), 2);
    }

    #[test]
    fn wraps_into_range() {
        let mock = MockTime::new(1.0, ts(0), Some((ts(100), ts(200)))).unwrap();
        assert_eq!(mock.content_now(ts(150)), ts(150));
        assert_eq!(mock.content_now(ts(200)), ts(100));
        assert_eq!(mock.content_now(ts(250)), ts(150));
        assert_eq!(mock.content_now(ts(50)), ts(150));
    }

    #[test]
    fn rejects_empty_or_inverted_wrap_range() {
        assert!(matches!(
            MockTime::new(1.0, ts(0), Some((ts(10), ts(10)))),
            Err(Error::InvalidWrapRange { .. })
        ));
        assert!(MockTime::new(1.0, ts(0), Some((ts(11), ts(10)))).is_err());
    }

    #[test]
    fn rejects_non_positive_speed() {
        for speed in [0.0, -2.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                MockTime::new(speed, ts(0), None),
                Err(Error::InvalidSpeed(_))
            ));
        }
    }

    #[test]
    fn config_with_empty_range_is_rejected() {
        let config = config::MockTime {
            enabled: true,
            min_time: Some(10),
            max_time: Some(10),
            ..Default::default()
        };
        assert!(MockTime::from_config(&config, ts(0)).is_err());
    }

    #[test]
    fn disabled_config_yields_none() {
        let config = config::MockTime::default();
        assert!(MockTime::from_config(&config, ts(0)).unwrap().is_none());
    }
}
