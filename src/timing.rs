use std::{
    fmt::Display,
    ops::{Add, AddAssign, Sub, SubAssign},
};

/// Moment in time, in milliseconds relative to the start of the media file
#[derive(PartialEq, PartialOrd, Eq, Ord, Hash, Debug, Clone, Copy)]
pub struct Moment(i64);

/// Difference between two moments in milliseconds
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug)]
pub struct TimeDelta(i64);

/// Frame index of a video
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug, Hash)]
pub struct Frame(i64);

/// Frame rate used to snap subtitle timings onto frame boundaries.
///
/// A `FrameRate` may be unloaded, in which case no quantisation takes place
/// and moments pass through unchanged.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameRate {
    loaded: bool,
    rate: f64,
}

impl Moment {
    /// Create a moment from the components of a timestamp
    #[must_use]
    pub fn from_timestamp(hours: i64, minutes: i64, seconds: i64, millis: i64) -> Self {
        Moment(((hours * 60 + minutes) * 60 + seconds) * 1000 + millis)
    }

    /// When expressed as a timestamp, the number of hours
    #[must_use]
    pub fn hours(&self) -> i64 {
        self.0 / 1000 / 60 / 60
    }

    /// When expressed as a timestamp, the number of minutes
    #[must_use]
    pub fn minutes(&self) -> i64 {
        (self.0 / 1000 / 60) % 60
    }

    /// When expressed as a timestamp, the number of seconds
    #[must_use]
    pub fn seconds(&self) -> i64 {
        (self.0 / 1000) % 60
    }

    /// Number of milliseconds
    #[must_use]
    pub fn ms(&self) -> i64 {
        self.0 % 1000
    }

    /// Convert to CineCanvas timestamp format (`HH:MM:SS:mmm`).
    ///
    /// Hours are not wrapped, so moments beyond the 100 hour mark widen the field.
    #[must_use]
    pub fn as_cinecanvas_timestamp(&self) -> String {
        format!(
            "{:02}:{:02}:{:02}:{:03}",
            self.hours(),
            self.minutes(),
            self.seconds(),
            self.ms()
        )
    }
}

impl FrameRate {
    /// Create a loaded frame rate. Rates of zero or below stay unloaded.
    #[must_use]
    pub fn new(rate: f64) -> Self {
        Self {
            loaded: rate > 0.0,
            rate,
        }
    }

    /// Frame rate without an associated video, which performs no quantisation
    #[must_use]
    pub const fn unloaded() -> Self {
        Self {
            loaded: false,
            rate: 0.0,
        }
    }

    /// Whether a usable rate has been loaded
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.loaded && self.rate > 0.0
    }

    /// The raw rate in frames per second
    #[must_use]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Frame whose start lies at or before the given moment, biased so that a
    /// moment exactly on a frame boundary maps to that frame
    #[must_use]
    pub fn frame_at(&self, moment: Moment) -> Frame {
        let ms = i64::from(moment);
        Frame((((ms - 1) as f64 * self.rate / 1000.0).floor() as i64) + 1)
    }

    /// Start time of the given frame
    #[must_use]
    pub fn moment_at(&self, frame: Frame) -> Moment {
        Moment(((i64::from(frame) * 1000) as f64 / self.rate).floor() as i64)
    }

    /// Snap a moment onto the start of the frame containing it.
    ///
    /// Unloaded rates return the moment unchanged. Quantisation is idempotent:
    /// a snapped moment maps back onto the same frame.
    #[must_use]
    pub fn quantize(&self, moment: Moment) -> Moment {
        if self.is_loaded() {
            self.moment_at(self.frame_at(moment))
        } else {
            moment
        }
    }
}

impl Sub for Moment {
    type Output = TimeDelta;

    fn sub(self, rhs: Moment) -> Self::Output {
        TimeDelta(self.0 - rhs.0)
    }
}

impl Add<TimeDelta> for Moment {
    type Output = Moment;

    fn add(self, rhs: TimeDelta) -> Self::Output {
        Moment(self.0 + rhs.0)
    }
}

impl Sub<TimeDelta> for Moment {
    type Output = Moment;

    fn sub(self, rhs: TimeDelta) -> Self::Output {
        Moment(self.0 - rhs.0)
    }
}

impl AddAssign<TimeDelta> for Moment {
    fn add_assign(&mut self, rhs: TimeDelta) {
        self.0 += rhs.0;
    }
}

impl SubAssign<TimeDelta> for Moment {
    fn sub_assign(&mut self, rhs: TimeDelta) {
        self.0 -= rhs.0;
    }
}

impl From<i64> for Moment {
    fn from(value: i64) -> Self {
        Moment(value)
    }
}

impl From<Moment> for i64 {
    fn from(value: Moment) -> Self {
        value.0
    }
}

impl Add for TimeDelta {
    type Output = TimeDelta;

    fn add(self, rhs: Self) -> Self::Output {
        TimeDelta(self.0 + rhs.0)
    }
}

impl Sub for TimeDelta {
    type Output = TimeDelta;

    fn sub(self, rhs: Self) -> Self::Output {
        TimeDelta(self.0 - rhs.0)
    }
}

impl From<i64> for TimeDelta {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<TimeDelta> for i64 {
    fn from(value: TimeDelta) -> Self {
        value.0
    }
}

impl From<i64> for Frame {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<Frame> for i64 {
    fn from(value: Frame) -> Self {
        value.0
    }
}

impl Display for Frame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
