use chrono::NaiveDate;
use egui::Color32;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::date_range::days_in_range;

pub const MINUTES_PER_SLOT: u32 = 5;
pub const SLOTS_PER_HOUR: usize = 12;
pub const SLOTS_PER_DAY: usize = 24 * SLOTS_PER_HOUR;

/// One 5-minute activity interval.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    /// Offset in days from the range start.
    pub day_index: usize,
    pub date: NaiveDate,
    pub hour: u32,
    pub minute: u32,
    /// Opacity of the segment, in `[0.1, 1.0)`.
    pub intensity: f32,
    pub color: Color32,
}

impl Segment {
    /// `HH:MM` label of the interval start.
    pub fn time(&self) -> String {
        format!("{:02}:{:02}", self.hour, self.minute)
    }
}

/// Where segment intensities come from.
pub trait IntensitySource {
    /// A value in `[0.1, 1.0)`.
    fn next_intensity(&mut self) -> f32;
}

fn scale_unit(r: f32) -> f32 {
    0.1 + r * 0.9
}

/// Fresh randomness on every call, from the thread-local generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIntensity;

impl IntensitySource for RandomIntensity {
    fn next_intensity(&mut self) -> f32 {
        scale_unit(rand::thread_rng().gen::<f32>())
    }
}

/// Reproducible intensities for tests and demos.
#[derive(Debug, Clone)]
pub struct SeededIntensity(StdRng);

impl SeededIntensity {
    pub fn new(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl IntensitySource for SeededIntensity {
    fn next_intensity(&mut self) -> f32 {
        scale_unit(self.0.gen::<f32>())
    }
}

/// Build one segment per 5 minutes for every day of `start..=end`.
pub fn generate_segments(
    start: NaiveDate,
    end: NaiveDate,
    color: Color32,
    source: &mut dyn IntensitySource,
) -> Vec<Segment> {
    let days = days_in_range(start, end);
    let mut segments = Vec::with_capacity(days.len() * SLOTS_PER_DAY);
    for (day_index, date) in days.into_iter().enumerate() {
        for hour in 0..24 {
            for minute in (0..60).step_by(MINUTES_PER_SLOT as usize) {
                segments.push(Segment {
                    day_index,
                    date,
                    hour,
                    minute,
                    intensity: source.next_intensity(),
                    color,
                });
            }
        }
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn single_day_has_288_segments() {
        let day = ymd(2024, 1, 1);
        let segments = generate_segments(day, day, Color32::GREEN, &mut SeededIntensity::new(1));
        assert_eq!(segments.len(), 288);
        assert_eq!(segments[0].time(), "00:00");
        assert_eq!(segments[1].time(), "00:05");
        assert_eq!(segments[287].time(), "23:55");
        assert!(segments.iter().all(|s| s.day_index == 0 && s.date == day));
    }

    #[test]
    fn segment_count_scales_with_inclusive_days() {
        let mut source = SeededIntensity::new(7);
        for (end_day, days) in [(1, 1), (2, 2), (30, 30)] {
            let segments =
                generate_segments(ymd(2024, 6, 1), ymd(2024, 6, end_day), Color32::GREEN, &mut source);
            assert_eq!(segments.len(), days * SLOTS_PER_DAY);
        }
    }

    #[test]
    fn day_index_advances_every_288_segments() {
        let segments = generate_segments(
            ymd(2024, 12, 31),
            ymd(2025, 1, 2),
            Color32::GREEN,
            &mut SeededIntensity::new(3),
        );
        assert_eq!(segments[SLOTS_PER_DAY - 1].day_index, 0);
        assert_eq!(segments[SLOTS_PER_DAY].day_index, 1);
        assert_eq!(segments[SLOTS_PER_DAY].date, ymd(2025, 1, 1));
        assert_eq!(segments[2 * SLOTS_PER_DAY].day_index, 2);
    }

    #[test]
    fn intensities_stay_in_range() {
        let mut random = RandomIntensity;
        let mut seeded = SeededIntensity::new(99);
        for _ in 0..10_000 {
            for value in [random.next_intensity(), seeded.next_intensity()] {
                assert!((0.1..1.0).contains(&value), "intensity {value} out of range");
            }
        }
    }

    #[test]
    fn seeded_source_is_reproducible() {
        let day = ymd(2024, 1, 1);
        let a = generate_segments(day, day, Color32::GREEN, &mut SeededIntensity::new(42));
        let b = generate_segments(day, day, Color32::GREEN, &mut SeededIntensity::new(42));
        assert_eq!(a, b);
    }
}
