//! Silence-to-segment planning.
//!
//! The planner is a pure function from detected silence intervals to output
//! time ranges. It runs in three phases:
//!
//! ```text
//! silences ──► Phase 1 ──► raw segments ──► Phase 2 ──► merged ──► Phase 3
//!              (padded       (speech          (forward     (trailing
//!               gaps)         spans)           merge)       fixup)
//! ```
//!
//! Phase 1 turns the audio between consecutive silences into padded raw
//! segments. Phase 2 merges over-short segments forward until they meet the
//! minimum length. Phase 3 folds a still-short final segment into its
//! predecessor, once.

use asplit_models::{SilenceInterval, TimeRange};

use super::config::SplitConfig;
use crate::error::{MediaError, MediaResult};

/// Raw segments shorter than this are discarded as degenerate slivers
/// (two silences closer together than the padding windows). Fixed, not
/// configurable.
const MIN_RAW_SEGMENT_SECS: f64 = 0.1;

/// Plan output segments for a file of `total_duration` seconds.
///
/// Deterministic and side-effect free. Returns an empty plan when no
/// silences were detected; the caller treats that as "nothing to split".
///
/// # Errors
///
/// `InvalidPlanInput` when `total_duration` is not positive, an interval
/// runs backwards or starts before zero, or the intervals are not in
/// ascending non-overlapping order. The detector is trusted, but malformed
/// input must not silently corrupt the plan.
pub fn plan_segments(
    total_duration: f64,
    silences: &[SilenceInterval],
    config: &SplitConfig,
) -> MediaResult<Vec<TimeRange>> {
    validate_input(total_duration, silences)?;

    if silences.is_empty() {
        return Ok(Vec::new());
    }

    let raw = raw_segments(total_duration, silences, config.padding);
    if raw.is_empty() {
        return Ok(raw);
    }

    let mut merged = merge_short_segments(raw, config.min_segment_length);

    // A final segment can still be short because the merge never looks past
    // the last element. Fold it backward once; no fixed-point iteration.
    if merged.len() > 1 {
        let last_is_short = merged
            .last()
            .map(|r| r.duration() < config.min_segment_length)
            .unwrap_or(false);
        if last_is_short {
            if let Some(removed) = merged.pop() {
                if let Some(prev) = merged.last_mut() {
                    prev.end = removed.end;
                }
            }
        }
    }

    Ok(merged)
}

fn validate_input(total_duration: f64, silences: &[SilenceInterval]) -> MediaResult<()> {
    if !total_duration.is_finite() || total_duration <= 0.0 {
        return Err(MediaError::invalid_plan(format!(
            "total duration must be positive, got {total_duration}"
        )));
    }

    let mut prev_end = 0.0_f64;
    for (i, interval) in silences.iter().enumerate() {
        if !interval.start.is_finite() || !interval.end.is_finite() {
            return Err(MediaError::invalid_plan(format!(
                "interval {i} has non-finite bounds"
            )));
        }
        if interval.start < 0.0 {
            return Err(MediaError::invalid_plan(format!(
                "interval {i} starts before zero ({})",
                interval.start
            )));
        }
        if interval.end < interval.start {
            return Err(MediaError::invalid_plan(format!(
                "interval {i} runs backwards ({} > {})",
                interval.start, interval.end
            )));
        }
        if interval.start < prev_end {
            return Err(MediaError::invalid_plan(format!(
                "interval {i} overlaps or precedes its predecessor"
            )));
        }
        prev_end = interval.end;
    }

    Ok(())
}

/// Phase 1: padded speech spans between consecutive silences.
///
/// `last_end` tracks the end of the previous silence, i.e. where speech
/// resumed. Each candidate grows backward into the previous silence's
/// trailing padding and forward into the current silence's leading padding;
/// adjacent candidates may therefore overlap by up to `2 * padding`. That
/// overlap is intentional and must survive to the output.
fn raw_segments(
    total_duration: f64,
    silences: &[SilenceInterval],
    padding: f64,
) -> Vec<TimeRange> {
    let mut raw = Vec::with_capacity(silences.len() + 1);
    let mut last_end = 0.0_f64;

    for interval in silences {
        let seg_start = (last_end - padding).max(0.0);
        let seg_end = (interval.start + padding).min(total_duration);

        if seg_end - seg_start > MIN_RAW_SEGMENT_SECS {
            raw.push(TimeRange::new(seg_start, seg_end));
        }

        last_end = interval.end;
    }

    // Audio after the last silence
    if total_duration - last_end > MIN_RAW_SEGMENT_SECS {
        raw.push(TimeRange::new((last_end - padding).max(0.0), total_duration));
    }

    raw
}

/// Phase 2: left-to-right forward merge of short segments.
///
/// While the accumulator is shorter than `min_length` it absorbs the next
/// raw segment whole: only `current.end` advances, the absorbed segment's
/// own start is discarded. Once long enough, the accumulator is committed
/// and the next raw segment starts a fresh one.
fn merge_short_segments(raw: Vec<TimeRange>, min_length: f64) -> Vec<TimeRange> {
    let mut merged = Vec::with_capacity(raw.len());
    let mut iter = raw.into_iter();

    let Some(mut current) = iter.next() else {
        return merged;
    };

    for next in iter {
        if current.duration() < min_length {
            current.end = next.end;
        } else {
            merged.push(current);
            current = next;
        }
    }
    merged.push(current);

    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn silence(start: f64, end: f64) -> SilenceInterval {
        SilenceInterval::new(start, end)
    }

    fn config(padding: f64, min_segment_length: f64) -> SplitConfig {
        SplitConfig::default()
            .with_padding(padding)
            .with_min_segment_length(min_segment_length)
    }

    fn assert_range(range: &TimeRange, start: f64, end: f64) {
        assert!(
            (range.start - start).abs() < 1e-9 && (range.end - end).abs() < 1e-9,
            "expected [{start}, {end}], got {range}"
        );
    }

    #[test]
    fn test_reference_scenario() {
        // total 100, silences (10,11) and (50,51), padding 0.5, min 20:
        // raw [0,10.5] [10.5,50.5] [50.5,100]; the first merges forward.
        let silences = [silence(10.0, 11.0), silence(50.0, 51.0)];
        let plan = plan_segments(100.0, &silences, &config(0.5, 20.0)).unwrap();

        assert_eq!(plan.len(), 2);
        assert_range(&plan[0], 0.0, 50.5);
        assert_range(&plan[1], 50.5, 100.0);
    }

    #[test]
    fn test_empty_silences_empty_plan() {
        let plan = plan_segments(60.0, &[], &config(0.5, 20.0)).unwrap();
        assert!(plan.is_empty());
    }

    #[test]
    fn test_output_ordered_with_positive_durations() {
        let silences = [
            silence(5.0, 7.0),
            silence(30.0, 32.0),
            silence(58.0, 60.0),
            silence(90.0, 93.0),
        ];
        let plan = plan_segments(120.0, &silences, &config(0.5, 20.0)).unwrap();

        assert!(!plan.is_empty());
        for window in plan.windows(2) {
            assert!(window[0].start <= window[1].start, "ranges out of order");
        }
        for range in &plan {
            assert!(range.duration() > 0.0);
        }
        assert_eq!(plan.last().unwrap().end, 120.0);
    }

    #[test]
    fn test_first_range_clamped_to_zero() {
        // First candidate always begins at max(0, 0 - padding) = 0.
        let silences = [silence(25.0, 27.0)];
        let plan = plan_segments(60.0, &silences, &config(0.5, 20.0)).unwrap();
        assert_eq!(plan[0].start, 0.0);
    }

    #[test]
    fn test_padding_never_exceeds_total_duration() {
        // Silence ends right at EOF minus a hair; trailing candidate is
        // dropped by the 0.1s tolerance, and the padded end is clamped.
        let silences = [silence(99.8, 99.95)];
        let plan = plan_segments(100.0, &silences, &config(0.5, 20.0)).unwrap();
        assert_eq!(plan.len(), 1);
        assert_range(&plan[0], 0.0, 100.0);
    }

    #[test]
    fn test_idempotent() {
        let silences = [silence(10.0, 12.0), silence(44.0, 46.0)];
        let cfg = config(0.5, 20.0);
        let first = plan_segments(90.0, &silences, &cfg).unwrap();
        let second = plan_segments(90.0, &silences, &cfg).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_merge_law() {
        let silences = [
            silence(3.0, 5.0),
            silence(8.0, 10.0),
            silence(13.0, 15.0),
            silence(70.0, 72.0),
        ];
        let cfg = config(0.5, 20.0);
        let plan = plan_segments(100.0, &silences, &cfg).unwrap();

        // Every segment but the last must meet the minimum; the last may be
        // a fixup product or a partnerless tail.
        for range in &plan[..plan.len() - 1] {
            assert!(
                range.duration() >= cfg.min_segment_length,
                "committed segment shorter than minimum: {range}"
            );
        }
    }

    #[test]
    fn test_trailing_fixup_absorbs_short_tail() {
        // raw: [0,40.5] [41.5,85.5] [86.5,100]; durations 40.5, 44, 13.5.
        // Phase 2 commits all three, then the fixup removes the short tail.
        let silences = [silence(40.0, 42.0), silence(85.0, 87.0)];
        let plan = plan_segments(100.0, &silences, &config(0.5, 20.0)).unwrap();

        // The 13.5s tail is absorbed into its predecessor.
        assert_eq!(plan.len(), 2);
        assert_range(&plan[0], 0.0, 40.5);
        assert_range(&plan[1], 41.5, 100.0);
    }

    #[test]
    fn test_fixup_runs_once_not_to_fixed_point() {
        // raw: [0,30.5] [30.5,43.5] [43.5,50] with min 20: the middle (13s)
        // absorbs the tail -> [30.5,50] (19.5s), still short after the
        // merge. The single-pass fixup folds it into [0,30.5] -> [0,50].
        // What matters is that the result is exactly one application of the
        // fixup, not an iterated one.
        let silences = [silence(30.0, 31.0), silence(43.0, 44.0)];
        let plan = plan_segments(50.0, &silences, &config(0.5, 20.0)).unwrap();

        assert_eq!(plan.len(), 1);
        assert_range(&plan[0], 0.0, 50.0);
    }

    #[test]
    fn test_sole_short_segment_emitted_as_is() {
        // One silence near EOF; the only raw segment is 10.5s with min 20.
        // No merge partner exists, so it ships short.
        let silences = [silence(10.0, 11.95)];
        let plan = plan_segments(12.0, &silences, &config(0.5, 20.0)).unwrap();
        assert_eq!(plan.len(), 1);
        assert_range(&plan[0], 0.0, 10.5);
    }

    #[test]
    fn test_deliberate_padding_overlap_preserved() {
        // Silences 10..10.2 and 10.4..40: the second candidate starts at
        // 10.2 - 0.5 = 9.7, overlapping the first's end 10.5 by 0.8 (< 2 *
        // padding). The overlap is by design and must not be "fixed".
        let silences = [silence(10.0, 10.2), silence(10.4, 40.0)];
        let plan = plan_segments(100.0, &silences, &config(0.5, 1.0)).unwrap();

        assert_eq!(plan.len(), 3);
        assert_range(&plan[0], 0.0, 10.5);
        assert_range(&plan[1], 9.7, 10.9);
        assert!(plan[0].end > plan[1].start);
        assert!(plan[0].end - plan[1].start <= 2.0 * 0.5 + 1e-9);
    }

    #[test]
    fn test_sliver_between_close_silences_dropped() {
        // The 0.05s of audio between the two silences is below the 0.1s
        // tolerance and never becomes a segment.
        let silences = [silence(5.0, 10.2), silence(10.25, 40.0)];
        let plan = plan_segments(100.0, &silences, &config(0.0, 5.0)).unwrap();

        // candidates: [0,5] (kept), [10.2,10.25] (dropped), [40,100] (kept)
        assert_eq!(plan.len(), 2);
        assert_range(&plan[0], 0.0, 5.0);
        assert_range(&plan[1], 40.0, 100.0);
    }

    #[test]
    fn test_fully_silent_file_plans_nothing() {
        // One silence covering the whole file: the only candidate has zero
        // width and the trailing check fails too.
        let silences = [silence(0.0, 100.0)];
        let plan = plan_segments(100.0, &silences, &config(0.0, 20.0)).unwrap();
        assert!(plan.is_empty());
    }

    #[test]
    fn test_rejects_non_positive_duration() {
        let err = plan_segments(0.0, &[], &config(0.5, 20.0)).unwrap_err();
        assert!(matches!(err, MediaError::InvalidPlanInput(_)));

        let err = plan_segments(-5.0, &[], &config(0.5, 20.0)).unwrap_err();
        assert!(matches!(err, MediaError::InvalidPlanInput(_)));
    }

    #[test]
    fn test_rejects_backwards_interval() {
        let silences = [silence(10.0, 8.0)];
        let err = plan_segments(60.0, &silences, &config(0.5, 20.0)).unwrap_err();
        assert!(matches!(err, MediaError::InvalidPlanInput(_)));
    }

    #[test]
    fn test_rejects_unordered_intervals() {
        let silences = [silence(30.0, 32.0), silence(10.0, 12.0)];
        let err = plan_segments(60.0, &silences, &config(0.5, 20.0)).unwrap_err();
        assert!(matches!(err, MediaError::InvalidPlanInput(_)));
    }

    #[test]
    fn test_rejects_overlapping_intervals() {
        let silences = [silence(10.0, 15.0), silence(14.0, 20.0)];
        let err = plan_segments(60.0, &silences, &config(0.5, 20.0)).unwrap_err();
        assert!(matches!(err, MediaError::InvalidPlanInput(_)));
    }

    #[test]
    fn test_rejects_negative_interval_start() {
        let silences = [silence(-1.0, 2.0)];
        let err = plan_segments(60.0, &silences, &config(0.5, 20.0)).unwrap_err();
        assert!(matches!(err, MediaError::InvalidPlanInput(_)));
    }

    #[test]
    fn test_touching_intervals_accepted() {
        // end == next start is ascending and non-overlapping.
        let silences = [silence(10.0, 12.0), silence(12.0, 14.0)];
        assert!(plan_segments(60.0, &silences, &config(0.5, 5.0)).is_ok());
    }
}
