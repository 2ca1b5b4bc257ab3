//! Linear-interpolation resampling onto an even time grid.

use crate::geom::Sample;

/// Resample a sequence of samples onto `n` evenly spaced time offsets.
///
/// The input is sorted by time first; callers are not required to pre-sort.
/// Among samples sharing a timestamp, the first one encountered scanning
/// left to right becomes the left bracket. Output times span
/// `[min(t), max(t)]` inclusive and each value is linearly interpolated
/// between the two original samples bracketing its target time.
///
/// Inputs with at most one sample are returned unchanged, since there is
/// nothing to interpolate between, and `n` is clamped to at least two so
/// both endpoints are always emitted. The function is a pure mapping of its
/// arguments; resampling an already resampled sequence to the same `n`
/// reproduces it.
pub fn resample(samples: &[Sample], n: usize) -> Vec<Sample> {
    if samples.len() <= 1 {
        return samples.to_vec();
    }
    let n = n.max(2);

    let mut sorted = samples.to_vec();
    sorted.sort_by(|a, b| a.t.total_cmp(&b.t));

    let t_min = sorted[0].t;
    let t_max = sorted[sorted.len() - 1].t;
    let span = t_max - t_min;

    let mut out = Vec::with_capacity(n);
    let mut cursor = 0;
    for i in 0..n {
        let progress = i as f64 / (n - 1) as f64;
        let target = t_min + progress * span;

        // Advance to the first bracket whose right edge reaches the target.
        // Targets are non-decreasing, so the cursor never has to back up.
        while cursor + 2 < sorted.len() && sorted[cursor + 1].t < target {
            cursor += 1;
        }
        let left = sorted[cursor];
        let right = sorted[cursor + 1];

        let value = if left.t == right.t {
            left.value
        } else {
            let ratio = (target - left.t) / (right.t - left.t);
            left.value + ratio * (right.value - left.value)
        };
        out.push(Sample::new(target, value));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(samples: &[Sample]) -> Vec<(f64, f64)> {
        samples.iter().map(|s| (s.t, s.value)).collect()
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn worked_example() {
        let input = [
            Sample::new(0.0, 0.2),
            Sample::new(10.0, 0.9),
            Sample::new(20.0, 0.5),
        ];
        let out = resample(&input, 5);
        assert_eq!(out.len(), 5);
        for (i, expected_t) in [0.0, 5.0, 10.0, 15.0, 20.0].into_iter().enumerate() {
            assert!(close(out[i].t, expected_t));
        }
        assert!(close(out[1].value, 0.55));
        assert!(close(out[3].value, 0.7));
    }

    #[test]
    fn output_length_matches_request() {
        let input: Vec<Sample> = (0..7).map(|i| Sample::new(i as f64, 0.5)).collect();
        for n in [2, 3, 5, 64, 200] {
            assert_eq!(resample(&input, n).len(), n);
        }
    }

    #[test]
    fn output_times_are_even_and_non_decreasing() {
        let input = [
            Sample::new(0.0, 0.1),
            Sample::new(1.0, 0.9),
            Sample::new(7.0, 0.3),
        ];
        let out = resample(&input, 8);
        let step = 7.0 / 7.0;
        for (i, sample) in out.iter().enumerate() {
            assert!(close(sample.t, i as f64 * step));
        }
        for window in out.windows(2) {
            assert!(window[1].t >= window[0].t);
        }
    }

    #[test]
    fn endpoints_keep_original_values() {
        let input = [
            Sample::new(3.0, 0.8),
            Sample::new(11.0, 0.15),
            Sample::new(6.0, 0.4),
        ];
        let out = resample(&input, 9);
        assert!(close(out[0].t, 3.0));
        assert!(close(out[0].value, 0.8));
        assert!(close(out[8].t, 11.0));
        assert!(close(out[8].value, 0.15));
    }

    #[test]
    fn unsorted_input_is_sorted_first() {
        let shuffled = [
            Sample::new(20.0, 0.5),
            Sample::new(0.0, 0.2),
            Sample::new(10.0, 0.9),
        ];
        let sorted = [
            Sample::new(0.0, 0.2),
            Sample::new(10.0, 0.9),
            Sample::new(20.0, 0.5),
        ];
        assert_eq!(pairs(&resample(&shuffled, 5)), pairs(&resample(&sorted, 5)));
    }

    #[test]
    fn identity_on_already_even_input() {
        let input: Vec<Sample> = (0..5)
            .map(|i| Sample::new(i as f64 * 2.0, (i as f64).sin().abs()))
            .collect();
        let out = resample(&input, 5);
        for (a, b) in input.iter().zip(&out) {
            assert!(close(a.t, b.t));
            assert!(close(a.value, b.value));
        }
    }

    #[test]
    fn resampling_is_idempotent() {
        let input = [
            Sample::new(0.0, 0.3),
            Sample::new(2.0, 0.9),
            Sample::new(9.0, 0.1),
            Sample::new(13.0, 0.6),
        ];
        let once = resample(&input, 7);
        let twice = resample(&once, 7);
        for (a, b) in once.iter().zip(&twice) {
            assert!(close(a.t, b.t));
            assert!(close(a.value, b.value));
        }
    }

    #[test]
    fn tiny_inputs_are_returned_unchanged() {
        assert!(resample(&[], 10).is_empty());
        let single = [Sample::new(4.0, 0.5)];
        assert_eq!(pairs(&resample(&single, 10)), pairs(&single));
    }

    #[test]
    fn shared_timestamps_take_the_left_value() {
        let input = [Sample::new(0.0, 0.1), Sample::new(0.0, 0.9)];
        let out = resample(&input, 3);
        assert_eq!(out.len(), 3);
        for sample in &out {
            assert!(close(sample.t, 0.0));
            assert!(close(sample.value, 0.1));
        }
    }

    #[test]
    fn target_count_is_clamped_to_two() {
        let input = [Sample::new(0.0, 0.0), Sample::new(1.0, 1.0)];
        let out = resample(&input, 0);
        assert_eq!(out.len(), 2);
        assert!(close(out[0].value, 0.0));
        assert!(close(out[1].value, 1.0));
    }
}
