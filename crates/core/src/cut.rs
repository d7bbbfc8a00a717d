//! Cut decision - the one real gameplay rule.
//!
//! Given the previous layer and the moving layer, decide whether the drop
//! missed, and if not, where the kept part and the overhang end up. All
//! values are measured along the moving layer's axis; the cross axis is
//! never touched.

use crate::layer::Layer;

/// Geometry of a successful cut along one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cut {
    /// `moving - previous` along the axis.
    pub delta: f32,
    /// Size of the part that stays on the stack.
    pub overlap: f32,
    /// Size of the part that falls off (`|delta|`).
    pub overhang: f32,
    /// Centre of the kept part.
    pub kept_center: f32,
    /// Centre of the overhang, flush against the kept part.
    pub fragment_center: f32,
}

/// Result of resolving a drop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CutOutcome {
    /// No overlap left; the game is over.
    Miss { delta: f32, overlap: f32 },
    Cut(Cut),
}

impl CutOutcome {
    pub fn is_miss(&self) -> bool {
        matches!(self, CutOutcome::Miss { .. })
    }
}

/// Resolve a drop from raw centres and the previous layer's size.
pub fn resolve_along(previous_center: f32, previous_size: f32, moving_center: f32) -> CutOutcome {
    let delta = moving_center - previous_center;
    let overhang = delta.abs();
    let overlap = previous_size - overhang;

    if overlap <= 0.0 {
        return CutOutcome::Miss { delta, overlap };
    }

    let kept_center = moving_center - delta / 2.0;
    let fragment_center = kept_center + delta.signum() * (overlap / 2.0 + overhang / 2.0);

    CutOutcome::Cut(Cut {
        delta,
        overlap,
        overhang,
        kept_center,
        fragment_center,
    })
}

/// Resolve a drop of `moving` onto `previous` along `moving.axis`.
pub fn resolve(previous: &Layer, moving: &Layer) -> CutOutcome {
    let axis = moving.axis;
    resolve_along(
        axis.of(previous.position),
        previous.extent.along(axis),
        axis.of(moving.position),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    fn expect_cut(outcome: CutOutcome) -> Cut {
        match outcome {
            CutOutcome::Cut(cut) => cut,
            CutOutcome::Miss { .. } => panic!("expected a cut, got {outcome:?}"),
        }
    }

    #[test]
    fn test_partial_overlap_on_negative_side() {
        let cut = expect_cut(resolve_along(0.0, 3.0, -0.4));

        assert!(approx(cut.delta, -0.4));
        assert!(approx(cut.overhang, 0.4));
        assert!(approx(cut.overlap, 2.6));
        assert!(approx(cut.kept_center, -0.2));
        assert!(approx(cut.fragment_center, -1.7));
    }

    #[test]
    fn test_partial_overlap_on_positive_side() {
        let cut = expect_cut(resolve_along(1.0, 2.0, 1.5));

        assert!(approx(cut.overlap, 1.5));
        assert!(approx(cut.kept_center, 1.25));
        // Moving spanned [0.5, 2.5]; previous [0, 2]; overhang is [2, 2.5].
        assert!(approx(cut.fragment_center, 2.25));
    }

    #[test]
    fn test_kept_and_fragment_are_flush_and_conserve_size() {
        for moving in [-2.9_f32, -1.0, -0.01, 0.3, 1.7, 2.95] {
            let cut = expect_cut(resolve_along(0.0, 3.0, moving));
            assert!(approx(cut.overlap + cut.overhang, 3.0));

            let gap = (cut.fragment_center - cut.kept_center).abs();
            assert!(approx(gap, cut.overlap / 2.0 + cut.overhang / 2.0));

            // Kept part and fragment together span exactly the moving layer.
            let lo = (cut.kept_center - cut.overlap / 2.0)
                .min(cut.fragment_center - cut.overhang / 2.0);
            let hi = (cut.kept_center + cut.overlap / 2.0)
                .max(cut.fragment_center + cut.overhang / 2.0);
            assert!(approx(lo, moving - 1.5));
            assert!(approx(hi, moving + 1.5));
        }
    }

    #[test]
    fn test_perfect_drop_keeps_full_size() {
        let cut = expect_cut(resolve_along(0.5, 3.0, 0.5));
        assert_eq!(cut.delta, 0.0);
        assert_eq!(cut.overhang, 0.0);
        assert_eq!(cut.overlap, 3.0);
        assert_eq!(cut.kept_center, 0.5);
    }

    #[test]
    fn test_full_miss() {
        let outcome = resolve_along(0.0, 3.0, -4.0);
        assert!(outcome.is_miss());
        match outcome {
            CutOutcome::Miss { delta, overlap } => {
                assert!(approx(delta, -4.0));
                assert!(approx(overlap, -1.0));
            }
            CutOutcome::Cut(_) => unreachable!(),
        }
    }

    #[test]
    fn test_touching_edges_is_a_miss() {
        assert!(resolve_along(0.0, 3.0, 3.0).is_miss());
        assert!(resolve_along(0.0, 3.0, -3.0).is_miss());
    }
}
