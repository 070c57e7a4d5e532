use crate::shared::constants::MODEL_CONFIDENCE_THRESHOLD;
use crate::shared::detection::Detection;

/// Which of a frame's detections are acted upon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    /// Every detection that passes the threshold.
    #[default]
    All,
    /// Only the detector's first detection, if it passes the threshold.
    Primary,
}

/// Filters raw detector output down to the detections that are drawn and
/// that count toward the gate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectionPolicy {
    /// Confidence a detection must strictly exceed. `None` accepts all.
    pub threshold: Option<f64>,
    pub selection: Selection,
}

impl DetectionPolicy {
    pub fn new(threshold: Option<f64>, selection: Selection) -> Self {
        Self {
            threshold,
            selection,
        }
    }

    /// Binary presence: draw every box, no threshold.
    pub fn cascade() -> Self {
        Self::new(None, Selection::All)
    }

    /// Primary face only, gated on the model confidence threshold.
    pub fn model() -> Self {
        Self::new(Some(MODEL_CONFIDENCE_THRESHOLD), Selection::Primary)
    }

    pub fn qualifies(&self, detection: &Detection) -> bool {
        self.threshold
            .map_or(true, |threshold| detection.confidence > threshold)
    }

    pub fn apply(&self, detections: Vec<Detection>) -> Vec<Detection> {
        let candidates: Vec<Detection> = match self.selection {
            Selection::All => detections,
            Selection::Primary => detections.into_iter().take(1).collect(),
        };
        candidates
            .into_iter()
            .filter(|d| self.qualifies(d))
            .collect()
    }
}

impl Default for DetectionPolicy {
    fn default() -> Self {
        Self::cascade()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn det(confidence: f64) -> Detection {
        Detection::new(10, 10, 50, 50, confidence)
    }

    #[rstest]
    #[case::exactly_threshold(0.50, false)]
    #[case::just_above(0.51, true)]
    #[case::below(0.2, false)]
    fn test_threshold_is_strict(#[case] confidence: f64, #[case] kept: bool) {
        let policy = DetectionPolicy::new(Some(0.5), Selection::All);
        assert_eq!(policy.apply(vec![det(confidence)]).len(), kept as usize);
    }

    #[test]
    fn test_no_threshold_keeps_everything() {
        let policy = DetectionPolicy::cascade();
        let out = policy.apply(vec![det(0.0), det(1.0), det(0.3)]);
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn test_primary_keeps_only_first() {
        let policy = DetectionPolicy::new(None, Selection::Primary);
        let out = policy.apply(vec![det(0.6), det(0.9)]);
        assert_eq!(out, vec![det(0.6)]);
    }

    #[test]
    fn test_primary_does_not_fall_through_to_later_detections() {
        // The first detection fails the threshold; the second is not promoted.
        let policy = DetectionPolicy::model();
        let out = policy.apply(vec![det(0.4), det(0.9)]);
        assert!(out.is_empty());
    }

    #[test]
    fn test_empty_input() {
        assert!(DetectionPolicy::model().apply(vec![]).is_empty());
        assert!(DetectionPolicy::cascade().apply(vec![]).is_empty());
    }

    #[test]
    fn test_model_policy_defaults() {
        let policy = DetectionPolicy::model();
        assert_eq!(policy.threshold, Some(MODEL_CONFIDENCE_THRESHOLD));
        assert_eq!(policy.selection, Selection::Primary);
    }
}
