// Coaching copy: welcome lines, tip pools, encouragement templates and
// phase remarks. All random picks take an injected RNG so selection is
// deterministic under a seeded generator.

use rand::seq::SliceRandom;
use rand::Rng;

use super::ExerciseKind;
use crate::analysis::repetition::Phase;

pub const VOICE_ACTIVATED: &str =
    "Voice coach activated! I'll guide you through every movement.";
pub const ANALYSIS_ACTIVATED: &str =
    "AI analysis activated! I'll analyze your form and provide expert feedback.";
pub const RESET_SPOKEN: &str = "Reps reset! Let's start a new set with fresh energy!";
pub const RESET_FEEDBACK: &str = "Reps reset! Ready for new set!";
pub const TEST_VOICE: &str = "This is your AI personal trainer! I provide real-time feedback using AI form analysis. Let's make this an amazing workout!";
pub const FALLBACK_REMARK: &str = "Good form! Keep going!";

/// Spoken when the session starts with `kind` selected
pub fn welcome(kind: ExerciseKind) -> &'static str {
    match kind {
        ExerciseKind::Squat => {
            "Welcome! I'll coach you through squats. Remember to keep your back straight and go deep!"
        }
        ExerciseKind::Pushup => {
            "Welcome! Let's do push-ups. Keep your body straight and lower with control!"
        }
        ExerciseKind::BicepCurl => {
            "Welcome! Time for bicep curls. Keep elbows locked and squeeze at the top!"
        }
        ExerciseKind::ShoulderPress => {
            "Welcome! Shoulder press time. Press overhead and keep core tight!"
        }
    }
}

/// Per-exercise pool the coaching scheduler draws from
pub fn tips(kind: ExerciseKind) -> &'static [&'static str] {
    match kind {
        ExerciseKind::Squat => &[
            "Remember to keep your chest up and back straight!",
            "Push through your heels, not your toes!",
            "Go deep for maximum muscle engagement!",
            "Keep your core tight throughout the movement!",
            "You're building strong legs and glutes!",
        ],
        ExerciseKind::Pushup => &[
            "Maintain a straight line from head to heels!",
            "Lower yourself with control for better results!",
            "Engage your core and glutes!",
            "Full range of motion builds more strength!",
            "You're building amazing upper body strength!",
        ],
        ExerciseKind::BicepCurl => &[
            "Keep those elbows locked at your sides!",
            "Squeeze hard at the top of each rep!",
            "Control the weight on the way down!",
            "Focus on the muscle-mind connection!",
            "You're building impressive arm strength!",
        ],
        ExerciseKind::ShoulderPress => &[
            "Press directly overhead, keep core tight!",
            "Control the descent for better muscle growth!",
            "Don't arch your back during the press!",
            "Full extension builds shoulder definition!",
            "You're building strong, capped shoulders!",
        ],
    }
}

pub fn pick_tip<R: Rng>(kind: ExerciseKind, rng: &mut R) -> Option<&'static str> {
    tips(kind).choose(rng).copied()
}

/// Encouragement spoken on every completed repetition
pub fn encouragement<R: Rng>(rep_count: u32, rng: &mut R) -> String {
    match rng.gen_range(0..5) {
        0 => format!("Excellent! {} reps complete!", rep_count),
        1 => format!("Great work! That's {}!", rep_count),
        2 => format!("Perfect form! {} done!", rep_count),
        3 => format!("You're crushing it! {} reps!", rep_count),
        _ => format!("Strong! {} completed with great form!", rep_count),
    }
}

/// Short on-screen feedback when a phase is entered
pub fn phase_feedback(kind: ExerciseKind, phase: Phase) -> Option<&'static str> {
    match (kind, phase) {
        (ExerciseKind::Squat | ExerciseKind::Pushup, Phase::Bottom) => {
            Some("Perfect! Push back up powerfully")
        }
        (ExerciseKind::BicepCurl, Phase::Contracted) => Some("Strong squeeze! Lower slowly"),
        _ => None,
    }
}

/// Spoken form remark for a phase, given the metric that triggered it
pub fn phase_remark(kind: ExerciseKind, phase: Phase, metric: u32) -> &'static str {
    match (kind, phase) {
        (ExerciseKind::Squat, Phase::Bottom) if metric < 70 => "Too deep! Aim for 90 degrees",
        (ExerciseKind::Squat, Phase::Bottom) => "Perfect depth! Now drive up!",
        (ExerciseKind::Squat, Phase::Top) => "Great! Ready for next rep!",
        (ExerciseKind::Pushup, Phase::Bottom) => "Perfect! Chest almost touching, now push up!",
        (ExerciseKind::Pushup, Phase::Top) => "Excellent! Full extension achieved!",
        (ExerciseKind::BicepCurl, Phase::Contracted) => {
            "Great contraction! Now lower with control!"
        }
        (ExerciseKind::BicepCurl, Phase::Top) => "Perfect! Full range of motion!",
        _ => FALLBACK_REMARK,
    }
}

pub fn rep_feedback(rep_count: u32) -> String {
    format!("Perfect rep #{}!", rep_count)
}

pub fn switched_to(kind: ExerciseKind) -> String {
    format!("Switched to {}. Let's do this!", kind.display_name())
}

pub fn farewell(total_reps: u32) -> String {
    format!(
        "Amazing workout! You completed {} reps with great form. You're getting stronger every day!",
        total_reps
    )
}

pub fn completed_feedback(total_reps: u32) -> String {
    format!("Completed {} reps! Excellent work!", total_reps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn every_exercise_has_tips() {
        for kind in ExerciseKind::ALL {
            assert_eq!(tips(kind).len(), 5, "{:?} tip pool", kind);
        }
    }

    #[test]
    fn seeded_picks_are_deterministic() {
        let mut a = StdRng::seed_from_u64(7);
        let mut b = StdRng::seed_from_u64(7);
        for rep in 1..20 {
            assert_eq!(encouragement(rep, &mut a), encouragement(rep, &mut b));
            assert_eq!(
                pick_tip(ExerciseKind::Squat, &mut a),
                pick_tip(ExerciseKind::Squat, &mut b)
            );
        }
    }

    #[test]
    fn encouragement_mentions_rep_count() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..10 {
            assert!(encouragement(12, &mut rng).contains("12"));
        }
    }

    #[test]
    fn squat_remark_depends_on_depth() {
        assert_eq!(
            phase_remark(ExerciseKind::Squat, Phase::Bottom, 65),
            "Too deep! Aim for 90 degrees"
        );
        assert_eq!(
            phase_remark(ExerciseKind::Squat, Phase::Bottom, 75),
            "Perfect depth! Now drive up!"
        );
        assert_eq!(
            phase_remark(ExerciseKind::ShoulderPress, Phase::Top, 50),
            FALLBACK_REMARK
        );
    }
}
