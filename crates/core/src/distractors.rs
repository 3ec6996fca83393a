//! Plausible wrong answers for a fraction-to-percent question.
//!
//! Candidates perturb the reduced fractional part and the whole part of the
//! correct answer, so a wrong option usually shares the denominator or sits a
//! point or two away. Every candidate is built through `MixedPercent`, which
//! keeps its fraction proper and in lowest terms.

use crate::formatter::format_percent;
use crate::model::MixedPercent;

/// Wrong options produced per question.
pub const DISTRACTOR_COUNT: usize = 3;

/// Produce exactly three wrong options for `numerator / denominator`.
///
/// None of the results equals `correct` and no two results are equal.
#[must_use]
pub fn generate_distractors(numerator: u64, denominator: u64, correct: &str) -> Vec<String> {
    let answer = format_percent(numerator, denominator);
    let whole = answer.whole();
    let (num, den) = (answer.numerator(), answer.denominator());

    let mut candidates: Vec<MixedPercent> = Vec::with_capacity(7);

    if den > 1 {
        candidates.push(MixedPercent::new(whole, num.saturating_sub(1).max(1), den));
        candidates.push(MixedPercent::new(whole, num + 1, den));
        if num != den - num {
            candidates.push(MixedPercent::new(whole, den - num, den));
        }
    }

    candidates.push(answer.with_whole(whole.saturating_sub(1)));
    candidates.push(answer.with_whole(whole + 1));

    candidates.push(MixedPercent::exact(whole + 2));
    candidates.push(MixedPercent::exact(whole.saturating_sub(2).max(1)));

    let mut picked: Vec<String> = Vec::with_capacity(DISTRACTOR_COUNT);
    for candidate in candidates {
        if picked.len() == DISTRACTOR_COUNT {
            break;
        }
        push_unique(&mut picked, candidate.to_string(), correct);
    }

    if picked.len() < DISTRACTOR_COUNT {
        log::debug!(
            "only {} heuristic distractors for {numerator}/{denominator}, topping up",
            picked.len()
        );
        top_up(&mut picked, whole, correct, DISTRACTOR_COUNT);
    }
    picked
}

/// Extend `picked` with exact whole percents around `whole` until it holds
/// `target` entries.
///
/// Offsets alternate +1, -1, +2, -2, ... and the low side never drops below
/// 1%. The high side grows without bound, so this always finishes.
pub fn top_up(picked: &mut Vec<String>, whole: u128, correct: &str, target: usize) {
    let mut offset = 1u128;
    while picked.len() < target {
        let high = whole.saturating_add(offset);
        push_unique(picked, MixedPercent::exact(high).to_string(), correct);
        if picked.len() < target {
            let low = whole.saturating_sub(offset).max(1);
            push_unique(picked, MixedPercent::exact(low).to_string(), correct);
        }
        offset += 1;
    }
}

fn push_unique(picked: &mut Vec<String>, candidate: String, correct: &str) {
    if candidate != correct && !picked.contains(&candidate) {
        picked.push(candidate);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatter::gcd;

    fn distractors_for(n: u64, d: u64) -> (String, Vec<String>) {
        let correct = format_percent(n, d).to_string();
        let out = generate_distractors(n, d, &correct);
        (correct, out)
    }

    #[test]
    fn seven_thirteenths_share_the_denominator() {
        let (_, out) = distractors_for(7, 13);
        assert_eq!(
            out,
            vec![
                r"53\frac{10}{13}\%".to_string(),
                r"53\frac{12}{13}\%".to_string(),
                r"53\frac{2}{13}\%".to_string(),
            ]
        );
    }

    #[test]
    fn one_third_skips_the_answer_itself() {
        // 1/3 -> 33 1/3%: numerator - 1 floors at 1 and collides with the answer.
        let (correct, out) = distractors_for(1, 3);
        assert_eq!(correct, r"33\frac{1}{3}\%");
        assert_eq!(
            out,
            vec![
                r"33\frac{2}{3}\%".to_string(),
                r"32\frac{1}{3}\%".to_string(),
                r"34\frac{1}{3}\%".to_string(),
            ]
        );
    }

    #[test]
    fn exact_answers_use_nearby_wholes() {
        let (_, out) = distractors_for(1, 2);
        assert_eq!(
            out,
            vec![r"49\%".to_string(), r"51\%".to_string(), r"52\%".to_string()]
        );
    }

    #[test]
    fn perturbed_fractions_are_reduced() {
        // 3/8 -> 37 1/2%: numerator + 1 gives 2/2 which carries to 38%.
        let (_, out) = distractors_for(3, 8);
        assert_eq!(out[0], r"38\%");
        for text in &out {
            let p: MixedPercent = text.parse().unwrap();
            assert_eq!(p.to_string(), *text);
        }
    }

    #[test]
    fn tiny_answers_are_topped_up() {
        // 0% leaves only 1% and 2% from the heuristic.
        let out = generate_distractors(0, 5, r"0\%");
        assert_eq!(
            out,
            vec![r"1\%".to_string(), r"2\%".to_string(), r"3\%".to_string()]
        );
    }

    #[test]
    fn top_up_alternates_and_clamps() {
        let mut picked = Vec::new();
        top_up(&mut picked, 2, r"2\%", 4);
        assert_eq!(picked, vec![r"3\%", r"1\%", r"4\%", r"5\%"]);
    }

    #[test]
    fn always_three_distinct_wrong_answers() {
        for den in 2..=40 {
            for num in 0..=(den + 3) {
                let (correct, out) = distractors_for(num, den);
                assert_eq!(out.len(), DISTRACTOR_COUNT, "{num}/{den}");
                assert!(!out.contains(&correct), "{num}/{den}");
                for (i, text) in out.iter().enumerate() {
                    assert!(!out[..i].contains(text), "{num}/{den} repeats {text}");
                    let p: MixedPercent = text.parse().unwrap();
                    if !p.is_exact() {
                        assert_eq!(gcd(p.numerator(), p.denominator()), 1);
                    }
                }
            }
        }
    }

    #[test]
    fn mismatched_correct_text_still_gives_three() {
        let out = generate_distractors(1, 2, "something else");
        assert_eq!(out.len(), 3);
    }
}
