// src/logic/announcements.rs
//! Texts spoken by the virtual quiz master.

use itertools::Itertools;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::Locale;
use crate::protocol::QuizQuestion;

/// Ordered from mild to strong praise, one per question.
pub const APPRECIATION_EN: [&str; 15] = [
    "Good", "Well done", "Great", "Super", "Fantastic", "Excellent", "Perfect", "Brilliant",
    "Outstanding", "Amazing", "Wonderful", "Extraordinary", "Incredible", "Phenomenal", "Legendary",
];

pub const APPRECIATION_TE: [&str; 15] = [
    "సరియైనది", "భలే", "భేష్", "శభాష్", "వహ్వా", "అదిరింది", "కేక", "రచ్చ", "అద్భుతం", "అమోఘం",
    "అసాధారణం", "చింపేశావు", "పరిపూర్ణం", "తిరుగులేదు", "తోపు",
];

const TELUGU_NUMBERS: [&str; 15] = [
    "ఒకటి", "రెండు", "మూడు", "నాలుగు", "అయిదు", "ఆరు", "ఏడు", "ఎనిమిది", "తొమ్మిది", "పది",
    "పదకొండు", "పన్నెండు", "పదమూడు", "పద్నాలుగు", "పదిహేను",
];

/// Options beyond the fourth are read as digits even in Telugu.
const TELUGU_OPTION_WORDS: usize = 4;

pub fn appreciation_words(locale: Locale) -> &'static [&'static str] {
    match locale {
        Locale::En => &APPRECIATION_EN,
        Locale::Te => &APPRECIATION_TE,
    }
}

/// A random word of praise, followed by an exclamation mark.
pub fn pick_appreciation<R: Rng + ?Sized>(locale: Locale, rng: &mut R) -> String {
    let word = appreciation_words(locale).choose(rng).copied().unwrap_or("Good");
    format!("{}!", word)
}

pub fn congratulations(locale: Locale) -> &'static str {
    match locale {
        Locale::En => "Congratulations! You have completed the quiz!",
        Locale::Te => "అభినందనలు! మీరు క్విజ్ పూర్తి చేశారు!",
    }
}

pub fn contains_telugu(text: &str) -> bool {
    text.chars().any(|c| ('\u{0C00}'..='\u{0C7F}').contains(&c))
}

/// 1-based number as spoken, using Telugu words where a word exists.
fn spoken_number(n: usize, telugu: bool, word_limit: usize) -> String {
    if telugu && (1..=word_limit).contains(&n) {
        TELUGU_NUMBERS[n - 1].to_string()
    } else {
        n.to_string()
    }
}

/// Full reading of a question and its options.
///
/// Telugu labels are used only when the page is in Telugu and the question itself
/// is written in Telugu script; otherwise the text is read with English labels.
pub fn question_reading(locale: Locale, index: usize, question: &QuizQuestion) -> String {
    let telugu = locale == Locale::Te && contains_telugu(&question.question);
    let (question_label, option_label) = if telugu {
        ("ప్రశ్న", "ఎంపిక")
    } else {
        ("Question", "Option")
    };

    let heading = format!(
        "{} {}. {}",
        question_label,
        spoken_number(index + 1, telugu, TELUGU_NUMBERS.len()),
        question.question
    );
    let options = question
        .options
        .iter()
        .enumerate()
        .map(|(i, option)| {
            format!("{} {}. {}", option_label, spoken_number(i + 1, telugu, TELUGU_OPTION_WORDS), option)
        })
        .join(". ");

    format!("{}. {}", heading, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn question(text: &str, options: &[&str]) -> QuizQuestion {
        QuizQuestion {
            id: 1,
            question: text.to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
            correct: 0,
        }
    }

    #[test]
    fn english_reading() {
        let q = question("What does a red light mean", &["Stop", "Go"]);
        assert_eq!(
            question_reading(Locale::En, 2, &q),
            "Question 3. What does a red light mean. Option 1. Stop. Option 2. Go"
        );
    }

    #[test]
    fn telugu_reading_needs_telugu_text() {
        let english_text = question("Wear a helmet?", &["Yes"]);
        assert!(question_reading(Locale::Te, 0, &english_text).starts_with("Question 1."));

        let telugu_text = question("హెల్మెట్ ధరించాలా?", &["అవును", "కాదు", "ఏమో", "తెలియదు", "ఇతర"]);
        let reading = question_reading(Locale::Te, 0, &telugu_text);
        assert!(reading.starts_with("ప్రశ్న ఒకటి. "));
        assert!(reading.contains("ఎంపిక నాలుగు. తెలియదు"));
        assert!(reading.ends_with("ఎంపిక 5. ఇతర"));
    }

    #[test]
    fn question_numbers_past_fifteen_are_digits() {
        let q = question("ప్రశ్న పాఠ్యం", &["అవును"]);
        assert!(question_reading(Locale::Te, 15, &q).starts_with("ప్రశ్న 16. "));
    }

    #[test]
    fn appreciation_comes_from_the_locale_list() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let en = pick_appreciation(Locale::En, &mut rng);
            assert!(APPRECIATION_EN.iter().any(|w| format!("{}!", w) == en));
            let te = pick_appreciation(Locale::Te, &mut rng);
            assert!(APPRECIATION_TE.iter().any(|w| format!("{}!", w) == te));
        }
    }

    #[test]
    fn detects_telugu_script() {
        assert!(contains_telugu("Road భద్రత"));
        assert!(!contains_telugu("Road safety"));
    }
}
