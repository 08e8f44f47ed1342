//! Sidebar advisory content: mood check, tip of the day and FAQ
//!
//! Everything here is static text keyed by closed enums. None of it
//! touches the price model.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use std::str::FromStr;

/// Visual tone of an advisory message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Success,
    Info,
    Warning,
}

impl Tone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Success => "success",
            Tone::Info => "info",
            Tone::Warning => "warning",
        }
    }
}

/// How the visitor feels today
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    #[default]
    Great,
    Okay,
    Stressed,
}

impl Mood {
    pub const ALL: [Mood; 3] = [Mood::Great, Mood::Okay, Mood::Stressed];

    pub fn id(&self) -> &'static str {
        match self {
            Mood::Great => "great",
            Mood::Okay => "okay",
            Mood::Stressed => "stressed",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Mood::Great => "😊 Great",
            Mood::Okay => "😐 Okay",
            Mood::Stressed => "😟 Stressed",
        }
    }

    pub fn tone(&self) -> Tone {
        match self {
            Mood::Great => Tone::Success,
            Mood::Okay => Tone::Info,
            Mood::Stressed => Tone::Warning,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Mood::Great => "Awesome! Let's get you a great estimate 💸",
            Mood::Okay => "We'll try to brighten your day with accurate insights!",
            Mood::Stressed => "Hang in there, your dream home is just a click away 🏡",
        }
    }
}

impl FromStr for Mood {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mood::ALL
            .into_iter()
            .find(|m| m.id() == s)
            .ok_or_else(|| format!("Unknown mood: {}", s))
    }
}

/// Tips shown in the sidebar, one picked at random per page
pub const HOUSE_TIPS: [&str; 5] = [
    "🏠 Fun Fact: Homes with south-facing windows are valued higher!",
    "📊 Did you know? Location can impact pricing by up to 30%.",
    "💡 Tip: Properties near schools sell 12% faster.",
    "🌿 A green view can boost your home's worth by ₹5–10L!",
    "🚪 Smart security features add resale value.",
];

/// Pick a tip using the given random source
pub fn tip_with<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    HOUSE_TIPS.choose(rng).copied().unwrap_or(HOUSE_TIPS[0])
}

/// Pick a tip of the day
pub fn random_tip() -> &'static str {
    tip_with(&mut rand::thread_rng())
}

/// Questions the FAQ bot can answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FaqQuestion {
    #[default]
    HowItWorks,
    KeyFeatures,
    ImproveValue,
    LocationVsSize,
    LowPrediction,
    JustExploring,
}

impl FaqQuestion {
    pub const ALL: [FaqQuestion; 6] = [
        FaqQuestion::HowItWorks,
        FaqQuestion::KeyFeatures,
        FaqQuestion::ImproveValue,
        FaqQuestion::LocationVsSize,
        FaqQuestion::LowPrediction,
        FaqQuestion::JustExploring,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            FaqQuestion::HowItWorks => "how-it-works",
            FaqQuestion::KeyFeatures => "key-features",
            FaqQuestion::ImproveValue => "improve-value",
            FaqQuestion::LocationVsSize => "location-vs-size",
            FaqQuestion::LowPrediction => "low-prediction",
            FaqQuestion::JustExploring => "just-exploring",
        }
    }

    pub fn question(&self) -> &'static str {
        match self {
            FaqQuestion::HowItWorks => "💡 How does the model predict prices?",
            FaqQuestion::KeyFeatures => "🏗️ What features affect house price most?",
            FaqQuestion::ImproveValue => "🔧 How can I improve my home's value?",
            FaqQuestion::LocationVsSize => "📍 Is location more important than size?",
            FaqQuestion::LowPrediction => "📉 Why is my prediction low?",
            FaqQuestion::JustExploring => "❓ None of these, just exploring!",
        }
    }

    pub fn answer(&self) -> &'static str {
        match self {
            FaqQuestion::HowItWorks => {
                "Our ML model uses past housing data (size, location, amenities) to estimate value using pattern recognition."
            }
            FaqQuestion::KeyFeatures => {
                "Usually: Area (sqft), location, furnishing, and bathrooms. Nearby amenities also matter!"
            }
            FaqQuestion::ImproveValue => {
                "Adding bathrooms, furnishing, or upgrading kitchen/tiles often boosts price 🔼."
            }
            FaqQuestion::LocationVsSize => {
                "Both matter! A smaller flat in a premium area might be worth more than a big one in outskirts."
            }
            FaqQuestion::LowPrediction => {
                "Try increasing area, bathrooms, or selecting better amenities. Also, furnishing status plays a role."
            }
            FaqQuestion::JustExploring => {
                "That's cool 😎. Play around with the inputs and see how price responds!"
            }
        }
    }
}

impl FromStr for FaqQuestion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FaqQuestion::ALL
            .into_iter()
            .find(|q| q.id() == s)
            .ok_or_else(|| format!("Unknown question: {}", s))
    }
}

/// Everything the sidebar shows for one page render
#[derive(Debug, Clone, Serialize)]
pub struct AdvisoryPanel {
    pub mood: Mood,
    pub mood_tone: Tone,
    pub mood_message: &'static str,
    pub tip: &'static str,
    pub question: FaqQuestion,
    pub answer: &'static str,
}

impl AdvisoryPanel {
    pub fn new(mood: Mood, question: FaqQuestion, tip: &'static str) -> Self {
        Self {
            mood,
            mood_tone: mood.tone(),
            mood_message: mood.message(),
            tip,
            question,
            answer: question.answer(),
        }
    }

    /// Panel with a freshly drawn tip
    pub fn render(mood: Mood, question: FaqQuestion) -> Self {
        Self::new(mood, question, random_tip())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_mood_tones() {
        assert_eq!(Mood::Great.tone(), Tone::Success);
        assert_eq!(Mood::Okay.tone(), Tone::Info);
        assert_eq!(Mood::Stressed.tone(), Tone::Warning);
    }

    #[test]
    fn test_mood_parse() {
        for mood in Mood::ALL {
            assert_eq!(mood.id().parse::<Mood>(), Ok(mood));
        }
        assert!("ecstatic".parse::<Mood>().is_err());
    }

    #[test]
    fn test_every_question_has_an_answer() {
        for question in FaqQuestion::ALL {
            assert!(!question.answer().is_empty());
            assert_eq!(question.id().parse::<FaqQuestion>(), Ok(question));
        }
        assert!("what-is-love".parse::<FaqQuestion>().is_err());
    }

    #[test]
    fn test_tip_comes_from_fixed_list() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            assert!(HOUSE_TIPS.contains(&tip_with(&mut rng)));
        }
        assert!(HOUSE_TIPS.contains(&random_tip()));
    }

    #[test]
    fn test_panel_pairs_question_and_answer() {
        let panel = AdvisoryPanel::new(Mood::Stressed, FaqQuestion::LowPrediction, HOUSE_TIPS[1]);
        assert_eq!(panel.mood_tone, Tone::Warning);
        assert_eq!(panel.answer, FaqQuestion::LowPrediction.answer());
        assert_eq!(panel.tip, HOUSE_TIPS[1]);
    }
}
