//! Ordered response rules over the breed knowledge table

use super::intent::{Intent, Question};
use crate::domain::knowledge::{BreedFactSheet, BreedKnowledge};

type BuildFn = fn(&str, &BreedFactSheet) -> String;

/// One (predicate, response builder) pair
#[derive(Clone, Copy)]
pub struct ResponseRule {
    intent: Intent,
    build: BuildFn,
}

impl ResponseRule {
    pub const fn new(intent: Intent, build: BuildFn) -> Self {
        Self { intent, build }
    }

    pub fn intent(&self) -> Intent {
        self.intent
    }

    /// `General` is the catch-all and matches every question
    pub fn matches(&self, question: &Question) -> bool {
        self.intent == Intent::General || self.intent.matches(question)
    }

    pub fn answer(&self, breed: &str, sheet: &BreedFactSheet) -> String {
        (self.build)(breed, sheet)
    }
}

impl std::fmt::Debug for ResponseRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseRule")
            .field("intent", &self.intent)
            .finish()
    }
}

static RULES: [ResponseRule; 9] = [
    ResponseRule::new(Intent::Diet, |_, sheet| {
        format!("🍖 **Dietary Advice:** {}", sheet.diet)
    }),
    ResponseRule::new(Intent::Origin, |breed, sheet| {
        format!("🌍 **Origin:** The {} originates from {}.", breed, sheet.origin)
    }),
    ResponseRule::new(Intent::Lifespan, |breed, sheet| {
        format!("⏳ **Lifespan:** The {} typically lives for {}.", breed, sheet.life_span)
    }),
    ResponseRule::new(Intent::Climate, |_, sheet| {
        format!("☀️ **Climate Preference:** {}", sheet.climate)
    }),
    ResponseRule::new(Intent::Grooming, |_, sheet| {
        format!("🛁 **Grooming:** {}", sheet.grooming)
    }),
    ResponseRule::new(Intent::Training, |_, sheet| {
        format!("🎓 **Training:** {}", sheet.training)
    }),
    ResponseRule::new(Intent::Size, |_, sheet| {
        format!("📏 **Size:** They typically stand {} tall.", sheet.height)
    }),
    ResponseRule::new(Intent::Greeting, |breed, _| {
        format!(
            "Woof! I am your {} expert. Ask me about my diet, health, or history!",
            breed
        )
    }),
    ResponseRule::new(Intent::General, |breed, sheet| {
        format!(
            "That's an interesting question about the **{}**. While I specialize in their \
             biology and care, generally speaking: {}",
            breed, sheet.bio
        )
    }),
];

/// Answers questions about an identified breed.
///
/// Never fails: unknown breeds fall back to the default fact sheet and
/// unrecognised questions to the breed biography.
#[derive(Debug, Clone, Copy)]
pub struct Responder<'a> {
    knowledge: &'a BreedKnowledge,
    rules: &'a [ResponseRule],
}

impl<'a> Responder<'a> {
    pub fn new(knowledge: &'a BreedKnowledge) -> Self {
        Self {
            knowledge,
            rules: &RULES,
        }
    }

    pub fn rules(&self) -> &[ResponseRule] {
        self.rules
    }

    /// Which rule would answer this question
    pub fn intent_of(&self, question: &str) -> Intent {
        let question = Question::new(question);
        self.select(&question).map_or(Intent::General, |rule| rule.intent())
    }

    pub fn respond(&self, breed: &str, question: &str) -> String {
        let question = Question::new(question);
        let sheet = self.knowledge.sheet(breed);

        match self.select(&question) {
            Some(rule) => rule.answer(breed, sheet),
            None => sheet.bio.clone(),
        }
    }

    fn select(&self, question: &Question) -> Option<&ResponseRule> {
        self.rules.iter().find(|rule| rule.matches(question))
    }
}

impl Default for Responder<'static> {
    fn default() -> Self {
        Self::new(BreedKnowledge::builtin())
    }
}

/// Answer with the built-in knowledge table
pub fn respond(breed: &str, question: &str) -> String {
    Responder::default().respond(breed, question)
}

/// Opening assistant message for a freshly identified breed
pub fn greeting_for(breed: &str) -> String {
    format!(
        "Hello! I've identified this as a **{}**. I am an expert on this breed. Ask me anything!",
        breed
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_respond_is_deterministic() {
        let first = respond("Golden Retriever", "What do they eat?");
        let second = respond("Golden Retriever", "What do they eat?");

        assert_eq!(first, second);
        assert_eq!(
            first,
            "🍖 **Dietary Advice:** Balanced diet. They love to eat, so watch for obesity."
        );
    }

    #[test]
    fn test_diet_wins_over_origin() {
        let answer = respond("Pug", "where do they eat");
        assert!(answer.starts_with("🍖 **Dietary Advice:**"));
    }

    #[test]
    fn test_origin_template_uses_breed_name() {
        assert_eq!(
            respond("Beagle", "What is their history?"),
            "🌍 **Origin:** The Beagle originates from United Kingdom."
        );
    }

    #[test]
    fn test_lifespan_template() {
        assert_eq!(
            respond("Chihuahua", "How long do they live?"),
            "⏳ **Lifespan:** The Chihuahua typically lives for 14-20 years."
        );
    }

    #[test]
    fn test_grooming_template() {
        assert_eq!(
            respond("Pug", "Any grooming tips?"),
            "🛁 **Grooming:** Clean face wrinkles daily to prevent infection."
        );
    }

    #[test]
    fn test_size_template() {
        assert_eq!(
            respond("Pug", "How big do they get?"),
            "📏 **Size:** They typically stand 10-13 inches tall."
        );
    }

    #[test]
    fn test_greeting() {
        assert_eq!(
            respond("Boxer", "hey!"),
            "Woof! I am your Boxer expert. Ask me about my diet, health, or history!"
        );
    }

    #[test]
    fn test_unknown_question_returns_bio() {
        let answer = respond("Pug", "Tell me something");

        assert!(answer.starts_with("That's an interesting question about the **Pug**."));
        assert!(answer.ends_with(&BreedKnowledge::builtin().sheet("Pug").bio));
    }

    #[test]
    fn test_unknown_breed_uses_default_sheet() {
        assert_eq!(
            respond("Martian Hound", "What should I feed it?"),
            "🍖 **Dietary Advice:** Standard balanced dog food appropriate for size."
        );
        assert_eq!(
            respond("Martian Hound", "Where is it from?"),
            "🌍 **Origin:** The Martian Hound originates from International."
        );
    }

    #[test]
    fn test_partial_match_keeps_requested_name() {
        assert_eq!(
            respond("Toy Poodle", "Where are they from?"),
            "🌍 **Origin:** The Toy Poodle originates from France/Germany."
        );
    }

    #[test]
    fn test_rules_end_with_catch_all() {
        let responder = Responder::default();
        let last = responder.rules().last().unwrap();

        assert_eq!(last.intent(), Intent::General);
        assert!(last.matches(&Question::new("")));
    }

    #[test]
    fn test_rule_order_follows_intent_priority() {
        let responder = Responder::default();
        let intents: Vec<Intent> = responder.rules().iter().map(|r| r.intent()).collect();

        assert_eq!(&intents[..8], &Intent::PRIORITY);
    }

    #[test]
    fn test_intent_of() {
        assert_eq!(Responder::default().intent_of("Is it hot?"), Intent::Climate);
        assert_eq!(Responder::default().intent_of("???"), Intent::General);
    }

    #[test]
    fn test_greeting_for() {
        assert_eq!(
            greeting_for("Pug"),
            "Hello! I've identified this as a **Pug**. I am an expert on this breed. Ask me anything!"
        );
    }
}
