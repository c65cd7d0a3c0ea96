//! Breed fact table and the exact → partial → default lookup

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::fact_sheet::BreedFactSheet;

/// How a breed name was resolved to a fact sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
    /// Name equals a table key
    Exact,
    /// Name contains a key, or a key contains the name
    Partial,
    /// Nothing matched, the unknown-breed sheet was used
    Default,
}

/// Result of resolving a breed name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FactLookup<'a> {
    /// Key of the matched entry, `None` for the default sheet
    pub key: Option<&'a str>,
    pub tier: MatchTier,
    pub sheet: &'a BreedFactSheet,
}

/// Read-only table of breed fact sheets
#[derive(Debug, Clone)]
pub struct BreedKnowledge {
    entries: Vec<(String, BreedFactSheet)>,
    fallback: BreedFactSheet,
}

static BUILTIN: Lazy<BreedKnowledge> = Lazy::new(BreedKnowledge::with_builtin_breeds);

impl BreedKnowledge {
    /// Table with explicit entries, searched in insertion order
    pub fn new(entries: Vec<(String, BreedFactSheet)>, fallback: BreedFactSheet) -> Self {
        Self { entries, fallback }
    }

    /// Process-wide table of built-in breeds
    pub fn builtin() -> &'static BreedKnowledge {
        &BUILTIN
    }

    pub fn lookup(&self, breed: &str) -> FactLookup<'_> {
        if let Some((key, sheet)) = self.entries.iter().find(|(key, _)| key == breed) {
            return FactLookup {
                key: Some(key),
                tier: MatchTier::Exact,
                sheet,
            };
        }

        // An empty name is contained in every key; treat it as unknown
        if !breed.is_empty() {
            if let Some((key, sheet)) = self
                .entries
                .iter()
                .find(|(key, _)| breed.contains(key.as_str()) || key.contains(breed))
            {
                return FactLookup {
                    key: Some(key),
                    tier: MatchTier::Partial,
                    sheet,
                };
            }
        }

        FactLookup {
            key: None,
            tier: MatchTier::Default,
            sheet: &self.fallback,
        }
    }

    /// Shortcut for `lookup(breed).sheet`
    pub fn sheet(&self, breed: &str) -> &BreedFactSheet {
        self.lookup(breed).sheet
    }

    pub fn breeds(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn fallback(&self) -> &BreedFactSheet {
        &self.fallback
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn with_builtin_breeds() -> Self {
        let entries = vec![
            // Working
            entry("Siberian Husky", [
                "Siberia",
                "12-14 years",
                "Working",
                "20-23 inches",
                "High-protein, high-fat diet similar to ancestral diet. Fish-based kibble is great.",
                "Thrives in cold weather. Needs shade and A/C in summer. DO NOT shave.",
                "Heavy shedder. Blows coat twice a year. Daily brushing needed.",
                "Intelligent but stubborn. Keep sessions short and fun.",
                "The Siberian Husky is a medium-sized working sled dog breed. They are recognizable by their thick double coat, erect triangular ears, and distinctive markings. They are friendly, gentle, and alert.",
            ]),
            entry("Rottweiler", [
                "Germany",
                "9-10 years",
                "Working",
                "22-27 inches",
                "High protein (22-26%) for muscle mass. Watch calorie intake to protect joints.",
                "Tolerates cool weather well. Avoid extreme heat due to black coat.",
                "Low maintenance. Brush weekly.",
                "Requires firm, consistent leadership and early socialization.",
                "The Rottweiler is a robust working breed of great strength descended from the mastiffs of the Roman legions. A gentle playmate and protector within the family circle, the Rottie observes the outside world with a self-assured aloofness.",
            ]),
            entry("German Shepherd", [
                "Germany",
                "7-10 years",
                "Herding",
                "22-26 inches",
                "High-quality performance food. Glucosamine supplements recommended for hips.",
                "Double coat allows tolerance of cold. Versatile in most climates.",
                "Frequent shedding. Brush every few days.",
                "Highly trainable. Excellent for police, military, and service work.",
                "The German Shepherd Dog is one of America's most popular dog breeds, and for good reasons. They are capable working dogs of high intelligence and noble character.",
            ]),
            entry("Boxer", [
                "Germany",
                "10-12 years",
                "Working",
                "21-25 inches",
                "High calorie diet for their high energy levels. Bloat-prone (feed smaller meals).",
                "Short coat means they need coats in winter and A/C in summer.",
                "Very low maintenance. Occasional bath.",
                "Playful and upbeat. Positive reinforcement works best.",
                "Loyal, affectionate, energetic, and playful, the Boxer is the ultimate family dog. They are intelligent and active, preferring to be busy.",
            ]),
            entry("Great Dane", [
                "Germany",
                "7-10 years",
                "Working",
                "28-32 inches",
                "Giant breed formula. Crucial to prevent growing too fast (bone issues).",
                "Moderate climates. Short coat offers little protection from cold.",
                "Low maintenance.",
                "Gentle giant, but needs obedience training due to size.",
                "The easygoing Great Dane, the 'Apollo of Dogs', is a total joy to live with, but owning a dog of such imposing size, weight, and strength is a commitment not to be entered into lightly.",
            ]),
            // Sporting
            entry("Golden Retriever", [
                "Scotland",
                "10-12 years",
                "Sporting",
                "21-24 inches",
                "Balanced diet. They love to eat, so watch for obesity.",
                "Adaptable. Loves water and snow. Provide shade in heat.",
                "Regular brushing to prevent mats in feathering.",
                "Eager to please. The gold standard for obedience.",
                "The Golden Retriever is an exuberant Scottish gundog of great beauty. They are serious workers at hunting and field work, as guides for the blind, and in search-and-rescue, enjoy obedience and other competitive events.",
            ]),
            entry("Labrador Retriever", [
                "Canada",
                "10-12 years",
                "Sporting",
                "21-24 inches",
                "Strict portion control. Labs are prone to becoming overweight.",
                "Water-resistant coat makes them hardy in most weather.",
                "Wash-and-wear coat. Brush weekly.",
                "Friendly and outgoing. Very treat-motivated.",
                "The sweet-faced, lovable Labrador Retriever is America's most popular dog breed. Labs are friendly, outgoing, and high-spirited companions who have more than enough affection to go around.",
            ]),
            entry("Cocker Spaniel", [
                "UK/USA",
                "10-14 years",
                "Sporting",
                "13-15 inches",
                "High quality kibble. Watch for food allergies (ears/skin).",
                "Moderate.",
                "High maintenance. Professional grooming needed frequently.",
                "Gentle training methods. Can be sensitive.",
                "The Cocker Spaniel is a beloved companion dog breed, though they remain a capable bird dog at heart. Beautiful, sweet-natured, and moderately active.",
            ]),
            // Toy
            entry("Pug", [
                "China",
                "13-15 years",
                "Toy",
                "10-13 inches",
                "Calorie-controlled. They gain weight just looking at food.",
                "Very sensitive to heat (Brachycephalic). Keep cool!",
                "Clean face wrinkles daily to prevent infection.",
                "Stubborn but food motivated.",
                "The Pug is often described as a lot of dog in a small space. These sturdy, compact dogs are a part of the American Kennel Club's Toy group, and are known as the clowns of the canine world.",
            ]),
            entry("Chihuahua", [
                "Mexico",
                "14-20 years",
                "Toy",
                "5-8 inches",
                "Nutrient-dense small breed formula.",
                "Hates the cold. Needs sweaters in winter.",
                "Minimal.",
                "Can be sassy. Needs socialization to prevent 'Small Dog Syndrome'.",
                "The Chihuahua is a tiny dog with a huge personality. A national symbol of Mexico, these alert and amusing 'purse dogs' stand among the oldest breeds of the Americas.",
            ]),
            entry("Shih Tzu", [
                "China",
                "10-18 years",
                "Toy",
                "9-10 inches",
                "High quality food for skin and coat health.",
                "Indoor dog. Sensitive to heat.",
                "Daily brushing required if coat is long.",
                "Can be difficult to housebreak.",
                "Shih Tzu means 'Lion Dog', but they are lovers, not fighters. Bred solely to be companions, they are affectionate, happy, and outgoing house dogs who love nothing more than to follow their people from room to room.",
            ]),
            // Hound
            entry("Beagle", [
                "United Kingdom",
                "10-15 years",
                "Hound",
                "13-15 inches",
                "Measured meals. They are scavengers and will overeat.",
                "Adaptable to most climates.",
                "Low maintenance. Ears need cleaning.",
                "Distracted by scents. Recall training is difficult.",
                "The Beagle is a breed of small hound that is similar in appearance to the much larger foxhound. The beagle is a scent hound, developed primarily for hunting hare.",
            ]),
            entry("Dachshund", [
                "Germany",
                "12-16 years",
                "Hound",
                "8-9 inches",
                "Keep slim to protect their long back (IVDD risk).",
                "Likes warmth. Dislikes rain and wet grass.",
                "Varies by coat type (Smooth, Wire, Long).",
                "Independent and stubborn. Patience required.",
                "The Dachshund is an icon of pure dogdom. Their long, low silhouette, ever-alert expression, and bold, vivacious personality have made him a superstar of the canine kingdom.",
            ]),
            // Non-sporting
            entry("Bulldog", [
                "United Kingdom",
                "8-10 years",
                "Non-Sporting",
                "14-15 inches",
                "Digestible food to reduce gas.",
                "Heat intolerant. Indoor AC is mandatory in summer.",
                "Clean face folds daily.",
                "Short sessions. They tire easily.",
                "Kind, courageous, and dignified. The Bulldog is a thick-set, low-slung, well-muscled bruiser whose 'sourmug' face acts as the universal symbol of courage and tenacity.",
            ]),
            entry("Poodle", [
                "France/Germany",
                "10-18 years",
                "Non-Sporting",
                "Std: >15in, Min: 10-15in",
                "Balanced diet rich in Omega oils.",
                "Adaptable.",
                "Professional grooming every 4-6 weeks is mandatory.",
                "One of the smartest breeds. Learns tricks instantly.",
                "Don't let the fancy cut fool you: Poodles are eager, athletic, and wickedly smart 'real dogs' of remarkable versatility. The Standard, with his greater size and strength, is the best all-around athlete of the family.",
            ]),
        ];

        Self::new(entries, BreedFactSheet::unknown_breed())
    }
}

impl Default for BreedKnowledge {
    fn default() -> Self {
        Self::with_builtin_breeds()
    }
}

/// Fields in order: origin, life span, group, height, diet, climate,
/// grooming, training, bio
fn entry(name: &str, fields: [&str; 9]) -> (String, BreedFactSheet) {
    let [origin, life_span, group, height, diet, climate, grooming, training, bio] = fields;

    (
        name.to_string(),
        BreedFactSheet {
            origin: origin.into(),
            life_span: life_span.into(),
            group: group.into(),
            height: height.into(),
            diet: diet.into(),
            climate: climate.into(),
            grooming: grooming.into(),
            training: training.into(),
            bio: bio.into(),
        },
    )
}
