//! Static exercise table shown to the user and sent along with each analysis.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: String,
    pub name: String,
    pub description: String,
    pub instructions: Vec<String>,
}

impl Activity {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        instructions: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            instructions: instructions.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    Cardio,
    Strength,
}

impl Category {
    fn exercise_ids(self) -> &'static [&'static str] {
        match self {
            Category::Cardio => &["jumping-jacks", "high-knees", "burpees", "mountain-climbers"],
            Category::Strength => &["squats", "push-ups", "plank", "lunges"],
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Category::Cardio => "คาร์ดิโอ",
            Category::Strength => "เสริมกล้ามเนื้อ",
        }
    }
}

struct ExerciseDef {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    instructions: &'static [&'static str],
}

const EXERCISES: &[ExerciseDef] = &[
    ExerciseDef {
        id: "jumping-jacks",
        name: "Jumping Jacks",
        description: "A full-body exercise that raises your heart rate.",
        instructions: &[
            "Stand upright with your legs together, arms at your sides.",
            "Bend your knees slightly, and jump into the air.",
            "As you jump, spread your legs to be about shoulder-width apart. Stretch your arms out and over your head.",
            "Jump back to starting position.",
        ],
    },
    ExerciseDef {
        id: "high-knees",
        name: "High Knees",
        description: "A cardio-intensive exercise performed in place.",
        instructions: &[
            "Stand with your feet hip-width apart.",
            "Lift up your left knee to your chest.",
            "Switch to lift your right knee to your chest. Continue the movement, alternating legs and moving at a sprinting or running pace.",
            "Keep your back straight and core engaged.",
        ],
    },
    ExerciseDef {
        id: "burpees",
        name: "Burpees",
        description: "A full body exercise used in strength training and as an aerobic exercise.",
        instructions: &[
            "Start in a squat position with your knees bent, back straight, and your feet about shoulder-width apart.",
            "Lower your hands to the floor in front of you so they're just inside your feet.",
            "With your weight on your hands, kick your feet back so you're on your hands and toes, and in a push-up position.",
            "Jump your feet back towards your hands.",
            "Reach your arms over your head and explosively jump up into the air.",
        ],
    },
    ExerciseDef {
        id: "mountain-climbers",
        name: "Mountain Climbers",
        description: "A bodyweight exercise that works multiple muscle groups.",
        instructions: &[
            "Start in a push-up position.",
            "Bring your right knee towards your chest.",
            "Return to the starting position and repeat with your left leg.",
            "Continue alternating legs.",
        ],
    },
    ExerciseDef {
        id: "squats",
        name: "Squats",
        description: "A strength exercise in which the trainee lowers their hips from a standing position and then stands back up.",
        instructions: &[
            "Stand with your feet a little wider than your hips.",
            "Keep your chest up and proud and your back straight.",
            "Sit back into your hips, bending your knees and ankles.",
            "Lower until your hips are slightly below your knees.",
            "Return to the start position by pushing through your heels.",
        ],
    },
    ExerciseDef {
        id: "push-ups",
        name: "Push-ups",
        description: "A common calisthenics exercise beginning from the prone position.",
        instructions: &[
            "Get on all fours, placing your hands slightly wider than your shoulders.",
            "Straighten your arms and legs.",
            "Lower your body until your chest nearly touches the floor.",
            "Push yourself back up.",
        ],
    },
    ExerciseDef {
        id: "plank",
        name: "Plank",
        description: "An isometric core strength exercise that involves maintaining a position similar to a push-up for the maximum possible time.",
        instructions: &[
            "Place forearms on the floor with elbows aligned below shoulders and arms parallel to your body at about shoulder width.",
            "If flat palms bother your wrists, clasp your hands together.",
            "Your body should form a straight line from your head to your feet.",
            "Engage your core by sucking your belly button into your spine.",
        ],
    },
    ExerciseDef {
        id: "lunges",
        name: "Lunges",
        description: "A strength training exercise that can be used to develop lower-body strength and endurance.",
        instructions: &[
            "Step forward with one leg, lowering your hips until both knees are bent at an approximate 90-degree angle.",
            "Your front knee should be directly above your second toe.",
            "Your back knee should not touch the ground.",
            "Push off your front foot to return to the starting position.",
        ],
    },
];

impl From<&ExerciseDef> for Activity {
    fn from(def: &ExerciseDef) -> Self {
        Activity::new(def.id, def.name, def.description, def.instructions.iter().copied())
    }
}

pub fn all() -> Vec<Activity> {
    EXERCISES.iter().map(Activity::from).collect()
}

pub fn len() -> usize {
    EXERCISES.len()
}

pub fn find(id: &str) -> Option<Activity> {
    EXERCISES.iter().find(|def| def.id == id).map(Activity::from)
}

pub fn by_category(category: Category) -> Vec<Activity> {
    let ids = category.exercise_ids();
    EXERCISES
        .iter()
        .filter(|def| ids.contains(&def.id))
        .map(Activity::from)
        .collect()
}

/// Next exercise in table order, wrapping. Unknown ids start from the top.
pub fn next_after(id: Option<&str>) -> Activity {
    let next_index = id
        .and_then(|id| EXERCISES.iter().position(|def| def.id == id))
        .map(|index| (index + 1) % EXERCISES.len())
        .unwrap_or(0);
    Activity::from(&EXERCISES[next_index])
}

pub fn random<R: rand::Rng + ?Sized>(rng: &mut R) -> Activity {
    let index = rng.gen_range(0..EXERCISES.len());
    Activity::from(&EXERCISES[index])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_split_the_table() {
        let cardio = by_category(Category::Cardio);
        let strength = by_category(Category::Strength);
        assert_eq!(cardio.len() + strength.len(), len());
        assert!(strength.iter().any(|a| a.name == "Squats"));
    }

    #[test]
    fn rotation_wraps_to_first() {
        assert_eq!(next_after(Some("jumping-jacks")).id, "high-knees");
        assert_eq!(next_after(Some("lunges")).id, "jumping-jacks");
        assert_eq!(next_after(None).id, "jumping-jacks");
        assert_eq!(next_after(Some("yoga")).id, "jumping-jacks");
    }

    #[test]
    fn find_returns_instructions() {
        let squats = find("squats").unwrap();
        assert_eq!(squats.instructions.len(), 5);
        assert!(find("missing").is_none());
    }
}
