//! The hair assessment questionnaire

use super::forms::{FormGroup, FormInput, Required};
use super::steps::Step;

/// Coarse stages shown in the header
pub const STAGES: &[&str] = &["About You", "Hair Profile", "Your Goal"];

fn radios(name: &str, options: &[(&str, &str)]) -> Vec<FormInput> {
    options
        .iter()
        .map(|(value, label)| FormInput::radio(name, value, label))
        .collect()
}

fn chips(name: &str, options: &[(&str, &str)]) -> Vec<FormInput> {
    options
        .iter()
        .map(|(value, label)| FormInput::checkbox(name, value, label))
        .collect()
}

/// Build the steps in display order
pub fn assessment_steps() -> Vec<Step> {
    vec![
        Step::new(
            "Let's get to know you",
            0,
            vec![
                FormGroup::new("Full name", vec![FormInput::text("full_name", "Full name")]),
                FormGroup::new("Age", vec![FormInput::number("age", "Age")]),
                FormGroup::new("Mobile number", vec![FormInput::tel("mobile", "Mobile")]),
            ],
        ),
        Step::new(
            "Your gender",
            0,
            vec![FormGroup::new(
                "Gender",
                radios(
                    "gender",
                    &[("male", "Male"), ("female", "Female"), ("other", "Other")],
                ),
            )
            .requiring(Required::Radio)],
        ),
        Step::new(
            "Where are you losing hair?",
            1,
            vec![FormGroup::new(
                "Hair loss pattern",
                radios(
                    "pattern",
                    &[
                        ("receding_hairline", "Receding hairline"),
                        ("thinning_crown", "Thinning crown"),
                        ("overall_thinning", "Overall thinning"),
                        ("patchy", "Patchy hair loss"),
                    ],
                ),
            )
            .requiring(Required::Radio)],
        ),
        Step::new(
            "How long has it been?",
            1,
            vec![FormGroup::new(
                "Hair loss duration",
                radios(
                    "duration",
                    &[
                        ("lt_6_months", "Less than 6 months"),
                        ("6_12_months", "6 to 12 months"),
                        ("1_3_years", "1 to 3 years"),
                        ("gt_3_years", "More than 3 years"),
                    ],
                ),
            )
            .requiring(Required::Radio)],
        ),
        Step::new(
            "Any of these apply to you?",
            1,
            vec![FormGroup::new(
                "Health conditions",
                chips(
                    "conditions",
                    &[
                        ("thyroid", "Thyroid"),
                        ("anaemia", "Anaemia"),
                        ("diabetes", "Diabetes"),
                        ("dandruff", "Dandruff"),
                        ("stress", "High stress"),
                        ("none", "None"),
                    ],
                ),
            )
            .requiring(Required::Checkbox)],
        ),
        Step::new(
            "What's your goal?",
            2,
            vec![
                FormGroup::new(
                    "Goal",
                    radios(
                        "goal",
                        &[
                            ("stop_hair_fall", "Stop hair fall"),
                            ("regrow", "Regrow hair"),
                            ("density", "Improve density"),
                            ("explore", "Just exploring"),
                        ],
                    ),
                )
                .requiring(Required::Radio),
                FormGroup::new("Email", vec![FormInput::email("email", "Email address")]),
            ],
        ),
    ]
}
