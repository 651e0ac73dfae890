use super::ConditionLabel;

pub(super) fn conditions() -> Vec<ConditionLabel> {
    vec![
        ConditionLabel::new(
            "strep_throat",
            "Strep Throat",
            "A bacterial infection that causes inflammation and pain in the throat.",
            &[
                "Throat pain that comes on quickly",
                "Red and swollen tonsils",
                "White patches on the tonsils",
                "Tiny red spots on the roof of the mouth",
                "Fever",
            ],
            true,
        ),
        ConditionLabel::new(
            "tonsillitis",
            "Tonsillitis",
            "Inflammation of the tonsils, typically caused by viral or bacterial infection.",
            &[
                "Red, swollen tonsils",
                "White or yellow coating on tonsils",
                "Sore throat",
                "Painful swallowing",
                "Fever",
            ],
            false,
        ),
        ConditionLabel::new(
            "pharyngitis",
            "Pharyngitis",
            "Inflammation of the pharynx resulting in a sore throat.",
            &[
                "Sore throat",
                "Difficulty swallowing",
                "Fever",
                "Enlarged lymph nodes",
            ],
            false,
        ),
        ConditionLabel::new(
            "laryngitis",
            "Laryngitis",
            "Inflammation of the voice box (larynx) from infection, irritation, or overuse.",
            &[
                "Hoarse, dry, or raspy voice",
                "Sore throat",
                "Dry cough",
                "Tickling sensation in the throat",
            ],
            false,
        ),
        ConditionLabel::new(
            "epiglottitis",
            "Epiglottitis",
            "Inflammation of the epiglottis, which can lead to breathing difficulties.",
            &[
                "Severe sore throat",
                "Difficulty and pain when swallowing",
                "Muffled voice",
                "Difficulty breathing",
                "Drooling",
            ],
            true,
        ),
    ]
}
