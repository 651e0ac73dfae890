use super::ConditionLabel;

pub(super) fn conditions() -> Vec<ConditionLabel> {
    vec![
        ConditionLabel::new(
            "otitis_media",
            "Otitis Media (Middle Ear Infection)",
            "Infection of the middle ear, often characterized by fluid buildup behind the eardrum.",
            &[
                "Ear pain",
                "Difficulty hearing",
                "Drainage of fluid from the ear",
                "Fever",
                "Irritability in children",
            ],
            false,
        ),
        ConditionLabel::new(
            "otitis_externa",
            "Otitis Externa (Swimmer's Ear)",
            "Infection of the ear canal, often from water exposure.",
            &[
                "Ear pain that worsens when touching the outer ear",
                "Itchiness in the ear canal",
                "Redness and swelling",
                "Discharge of clear fluid or pus",
                "Temporary hearing loss",
            ],
            false,
        ),
        ConditionLabel::new(
            "ear_wax_blockage",
            "Ear Wax Blockage",
            "Excessive buildup of cerumen (ear wax) in the ear canal.",
            &[
                "Feeling of fullness in the ear",
                "Partial hearing loss",
                "Ringing or noises in the ear (tinnitus)",
                "Itching or discomfort",
            ],
            false,
        ),
        ConditionLabel::new(
            "perforated_eardrum",
            "Perforated Eardrum",
            "A hole or tear in the tissue separating the ear canal from the middle ear.",
            &[
                "Sudden sharp pain that subsides quickly",
                "Drainage from the ear",
                "Hearing loss",
                "Ringing in the ear (tinnitus)",
                "Spinning sensation (vertigo)",
            ],
            true,
        ),
        ConditionLabel::new(
            "foreign_body",
            "Foreign Body in Ear",
            "An object trapped in the ear canal.",
            &[
                "Pain or discomfort",
                "Feeling of fullness in the ear",
                "Decreased hearing",
                "Drainage or bleeding",
            ],
            false,
        ),
    ]
}
