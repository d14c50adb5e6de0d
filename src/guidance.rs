use crate::scoring::Recommendation;

/// Category score below which extra remedial steps are suggested.
const WEAK_CATEGORY: f64 = 60.0;
/// Confidence needed for the third ranked role.
const BROAD_ROLES_CONFIDENCE: u8 = 70;

const RANKED_ROLES: [&str; 5] = [
    "Wearable Firmware Engineer",
    "Mobile App Developer (Wearable-focused)",
    "Embedded Systems Developer",
    "UX/UI Designer for Wearables",
    "Sensor Data Analyst",
];

const ALTERNATIVE_ROLES: [&str; 4] = [
    "Mobile Application Developer",
    "IoT Developer",
    "Hardware Test Engineer",
    "Web Developer",
];

fn owned(steps: &[&str]) -> Vec<String> {
    steps.iter().map(|s| s.to_string()).collect()
}

pub fn next_steps(recommendation: Recommendation, technical: f64, psychometric: f64) -> Vec<String> {
    match recommendation {
        Recommendation::Yes => owned(&[
            "Enroll in \"Embedded Systems for Wearables\" course",
            "Practice Bluetooth Low Energy projects",
            "Build sensor integration applications",
            "Join wearable development communities",
        ]),
        Recommendation::Maybe => {
            let mut steps = Vec::new();
            if technical < WEAK_CATEGORY {
                steps.push("Strengthen C/C++ programming fundamentals");
                steps.push("Learn embedded systems basics");
            }
            if psychometric < WEAK_CATEGORY {
                steps.push("Explore wearable technology to build interest");
                steps.push("Consider starting with mobile app development");
            }
            steps.push("Take beginner embedded systems courses");
            owned(&steps)
        }
        Recommendation::No => owned(&[
            "Consider mobile app development as an alternative",
            "Explore web development opportunities",
            "Build foundational programming skills",
            "Reassess career interests in 6-12 months",
        ]),
    }
}

pub fn top_roles(confidence: u8) -> Vec<String> {
    let count = if confidence >= BROAD_ROLES_CONFIDENCE { 3 } else { 2 };
    owned(&RANKED_ROLES[..count])
}

pub fn alternative_roles() -> Vec<String> {
    owned(&ALTERNATIVE_ROLES)
}
