//! Label sets for the two classification stages
//!
//! Stage 1 is a coarse binary screen; stage 2 pits "AI skill" against a wide
//! field of negative domain labels so that text merely *about* technology
//! has a closer non-AI label to fall into.

/// Positive label of the binary stage.
pub const AI_LABEL: &str = "Artificial Intelligence";

/// Positive label of the discriminating stage.
pub const AI_SKILL_LABEL: &str = "AI skill";

/// Binary stage label set.
pub const AI_RELATED_LABELS: [&str; 2] = [AI_LABEL, "Not AI"];

/// Discriminating stage label set: one positive label and dozens of negative
/// domain labels spanning the research landscape, plus generic fallbacks.
pub const CANDIDATE_LABELS: &[&str] = &[
    // Positive
    AI_SKILL_LABEL,
    // Engineering & physical sciences
    "Computer science concept",
    "Mathematics concept",
    "Civil engineering method",
    "Mechanical engineering method",
    "Electronic/electrical engineering method",
    "Chemical engineering method",
    "Physics research method",
    "Materials-science method",
    "Analytical chemistry method",
    "Chemical synthesis technique",
    "Process engineering method",
    "Astronomy concepts",
    // Biological sciences & medicine/health
    "Biology research method",
    "Molecular biology technique",
    "Cellular biology method",
    "Biomedical research method",
    "Pharmaceutical research method",
    "Genetics technique",
    "Bioinformatics method",
    "Medical research method",
    "Dental research method",
    "Psychology research topic",
    "Healthcare research method",
    // Environment
    "Environmental science topic",
    "Transport studies topic",
    "Earth science method",
    "Geography topic",
    "Food science method",
    "Nutrition research method",
    // Business
    "Accounting & finance topic",
    "Economics topic",
    "Management & organisations topic",
    "Marketing topic",
    "International business topic",
    "Analytics & operations topic",
    "People, work & employment topic",
    // Social sciences & humanities
    "History research",
    "Archaeology/medieval studies topic",
    "Languages & cultural studies topic",
    "Literary studies topic",
    "Design methodology",
    "Fine art / art history topic",
    "Media & communication studies topic",
    "Musicology / performance studies topic",
    "Philosophy & religion topic",
    "Ethics research",
    "Education research method",
    "Law topic",
    "Politics & international studies topic",
    "Sociology & social policy topic",
    // Generic statements
    "Generic research",
    "Misc",
];
