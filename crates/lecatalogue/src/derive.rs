// Catalog derivation from assessment URLs
//
// Product pages only expose a slug, so names and descriptions are synthesized
// from it with a fixed keyword table.

/// Name used when a URL carries no usable slug
pub const FALLBACK_NAME: &str = "SHL Assessment";

/// Maximum keyword phrases folded into one description
const MAX_DESCRIPTION_PHRASES: usize = 3;

/// Ordered keyword to description phrase table
const KEYWORD_PHRASES: &[(&str, &str)] = &[
    ("java", "Java programming skills assessment"),
    ("python", "Python programming skills test"),
    ("sql", "SQL database skills assessment"),
    ("selenium", "Selenium automation testing"),
    ("javascript", "JavaScript programming test"),
    ("html", "HTML/CSS web development skills"),
    ("css", "CSS styling and design skills"),
    ("sales", "Sales skills and aptitude assessment"),
    ("marketing", "Marketing skills evaluation"),
    ("communication", "Communication skills test"),
    ("personality", "Personality assessment"),
    ("cognitive", "Cognitive ability test"),
    ("analytical", "Analytical skills assessment"),
    ("numerical", "Numerical reasoning test"),
    ("verbal", "Verbal reasoning assessment"),
    ("leadership", "Leadership skills evaluation"),
    ("management", "Management skills test"),
    ("technical", "Technical skills assessment"),
];

/// Extract a readable assessment name from a product URL
///
/// `https://.../view/java-programming-new/` becomes `Java Programming`.
pub fn name_from_url(url: &str) -> String {
    let slug = if url.contains("/view/") {
        url.rsplit("/view/")
            .next()
            .and_then(|rest| rest.split('/').next())
            .unwrap_or_default()
    } else {
        url.rsplit('/').next().unwrap_or_default()
    };

    let cleaned = slug.replace("-new", "").replace(['-', '_'], " ");
    let name = title_case(cleaned.trim());

    if name.is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        name
    }
}

/// Synthesize a short description from keywords found in a name
pub fn describe(name: &str) -> String {
    let lower = name.to_lowercase();
    let phrases: Vec<&str> = KEYWORD_PHRASES
        .iter()
        .filter(|(keyword, _)| lower.contains(keyword))
        .map(|(_, phrase)| *phrase)
        .take(MAX_DESCRIPTION_PHRASES)
        .collect();

    if phrases.is_empty() {
        "SHL assessment for evaluating job-related skills".to_string()
    } else {
        format!("SHL assessment for {}", phrases.join(", "))
    }
}

/// Uppercase the first letter of every alphabetic run, lowercase the rest
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut previous_is_letter = false;

    for c in text.chars() {
        if c.is_alphabetic() {
            if previous_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            previous_is_letter = true;
        } else {
            out.push(c);
            previous_is_letter = false;
        }
    }

    out
}
