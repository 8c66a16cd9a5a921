//! English pluralization of type names (`Person` => `People`).

const UNCOUNTABLE: [&str; 10] = [
    "equipment",
    "information",
    "rice",
    "money",
    "species",
    "series",
    "fish",
    "sheep",
    "news",
    "data",
];

const IRREGULAR: [(&str, &str); 16] = [
    ("person", "people"),
    ("man", "men"),
    ("woman", "women"),
    ("child", "children"),
    ("mouse", "mice"),
    ("goose", "geese"),
    ("foot", "feet"),
    ("tooth", "teeth"),
    ("ox", "oxen"),
    ("leaf", "leaves"),
    ("knife", "knives"),
    ("life", "lives"),
    ("wife", "wives"),
    ("half", "halves"),
    ("wolf", "wolves"),
    ("shelf", "shelves"),
];

/// Pluralizes the last camel-case word of `name`, keeping the rest intact.
pub fn pluralize(name: &str) -> String {
    if name.is_empty() {
        return String::new();
    }

    let split = name
        .char_indices()
        .filter(|(_, c)| c.is_uppercase())
        .map(|(idx, _)| idx)
        .last()
        .unwrap_or(0);
    let (head, word) = name.split_at(split);
    let lower = word.to_lowercase();

    if UNCOUNTABLE.contains(&lower.as_str()) {
        return name.to_string();
    }

    if let Some((_, plural)) = IRREGULAR.iter().find(|(single, _)| *single == lower) {
        let starts_upper = word.chars().next().is_some_and(char::is_uppercase);
        let plural = if starts_upper {
            crate::capitalize(plural)
        } else {
            (*plural).to_string()
        };
        return format!("{head}{plural}");
    }

    format!("{head}{}", regular_plural(word))
}

fn regular_plural(word: &str) -> String {
    let lower = word.to_lowercase();
    if let Some(stem) = word.strip_suffix('y').or_else(|| word.strip_suffix('Y')) {
        let before = stem.chars().last().map(|c| c.to_ascii_lowercase());
        if before.is_some_and(|c| !"aeiou".contains(c)) {
            return format!("{stem}ies");
        }
    }
    if ["s", "x", "z", "ch", "sh"]
        .iter()
        .any(|suffix| lower.ends_with(suffix))
    {
        return format!("{word}es");
    }
    format!("{word}s")
}
